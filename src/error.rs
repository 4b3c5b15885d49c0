use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of the conversion pipeline.
///
/// Only `Io` (output directory setup) is fatal to a batch; every other
/// variant is recoverable at the scope its name implies: `MediaRead` skips
/// the video, `FolderEnumeration` the folder, `FileRead`/`RowParse`/
/// `FrameIndex` the label file, and `OutputWrite` aborts the remaining
/// files of one folder.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to read video dimensions of {path}: {message}")]
    MediaRead { path: PathBuf, message: String },

    #[error("failed to list label folder {path}: {source}")]
    FolderEnumeration {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read label file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed record in {path}: {message}")]
    RowParse { path: PathBuf, message: String },

    #[error("non-numeric frame index token `{token}` in {path}")]
    FrameIndex { path: PathBuf, token: String },

    #[error("failed to write output table {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
