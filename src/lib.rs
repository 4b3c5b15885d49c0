//! Per-frame pose label aggregator
//!
//! This library merges per-frame, per-track pose label files into one CSV
//! table per label folder, rescaling normalized keypoint coordinates to
//! pixel space using the source video's resolution.

pub mod aggregate;
pub mod config;
pub mod conversion;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;
pub mod video;

// Re-export commonly used types and functions
pub use aggregate::convert_batch;
pub use config::Args;
pub use error::{ConvertError, Result};
pub use io::{discover_label_folders, folder_matches_stem, list_label_files, output_table_path};
pub use types::{
    ConversionReport, ConversionStats, ProgressSink, VideoDescriptor, CSV_COLUMNS, VIDEO_FORMATS,
};
pub use video::{FfprobeReader, VideoMetadataReader};
