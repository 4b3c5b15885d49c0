use serde::Deserialize;
use std::path::Path;
use std::process::Command;

use crate::error::{ConvertError, Result};

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    width: Option<u32>,
    height: Option<u32>,
}

/// Source of a video's pixel dimensions.
///
/// The aggregator only ever needs the two integers, so the probe sits
/// behind a trait and tests can substitute fixed dimensions.
pub trait VideoMetadataReader {
    fn read_dimensions(&self, path: &Path) -> Result<(u32, u32)>;
}

/// Reads dimensions by running `ffprobe` against the first video stream.
/// The subprocess has exited by the time this returns, so the file handle
/// is released even when the query fails.
#[derive(Debug, Default)]
pub struct FfprobeReader;

impl VideoMetadataReader for FfprobeReader {
    fn read_dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        let path_str = path
            .to_str()
            .ok_or_else(|| media_read(path, "path is not valid UTF-8"))?;

        let output = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "-select_streams",
                "v:0",
                path_str,
            ])
            .output()
            .map_err(|e| media_read(path, &format!("failed to run ffprobe: {e}")))?;

        if !output.status.success() {
            return Err(media_read(
                path,
                &format!("ffprobe exited with {}", output.status),
            ));
        }

        let parsed: FfprobeOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| media_read(path, &format!("unreadable ffprobe output: {e}")))?;

        match parsed.streams.first() {
            Some(&FfprobeStream {
                width: Some(width),
                height: Some(height),
            }) => Ok((width, height)),
            Some(_) => Err(media_read(path, "video stream reports no dimensions")),
            None => Err(media_read(path, "no video stream found")),
        }
    }
}

fn media_read(path: &Path, message: &str) -> ConvertError {
    ConvertError::MediaRead {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
