use std::fs;
use std::path::Path;

use crate::error::{ConvertError, Result};

// A record needs the track id, four bbox fields, and five (x, y, score)
// keypoint triplets.
pub const MIN_RECORD_FIELDS: usize = 20;

// Constant instance score emitted for every aggregated row
const INSTANCE_SCORE: &str = "0.9";

/// Transform one label record into one aggregated CSV row.
///
/// Input fields are split on single spaces: `track_id` first, fields
/// `[5..]` carried verbatim except that each keypoint x is scaled by the
/// video width and each y by the video height. Scores and any trailing
/// extra fields pass through untouched.
pub fn transform_row(
    line: &str,
    frame_token: &str,
    width: u32,
    height: u32,
    path: &Path,
) -> Result<String> {
    let row_err = |message: String| ConvertError::RowParse {
        path: path.to_path_buf(),
        message,
    };

    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() < MIN_RECORD_FIELDS {
        return Err(row_err(format!(
            "expected at least {} fields, got {}",
            MIN_RECORD_FIELDS,
            fields.len()
        )));
    }

    let mut out: Vec<String> = Vec::with_capacity(fields.len() - 2);
    out.push(format!("track_{}", fields[0]));
    out.push(frame_token.to_string());
    out.push(INSTANCE_SCORE.to_string());
    out.extend(fields[5..].iter().map(|f| f.to_string()));

    // Keypoint triplets start at output index 3; the score field of each
    // triplet stays verbatim.
    for i in (3..18).step_by(3) {
        let x: f64 = out[i]
            .parse()
            .map_err(|_| row_err(format!("non-numeric x coordinate `{}`", out[i])))?;
        let y: f64 = out[i + 1]
            .parse()
            .map_err(|_| row_err(format!("non-numeric y coordinate `{}`", out[i + 1])))?;
        out[i] = format_coordinate(x * f64::from(width));
        out[i + 1] = format_coordinate(y * f64::from(height));
    }

    Ok(out.join(","))
}

// Shortest round-trip decimal with a forced fractional part, matching the
// source program's float formatting (`320.0`, not `320`).
fn format_coordinate(value: f64) -> String {
    format!("{value:?}")
}

/// Convert one label file into its block of output rows.
///
/// Rows within a frame are ordered lexicographically on the raw record
/// text. The whole file is materialized before anything is written, so a
/// single malformed record drops the file atomically instead of leaving a
/// partial block in the table.
pub fn aggregate_label_file(
    path: &Path,
    frame_token: &str,
    width: u32,
    height: u32,
) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|source| ConvertError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines: Vec<&str> = content.split('\n').filter(|l| !l.is_empty()).collect();
    lines.sort_unstable();

    let mut rows = String::with_capacity(content.len());
    for line in lines {
        rows.push_str(&transform_row(line, frame_token, width, height, path)?);
        rows.push('\n');
    }
    Ok(rows)
}
