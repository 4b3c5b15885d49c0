use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

/// One per-frame label file with its filename-encoded ordering key.
///
/// `frame_token` is the last underscore-delimited token of the file stem,
/// kept verbatim for the output `frame_idx` column; `frame_idx` is its
/// integer value, used only for ordering.
#[derive(Debug, Clone)]
pub struct LabelFile {
    pub path: PathBuf,
    pub frame_token: String,
    pub frame_idx: i64,
}

/// The enumerated contents of one label folder: files in ascending frame
/// order, plus the entries whose frame token could not be parsed.
#[derive(Debug)]
pub struct FolderListing {
    pub path: PathBuf,
    pub files: Vec<LabelFile>,
    pub rejected: Vec<ConvertError>,
}

/// Matching rule between a label folder and a video: the folder's base name
/// must be the video stem itself or start with `stem + "_"`. A plain
/// substring test would let stem `cat` claim a folder named `category_0`.
pub fn folder_matches_stem(folder_name: &str, stem: &str) -> bool {
    folder_name == stem
        || folder_name
            .strip_prefix(stem)
            .is_some_and(|rest| rest.starts_with('_'))
}

/// Select the label folders belonging to one video stem, in input order.
pub fn matching_folders<'a>(folders: &'a [PathBuf], stem: &str) -> Vec<&'a PathBuf> {
    folders
        .iter()
        .filter(|folder| {
            folder
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| folder_matches_stem(name, stem))
        })
        .collect()
}

/// List the subdirectories of `root` that match any of the given video
/// stems, sorted for deterministic batch order.
pub fn discover_label_folders(root: &Path, stems: &[String]) -> Result<Vec<PathBuf>> {
    let enumeration_err = |source| ConvertError::FolderEnumeration {
        path: root.to_path_buf(),
        source,
    };

    let mut folders = Vec::new();
    for entry in fs::read_dir(root).map_err(enumeration_err)? {
        let entry = entry.map_err(enumeration_err)?;
        if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name();
        if let Some(name) = name.to_str() {
            if stems.iter().any(|stem| folder_matches_stem(name, stem)) {
                folders.push(entry.path());
            }
        }
    }
    folders.sort();
    Ok(folders)
}

/// Parse the filename-encoded frame index of a label file.
pub fn frame_token(path: &Path) -> Result<LabelFile> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let token = stem.rsplit('_').next().unwrap_or(stem);
    let frame_idx = token.parse::<i64>().map_err(|_| ConvertError::FrameIndex {
        path: path.to_path_buf(),
        token: token.to_string(),
    })?;
    Ok(LabelFile {
        path: path.to_path_buf(),
        frame_token: token.to_string(),
        frame_idx,
    })
}

/// Enumerate the label files of one folder and sort them by the integer
/// value of their frame token. Frame indices are not zero-padded
/// consistently, so `_9` must come before `_10` despite the string order.
/// Files with a non-numeric token end up in `rejected`; they still count
/// toward progress when the folder is processed.
pub fn list_label_files(folder: &Path) -> Result<FolderListing> {
    let enumeration_err = |source| ConvertError::FolderEnumeration {
        path: folder.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    let mut rejected = Vec::new();
    for entry in fs::read_dir(folder).map_err(enumeration_err)? {
        let entry = entry.map_err(enumeration_err)?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        match frame_token(&entry.path()) {
            Ok(file) => files.push(file),
            Err(e) => rejected.push(e),
        }
    }
    files.sort_by_key(|f| f.frame_idx);

    Ok(FolderListing {
        path: folder.to_path_buf(),
        files,
        rejected,
    })
}

/// Derive the output table path for a label folder: the folder's base name
/// with its trailing track/segment token dropped, plus `.csv`. A folder
/// named `mouse1_cam_0` yields `mouse1_cam.csv`; a name without an
/// underscore is kept whole.
pub fn output_table_path(output_dir: &Path, folder: &Path) -> PathBuf {
    let name = folder
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let parts: Vec<&str> = name.split('_').collect();
    let table_stem = if parts.len() > 1 {
        parts[..parts.len() - 1].join("_")
    } else {
        name.to_string()
    };
    output_dir.join(format!("{}.csv", sanitize_filename::sanitize(table_stem)))
}
