use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::conversion::aggregate_label_file;
use crate::error::{ConvertError, Result};
use crate::io::{list_label_files, matching_folders, output_table_path, FolderListing};
use crate::types::{ConversionReport, ProgressSink, VideoDescriptor, CSV_COLUMNS};
use crate::utils::video_stem;
use crate::video::VideoMetadataReader;

/// Convert a batch of videos: for each video, aggregate the label folders
/// matching its stem into one CSV table per folder under `output_dir`.
///
/// Failures below batch level never abort the run. A video whose
/// dimensions cannot be probed is skipped and recorded, an unlistable
/// folder or unreadable file is warned and skipped, and a table that
/// cannot be written aborts only that folder. The returned report carries
/// the counters and every warning; `Err` means the output directory itself
/// could not be set up.
pub fn convert_batch(
    videos: &[PathBuf],
    label_folders: &[PathBuf],
    output_dir: &Path,
    reader: &dyn VideoMetadataReader,
    progress: &mut dyn ProgressSink,
) -> Result<ConversionReport> {
    fs::create_dir_all(output_dir)?;

    let mut report = ConversionReport::default();
    for video_path in videos {
        let stem = match video_stem(video_path) {
            Some(stem) => stem,
            None => {
                report.record_warning(ConvertError::MediaRead {
                    path: video_path.clone(),
                    message: "video path has no file stem".to_string(),
                });
                report.stats.videos_failed += 1;
                continue;
            }
        };

        let folders = matching_folders(label_folders, &stem);
        if folders.is_empty() {
            info!("no label folders match video {stem}");
            report.stats.videos_processed += 1;
            continue;
        }

        // Enumerate every folder up front so the progress total is known
        // before the first file is converted.
        let mut listings: Vec<FolderListing> = Vec::with_capacity(folders.len());
        for folder in folders {
            match list_label_files(folder) {
                Ok(listing) => listings.push(listing),
                Err(e) => {
                    report.record_warning(e);
                    report.stats.folders_skipped += 1;
                }
            }
        }
        let total: u64 = listings
            .iter()
            .map(|l| (l.files.len() + l.rejected.len()) as u64)
            .sum();

        let (width, height) = match reader.read_dimensions(video_path) {
            Ok(dims) => dims,
            Err(e) => {
                report.record_warning(e);
                report.stats.videos_failed += 1;
                continue;
            }
        };
        let video = VideoDescriptor {
            stem,
            width,
            height,
        };

        let mut completed: u64 = 0;
        for listing in listings {
            match write_folder_table(
                listing,
                &video,
                output_dir,
                &mut report,
                &mut completed,
                total,
                progress,
            ) {
                Ok(()) => report.stats.tables_written += 1,
                Err(e) => report.record_warning(e),
            }
        }

        report.stats.videos_processed += 1;
        info!(
            "finished {}: {completed}/{total} label files",
            video.stem
        );
    }

    Ok(report)
}

/// Write one aggregated table for one label folder. Per-file failures are
/// warned and skipped while progress still advances; a write failure on
/// the table itself propagates and abandons the folder's remaining files.
fn write_folder_table(
    listing: FolderListing,
    video: &VideoDescriptor,
    output_dir: &Path,
    report: &mut ConversionReport,
    completed: &mut u64,
    total: u64,
    progress: &mut dyn ProgressSink,
) -> Result<()> {
    let table_path = output_table_path(output_dir, &listing.path);
    let write_err = |source| ConvertError::OutputWrite {
        path: table_path.clone(),
        source,
    };

    let mut writer = BufWriter::new(File::create(&table_path).map_err(write_err)?);
    writeln!(writer, "{}", CSV_COLUMNS.join(",")).map_err(write_err)?;

    // Files rejected during enumeration (non-numeric frame token) still
    // count toward progress.
    for err in listing.rejected {
        report.record_warning(err);
        report.stats.files_skipped += 1;
        *completed += 1;
        progress.advance(&video.stem, *completed, total);
    }

    for file in &listing.files {
        match aggregate_label_file(&file.path, &file.frame_token, video.width, video.height) {
            Ok(rows) => {
                writer.write_all(rows.as_bytes()).map_err(write_err)?;
                report.stats.files_converted += 1;
            }
            Err(e) => {
                report.record_warning(e);
                report.stats.files_skipped += 1;
            }
        }
        *completed += 1;
        progress.advance(&video.stem, *completed, total);
    }

    writer.flush().map_err(write_err)?;
    Ok(())
}
