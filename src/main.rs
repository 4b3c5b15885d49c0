use clap::Parser;
use indicatif::ProgressBar;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use pose2csv::utils::{create_progress_bar, video_stem};
use pose2csv::{
    convert_batch, discover_label_folders, Args, FfprobeReader, ProgressSink, VIDEO_FORMATS,
};

/// Renders the aggregator's progress events as one bar per video.
#[derive(Default)]
struct CliProgress {
    video: String,
    bar: Option<ProgressBar>,
}

impl CliProgress {
    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}

impl ProgressSink for CliProgress {
    fn advance(&mut self, video: &str, completed: u64, total: u64) {
        if self.bar.is_none() || self.video != video {
            self.finish();
            self.video = video.to_string();
            self.bar = Some(create_progress_bar(total, video));
        }
        if let Some(bar) = &self.bar {
            bar.set_position(completed);
        }
    }
}

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let videos: Vec<PathBuf> = args.videos.iter().map(PathBuf::from).collect();
    for video in &videos {
        if !video.is_file() {
            error!("video file does not exist: {}", video.display());
            std::process::exit(1);
        }
        let known_format = video
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| VIDEO_FORMATS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false);
        if !known_format {
            warn!("unrecognized video extension: {}", video.display());
        }
    }

    let stems: Vec<String> = videos.iter().filter_map(|v| video_stem(v)).collect();
    let label_root = PathBuf::from(&args.label_root);
    let label_folders = match discover_label_folders(&label_root, &stems) {
        Ok(folders) if !folders.is_empty() => folders,
        Ok(_) => {
            error!(
                "no label folders in {} match the selected videos",
                label_root.display()
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    info!("Found {} matching label folders.", label_folders.len());

    info!("Starting the conversion process...");
    let mut progress = CliProgress::default();
    match convert_batch(
        &videos,
        &label_folders,
        Path::new(&args.output_dir),
        &FfprobeReader,
        &mut progress,
    ) {
        Ok(report) => {
            progress.finish();
            report.stats.print_summary();
            if report.is_clean() {
                info!("All label folders converted successfully.");
            } else {
                error!("Conversion finished with failed videos.");
                std::process::exit(1);
            }
        }
        Err(e) => {
            progress.finish();
            error!("Conversion failed: {e}");
            std::process::exit(1);
        }
    }
}
