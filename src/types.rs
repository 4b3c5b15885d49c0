// Video container formats accepted by the converter
pub const VIDEO_FORMATS: &[&str] = &["mp4", "avi", "mov"];

// Fixed header of every aggregated table: track identity, frame index,
// instance score, then five keypoints with (x, y, score) each.
pub const CSV_COLUMNS: &[&str] = &[
    "track",
    "frame_idx",
    "instance_score",
    "Nose.x",
    "Nose.y",
    "Nose.score",
    "Body_C.x",
    "Body_C.y",
    "Body_C.score",
    "Tail.x",
    "Tail.y",
    "Tail.score",
    "Ear_L.x",
    "Ear_L.y",
    "Ear_L.score",
    "Ear_R.x",
    "Ear_R.y",
    "Ear_R.score",
];

/// A video reduced to what the pipeline needs: its stem (the matching key
/// against label folder names) and its pixel dimensions.
#[derive(Debug, Clone)]
pub struct VideoDescriptor {
    pub stem: String,
    pub width: u32,
    pub height: u32,
}

/// Receiver for per-file progress events emitted by the aggregator.
///
/// One event is fired per label file (converted or skipped) with the video
/// stem, the number of files handled so far for that video, and the total
/// across its matched folders. Any `FnMut(&str, u64, u64)` closure
/// qualifies.
pub trait ProgressSink {
    fn advance(&mut self, video: &str, completed: u64, total: u64);
}

impl<F: FnMut(&str, u64, u64)> ProgressSink for F {
    fn advance(&mut self, video: &str, completed: u64, total: u64) {
        self(video, completed, total)
    }
}

// Counters accumulated over one batch
#[derive(Debug, Default, Clone)]
pub struct ConversionStats {
    pub videos_processed: usize,
    pub videos_failed: usize,
    pub folders_skipped: usize,
    pub tables_written: usize,
    pub files_converted: usize,
    pub files_skipped: usize,
}

impl ConversionStats {
    pub fn print_summary(&self) {
        log::info!("=== Conversion Summary ===");
        log::info!("Videos processed: {}", self.videos_processed);
        log::info!("Label tables written: {}", self.tables_written);
        log::info!("Label files converted: {}", self.files_converted);
        if self.files_skipped > 0 {
            log::warn!("Label files skipped: {}", self.files_skipped);
        }
        if self.folders_skipped > 0 {
            log::warn!("Label folders skipped: {}", self.folders_skipped);
        }
        if self.videos_failed > 0 {
            log::warn!("Videos failed: {}", self.videos_failed);
        }
    }
}

/// Terminal result of a batch: counters plus every recoverable error that
/// was skipped over, already rendered with its file/folder context.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub stats: ConversionStats,
    pub warnings: Vec<String>,
}

impl ConversionReport {
    /// Log a recoverable error and keep it for the caller.
    pub fn record_warning(&mut self, err: crate::error::ConvertError) {
        log::warn!("{err}");
        self.warnings.push(err.to_string());
    }

    /// Whether every video made it through without a per-video failure.
    pub fn is_clean(&self) -> bool {
        self.stats.videos_failed == 0
    }
}
