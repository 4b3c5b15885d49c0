use clap::Parser;

/// Command-line arguments for merging per-frame pose label files into
/// per-video CSV tables.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Video files whose label folders should be converted
    #[arg(short = 'i', long = "video", required = true, num_args = 1..)]
    pub videos: Vec<String>,

    /// Directory containing the per-video label folders
    #[arg(short = 'l', long = "label_root")]
    pub label_root: String,

    /// Directory where the aggregated CSV tables are written
    #[arg(short = 'o', long = "output_dir")]
    pub output_dir: String,
}
