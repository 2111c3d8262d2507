mod split_files;
use split_files::split_files;

use anyhow::Result;
use clap::Parser;
use lonlat_split::{
    SelectOptions, SplitOptions, DEFAULT_DIR_PATTERN, DEFAULT_MIN_POINTS,
};

/// Split lonlat track files into one file per segment
#[derive(Clone, Debug, Parser)]
#[command(version)]
struct Args {
    /// a single file, a directory or a path with wildcards (`*?[]`)
    target: String,
    /// pattern matched inside the target when it is a directory
    #[arg(long, default_value = DEFAULT_DIR_PATTERN)]
    glob: String,
    /// segments with fewer points are not written
    #[arg(long, default_value_t = DEFAULT_MIN_POINTS)]
    min_points: usize,
    /// ignore inputs named like a previous split output (`<stem>_<n>.lonlat`)
    #[arg(long)]
    skip_split_outputs: bool,
}

impl Args {
    fn select_options(&self) -> SelectOptions {
        SelectOptions {
            dir_pattern: self.glob.clone(),
            skip_split_outputs: self.skip_split_outputs,
        }
    }

    fn split_options(&self) -> SplitOptions {
        SplitOptions {
            min_points: self.min_points,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();
    let args = Args::parse();
    split_files(&args)
}
