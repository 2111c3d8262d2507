use std::borrow::Cow;
use std::path::Path;

use anyhow::Result;
use lonlat_split::{select_inputs, split_file_with, SplitReport};

use crate::Args;

pub fn split_files(args: &Args) -> Result<()> {
    // resolve everything before touching any file
    let inputs = select_inputs(&args.target, &args.select_options())?;
    let options = args.split_options();

    let mut total = 0;
    for input in &inputs {
        let name = file_name(input);
        let report = split_file_with(input, &options, |outcome| {
            if let Some(output) = outcome.output() {
                println!(
                    "{name} -> {}  ({} points)",
                    file_name(output),
                    outcome.points
                );
            }
        })?;
        report_skipped(&report);
        total += report.written_count();
    }

    println!();
    println!("done: wrote {total} segment file(s)");
    Ok(())
}

fn report_skipped(report: &SplitReport) {
    let input = file_name(&report.input);
    for outcome in report.skipped() {
        log::debug!(
            "{input}: segment {} has {} point(s), skipped",
            outcome.index,
            outcome.points
        );
    }
    if report.written_count() == 0 {
        log::warn!(
            "{input}: no segment has at least {} points",
            report.min_points
        );
    }
}

fn file_name(path: &Path) -> Cow<'_, str> {
    match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    }
}
