use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::segment::{segment_text, Segment};

pub const DEFAULT_MIN_POINTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
    /// Segments with fewer points than this are not written.
    pub min_points: usize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            min_points: DEFAULT_MIN_POINTS,
        }
    }
}

/// What happens to a segment once the file is split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Disposition {
    Write { output: PathBuf },
    TooFewPoints { min_points: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentOutcome {
    /// 1-based position among all segments of the file, skipped ones included.
    pub index: usize,
    pub points: usize,
    pub disposition: Disposition,
}

impl SegmentOutcome {
    pub fn output(&self) -> Option<&Path> {
        match &self.disposition {
            Disposition::Write { output } => Some(output),
            Disposition::TooFewPoints { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SegmentPlan {
    pub outcome: SegmentOutcome,
    pub segment: Segment,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub input: PathBuf,
    pub min_points: usize,
    pub outcomes: Vec<SegmentOutcome>,
}

impl SplitReport {
    pub fn written(&self) -> impl Iterator<Item = (&SegmentOutcome, &Path)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.output().map(|out| (outcome, out)))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SegmentOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.output().is_none())
    }

    pub fn written_count(&self) -> usize {
        self.written().count()
    }
}

/// Path of the file holding segment `index` of `input`: `<stem>_<index>`
/// plus the input's extension, in the same directory.
pub fn output_path(input: &Path, index: usize) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| anyhow!("{} has no file name", input.display()))?;
    let mut name = OsString::from(stem);
    name.push(format!("_{index}"));
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(input.with_file_name(name))
}

/// Decide the fate of every segment in `text` without touching the disk.
pub fn plan_split(
    input: &Path,
    text: &str,
    options: &SplitOptions,
) -> Result<Vec<SegmentPlan>> {
    segment_text(text)
        .into_iter()
        .zip(1..)
        .map(|(segment, index)| -> Result<SegmentPlan> {
            let points = segment.point_count();
            let disposition = if points < options.min_points {
                Disposition::TooFewPoints {
                    min_points: options.min_points,
                }
            } else {
                Disposition::Write {
                    output: output_path(input, index)?,
                }
            };
            Ok(SegmentPlan {
                outcome: SegmentOutcome {
                    index,
                    points,
                    disposition,
                },
                segment,
            })
        })
        .collect()
}

/// Split `input` into one sibling file per segment with enough points.
///
/// Existing files at the output paths are overwritten. The input file is
/// only read.
pub fn split_file(input: &Path, options: &SplitOptions) -> Result<SplitReport> {
    split_file_with(input, options, |_| {})
}

/// Like [`split_file`], calling `on_outcome` for every segment as soon as it
/// is written or skipped, so earlier outputs are known even if a later write
/// fails.
pub fn split_file_with(
    input: &Path,
    options: &SplitOptions,
    mut on_outcome: impl FnMut(&SegmentOutcome),
) -> Result<SplitReport> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let plans = plan_split(input, &text, options)?;

    let mut outcomes = Vec::with_capacity(plans.len());
    for SegmentPlan { outcome, segment } in plans {
        if let Some(output) = outcome.output() {
            if segment.has_default_header() {
                log::debug!(
                    "{}: segment {} has no header, using {:?}",
                    input.display(),
                    outcome.index,
                    segment.header,
                );
            }
            fs::write(output, segment.to_string())
                .with_context(|| format!("writing {}", output.display()))?;
        }
        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    Ok(SplitReport {
        input: input.to_path_buf(),
        min_points: options.min_points,
        outcomes,
    })
}
