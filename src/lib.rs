#![forbid(unsafe_code)]
pub mod line;
pub mod segment;
pub mod split;
pub mod target;


pub use line::{LineKind, HEADER_MARKER};
pub use segment::{
    segment_text, text_lines, Segment, Segmenter, DEFAULT_HEADER,
};
pub use split::{
    output_path, plan_split, split_file, split_file_with, Disposition,
    SegmentOutcome, SegmentPlan, SplitOptions, SplitReport,
    DEFAULT_MIN_POINTS,
};
pub use target::{
    select_inputs, SelectOptions, Target, TargetError, DEFAULT_DIR_PATTERN,
    LONLAT_EXTENSION,
};
