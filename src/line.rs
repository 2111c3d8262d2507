/// Character that opens a segment header line.
pub const HEADER_MARKER: char = '>';

/// Kind of a single line in a lonlat file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Starts with [`HEADER_MARKER`], ignoring surrounding whitespace.
    Header,
    /// Empty or whitespace only.
    Blank,
    /// Anything else, expected to hold one point.
    Data,
}

impl LineKind {
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.starts_with(HEADER_MARKER) {
            Self::Header
        } else if trimmed.is_empty() {
            Self::Blank
        } else {
            Self::Data
        }
    }

    /// Header and blank lines both close the segment in progress.
    pub fn is_boundary(self) -> bool {
        matches!(self, Self::Header | Self::Blank)
    }
}
