use std::fmt;

use serde::Serialize;

use crate::line::LineKind;

/// Header given to a run of points that has none in the source.
pub const DEFAULT_HEADER: &str = "> segment";

/// One track of a lonlat file: a header line followed by its point lines.
///
/// Lines are kept as they appear in the source, minus trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub header: String,
    pub points: Vec<String>,
}

impl Segment {
    fn with_header(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            points: vec![],
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// True if the header was synthesized rather than read from the source.
    pub fn has_default_header(&self) -> bool {
        self.header == DEFAULT_HEADER
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.header.as_str())
            .chain(self.points.iter().map(String::as_str))
    }
}

/// Every line is followed by a `\n`, the header included.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Splits a stream of lines into [`Segment`]s.
///
/// A header or blank line closes the segment in progress; a header line
/// also opens the next one. Points found while no segment is open start a
/// new segment under [`DEFAULT_HEADER`].
#[derive(Debug, Default)]
pub struct Segmenter {
    current: Option<Segment>,
    segments: Vec<Segment>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        match LineKind::classify(line) {
            LineKind::Header => {
                self.close_current();
                self.current = Some(Segment::with_header(line.trim_end()));
            }
            LineKind::Blank => self.close_current(),
            LineKind::Data => self
                .current
                .get_or_insert_with(|| Segment::with_header(DEFAULT_HEADER))
                .points
                .push(line.trim_end().to_owned()),
        }
    }

    pub fn finish(mut self) -> Vec<Segment> {
        self.close_current();
        self.segments
    }

    fn close_current(&mut self) {
        if let Some(segment) = self.current.take() {
            self.segments.push(segment);
        }
    }
}

/// Lines of `text`, ended by `\n`, `\r\n` or a lone `\r`.
///
/// A terminator at the very end does not start an extra empty line.
pub fn text_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..end];
        let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + skip..];
        Some(line)
    })
}

/// Segments of a whole lonlat document, in source order.
pub fn segment_text(text: &str) -> Vec<Segment> {
    let mut segmenter = Segmenter::new();
    for line in text_lines(text) {
        segmenter.push_line(line);
    }
    segmenter.finish()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn header_then_headerless_run() {
        let segments = segment_text(">seg1\n1 2\n3 4\n\n5 6\n7 8\n9 10\n");
        assert_eq!(
            segments,
            [
                Segment {
                    header: ">seg1".into(),
                    points: vec!["1 2".into(), "3 4".into()],
                },
                Segment {
                    header: DEFAULT_HEADER.into(),
                    points: vec!["5 6".into(), "7 8".into(), "9 10".into()],
                },
            ]
        );
        assert!(!segments[0].has_default_header());
        assert!(segments[1].has_default_header());
    }

    #[test]
    fn consecutive_headers() {
        let segments = segment_text(">a\n>b\n1 1\n2 2\n>c\n");
        let headers: Vec<_> =
            segments.iter().map(|s| s.header.as_str()).collect();
        let counts: Vec<_> =
            segments.iter().map(Segment::point_count).collect();
        assert_eq!(headers, [">a", ">b", ">c"]);
        assert_eq!(counts, [0, 2, 0]);
    }

    #[test]
    fn blank_lines_never_make_empty_segments() {
        let segments = segment_text("\n\n  \n1 1\n\n\n\t\n2 2\n\n");
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(Segment::has_default_header));
        assert!(segments.iter().all(|s| s.point_count() == 1));
    }

    #[test]
    fn empty_input() {
        assert!(segment_text("").is_empty());
        assert!(segment_text("\n \n").is_empty());
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        let segments = segment_text("> track 7  \r\n  1.5 2.5 \t\r\n3 4\r\n");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].header, "> track 7");
        assert_eq!(segments[0].points, ["  1.5 2.5", "3 4"]);
    }

    #[test]
    fn carriage_return_only_line_endings() {
        let segments = segment_text(">a\r1 1\r2 2\r>b\r3 3\r4 4\r");
        assert_eq!(
            segments,
            [
                Segment {
                    header: ">a".into(),
                    points: vec!["1 1".into(), "2 2".into()],
                },
                Segment {
                    header: ">b".into(),
                    points: vec!["3 3".into(), "4 4".into()],
                },
            ]
        );
    }

    #[test]
    fn mixed_line_endings() {
        let lines: Vec<_> = text_lines("a\r\nb\rc\n\r\nd").collect();
        assert_eq!(lines, ["a", "b", "c", "", "d"]);
        assert_eq!(text_lines("a\n").collect::<Vec<_>>(), ["a"]);
        assert_eq!(text_lines("\n").collect::<Vec<_>>(), [""]);
        assert_eq!(text_lines("").count(), 0);
        // a blank CR line still separates segments
        assert_eq!(segment_text("1 1\r\r2 2\r").len(), 2);
    }

    #[test]
    fn indented_header_is_kept_verbatim() {
        let segments = segment_text("  >west\n1 1\n");
        assert_eq!(segments[0].header, "  >west");
    }

    #[test]
    fn last_segment_without_trailing_newline() {
        let segments = segment_text(">a\n1 1\n2 2");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].point_count(), 2);
    }

    #[test]
    fn segmenter_closes_on_boundaries() {
        let mut segmenter = Segmenter::new();
        for line in ["1 1", "", "", ">next", ">after"] {
            segmenter.push_line(line);
        }
        let headers: Vec<_> = segmenter
            .finish()
            .into_iter()
            .map(|s| (s.header, s.points.len()))
            .collect();
        // the second blank line has nothing open to close
        assert_eq!(
            headers,
            [
                (DEFAULT_HEADER.to_owned(), 1),
                (">next".to_owned(), 0),
                (">after".to_owned(), 0),
            ]
        );
    }

    #[test]
    fn points_survive_in_order() {
        let input = "1 1\n>a\n2 2\n3 3\n\n4 4\n>b\n>c\n5 5\n";
        let data: Vec<_> = input
            .lines()
            .filter(|l| LineKind::classify(l) == LineKind::Data)
            .collect();
        let joined: Vec<_> = segment_text(input)
            .into_iter()
            .flat_map(|s| s.points)
            .collect();
        assert_eq!(joined, data);
    }

    #[test]
    fn display_ends_every_line() {
        let segments = segment_text("1 2\n3 4\n");
        assert_eq!(segments[0].to_string(), "> segment\n1 2\n3 4\n");

        let header_only = segment_text(">lonely\n");
        assert_eq!(header_only[0].to_string(), ">lonely\n");
    }

    #[test]
    fn mixed_track_file() {
        let input = "\
>Shanghai ring
121.47 31.23
121.48 31.24

121.50 31.25
>single
121.51 31.26
>empty

121.52 31.27
121.53 31.28
";
        insta::assert_yaml_snapshot!("mixed_track_file", segment_text(input));
    }
}
