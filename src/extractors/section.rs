// src/extractors/section.rs

// --- Imports ---
use crate::extractors::date::{self, DateRange, NormalizedDate};

// --- Constants ---
/// A top-level header is the marker followed by a space.
const TOP_LEVEL_PREFIX: &str = "# ";

// --- Data Structures ---
/// A line opening a top-level section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    raw: &'a str,
}

impl<'a> HeaderLine<'a> {
    /// Returns `Some` only for top-level headers; deeper levels are ordinary lines.
    pub fn parse(line: &'a str) -> Option<Self> {
        line.starts_with(TOP_LEVEL_PREFIX).then_some(Self { raw: line })
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn title(&self) -> &'a str {
        date::header_title(self.raw)
    }

    pub fn date(&self) -> Option<NormalizedDate> {
        date::extract_date(self.raw)
    }
}

/// Lines captured under one date-matched header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedSection {
    pub document_id: String, // Source path without its extension
    pub header: String,      // The matching header, kept for progress logs only
    pub date: NormalizedDate,
    pub lines: Vec<String>,
}

impl CapturedSection {
    fn open(document_id: &str, header: HeaderLine<'_>, date: NormalizedDate) -> Self {
        Self {
            document_id: document_id.to_string(),
            header: header.raw().to_string(),
            date,
            lines: Vec::new(),
        }
    }

    /// Appends this section as an output block: a synthetic header naming the
    /// document, the captured lines verbatim, then one blank separator line.
    pub fn render_into(&self, out: &mut String) {
        out.push_str(TOP_LEVEL_PREFIX);
        out.push_str(&self.document_id);
        out.push('\n');
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

// --- Main Extractor Structure ---
/// Collects the sections of a document whose top-level header is dated
/// inside a fixed range.
#[derive(Debug, Clone, Copy)]
pub struct SectionExtractor {
    range: DateRange,
}

impl SectionExtractor {
    pub fn new(range: DateRange) -> Self {
        Self { range }
    }

    /// Single forward pass over `lines`.
    ///
    /// Only top-level headers move the state machine: a header whose date lies
    /// in range opens a new section, any other header closes the current one.
    /// Non-header lines are kept verbatim while a section is open. The header
    /// line itself is never part of the captured content.
    pub fn capture_sections<'a, I>(&self, document_id: &str, lines: I) -> Vec<CapturedSection>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = CaptureState::default();
        let mut sections: Vec<CapturedSection> = Vec::new();

        for line in lines {
            if let Some(header) = HeaderLine::parse(line) {
                state = match header.date().filter(|date| self.range.contains(*date)) {
                    Some(date) => {
                        tracing::debug!(
                            "Opening section in {} at header '{}' ({})",
                            document_id,
                            header.title(),
                            date
                        );
                        sections.push(CapturedSection::open(document_id, header, date));
                        CaptureState::Capturing
                    }
                    None => {
                        tracing::trace!(
                            "Header '{}' in {} does not match {}",
                            header.title(),
                            document_id,
                            self.range
                        );
                        CaptureState::Idle
                    }
                };
                continue;
            }

            if state == CaptureState::Capturing {
                // Capturing always follows a push, so the open section is the last one
                if let Some(section) = sections.last_mut() {
                    section.lines.push(line.to_string());
                }
            }
        }

        sections
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn day(text: &str) -> NormalizedDate {
        NormalizedDate::parse_canonical(text).unwrap()
    }

    fn extractor(start: &str, end: &str) -> SectionExtractor {
        SectionExtractor::new(DateRange::new(day(start), day(end)))
    }

    fn captured_lines(sections: &[CapturedSection]) -> Vec<Vec<&str>> {
        sections
            .iter()
            .map(|s| s.lines.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_header_line_detection() {
        assert!(HeaderLine::parse("# 2024-01-01").is_some());
        assert!(HeaderLine::parse("## 2024-01-01").is_none());
        assert!(HeaderLine::parse("#2024-01-01").is_none());
        assert!(HeaderLine::parse(" # 2024-01-01").is_none());

        let header = HeaderLine::parse("#  Jan 2, 2024 ").unwrap();
        assert_eq!(header.raw(), "#  Jan 2, 2024 ");
        assert_eq!(header.title(), "Jan 2, 2024");
        assert_eq!(header.date(), Some(day("2024-01-02")));
    }

    #[test]
    fn test_capture_stops_at_next_header() {
        let lines = ["# 2024-01-01", "body A", "# Other", "body B", "# 2024-01-01", "body C"];
        let sections = extractor("2024-01-01", "2024-01-01").capture_sections("notes/daily", lines);

        assert_eq!(sections.len(), 2);
        assert_eq!(captured_lines(&sections), vec![vec!["body A"], vec!["body C"]]);
        assert!(sections.iter().all(|s| s.document_id == "notes/daily"));
        assert!(sections.iter().all(|s| s.header == "# 2024-01-01"));
    }

    #[test]
    fn test_lines_before_first_header_are_ignored() {
        let lines = ["preamble", "", "# 2024-01-02", "kept"];
        let sections = extractor("2024-01-01", "2024-01-31").capture_sections("doc", lines);
        assert_eq!(captured_lines(&sections), vec![vec!["kept"]]);
    }

    #[test]
    fn test_sub_headers_and_blank_lines_are_content() {
        let lines = ["# Jan 5, 2024", "", "## Tasks", "- [ ] write", "", "# Someday"];
        let sections = extractor("2024-01-01", "2024-01-31").capture_sections("doc", lines);
        assert_eq!(captured_lines(&sections), vec![vec!["", "## Tasks", "- [ ] write", ""]]);
        assert_eq!(sections[0].date, day("2024-01-05"));
    }

    #[test]
    fn test_adjacent_matching_headers_open_separate_sections() {
        let lines = ["# 2024-01-01", "# 2024-01-02", "second"];
        let sections = extractor("2024-01-01", "2024-01-02").capture_sections("doc", lines);
        assert_eq!(sections.len(), 2);
        assert!(sections[0].lines.is_empty());
        assert_eq!(sections[1].lines, vec!["second".to_string()]);
    }

    #[test]
    fn test_out_of_range_header_closes_section() {
        let lines = ["# 2024-01-02", "in", "# 2024-02-01", "out"];
        let sections = extractor("2024-01-01", "2024-01-31").capture_sections("doc", lines);
        assert_eq!(captured_lines(&sections), vec![vec!["in"]]);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let lines = [
            "# 2023-12-31", "a", "# 2024-01-01", "b", "# 2024-01-03", "c", "# 2024-01-04", "d",
        ];
        let sections = extractor("2024-01-01", "2024-01-03").capture_sections("doc", lines);
        assert_eq!(captured_lines(&sections), vec![vec!["b"], vec!["c"]]);
    }

    #[test]
    fn test_inverted_range_captures_nothing() {
        let lines = ["# 2024-01-01", "a", "# 2024-01-02", "b"];
        let sections = extractor("2024-01-02", "2024-01-01").capture_sections("doc", lines);
        assert!(sections.is_empty());
    }

    #[test]
    fn test_trailing_newline_yields_empty_last_line() {
        let content = "# 2024-01-01\nbody\n";
        let sections = extractor("2024-01-01", "2024-01-01").capture_sections("doc", content.split('\n'));
        assert_eq!(captured_lines(&sections), vec![vec!["body", ""]]);
    }

    #[test]
    fn test_render_block() {
        let lines = ["# 2024-01-01", "body A", "", "# 2024-01-01"];
        let sections = extractor("2024-01-01", "2024-01-01").capture_sections("vault/log", lines);

        let mut out = String::new();
        for section in &sections {
            section.render_into(&mut out);
        }
        assert_eq!(out, "# vault/log\nbody A\n\n\n# vault/log\n\n");
    }
}
