//! Conversion between the edit form of a text (real line breaks) and its
//! storage form (line breaks encoded as `|` markers).

use std::sync::LazyLock;

use regex::Regex;

/// Marker that stands for a line break in storage form
pub const MARKER: char = '|';

static MARKER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|+").expect("valid marker regex"));

/// One renderable piece of a formatted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Trimmed, non-blank text
    Text(String),
    LineBreak,
}

/// Replace every newline with the marker. Nothing else changes, so markers
/// already present in `input` become indistinguishable from encoded newlines.
pub fn encode(input: &str) -> String {
    input.replace('\n', "|")
}

/// Split a stored body into text and line-break segments, left to right.
///
/// A run of `k` markers yields `k` line breaks. Text between runs is trimmed
/// and dropped when blank.
pub fn format_for_display(stored: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0;
    for run in MARKER_RUN.find_iter(stored) {
        push_text(&mut segments, &stored[last_end..run.start()]);
        segments.extend(std::iter::repeat_n(Segment::LineBreak, run.len()));
        last_end = run.end();
    }
    push_text(&mut segments, &stored[last_end..]);
    segments
}

fn push_text(segments: &mut Vec<Segment>, token: &str) {
    let trimmed = token.trim();
    if !trimmed.is_empty() {
        segments.push(Segment::Text(trimmed.to_string()));
    }
}

/// The stored body, untouched. Used by the "view original" mode.
pub fn raw_display(stored: &str) -> &str {
    stored
}

/// Lay segments out as terminal lines: each text segment is a line and each
/// line break is an empty line.
pub fn display_lines(segments: &[Segment]) -> Vec<String> {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => text.clone(),
            Segment::LineBreak => String::new(),
        })
        .collect()
}
