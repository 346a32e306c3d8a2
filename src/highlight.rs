//! Inline match highlighting
//!
//! Splits text around case-insensitive occurrences of the query, keeping the
//! matches as their own segments. The query is treated as a literal: it is
//! escaped before compiling, so `(`, `*` or `.` never fail or over-match.

use regex::{Regex, RegexBuilder};

/// One piece of highlighted text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Position within the split; stable for one render pass
    pub index: usize,
    /// Slice of the original text, case preserved
    pub text: &'a str,
    /// Whether this slice matched the query
    pub emphasized: bool,
}

/// Compiled highlighter for one query, reusable across many texts
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
    folded: String,
}

impl Highlighter {
    pub fn new(query: &str) -> Self {
        let folded = query.to_lowercase();
        if query.is_empty() {
            return Self {
                pattern: None,
                folded,
            };
        }

        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build();

        match pattern {
            Ok(re) => Self {
                pattern: Some(re),
                folded,
            },
            Err(e) => {
                // Only reachable for queries past the compiled size limit
                tracing::debug!(target: "highlight", error = %e, "query not highlightable");
                Self {
                    pattern: None,
                    folded,
                }
            }
        }
    }

    /// Split `text` into plain and emphasized segments, in original order.
    ///
    /// A match is emphasized only when it lowercases to the lowercased query.
    /// Case-folding matches that fail that check (`ſ` for `s`) stay plain and
    /// merge with their neighbours.
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let Some(re) = &self.pattern else {
            return plain(text);
        };

        let mut ranges: Vec<(usize, usize, bool)> = Vec::new();
        let mut last = 0;
        for m in re.find_iter(text) {
            if m.start() > last {
                push_range(&mut ranges, last, m.start(), false);
            }
            let emphasized = m.as_str().to_lowercase() == self.folded;
            push_range(&mut ranges, m.start(), m.end(), emphasized);
            last = m.end();
        }
        if last < text.len() || ranges.is_empty() {
            push_range(&mut ranges, last, text.len(), false);
        }

        ranges
            .into_iter()
            .enumerate()
            .map(|(index, (start, end, emphasized))| Segment {
                index,
                text: &text[start..end],
                emphasized,
            })
            .collect()
    }
}

/// Append a byte range, extending the previous one when both are plain
fn push_range(ranges: &mut Vec<(usize, usize, bool)>, start: usize, end: usize, emphasized: bool) {
    match ranges.last_mut() {
        Some(prev) if !emphasized && !prev.2 => prev.1 = end,
        _ => ranges.push((start, end, emphasized)),
    }
}

fn plain(text: &str) -> Vec<Segment<'_>> {
    vec![Segment {
        index: 0,
        text,
        emphasized: false,
    }]
}

/// Highlight a single text. Prefer [`Highlighter`] when rendering a list.
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    Highlighter::new(query).segments(text)
}

/// Concatenate segment texts, dropping emphasis
pub fn strip(segments: &[Segment<'_>]) -> String {
    segments.iter().map(|s| s.text).collect()
}
