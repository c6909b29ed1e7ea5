//! Generic substring highlighting with overlap resolution.
//!
//! Unlike the help-screen passes in [`engine`](super::engine), this works on
//! any string: every occurrence of every substring is flagged, including
//! occurrences that overlap each other (`"aa"` is found twice in `"aaa"`),
//! and each flagged character is styled exactly once.

use std::collections::BTreeSet;

use regex::RegexBuilder;

/// A contiguous, inclusive span of character indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRange {
    /// Index of the first character.
    pub start: usize,
    /// Index of the last character (inclusive).
    pub end: usize,
    /// Whether the span is styled or left plain.
    pub highlighted: bool,
}

impl HighlightRange {
    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Ranges always cover at least one character.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Computes the disjoint highlighted and plain ranges covering `text`.
///
/// The result is sorted by index, alternates between highlighted and plain
/// spans, and jointly covers every character of `text` exactly once.
/// Empty substrings never match.
pub fn highlight_ranges<S: AsRef<str>>(
    text: &str,
    substrings: &[S],
    case_insensitive: bool,
) -> Vec<HighlightRange> {
    let offsets = char_offsets(text);
    let char_count = offsets.len() - 1;
    let mut flagged = vec![false; char_count];

    let parts: BTreeSet<&str> = substrings
        .iter()
        .map(AsRef::as_ref)
        .filter(|part| !part.is_empty())
        .collect();

    for part in parts {
        let re = match RegexBuilder::new(&regex::escape(part))
            .case_insensitive(case_insensitive)
            .build()
        {
            Ok(re) => re,
            Err(err) => {
                tracing::warn!(%part, %err, "skipping substring that cannot be searched");
                continue;
            }
        };

        // Restart one character after each match start so overlapping
        // occurrences are found too.
        let mut pos = 0;
        while let Some(m) = re.find_at(text, pos) {
            let first = char_index(&offsets, m.start());
            let last = char_index(&offsets, m.end());
            for flag in &mut flagged[first..last] {
                *flag = true;
            }
            match offsets.get(first + 1) {
                Some(&next) if next <= text.len() && first < char_count => pos = next,
                _ => break,
            }
        }
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    for i in 1..=char_count {
        if i == char_count || flagged[i] != flagged[start] {
            ranges.push(HighlightRange {
                start,
                end: i - 1,
                highlighted: flagged[start],
            });
            start = i;
        }
    }
    ranges
}

/// Styles every occurrence of `substrings` inside `text` with `style`.
///
/// Overlapping and adjacent occurrences are merged, so each styled span is
/// passed to `style` once. With no substrings, `text` is returned unchanged.
///
/// # Example
///
/// ```rust
/// use tinthelp_render::highlight;
///
/// let out = highlight("Hello world", &["o w", "wor"], |s| format!("[{s}]"), false);
/// assert_eq!(out, "Hell[o wor]ld");
/// ```
pub fn highlight<S, F>(text: &str, substrings: &[S], style: F, case_insensitive: bool) -> String
where
    S: AsRef<str>,
    F: Fn(&str) -> String,
{
    let offsets = char_offsets(text);
    let mut styled = String::with_capacity(text.len());
    for range in highlight_ranges(text, substrings, case_insensitive) {
        let segment = &text[offsets[range.start]..offsets[range.end + 1]];
        if range.highlighted {
            styled.push_str(&style(segment));
        } else {
            styled.push_str(segment);
        }
    }
    styled
}

/// Byte offset of every character, followed by the text length.
fn char_offsets(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect()
}

/// Character index of a byte offset that sits on a char boundary.
fn char_index(offsets: &[usize], byte: usize) -> usize {
    offsets.partition_point(|&offset| offset < byte)
}
