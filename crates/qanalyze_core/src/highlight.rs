//! Error-range overlay segmentation.
//!
//! # Responsibility
//! - Turn input text plus validation error ranges into an ordered sequence
//!   of plain/marked segments for a backdrop overlay rendered behind a
//!   transparent-text input.
//!
//! # Invariants
//! - Segments concatenated left to right cover every input char exactly
//!   once; overlapping or unsorted ranges are clipped, never duplicated.
//! - Zero-width and out-of-bounds ranges still produce a visible
//!   single-placeholder mark instead of disappearing.
//! - Malformed ranges (`end < start`, out-of-bounds) are clamped; this
//!   function never panics on caller input.

use crate::model::outcome::ErrorRange;

/// Placeholder rendered for marks whose clamped slice is empty.
pub const MARK_PLACEHOLDER: &str = " ";

/// One overlay segment: plain text or a highlighted (marked) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Mark(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Mark(text) => text,
        }
    }

    pub fn is_mark(&self) -> bool {
        matches!(self, Self::Mark(_))
    }
}

/// Overlay layout for one input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOverlay {
    /// Ordered segments covering the text left to right.
    pub segments: Vec<Segment>,
    /// Set when the text ends with `\n`: the host must render one extra
    /// line break so the overlay's line count matches the input widget.
    pub trailing_break: bool,
}

impl HighlightOverlay {
    /// Concatenation of all segment text. Equals the input exactly when no
    /// placeholder marks were emitted.
    pub fn flattened(&self) -> String {
        self.segments
            .iter()
            .map(Segment::text)
            .collect::<String>()
    }
}

/// Produces the overlay segmentation for `text` with the given ranges.
///
/// Ranges are sorted by `start` before use (the producer already sorts,
/// this re-sorts defensively). With no ranges the whole text is returned
/// as one unmarked segment.
pub fn render_highlights(text: &str, ranges: &[ErrorRange]) -> HighlightOverlay {
    let trailing_break = text.ends_with('\n');

    if ranges.is_empty() {
        return HighlightOverlay {
            segments: vec![Segment::Text(text.to_string())],
            trailing_break,
        };
    }

    // Char-boundary byte offsets; entry `i` is the byte start of char `i`.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .collect();
    let total_chars = boundaries.len() - 1;
    let slice = |from: usize, to: usize| text[boundaries[from]..boundaries[to]].to_string();

    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|range| range.start);

    let mut segments = Vec::new();
    let mut cursor = 0usize;

    for range in sorted {
        // Clip into [cursor, total] so overlaps and reversed or
        // out-of-bounds ranges cannot duplicate or skip chars.
        let start = range.start.clamp(cursor, total_chars);
        let end = range.end.clamp(start, total_chars);

        if start > cursor {
            segments.push(Segment::Text(slice(cursor, start)));
        }
        let marked = slice(start, end);
        if marked.is_empty() {
            segments.push(Segment::Mark(MARK_PLACEHOLDER.to_string()));
        } else {
            segments.push(Segment::Mark(marked));
        }
        cursor = end;
    }

    if cursor < total_chars {
        segments.push(Segment::Text(slice(cursor, total_chars)));
    }

    HighlightOverlay {
        segments,
        trailing_break,
    }
}
