//! Text range and source buffer types for source location tracking.
//!
//! All offsets are measured in UTF-16 code units, which is the unit the
//! scanner walks and the unit JavaScript hosts use for string indices.

use serde::Serialize;
use std::fmt;

/// A position in source text, measured in UTF-16 code units from the start.
pub type TextPos = u32;

/// A text range with start and end positions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct TextRange {
    /// The offset where this range starts (inclusive).
    pub pos: TextPos,
    /// The offset where this range ends (exclusive).
    pub end: TextPos,
}

impl TextRange {
    /// Create a new text range.
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= pos);
        Self { pos, end }
    }

    /// Create an empty range at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { pos, end: pos }
    }

    /// The length of this range in code units.
    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    /// Whether this range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// Whether this range contains a position.
    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.pos && pos < self.end
    }

    /// Whether `other` lies entirely within this range.
    #[inline]
    pub fn encloses(&self, other: &TextRange) -> bool {
        other.pos >= self.pos && other.end <= self.end
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.pos, self.end)
    }
}

/// An owned UTF-16 source buffer.
///
/// The scanner itself only borrows `&[u16]`; this type exists so callers
/// holding a `&str` can build the buffer once and slice record ranges back
/// into strings.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SourceText {
    units: Vec<u16>,
}

impl SourceText {
    /// Encode `text` as UTF-16.
    pub fn new(text: &str) -> Self {
        Self {
            units: text.encode_utf16().collect(),
        }
    }

    /// Wrap an existing UTF-16 buffer.
    pub fn from_units(units: Vec<u16>) -> Self {
        Self { units }
    }

    /// The raw code units.
    #[inline]
    pub fn units(&self) -> &[u16] {
        &self.units
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Decode the code units covered by `range`. Out-of-bounds ranges are
    /// clamped; unpaired surrogates are replaced.
    pub fn slice(&self, range: TextRange) -> String {
        let end = (range.end as usize).min(self.units.len());
        let start = (range.pos as usize).min(end);
        String::from_utf16_lossy(&self.units[start..end])
    }
}

impl fmt::Debug for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceText({:?})", String::from_utf16_lossy(&self.units))
    }
}
