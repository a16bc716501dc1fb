//! Editor value types: selection ranges and the text/selection pair that
//! flows through every formatter.
//!
//! Offsets are UTF-16 code units, matching what text fields on mobile and
//! browser hosts report.

use serde::{Deserialize, Serialize};

/// A selection in the document, measured in UTF-16 code units.
///
/// `start == end` is a caret. Ranges coming from a host may arrive reversed;
/// use [`TextRange::normalize`] before treating `start` as the lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalize range so start <= end.
    pub fn normalize(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self {
                start: self.end,
                end: self.start,
            }
        }
    }

    /// Shift both bounds forward by `by` code units.
    pub fn shift(self, by: usize) -> Self {
        Self {
            start: self.start + by,
            end: self.end + by,
        }
    }

    /// Clamp both bounds into `[0, max]`, keeping `start <= end`.
    pub fn clamp(self, max: usize) -> Self {
        let range = self.normalize();
        let start = range.start.min(max);
        let end = range.end.min(max).max(start);
        Self { start, end }
    }
}

impl From<std::ops::Range<usize>> for TextRange {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl From<TextRange> for std::ops::Range<usize> {
    fn from(r: TextRange) -> Self {
        r.start..r.end
    }
}

/// Document text together with its selection.
///
/// Formatters consume one of these and produce a fresh one; nothing is
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextEditState {
    pub text: String,
    pub selection: TextRange,
}

impl TextEditState {
    pub fn new(text: impl Into<String>, selection: TextRange) -> Self {
        Self {
            text: text.into(),
            selection,
        }
    }

    /// Text with a caret at `offset`.
    pub fn with_caret(text: impl Into<String>, offset: usize) -> Self {
        Self::new(text, TextRange::caret(offset))
    }

    /// Text with the caret after the last character.
    pub fn at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = crate::text::utf16_len(&text);
        Self::with_caret(text, len)
    }

    /// Length of the text in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        crate::text::utf16_len(&self.text)
    }

    /// The currently selected text, or `None` for a caret or a selection
    /// that does not fit the text.
    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection.normalize();
        if range.is_caret() {
            return None;
        }
        let units: Vec<u16> = self.text.encode_utf16().collect();
        let slice = units.get(range.start..range.end)?;
        Some(String::from_utf16_lossy(slice))
    }
}
