//! Text buffer abstraction used by the formatters.
//!
//! The `TextBuffer` trait exposes splice operations addressed in UTF-16 code
//! units, the unit editor hosts report selections in. `MarkdownRope` is the
//! ropey-backed implementation every formatter runs against.

use smol_str::{SmolStr, ToSmolStr};
use std::ops::Range;

use crate::types::{TextEditState, TextRange};

/// Length of `s` in UTF-16 code units.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// A text buffer that can be spliced at UTF-16 offsets.
pub trait TextBuffer {
    /// Total length in UTF-16 code units.
    fn len_utf16(&self) -> usize;

    /// Check if empty.
    fn is_empty(&self) -> bool {
        self.len_utf16() == 0
    }

    /// Insert text at a UTF-16 offset.
    fn insert(&mut self, offset: usize, text: &str);

    /// Delete a UTF-16 range.
    fn delete(&mut self, range: Range<usize>);

    /// Replace a UTF-16 range with text.
    fn replace(&mut self, range: Range<usize>, text: &str) {
        self.delete(range.clone());
        self.insert(range.start, text);
    }

    /// Get a slice as SmolStr. Returns None if range is invalid.
    fn slice(&self, range: Range<usize>) -> Option<SmolStr>;

    /// Character starting at `offset`. Returns None at or past the end.
    fn char_at(&self, offset: usize) -> Option<char>;

    /// Character ending at `offset`. Returns None at the start.
    fn char_before(&self, offset: usize) -> Option<char>;

    /// Convert entire buffer to String.
    fn to_string(&self) -> String;

    /// Offset just after the last `\n` before `offset`, or 0.
    fn find_line_start(&self, offset: usize) -> usize {
        let mut pos = offset.min(self.len_utf16());
        while let Some(c) = self.char_before(pos) {
            if c == '\n' {
                break;
            }
            pos -= c.len_utf16();
        }
        pos
    }

    /// Check whether the line containing `offset` has no characters.
    fn is_line_blank(&self, offset: usize) -> bool {
        self.find_line_start(offset) == offset && matches!(self.char_at(offset), None | Some('\n'))
    }
}

/// Ropey-backed text buffer for formatter splicing.
#[derive(Clone, Default)]
pub struct MarkdownRope {
    rope: ropey::Rope,
}

impl MarkdownRope {
    /// Create a new empty rope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from string.
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
        }
    }

    /// Load a state's text and return it with the state's selection
    /// normalized, clamped and snapped to character boundaries.
    pub fn for_state(state: &TextEditState) -> (Self, TextRange) {
        let rope = Self::from_str(&state.text);
        let range = state.selection.clamp(rope.len_utf16());
        let range = TextRange::new(rope.snap(range.start), rope.snap(range.end));
        (rope, range)
    }

    /// Finish an edit, clamping the selection into the new text.
    pub fn into_state(self, selection: TextRange) -> TextEditState {
        let selection = selection.clamp(self.len_utf16());
        TextEditState {
            text: self.rope.to_string(),
            selection,
        }
    }

    /// Round an offset down to the start of the character containing it.
    ///
    /// Offsets between the two halves of a surrogate pair move back to the
    /// pair's first unit.
    pub fn snap(&self, offset: usize) -> usize {
        self.rope.char_to_utf16_cu(self.to_char(offset))
    }

    fn to_char(&self, offset: usize) -> usize {
        self.rope
            .utf16_cu_to_char(offset.min(self.rope.len_utf16_cu()))
    }

    fn to_char_range(&self, range: Range<usize>) -> Option<Range<usize>> {
        if range.start > range.end || range.end > self.rope.len_utf16_cu() {
            return None;
        }
        Some(self.to_char(range.start)..self.to_char(range.end))
    }
}

impl TextBuffer for MarkdownRope {
    fn len_utf16(&self) -> usize {
        self.rope.len_utf16_cu()
    }

    fn insert(&mut self, offset: usize, text: &str) {
        let char_idx = self.to_char(offset);
        self.rope.insert(char_idx, text);
    }

    fn delete(&mut self, range: Range<usize>) {
        if let Some(char_range) = self.to_char_range(range) {
            self.rope.remove(char_range);
        }
    }

    fn slice(&self, range: Range<usize>) -> Option<SmolStr> {
        let char_range = self.to_char_range(range)?;
        Some(self.rope.slice(char_range).to_smolstr())
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        let char_idx = self.to_char(offset);
        if char_idx >= self.rope.len_chars() {
            return None;
        }
        Some(self.rope.char(char_idx))
    }

    fn char_before(&self, offset: usize) -> Option<char> {
        let char_idx = self.to_char(offset);
        if char_idx == 0 {
            return None;
        }
        Some(self.rope.char(char_idx - 1))
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }
}

impl From<&str> for MarkdownRope {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}
