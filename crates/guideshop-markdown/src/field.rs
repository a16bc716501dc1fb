//! Editable content field driven by toolbar events.
//!
//! Holds what the article editor keeps for its body field: the text, the
//! selection, and whether the placeholder hint is showing.

use serde::{Deserialize, Serialize};

use crate::basic::BasicFormatter;
use crate::complex::ComplexFormatter;
use crate::error::FormatError;
use crate::formatters::Formatters;
use crate::types::{TextEditState, TextRange};

/// Events the editor screen sends to its content field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The user typed or moved the selection.
    Entered { text: String, selection: TextRange },
    FocusChanged { focused: bool },
    ApplyFormatter(BasicFormatter),
    ApplyComplexFormatter(ComplexFormatter, Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentField {
    pub text: String,
    pub hint: String,
    pub is_hint_visible: bool,
    pub selection: TextRange,
}

impl Default for ContentField {
    fn default() -> Self {
        Self {
            text: String::new(),
            hint: String::new(),
            is_hint_visible: true,
            selection: TextRange::caret(0),
        }
    }
}

impl ContentField {
    /// Empty field showing `hint`.
    pub fn new(hint: impl Into<String>) -> Self {
        Self {
            hint: hint.into(),
            ..Self::default()
        }
    }

    /// Field pre-filled with loaded text, caret at the start.
    pub fn with_text(hint: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            is_hint_visible: text.is_empty(),
            text,
            ..Self::new(hint)
        }
    }

    /// Current text and selection.
    pub fn state(&self) -> TextEditState {
        TextEditState::new(self.text.clone(), self.selection)
    }

    /// Handle one event. A rejected formatter leaves the field unchanged.
    pub fn on_event(
        &mut self,
        formatters: &Formatters,
        event: EditorEvent,
    ) -> Result<(), FormatError> {
        match event {
            EditorEvent::Entered { text, selection } => {
                self.text = text;
                self.selection = selection;
            }
            EditorEvent::FocusChanged { focused } => {
                self.is_hint_visible = !focused && self.text.is_empty();
            }
            EditorEvent::ApplyFormatter(formatter) => {
                let result = formatters.apply_basic(formatter, &self.state());
                self.set_formatted(result);
            }
            EditorEvent::ApplyComplexFormatter(formatter, params) => {
                let result = formatters.apply_complex(formatter, &self.state(), params.as_slice())?;
                self.set_formatted(result);
            }
        }
        Ok(())
    }

    fn set_formatted(&mut self, result: TextEditState) {
        self.is_hint_visible = result.text.is_empty();
        self.text = result.text;
        self.selection = result.selection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_shows_hint() {
        let field = ContentField::new("Write your article");
        assert!(field.is_hint_visible);
        assert_eq!(field.text, "");
        assert_eq!(field.selection, TextRange::caret(0));
    }

    #[test]
    fn test_with_text_hides_hint() {
        let field = ContentField::with_text("hint", "loaded body");
        assert!(!field.is_hint_visible);
        assert!(ContentField::with_text("hint", "").is_hint_visible);
    }

    #[test]
    fn test_focus_toggles_hint() {
        let formatters = Formatters::default();
        let mut field = ContentField::new("hint");

        field
            .on_event(&formatters, EditorEvent::FocusChanged { focused: true })
            .unwrap();
        assert!(!field.is_hint_visible);

        field
            .on_event(&formatters, EditorEvent::FocusChanged { focused: false })
            .unwrap();
        assert!(field.is_hint_visible);

        field
            .on_event(
                &formatters,
                EditorEvent::Entered {
                    text: "x".to_owned(),
                    selection: TextRange::caret(1),
                },
            )
            .unwrap();
        field
            .on_event(&formatters, EditorEvent::FocusChanged { focused: false })
            .unwrap();
        assert!(!field.is_hint_visible);
    }

    #[test]
    fn test_apply_formatter_updates_field() {
        let formatters = Formatters::default();
        let mut field = ContentField::new("hint");
        field
            .on_event(
                &formatters,
                EditorEvent::Entered {
                    text: "hello world".to_owned(),
                    selection: TextRange::new(0, 5),
                },
            )
            .unwrap();

        field
            .on_event(&formatters, EditorEvent::ApplyFormatter(BasicFormatter::Bold))
            .unwrap();

        assert_eq!(field.text, "**hello** world");
        assert_eq!(field.selection, TextRange::new(2, 7));
        assert!(!field.is_hint_visible);
    }

    #[test]
    fn test_apply_complex_formatter() {
        let formatters = Formatters::default();
        let mut field = ContentField::new("hint");

        field
            .on_event(
                &formatters,
                EditorEvent::ApplyComplexFormatter(ComplexFormatter::Code, vec!["kotlin".to_owned()]),
            )
            .unwrap();

        assert_eq!(field.text, "```kotlin\nYOUR CODE\n```");
        assert_eq!(field.selection, TextRange::new(10, 19));
        assert!(!field.is_hint_visible);
    }

    #[test]
    fn test_rejected_formatter_leaves_field_alone() {
        let formatters = Formatters::default();
        let mut field = ContentField::with_text("hint", "body");
        let before = field.clone();

        let err = field
            .on_event(
                &formatters,
                EditorEvent::ApplyComplexFormatter(ComplexFormatter::Link, vec!["only".to_owned()]),
            )
            .unwrap_err();

        assert!(matches!(err, FormatError::Arity { expected: 2, actual: 1, .. }));
        assert_eq!(field, before);
    }
}
