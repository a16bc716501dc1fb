//! Marker and hint strings consulted by the basic formatters.
//!
//! Defaults match the toolbar's built-in English resources. A KDL document
//! can override any entry:
//!
//! ```kdl
//! bold-marker "__"
//! bold-hint "__bold__"
//! round-list-marker "-"
//! round-list-hint "\n- Item"
//! ```

use kdl::KdlDocument;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Every string a basic formatter inserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownStrings {
    pub header_marker: String,
    pub header_hint: String,
    pub bold_marker: String,
    pub bold_hint: String,
    pub italic_marker: String,
    pub italic_hint: String,
    pub strikethrough_marker: String,
    pub strikethrough_hint: String,
    pub selected_marker: String,
    pub selected_hint: String,
    pub round_list_marker: String,
    pub round_list_hint: String,
    /// Goes after the ordinal: `1.` with `"."`, `1)` with `")"`.
    pub numeric_list_delimiter: String,
    pub numeric_list_hint: String,
    /// Inserted as-is; the non-newline core is what a caret insert selects.
    pub horizontal_line: String,
}

impl Default for MarkdownStrings {
    fn default() -> Self {
        Self {
            header_marker: "# ".to_owned(),
            header_hint: "# Header".to_owned(),
            bold_marker: "**".to_owned(),
            bold_hint: "**bold**".to_owned(),
            italic_marker: "*".to_owned(),
            italic_hint: "*italic*".to_owned(),
            strikethrough_marker: "~~".to_owned(),
            strikethrough_hint: "~~strikethrough~~".to_owned(),
            selected_marker: "==".to_owned(),
            selected_hint: "==highlighted==".to_owned(),
            round_list_marker: "*".to_owned(),
            round_list_hint: "\n* Item".to_owned(),
            numeric_list_delimiter: ".".to_owned(),
            numeric_list_hint: "\n1. Item".to_owned(),
            horizontal_line: "\n\n***\n\n".to_owned(),
        }
    }
}

impl MarkdownStrings {
    /// Node names accepted in a KDL override document.
    pub const KEYS: [&'static str; 15] = [
        "header-marker",
        "header-hint",
        "bold-marker",
        "bold-hint",
        "italic-marker",
        "italic-hint",
        "strikethrough-marker",
        "strikethrough-hint",
        "selected-marker",
        "selected-hint",
        "round-list-marker",
        "round-list-hint",
        "numeric-list-delimiter",
        "numeric-list-hint",
        "horizontal-line",
    ];

    /// Parse overrides from KDL on top of the defaults.
    pub fn from_kdl(source: &str) -> Result<Self, ConfigError> {
        let mut strings = Self::default();
        strings.apply_kdl(source)?;
        Ok(strings)
    }

    /// Apply overrides from KDL to these strings.
    ///
    /// Each node takes one positional string argument. Unknown node names are
    /// skipped. On error `self` is left unchanged.
    pub fn apply_kdl(&mut self, source: &str) -> Result<(), ConfigError> {
        let doc: KdlDocument = source.parse()?;
        let mut next = self.clone();

        for node in doc.nodes() {
            let key = node.name().value();
            let Some(slot) = next.slot_mut(key) else {
                tracing::warn!(key, "ignoring unknown markdown config node");
                continue;
            };

            let value = node
                .entries()
                .iter()
                .find(|entry| entry.name().is_none())
                .and_then(|entry| entry.value().as_string())
                .ok_or_else(|| ConfigError::invalid(key, "expected a single string argument"))?;

            *slot = value.to_owned();
        }

        next.validate()?;
        *self = next;
        tracing::debug!(nodes = doc.nodes().len(), "loaded markdown config overrides");
        Ok(())
    }

    /// Check that every hint still carries the markers the formatters trim
    /// off when selecting the placeholder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let wrapped = [
            ("bold", &self.bold_marker, &self.bold_hint),
            ("italic", &self.italic_marker, &self.italic_hint),
            (
                "strikethrough",
                &self.strikethrough_marker,
                &self.strikethrough_hint,
            ),
            ("selected", &self.selected_marker, &self.selected_hint),
        ];
        for (name, marker, hint) in wrapped {
            if marker.is_empty() {
                return Err(ConfigError::invalid(
                    &format!("{name}-marker"),
                    "must not be empty",
                ));
            }
            if hint.len() < marker.len() * 2
                || !hint.starts_with(marker.as_str())
                || !hint.ends_with(marker.as_str())
            {
                return Err(ConfigError::invalid(
                    &format!("{name}-hint"),
                    format!("must start and end with `{marker}`"),
                ));
            }
        }

        if self.header_marker.is_empty() {
            return Err(ConfigError::invalid("header-marker", "must not be empty"));
        }
        if !self.header_hint.starts_with(self.header_marker.as_str()) {
            return Err(ConfigError::invalid(
                "header-hint",
                format!("must start with `{}`", self.header_marker),
            ));
        }

        if self.round_list_marker.is_empty() {
            return Err(ConfigError::invalid("round-list-marker", "must not be empty"));
        }
        let prefix = self.round_list_prefix();
        if !self.round_list_hint.starts_with(&format!("\n{prefix}")) {
            return Err(ConfigError::invalid(
                "round-list-hint",
                format!("must start with a newline followed by `{prefix}`"),
            ));
        }

        let prefix = self.numeric_list_prefix(1);
        if !self.numeric_list_hint.starts_with(&format!("\n{prefix}")) {
            return Err(ConfigError::invalid(
                "numeric-list-hint",
                format!("must start with a newline followed by `{prefix}`"),
            ));
        }

        if self.horizontal_line.trim_matches('\n').is_empty() {
            return Err(ConfigError::invalid(
                "horizontal-line",
                "must contain a rule token besides newlines",
            ));
        }

        Ok(())
    }

    /// Line prefix for a bullet list item, e.g. `"* "`.
    pub fn round_list_prefix(&self) -> String {
        format!("{} ", self.round_list_marker)
    }

    /// Line prefix for the `ordinal`-th numbered item, e.g. `"2. "`.
    pub fn numeric_list_prefix(&self, ordinal: usize) -> String {
        format!("{ordinal}{} ", self.numeric_list_delimiter)
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        let slot = match key {
            "header-marker" => &mut self.header_marker,
            "header-hint" => &mut self.header_hint,
            "bold-marker" => &mut self.bold_marker,
            "bold-hint" => &mut self.bold_hint,
            "italic-marker" => &mut self.italic_marker,
            "italic-hint" => &mut self.italic_hint,
            "strikethrough-marker" => &mut self.strikethrough_marker,
            "strikethrough-hint" => &mut self.strikethrough_hint,
            "selected-marker" => &mut self.selected_marker,
            "selected-hint" => &mut self.selected_hint,
            "round-list-marker" => &mut self.round_list_marker,
            "round-list-hint" => &mut self.round_list_hint,
            "numeric-list-delimiter" => &mut self.numeric_list_delimiter,
            "numeric-list-hint" => &mut self.numeric_list_hint,
            "horizontal-line" => &mut self.horizontal_line,
            _ => return None,
        };
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        MarkdownStrings::default().validate().unwrap();
    }

    #[test]
    fn test_every_key_has_a_slot() {
        let mut strings = MarkdownStrings::default();
        for key in MarkdownStrings::KEYS {
            assert!(strings.slot_mut(key).is_some(), "no slot for {key}");
        }
    }

    #[test]
    fn test_kdl_overrides() {
        let strings = MarkdownStrings::from_kdl(
            r#"
            bold-marker "__"
            bold-hint "__strong__"
            round-list-marker "-"
            round-list-hint "\n- Entry"
            "#,
        )
        .unwrap();

        assert_eq!(strings.bold_marker, "__");
        assert_eq!(strings.bold_hint, "__strong__");
        assert_eq!(strings.round_list_hint, "\n- Entry");
        // Untouched entries keep their defaults.
        assert_eq!(strings.italic_marker, "*");
    }

    #[test]
    fn test_kdl_unknown_node_is_ignored() {
        let strings = MarkdownStrings::from_kdl(r#"emoji-marker ":)""#).unwrap();
        assert_eq!(strings, MarkdownStrings::default());
    }

    #[test]
    fn test_kdl_non_string_value() {
        let err = MarkdownStrings::from_kdl("bold-marker 42").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "bold-marker"
        ));
    }

    #[test]
    fn test_kdl_parse_error() {
        let err = MarkdownStrings::from_kdl("bold-marker \"unterminated").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_hint_must_carry_marker() {
        let err = MarkdownStrings::from_kdl(r#"bold-marker "__""#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "bold-hint"
        ));
    }

    #[test]
    fn test_rejected_overrides_leave_strings_unchanged() {
        let mut strings = MarkdownStrings::from_kdl(r##"header-hint "# Title""##).unwrap();
        let before = strings.clone();

        let err = strings.apply_kdl(r#"bold-marker "__""#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "bold-hint"
        ));
        assert_eq!(strings, before);
        strings.validate().unwrap();

        strings
            .apply_kdl("italic-marker \"_\"\nitalic-hint 7")
            .unwrap_err();
        assert_eq!(strings, before);
    }

    #[test]
    fn test_list_prefixes() {
        let strings = MarkdownStrings::default();
        assert_eq!(strings.round_list_prefix(), "* ");
        assert_eq!(strings.numeric_list_prefix(3), "3. ");
    }
}
