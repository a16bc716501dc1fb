//! Complex formatters: toolbar actions that need extra parameters from a
//! dialog (link label and URL, image description and URL, code language).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::text::{MarkdownRope, TextBuffer, utf16_len};
use crate::types::{TextEditState, TextRange};

/// Placeholder body of a freshly inserted code block.
pub const CODE_PLACEHOLDER: &str = "YOUR CODE";

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplexFormatter {
    /// `[label](url)`, params: label, url.
    Link,
    /// `[![alt](url)](url)`, params: alt text, url.
    Image,
    /// Fenced code block, params: language.
    Code,
}

impl ComplexFormatter {
    pub const ALL: [ComplexFormatter; 3] = [
        ComplexFormatter::Link,
        ComplexFormatter::Image,
        ComplexFormatter::Code,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ComplexFormatter::Link => "link",
            ComplexFormatter::Image => "image",
            ComplexFormatter::Code => "code",
        }
    }

    /// Exact number of params this formatter accepts.
    pub fn arity(self) -> usize {
        match self {
            ComplexFormatter::Link | ComplexFormatter::Image => 2,
            ComplexFormatter::Code => 1,
        }
    }

    /// Apply this formatter to `state` with dialog-supplied `params`.
    ///
    /// Fails without touching anything if `params` has the wrong length.
    pub fn format<S: AsRef<str>>(
        self,
        state: &TextEditState,
        params: &[S],
    ) -> Result<TextEditState, FormatError> {
        self.check_arity(params.len())?;

        let (mut rope, selection) = MarkdownRope::for_state(state);
        let new_selection = match self {
            ComplexFormatter::Link => {
                let link = format!("[{}]({})", params[0].as_ref(), params[1].as_ref());
                insert_at_start(&mut rope, selection, &link)
            }
            ComplexFormatter::Image => {
                let (alt, url) = (params[0].as_ref(), params[1].as_ref());
                let image = format!("[![{alt}]({url})]({url})");
                insert_at_start(&mut rope, selection, &image)
            }
            ComplexFormatter::Code => code_block(&mut rope, selection, params[0].as_ref()),
        };
        let result = rope.into_state(new_selection);

        tracing::trace!(
            formatter = self.name(),
            selection_in = ?selection,
            selection_out = ?result.selection,
            len_before = state.len_utf16(),
            len_after = result.len_utf16(),
            "applied complex formatter"
        );

        Ok(result)
    }

    pub(crate) fn check_arity(self, actual: usize) -> Result<(), FormatError> {
        let expected = self.arity();
        if actual == expected {
            return Ok(());
        }
        tracing::warn!(
            formatter = self.name(),
            expected,
            actual,
            "rejected formatter params"
        );
        Err(FormatError::Arity {
            formatter: self.name(),
            expected,
            actual,
        })
    }
}

impl fmt::Display for ComplexFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComplexFormatter {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|formatter| formatter.name() == s)
            .ok_or_else(|| FormatError::UnknownFormatter(s.to_owned()))
    }
}

/// Insert `snippet` at the selection start and select it. Selected text is
/// left in place after the snippet.
fn insert_at_start(rope: &mut MarkdownRope, sel: TextRange, snippet: &str) -> TextRange {
    rope.insert(sel.start, snippet);
    TextRange::new(sel.start, sel.start + utf16_len(snippet))
}

fn code_block(rope: &mut MarkdownRope, sel: TextRange, language: &str) -> TextRange {
    let opening = format!("{FENCE}{language}\n");
    let opening_len = utf16_len(&opening);

    if sel.is_caret() {
        let block = format!("{opening}{CODE_PLACEHOLDER}\n{FENCE}");
        rope.insert(sel.start, &block);
        let body_start = sel.start + opening_len;
        return TextRange::new(body_start, body_start + utf16_len(CODE_PLACEHOLDER));
    }

    // Closing fence first so the start offset stays valid.
    rope.insert(sel.end, &format!("\n{FENCE}"));
    rope.insert(sel.start, &opening);
    sel.shift(opening_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(text: &str, start: usize, end: usize) -> TextEditState {
        TextEditState::new(text, TextRange::new(start, end))
    }

    fn render(state: &TextEditState) -> String {
        format!(
            "{:?} {}..{}",
            state.text, state.selection.start, state.selection.end
        )
    }

    #[test]
    fn test_code_on_empty_text() {
        let out = ComplexFormatter::Code
            .format(&state("", 0, 0), &["kotlin"])
            .unwrap();
        insta::assert_snapshot!(render(&out), @r#""```kotlin\nYOUR CODE\n```" 10..19"#);
        assert_eq!(out.selected_text().as_deref(), Some(CODE_PLACEHOLDER));
    }

    #[test]
    fn test_code_wraps_selection() {
        let out = ComplexFormatter::Code
            .format(&state("see fn main() {}", 4, 16), &["rust"])
            .unwrap();
        assert_eq!(out.text, "see ```rust\nfn main() {}\n```");
        assert_eq!(out.selected_text().as_deref(), Some("fn main() {}"));
    }

    #[test]
    fn test_code_rejects_two_params() {
        let err = ComplexFormatter::Code
            .format(&state("", 0, 0), &["kotlin", "java"])
            .unwrap_err();
        assert_eq!(
            err,
            FormatError::Arity {
                formatter: "code",
                expected: 1,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_link_at_caret() {
        let out = ComplexFormatter::Link
            .format(&state("go ", 3, 3), &["docs", "https://example.com"])
            .unwrap();
        assert_eq!(out.text, "go [docs](https://example.com)");
        assert_eq!(
            out.selected_text().as_deref(),
            Some("[docs](https://example.com)")
        );
    }

    #[test]
    fn test_link_keeps_selected_text() {
        let out = ComplexFormatter::Link
            .format(&state("read this", 5, 9), &["here", "u"])
            .unwrap();
        assert_eq!(out.text, "read [here](u)this");
        assert_eq!(out.selection, TextRange::new(5, 14));
    }

    #[test]
    fn test_image_is_clickable() {
        let out = ComplexFormatter::Image
            .format(&state("", 0, 0), &["cat", "https://img/cat.png"])
            .unwrap();
        insta::assert_snapshot!(
            render(&out),
            @r#""[![cat](https://img/cat.png)](https://img/cat.png)" 0..50"#
        );
    }

    #[test]
    fn test_arity_checked_for_all() {
        for formatter in ComplexFormatter::ALL {
            let too_many = vec!["x"; formatter.arity() + 1];
            let err = formatter.format(&state("t", 0, 0), too_many.as_slice()).unwrap_err();
            assert!(matches!(err, FormatError::Arity { .. }), "{formatter}");

            let none: [&str; 0] = [];
            assert!(formatter.format(&state("t", 0, 0), &none).is_err());
        }
    }

    #[test]
    fn test_params_accept_owned_strings() {
        let params = vec!["python".to_owned()];
        let out = ComplexFormatter::Code
            .format(&state("x", 1, 1), params.as_slice())
            .unwrap();
        assert_eq!(out.text, "x```python\nYOUR CODE\n```");
    }

    #[test]
    fn test_name_round_trip() {
        for formatter in ComplexFormatter::ALL {
            assert_eq!(formatter.name().parse::<ComplexFormatter>(), Ok(formatter));
        }
        assert!("table".parse::<ComplexFormatter>().is_err());
    }
}
