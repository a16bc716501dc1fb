//! Basic formatters: toolbar actions that need only the text and selection.
//!
//! Each formatter has two modes. With a selection it wraps or transforms the
//! selected text. With a caret it inserts a hint template and selects the
//! placeholder inside it so the user can type over it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::strings::MarkdownStrings;
use crate::text::{MarkdownRope, TextBuffer, utf16_len};
use crate::types::{TextEditState, TextRange};

/// Splices one formatter's markup into the rope and returns the new selection.
type FormatFn = fn(&MarkdownStrings, &mut MarkdownRope, TextRange) -> TextRange;

/// Toolbar formatters that take no params.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BasicFormatter {
    /// Prefix the current line with a header marker.
    Header,
    /// Wrap in `**`.
    Bold,
    /// Wrap in `*`, selecting the markers too.
    Italic,
    /// Wrap in `~~`.
    Strikethrough,
    /// Turn selected lines into a bulleted list.
    RoundList,
    /// Turn selected lines into a numbered list.
    NumericList,
    /// Insert a line break at the selection start.
    NewLine,
    /// Highlight with `==`.
    Selected,
    /// Insert a thematic break.
    HorizontalLine,
}

impl BasicFormatter {
    /// Every basic formatter, in toolbar order.
    pub const ALL: [BasicFormatter; 9] = [
        BasicFormatter::Header,
        BasicFormatter::Bold,
        BasicFormatter::Italic,
        BasicFormatter::Strikethrough,
        BasicFormatter::RoundList,
        BasicFormatter::NumericList,
        BasicFormatter::NewLine,
        BasicFormatter::HorizontalLine,
        BasicFormatter::Selected,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BasicFormatter::Header => "header",
            BasicFormatter::Bold => "bold",
            BasicFormatter::Italic => "italic",
            BasicFormatter::Strikethrough => "strikethrough",
            BasicFormatter::RoundList => "round-list",
            BasicFormatter::NumericList => "numeric-list",
            BasicFormatter::NewLine => "new-line",
            BasicFormatter::Selected => "selected",
            BasicFormatter::HorizontalLine => "horizontal-line",
        }
    }

    fn handler(self) -> FormatFn {
        match self {
            BasicFormatter::Header => format_header,
            BasicFormatter::Bold => format_bold,
            BasicFormatter::Italic => format_italic,
            BasicFormatter::Strikethrough => format_strikethrough,
            BasicFormatter::RoundList => format_round_list,
            BasicFormatter::NumericList => format_numeric_list,
            BasicFormatter::NewLine => format_new_line,
            BasicFormatter::Selected => format_selected,
            BasicFormatter::HorizontalLine => format_horizontal_line,
        }
    }

    /// Apply this formatter to `state`, returning the new text and selection.
    pub fn format(self, strings: &MarkdownStrings, state: &TextEditState) -> TextEditState {
        let (mut rope, selection) = MarkdownRope::for_state(state);
        let new_selection = (self.handler())(strings, &mut rope, selection);
        let result = rope.into_state(new_selection);

        tracing::trace!(
            formatter = self.name(),
            selection_in = ?selection,
            selection_out = ?result.selection,
            len_before = state.len_utf16(),
            len_after = result.len_utf16(),
            "applied basic formatter"
        );

        result
    }
}

impl fmt::Display for BasicFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BasicFormatter {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|formatter| formatter.name() == s)
            .ok_or_else(|| FormatError::UnknownFormatter(s.to_owned()))
    }
}

/// How much of the wrapped text stays selected after wrapping.
#[derive(Clone, Copy)]
enum WrapSelection {
    /// Only the original text, inside the markers.
    Inner,
    /// The original text plus both markers.
    Outer,
}

fn format_header(strings: &MarkdownStrings, rope: &mut MarkdownRope, sel: TextRange) -> TextRange {
    let marker = &strings.header_marker;
    let marker_len = utf16_len(marker);

    if sel.is_caret() && rope.is_line_blank(sel.start) {
        return insert_hint(rope, sel.start, &strings.header_hint, marker_len, 0);
    }

    let line_start = rope.find_line_start(sel.start);
    rope.insert(line_start, marker);

    if sel.is_caret() {
        TextRange::caret(line_start + marker_len)
    } else {
        sel.shift(marker_len)
    }
}

fn format_bold(strings: &MarkdownStrings, rope: &mut MarkdownRope, sel: TextRange) -> TextRange {
    wrap(
        rope,
        sel,
        &strings.bold_marker,
        &strings.bold_hint,
        WrapSelection::Inner,
    )
}

fn format_italic(strings: &MarkdownStrings, rope: &mut MarkdownRope, sel: TextRange) -> TextRange {
    wrap(
        rope,
        sel,
        &strings.italic_marker,
        &strings.italic_hint,
        WrapSelection::Outer,
    )
}

fn format_strikethrough(
    strings: &MarkdownStrings,
    rope: &mut MarkdownRope,
    sel: TextRange,
) -> TextRange {
    wrap(
        rope,
        sel,
        &strings.strikethrough_marker,
        &strings.strikethrough_hint,
        WrapSelection::Inner,
    )
}

fn format_selected(strings: &MarkdownStrings, rope: &mut MarkdownRope, sel: TextRange) -> TextRange {
    wrap(
        rope,
        sel,
        &strings.selected_marker,
        &strings.selected_hint,
        WrapSelection::Inner,
    )
}

fn format_round_list(
    strings: &MarkdownStrings,
    rope: &mut MarkdownRope,
    sel: TextRange,
) -> TextRange {
    let prefix = strings.round_list_prefix();
    if sel.is_caret() {
        // Skip the leading newline and the bullet.
        let lead = 1 + utf16_len(&prefix);
        return insert_hint(rope, sel.start, &strings.round_list_hint, lead, 0);
    }
    list(rope, sel, |_| prefix.clone())
}

fn format_numeric_list(
    strings: &MarkdownStrings,
    rope: &mut MarkdownRope,
    sel: TextRange,
) -> TextRange {
    if sel.is_caret() {
        let lead = 1 + utf16_len(&strings.numeric_list_prefix(1));
        return insert_hint(rope, sel.start, &strings.numeric_list_hint, lead, 0);
    }
    list(rope, sel, |index| strings.numeric_list_prefix(index + 1))
}

fn format_new_line(_: &MarkdownStrings, rope: &mut MarkdownRope, sel: TextRange) -> TextRange {
    rope.insert(sel.start, "\n");
    sel.shift(1)
}

fn format_horizontal_line(
    strings: &MarkdownStrings,
    rope: &mut MarkdownRope,
    sel: TextRange,
) -> TextRange {
    let rule = &strings.horizontal_line;

    if sel.is_caret() {
        // Newlines are one code unit each, so byte counts work here.
        let lead = rule.len() - rule.trim_start_matches('\n').len();
        let trail = rule.len() - rule.trim_end_matches('\n').len();
        return insert_hint(rope, sel.start, rule, lead, trail);
    }

    rope.insert(sel.end, rule);
    rope.insert(sel.start, rule);
    sel.shift(utf16_len(rule))
}

/// Surround the selection with `marker`, or insert `hint` at a caret.
fn wrap(
    rope: &mut MarkdownRope,
    sel: TextRange,
    marker: &str,
    hint: &str,
    selection: WrapSelection,
) -> TextRange {
    let marker_len = utf16_len(marker);

    if sel.is_caret() {
        return insert_hint(rope, sel.start, hint, marker_len, marker_len);
    }

    // Insert end marker first so start position stays valid.
    rope.insert(sel.end, marker);
    rope.insert(sel.start, marker);

    match selection {
        WrapSelection::Inner => sel.shift(marker_len),
        WrapSelection::Outer => TextRange::new(sel.start, sel.end + marker_len * 2),
    }
}

/// Insert `hint` at `at` and select it minus `lead` leading and `trail`
/// trailing code units.
fn insert_hint(
    rope: &mut MarkdownRope,
    at: usize,
    hint: &str,
    lead: usize,
    trail: usize,
) -> TextRange {
    rope.insert(at, hint);
    let end = (at + utf16_len(hint)).saturating_sub(trail);
    TextRange::new((at + lead).min(end), end)
}

/// Replace the selection with one list item per selected line.
///
/// A selection starting mid-line gets a line break first so the first item
/// opens its own line. The returned selection covers the items only.
fn list(rope: &mut MarkdownRope, sel: TextRange, prefix: impl Fn(usize) -> String) -> TextRange {
    let selected = rope.slice(sel.start..sel.end).unwrap_or_default();
    let lead = if rope.find_line_start(sel.start) == sel.start {
        ""
    } else {
        "\n"
    };

    let mut items = selected
        .split('\n')
        .enumerate()
        .map(|(index, line)| format!("{}{line}", prefix(index)))
        .collect::<Vec<_>>()
        .join("\n");
    items.push('\n');

    rope.replace(sel.start..sel.end, &format!("{lead}{items}"));
    let start = sel.start + utf16_len(lead);
    TextRange::new(start, start + utf16_len(&items))
}
