//! Formatter registry and dispatch.
//!
//! `Formatters` pairs the marker table with both formatter families so
//! callers can apply any toolbar action through one entry point. Names are
//! resolved through the static `FORMATTERS` table.

use std::fmt;
use std::str::FromStr;

use crate::basic::BasicFormatter;
use crate::complex::ComplexFormatter;
use crate::error::FormatError;
use crate::strings::MarkdownStrings;
use crate::types::TextEditState;

/// Either kind of formatter, without params.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatterKind {
    Basic(BasicFormatter),
    Complex(ComplexFormatter),
}

/// Every formatter known to the toolbar, basic ones first.
pub const FORMATTERS: [FormatterKind; 12] = [
    FormatterKind::Basic(BasicFormatter::Header),
    FormatterKind::Basic(BasicFormatter::Bold),
    FormatterKind::Basic(BasicFormatter::Italic),
    FormatterKind::Basic(BasicFormatter::Strikethrough),
    FormatterKind::Basic(BasicFormatter::RoundList),
    FormatterKind::Basic(BasicFormatter::NumericList),
    FormatterKind::Basic(BasicFormatter::NewLine),
    FormatterKind::Basic(BasicFormatter::HorizontalLine),
    FormatterKind::Basic(BasicFormatter::Selected),
    FormatterKind::Complex(ComplexFormatter::Link),
    FormatterKind::Complex(ComplexFormatter::Image),
    FormatterKind::Complex(ComplexFormatter::Code),
];

impl FormatterKind {
    pub fn name(self) -> &'static str {
        match self {
            FormatterKind::Basic(formatter) => formatter.name(),
            FormatterKind::Complex(formatter) => formatter.name(),
        }
    }

    /// Number of params the formatter takes. Basic formatters take none.
    pub fn arity(self) -> usize {
        match self {
            FormatterKind::Basic(_) => 0,
            FormatterKind::Complex(formatter) => formatter.arity(),
        }
    }

    /// Pair this formatter with `params`, checking the count.
    pub fn with_params(self, params: Vec<String>) -> Result<FormatAction, FormatError> {
        match self {
            FormatterKind::Basic(formatter) if params.is_empty() => {
                Ok(FormatAction::Basic(formatter))
            }
            FormatterKind::Basic(formatter) => Err(FormatError::Arity {
                formatter: formatter.name(),
                expected: 0,
                actual: params.len(),
            }),
            FormatterKind::Complex(formatter) => {
                formatter.check_arity(params.len())?;
                Ok(FormatAction::Complex(formatter, params))
            }
        }
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatterKind {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FORMATTERS
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FormatError::UnknownFormatter(s.to_owned()))
    }
}

/// A toolbar action ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatAction {
    Basic(BasicFormatter),
    Complex(ComplexFormatter, Vec<String>),
}

impl From<BasicFormatter> for FormatAction {
    fn from(formatter: BasicFormatter) -> Self {
        FormatAction::Basic(formatter)
    }
}

/// Marker table plus dispatch for every formatter.
#[derive(Debug, Clone, Default)]
pub struct Formatters {
    strings: MarkdownStrings,
}

impl Formatters {
    pub fn new(strings: MarkdownStrings) -> Self {
        Self { strings }
    }

    pub fn strings(&self) -> &MarkdownStrings {
        &self.strings
    }

    /// Resolve a formatter by name.
    pub fn lookup(name: &str) -> Result<FormatterKind, FormatError> {
        name.parse()
    }

    pub fn apply_basic(&self, formatter: BasicFormatter, state: &TextEditState) -> TextEditState {
        formatter.format(&self.strings, state)
    }

    pub fn apply_complex<S: AsRef<str>>(
        &self,
        formatter: ComplexFormatter,
        state: &TextEditState,
        params: &[S],
    ) -> Result<TextEditState, FormatError> {
        formatter.format(state, params)
    }

    /// Apply any action to `state`.
    pub fn apply(
        &self,
        action: &FormatAction,
        state: &TextEditState,
    ) -> Result<TextEditState, FormatError> {
        match action {
            FormatAction::Basic(formatter) => Ok(self.apply_basic(*formatter, state)),
            FormatAction::Complex(formatter, params) => {
                self.apply_complex(*formatter, state, params.as_slice())
            }
        }
    }
}
