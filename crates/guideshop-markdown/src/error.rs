//! Error types for the markdown formatting core.

use miette::{Diagnostic, SourceSpan};

/// Errors raised when applying a formatter.
///
/// Both variants point at a caller bug (wrong dialog wiring, typo in a
/// formatter name), not at anything the user typed into the document.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A complex formatter received the wrong number of params.
    #[error("incorrect amount of params for `{formatter}`: must be {expected}, got {actual}")]
    #[diagnostic(code(guideshop::format::arity))]
    Arity {
        formatter: &'static str,
        expected: usize,
        actual: usize,
    },

    /// No formatter is registered under this name.
    #[error("unknown formatter `{0}`")]
    #[diagnostic(
        code(guideshop::format::unknown),
        help("run `guideshop-md list` to see the available formatters")
    )]
    UnknownFormatter(String),
}

/// Errors raised while loading marker overrides.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum ConfigError {
    /// The KDL document itself is malformed.
    #[error("failed to parse markdown config at offset {offset}: {reason}")]
    #[diagnostic(code(guideshop::config::parse))]
    Parse {
        reason: String,
        offset: usize,
        #[source_code]
        input: String,
        #[label("{label}")]
        span: SourceSpan,
        label: String,
        #[help]
        help: Option<String>,
    },

    /// A node parsed but its value cannot be used.
    #[error("invalid value for `{key}`: {reason}")]
    #[diagnostic(code(guideshop::config::value))]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_owned(),
            reason: reason.into(),
        }
    }
}

// kdl reports through an older miette, so its span and help are copied over
// by hand to reach our report handler.
impl From<kdl::KdlError> for ConfigError {
    fn from(err: kdl::KdlError) -> Self {
        let offset = err.span.offset();
        Self::Parse {
            reason: err.kind.to_string(),
            offset,
            input: err.input,
            span: (offset, err.span.len()).into(),
            label: err.label.unwrap_or("here").to_owned(),
            help: err.help.map(str::to_owned),
        }
    }
}
