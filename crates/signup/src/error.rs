//! Error types for the signup form.

use thiserror::Error;

/// Errors raised by the signup form machinery.
///
/// Field validation failures are *not* represented here: they are ordinary
/// data carried in a [`ValidationResult`](crate::ValidationResult) and shown
/// next to the offending field. `FormError` covers misuse of the API and
/// failures of the collaborators around the form (the query adapter and the
/// submit sink).
///
/// # Recovery Strategies
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`UnknownField`](FormError::UnknownField) | Caller bug, report it |
/// | [`KindMismatch`](FormError::KindMismatch) | Caller bug, report it |
/// | [`Query`](FormError::Query) | Log and keep editing, the address bar is a mirror only |
/// | [`InvalidUrl`](FormError::InvalidUrl) | Fall back to a bare location |
/// | [`Sink`](FormError::Sink) | Handled by the sink itself |
///
/// # Note on Clone and PartialEq
///
/// Like the rest of the form state this error is `Clone + PartialEq`, so the
/// I/O flavoured variants carry a message instead of the source error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A field name that is not part of the signup form.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A value of the wrong shape was given to a field, for example a
    /// boolean for a text input.
    #[error("field {field} expects a {expected} value")]
    KindMismatch {
        /// The field that rejected the value.
        field: &'static str,
        /// The kind of value the field stores.
        expected: &'static str,
    },

    /// Reading or rewriting the location's query string failed.
    #[error("query adapter error: {0}")]
    Query(String),

    /// The location could not be parsed as an absolute URL.
    #[error("invalid location url: {0}")]
    InvalidUrl(String),

    /// The submit sink could not deliver a record.
    #[error("sink error: {0}")]
    Sink(String),
}

impl FormError {
    /// Creates a query adapter error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Creates a sink error with the given message.
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink(message.into())
    }

    /// Returns true if the error came from the query adapter.
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_) | Self::InvalidUrl(_))
    }

    /// Returns true if the error is a programming mistake by the caller
    /// rather than an environmental failure.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::UnknownField(_) | Self::KindMismatch { .. })
    }
}

impl From<url::ParseError> for FormError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// A specialized [`Result`] type for signup form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            FormError::UnknownField("age".into()).to_string(),
            "unknown field: age"
        );
        assert_eq!(
            FormError::KindMismatch {
                field: "acceptedTerms",
                expected: "boolean"
            }
            .to_string(),
            "field acceptedTerms expects a boolean value"
        );
        assert_eq!(
            FormError::query("history unavailable").to_string(),
            "query adapter error: history unavailable"
        );
    }

    #[test]
    fn classification() {
        assert!(FormError::query("x").is_query());
        assert!(FormError::InvalidUrl("x".into()).is_query());
        assert!(!FormError::sink("x").is_query());
        assert!(FormError::UnknownField("x".into()).is_usage());
        assert!(!FormError::sink("x").is_usage());
    }

    #[test]
    fn from_url_parse_error() {
        let err: FormError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, FormError::InvalidUrl(_)));
    }
}
