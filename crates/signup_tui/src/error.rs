//! Error types for the terminal front end.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the terminal front end.
#[derive(Error, Debug)]
pub enum Error {
    /// Terminal or file I/O failed.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`Config`](crate::Config).
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        /// Path of the config file.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: toml::de::Error,
    },

    /// A resolved setting is unusable.
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting {
        /// Setting name as written in the config file.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The form library rejected an operation.
    #[error(transparent)]
    Form(#[from] signup::FormError),

    /// The log subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// A specialized [`Result`] type for the terminal front end.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_setting_display() {
        let err = Error::InvalidSetting {
            name: "url",
            reason: "relative URL without a base".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid setting url: relative URL without a base"
        );
    }

    #[test]
    fn form_errors_are_transparent() {
        let err: Error = signup::FormError::query("boom").into();
        assert_eq!(err.to_string(), "query adapter error: boom");
    }
}
