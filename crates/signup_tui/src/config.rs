//! Runtime configuration for `signup_tui`.
//!
//! [`Config`] is the single source of truth for settings. It starts from
//! defaults, is overlaid with an optional TOML file, and finally with the
//! command line.
//!
//! ```toml
//! url = "http://localhost/signup"
//! location_file = ".signup-location"
//! output = "submissions.jsonl"
//! alt_screen = false
//! verbosity = 1
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Location used when neither the command line, the config file nor a
/// location file provides one.
pub const DEFAULT_URL: &str = "http://localhost/";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Starting location; wins over the location file.
    pub url: Option<String>,

    /// File persisting the location between runs.
    pub location_file: Option<PathBuf>,

    /// File successful submissions are appended to.
    pub output: Option<PathBuf>,

    /// File logs are written to. Without one, logging is off.
    pub log_file: Option<PathBuf>,

    /// Whether to draw in the alternate screen buffer.
    pub alt_screen: bool,

    /// Log verbosity (0=warn, 1=info, 2=debug, 3+=trace).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            location_file: None,
            output: None,
            log_file: None,
            alt_screen: true,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigRead`] or [`Error::ConfigParse`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the configuration from the command line, reading the config
    /// file it names, and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or a setting is
    /// invalid.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        let config = base.merge_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Overlays command-line values onto this config.
    #[must_use]
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if cli.url.is_some() {
            self.url.clone_from(&cli.url);
        }
        if cli.location_file.is_some() {
            self.location_file.clone_from(&cli.location_file);
        }
        if cli.output.is_some() {
            self.output.clone_from(&cli.output);
        }
        if cli.log_file.is_some() {
            self.log_file.clone_from(&cli.log_file);
        }
        if cli.no_alt_screen {
            self.alt_screen = false;
        }
        self.verbosity = self.verbosity.max(cli.verbose);
        self
    }

    /// Checks that the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] if `url` is not an absolute URL.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.url {
            Url::parse(url).map_err(|e| Error::InvalidSetting {
                name: "url",
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Default `tracing` filter directive for the configured verbosity.
    #[must_use]
    pub fn filter_directive(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// The configuration as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
