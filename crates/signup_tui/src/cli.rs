//! Command-line interface for `signup_tui`.
//!
//! # Examples
//!
//! ```bash
//! # Start with an email already filled in
//! signup_tui --url 'http://localhost/?email=al%40example.com'
//!
//! # Keep the address bar between runs and append submissions to a file
//! signup_tui --location-file .signup-location --output submissions.jsonl
//!
//! # Render once without a terminal (for CI)
//! signup_tui --self-check
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Signup form in the terminal.
///
/// Fields are prefilled from the query string of the location and every
/// edit is mirrored back into it.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "signup_tui",
    author,
    version,
    about = "Signup form in the terminal"
)]
pub struct Cli {
    /// Location to start from, e.g. `http://localhost/?firstName=John`
    #[arg(long, env = "SIGNUP_URL")]
    pub url: Option<String>,

    /// File holding the current location between runs
    ///
    /// Read at startup when --url is not given, rewritten on every edit
    #[arg(long, env = "SIGNUP_LOCATION_FILE")]
    pub location_file: Option<PathBuf>,

    /// File that successful submissions are appended to as JSON
    #[arg(long, short = 'o', env = "SIGNUP_OUTPUT")]
    pub output: Option<PathBuf>,

    /// File to write logs to
    #[arg(long, env = "SIGNUP_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, short = 'c', env = "SIGNUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run in the main terminal buffer
    #[arg(long, env = "SIGNUP_NO_ALT_SCREEN")]
    pub no_alt_screen: bool,

    /// Render the form once without a terminal and exit
    #[arg(long)]
    pub self_check: bool,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parses the process arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses from an iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Whether the program runs without a terminal. Headless runs never
    /// submit, so they leave the output file alone.
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.self_check || self.print_config
    }
}
