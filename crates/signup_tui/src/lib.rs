#![forbid(unsafe_code)]
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Signup TUI
//!
//! The signup form in the terminal.
//!
//! - [`program`]: a small Elm-architecture runtime over crossterm, plus a
//!   [`Simulator`](program::Simulator) for tests
//! - [`app`]: the form as a [`Model`](program::Model)
//! - [`location`]: a location persisted to a file, standing in for the
//!   address bar across restarts
//! - [`cli`], [`config`], [`logging`]: the process around it

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod location;
pub mod logging;
pub mod program;
pub mod view;

pub use app::{App, Focus};
pub use cli::Cli;
pub use config::{Config, DEFAULT_URL};
pub use error::{Error, Result};
pub use location::FileLocation;
pub use program::{Cmd, Key, Model, Msg, Program, Simulator};
