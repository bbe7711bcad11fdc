#![forbid(unsafe_code)]

//! # Signup TUI
//!
//! ```bash
//! cargo run -p signup_tui -- --url 'http://localhost/?firstName=John'
//! ```

use std::fs::OpenOptions;
use std::io::{self, Write};

use anyhow::Context;
use signup::{JsonSink, SignupForm};
use signup_tui::{App, Cli, Config, FileLocation, Model, Program, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = Config::resolve(&cli)?;

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    logging::init(&config)?;

    let location = FileLocation::open(config.location_file.as_deref(), config.url.as_deref())?;
    let writer: Box<dyn Write> = match &config.output {
        Some(path) if !cli.is_headless() => Box::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open output {}", path.display()))?,
        ),
        _ => Box::new(io::sink()),
    };

    let app = App::new(SignupForm::mount(location), JsonSink::new(writer));

    if cli.self_check {
        println!("{}", app.view());
        return Ok(());
    }

    let app = Program::new(app)
        .alt_screen(config.alt_screen)
        .run()
        .context("failed to run the signup form")?;

    tracing::info!(
        submissions = app.sink().written(),
        href = app.form().query().href(),
        "signup form closed"
    );
    Ok(())
}
