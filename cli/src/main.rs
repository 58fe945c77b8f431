//! `image-composer` binary: composite an image onto a background, or add text.
//!
//! Resolves the background (prompting when several candidates exist),
//! validates options, then hands a [`Request`] to the core library.

mod args;
mod config;
mod discovery;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use image_composer::{ComposerError, Request};
use tracing_subscriber::EnvFilter;

use args::Cli;
use config::AppConfig;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    config::load_dotenv();
    let config = AppConfig::from_env();

    match run(cli, &config) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<String> {
    let background = resolve_background(cli.background.clone(), config)?;
    if !background.exists() {
        return Err(ComposerError::InputNotFound(background).into());
    }

    if let Some(parent) = cli.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let request = cli.into_request(background, config)?;
    let written = image_composer::execute(&request, &config.text)?;

    Ok(match request {
        Request::Composite(_) => format!("Composite complete: {}", written.display()),
        Request::Text(_) => format!("Text added: {}", written.display()),
    })
}

fn resolve_background(explicit: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let chosen = discovery::discover_background(&config.images_dir, &mut stdin.lock(), &mut stdout)?;
    Ok(chosen)
}
