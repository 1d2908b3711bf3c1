//! Atelier — an incremental class analyser for class-based front-end
//! framework libraries.
//!
//! # Architecture
//!
//! - **Command layer** ([`commands`]): CLI argument parsing and dispatch.
//! - **Configuration layer** ([`config`]): loading `atelier.toml` and
//!   `ATELIER_`-prefixed environment variables.
//! - **Core**: the `atelier-analyzer` library crate drives the actual
//!   dependency closure, compile dispatch, meta merge, and descendant fixup;
//!   this binary is a thin driver over it, not a reimplementation.
//!
//! # Error handling
//!
//! Errors are logged via [`tracing`] and turned into a non-zero exit code;
//! nothing panics outside of tests.

use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::AtelierCommand;
use crate::commands::CliArguments;
use crate::config::Configuration;
use crate::error::Error;

mod commands;
mod config;
mod error;

pub fn main() -> ExitCode {
    run().unwrap_or_else(|error| {
        tracing::error!("{error}");
        ExitCode::FAILURE
    })
}

pub fn run() -> Result<ExitCode, Error> {
    let arguments = CliArguments::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("ATELIER_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let workspace = resolve_workspace(arguments.workspace)?;
    let configuration = Configuration::load(&workspace)?;

    match arguments.command {
        AtelierCommand::Analyze(cmd) => cmd.execute(workspace, configuration)?,
        AtelierCommand::Inspect(cmd) => cmd.execute(workspace, configuration)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn resolve_workspace(workspace: Option<PathBuf>) -> Result<PathBuf, Error> {
    let workspace = workspace.unwrap_or_else(|| PathBuf::from("."));
    canonicalize(&workspace)
}

fn canonicalize(path: &Path) -> Result<PathBuf, Error> {
    path.canonicalize().map_err(|error| Error::CanonicalizingPath(path.to_path_buf(), error))
}
