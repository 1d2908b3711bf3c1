use std::path::PathBuf;

use clap::builder::styling::AnsiColor;
use clap::builder::styling::Effects;
use clap::builder::Styles;
use clap::Parser;

use crate::commands::analyze::AnalyzeCommand;
use crate::commands::inspect::InspectCommand;

pub mod analyze;
pub mod inspect;

/// Styling for the Atelier CLI.
pub const CLAP_STYLING: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default())
    .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
    .valid(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .invalid(AnsiColor::Yellow.on_default().effects(Effects::BOLD));

/// The Atelier CLI command.
#[derive(Parser, Debug)]
pub enum AtelierCommand {
    /// Open a workspace, run the dependency closure over a seed, and print a summary.
    #[command(name = "analyze")]
    Analyze(AnalyzeCommand),
    /// Dump a class's merged meta as JSON.
    #[command(name = "inspect")]
    Inspect(InspectCommand),
}

#[derive(Parser, Debug)]
#[command(
    version,
    author,
    styles = CLAP_STYLING,
    about = "Atelier: an incremental class analyser for class-based front-end framework libraries."
)]
pub struct CliArguments {
    /// The workspace directory to analyse. Defaults to the current working directory.
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// The subcommand to execute.
    #[clap(subcommand)]
    pub command: AtelierCommand,
}
