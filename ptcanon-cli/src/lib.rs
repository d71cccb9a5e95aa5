//! Command-line interface for inspecting ptcanon network configurations.
//!
//! Each subcommand loads a network configuration file, selects one network
//! and runs a batch of raw inputs through its adapter, printing the
//! canonical results as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod lines;
mod selection;
mod split;
mod style;

pub use error::CliError;

use lines::LinesArgs;
use split::SplitArgs;
use style::StyleArgs;

const ARG_INPUT: &str = "input";
const ARG_NETWORKS: &str = "networks";
const ARG_NETWORK: &str = "network";
const ARG_KIND: &str = "kind";

/// Run the ptcanon CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Lines(args) => lines::run_lines(args, &mut stdout),
        Command::Split(args) => split::run_split(args, &mut stdout),
        Command::Style(args) => style::run_style(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "ptcanon",
    about = "Inspect how a network configuration normalizes transit data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify raw lines and resolve their styles.
    Lines(LinesArgs),
    /// Split combined place and name display strings.
    Split(SplitArgs),
    /// Resolve raw style keys.
    Style(StyleArgs),
}

#[cfg(test)]
mod tests;
