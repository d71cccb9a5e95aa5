//! Lines command implementation for the ptcanon CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ptcanon_core::{Line, Style};
use ptcanon_normalize::RawLine;
use serde::{Deserialize, Serialize};

use crate::selection::{CommandEnv, Selection, load_input, write_output};
use crate::{ARG_NETWORK, ARG_NETWORKS, CliError};

pub(crate) const ENV: CommandEnv = CommandEnv {
    input: "PTCANON_CMDS_LINES_INPUT",
    networks: "PTCANON_CMDS_LINES_NETWORKS",
    network: "PTCANON_CMDS_LINES_NETWORK",
};

/// CLI arguments for the `lines` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Classify raw line records with the selected network's \
                 adapter. The input is a JSON array of raw line objects \
                 (mode, symbol, short_name, category_type and friends); \
                 every record yields either a canonical line with its \
                 style or the reason it was rejected.",
    about = "Classify raw lines and resolve their styles"
)]
#[ortho_config(prefix = "PTCANON")]
pub(crate) struct LinesArgs {
    /// Path to a JSON array of raw line records.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Path to the network configuration file.
    #[arg(long = ARG_NETWORKS, value_name = "path")]
    #[serde(default)]
    pub(crate) networks: Option<Utf8PathBuf>,
    /// Identifier of the network whose adapter classifies the lines.
    #[arg(long = ARG_NETWORK, value_name = "id")]
    #[serde(default)]
    pub(crate) network: Option<String>,
}

impl LinesArgs {
    fn into_config(self) -> Result<LinesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LinesConfig::try_from(merged)
    }
}

/// Resolved `lines` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinesConfig {
    pub(crate) selection: Selection,
}

impl TryFrom<LinesArgs> for LinesConfig {
    type Error = CliError;

    fn try_from(args: LinesArgs) -> Result<Self, Self::Error> {
        let selection = Selection::resolve(args.input, args.networks, args.network, ENV)?;
        Ok(Self { selection })
    }
}

/// Outcome for one raw line record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub(crate) enum LineReport {
    /// The record was classified.
    Normalized {
        /// Canonical line.
        line: Line,
        /// Resolved badge style.
        style: Style,
    },
    /// The record could not be classified.
    Rejected {
        /// Human-readable reason.
        error: String,
    },
}

pub(crate) fn run_lines(args: LinesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let reports = execute_lines(&config)?;
    write_output(writer, &reports)
}

pub(crate) fn execute_lines(config: &LinesConfig) -> Result<Vec<LineReport>, CliError> {
    let adapter = config.selection.adapter()?;
    let raws: Vec<RawLine> = load_input(&config.selection.input)?;
    let reports: Vec<LineReport> = adapter
        .normalize_lines(&raws)
        .into_iter()
        .map(|outcome| {
            outcome.map_or_else(
                |err| LineReport::Rejected {
                    error: err.to_string(),
                },
                |line| {
                    let style = adapter.resolve_style(&line);
                    LineReport::Normalized { line, style }
                },
            )
        })
        .collect();
    let rejected = reports
        .iter()
        .filter(|report| matches!(report, LineReport::Rejected { .. }))
        .count();
    info!(
        "classified {} of {} lines for network '{}'",
        reports.len() - rejected,
        reports.len(),
        adapter.id()
    );
    Ok(reports)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<LinesConfig, CliError> {
    let merged = LinesArgs::merge_from_layers(layers).map_err(CliError::from)?;
    LinesConfig::try_from(merged)
}
