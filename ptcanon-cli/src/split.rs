//! Split command implementation for the ptcanon CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ptcanon_core::{LocationKind, PlacePair};
use serde::{Deserialize, Serialize};

use crate::selection::{CommandEnv, Selection, load_input, write_output};
use crate::{ARG_KIND, ARG_NETWORK, ARG_NETWORKS, CliError};

pub(crate) const ENV: CommandEnv = CommandEnv {
    input: "PTCANON_CMDS_SPLIT_INPUT",
    networks: "PTCANON_CMDS_SPLIT_NETWORKS",
    network: "PTCANON_CMDS_SPLIT_NETWORK",
};

/// Location kinds accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum KindArg {
    /// Stops and stations.
    #[default]
    Station,
    /// Points of interest.
    Poi,
    /// Street addresses.
    Address,
}

impl From<KindArg> for LocationKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Station => Self::Station,
            KindArg::Poi => Self::Poi,
            KindArg::Address => Self::Address,
        }
    }
}

/// CLI arguments for the `split` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Split combined display strings into place and name parts \
                 using the selected network's rules. The input is a JSON \
                 array of strings.",
    about = "Split combined place and name display strings"
)]
#[ortho_config(prefix = "PTCANON")]
pub(crate) struct SplitArgs {
    /// Path to a JSON array of display strings.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Path to the network configuration file.
    #[arg(long = ARG_NETWORKS, value_name = "path")]
    #[serde(default)]
    pub(crate) networks: Option<Utf8PathBuf>,
    /// Identifier of the network whose split rules apply.
    #[arg(long = ARG_NETWORK, value_name = "id")]
    #[serde(default)]
    pub(crate) network: Option<String>,
    /// Kind of location the strings name (defaults to station).
    #[arg(long = ARG_KIND, value_enum, value_name = "kind")]
    #[serde(default)]
    pub(crate) kind: Option<KindArg>,
}

impl SplitArgs {
    fn into_config(self) -> Result<SplitConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SplitConfig::try_from(merged)
    }
}

/// Resolved `split` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SplitConfig {
    pub(crate) selection: Selection,
    pub(crate) kind: LocationKind,
}

impl TryFrom<SplitArgs> for SplitConfig {
    type Error = CliError;

    fn try_from(args: SplitArgs) -> Result<Self, Self::Error> {
        let selection = Selection::resolve(args.input, args.networks, args.network, ENV)?;
        let kind = args.kind.unwrap_or_default().into();
        Ok(Self { selection, kind })
    }
}

pub(crate) fn run_split(args: SplitArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let pairs = execute_split(&config)?;
    write_output(writer, &pairs)
}

pub(crate) fn execute_split(config: &SplitConfig) -> Result<Vec<PlacePair>, CliError> {
    let adapter = config.selection.adapter()?;
    let names: Vec<String> = load_input(&config.selection.input)?;
    Ok(adapter.split_names(config.kind, &names))
}
