//! Style command implementation for the ptcanon CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ptcanon_core::Style;
use serde::{Deserialize, Serialize};

use crate::selection::{CommandEnv, Selection, load_input, write_output};
use crate::{ARG_NETWORK, ARG_NETWORKS, CliError};

pub(crate) const ENV: CommandEnv = CommandEnv {
    input: "PTCANON_CMDS_STYLE_INPUT",
    networks: "PTCANON_CMDS_STYLE_NETWORKS",
    network: "PTCANON_CMDS_STYLE_NETWORK",
};

/// CLI arguments for the `style` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Look up raw style keys such as \"SS1\" or \"vbb|UU2\" in \
                 the selected network's overrides and the shared table. \
                 The input is a JSON array of keys; unknown keys resolve \
                 to the fallback style.",
    about = "Resolve raw style keys"
)]
#[ortho_config(prefix = "PTCANON")]
pub(crate) struct StyleArgs {
    /// Path to a JSON array of style keys.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Path to the network configuration file.
    #[arg(long = ARG_NETWORKS, value_name = "path")]
    #[serde(default)]
    pub(crate) networks: Option<Utf8PathBuf>,
    /// Identifier of the network whose overrides apply.
    #[arg(long = ARG_NETWORK, value_name = "id")]
    #[serde(default)]
    pub(crate) network: Option<String>,
}

impl StyleArgs {
    fn into_config(self) -> Result<StyleCommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StyleCommandConfig::try_from(merged)
    }
}

/// Resolved `style` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyleCommandConfig {
    pub(crate) selection: Selection,
}

impl TryFrom<StyleArgs> for StyleCommandConfig {
    type Error = CliError;

    fn try_from(args: StyleArgs) -> Result<Self, Self::Error> {
        let selection = Selection::resolve(args.input, args.networks, args.network, ENV)?;
        Ok(Self { selection })
    }
}

/// A style key and the style it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct StyleReport {
    /// Key as given.
    pub(crate) key: String,
    /// Resolved style.
    pub(crate) style: Style,
}

pub(crate) fn run_style(args: StyleArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let reports = execute_style(&config)?;
    write_output(writer, &reports)
}

pub(crate) fn execute_style(config: &StyleCommandConfig) -> Result<Vec<StyleReport>, CliError> {
    let adapter = config.selection.adapter()?;
    let keys: Vec<String> = load_input(&config.selection.input)?;
    Ok(keys
        .into_iter()
        .map(|key| {
            let style = adapter.resolve_style_key(&key);
            StyleReport { key, style }
        })
        .collect())
}
