//! Option resolution and JSON I/O shared by every subcommand.

use std::io::{BufReader, Write};
use std::num::NonZeroUsize;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use log::debug;
use ptcanon_core::NetworkId;
use ptcanon_normalize::{Adapter, AdapterRegistry, load_config_file};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ARG_INPUT, ARG_NETWORK, ARG_NETWORKS, CliError};

/// Environment variables that can supply a subcommand's shared options.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CommandEnv {
    pub(crate) input: &'static str,
    pub(crate) networks: &'static str,
    pub(crate) network: &'static str,
}

/// Options every subcommand needs once configuration layers are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selection {
    /// JSON input document.
    pub(crate) input: Utf8PathBuf,
    /// Network configuration file.
    pub(crate) networks: Utf8PathBuf,
    /// Network to run the inputs through.
    pub(crate) network: String,
}

impl Selection {
    pub(crate) fn resolve(
        input: Option<Utf8PathBuf>,
        networks: Option<Utf8PathBuf>,
        network: Option<String>,
        env: CommandEnv,
    ) -> Result<Self, CliError> {
        let input = input.ok_or(CliError::MissingArgument {
            field: ARG_INPUT,
            env: env.input,
        })?;
        let networks = networks.ok_or(CliError::MissingArgument {
            field: ARG_NETWORKS,
            env: env.networks,
        })?;
        let network = network.ok_or(CliError::MissingArgument {
            field: ARG_NETWORK,
            env: env.network,
        })?;
        Ok(Self {
            input,
            networks,
            network,
        })
    }

    /// Load the configuration file and build the selected network's adapter.
    pub(crate) fn adapter(&self) -> Result<Arc<Adapter>, CliError> {
        let network: NetworkId = self.network.parse().map_err(|source| {
            CliError::InvalidNetwork {
                network: self.network.clone(),
                source,
            }
        })?;
        let config = load_config_file(&self.networks)?;
        let registry = AdapterRegistry::new(config, NonZeroUsize::MIN)?;
        let adapter = registry.get(&network)?;
        debug!("selected network '{network}' from {}", self.networks);
        Ok(adapter)
    }
}

/// Loads a JSON document from `path`.
pub(crate) fn load_input<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenInput {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `value` as pretty-printed JSON followed by a newline.
pub(crate) fn write_output<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
