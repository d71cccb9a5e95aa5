//! Error types emitted by the ptcanon CLI.
//!
//! Library errors are boxed so `Result<_, CliError>` stays small enough for
//! `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use ptcanon_core::NetworkIdError;
use ptcanon_normalize::{ConfigError, RegistryError};
use thiserror::Error;

/// Errors emitted by the ptcanon CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The selected network identifier is malformed.
    #[error("invalid network '{network}': {source}")]
    InvalidNetwork {
        /// The identifier as given.
        network: String,
        /// Validation failure.
        #[source]
        source: NetworkIdError,
    },
    /// The network configuration file could not be loaded.
    #[error("failed to load network configuration: {0}")]
    LoadNetworks(#[source] Box<ConfigError>),
    /// The selected network has no usable adapter.
    #[error("failed to select network: {0}")]
    SelectNetwork(#[source] Box<RegistryError>),
    /// Opening an input file failed.
    #[error("failed to open input at {path:?}: {source}")]
    OpenInput {
        /// Requested input path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// An input file was not the expected JSON document.
    #[error("failed to parse input at {path:?}: {source}")]
    ParseInput {
        /// Requested input path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::LoadNetworks(Box::new(err))
    }
}

impl From<RegistryError> for CliError {
    fn from(err: RegistryError) -> Self {
        Self::SelectNetwork(Box::new(err))
    }
}
