//! Serde models for network configuration files.
//!
//! A configuration file is a JSON document:
//!
//! ```json
//! {
//!   "shared": { "styles": { "BN": { "background": "#000050" } } },
//!   "networks": [
//!     {
//!       "id": "avv",
//!       "product_index": [null, "HIGH_SPEED_TRAIN", "REGIONAL_TRAIN", "BUS"],
//!       "names": {
//!         "station": {
//!           "places": { "entries": [{ "alias": "AC", "place": "Aachen" }] }
//!         }
//!       }
//!     }
//!   ]
//! }
//! ```
#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufReader;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use ptcanon_core::{NetworkId, Product};
use serde::{Deserialize, Serialize};

use crate::normalizer::default_refine;
use crate::{
    Abbreviation, AbbreviationTable, CategoryRuleConfig, ConfigError, NameConfig,
    ProductIndexTable, StyleConfig,
};

/// Static configuration of one upstream network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network identifier.
    pub id: NetworkId,
    /// Product for each raw mode ordinal.
    pub product_index: ProductIndexTable,
    /// Coarse products refined through the abbreviation tables.
    #[serde(default = "default_refine")]
    pub refine: BTreeSet<Product>,
    /// Category rules, tried in order before any table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category_rules: Vec<CategoryRuleConfig>,
    /// Network abbreviations, consulted before the shared table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub abbreviations: BTreeMap<String, Abbreviation>,
    /// Name split rules per location kind.
    #[serde(default)]
    pub names: NameConfig,
    /// Style overrides keyed `network|<code><label>`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, StyleConfig>,
}

impl NetworkConfig {
    /// Minimal configuration: a product table and defaults elsewhere.
    #[must_use]
    pub fn new(id: NetworkId, product_index: ProductIndexTable) -> Self {
        Self {
            id,
            product_index,
            refine: default_refine(),
            category_rules: Vec::new(),
            abbreviations: BTreeMap::new(),
            names: NameConfig::default(),
            styles: BTreeMap::new(),
        }
    }

    pub(crate) fn abbreviation_table(&self) -> Result<AbbreviationTable, ConfigError> {
        AbbreviationTable::new(
            self.abbreviations
                .iter()
                .map(|(key, abbreviation)| (key, abbreviation.clone())),
        )
    }
}

/// Tables shared by every network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Start from the built-in table of common European categories.
    #[serde(default = "enabled")]
    pub standard_abbreviations: bool,
    /// Extra or replacement shared abbreviations.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub abbreviations: BTreeMap<String, Abbreviation>,
    /// Shared styles keyed `<code><label>`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, StyleConfig>,
}

const fn enabled() -> bool {
    true
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            standard_abbreviations: true,
            abbreviations: BTreeMap::new(),
            styles: BTreeMap::new(),
        }
    }
}

/// A whole configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Shared tables.
    #[serde(default)]
    pub shared: SharedConfig,
    /// Per-network configuration.
    pub networks: Vec<NetworkConfig>,
}

impl ConfigFile {
    /// Configuration of one network, if present.
    #[must_use]
    pub fn network(&self, id: &NetworkId) -> Option<&NetworkConfig> {
        self.networks.iter().find(|network| &network.id == id)
    }
}

/// Load a configuration document from disk.
///
/// # Errors
/// Returns [`ConfigError::ReadFile`] when the file cannot be opened and
/// [`ConfigError::Decode`] when it is not a valid document.
pub fn load_config_file(path: &Utf8Path) -> Result<ConfigFile, ConfigError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        }
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
