//! Facade crate for the ptcanon transit normalizer.
//!
//! This crate re-exports the canonical taxonomy and the per-network
//! normalization layer.

#![forbid(unsafe_code)]

pub use ptcanon_core::{
    Color, Line, LineAttr, LocationKind, NetworkId, PlacePair, Product, Shape, Style,
};

pub use ptcanon_normalize::{
    Adapter, AdapterRegistry, ConfigError, ConfigFile, LineNormalizer, NameSplitter,
    NetworkConfig, NormalizeError, RawLine, RegistryError, SharedConfig, StyleResolver,
    load_config_file,
};
