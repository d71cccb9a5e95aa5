//! Per-network normalization of raw transit data.
//!
//! Protocol clients hand over already-extracted raw fields; an [`Adapter`]
//! turns them into canonical [`ptcanon_core`] values:
//!
//! - [`LineNormalizer`] classifies raw mode indices and category hints into
//!   [`ptcanon_core::Line`]s.
//! - [`NameSplitter`] splits combined display strings into
//!   [`ptcanon_core::PlacePair`]s.
//! - [`StyleResolver`] assigns every line a [`ptcanon_core::Style`].
//!
//! Adapters are built once from a [`NetworkConfig`] and are read-only
//! afterwards. [`AdapterRegistry`] keeps a bounded set of them alive.

#![forbid(unsafe_code)]

mod abbreviation;
mod adapter;
mod category;
mod config;
mod error;
mod hints;
mod normalizer;
mod product_table;
mod registry;
mod splitter;
mod style;

pub use abbreviation::{Abbreviation, AbbreviationTable};
pub use adapter::{Adapter, SharedTables};
pub use category::{
    CategoryRule, CategoryRuleConfig, ConditionConfig, LabelPart, MatcherConfig, RuleOutcome,
};
pub use config::{ConfigFile, NetworkConfig, SharedConfig, load_config_file};
pub use error::{ConfigError, NormalizeError};
pub use hints::{HintField, RawLine};
pub use normalizer::{LineNormalizer, default_refine};
pub use product_table::{OutOfRange, ProductIndexTable};
pub use registry::{AdapterRegistry, DEFAULT_CAPACITY, RegistryError};
pub use splitter::{
    CommaSplit, GroupOrder, NameConfig, NameRewrites, NameSplitConfig, NameSplitter, PlaceEntry,
    PlaceList, PlaceListConfig, PlacePosition, SplitTemplate,
};
pub use style::{NETWORK_SEPARATOR, StyleConfig, StyleResolver, StyleTable, default_style};

#[cfg(test)]
mod tests;
