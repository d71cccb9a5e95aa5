//! Error types raised while normalizing lines or building adapters.
#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use ptcanon_core::NetworkId;
use thiserror::Error;

/// Errors raised while normalizing a single upstream line.
///
/// Failures are scoped to one item; batch helpers keep processing the
/// remaining items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// No category rule, network abbreviation or shared abbreviation matched.
    #[error("{network}: unrecognized category ({descriptor})")]
    UnrecognizedCategory {
        /// Network whose adapter rejected the line.
        network: NetworkId,
        /// Summary of the raw hints that failed to match.
        descriptor: String,
    },
    /// The raw mode index lies outside the configured product table.
    #[error("{network}: mode index {index} is outside the product table (size {len})")]
    UnmappedProductIndex {
        /// Network whose table was consulted.
        network: NetworkId,
        /// Raw index supplied by the upstream feed.
        index: u32,
        /// Number of entries in the table.
        len: usize,
    },
}

/// Errors raised while building adapter tables from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A product index table had no entries.
    #[error("product index table must not be empty")]
    EmptyProductTable,
    /// An abbreviation key was blank.
    #[error("abbreviation keys must not be blank")]
    EmptyAbbreviation,
    /// A category rule carried no conditions at all.
    #[error("category rule '{rule}' has no conditions and would match every line")]
    UnconditionalRule {
        /// Name of the offending rule.
        rule: String,
    },
    /// A category rule pattern failed to compile.
    #[error("category rule '{rule}' has an invalid pattern '{pattern}'")]
    InvalidPattern {
        /// Name of the offending rule.
        rule: String,
        /// The pattern as written.
        pattern: String,
        /// Source error from `regex`.
        #[source]
        source: regex::Error,
    },
    /// A literal place entry had a blank alias or place.
    #[error("place list entries must have a non-blank alias and place")]
    EmptyPlaceAlias,
    /// A literal place list configured no separators.
    #[error("place list must configure at least one separator")]
    NoSeparators,
    /// Two place list entries share an alias.
    #[error("place alias '{alias}' is listed more than once")]
    DuplicatePlace {
        /// The repeated alias.
        alias: String,
    },
    /// Two place list entries could both match the same input.
    #[error("place aliases '{first}' and '{second}' overlap")]
    AmbiguousPlaces {
        /// The shorter alias.
        first: String,
        /// The alias that extends it.
        second: String,
    },
    /// A name rewrite had a blank word or replacement.
    #[error("name rewrites must map a non-blank word to a non-blank replacement")]
    EmptyRewrite,
    /// A style entry had a blank key.
    #[error("style keys must not be blank")]
    EmptyStyleKey,
    /// Two networks in one configuration share an identifier.
    #[error("network '{network}' is configured more than once")]
    DuplicateNetwork {
        /// The repeated identifier.
        network: NetworkId,
    },
    /// Reading a configuration file failed.
    #[error("failed to read configuration file at {path}")]
    ReadFile {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Decoding a configuration file failed.
    #[error("failed to decode configuration file at {path}")]
    Decode {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}
