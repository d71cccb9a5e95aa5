//! One network's assembled normalization tables.
#![forbid(unsafe_code)]

use std::sync::Arc;

use log::warn;
use ptcanon_core::{Line, LocationKind, NetworkId, PlacePair, Style};

use crate::{
    AbbreviationTable, CategoryRule, ConfigError, LineNormalizer, NameSplitter, NetworkConfig,
    NormalizeError, RawLine, SharedConfig, StyleResolver, StyleTable,
};

/// Tables shared by every adapter of one configuration.
#[derive(Debug, Clone, Default)]
pub struct SharedTables {
    /// Cross-network abbreviations.
    pub abbreviations: Arc<AbbreviationTable>,
    /// Cross-network styles.
    pub styles: Arc<StyleTable>,
}

impl SharedTables {
    /// Build the shared tables.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when an abbreviation or style entry is
    /// invalid.
    pub fn from_config(config: &SharedConfig) -> Result<Self, ConfigError> {
        let extra = AbbreviationTable::new(
            config
                .abbreviations
                .iter()
                .map(|(key, abbreviation)| (key, abbreviation.clone())),
        )?;
        let abbreviations = if config.standard_abbreviations {
            AbbreviationTable::standard().extended_with(&extra)
        } else {
            extra
        };
        Ok(Self {
            abbreviations: Arc::new(abbreviations),
            styles: Arc::new(StyleTable::new(&config.styles)?),
        })
    }

    /// The built-in abbreviations and no shared styles.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            abbreviations: Arc::new(AbbreviationTable::standard()),
            styles: Arc::new(StyleTable::default()),
        }
    }
}

/// Normalizer, splitter and style resolver of one network.
///
/// All tables are built at construction and never change afterwards, so an
/// adapter can be shared freely across threads.
///
/// # Examples
/// ```
/// use ptcanon_core::{LocationKind, Product};
/// use ptcanon_normalize::{Adapter, NetworkConfig, ProductIndexTable, RawLine, SharedTables};
///
/// let config = NetworkConfig::new(
///     "demo".parse()?,
///     ProductIndexTable::new(vec![None, Some(Product::Bus)])?,
/// );
/// let adapter = Adapter::from_config(&config, &SharedTables::standard())?;
/// let line = adapter.normalize_line(&RawLine {
///     mode: Some(1),
///     symbol: Some("42".into()),
///     ..RawLine::default()
/// })?;
/// assert_eq!(line.product, Some(Product::Bus));
/// assert_eq!(adapter.split_name(LocationKind::Station, "Rathaus").name, "Rathaus");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Adapter {
    normalizer: LineNormalizer,
    splitter: NameSplitter,
    styles: StyleResolver,
}

impl Adapter {
    /// Build every table of a network.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a rule, place list, rewrite table,
    /// abbreviation or style in `config` is invalid.
    pub fn from_config(config: &NetworkConfig, shared: &SharedTables) -> Result<Self, ConfigError> {
        let rules = config
            .category_rules
            .iter()
            .map(CategoryRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let normalizer = LineNormalizer::new(
            config.id.clone(),
            config.product_index.clone(),
            Arc::clone(&shared.abbreviations),
        )
        .with_rules(rules)
        .with_abbreviations(config.abbreviation_table()?)
        .with_refine(config.refine.clone());
        Ok(Self {
            normalizer,
            splitter: NameSplitter::new(&config.names)?,
            styles: StyleResolver::new(
                StyleTable::new(&config.styles)?,
                Arc::clone(&shared.styles),
            ),
        })
    }

    /// Network identifier.
    #[must_use]
    pub const fn id(&self) -> &NetworkId {
        self.normalizer.network()
    }

    /// Classify one raw line.
    ///
    /// # Errors
    /// See [`LineNormalizer::normalize`].
    pub fn normalize_line(&self, raw: &RawLine) -> Result<Line, NormalizeError> {
        self.normalizer.normalize(raw)
    }

    /// Classify a batch; a failing item does not stop its siblings.
    #[must_use]
    pub fn normalize_lines(&self, raws: &[RawLine]) -> Vec<Result<Line, NormalizeError>> {
        raws.iter()
            .map(|raw| {
                self.normalize_line(raw).inspect_err(|err| {
                    warn!("skipping line: {err}");
                })
            })
            .collect()
    }

    /// Split one display string.
    #[must_use]
    pub fn split_name(&self, kind: LocationKind, raw: &str) -> PlacePair {
        self.splitter.split(kind, raw)
    }

    /// Split a batch of display strings of one kind.
    #[must_use]
    pub fn split_names<S: AsRef<str>>(&self, kind: LocationKind, raws: &[S]) -> Vec<PlacePair> {
        raws.iter()
            .map(|raw| self.split_name(kind, raw.as_ref()))
            .collect()
    }

    /// Style of a canonical line.
    #[must_use]
    pub fn resolve_style(&self, line: &Line) -> Style {
        self.styles.resolve(line)
    }

    /// Style for a raw key when no line is available.
    #[must_use]
    pub fn resolve_style_key(&self, key: &str) -> Style {
        self.styles.resolve_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Abbreviation, ProductIndexTable};
    use ptcanon_core::Product;
    use rstest::rstest;
    use std::collections::BTreeMap;

    #[rstest]
    fn shared_overrides_extend_the_standard_table() {
        let config = SharedConfig {
            abbreviations: BTreeMap::from([(
                "ZZ".to_owned(),
                Abbreviation::new(Product::Ferry, Some("ZZ")),
            )]),
            ..SharedConfig::default()
        };
        let tables = SharedTables::from_config(&config).unwrap();
        assert!(tables.abbreviations.get("zz").is_some());
        assert!(tables.abbreviations.get("ICE").is_some());
    }

    #[rstest]
    fn standard_table_can_be_disabled() {
        let config = SharedConfig {
            standard_abbreviations: false,
            ..SharedConfig::default()
        };
        let tables = SharedTables::from_config(&config).unwrap();
        assert!(tables.abbreviations.is_empty());
    }

    #[rstest]
    fn batch_keeps_going_after_failures() {
        let config = NetworkConfig::new(
            "demo".parse().unwrap(),
            ProductIndexTable::new(vec![Some(Product::Bus)]).unwrap(),
        );
        let adapter = Adapter::from_config(&config, &SharedTables::standard()).unwrap();
        let raws = [
            RawLine {
                mode: Some(0),
                symbol: Some("1".into()),
                ..RawLine::default()
            },
            RawLine {
                mode: Some(9),
                ..RawLine::default()
            },
            RawLine {
                mode: Some(0),
                symbol: Some("2".into()),
                ..RawLine::default()
            },
        ];
        let results = adapter.normalize_lines(&raws);
        assert_eq!(results.len(), 3);
        assert!(results.first().unwrap().is_ok());
        assert!(results.get(1).unwrap().is_err());
        assert!(results.get(2).unwrap().is_ok());
    }
}
