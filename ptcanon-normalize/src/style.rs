//! Style tables and the total style resolver.
//!
//! Keys follow the `<code><label>` convention, e.g. `SS1` for the suburban
//! line `S1` or `B` for every bus. Network overrides prefix keys with the
//! line's network, e.g. `vbb|SS1`.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use ptcanon_core::{Color, Line, Product, Shape, Style};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Separates the network from the style key.
pub const NETWORK_SEPARATOR: char = '|';

/// Key suffix shared by night buses, combined with the bus code as `BN`.
const NIGHT_BUS_MARKER: char = 'N';

/// One style as written in configuration.
///
/// Without a foreground, black or white is picked from the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Badge outline.
    #[serde(default)]
    pub shape: Shape,
    /// Primary fill color.
    pub background: Color,
    /// Second fill color for split badges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background2: Option<Color>,
    /// Text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    /// Outline color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Color>,
}

impl From<StyleConfig> for Style {
    fn from(config: StyleConfig) -> Self {
        let base = config.foreground.map_or_else(
            || Self::with_derived_foreground(config.shape, config.background),
            |foreground| Self::new(config.shape, config.background, foreground),
        );
        Self {
            background2: config.background2,
            border: config.border,
            ..base
        }
    }
}

/// Exact-key map from style key to [`Style`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTable {
    entries: BTreeMap<String, Style>,
}

impl StyleTable {
    /// Build a table from configured styles.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyStyleKey`] for a blank key.
    pub fn new(styles: &BTreeMap<String, StyleConfig>) -> Result<Self, ConfigError> {
        let mut entries = BTreeMap::new();
        for (key, config) in styles {
            let trimmed = key.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::EmptyStyleKey);
            }
            entries.insert(trimmed.to_owned(), Style::from(*config));
        }
        Ok(Self { entries })
    }

    /// Exact lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Style> {
        self.entries.get(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Default badge for each product.
///
/// `None` (filtered lines) gets [`Style::FALLBACK`].
#[must_use]
pub const fn default_style(product: Option<Product>) -> Style {
    match product {
        Some(Product::HighSpeedTrain) => {
            Style::new(Shape::Rect, Color::WHITE, Color::RED).with_border(Color::RED)
        }
        Some(Product::RegionalTrain) => Style::new(Shape::Rect, Color::GRAY, Color::WHITE),
        Some(Product::SuburbanTrain) => {
            Style::new(Shape::Circle, Color::rgb(0x00, 0x6e, 0x34), Color::WHITE)
        }
        Some(Product::Subway) => {
            Style::new(Shape::Rect, Color::rgb(0x00, 0x30, 0x90), Color::WHITE)
        }
        Some(Product::Tram) => Style::new(Shape::Rect, Color::rgb(0xcc, 0x00, 0x00), Color::WHITE),
        Some(Product::Bus) => Style::rounded(Color::rgb(0x99, 0x33, 0x99), Color::WHITE),
        Some(Product::OnDemand) => Style::rounded(Color::rgb(0x00, 0xa5, 0xdf), Color::WHITE),
        Some(Product::Ferry) => Style::new(Shape::Circle, Color::BLUE, Color::WHITE),
        Some(Product::Cablecar) => Style::rounded(Color::GRAY, Color::WHITE),
        None => Style::FALLBACK,
    }
}

/// Resolves lines to styles for one network. Resolution never fails.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use ptcanon_core::{Line, Product, Style};
/// use ptcanon_normalize::{StyleResolver, StyleTable, default_style};
///
/// let resolver = StyleResolver::new(StyleTable::default(), Arc::new(StyleTable::default()));
/// let line = Line::new(Some(Product::Bus), Some("42".into()));
/// assert_eq!(resolver.resolve(&line), default_style(Some(Product::Bus)));
/// assert_eq!(resolver.resolve_key("nowhere"), Style::FALLBACK);
/// ```
#[derive(Debug, Clone)]
pub struct StyleResolver {
    overrides: StyleTable,
    shared: Arc<StyleTable>,
}

impl StyleResolver {
    /// Combine a network's override table with the shared table.
    #[must_use]
    pub const fn new(overrides: StyleTable, shared: Arc<StyleTable>) -> Self {
        Self { overrides, shared }
    }

    /// Resolve the style of a canonical line.
    ///
    /// Network keys are consulted first, then the shared table, then the
    /// product default.
    #[must_use]
    pub fn resolve(&self, line: &Line) -> Style {
        let keys = candidate_keys(line);
        let from_network = line.network.as_deref().and_then(|network| {
            keys.iter().find_map(|key| {
                self.overrides
                    .get(&format!("{network}{NETWORK_SEPARATOR}{key}"))
            })
        });
        let resolved = from_network
            .or_else(|| keys.iter().find_map(|key| self.shared.get(key)))
            .copied();
        if resolved.is_none() {
            debug!("no style entry for '{}', using product default", line.style_key());
        }
        resolved.unwrap_or_else(|| default_style(line.product))
    }

    /// Resolve a raw style key when no full line is available.
    #[must_use]
    pub fn resolve_key(&self, key: &str) -> Style {
        let trimmed = key.trim();
        self.overrides
            .get(trimmed)
            .or_else(|| self.shared.get(trimmed))
            .copied()
            .unwrap_or(Style::FALLBACK)
    }
}

/// Keys from most to least specific: `<code><label>`, `BN` for night
/// buses, then `<code>`.
fn candidate_keys(line: &Line) -> Vec<String> {
    let code = line.product_code();
    let mut keys = Vec::with_capacity(3);
    if line.label.is_some() {
        keys.push(line.style_key());
    }
    let night_bus = line.product == Some(Product::Bus)
        && line
            .label
            .as_deref()
            .is_some_and(|label| label.starts_with(NIGHT_BUS_MARKER));
    if night_bus {
        keys.push(format!("{code}{NIGHT_BUS_MARKER}"));
    }
    keys.push(code.to_string());
    keys
}
