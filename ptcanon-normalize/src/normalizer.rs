//! Classify raw line hints into canonical [`Line`]s.
//!
//! Classification runs in a fixed order: network category rules, the raw
//! mode table and, when finer detail is needed, the abbreviation tables
//! (network entries before shared ones). A line nothing recognizes is an
//! error; it is never guessed.
#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, warn};
use ptcanon_core::{Line, NetworkId, Product};

use crate::abbreviation::{Abbreviation, AbbreviationTable};
use crate::category::{CategoryRule, RuleOutcome};
use crate::hints::{clean_label, leading_token};
use crate::product_table::{OutOfRange, ProductIndexTable};
use crate::{HintField, NormalizeError, RawLine};

/// Products refined through the abbreviation tables unless configured
/// otherwise.
#[must_use]
pub fn default_refine() -> BTreeSet<Product> {
    Product::ALL.into_iter().filter(|product| product.is_train()).collect()
}

/// Per-network line classifier.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use ptcanon_core::Product;
/// use ptcanon_normalize::{AbbreviationTable, LineNormalizer, ProductIndexTable, RawLine};
///
/// let table = ProductIndexTable::new(vec![Some(Product::HighSpeedTrain), Some(Product::Bus)])?;
/// let normalizer = LineNormalizer::new(
///     "efa-demo".parse()?,
///     table,
///     Arc::new(AbbreviationTable::standard()),
/// );
/// let raw = RawLine {
///     mode: Some(0),
///     category_type: Some("ICE".into()),
///     category_number: Some("599".into()),
///     ..RawLine::default()
/// };
/// let line = normalizer.normalize(&raw)?;
/// assert_eq!(line.product, Some(Product::HighSpeedTrain));
/// assert_eq!(line.label.as_deref(), Some("ICE599"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct LineNormalizer {
    network: NetworkId,
    rules: Vec<CategoryRule>,
    products: ProductIndexTable,
    refine: BTreeSet<Product>,
    abbreviations: AbbreviationTable,
    shared: Arc<AbbreviationTable>,
}

/// Where a classification came from, for logging.
enum Source<'a> {
    Rule(&'a str),
    ModeTable(u32),
    Abbreviation(&'a str),
}

impl LineNormalizer {
    /// Build a normalizer with no category rules, no network
    /// abbreviations and the default refine set.
    #[must_use]
    pub fn new(
        network: NetworkId,
        products: ProductIndexTable,
        shared: Arc<AbbreviationTable>,
    ) -> Self {
        Self {
            network,
            rules: Vec::new(),
            products,
            refine: default_refine(),
            abbreviations: AbbreviationTable::default(),
            shared,
        }
    }

    /// Append category rules, keeping configuration order.
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = CategoryRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Set the network's own abbreviation entries.
    #[must_use]
    pub fn with_abbreviations(mut self, abbreviations: AbbreviationTable) -> Self {
        self.abbreviations = abbreviations;
        self
    }

    /// Set the products refined through the abbreviation tables.
    #[must_use]
    pub fn with_refine(mut self, refine: BTreeSet<Product>) -> Self {
        self.refine = refine;
        self
    }

    /// Network this normalizer serves.
    #[must_use]
    pub const fn network(&self) -> &NetworkId {
        &self.network
    }

    /// Classify one raw line.
    ///
    /// # Errors
    /// Returns [`NormalizeError::UnmappedProductIndex`] when the raw mode
    /// lies outside the product table and
    /// [`NormalizeError::UnrecognizedCategory`] when refinement is required
    /// but no abbreviation matches.
    pub fn normalize(&self, raw: &RawLine) -> Result<Line, NormalizeError> {
        if let Some((rule, outcome)) = self
            .rules
            .iter()
            .find_map(|rule| rule.apply(raw).map(|outcome| (rule, outcome)))
        {
            return Ok(self.finish(raw, outcome, &Source::Rule(rule.name())));
        }

        if let Some(index) = raw.mode {
            let product = self.lookup(index)?;
            if !product.is_some_and(|coarse| self.refine.contains(&coarse)) {
                let outcome = RuleOutcome {
                    product,
                    label: raw.plain_label(),
                    attrs: BTreeSet::new(),
                };
                return Ok(self.finish(raw, outcome, &Source::ModeTable(index)));
            }
        }
        self.refine_by_abbreviation(raw)
    }

    fn lookup(&self, index: u32) -> Result<Option<Product>, NormalizeError> {
        self.products.lookup(index).map_err(|OutOfRange { len, .. }| {
            warn!(
                "{}: mode index {index} is outside the product table (size {len})",
                self.network
            );
            NormalizeError::UnmappedProductIndex {
                network: self.network.clone(),
                index,
                len,
            }
        })
    }

    fn refine_by_abbreviation(&self, raw: &RawLine) -> Result<Line, NormalizeError> {
        let candidates: Vec<&str> = [
            raw.hint(HintField::CategoryType),
            raw.hint(HintField::CategoryName),
            raw.hint(HintField::Symbol).and_then(leading_token),
            raw.hint(HintField::ShortName).and_then(leading_token),
        ]
        .into_iter()
        .flatten()
        .collect();
        let found = candidates
            .iter()
            .find_map(|key| self.abbreviations.get(key).map(|abbr| (*key, abbr)))
            .or_else(|| {
                candidates
                    .iter()
                    .find_map(|key| self.shared.get(key).map(|abbr| (*key, abbr)))
            });
        let Some((key, abbreviation)) = found else {
            return Err(NormalizeError::UnrecognizedCategory {
                network: self.network.clone(),
                descriptor: raw.describe(),
            });
        };
        let outcome = RuleOutcome {
            product: Some(abbreviation.product),
            label: abbreviation_label(abbreviation, raw, key),
            attrs: abbreviation.attrs.clone(),
        };
        Ok(self.finish(raw, outcome, &Source::Abbreviation(key)))
    }

    fn finish(&self, raw: &RawLine, outcome: RuleOutcome, source: &Source<'_>) -> Line {
        let network = raw
            .network
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.network.as_str());
        let mut line = Line::new(outcome.product, outcome.label).with_network(network);
        if let Some(id) = raw.id.as_deref() {
            line = line.with_id(id);
        }
        if let Some(name) = raw.hint(HintField::LongName) {
            line = line.with_name(name);
        }
        if let Some(message) = raw.message.as_deref().and_then(clean_label) {
            line = line.with_message(message);
        }
        line.attrs = outcome.attrs;
        log_decision(&self.network, raw, &line, source);
        line
    }
}

fn log_decision(network: &NetworkId, raw: &RawLine, line: &Line, source: &Source<'_>) {
    let via = match source {
        Source::Rule(name) => format!("rule '{name}'"),
        Source::ModeTable(index) => format!("mode table entry {index}"),
        Source::Abbreviation(key) => format!("abbreviation '{key}'"),
    };
    debug!(
        "{network}: {} classified as '{}' via {via}",
        raw.describe(),
        line.style_key()
    );
}

/// Canonical label for a refined line: the abbreviation prefix followed by
/// the number, with no whitespace, whichever hint carried the number.
fn abbreviation_label(abbreviation: &Abbreviation, raw: &RawLine, key: &str) -> Option<String> {
    let prefix = abbreviation.prefix.as_deref().unwrap_or_default();
    if let Some(number) = raw.hint(HintField::CategoryNumber) {
        return compact_label(prefix, number);
    }
    let designations = [
        raw.hint(HintField::Symbol),
        raw.hint(HintField::ShortName),
    ];
    let after_token = designations
        .into_iter()
        .flatten()
        .find_map(|hint| remainder_after(hint, key, prefix));
    if let Some(rest) = after_token {
        return compact_label(prefix, rest);
    }
    let numeric = designations
        .into_iter()
        .flatten()
        .find(|hint| hint.chars().all(|c| c.is_ascii_digit() || c.is_whitespace()));
    if let Some(number) = numeric {
        return compact_label(prefix, number);
    }
    designations
        .into_iter()
        .flatten()
        .find_map(clean_label)
        .or_else(|| abbreviation.prefix.clone())
}

/// Text following `hint`'s leading token when that token is the matched key
/// or the canonical prefix.
fn remainder_after<'a>(hint: &'a str, key: &str, prefix: &str) -> Option<&'a str> {
    let token = leading_token(hint)?.to_lowercase();
    if token != key.to_lowercase() && token != prefix.to_lowercase() {
        return None;
    }
    hint.trim_start()
        .get(token.len()..)
        .map(|rest| rest.trim_start_matches(|c: char| c == '-' || c.is_whitespace()))
}

fn compact_label(prefix: &str, number: &str) -> Option<String> {
    let label: String = prefix
        .chars()
        .chain(number.chars())
        .filter(|c| !c.is_whitespace())
        .collect();
    if label.is_empty() { None } else { Some(label) }
}
