//! Network-specific category rules.
//!
//! A rule pairs a predicate over the raw hints with the canonical line it
//! produces. Rules are tried in configuration order before any table lookup,
//! and the first match wins, so rules of one network should be mutually
//! exclusive.
#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use ptcanon_core::{LineAttr, Product};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::hints::clean_label;
use crate::{ConfigError, HintField, RawLine};

/// How one hint is tested, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherConfig {
    /// The trimmed hint equals the value.
    Exact(String),
    /// The trimmed hint starts with the value.
    Prefix(String),
    /// The trimmed hint matches the regular expression.
    Pattern(String),
    /// The hint is absent or blank.
    Absent,
    /// The hint is present and not blank.
    Present,
}

/// One condition of a category rule, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionConfig {
    /// Hint under test.
    pub field: HintField,
    /// Test applied to the hint.
    #[serde(rename = "match")]
    pub matcher: MatcherConfig,
}

/// One piece of a label template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPart {
    /// Fixed text.
    Literal(String),
    /// The trimmed value of a hint, or nothing when absent.
    Field(HintField),
}

/// A category rule as written in configuration.
///
/// # Examples
/// ```
/// use ptcanon_core::Product;
/// use ptcanon_normalize::{CategoryRule, CategoryRuleConfig, HintField, LabelPart, MatcherConfig};
///
/// let config = CategoryRuleConfig::new("rail replacement", Some(Product::Bus))
///     .with_mode(0)
///     .when(HintField::CategoryName, MatcherConfig::Exact("Ersatzverkehr".into()))
///     .with_label(vec![LabelPart::Literal("SEV".into())]);
/// let rule = CategoryRule::compile(&config)?;
/// assert_eq!(rule.name(), "rail replacement");
/// # Ok::<(), ptcanon_normalize::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRuleConfig {
    /// Human-readable name used in errors and logs.
    pub name: String,
    /// Required raw mode index, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,
    /// Conditions that must all hold.
    #[serde(default)]
    pub when: Vec<ConditionConfig>,
    /// Product of matching lines; `None` marks them filtered.
    pub product: Option<Product>,
    /// Label template; empty keeps the symbol.
    #[serde(default)]
    pub label: Vec<LabelPart>,
    /// Attributes given to matching lines.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub attrs: BTreeSet<LineAttr>,
}

impl CategoryRuleConfig {
    /// Start a rule producing `product`.
    #[must_use]
    pub fn new(name: impl Into<String>, product: Option<Product>) -> Self {
        Self {
            name: name.into(),
            mode: None,
            when: Vec::new(),
            product,
            label: Vec::new(),
            attrs: BTreeSet::new(),
        }
    }

    /// Require a raw mode index.
    #[must_use]
    pub const fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Add a hint condition.
    #[must_use]
    pub fn when(mut self, field: HintField, matcher: MatcherConfig) -> Self {
        self.when.push(ConditionConfig { field, matcher });
        self
    }

    /// Set the label template.
    #[must_use]
    pub fn with_label(mut self, label: Vec<LabelPart>) -> Self {
        self.label = label;
        self
    }

    /// Add an attribute for matching lines.
    #[must_use]
    pub fn with_attr(mut self, attr: LineAttr) -> Self {
        self.attrs.insert(attr);
        self
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Exact(String),
    Prefix(String),
    Pattern(Regex),
    Absent,
    Present,
}

impl Matcher {
    fn matches(&self, hint: Option<&str>) -> bool {
        match (self, hint) {
            (Self::Absent, value) => value.is_none(),
            (Self::Present, value) => value.is_some(),
            (Self::Exact(expected), Some(value)) => value == expected,
            (Self::Prefix(prefix), Some(value)) => value.starts_with(prefix.as_str()),
            (Self::Pattern(pattern), Some(value)) => pattern.is_match(value),
            (Self::Exact(_) | Self::Prefix(_) | Self::Pattern(_), None) => false,
        }
    }
}

#[derive(Debug, Clone)]
struct Condition {
    field: HintField,
    matcher: Matcher,
}

/// A compiled, ready-to-evaluate category rule.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    name: String,
    mode: Option<u32>,
    conditions: Vec<Condition>,
    product: Option<Product>,
    label: Vec<LabelPart>,
    attrs: BTreeSet<LineAttr>,
}

/// What a matching rule produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Product of the line; `None` when filtered.
    pub product: Option<Product>,
    /// Rendered label.
    pub label: Option<String>,
    /// Attributes for the line.
    pub attrs: BTreeSet<LineAttr>,
}

impl CategoryRule {
    /// Compile a rule from configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnconditionalRule`] when the rule has neither a
    /// mode nor hint conditions, and [`ConfigError::InvalidPattern`] when a
    /// pattern fails to compile.
    pub fn compile(config: &CategoryRuleConfig) -> Result<Self, ConfigError> {
        if config.mode.is_none() && config.when.is_empty() {
            return Err(ConfigError::UnconditionalRule {
                rule: config.name.clone(),
            });
        }
        let conditions = config
            .when
            .iter()
            .map(|condition| {
                Ok(Condition {
                    field: condition.field,
                    matcher: compile_matcher(&config.name, &condition.matcher)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self {
            name: config.name.clone(),
            mode: config.mode,
            conditions,
            product: config.product,
            label: config.label.clone(),
            attrs: config.attrs.clone(),
        })
    }

    /// Rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the rule applies to `raw`.
    #[must_use]
    pub fn matches(&self, raw: &RawLine) -> bool {
        if self.mode.is_some_and(|mode| raw.mode != Some(mode)) {
            return false;
        }
        self.conditions
            .iter()
            .all(|condition| condition.matcher.matches(raw.hint(condition.field)))
    }

    /// Evaluate the rule, returning its outcome when it matches.
    #[must_use]
    pub fn apply(&self, raw: &RawLine) -> Option<RuleOutcome> {
        if !self.matches(raw) {
            return None;
        }
        let label = if self.label.is_empty() {
            raw.plain_label()
        } else {
            render_label(&self.label, raw)
        };
        Some(RuleOutcome {
            product: self.product,
            label,
            attrs: self.attrs.clone(),
        })
    }
}

fn compile_matcher(rule: &str, config: &MatcherConfig) -> Result<Matcher, ConfigError> {
    Ok(match config {
        MatcherConfig::Exact(value) => Matcher::Exact(value.trim().to_owned()),
        MatcherConfig::Prefix(value) => Matcher::Prefix(value.trim().to_owned()),
        MatcherConfig::Pattern(pattern) => {
            let compiled = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                rule: rule.to_owned(),
                pattern: pattern.clone(),
                source,
            })?;
            Matcher::Pattern(compiled)
        }
        MatcherConfig::Absent => Matcher::Absent,
        MatcherConfig::Present => Matcher::Present,
    })
}

fn render_label(parts: &[LabelPart], raw: &RawLine) -> Option<String> {
    let rendered: String = parts
        .iter()
        .map(|part| match part {
            LabelPart::Literal(text) => text.as_str(),
            LabelPart::Field(field) => raw.hint(*field).unwrap_or_default(),
        })
        .collect();
    clean_label(&rendered)
}
