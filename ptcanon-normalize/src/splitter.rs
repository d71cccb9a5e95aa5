//! Split combined "place, station" display strings into [`PlacePair`]s.
//!
//! Each network selects, per [`LocationKind`], an ordered set of rules at
//! configuration time: a literal place list, a generic comma template and
//! the passthrough default. The first rule that applies decides the result.
#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use ptcanon_core::{LocationKind, PlacePair};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const COMMA: &str = ", ";

/// Where a literal place alias may appear in a display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacePosition {
    /// Only before the station name, e.g. `AC, Hauptbahnhof`.
    Prefix,
    /// Only after the station name, e.g. `Hauptbahnhof, AC`.
    Suffix,
    /// Either side; the prefix is tried first.
    #[default]
    Both,
}

impl PlacePosition {
    const fn allows_prefix(self) -> bool {
        matches!(self, Self::Prefix | Self::Both)
    }

    const fn allows_suffix(self) -> bool {
        matches!(self, Self::Suffix | Self::Both)
    }
}

/// One literal place alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceEntry {
    /// Text as it appears in display strings, e.g. `AC`.
    pub alias: String,
    /// Canonical place name, e.g. `Aachen`.
    pub place: String,
}

/// A literal place list as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceListConfig {
    /// Known aliases.
    pub entries: Vec<PlaceEntry>,
    /// Separators allowed between alias and name.
    #[serde(default = "default_separators")]
    pub separators: Vec<String>,
    /// Allowed alias position.
    #[serde(default)]
    pub position: PlacePosition,
}

impl PlaceListConfig {
    /// A list using the default separators on either side.
    #[must_use]
    pub fn new<I, A, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, P)>,
        A: Into<String>,
        P: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(alias, place)| PlaceEntry {
                    alias: alias.into(),
                    place: place.into(),
                })
                .collect(),
            separators: default_separators(),
            position: PlacePosition::default(),
        }
    }
}

fn default_separators() -> Vec<String> {
    [", ", " ", "-"].map(str::to_owned).into()
}

/// Validated literal place list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceList {
    entries: Vec<PlaceEntry>,
    separators: Vec<String>,
    position: PlacePosition,
}

impl PlaceList {
    /// Validate a place list.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyPlaceAlias`] for blank entries,
    /// [`ConfigError::NoSeparators`] when no usable separator is configured,
    /// [`ConfigError::DuplicatePlace`] for repeated aliases and
    /// [`ConfigError::AmbiguousPlaces`] when two aliases could both match one
    /// input.
    pub fn new(config: &PlaceListConfig) -> Result<Self, ConfigError> {
        let separators: Vec<String> = config
            .separators
            .iter()
            .filter(|sep| !sep.is_empty())
            .cloned()
            .collect();
        if separators.is_empty() {
            return Err(ConfigError::NoSeparators);
        }
        let mut seen = BTreeSet::new();
        let mut entries = Vec::with_capacity(config.entries.len());
        for entry in &config.entries {
            let alias = entry.alias.trim();
            let place = entry.place.trim();
            if alias.is_empty() || place.is_empty() {
                return Err(ConfigError::EmptyPlaceAlias);
            }
            if !seen.insert(alias.to_owned()) {
                return Err(ConfigError::DuplicatePlace {
                    alias: alias.to_owned(),
                });
            }
            entries.push(PlaceEntry {
                alias: alias.to_owned(),
                place: place.to_owned(),
            });
        }
        let list = Self {
            entries,
            separators,
            position: config.position,
        };
        list.check_overlaps()?;
        Ok(list)
    }

    fn check_overlaps(&self) -> Result<(), ConfigError> {
        for short in &self.entries {
            for long in &self.entries {
                if short.alias == long.alias {
                    continue;
                }
                if self.overlaps(&short.alias, &long.alias) {
                    return Err(ConfigError::AmbiguousPlaces {
                        first: short.alias.clone(),
                        second: long.alias.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Whether `short` joined with one separator can collide with `long`
    /// joined with another.
    fn overlaps(&self, short: &str, long: &str) -> bool {
        let pairs = || {
            self.separators
                .iter()
                .flat_map(|outer| self.separators.iter().map(move |inner| (outer, inner)))
        };
        let as_prefix = self.position.allows_prefix()
            && long.strip_prefix(short).is_some_and(|rest| {
                pairs().any(|(outer, inner)| {
                    let extended = format!("{rest}{inner}");
                    extended.starts_with(outer.as_str()) || outer.starts_with(&extended)
                })
            });
        let as_suffix = self.position.allows_suffix()
            && long.strip_suffix(short).is_some_and(|rest| {
                pairs().any(|(outer, inner)| {
                    let extended = format!("{inner}{rest}");
                    extended.ends_with(outer.as_str()) || outer.ends_with(&extended)
                })
            });
        as_prefix || as_suffix
    }

    /// Split off a known place alias, if present.
    #[must_use]
    pub fn split(&self, raw: &str) -> Option<(String, String)> {
        let prefixed = if self.position.allows_prefix() {
            self.find(|entry, sep| raw.strip_prefix(entry.alias.as_str())?.strip_prefix(sep))
        } else {
            None
        };
        prefixed.or_else(|| {
            if self.position.allows_suffix() {
                self.find(|entry, sep| raw.strip_suffix(entry.alias.as_str())?.strip_suffix(sep))
            } else {
                None
            }
        })
    }

    fn find<'a, F>(&self, strip: F) -> Option<(String, String)>
    where
        F: Fn(&PlaceEntry, &str) -> Option<&'a str>,
    {
        self.entries.iter().find_map(|entry| {
            self.separators.iter().find_map(|sep| {
                strip(entry, sep)
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(|name| (entry.place.clone(), name.to_owned()))
            })
        })
    }
}

/// Which `", "` separates place and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitTemplate {
    /// Split at the first comma.
    FirstComma,
    /// Split at the last comma.
    LastComma,
    /// Split at the second-to-last comma.
    NextToLastComma,
}

/// Order of the two groups produced by a [`SplitTemplate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    /// `Place, Name`.
    #[default]
    PlaceFirst,
    /// `Name, Place`.
    NameFirst,
}

/// A generic comma-split rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommaSplit {
    /// Comma to split at.
    pub split: SplitTemplate,
    /// Meaning of the left and right group.
    #[serde(default)]
    pub order: GroupOrder,
}

impl CommaSplit {
    /// Split `raw`, returning `(place, name)` when both groups are non-empty.
    ///
    /// # Examples
    /// ```
    /// use ptcanon_normalize::{CommaSplit, GroupOrder, SplitTemplate};
    ///
    /// let rule = CommaSplit { split: SplitTemplate::LastComma, order: GroupOrder::NameFirst };
    /// assert_eq!(
    ///     rule.split("Powell St, San Francisco"),
    ///     Some(("San Francisco".to_owned(), "Powell St".to_owned()))
    /// );
    /// assert_eq!(rule.split("Powell St"), None);
    /// ```
    #[must_use]
    pub fn split(&self, raw: &str) -> Option<(String, String)> {
        let (left, right) = cut(self.split, raw)?;
        let (place, name) = match self.order {
            GroupOrder::PlaceFirst => (left.trim(), right.trim()),
            GroupOrder::NameFirst => (right.trim(), left.trim()),
        };
        (!place.is_empty() && !name.is_empty()).then(|| (place.to_owned(), name.to_owned()))
    }
}

fn cut(template: SplitTemplate, raw: &str) -> Option<(&str, &str)> {
    match template {
        SplitTemplate::FirstComma => raw.split_once(COMMA),
        SplitTemplate::LastComma => raw.rsplit_once(COMMA),
        SplitTemplate::NextToLastComma => {
            let (head, _) = raw.rsplit_once(COMMA)?;
            let (left, _) = head.rsplit_once(COMMA)?;
            let right = raw.get(left.len() + COMMA.len()..)?;
            Some((left, right))
        }
    }
}

/// Word-level replacements applied to split names, e.g. `Hbf` to
/// `Hauptbahnhof`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRewrites {
    words: BTreeMap<String, String>,
}

impl NameRewrites {
    /// Build a rewrite table.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyRewrite`] when a word or its replacement
    /// is blank or the word spans several tokens.
    pub fn new(words: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut table = BTreeMap::new();
        for (word, replacement) in words {
            let key = word.trim();
            let value = replacement.trim();
            if key.is_empty() || value.is_empty() || key.contains(char::is_whitespace) {
                return Err(ConfigError::EmptyRewrite);
            }
            table.insert(key.to_owned(), value.to_owned());
        }
        Ok(Self { words: table })
    }

    /// Replace whole words and collapse whitespace.
    #[must_use]
    pub fn apply(&self, name: &str) -> String {
        name.split_whitespace()
            .map(|word| self.words.get(word).map_or(word, String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Split rules for one location kind, as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameSplitConfig {
    /// Literal place list, tried first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub places: Option<PlaceListConfig>,
    /// Generic comma template, tried second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<CommaSplit>,
    /// Word rewrites for the name part.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub rewrites: BTreeMap<String, String>,
}

/// Split rules for every location kind, as written in configuration.
///
/// POI and address kinds without their own rules use the station rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameConfig {
    /// Rules for stations.
    pub station: NameSplitConfig,
    /// Rules for points of interest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poi: Option<NameSplitConfig>,
    /// Rules for addresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<NameSplitConfig>,
}

#[derive(Debug, Clone, Default)]
struct SplitRules {
    places: Option<PlaceList>,
    template: Option<CommaSplit>,
    rewrites: NameRewrites,
}

impl SplitRules {
    fn compile(config: &NameSplitConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            places: config.places.as_ref().map(PlaceList::new).transpose()?,
            template: config.template,
            rewrites: NameRewrites::new(&config.rewrites)?,
        })
    }

    fn split(&self, raw: &str) -> PlacePair {
        let trimmed = raw.trim();
        let literal = self.places.as_ref().and_then(|list| list.split(trimmed));
        let split = literal.or_else(|| self.template.and_then(|rule| rule.split(trimmed)));
        match split {
            Some((place, name)) => PlacePair::new(place, self.rewrites.apply(&name)),
            None => PlacePair::unplaced(self.rewrites.apply(trimmed)),
        }
    }
}

/// Per-network name splitter.
///
/// # Examples
/// ```
/// use ptcanon_core::LocationKind;
/// use ptcanon_normalize::{NameConfig, NameSplitConfig, NameSplitter, PlaceListConfig};
///
/// let config = NameConfig {
///     station: NameSplitConfig {
///         places: Some(PlaceListConfig::new([("AC", "Aachen")])),
///         ..NameSplitConfig::default()
///     },
///     ..NameConfig::default()
/// };
/// let splitter = NameSplitter::new(&config)?;
/// let pair = splitter.split(LocationKind::Station, "AC, Hauptbahnhof");
/// assert_eq!(pair.place.as_deref(), Some("Aachen"));
/// assert_eq!(pair.name, "Hauptbahnhof");
/// # Ok::<(), ptcanon_normalize::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct NameSplitter {
    station: SplitRules,
    poi: Option<SplitRules>,
    address: Option<SplitRules>,
}

impl NameSplitter {
    /// Compile split rules.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a place list or rewrite table is invalid.
    pub fn new(config: &NameConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            station: SplitRules::compile(&config.station)?,
            poi: config.poi.as_ref().map(SplitRules::compile).transpose()?,
            address: config.address.as_ref().map(SplitRules::compile).transpose()?,
        })
    }

    /// Split a display string of the given kind. Never fails.
    #[must_use]
    pub fn split(&self, kind: LocationKind, raw: &str) -> PlacePair {
        let rules = match kind {
            LocationKind::Station => None,
            LocationKind::Poi => self.poi.as_ref(),
            LocationKind::Address => self.address.as_ref(),
        };
        rules.unwrap_or(&self.station).split(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn places(entries: &[(&str, &str)]) -> PlaceListConfig {
        PlaceListConfig::new(entries.iter().copied())
    }

    #[rstest]
    #[case("AC, Hauptbahnhof", Some(("Aachen", "Hauptbahnhof")))]
    #[case("Hauptbahnhof, AC", Some(("Aachen", "Hauptbahnhof")))]
    #[case("AC-Rothe Erde", Some(("Aachen", "Rothe Erde")))]
    #[case("AC Bushof", Some(("Aachen", "Bushof")))]
    #[case("AC", None)]
    #[case("ACME Works", None)]
    fn literal_list_splits(#[case] raw: &str, #[case] expected: Option<(&str, &str)>) {
        let list = PlaceList::new(&places(&[("AC", "Aachen")])).unwrap();
        let expected = expected.map(|(p, n)| (p.to_owned(), n.to_owned()));
        assert_eq!(list.split(raw), expected);
    }

    #[rstest]
    fn prefix_only_lists_ignore_suffixes() {
        let mut config = places(&[("AC", "Aachen")]);
        config.position = PlacePosition::Prefix;
        let list = PlaceList::new(&config).unwrap();
        assert_eq!(list.split("Hauptbahnhof, AC"), None);
    }

    #[rstest]
    #[case(&[("Bad", "Bad"), ("Bad Homburg", "Bad Homburg")])]
    #[case(&[("Homburg", "Homburg"), ("Bad Homburg", "Bad Homburg")])]
    fn rejects_overlapping_aliases(#[case] entries: &[(&str, &str)]) {
        assert!(matches!(
            PlaceList::new(&places(entries)),
            Err(ConfigError::AmbiguousPlaces { .. })
        ));
    }

    #[rstest]
    fn accepts_aliases_sharing_a_stem() {
        assert!(PlaceList::new(&places(&[("AC", "Aachen"), ("ACX", "Elsewhere")])).is_ok());
    }

    #[rstest]
    fn rejects_duplicates_and_blanks() {
        assert!(matches!(
            PlaceList::new(&places(&[("AC", "Aachen"), (" AC ", "Aachen")])),
            Err(ConfigError::DuplicatePlace { .. })
        ));
        assert!(matches!(
            PlaceList::new(&places(&[(" ", "Aachen")])),
            Err(ConfigError::EmptyPlaceAlias)
        ));
        let mut config = places(&[("AC", "Aachen")]);
        config.separators.clear();
        assert!(matches!(PlaceList::new(&config), Err(ConfigError::NoSeparators)));
    }

    #[rstest]
    #[case(SplitTemplate::FirstComma, GroupOrder::PlaceFirst, "Berlin, Alexanderplatz, Gleis 2", Some(("Berlin", "Alexanderplatz, Gleis 2")))]
    #[case(SplitTemplate::LastComma, GroupOrder::NameFirst, "Powell St, San Francisco", Some(("San Francisco", "Powell St")))]
    #[case(SplitTemplate::NextToLastComma, GroupOrder::NameFirst, "Main St, Springfield, IL", Some(("Springfield, IL", "Main St")))]
    #[case(SplitTemplate::NextToLastComma, GroupOrder::NameFirst, "Main St, Springfield", None)]
    #[case(SplitTemplate::FirstComma, GroupOrder::PlaceFirst, ", Alexanderplatz", None)]
    fn comma_templates(
        #[case] split: SplitTemplate,
        #[case] order: GroupOrder,
        #[case] raw: &str,
        #[case] expected: Option<(&str, &str)>,
    ) {
        let rule = CommaSplit { split, order };
        let expected = expected.map(|(p, n)| (p.to_owned(), n.to_owned()));
        assert_eq!(rule.split(raw), expected);
    }

    #[rstest]
    fn rewrites_whole_words_only() {
        let words = BTreeMap::from([("Hbf".to_owned(), "Hauptbahnhof".to_owned())]);
        let rewrites = NameRewrites::new(&words).unwrap();
        assert_eq!(rewrites.apply("Köln  Hbf"), "Köln Hauptbahnhof");
        assert_eq!(rewrites.apply("Hbfstraße"), "Hbfstraße");
    }

    #[rstest]
    fn poi_falls_back_to_station_rules() {
        let config = NameConfig {
            station: NameSplitConfig {
                template: Some(CommaSplit {
                    split: SplitTemplate::FirstComma,
                    order: GroupOrder::PlaceFirst,
                }),
                ..NameSplitConfig::default()
            },
            address: Some(NameSplitConfig::default()),
            ..NameConfig::default()
        };
        let splitter = NameSplitter::new(&config).unwrap();
        let poi = splitter.split(LocationKind::Poi, "Wien, Prater");
        assert_eq!(poi.place.as_deref(), Some("Wien"));
        let address = splitter.split(LocationKind::Address, "Wien, Prater");
        assert_eq!(address, PlacePair::unplaced("Wien, Prater"));
    }

    #[rstest]
    fn default_branch_trims_and_keeps_name() {
        let splitter = NameSplitter::default();
        let pair = splitter.split(LocationKind::Station, "  Marienplatz ");
        assert_eq!(pair.place, None);
        assert_eq!(pair.name, "Marienplatz");
    }
}
