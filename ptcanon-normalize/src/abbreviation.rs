//! Category abbreviation tables used to classify rail and other lines.
//!
//! Each network may carry its own table; it is consulted before the shared
//! cross-network table, so a network can reinterpret a common abbreviation
//! without touching the shared entries.
#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use ptcanon_core::{LineAttr, Product};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Meaning of one category abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abbreviation {
    /// Product the abbreviation denotes.
    pub product: Product,
    /// Canonical label prefix, e.g. `ICE`. `None` labels lines by number or
    /// symbol only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Attributes implied by the abbreviation.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub attrs: BTreeSet<LineAttr>,
}

impl Abbreviation {
    /// An abbreviation with a label prefix and no attributes.
    #[must_use]
    pub fn new(product: Product, prefix: Option<&str>) -> Self {
        Self {
            product,
            prefix: prefix.map(str::to_owned),
            attrs: BTreeSet::new(),
        }
    }

    /// Add an implied attribute.
    #[must_use]
    pub fn with_attr(mut self, attr: LineAttr) -> Self {
        self.attrs.insert(attr);
        self
    }
}

/// Case-insensitive map from abbreviation to [`Abbreviation`].
///
/// # Examples
/// ```
/// use ptcanon_core::Product;
/// use ptcanon_normalize::AbbreviationTable;
///
/// let shared = AbbreviationTable::standard();
/// let ice = shared.get("ice").expect("ICE is a shared abbreviation");
/// assert_eq!(ice.product, Product::HighSpeedTrain);
/// assert_eq!(ice.prefix.as_deref(), Some("ICE"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationTable {
    entries: BTreeMap<String, Abbreviation>,
}

impl AbbreviationTable {
    /// Build a table, normalising keys to trimmed uppercase.
    ///
    /// Later entries replace earlier ones with the same key.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyAbbreviation`] for a blank key.
    pub fn new<I, K>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, Abbreviation)>,
        K: AsRef<str>,
    {
        let mut table = Self::default();
        for (key, abbreviation) in entries {
            let normalised =
                normalise_key(key.as_ref()).ok_or(ConfigError::EmptyAbbreviation)?;
            table.entries.insert(normalised, abbreviation);
        }
        Ok(table)
    }

    /// The shared cross-network table of common European categories.
    #[must_use]
    pub fn standard() -> Self {
        let entries = STANDARD
            .iter()
            .map(|&(key, product, prefix)| {
                (key.to_owned(), Abbreviation::new(product, prefix))
            })
            .chain(REPLACEMENT.iter().map(|&key| {
                (
                    key.to_owned(),
                    Abbreviation::new(Product::Bus, Some("SEV"))
                        .with_attr(LineAttr::ServiceReplacement),
                )
            }))
            .collect();
        Self { entries }
    }

    /// Return a copy of `self` with `overrides` layered on top.
    #[must_use]
    pub fn extended_with(&self, overrides: &Self) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(
            overrides
                .entries
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        Self { entries }
    }

    /// Look up an abbreviation, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Abbreviation> {
        normalise_key(key).and_then(|normalised| self.entries.get(&normalised))
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

fn normalise_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

const STANDARD: &[(&str, Product, Option<&str>)] = &[
    // long distance
    ("ICE", Product::HighSpeedTrain, Some("ICE")),
    ("INTERCITYEXPRESS", Product::HighSpeedTrain, Some("ICE")),
    ("IC", Product::HighSpeedTrain, Some("IC")),
    ("INTERCITY", Product::HighSpeedTrain, Some("IC")),
    ("EC", Product::HighSpeedTrain, Some("EC")),
    ("EUROCITY", Product::HighSpeedTrain, Some("EC")),
    ("ECE", Product::HighSpeedTrain, Some("ECE")),
    ("EN", Product::HighSpeedTrain, Some("EN")),
    ("EURONIGHT", Product::HighSpeedTrain, Some("EN")),
    ("NJ", Product::HighSpeedTrain, Some("NJ")),
    ("NIGHTJET", Product::HighSpeedTrain, Some("NJ")),
    ("CNL", Product::HighSpeedTrain, Some("CNL")),
    ("RJ", Product::HighSpeedTrain, Some("RJ")),
    ("RAILJET", Product::HighSpeedTrain, Some("RJ")),
    ("RJX", Product::HighSpeedTrain, Some("RJX")),
    ("TGV", Product::HighSpeedTrain, Some("TGV")),
    ("THA", Product::HighSpeedTrain, Some("THA")),
    ("THALYS", Product::HighSpeedTrain, Some("THA")),
    ("EST", Product::HighSpeedTrain, Some("EST")),
    ("EUROSTAR", Product::HighSpeedTrain, Some("EST")),
    ("FLX", Product::HighSpeedTrain, Some("FLX")),
    ("FLIXTRAIN", Product::HighSpeedTrain, Some("FLX")),
    ("WB", Product::HighSpeedTrain, Some("WB")),
    ("WESTBAHN", Product::HighSpeedTrain, Some("WB")),
    ("OEC", Product::HighSpeedTrain, Some("OEC")),
    ("OIC", Product::HighSpeedTrain, Some("OIC")),
    ("D", Product::HighSpeedTrain, Some("D")),
    // regional
    ("IRE", Product::RegionalTrain, Some("IRE")),
    ("IR", Product::RegionalTrain, Some("IR")),
    ("INTERREGIO", Product::RegionalTrain, Some("IR")),
    ("RE", Product::RegionalTrain, Some("RE")),
    ("REGIONALEXPRESS", Product::RegionalTrain, Some("RE")),
    ("RB", Product::RegionalTrain, Some("RB")),
    ("REGIONALBAHN", Product::RegionalTrain, Some("RB")),
    ("R", Product::RegionalTrain, Some("R")),
    ("REGIONALZUG", Product::RegionalTrain, Some("R")),
    ("REX", Product::RegionalTrain, Some("REX")),
    ("CJX", Product::RegionalTrain, Some("CJX")),
    ("MEX", Product::RegionalTrain, Some("MEX")),
    ("ERB", Product::RegionalTrain, Some("ERB")),
    ("BRB", Product::RegionalTrain, Some("BRB")),
    ("NWB", Product::RegionalTrain, Some("NWB")),
    ("HLB", Product::RegionalTrain, Some("HLB")),
    ("ALX", Product::RegionalTrain, Some("ALX")),
    // suburban
    ("S", Product::SuburbanTrain, Some("S")),
    ("S-BAHN", Product::SuburbanTrain, Some("S")),
    ("RS", Product::SuburbanTrain, Some("RS")),
    // metro, tram
    ("U", Product::Subway, Some("U")),
    ("U-BAHN", Product::Subway, Some("U")),
    ("METRO", Product::Subway, Some("M")),
    ("STR", Product::Tram, None),
    ("TRAM", Product::Tram, None),
    ("STRASSENBAHN", Product::Tram, None),
    ("STADTBAHN", Product::Tram, None),
    // road
    ("BUS", Product::Bus, None),
    ("AST", Product::OnDemand, Some("AST")),
    ("ANRUFSAMMELTAXI", Product::OnDemand, Some("AST")),
    ("ALT", Product::OnDemand, Some("ALT")),
    ("RUF", Product::OnDemand, Some("RUF")),
    ("RUFBUS", Product::OnDemand, Some("RUF")),
    // water, cable
    ("F", Product::Ferry, Some("F")),
    ("FÄHRE", Product::Ferry, None),
    ("FAEHRE", Product::Ferry, None),
    ("SCHIFF", Product::Ferry, None),
    ("FERRY", Product::Ferry, None),
    ("SEILBAHN", Product::Cablecar, None),
    ("STANDSEILBAHN", Product::Cablecar, None),
    ("SCHWEBEBAHN", Product::Cablecar, None),
    ("CABLECAR", Product::Cablecar, None),
];

const REPLACEMENT: &[&str] = &["SEV", "EV", "SCHIENENERSATZVERKEHR", "ERSATZVERKEHR"];
