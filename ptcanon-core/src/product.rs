//! Canonical transit products.
//!
//! Every upstream vocabulary collapses into this closed set. The absence of a
//! product (`None` wherever an `Option<Product>` appears) is meaningful: it
//! marks a mode the upstream network explicitly filters out.
//!
//! # Examples
//! ```
//! use ptcanon_core::Product;
//!
//! assert_eq!(Product::Bus.code(), 'B');
//! assert_eq!(Product::from_code('U'), Some(Product::Subway));
//! assert_eq!(Product::Tram.to_string(), "tram");
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Coarse category of a transit line.
///
/// Variants are declared in display order; the derived `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Product {
    /// Long-distance and high-speed rail (ICE, TGV, IC, ...).
    HighSpeedTrain,
    /// Regional rail (RE, RB, ...).
    RegionalTrain,
    /// Suburban rail (S-Bahn, RER, ...).
    SuburbanTrain,
    /// Metro and underground.
    Subway,
    /// Tram and light rail.
    Tram,
    /// Bus, including rail replacement services.
    Bus,
    /// Demand-responsive services such as shared taxis.
    OnDemand,
    /// Ferries and boats.
    Ferry,
    /// Cable cars, funiculars and other cable-hauled transport.
    Cablecar,
}

/// Errors returned when parsing products from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductParseError {
    /// A single-character product code was not recognised.
    #[error("unknown product code '{code}'")]
    UnknownCode {
        /// The offending character.
        code: char,
    },
    /// A product name was not recognised.
    #[error("unknown product '{name}'")]
    UnknownName {
        /// The offending input.
        name: String,
    },
}

impl Product {
    /// All products in declaration order.
    pub const ALL: [Self; 9] = [
        Self::HighSpeedTrain,
        Self::RegionalTrain,
        Self::SuburbanTrain,
        Self::Subway,
        Self::Tram,
        Self::Bus,
        Self::OnDemand,
        Self::Ferry,
        Self::Cablecar,
    ];

    /// Single-character code used in style keys and compact product sets.
    ///
    /// # Examples
    /// ```
    /// use ptcanon_core::Product;
    ///
    /// assert_eq!(Product::HighSpeedTrain.code(), 'I');
    /// assert_eq!(Product::OnDemand.code(), 'P');
    /// ```
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::HighSpeedTrain => 'I',
            Self::RegionalTrain => 'R',
            Self::SuburbanTrain => 'S',
            Self::Subway => 'U',
            Self::Tram => 'T',
            Self::Bus => 'B',
            Self::OnDemand => 'P',
            Self::Ferry => 'F',
            Self::Cablecar => 'C',
        }
    }

    /// Look up a product by its single-character code.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'I' => Some(Self::HighSpeedTrain),
            'R' => Some(Self::RegionalTrain),
            'S' => Some(Self::SuburbanTrain),
            'U' => Some(Self::Subway),
            'T' => Some(Self::Tram),
            'B' => Some(Self::Bus),
            'P' => Some(Self::OnDemand),
            'F' => Some(Self::Ferry),
            'C' => Some(Self::Cablecar),
            _ => None,
        }
    }

    /// Return the product as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighSpeedTrain => "high_speed_train",
            Self::RegionalTrain => "regional_train",
            Self::SuburbanTrain => "suburban_train",
            Self::Subway => "subway",
            Self::Tram => "tram",
            Self::Bus => "bus",
            Self::OnDemand => "on_demand",
            Self::Ferry => "ferry",
            Self::Cablecar => "cablecar",
        }
    }

    /// Whether the product is one of the three rail categories.
    ///
    /// Rail products usually need finer classification than a mode index
    /// can provide.
    #[must_use]
    pub const fn is_train(self) -> bool {
        matches!(
            self,
            Self::HighSpeedTrain | Self::RegionalTrain | Self::SuburbanTrain
        )
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Product {
    type Err = ProductParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|product| product.as_str() == normalised)
            .ok_or_else(|| ProductParseError::UnknownName { name: s.to_owned() })
    }
}

/// Parse a compact product set such as `"IRSB"`.
///
/// Whitespace is ignored; duplicate codes collapse.
///
/// # Errors
/// Returns [`ProductParseError::UnknownCode`] for the first unrecognised
/// character.
///
/// # Examples
/// ```
/// use ptcanon_core::{Product, products_from_codes};
///
/// let products = products_from_codes("UB")?;
/// assert!(products.contains(&Product::Subway));
/// assert!(products.contains(&Product::Bus));
/// # Ok::<(), ptcanon_core::ProductParseError>(())
/// ```
pub fn products_from_codes(codes: &str) -> Result<BTreeSet<Product>, ProductParseError> {
    codes
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|code| Product::from_code(code).ok_or(ProductParseError::UnknownCode { code }))
        .collect()
}

/// Render a product set as its compact code string, in declaration order.
#[must_use]
pub fn products_to_codes<I>(products: I) -> String
where
    I: IntoIterator<Item = Product>,
{
    let set: BTreeSet<Product> = products.into_iter().collect();
    set.into_iter().map(Product::code).collect()
}
