use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::Product;

/// Optional facts about a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LineAttr {
    /// Circular line running clockwise.
    CircleClockwise,
    /// Circular line running anticlockwise.
    CircleAnticlockwise,
    /// Replacement service for a disrupted line.
    ServiceReplacement,
    /// Serves an airport.
    LineAirport,
    /// Vehicles are wheelchair accessible.
    WheelChairAccess,
    /// Bicycles may be carried.
    BicycleCarriage,
}

/// A canonical transit line.
///
/// Lines are built once per upstream item and not modified afterwards. A
/// `product` of `None` marks a mode the upstream network explicitly filters;
/// callers decide whether to drop such lines.
///
/// # Examples
/// ```
/// use ptcanon_core::{Line, LineAttr, Product};
///
/// let line = Line::new(Some(Product::Bus), Some("SEV".into()))
///     .with_network("vvs")
///     .with_attr(LineAttr::ServiceReplacement);
/// assert_eq!(line.product_code(), 'B');
/// assert!(line.has_attr(LineAttr::ServiceReplacement));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Upstream line identifier, passed through untouched.
    pub id: Option<String>,
    /// Network or sub-network the line belongs to.
    pub network: Option<String>,
    /// Canonical product; `None` when the mode is explicitly filtered.
    pub product: Option<Product>,
    /// Short display label such as `S1` or `ICE599`.
    pub label: Option<String>,
    /// Long descriptive name.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,
    /// Attribute flags.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeSet::is_empty")
    )]
    pub attrs: BTreeSet<LineAttr>,
    /// Free-text service message.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub message: Option<String>,
}

/// Product code used for lines without a product.
pub const UNKNOWN_PRODUCT_CODE: char = '?';

impl Line {
    /// Construct a line from its product and label.
    #[must_use]
    pub const fn new(product: Option<Product>, label: Option<String>) -> Self {
        Self {
            id: None,
            network: None,
            product,
            label,
            name: None,
            attrs: BTreeSet::new(),
            message: None,
        }
    }

    /// Set the upstream identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the network.
    #[must_use]
    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    /// Set the long name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an attribute flag.
    #[must_use]
    pub fn with_attr(mut self, attr: LineAttr) -> Self {
        self.attrs.insert(attr);
        self
    }

    /// Set the service message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether the line carries `attr`.
    #[must_use]
    pub fn has_attr(&self, attr: LineAttr) -> bool {
        self.attrs.contains(&attr)
    }

    /// Product code, or [`UNKNOWN_PRODUCT_CODE`] for filtered lines.
    #[must_use]
    pub fn product_code(&self) -> char {
        self.product.map_or(UNKNOWN_PRODUCT_CODE, Product::code)
    }

    /// Style lookup key: product code followed by the label.
    ///
    /// # Examples
    /// ```
    /// use ptcanon_core::{Line, Product};
    ///
    /// let line = Line::new(Some(Product::Subway), Some("U2".into()));
    /// assert_eq!(line.style_key(), "UU2");
    /// ```
    #[must_use]
    pub fn style_key(&self) -> String {
        let mut key = String::new();
        key.push(self.product_code());
        key.push_str(self.label.as_deref().unwrap_or_default());
        key
    }
}

impl PartialOrd for Line {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lines order by product (filtered lines last), then label (unlabelled
/// last), then the remaining fields so the order is total.
impl Ord for Line {
    fn cmp(&self, other: &Self) -> Ordering {
        nones_last(self.product.as_ref(), other.product.as_ref())
            .then_with(|| nones_last(self.label.as_ref(), other.label.as_ref()))
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.network.cmp(&other.network))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.attrs.cmp(&other.attrs))
            .then_with(|| self.message.cmp(&other.message))
    }
}

fn nones_last<T: Ord>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
