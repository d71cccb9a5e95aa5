//! Lookup from a network's raw mode ordinal to a coarse product.
#![forbid(unsafe_code)]

use ptcanon_core::Product;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Product for each raw mode ordinal of one upstream network.
///
/// Entry `i` describes raw mode `i`. A `None` entry means the network
/// explicitly filters that mode; it is a valid answer, not a failure.
///
/// # Examples
/// ```
/// use ptcanon_core::Product;
/// use ptcanon_normalize::ProductIndexTable;
///
/// let table = ProductIndexTable::new(vec![None, Some(Product::Bus)])?;
/// assert_eq!(table.lookup(0), Ok(None));
/// assert_eq!(table.lookup(1), Ok(Some(Product::Bus)));
/// assert!(table.lookup(2).is_err());
/// # Ok::<(), ptcanon_normalize::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<Product>>", into = "Vec<Option<Product>>")]
pub struct ProductIndexTable {
    entries: Vec<Option<Product>>,
}

/// A raw mode index that the table does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    /// Requested index.
    pub index: u32,
    /// Table size.
    pub len: usize,
}

impl ProductIndexTable {
    /// Build a table covering raw ordinals `0..entries.len()`.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyProductTable`] when `entries` is empty.
    pub fn new(entries: Vec<Option<Product>>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyProductTable);
        }
        Ok(Self { entries })
    }

    /// Product for raw mode `index`.
    ///
    /// # Errors
    /// Returns [`OutOfRange`] when `index` is not covered by the table.
    pub fn lookup(&self, index: u32) -> Result<Option<Product>, OutOfRange> {
        usize::try_from(index)
            .ok()
            .and_then(|idx| self.entries.get(idx))
            .copied()
            .ok_or(OutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Number of raw ordinals covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; construction rejects empty tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<Option<Product>>> for ProductIndexTable {
    type Error = ConfigError;

    fn try_from(entries: Vec<Option<Product>>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<ProductIndexTable> for Vec<Option<Product>> {
    fn from(table: ProductIndexTable) -> Self {
        table.entries
    }
}
