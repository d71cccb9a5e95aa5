use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Identifier of an upstream transit network, e.g. `vvs` or `bart`.
///
/// Identifiers are lowercase ASCII letters, digits, `-` and `_`. They key the
/// adapter registry and prefix network-specific style overrides.
///
/// # Examples
/// ```
/// use ptcanon_core::NetworkId;
///
/// let id = NetworkId::new("vvs")?;
/// assert_eq!(id.as_str(), "vvs");
/// assert!(NetworkId::new("Not Valid").is_err());
/// # Ok::<(), ptcanon_core::NetworkIdError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct NetworkId(String);

/// Errors returned by [`NetworkId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkIdError {
    /// The identifier was empty.
    #[error("network id must not be empty")]
    Empty,
    /// The identifier contained a character outside `[a-z0-9_-]`.
    #[error("network id '{id}' contains invalid character '{invalid}'")]
    InvalidCharacter {
        /// The rejected identifier.
        id: String,
        /// First offending character.
        invalid: char,
    },
}

impl NetworkId {
    /// Validate and construct a [`NetworkId`].
    ///
    /// # Errors
    /// Returns [`NetworkIdError`] when the identifier is empty or contains a
    /// character other than lowercase ASCII letters, digits, `-` or `_`.
    pub fn new(id: impl Into<String>) -> Result<Self, NetworkIdError> {
        let raw = id.into();
        if raw.is_empty() {
            return Err(NetworkIdError::Empty);
        }
        if let Some(invalid) = raw.chars().find(|c| !is_id_char(*c)) {
            return Err(NetworkIdError::InvalidCharacter { id: raw, invalid });
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const fn is_id_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NetworkId {
    type Err = NetworkIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for NetworkId {
    type Error = NetworkIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NetworkId> for String {
    fn from(value: NetworkId) -> Self {
        value.0
    }
}

impl AsRef<str> for NetworkId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
