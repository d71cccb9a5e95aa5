use std::fmt;

/// The kind of location a display string names.
///
/// Networks often format stations, points of interest and addresses
/// differently, so split rules are configured per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LocationKind {
    /// A stop or station.
    #[default]
    Station,
    /// A point of interest.
    Poi,
    /// A street address.
    Address,
}

/// A display string split into its place and name parts.
///
/// `place` is `None` when no split rule applied; `name` then holds the
/// whole (trimmed) input.
///
/// # Examples
/// ```
/// use ptcanon_core::PlacePair;
///
/// let pair = PlacePair::new("Aachen", "Hauptbahnhof");
/// assert_eq!(pair.to_string(), "Aachen, Hauptbahnhof");
/// assert_eq!(PlacePair::unplaced("Bahnhof").to_string(), "Bahnhof");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacePair {
    /// Town or district, when known.
    pub place: Option<String>,
    /// Name within the place.
    pub name: String,
}

impl PlacePair {
    /// Construct a pair with a known place.
    #[must_use]
    pub fn new(place: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            place: Some(place.into()),
            name: name.into(),
        }
    }

    /// Construct a pair whose place is unknown.
    #[must_use]
    pub fn unplaced(name: impl Into<String>) -> Self {
        Self {
            place: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for PlacePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.place {
            Some(place) => write!(f, "{place}, {}", self.name),
            None => f.write_str(&self.name),
        }
    }
}
