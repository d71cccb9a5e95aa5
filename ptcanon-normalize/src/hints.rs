//! Raw line fields as handed over by protocol clients.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Raw, already-extracted line fields from an upstream response item.
///
/// Every field is optional; blank strings count as absent.
///
/// # Examples
/// ```
/// use ptcanon_normalize::{HintField, RawLine};
///
/// let raw = RawLine {
///     mode: Some(0),
///     category_type: Some("ICE".into()),
///     category_number: Some(" 599 ".into()),
///     ..RawLine::default()
/// };
/// assert_eq!(raw.hint(HintField::CategoryNumber), Some("599"));
/// assert_eq!(raw.hint(HintField::Symbol), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLine {
    /// Upstream line identifier, passed through.
    pub id: Option<String>,
    /// Upstream sub-network name, passed through.
    pub network: Option<String>,
    /// Numeric mode-of-transport ordinal.
    pub mode: Option<u32>,
    /// Display symbol, e.g. `S1` or `ICE 599`.
    pub symbol: Option<String>,
    /// Short line name.
    pub short_name: Option<String>,
    /// Long line name.
    pub long_name: Option<String>,
    /// Category abbreviation, e.g. `ICE`.
    pub category_type: Option<String>,
    /// Category number, e.g. a train number.
    pub category_number: Option<String>,
    /// Category full name, e.g. `InterCityExpress`.
    pub category_name: Option<String>,
    /// Free-text service message, passed through.
    pub message: Option<String>,
}

/// Names one textual field of a [`RawLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintField {
    /// [`RawLine::symbol`].
    Symbol,
    /// [`RawLine::short_name`].
    ShortName,
    /// [`RawLine::long_name`].
    LongName,
    /// [`RawLine::category_type`].
    CategoryType,
    /// [`RawLine::category_number`].
    CategoryNumber,
    /// [`RawLine::category_name`].
    CategoryName,
}

impl HintField {
    /// All hint fields in descriptor order.
    pub const ALL: [Self; 6] = [
        Self::Symbol,
        Self::ShortName,
        Self::LongName,
        Self::CategoryType,
        Self::CategoryNumber,
        Self::CategoryName,
    ];

    /// Field name as used in configuration and descriptors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::ShortName => "short_name",
            Self::LongName => "long_name",
            Self::CategoryType => "category_type",
            Self::CategoryNumber => "category_number",
            Self::CategoryName => "category_name",
        }
    }
}

impl RawLine {
    /// Return a trimmed hint, treating blank values as absent.
    #[must_use]
    pub fn hint(&self, field: HintField) -> Option<&str> {
        let value = match field {
            HintField::Symbol => &self.symbol,
            HintField::ShortName => &self.short_name,
            HintField::LongName => &self.long_name,
            HintField::CategoryType => &self.category_type,
            HintField::CategoryNumber => &self.category_number,
            HintField::CategoryName => &self.category_name,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    /// Label used when no refinement happens: symbol, short name, or
    /// category type and number.
    pub(crate) fn plain_label(&self) -> Option<String> {
        self.hint(HintField::Symbol)
            .or_else(|| self.hint(HintField::ShortName))
            .and_then(clean_label)
            .or_else(|| {
                let joined: String = [
                    self.hint(HintField::CategoryType),
                    self.hint(HintField::CategoryNumber),
                ]
                .into_iter()
                .flatten()
                .collect();
                clean_label(&joined)
            })
    }

    /// Summarise the raw fields for error messages and logs.
    ///
    /// # Examples
    /// ```
    /// use ptcanon_normalize::RawLine;
    ///
    /// let raw = RawLine {
    ///     mode: Some(0),
    ///     category_type: Some("XYZ".into()),
    ///     ..RawLine::default()
    /// };
    /// assert_eq!(raw.describe(), "mode=0 category_type='XYZ'");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = self
            .mode
            .map(|mode| format!("mode={mode}"))
            .into_iter()
            .collect();
        parts.extend(HintField::ALL.into_iter().filter_map(|field| {
            self.hint(field)
                .map(|value| format!("{}='{value}'", field.as_str()))
        }));
        if parts.is_empty() {
            "no hints".to_owned()
        } else {
            parts.join(" ")
        }
    }
}

/// Trim a label and collapse inner whitespace runs to one space.
///
/// Returns `None` for blank input.
pub(crate) fn clean_label(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Leading run of letters and hyphens, e.g. `ICE` in `ICE 599` or `S` in `S1`.
pub(crate) fn leading_token(raw: &str) -> Option<&str> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_alphabetic() || *c == '-'))
        .map_or(trimmed.len(), |(idx, _)| idx);
    trimmed
        .get(..end)
        .map(|token| token.trim_end_matches('-'))
        .filter(|token| !token.is_empty())
}
