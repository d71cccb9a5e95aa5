//! Visual badge styles for transit lines.
//!
//! A [`Style`] pairs a [`Shape`] with ARGB [`Color`] values. Styles are plain
//! values; resolving which style belongs to a line is the job of the
//! normalizer crate.
//!
//! # Examples
//! ```
//! use ptcanon_core::{Color, Shape, Style};
//!
//! let style = Style::new(Shape::Circle, Color::parse("#006e34")?, Color::WHITE);
//! assert_eq!(style.background.to_string(), "#006e34");
//! assert!(!style.has_border());
//! # Ok::<(), ptcanon_core::ColorParseError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A 32-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Color(u32);

/// Errors returned by [`Color::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The value did not start with `#`.
    #[error("color '{raw}' must start with '#'")]
    MissingHash {
        /// The rejected input.
        raw: String,
    },
    /// The value had neither six nor eight hex digits.
    #[error("color '{raw}' must have 6 or 8 hex digits")]
    InvalidLength {
        /// The rejected input.
        raw: String,
    },
    /// The value contained a non-hex digit.
    #[error("color '{raw}' contains non-hex digits")]
    InvalidDigit {
        /// The rejected input.
        raw: String,
    },
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    /// Opaque red.
    pub const RED: Self = Self::rgb(0xff, 0x00, 0x00);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0x00, 0x00, 0xff);
    /// Opaque mid gray.
    pub const GRAY: Self = Self::rgb(0x88, 0x88, 0x88);
    /// Opaque dark gray.
    pub const DARK_GRAY: Self = Self::rgb(0x44, 0x44, 0x44);
    /// Opaque light gray.
    pub const LIGHT_GRAY: Self = Self::rgb(0xcc, 0xcc, 0xcc);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::argb(0x00, 0x00, 0x00, 0x00);

    /// Build an opaque color from its channels.
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::argb(0xff, red, green, blue)
    }

    /// Build a color from alpha and color channels.
    #[must_use]
    pub const fn argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Parse `#RRGGBB` (opaque) or `#AARRGGBB`.
    ///
    /// # Errors
    /// Returns [`ColorParseError`] when the input is not a hash-prefixed
    /// six or eight digit hex value.
    pub fn parse(raw: &str) -> Result<Self, ColorParseError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash {
                raw: raw.to_owned(),
            })?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit {
                raw: raw.to_owned(),
            });
        }
        let opaque = match digits.len() {
            6 => true,
            8 => false,
            _ => {
                return Err(ColorParseError::InvalidLength {
                    raw: raw.to_owned(),
                });
            }
        };
        let value = u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::InvalidDigit {
            raw: raw.to_owned(),
        })?;
        Ok(Self(if opaque { 0xff00_0000 | value } else { value }))
    }

    /// Raw ARGB value.
    #[must_use]
    pub const fn to_argb(self) -> u32 {
        self.0
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        channel(self.0, 24)
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        channel(self.0, 16)
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        channel(self.0, 8)
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        channel(self.0, 0)
    }

    /// Perceived brightness in `0..=255` using the ITU-R BT.601 weights.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "brightness is reported on the same integer scale as the channels"
    )]
    pub const fn perceived_brightness(self) -> u8 {
        let weighted =
            299 * self.red() as u32 + 587 * self.green() as u32 + 114 * self.blue() as u32;
        channel(weighted / 1000, 0)
    }

    /// Whether text on this background should be light.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        self.perceived_brightness() < 128
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is masked to eight bits before the cast"
)]
const fn channel(value: u32, shift: u32) -> u8 {
    ((value >> shift) & 0xff) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha() == 0xff {
            write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
        } else {
            write!(f, "#{:08x}", self.0)
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

/// Outline of a line badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Shape {
    /// Sharp-cornered rectangle.
    Rect,
    /// Rectangle with rounded corners.
    #[default]
    Rounded,
    /// Circle or pill.
    Circle,
}

/// Visual badge for a line: shape plus colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Badge outline.
    pub shape: Shape,
    /// Primary fill color.
    pub background: Color,
    /// Optional second fill color for split badges.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub background2: Option<Color>,
    /// Text color.
    pub foreground: Color,
    /// Optional outline color.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub border: Option<Color>,
}

impl Style {
    /// Style used when nothing more specific is known.
    pub const FALLBACK: Self = Self::new(Shape::Rect, Color::DARK_GRAY, Color::WHITE);

    /// Construct a borderless single-color style.
    #[must_use]
    pub const fn new(shape: Shape, background: Color, foreground: Color) -> Self {
        Self {
            shape,
            background,
            background2: None,
            foreground,
            border: None,
        }
    }

    /// Construct a rounded style.
    #[must_use]
    pub const fn rounded(background: Color, foreground: Color) -> Self {
        Self::new(Shape::Rounded, background, foreground)
    }

    /// Construct a style whose foreground is black or white depending on the
    /// brightness of `background`.
    ///
    /// # Examples
    /// ```
    /// use ptcanon_core::{Color, Shape, Style};
    ///
    /// let dark = Style::with_derived_foreground(Shape::Rect, Color::rgb(0, 48, 144));
    /// assert_eq!(dark.foreground, Color::WHITE);
    /// let light = Style::with_derived_foreground(Shape::Rect, Color::rgb(255, 220, 0));
    /// assert_eq!(light.foreground, Color::BLACK);
    /// ```
    #[must_use]
    pub const fn with_derived_foreground(shape: Shape, background: Color) -> Self {
        Self::new(shape, background, derive_foreground(background))
    }

    /// Return a copy with an outline color.
    #[must_use]
    pub const fn with_border(mut self, border: Color) -> Self {
        self.border = Some(border);
        self
    }

    /// Whether the badge has an outline.
    #[must_use]
    pub const fn has_border(&self) -> bool {
        self.border.is_some()
    }
}

/// Pick black or white text for a background color.
#[must_use]
pub const fn derive_foreground(background: Color) -> Color {
    if background.is_dark() {
        Color::WHITE
    } else {
        Color::BLACK
    }
}
