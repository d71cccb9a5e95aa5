//! Canonical transit taxonomy for the ptcanon normalizer.
//!
//! Upstream networks describe their lines and stops in many dialects. The
//! types here are the single vocabulary every adapter normalizes into:
//! [`Product`] categories, [`Line`] values, [`Style`] badges and
//! [`PlacePair`] splits of display strings. They are immutable values with no
//! behaviour beyond validation and formatting.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod line;
mod network;
mod place;
mod product;
pub mod style;

pub use line::{Line, LineAttr, UNKNOWN_PRODUCT_CODE};
pub use network::{NetworkId, NetworkIdError};
pub use place::{LocationKind, PlacePair};
pub use product::{Product, ProductParseError, products_from_codes, products_to_codes};
pub use style::{Color, ColorParseError, Shape, Style};
