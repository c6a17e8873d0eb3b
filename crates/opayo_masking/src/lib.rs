#![forbid(unsafe_code)]
#![warn(missing_docs)]

//!
//! Secret-keeping wrapper types for card and credential data, with
//! single-owner semantics: no cloning, masked `Debug`, memory wiped on drop.
//!

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/", "README.md"))]

pub use zeroize::{self, Zeroize as ZeroizableSecret};

mod strategy;

pub use strategy::{CardNumber, Strategy, WithType, WithoutType};

mod abs;
pub use abs::{ExposeInterface, PeekInterface};

mod sensitive;
pub use sensitive::SensitiveValue;

pub mod maskable;
pub use maskable::{Mask, Maskable};

#[cfg(feature = "serde")]
mod serde;
#[cfg(feature = "serde")]
pub use crate::serde::SerializableSecret;

/// This module should be included with asterisk.
///
/// `use opayo_masking::prelude::*;`
///
pub mod prelude {
    pub use super::{ExposeInterface, PeekInterface};
}
