//!
//! Optionally-masked data, used for outbound header values where some
//! entries (authorization credentials) are secret and others are not.
//!

use zeroize::Zeroize;

use crate::{ExposeInterface, PeekInterface, SensitiveValue};

/// An enum that allows us to optionally mask data, based on which variant
/// the data is stored in.
pub enum Maskable<T: Zeroize> {
    /// Variant which masks the data by wrapping it in a SensitiveValue
    Masked(SensitiveValue<T>),
    /// Variant which doesn't mask the data
    Normal(T),
}

impl<T: Zeroize + std::fmt::Debug> std::fmt::Debug for Maskable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Masked(secret_value) => std::fmt::Debug::fmt(secret_value, f),
            Self::Normal(value) => std::fmt::Debug::fmt(value, f),
        }
    }
}

impl<T: Zeroize + PartialEq> PartialEq for Maskable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.peek_inner().eq(other.peek_inner())
    }
}

impl<T: Zeroize + Eq> Eq for Maskable<T> {}

impl<T: Zeroize> Maskable<T> {
    /// Borrow the inner data regardless of masking
    pub fn peek_inner(&self) -> &T {
        match self {
            Self::Masked(inner_secret) => inner_secret.peek(),
            Self::Normal(inner) => inner,
        }
    }

    /// Get the inner data while consuming self
    pub fn into_inner(self) -> T {
        match self {
            Self::Masked(inner_secret) => inner_secret.expose(),
            Self::Normal(inner) => inner,
        }
    }

    /// Whether the value is masked when formatted or logged
    pub fn is_masked(&self) -> bool {
        matches!(self, Self::Masked(_))
    }

    /// Create a new masked data
    pub fn new_masked(item: SensitiveValue<T>) -> Self {
        Self::Masked(item)
    }

    /// Create a new non-masked data
    pub fn new_normal(item: T) -> Self {
        Self::Normal(item)
    }
}

/// Trait for providing a method on custom types for creating [`Maskable`]
pub trait Mask {
    /// The inner type of the resulting [`Maskable`]
    type Output: Zeroize;

    /// Wrap self into a masked [`Maskable`]
    fn into_masked(self) -> Maskable<Self::Output>;
}

impl Mask for String {
    type Output = Self;
    fn into_masked(self) -> Maskable<Self::Output> {
        Maskable::new_masked(self.into())
    }
}

impl Mask for SensitiveValue<String> {
    type Output = String;
    fn into_masked(self) -> Maskable<Self::Output> {
        Maskable::new_masked(self)
    }
}

impl<T: Zeroize> From<T> for Maskable<T> {
    fn from(value: T) -> Self {
        Self::new_normal(value)
    }
}

impl From<&str> for Maskable<String> {
    fn from(value: &str) -> Self {
        Self::new_normal(value.to_string())
    }
}
