//!
//! Serde interop.
//!
//! Serialization of the real value is opt-in: a type must be marked
//! [`SerializableSecret`] before a wrapper around it will serialize. Request
//! body types rely on this to emit card data on the wire while `Debug`
//! (and therefore logging) stays masked.
//!

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

use crate::{PeekInterface, SensitiveValue, Strategy};

/// Marker trait for secret types which may be serialized onto the wire.
///
/// The absence of a blanket impl is deliberate: wrapping a type in
/// [`SensitiveValue`] removes it from every serialization path until it is
/// explicitly marked.
pub trait SerializableSecret: Serialize {}

impl SerializableSecret for String {}
impl SerializableSecret for u64 {}

impl<S, I> Serialize for SensitiveValue<S, I>
where
    S: SerializableSecret + Zeroize,
    I: Strategy<S>,
{
    fn serialize<T>(&self, serializer: T) -> Result<T::Ok, T::Error>
    where
        T: Serializer,
    {
        self.peek().serialize(serializer)
    }
}

impl<'de, S, I> Deserialize<'de> for SensitiveValue<S, I>
where
    S: Deserialize<'de> + Zeroize,
    I: Strategy<S>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        S::deserialize(deserializer).map(Self::new)
    }
}
