//!
//! Structure describing a single-owner secret.
//!

use std::{fmt, marker::PhantomData};

use zeroize::Zeroize;

use crate::{strategy::Strategy, ExposeInterface, PeekInterface, WithType};

/// A secret value with single-owner semantics.
///
/// Unlike a conventional secrecy wrapper this type deliberately does NOT
/// implement [`Clone`]: duplicating card or credential material is a
/// programming error, and the missing impl turns that error into a compile
/// failure. The inner value is wiped from memory when the wrapper is
/// dropped; [`ExposeInterface::expose`] consumes the wrapper and hands the
/// value to the caller, leaving nothing behind to wipe.
///
/// ## Masking
/// The second generic parameter selects a [`Strategy`] applied whenever the
/// value is formatted through `Debug`:
///
/// ```
/// use opayo_masking::{CardNumber, SensitiveValue};
///
/// let pan: SensitiveValue<String, CardNumber> =
///     SensitiveValue::new("4929000005559".to_string());
/// assert_eq!("**** 5559", format!("{:?}", pan));
/// ```
pub struct SensitiveValue<S, I = WithType>
where
    S: Zeroize,
    I: Strategy<S>,
{
    // Vacated only by `expose`, which consumes the wrapper.
    pub(crate) inner: Option<S>,
    pub(crate) marker: PhantomData<I>,
}

impl<S, I> SensitiveValue<S, I>
where
    S: Zeroize,
    I: Strategy<S>,
{
    /// Take ownership of a secret value
    pub fn new(secret: S) -> Self {
        Self {
            inner: Some(secret),
            marker: PhantomData,
        }
    }
}

impl<S, I> PeekInterface<S> for SensitiveValue<S, I>
where
    S: Zeroize,
    I: Strategy<S>,
{
    fn peek(&self) -> &S {
        match self.inner.as_ref() {
            Some(value) => value,
            // `expose` is the only vacating operation and it consumes the
            // wrapper, so no live borrow can observe the vacated state.
            None => unreachable!("sensitive value accessed after expose"),
        }
    }
}

impl<S, I> ExposeInterface<S> for SensitiveValue<S, I>
where
    S: Zeroize,
    I: Strategy<S>,
{
    fn expose(mut self) -> S {
        match self.inner.take() {
            Some(value) => value,
            None => unreachable!("sensitive value exposed twice"),
        }
    }
}

impl<S, I> From<S> for SensitiveValue<S, I>
where
    S: Zeroize,
    I: Strategy<S>,
{
    fn from(secret: S) -> Self {
        Self::new(secret)
    }
}

impl<S, I> PartialEq for SensitiveValue<S, I>
where
    S: Zeroize + PartialEq,
    I: Strategy<S>,
{
    fn eq(&self, other: &Self) -> bool {
        self.peek().eq(other.peek())
    }
}

impl<S, I> Eq for SensitiveValue<S, I>
where
    S: Zeroize + Eq,
    I: Strategy<S>,
{
}

impl<S, I> fmt::Debug for SensitiveValue<S, I>
where
    S: Zeroize,
    I: Strategy<S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.as_ref() {
            Some(value) => I::fmt(value, f),
            None => f.write_str("*** exposed ***"),
        }
    }
}

impl<S, I> Drop for SensitiveValue<S, I>
where
    S: Zeroize,
    I: Strategy<S>,
{
    fn drop(&mut self) {
        if let Some(value) = self.inner.as_mut() {
            value.zeroize();
        }
    }
}
