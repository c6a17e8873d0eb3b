//!
//! Abstract access interfaces for secret values.
//!

/// Interface to expose a reference to an inner secret
pub trait PeekInterface<S> {
    /// Only method providing borrow access to the secret value.
    fn peek(&self) -> &S;
}

/// Interface that consumes the wrapper and releases the inner value.
///
/// Once exposed there is no wrapped copy left behind to protect; the caller
/// owns the secret from that point on.
pub trait ExposeInterface<S> {
    /// Consume the wrapper and return the inner value
    fn expose(self) -> S;
}
