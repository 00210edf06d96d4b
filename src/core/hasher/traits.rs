//! Trait definitions for the digest primitives.

/// A cheap digest function, safe for unbounded concurrent invocation.
///
/// Implementations must be deterministic and side-effect free: the final
/// signature is only reproducible if every call with the same input yields
/// the same output.
pub trait FastDigest: Send + Sync {
    /// Digest `input` into a fixed-width lowercase hex string.
    fn digest(&self, input: &str) -> String;
}

/// An expensive digest whose external contract allows at most one
/// in-flight call process-wide.
///
/// The contract is enforced at the call site by the
/// [`SerializationGate`](super::SerializationGate), not inside
/// implementations - an implementation stays a pure function and does not
/// need to know it is being serialized.
pub trait SlowDigest: Send + Sync {
    /// Digest `input` into a fixed-width lowercase hex string.
    fn digest(&self, input: &str) -> String;
}
