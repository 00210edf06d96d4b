//! # Hasher Module
//!
//! Digest primitives for the signature pipeline.
//!
//! ## Design
//! Two digest roles with different concurrency contracts:
//! - [`FastDigest`] is cheap and safe to call from any number of workers
//!   at once
//! - [`SlowDigest`] models a rate-limited external dependency: at most one
//!   call may be in flight process-wide, enforced at the call site by the
//!   [`SerializationGate`]
//!
//! Both are deterministic and pure; swapping implementations changes the
//! signature bytes but never its ordering or determinism properties.

mod gate;
mod sha256;
mod traits;
mod xxh3;

pub use gate::{GateGuard, SerializationGate};
pub use sha256::Sha256Digest;
pub use traits::{FastDigest, SlowDigest};
pub use xxh3::Xxh3Digest;
