//! # Stages Module
//!
//! The three concrete stages of the signing pipeline.
//!
//! ## Data flow
//! integers → [`SingleHashStage`] → strings → [`MultiHashStage`] →
//! strings → [`CombineStage`] → one final signature string
//!
//! ## Concurrency
//! The two hashing stages hand every item to its own worker thread the
//! moment it arrives - fan-out is deliberately unbounded; the caller
//! controls item volume. Within one item the sub-digests fan out again.
//! Only [`CombineStage`] is sequential: it is a full barrier that cannot
//! emit until upstream closes.

mod combine;
mod multi_hash;
mod single_hash;

pub use combine::CombineStage;
pub use multi_hash::{MultiHashStage, SALT_COUNT};
pub use single_hash::SingleHashStage;
