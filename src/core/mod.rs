//! # Core Module
//!
//! The UI-agnostic signing engine.
//!
//! ## Modules
//! - `hasher` - digest primitives and the serialization gate
//! - `pipeline` - value/stage contracts, executor, and the signer façade
//! - `stages` - the three concrete signing stages

pub mod hasher;
pub mod pipeline;
pub mod stages;

// Re-export commonly used types
pub use hasher::{FastDigest, SerializationGate, Sha256Digest, SlowDigest, Xxh3Digest};
pub use pipeline::{PipelineExecutor, PipelineValue, Signature, Signer, SignerBuilder, Stage};
pub use stages::{CombineStage, MultiHashStage, SingleHashStage};
