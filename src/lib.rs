//! # Sequence Signer
//!
//! Order-independent composite signatures over integer sequences, computed
//! by a concurrent fan-out/fan-in pipeline.
//!
//! ## Core Philosophy
//! - **Deterministic** - the same input set produces the same signature
//!   under any thread scheduling
//! - **Concurrent by default** - stages, items, and per-item sub-digests
//!   all overlap; fan-out is unbounded
//! - **One gated resource** - the slow digest is never invoked twice at
//!   once, however many workers want it
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation
//! layers:
//! - `core` - the signing pipeline engine
//! - `events` - event-driven progress reporting (UI-ready)
//! - `error` - typed pipeline faults

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SignerError};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
