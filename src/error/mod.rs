//! # Error Module
//!
//! Typed faults for the signature pipeline.
//!
//! ## Design Principles
//! - **Never panic across a stage boundary** - faults become typed errors
//!   carried to the executor's join point
//! - **Include context** - which stage faulted and what it saw
//! - **Fail fast, fail whole** - a fault aborts the entire run; there are
//!   no retries and no partial signatures

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SignerError {
    #[error("Stage fault: {0}")]
    Stage(#[from] StageError),

    #[error("Pipeline terminated without producing a signature")]
    NoResult,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Faults raised inside a pipeline stage.
///
/// A stage fault aborts the run: the executor still joins every stage
/// thread, then reports the fault to the caller. Any fault means "no
/// signature produced" - there is no partial-result salvage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    /// A value of the wrong variant arrived at a stage boundary.
    ///
    /// Malformed wiring is a programming error, not a data-quality issue,
    /// so the offending item is never skipped.
    #[error("{stage} expected {expected} input, found {found}")]
    TypeMismatch {
        stage: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// An item worker or one of its inner hash workers panicked.
    #[error("worker thread panicked in {stage}")]
    WorkerPanicked { stage: &'static str },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SignerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_names_the_stage_and_variants() {
        let fault = StageError::TypeMismatch {
            stage: "single-hash",
            expected: "integer",
            found: "text",
        };
        let message = fault.to_string();
        assert!(message.contains("single-hash"));
        assert!(message.contains("integer"));
        assert!(message.contains("text"));
    }

    #[test]
    fn worker_panic_names_the_stage() {
        let fault = StageError::WorkerPanicked { stage: "multi-hash" };
        assert!(fault.to_string().contains("multi-hash"));
    }

    #[test]
    fn signer_error_wraps_stage_faults() {
        let error: SignerError = StageError::WorkerPanicked { stage: "combine" }.into();
        assert!(error.to_string().contains("Stage fault"));
    }

    #[test]
    fn no_result_is_explicit_about_missing_output() {
        let message = SignerError::NoResult.to_string();
        assert!(message.contains("without producing"));
    }
}
