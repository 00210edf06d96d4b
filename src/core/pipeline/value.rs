//! The value type flowing between pipeline stages.

use crate::error::StageError;

/// A value on a stage boundary channel.
///
/// Stages are composed dynamically, so the payload is a tagged union
/// rather than a per-boundary generic: stage 0 consumes `Int`, every later
/// boundary carries `Text`. A variant arriving at a stage that does not
/// expect it is a wiring fault and aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineValue {
    /// Raw input integer (stage-0 payload)
    Int(u64),
    /// Digest text produced by a hashing stage
    Text(String),
}

impl PipelineValue {
    /// Variant name used in fault messages
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineValue::Int(_) => "integer",
            PipelineValue::Text(_) => "text",
        }
    }

    /// Consume as an integer, or raise `stage`'s type-mismatch fault.
    pub fn into_int(self, stage: &'static str) -> Result<u64, StageError> {
        match self {
            PipelineValue::Int(n) => Ok(n),
            other => Err(StageError::TypeMismatch {
                stage,
                expected: "integer",
                found: other.kind(),
            }),
        }
    }

    /// Consume as text, or raise `stage`'s type-mismatch fault.
    pub fn into_text(self, stage: &'static str) -> Result<String, StageError> {
        match self {
            PipelineValue::Text(s) => Ok(s),
            other => Err(StageError::TypeMismatch {
                stage,
                expected: "text",
                found: other.kind(),
            }),
        }
    }
}

impl From<u64> for PipelineValue {
    fn from(n: u64) -> Self {
        PipelineValue::Int(n)
    }
}

impl From<String> for PipelineValue {
    fn from(s: String) -> Self {
        PipelineValue::Text(s)
    }
}
