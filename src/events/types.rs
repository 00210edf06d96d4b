//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All events emitted by the signing pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Per-stage lifecycle and progress events
    Stage(StageEvent),
    /// Run-level events
    Pipeline(PipelineEvent),
}

/// The fixed stage roster of the signing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageName {
    /// Per-item direct/indirect digest pair
    SingleHash,
    /// Per-item six-way salted digest block
    MultiHash,
    /// Terminal sort-and-join barrier
    Combine,
}

impl StageName {
    /// Stable identifier used in logs and fault messages
    pub const fn as_str(&self) -> &'static str {
        match self {
            StageName::SingleHash => "single-hash",
            StageName::MultiHash => "multi-hash",
            StageName::Combine => "combine",
        }
    }
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events emitted by individual stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageEvent {
    /// The stage began consuming its input channel
    Started { stage: StageName },
    /// One item worker finished; `completed` counts items done so far.
    ///
    /// Workers finish in completion order, not input order, so this is a
    /// running count rather than an item index.
    ItemFinished { stage: StageName, completed: usize },
    /// The stage's input closed and all of its workers were joined
    Completed { stage: StageName, items_out: usize },
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// The run started with this many input items
    Started { total_items: usize },
    /// The run finished and produced a signature
    Completed { summary: RunSummary },
    /// The run aborted; no signature was produced
    Error { message: String },
}

/// Summary of a completed signing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique id for this run
    pub run_id: Uuid,
    /// Number of input integers signed
    pub total_items: usize,
    /// Length of the final signature in bytes
    pub signature_len: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}
