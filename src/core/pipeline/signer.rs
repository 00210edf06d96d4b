//! High-level signing façade over the pipeline executor.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::executor::{PipelineExecutor, Stage};
use super::value::PipelineValue;
use crate::core::hasher::{FastDigest, SerializationGate, Sha256Digest, SlowDigest, Xxh3Digest};
use crate::core::stages::{CombineStage, MultiHashStage, SingleHashStage};
use crate::error::{Result, SignerError};
use crate::events::{null_sender, Event, EventSender, PipelineEvent, RunSummary};

/// Result of a signing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    /// The composite signature string
    pub value: String,
    /// Bookkeeping for the run that produced it
    pub summary: RunSummary,
}

/// Builder for a [`Signer`]
pub struct SignerBuilder {
    fast: Arc<dyn FastDigest>,
    slow: Arc<dyn SlowDigest>,
}

impl SignerBuilder {
    /// Start from the default digest pair (xxh3 fast, SHA-256 slow).
    pub fn new() -> Self {
        Self {
            fast: Arc::new(Xxh3Digest),
            slow: Arc::new(Sha256Digest),
        }
    }

    /// Swap in a different fast digest.
    pub fn fast(mut self, fast: impl FastDigest + 'static) -> Self {
        self.fast = Arc::new(fast);
        self
    }

    /// Swap in a different slow digest.
    pub fn slow(mut self, slow: impl SlowDigest + 'static) -> Self {
        self.slow = Arc::new(slow);
        self
    }

    /// Build the signer.
    pub fn build(self) -> Signer {
        Signer {
            fast: self.fast,
            slow: self.slow,
        }
    }
}

impl Default for SignerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes order-independent composite signatures over integer sequences.
///
/// One `Signer` can run any number of sequences; every run gets fresh
/// channels, fresh stage threads, and a fresh [`SerializationGate`] - no
/// state survives across runs.
pub struct Signer {
    fast: Arc<dyn FastDigest>,
    slow: Arc<dyn SlowDigest>,
}

impl Signer {
    /// Create a signer builder
    pub fn builder() -> SignerBuilder {
        SignerBuilder::new()
    }

    /// Sign `inputs` without progress reporting.
    pub fn sign(&self, inputs: &[u64]) -> Result<Signature> {
        self.sign_with_events(inputs, &null_sender())
    }

    /// Sign `inputs`, reporting progress through `events`.
    ///
    /// Runs the three-stage pipeline to completion and returns the single
    /// terminal value. Any stage fault aborts the run; an aborted run
    /// produces no signature, never a partial one.
    pub fn sign_with_events(&self, inputs: &[u64], events: &EventSender) -> Result<Signature> {
        let start = Instant::now();
        events.send(Event::Pipeline(PipelineEvent::Started {
            total_items: inputs.len(),
        }));

        let gate = Arc::new(SerializationGate::new());
        let stages: Vec<Box<dyn Stage>> = vec![
            Box::new(
                SingleHashStage::new(
                    Arc::clone(&self.fast),
                    Arc::clone(&self.slow),
                    Arc::clone(&gate),
                )
                .with_events(events.clone()),
            ),
            Box::new(MultiHashStage::new(Arc::clone(&self.fast)).with_events(events.clone())),
            Box::new(CombineStage::new().with_events(events.clone())),
        ];
        let initial: Vec<PipelineValue> =
            inputs.iter().copied().map(PipelineValue::Int).collect();

        let value = match Self::terminal_value(PipelineExecutor::run(stages, initial)) {
            Ok(value) => value,
            Err(error) => {
                events.send(Event::Pipeline(PipelineEvent::Error {
                    message: error.to_string(),
                }));
                return Err(error);
            }
        };

        let summary = RunSummary {
            run_id: Uuid::new_v4(),
            total_items: inputs.len(),
            signature_len: value.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };
        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: summary.clone(),
        }));

        tracing::debug!(
            items = summary.total_items,
            len = summary.signature_len,
            "signing run finished"
        );
        Ok(Signature { value, summary })
    }

    /// The combine stage emits exactly one text value; anything else means
    /// the pipeline terminated without settling on a signature.
    fn terminal_value(outcome: Result<Vec<PipelineValue>>) -> Result<String> {
        let mut collected = outcome?;
        if collected.len() != 1 {
            return Err(SignerError::NoResult);
        }
        match collected.pop() {
            Some(PipelineValue::Text(signature)) => Ok(signature),
            _ => Err(SignerError::NoResult),
        }
    }
}

impl Default for Signer {
    fn default() -> Self {
        Self::builder().build()
    }
}
