//! Pipeline execution: stage contract, channel wiring, and the join point.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread;

use super::value::PipelineValue;
use crate::error::{Result, SignerError, StageError};

/// One pipeline processing step.
///
/// A stage consumes values from `input` until the channel closes and
/// produces values on `output`. It is the only writer of its output; the
/// executor closes the channel (by dropping the `Sender`) when `run`
/// returns, so a stage must not return before all work it spawned has
/// completed and emitted.
pub trait Stage: Send {
    /// Stable name used in logs and fault messages.
    fn name(&self) -> &'static str;

    /// Drive the stage to completion.
    ///
    /// Returning `Err` aborts the whole run. A stage that stops early must
    /// still join every worker it spawned before returning.
    fn run(
        &self,
        input: Receiver<PipelineValue>,
        output: Sender<PipelineValue>,
    ) -> std::result::Result<(), StageError>;
}

/// Composes stages into a running pipeline and drives them to completion.
///
/// Wiring rules:
/// - one rendezvous channel joins each adjacent stage pair, so a send
///   blocks until the next stage is ready to receive - unbuffered handoff
///   is the sole backpressure mechanism
/// - a feeder thread drives the first stage's input and closes it when the
///   initial values are exhausted
/// - each stage runs on its own thread; stages execute concurrently
pub struct PipelineExecutor;

impl PipelineExecutor {
    /// Execute `stages` in order over `initial` values and collect
    /// everything the terminal stage emits.
    ///
    /// Returns only after every stage thread has been joined. If any stage
    /// faulted, the earliest real fault in pipeline order is returned and
    /// the collected output is discarded - an aborted run produces no
    /// result at all.
    pub fn run(
        stages: Vec<Box<dyn Stage>>,
        initial: Vec<PipelineValue>,
    ) -> Result<Vec<PipelineValue>> {
        if stages.is_empty() {
            return Err(SignerError::Config(
                "pipeline needs at least one stage".to_string(),
            ));
        }

        let names: Vec<&'static str> = stages.iter().map(|s| s.name()).collect();

        let (feed, mut upstream) = bounded::<PipelineValue>(0);
        let feeder = thread::spawn(move || {
            for value in initial {
                // A refused send means the first stage faulted and hung up;
                // the remaining input has nowhere to go.
                if feed.send(value).is_err() {
                    break;
                }
            }
        });

        let mut workers = Vec::with_capacity(stages.len());
        for stage in stages {
            let (tx, rx) = bounded(0);
            let input = std::mem::replace(&mut upstream, rx);
            workers.push(thread::spawn(move || {
                tracing::debug!(stage = stage.name(), "stage started");
                let outcome = stage.run(input, tx);
                tracing::debug!(stage = stage.name(), ok = outcome.is_ok(), "stage finished");
                outcome
                // `tx` drops here, closing the next stage's input
            }));
        }

        // Drain the terminal channel before joining: the last stage blocks
        // on its rendezvous sends until someone receives.
        let collected: Vec<PipelineValue> = upstream.iter().collect();

        feeder.join().ok();

        let mut fault: Option<StageError> = None;
        for (worker, name) in workers.into_iter().zip(names) {
            match worker.join() {
                Ok(Ok(())) => {}
                Ok(Err(stage_fault)) => {
                    if fault.is_none() {
                        fault = Some(stage_fault);
                    }
                }
                Err(_) => {
                    if fault.is_none() {
                        fault = Some(StageError::WorkerPanicked { stage: name });
                    }
                }
            }
        }

        match fault {
            Some(stage_fault) => Err(stage_fault.into()),
            None => Ok(collected),
        }
    }
}
