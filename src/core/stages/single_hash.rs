//! Per-item direct/indirect digest stage.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::core::hasher::{FastDigest, SerializationGate, SlowDigest};
use crate::core::pipeline::{PipelineValue, Stage};
use crate::error::StageError;
use crate::events::{null_sender, Event, EventSender, StageEvent, StageName};

/// Separator between the direct and indirect digest of one item.
const PAIR_SEPARATOR: &str = "~";

/// Computes `fast(s) ~ fast(slow(s))` for every input integer, where `s`
/// is the integer's decimal string.
///
/// Every item gets its own worker thread as soon as it arrives. The slow
/// digest is the one shared, serialized resource: workers queue on the
/// [`SerializationGate`] for it while all fast digest calls run unguarded.
/// The indirect digest `fast(slow(s))` is computed on an inner thread so
/// it overlaps with the direct digest of the same item.
///
/// Results are emitted in completion order, not input order; downstream
/// stages must not assume any ordering.
pub struct SingleHashStage {
    fast: Arc<dyn FastDigest>,
    slow: Arc<dyn SlowDigest>,
    gate: Arc<SerializationGate>,
    events: EventSender,
}

impl SingleHashStage {
    /// Create the stage over the given digest implementations and gate.
    ///
    /// The gate is shared by reference so a caller can hang several
    /// pipelines off one external resource if it ever needs to.
    pub fn new(
        fast: Arc<dyn FastDigest>,
        slow: Arc<dyn SlowDigest>,
        gate: Arc<SerializationGate>,
    ) -> Self {
        Self {
            fast,
            slow,
            gate,
            events: null_sender(),
        }
    }

    /// Report per-item progress through `events`.
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }
}

impl Stage for SingleHashStage {
    fn name(&self) -> &'static str {
        StageName::SingleHash.as_str()
    }

    fn run(
        &self,
        input: Receiver<PipelineValue>,
        output: Sender<PipelineValue>,
    ) -> Result<(), StageError> {
        self.events.send(Event::Stage(StageEvent::Started {
            stage: StageName::SingleHash,
        }));

        let completed = Arc::new(AtomicUsize::new(0));
        let mut workers = Vec::new();
        let mut fault: Option<StageError> = None;

        for value in input.iter() {
            let number = match value.into_int(self.name()) {
                Ok(n) => n,
                Err(wiring_fault) => {
                    // Fail fast: stop consuming, but still join the workers
                    // already in flight before surfacing the fault.
                    fault = Some(wiring_fault);
                    break;
                }
            };
            let data = number.to_string();

            let fast = Arc::clone(&self.fast);
            let slow = Arc::clone(&self.slow);
            let gate = Arc::clone(&self.gate);
            let out = output.clone();
            let events = self.events.clone();
            let completed = Arc::clone(&completed);
            workers.push(thread::spawn(move || -> Result<(), StageError> {
                let slow_digest = {
                    let _gate = gate.enter();
                    slow.digest(&data)
                };

                // The indirect digest overlaps with the direct one below.
                let indirect = {
                    let fast = Arc::clone(&fast);
                    thread::spawn(move || fast.digest(&slow_digest))
                };
                let direct = fast.digest(&data);
                let indirect = indirect.join().map_err(|_| StageError::WorkerPanicked {
                    stage: StageName::SingleHash.as_str(),
                })?;

                // A refused send only means a downstream stage already
                // faulted; that stage's fault decides the run.
                let _ = out.send(PipelineValue::Text(format!(
                    "{direct}{PAIR_SEPARATOR}{indirect}"
                )));

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                events.send(Event::Stage(StageEvent::ItemFinished {
                    stage: StageName::SingleHash,
                    completed: done,
                }));
                Ok(())
            }));
        }

        for worker in workers {
            match worker.join() {
                Ok(Ok(())) => {}
                Ok(Err(worker_fault)) => {
                    if fault.is_none() {
                        fault = Some(worker_fault);
                    }
                }
                Err(_) => {
                    if fault.is_none() {
                        fault = Some(StageError::WorkerPanicked {
                            stage: StageName::SingleHash.as_str(),
                        });
                    }
                }
            }
        }

        self.events.send(Event::Stage(StageEvent::Completed {
            stage: StageName::SingleHash,
            items_out: completed.load(Ordering::SeqCst),
        }));

        match fault {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }
}
