//! Per-item salted multi-digest stage.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::core::hasher::FastDigest;
use crate::core::pipeline::{PipelineValue, Stage};
use crate::error::StageError;
use crate::events::{null_sender, Event, EventSender, StageEvent, StageName};

/// Number of salted sub-digests concatenated per item.
pub const SALT_COUNT: usize = 6;

/// Expands each input string into the concatenation of [`SALT_COUNT`]
/// salted fast digests: `fast("0" + s) .. fast("5" + s)`.
///
/// Every item gets its own worker thread, and within one item all six
/// salted digests run concurrently. The sub-results are joined in salt
/// order - concatenation order is part of the signature's definition,
/// whatever order the six threads happen to finish in.
pub struct MultiHashStage {
    fast: Arc<dyn FastDigest>,
    events: EventSender,
}

impl MultiHashStage {
    /// Create the stage over the given fast digest.
    pub fn new(fast: Arc<dyn FastDigest>) -> Self {
        Self {
            fast,
            events: null_sender(),
        }
    }

    /// Report per-item progress through `events`.
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }
}

impl Stage for MultiHashStage {
    fn name(&self) -> &'static str {
        StageName::MultiHash.as_str()
    }

    fn run(
        &self,
        input: Receiver<PipelineValue>,
        output: Sender<PipelineValue>,
    ) -> Result<(), StageError> {
        self.events.send(Event::Stage(StageEvent::Started {
            stage: StageName::MultiHash,
        }));

        let completed = Arc::new(AtomicUsize::new(0));
        let mut workers = Vec::new();
        let mut fault: Option<StageError> = None;

        for value in input.iter() {
            let text = match value.into_text(self.name()) {
                Ok(s) => s,
                Err(wiring_fault) => {
                    fault = Some(wiring_fault);
                    break;
                }
            };

            let fast = Arc::clone(&self.fast);
            let out = output.clone();
            let events = self.events.clone();
            let completed = Arc::clone(&completed);
            workers.push(thread::spawn(move || -> Result<(), StageError> {
                let salted: Vec<_> = (0..SALT_COUNT)
                    .map(|salt| {
                        let fast = Arc::clone(&fast);
                        let data = text.clone();
                        thread::spawn(move || fast.digest(&format!("{salt}{data}")))
                    })
                    .collect();

                // Join in salt order regardless of completion order.
                let mut block = String::new();
                for sub in salted {
                    block.push_str(&sub.join().map_err(|_| StageError::WorkerPanicked {
                        stage: StageName::MultiHash.as_str(),
                    })?);
                }

                let _ = out.send(PipelineValue::Text(block));

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                events.send(Event::Stage(StageEvent::ItemFinished {
                    stage: StageName::MultiHash,
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
                            stage: StageName::MultiHash.as_str(),
                        });
                    }
                }
            }
        }

        self.events.send(Event::Stage(StageEvent::Completed {
            stage: StageName::MultiHash,
            items_out: completed.load(Ordering::SeqCst),
        }));

        match fault {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }
}
