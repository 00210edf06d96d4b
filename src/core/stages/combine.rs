//! Terminal sort-and-join barrier stage.

use crossbeam_channel::{Receiver, Sender};

use crate::core::pipeline::{PipelineValue, Stage};
use crate::error::StageError;
use crate::events::{null_sender, Event, EventSender, StageEvent, StageName};

/// Separator between sorted per-item blocks in the final signature.
const BLOCK_SEPARATOR: &str = "_";

/// Collects every upstream block, sorts byte-wise ascending, and emits the
/// single `"_"`-joined signature.
///
/// This stage is a full barrier: nothing is emitted until the input
/// channel closes. Upstream blocks arrive in completion order, and blocks
/// carry no item identity, so sorting is the only way to make the
/// signature a function of the input *set* rather than of scheduling.
pub struct CombineStage {
    events: EventSender,
}

impl CombineStage {
    pub fn new() -> Self {
        Self {
            events: null_sender(),
        }
    }

    /// Report stage lifecycle through `events`.
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }
}

impl Default for CombineStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for CombineStage {
    fn name(&self) -> &'static str {
        StageName::Combine.as_str()
    }

    fn run(
        &self,
        input: Receiver<PipelineValue>,
        output: Sender<PipelineValue>,
    ) -> Result<(), StageError> {
        self.events.send(Event::Stage(StageEvent::Started {
            stage: StageName::Combine,
        }));

        let mut blocks = Vec::new();
        for value in input.iter() {
            blocks.push(value.into_text(self.name())?);
        }

        blocks.sort();
        let _ = output.send(PipelineValue::Text(blocks.join(BLOCK_SEPARATOR)));

        self.events.send(Event::Stage(StageEvent::Completed {
            stage: StageName::Combine,
            items_out: 1,
        }));
        Ok(())
    }
}
