//! Event channel implementation using crossbeam-channel.
//!
//! Thin wrappers around crossbeam's endpoints so the pipeline can report
//! progress to any subscriber thread without depending on one.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use super::Event;

/// Sends events out of the signing pipeline.
///
/// Clones freely across stage and item-worker threads.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Send an event.
    ///
    /// A dropped receiver silently discards the event: progress reporting
    /// must never decide whether a run succeeds.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receives events emitted by a signing run.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event, or `None` once all senders are gone
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Receive without blocking
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Iterate over events until every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Factory for event channel endpoints.
pub struct EventChannel;

impl EventChannel {
    /// Create an unbounded event channel.
    ///
    /// Events are small; the default channel never blocks a worker.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }

    /// Create a bounded channel when the subscriber wants backpressure.
    pub fn bounded(capacity: usize) -> (EventSender, EventReceiver) {
        let (sender, receiver) = bounded(capacity);
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// An event sender with no subscriber.
///
/// The default for runs that don't report progress, and handy in tests.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}
