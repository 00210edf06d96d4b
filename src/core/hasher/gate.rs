//! Exclusive-access gate for the slow digest.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mutual-exclusion handle serializing calls to the slow digest.
///
/// The slow digest's external contract allows at most one in-flight call
/// process-wide, however many item workers are running. Acquisition is
/// scoped: [`enter`](SerializationGate::enter) returns a guard and the
/// gate reopens when the guard drops, on every exit path including an
/// unwinding worker.
pub struct SerializationGate {
    inner: Mutex<()>,
}

/// RAII guard; the gate reopens when this is dropped.
pub struct GateGuard<'a> {
    _held: MutexGuard<'a, ()>,
}

impl SerializationGate {
    /// Create an open gate.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(()),
        }
    }

    /// Block until the gate is free, then hold it for the guard's lifetime.
    ///
    /// A poisoned mutex only means some worker panicked while holding the
    /// gate; the guarded resource is still exclusive, so the poison is
    /// absorbed instead of wedging every remaining worker. The panic
    /// itself still aborts the run at the stage's join point.
    pub fn enter(&self) -> GateGuard<'_> {
        let held = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        GateGuard { _held: held }
    }
}

impl Default for SerializationGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn guard_reopens_gate_on_drop() {
        let gate = SerializationGate::new();
        drop(gate.enter());
        // Re-entering after drop must not deadlock
        drop(gate.enter());
    }

    #[test]
    fn second_caller_blocks_until_release() {
        let gate = Arc::new(SerializationGate::new());
        let guard = gate.enter();

        let gate2 = Arc::clone(&gate);
        let handle = thread::spawn(move || {
            let _g = gate2.enter();
            42
        });

        // Give the second thread time to block on the gate
        thread::sleep(Duration::from_millis(50));
        drop(guard);

        assert_eq!(handle.join().unwrap(), 42);
    }

    #[test]
    fn holders_never_overlap() {
        let gate = Arc::new(SerializationGate::new());
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let in_flight = Arc::clone(&in_flight);
                let max_seen = Arc::clone(&max_seen);
                thread::spawn(move || {
                    let _guard = gate.enter();
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    max_seen.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(2));
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panic_while_holding_does_not_wedge_the_gate() {
        let gate = Arc::new(SerializationGate::new());

        let gate2 = Arc::clone(&gate);
        let panicker = thread::spawn(move || {
            let _guard = gate2.enter();
            panic!("worker died mid-call");
        });
        assert!(panicker.join().is_err());

        // The next caller must still get through
        drop(gate.enter());
    }
}
