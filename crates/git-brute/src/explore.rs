//! The candidate enumerator.
//!
//! Candidates are `1, 2, 3, ...` pushed onto a bounded queue. The producer
//! blocks while the queue is full, so it never runs far ahead of the
//! workers. It stops when the counter wraps, when an optional ceiling is
//! passed, when the gate closes, or when every consumer has gone away.

use std::io;
use std::thread;

use crossbeam::channel::{bounded, Receiver, Sender};

use crate::CancellationGate;

/// Why the enumerator stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreEnd {
    /// The counter wrapped back to zero.
    Wrapped,
    /// The configured ceiling was emitted.
    Ceiling,
    /// The gate closed.
    Cancelled,
    /// No receivers remain.
    Disconnected,
}

/// Emit increasing candidates on `tx` until one of the [`ExploreEnd`] conditions.
///
/// `ceiling`, when set, is the last candidate emitted.
pub fn explore(tx: &Sender<u64>, ceiling: Option<u64>, gate: &CancellationGate) -> ExploreEnd {
    let mut candidate: u64 = 0;
    loop {
        candidate = candidate.wrapping_add(1);
        if candidate == 0 {
            return ExploreEnd::Wrapped;
        }
        if ceiling.is_some_and(|last| candidate > last) {
            return ExploreEnd::Ceiling;
        }
        if gate.is_closed() {
            return ExploreEnd::Cancelled;
        }
        if tx.send(candidate).is_err() {
            return ExploreEnd::Disconnected;
        }
    }
}

/// Start the enumerator on its own thread and return the consuming end.
///
/// The queue closes once the enumerator stops.
pub fn spawn(
    capacity: usize,
    ceiling: Option<u64>,
    gate: CancellationGate,
) -> io::Result<Receiver<u64>> {
    let (tx, rx) = bounded(capacity);
    thread::Builder::new()
        .name("gitbrute-explore".into())
        .spawn(move || {
            let end = explore(&tx, ceiling, &gate);
            tracing::debug!(?end, "candidate enumerator stopped");
        })?;
    Ok(rx)
}
