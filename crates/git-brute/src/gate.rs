//! First-match cancellation shared by every worker of one search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct GateState {
    closed: AtomicBool,
    claimed: AtomicBool,
}

/// Shared stop signal plus a single-use right to publish a winner.
///
/// Workers poll [`is_closed`](CancellationGate::is_closed) once per
/// candidate. A worker that finds a match must [`claim`](CancellationGate::claim)
/// before publishing; only the first claim succeeds, so at most one winner
/// is ever published even if several workers match around the same time.
#[derive(Debug, Clone, Default)]
pub struct CancellationGate {
    state: Arc<GateState>,
}

impl CancellationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::Acquire)
    }

    /// Signal every holder to stop. Idempotent.
    pub fn close(&self) {
        self.state.closed.store(true, Ordering::Release);
    }

    /// Take the right to publish. Returns `true` for exactly one caller.
    pub fn claim(&self) -> bool {
        self.state
            .claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
