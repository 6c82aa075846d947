//! Fixed-step tick scheduling with an explicit cancellation handle.
//!
//! Engines never own timers. A session owns one `Ticker` and feeds whole
//! steps into the active engine; closing the session cancels the handle,
//! after which no step is ever produced again, regardless of how much wall
//! time is reported.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation token shared between a `Ticker` and its owner.
#[derive(Debug, Clone)]
pub struct TickHandle(Arc<AtomicBool>);

impl TickHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Fixed-step accumulator: wall time in, whole steps out.
#[derive(Debug)]
pub struct Ticker {
    step_ms: u64,
    accum_ms: u64,
    handle: TickHandle,
}

impl Ticker {
    pub fn new(step_ms: u64) -> Self {
        Self {
            step_ms: step_ms.max(1),
            accum_ms: 0,
            handle: TickHandle(Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn step_ms(&self) -> u64 {
        self.step_ms
    }

    pub fn handle(&self) -> TickHandle {
        self.handle.clone()
    }

    /// Report elapsed wall time; returns the number of whole steps now due.
    /// A cancelled ticker yields nothing and drops any accumulated time.
    pub fn advance(&mut self, elapsed_ms: u64) -> u64 {
        if self.handle.is_cancelled() {
            self.accum_ms = 0;
            return 0;
        }
        self.accum_ms = self.accum_ms.saturating_add(elapsed_ms);
        let steps = self.accum_ms / self.step_ms;
        self.accum_ms %= self.step_ms;
        steps
    }
}
