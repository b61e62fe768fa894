//! State shared between the workers and the interrupt listener.
//!
//! Everything here is a lock-free atomic. Workers only add to `hits` and read
//! `stop`; the listener reads `hits` and owns the trigger timestamp.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Two interrupts closer together than this stop the run instead of reporting.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(1);

const NEVER_TRIGGERED: u64 = u64::MAX;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterruptAction {
    /// Print the estimate carried here.
    Report(f64),
    /// The stop flag was raised; print nothing.
    Stop,
}

#[derive(Debug)]
pub struct SharedContext {
    total_points: u64,
    hits: AtomicU64,
    stop: AtomicBool,
    origin: Instant,
    // Nanoseconds since `origin` of the last reporting interrupt.
    last_trigger_ns: AtomicU64,
}

impl SharedContext {
    pub fn new(total_points: u64) -> Self {
        Self {
            total_points,
            hits: AtomicU64::new(0),
            stop: AtomicBool::new(false),
            origin: Instant::now(),
            last_trigger_ns: AtomicU64::new(NEVER_TRIGGERED),
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn add_hits(&self, hits: u64) {
        self.hits.fetch_add(hits, Ordering::Relaxed);
    }

    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// `4 * hits / total_points`, using the requested budget as denominator.
    pub fn estimate(&self) -> f64 {
        4.0 * self.hits() as f64 / self.total_points as f64
    }

    /// Decide what an interrupt arriving at `now` does.
    ///
    /// A second interrupt inside [`DEBOUNCE_WINDOW`] of the last reporting one
    /// raises the stop flag and leaves the timestamp untouched.
    pub fn on_interrupt(&self, now: Instant) -> InterruptAction {
        let current = now.saturating_duration_since(self.origin).as_nanos() as u64;
        let last = self.last_trigger_ns.load(Ordering::SeqCst);

        if last != NEVER_TRIGGERED
            && current.saturating_sub(last) < DEBOUNCE_WINDOW.as_nanos() as u64
        {
            self.request_stop();
            return InterruptAction::Stop;
        }

        self.last_trigger_ns.store(current, Ordering::SeqCst);
        InterruptAction::Report(self.estimate())
    }
}
