//! Clocks and time arithmetic for the engine.
//!
//! The engine never takes time from its caller: every tick reads `elapsed()` from
//! the clock it owns. [`MonotonicClock`] follows the wall clock, [`ManualClock`]
//! is advanced explicitly by a host (fixed-step schedulers, tests).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Elapsed-time source owned by a [`crate::MorphEngine`].
pub trait Clock {
    /// Time since the clock was started or last reset.
    fn elapsed(&self) -> Duration;

    /// Restart the clock at zero.
    fn reset(&mut self);
}

/// Wall clock, started on construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    started: instant::Instant,
}

impl MonotonicClock {
    #[inline]
    pub fn start() -> Self {
        Self {
            started: instant::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[inline]
    fn reset(&mut self) {
        self.started = instant::Instant::now();
    }
}

#[derive(Debug, Default)]
struct ManualState {
    /// Host time in nanoseconds.
    now: AtomicU64,
    /// Host time of the last reset.
    origin: AtomicU64,
}

/// Host-driven clock. Clones share state, so a host can keep one handle and
/// give another to the engine.
///
/// `elapsed()` is host time minus the time of the last `reset()`, saturating at
/// zero if the host rewinds past the reset point.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Arc<ManualState>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move host time forward.
    pub fn advance(&self, by: Duration) {
        self.state.now.fetch_add(to_nanos(by), Ordering::Relaxed);
    }

    /// Set host time to an absolute value. Moving it backwards is allowed.
    pub fn set(&self, host_time: Duration) {
        self.state.now.store(to_nanos(host_time), Ordering::Relaxed);
    }

    /// Host time, unaffected by resets.
    pub fn host_time(&self) -> Duration {
        Duration::from_nanos(self.state.now.load(Ordering::Relaxed))
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        let now = self.state.now.load(Ordering::Relaxed);
        let origin = self.state.origin.load(Ordering::Relaxed);
        Duration::from_nanos(now.saturating_sub(origin))
    }

    fn reset(&mut self) {
        let now = self.state.now.load(Ordering::Relaxed);
        self.state.origin.store(now, Ordering::Relaxed);
    }
}

#[inline]
fn to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// Normalized progress of `now` between `from` and `to`:
/// `(now - from) / (to - from)` over signed differences.
///
/// Neither clamped nor direction-aware: `to < from` gives a negative span and the
/// sign flips accordingly. Callers must not pass `to == from`.
#[inline]
pub fn progress(now: Duration, from: Duration, to: Duration) -> f32 {
    let elapsed = now.as_nanos() as i128 - from.as_nanos() as i128;
    let span = to.as_nanos() as i128 - from.as_nanos() as i128;
    (elapsed as f64 / span as f64) as f32
}
