//! MorphEngine: the tick-driven keyframe state machine.
//!
//! Each tick reads the engine's own clock, finds the nearest keyframe in the
//! current direction, blends from the anchor towards it and then replaces the
//! anchor with the blend itself, stamped with the current time. Because the
//! anchor chases the target, the effective segment shrinks every tick; a tick
//! that lands past a waypoint extrapolates beyond it and the next segment starts
//! from that overshoot.
//!
//! When no keyframe remains in the search direction the [`EndPolicy`] decides:
//! - `Stop`: nothing happens, the last blend stays the output
//! - `Loop`: clock restarts, anchor returns to the first keyframe added, output
//!   snaps to it
//! - `Scan`: search direction flips, no output this tick

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{Config, EndPolicy};
use crate::error::MorphError;
use crate::interp::Interpolator;
use crate::keyframe::Keyframe;
use crate::time::{progress, Clock, MonotonicClock};
use crate::timeline::{Direction, Timeline};
use crate::Result;

/// What a single tick did.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Blended towards the keyframe at `target` (insertion index).
    Interpolated { target: usize, scaling: f32 },
    /// Loop policy restarted the timeline at its first keyframe.
    Restarted,
    /// Scan policy flipped the search direction; no new output.
    Reversed { direction: Direction },
    /// Stop policy with nothing left to reach; no new output.
    Exhausted,
}

impl TickOutcome {
    /// Whether this tick produced a new object.
    #[inline]
    pub fn produced_output(&self) -> bool {
        matches!(self, Self::Interpolated { .. } | Self::Restarted)
    }
}

/// Drives an [`Interpolator`] along a [`Timeline`] of keyframes.
#[derive(Debug)]
pub struct MorphEngine<T, I, C = MonotonicClock> {
    interpolator: I,
    timeline: Timeline<T>,
    clock: C,
    direction: Direction,
    end_policy: EndPolicy,
}

impl<T, I> MorphEngine<T, I, MonotonicClock>
where
    T: Clone,
    I: Interpolator<T>,
{
    /// Engine on the wall clock, started now.
    pub fn new(interpolator: I, end_policy: EndPolicy) -> Self {
        Self::with_clock(interpolator, end_policy, MonotonicClock::start())
    }
}

impl<T, I, C> MorphEngine<T, I, C>
where
    T: Clone,
    I: Interpolator<T>,
    C: Clock,
{
    pub fn with_clock(interpolator: I, end_policy: EndPolicy, clock: C) -> Self {
        Self {
            interpolator,
            timeline: Timeline::new(),
            clock,
            direction: Direction::Forward,
            end_policy,
        }
    }

    pub fn from_config(interpolator: I, config: &Config, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_clock(interpolator, config.end_policy, clock))
    }

    /// Append a keyframe; returns its insertion index. Order and duplicate
    /// timestamps are accepted as given.
    pub fn add(&mut self, object: T, timestamp: Duration) -> usize {
        let index = self.timeline.push(object, timestamp);
        debug!(
            index,
            timestamp_ms = timestamp.as_millis() as u64,
            max_timestamp_ms = self.timeline.max_timestamp().as_millis() as u64,
            "keyframe added"
        );
        index
    }

    /// Advance one frame. Fails if no keyframe was ever added.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let now = self.clock.elapsed();
        let anchor = self
            .timeline
            .current()
            .ok_or_else(|| MorphError::empty_timeline("tick"))?;

        let Some(target) = self.timeline.target_from(anchor.timestamp(), self.direction) else {
            return Ok(self.on_exhausted(now));
        };

        // Strict ordering in the search keeps the span non-zero.
        let goal = &self.timeline.keyframes()[target];
        let scaling = progress(now, anchor.timestamp(), goal.timestamp());
        self.interpolator.morph(anchor.object(), goal.object(), scaling);
        trace!(
            target_index = target,
            scaling,
            now_ms = now.as_millis() as u64,
            direction = ?self.direction,
            "interpolated"
        );

        let blended = self.interpolator.object().clone();
        self.timeline.set_current(Keyframe::new(blended, now));
        Ok(TickOutcome::Interpolated { target, scaling })
    }

    fn on_exhausted(&mut self, now: Duration) -> TickOutcome {
        match self.end_policy {
            EndPolicy::Stop => {
                trace!(now_ms = now.as_millis() as u64, "timeline exhausted");
                TickOutcome::Exhausted
            }
            EndPolicy::Loop => {
                self.clock.reset();
                if let Some(first) = self.timeline.rewind() {
                    self.interpolator.morph(first.object(), first.object(), 1.0);
                }
                self.direction = Direction::Forward;
                debug!(
                    cycle_ms = self.timeline.max_timestamp().as_millis() as u64,
                    "timeline restarted"
                );
                TickOutcome::Restarted
            }
            EndPolicy::Scan => {
                self.direction = self.direction.reversed();
                debug!(direction = ?self.direction, "scan direction reversed");
                TickOutcome::Reversed {
                    direction: self.direction,
                }
            }
        }
    }

    /// Latest interpolated object. Fails if no keyframe was ever added.
    pub fn object(&self) -> Result<&T> {
        if self.timeline.is_empty() {
            return Err(MorphError::empty_timeline("read the interpolated object"));
        }
        Ok(self.interpolator.object())
    }
}

impl<T, I, C: Clock> MorphEngine<T, I, C> {
    /// Time on the engine clock (since start or the last loop restart).
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn end_policy(&self) -> EndPolicy {
        self.end_policy
    }

    #[inline]
    pub fn timeline(&self) -> &Timeline<T> {
        &self.timeline
    }

    #[inline]
    pub fn interpolator(&self) -> &I {
        &self.interpolator
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }
}
