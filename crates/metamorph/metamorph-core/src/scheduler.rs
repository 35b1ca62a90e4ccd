//! Fixed-step host loop.
//!
//! Stands in for the host's per-frame processing signal: it owns the simulated
//! clock, advances it by one frame interval per step and ticks the engine
//! directly. Whatever consumes the animated object (a scene graph node, a
//! renderer) reads it back after each step.

use std::time::Duration;

use crate::config::{Config, EndPolicy};
use crate::engine::{MorphEngine, TickOutcome};
use crate::interp::Interpolator;
use crate::time::ManualClock;
use crate::Result;

#[derive(Debug, Clone)]
pub struct FrameScheduler {
    clock: ManualClock,
    frame_interval: Duration,
    frame: u64,
}

impl FrameScheduler {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            clock: ManualClock::new(),
            frame_interval: config.frame_interval()?,
            frame: 0,
        })
    }

    /// Handle to the clock this scheduler advances. Engines ticked through
    /// [`FrameScheduler::step`] must be built on it.
    pub fn clock(&self) -> ManualClock {
        self.clock.clone()
    }

    /// Build an empty engine wired to this scheduler's clock.
    pub fn attach<T, I>(
        &self,
        interpolator: I,
        end_policy: EndPolicy,
    ) -> MorphEngine<T, I, ManualClock>
    where
        T: Clone,
        I: Interpolator<T>,
    {
        MorphEngine::with_clock(interpolator, end_policy, self.clock())
    }

    /// Frames stepped so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Advance one frame and tick the engine once.
    pub fn step<T, I>(&mut self, engine: &mut MorphEngine<T, I, ManualClock>) -> Result<TickOutcome>
    where
        T: Clone,
        I: Interpolator<T>,
    {
        self.clock.advance(self.frame_interval);
        self.frame += 1;
        engine.tick()
    }

    /// Step `frames` times, handing each frame's outcome and object to `consume`.
    pub fn run<T, I, F>(
        &mut self,
        engine: &mut MorphEngine<T, I, ManualClock>,
        frames: u64,
        mut consume: F,
    ) -> Result<()>
    where
        T: Clone,
        I: Interpolator<T>,
        F: FnMut(u64, TickOutcome, &T),
    {
        for _ in 0..frames {
            let outcome = self.step(engine)?;
            consume(self.frame, outcome, engine.object()?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::ScalarInterpolator;
    use crate::time::Clock;

    #[test]
    fn test_step_advances_shared_clock() {
        let mut scheduler =
            FrameScheduler::new(&Config::default().with_frame_rate(10.0)).unwrap();
        let mut engine = scheduler.attach::<f32, _>(ScalarInterpolator::default(), EndPolicy::Stop);
        engine.add(0.0, Duration::ZERO);
        engine.add(10.0, Duration::from_secs(1));

        scheduler.step(&mut engine).unwrap();
        assert_eq!(scheduler.frame(), 1);
        assert_eq!(engine.elapsed(), Duration::from_millis(100));
        assert!((engine.object().unwrap() - 1.0).abs() < 1e-6);
        assert_eq!(scheduler.clock().elapsed(), Duration::from_millis(100));
    }

    #[test]
    fn test_run_reports_every_frame() {
        let mut scheduler =
            FrameScheduler::new(&Config::default().with_frame_rate(10.0)).unwrap();
        let mut engine = scheduler.attach::<f32, _>(ScalarInterpolator::default(), EndPolicy::Stop);
        engine.add(0.0, Duration::ZERO);
        engine.add(10.0, Duration::from_secs(1));

        let mut seen = Vec::new();
        scheduler
            .run(&mut engine, 12, |frame, outcome, value| {
                seen.push((frame, outcome.produced_output(), *value))
            })
            .unwrap();

        assert_eq!(seen.len(), 12);
        assert_eq!(seen[0].0, 1);
        assert!(seen[9].1);
        assert!((seen[9].2 - 10.0).abs() < 1e-4);
        // Frame 10 lands exactly on the last waypoint; nothing is left after it.
        assert!(!seen[10].1);
        assert!(!seen[11].1);
        assert_eq!(seen[11].2, seen[9].2);
    }

    #[test]
    fn test_run_on_empty_engine_fails() {
        let mut scheduler = FrameScheduler::new(&Config::default()).unwrap();
        let mut engine = scheduler.attach::<f32, _>(ScalarInterpolator::default(), EndPolicy::Stop);
        assert!(scheduler.run(&mut engine, 1, |_, _, _| {}).is_err());
    }

    #[test]
    fn test_invalid_frame_rate_rejected() {
        assert!(FrameScheduler::new(&Config::default().with_frame_rate(-1.0)).is_err());
        // Positive, finite, but no usable Duration between frames.
        for rate in [1e-20, 1e20] {
            let err = FrameScheduler::new(&Config::default().with_frame_rate(rate)).unwrap_err();
            assert_eq!(err.category(), "config");
        }
    }
}
