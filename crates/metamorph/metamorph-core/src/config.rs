//! Engine and host configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MorphError;

/// What the engine does once no keyframe remains in the search direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndPolicy {
    /// Hold the last output.
    #[default]
    #[serde(alias = "normal")]
    Stop,
    /// Restart the clock and snap to the first keyframe.
    Loop,
    /// Reverse the search direction (ping-pong).
    #[serde(alias = "scanning", alias = "pingpong")]
    Scan,
}

/// Configuration shared by the engine and the frame scheduler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub end_policy: EndPolicy,
    /// Host ticks per second.
    pub frame_rate: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            end_policy: EndPolicy::Stop,
            frame_rate: 60.0,
        }
    }
}

impl Config {
    pub fn with_end_policy(mut self, end_policy: EndPolicy) -> Self {
        self.end_policy = end_policy;
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: f32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn validate(&self) -> Result<(), MorphError> {
        self.frame_interval().map(|_| ())
    }

    /// Host time between two ticks.
    ///
    /// Fails unless the interval is a non-zero `Duration`.
    pub fn frame_interval(&self) -> Result<Duration, MorphError> {
        if self.frame_rate <= 0.0 || !self.frame_rate.is_finite() {
            return Err(MorphError::InvalidConfig {
                reason: format!(
                    "frame rate must be positive and finite, got {}",
                    self.frame_rate
                ),
            });
        }
        match Duration::try_from_secs_f64(1.0 / f64::from(self.frame_rate)) {
            Ok(interval) if !interval.is_zero() => Ok(interval),
            _ => Err(MorphError::InvalidConfig {
                reason: format!(
                    "frame rate {} gives no representable frame interval",
                    self.frame_rate
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.end_policy, EndPolicy::Stop);
    }

    #[test]
    fn test_rejects_bad_frame_rate() {
        for rate in [0.0, -30.0, f32::NAN, f32::INFINITY, 1e-20, 1e20] {
            let err = Config::default().with_frame_rate(rate).validate().unwrap_err();
            assert_eq!(err.category(), "config");
        }
    }

    #[test]
    fn test_frame_interval() {
        let cfg = Config::default().with_frame_rate(50.0);
        assert_eq!(cfg.frame_interval().unwrap(), Duration::from_millis(20));
    }

    #[test]
    fn test_unrepresentable_interval_is_config_error() {
        let slow = Config::default().with_frame_rate(1e-20);
        assert!(matches!(
            slow.frame_interval(),
            Err(MorphError::InvalidConfig { .. })
        ));
        let fast = Config::default().with_frame_rate(1e20);
        assert!(matches!(
            fast.frame_interval(),
            Err(MorphError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_end_policy_names_and_aliases() {
        let parse = |s: &str| serde_json::from_str::<EndPolicy>(s).unwrap();
        assert_eq!(parse("\"stop\""), EndPolicy::Stop);
        assert_eq!(parse("\"normal\""), EndPolicy::Stop);
        assert_eq!(parse("\"loop\""), EndPolicy::Loop);
        assert_eq!(parse("\"scan\""), EndPolicy::Scan);
        assert_eq!(parse("\"scanning\""), EndPolicy::Scan);
        assert_eq!(parse("\"pingpong\""), EndPolicy::Scan);
        assert_eq!(serde_json::to_string(&EndPolicy::Scan).unwrap(), "\"scan\"");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "end_policy": "loop" }"#).unwrap();
        assert_eq!(cfg.end_policy, EndPolicy::Loop);
        assert_eq!(cfg.frame_rate, 60.0);
    }
}
