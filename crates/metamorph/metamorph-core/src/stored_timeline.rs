//! Loading rigid-transform timelines from JSON documents.

use std::time::Duration;

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::Deserialize;
use tracing::debug;

use crate::config::{Config, EndPolicy};
use crate::engine::MorphEngine;
use crate::error::MorphError;
use crate::interp::{Transform, TransformInterpolator};
use crate::keyframe::Keyframe;
use crate::time::Clock;
use crate::Result;

/// A rigid-transform timeline authored as JSON (see `fixtures/timelines/`).
#[derive(Debug, Clone)]
pub struct StoredTimeline {
    pub name: String,
    /// Overrides the config's policy when present.
    pub end_policy: Option<EndPolicy>,
    /// Keyframes in document order.
    pub keyframes: Vec<Keyframe<Transform>>,
}

/// Parse a stored timeline document.
///
/// Notes:
/// - `at_ms` is an offset from timeline start in milliseconds; any order is accepted.
/// - `rotation` is optional (identity) and given either as a quaternion
///   `{x, y, z, w}` (normalized on load) or as `{roll, pitch, yaw}` in radians.
pub fn parse_stored_timeline_json(s: &str) -> Result<StoredTimeline> {
    let raw: RawTimeline = serde_json::from_str(s)?;
    if raw.keyframes.is_empty() {
        return Err(invalid(format!("timeline '{}' has no keyframes", raw.name)));
    }

    let mut keyframes = Vec::with_capacity(raw.keyframes.len());
    for (index, k) in raw.keyframes.into_iter().enumerate() {
        if k.position.iter().any(|c| !c.is_finite()) {
            return Err(invalid(format!("keyframe {index}: position is not finite")));
        }
        let rotation = match k.rotation {
            None => UnitQuaternion::identity(),
            Some(r) => to_rotation(&r)
                .map_err(|reason| invalid(format!("keyframe {index}: {reason}")))?,
        };
        let position = Vector3::new(k.position[0], k.position[1], k.position[2]);
        keyframes.push(Keyframe::new(
            Transform::new(position, rotation),
            Duration::from_millis(k.at_ms),
        ));
    }

    Ok(StoredTimeline {
        name: raw.name,
        end_policy: raw.end_policy,
        keyframes,
    })
}

impl StoredTimeline {
    /// Largest keyframe offset.
    pub fn duration(&self) -> Duration {
        self.keyframes
            .iter()
            .map(|k| k.timestamp())
            .max()
            .unwrap_or_default()
    }

    /// Build an engine holding these keyframes, added in document order.
    pub fn into_engine<C: Clock>(
        self,
        config: &Config,
        clock: C,
    ) -> Result<MorphEngine<Transform, TransformInterpolator, C>> {
        let end_policy = self.end_policy.unwrap_or(config.end_policy);
        let config = config.clone().with_end_policy(end_policy);
        let mut engine = MorphEngine::from_config(TransformInterpolator::new(), &config, clock)?;
        debug!(
            name = %self.name,
            keyframes = self.keyframes.len(),
            end_policy = ?end_policy,
            "loading stored timeline"
        );
        for keyframe in self.keyframes {
            let (object, timestamp) = keyframe.into_parts();
            engine.add(object, timestamp);
        }
        Ok(engine)
    }
}

fn invalid(reason: String) -> MorphError {
    MorphError::InvalidTimeline { reason }
}

fn to_rotation(r: &RawRotation) -> core::result::Result<UnitQuaternion<f32>, String> {
    match *r {
        RawRotation::Quaternion { x, y, z, w } => {
            let q = Quaternion::new(w, x, y, z);
            if !q.coords.iter().all(|c| c.is_finite()) {
                return Err("quaternion is not finite".to_string());
            }
            // Scale to the largest component first so the norm cannot overflow.
            let largest = q.coords.amax();
            if largest == 0.0 {
                return Err("quaternion has zero length".to_string());
            }
            let unit = UnitQuaternion::try_new(q / largest, f32::EPSILON)
                .ok_or_else(|| "quaternion has zero length".to_string())?;
            let finite = unit.coords.iter().all(|c| c.is_finite());
            if !finite || (unit.norm() - 1.0).abs() > 1e-4 {
                return Err("quaternion does not normalize".to_string());
            }
            Ok(unit)
        }
        RawRotation::Euler { roll, pitch, yaw } => {
            if ![roll, pitch, yaw].iter().all(|c| c.is_finite()) {
                return Err("euler angles are not finite".to_string());
            }
            Ok(UnitQuaternion::from_euler_angles(roll, pitch, yaw))
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTimeline {
    #[serde(default)]
    name: String,
    #[serde(default)]
    end_policy: Option<EndPolicy>,
    keyframes: Vec<RawKeyframe>,
}

#[derive(Debug, Deserialize)]
struct RawKeyframe {
    at_ms: u64,
    position: [f32; 3],
    #[serde(default)]
    rotation: Option<RawRotation>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRotation {
    Quaternion { x: f32, y: f32, z: f32, w: f32 },
    Euler { roll: f32, pitch: f32, yaw: f32 },
}
