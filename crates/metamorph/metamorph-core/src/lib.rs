//! Metamorph Core (engine-agnostic)
//!
//! Time-driven keyframe interpolation. A [`MorphEngine`] owns a [`Timeline`] of
//! keyframes and a [`time::Clock`]; the host ticks it once per frame and reads the
//! blended object back with [`MorphEngine::object`]. Blending is delegated to an
//! [`Interpolator`], with [`TransformInterpolator`] provided for rigid transforms.

pub mod config;
pub mod engine;
pub mod error;
pub mod interp;
pub mod keyframe;
pub mod scheduler;
pub mod stored_timeline;
pub mod time;
pub mod timeline;

// Re-exports for hosts
pub use config::{Config, EndPolicy};
pub use engine::{MorphEngine, TickOutcome};
pub use error::MorphError;
pub use interp::{Interpolator, ScalarInterpolator, Transform, TransformInterpolator};
pub use keyframe::Keyframe;
pub use scheduler::FrameScheduler;
pub use stored_timeline::{parse_stored_timeline_json, StoredTimeline};
pub use time::{Clock, ManualClock, MonotonicClock};
pub use timeline::{Direction, Timeline};

/// Result type for engine operations
pub type Result<T> = core::result::Result<T, MorphError>;
