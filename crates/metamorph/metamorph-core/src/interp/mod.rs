//! Interpolation strategies.
//!
//! An [`Interpolator`] blends two payloads of one type and keeps the last result.
//! It knows nothing about time; the engine hands it a scaling factor that is
//! usually in `[0, 1]` but may fall outside it, in which case implementations
//! extrapolate instead of clamping.

pub mod functions;
pub mod transform;

pub use transform::{Transform, TransformInterpolator};

/// Blends payloads of type `T` and holds the most recent blend.
pub trait Interpolator<T> {
    /// Blend `from` towards `to` and store the result. `scaling == 0` reproduces
    /// `from`, `scaling == 1` reproduces `to`.
    fn morph(&mut self, from: &T, to: &T, scaling: f32);

    /// The most recent blend, or the initial object before any `morph`.
    fn object(&self) -> &T;
}

impl<T, I: Interpolator<T> + ?Sized> Interpolator<T> for Box<I> {
    #[inline]
    fn morph(&mut self, from: &T, to: &T, scaling: f32) {
        (**self).morph(from, to, scaling)
    }

    #[inline]
    fn object(&self) -> &T {
        (**self).object()
    }
}

/// Plain linear blend of scalars.
#[derive(Debug, Clone, Default)]
pub struct ScalarInterpolator {
    current: f32,
}

impl ScalarInterpolator {
    pub fn new(initial: f32) -> Self {
        Self { current: initial }
    }
}

impl Interpolator<f32> for ScalarInterpolator {
    #[inline]
    fn morph(&mut self, from: &f32, to: &f32, scaling: f32) {
        self.current = functions::lerp_f32(*from, *to, scaling);
    }

    #[inline]
    fn object(&self) -> &f32 {
        &self.current
    }
}
