//! Blend helpers:
//! - lerp for scalars and 3-vectors (no clamping)
//! - quaternion SLERP along the shortest arc, with an NLERP fallback when the
//!   rotations are too close for a stable SLERP

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// `a + (b - a) * t`, componentwise.
#[inline]
pub fn lerp_vec3(a: &Vector3<f32>, b: &Vector3<f32>, t: f32) -> Vector3<f32> {
    a + (b - a) * t
}

/// Normalized lerp with shortest-arc sign correction.
pub fn nlerp_rotation(
    a: &UnitQuaternion<f32>,
    b: &UnitQuaternion<f32>,
    t: f32,
) -> UnitQuaternion<f32> {
    let from = a.coords;
    let mut to = b.coords;
    if from.dot(&to) < 0.0 {
        to = -to;
    }
    UnitQuaternion::new_normalize(Quaternion::from(from + (to - from) * t))
}

/// Spherical interpolation along the shortest arc. `t` outside `[0, 1]`
/// continues along the same great circle.
pub fn slerp_rotation(
    a: &UnitQuaternion<f32>,
    b: &UnitQuaternion<f32>,
    t: f32,
) -> UnitQuaternion<f32> {
    // try_slerp negates `b` when the dot product is negative and gives up only
    // when the half-angle sine vanishes, i.e. a and b (nearly) coincide.
    a.try_slerp(b, t, f32::EPSILON)
        .unwrap_or_else(|| nlerp_rotation(a, b, t))
}
