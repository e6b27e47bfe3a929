//! Small numeric helpers layered on top of `glam`.

use glam::Vec3;

/// Normalizes `v`, returning `fallback` when `v` has no usable direction.
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        v / length
    } else {
        fallback
    }
}

/// Velocity scale for exponential damping over `dt` seconds.
///
/// `damping` is the fraction of velocity retained after one second, so two
/// half steps retain exactly as much as one full step.
pub fn damping_factor(damping: f32, dt: f32) -> f32 {
    damping.powf(dt)
}

/// Clamps a raw frame delta into `[0, max_dt]`. NaN maps to zero.
pub fn clamp_frame_dt(raw: f32, max_dt: f32) -> f32 {
    if raw.is_nan() || raw <= 0.0 {
        0.0
    } else {
        raw.min(max_dt)
    }
}

/// Relative velocity of `a` with respect to `b` projected on `normal`.
///
/// Negative values mean the bodies are approaching each other.
pub fn separating_velocity(velocity_a: Vec3, velocity_b: Vec3, normal: Vec3) -> f32 {
    (velocity_a - velocity_b).dot(normal)
}

/// Removes the component of `v` along the unit vector `normal`.
pub fn tangential_component(v: Vec3, normal: Vec3) -> Vec3 {
    v - normal * v.dot(normal)
}
