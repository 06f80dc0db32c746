//! 3D vector primitive used for positions, velocities and forces
//!
//! `Vec3` is nalgebra's `Vector3<f64>`, so the component-wise operators
//! (`+`, `-`, `* s`, `/ s`) and their compound forms (`+=`, `-=`, `*=`, `/=`)
//! come for free, as do `magnitude_squared()` (no square root) and
//! `magnitude()`. Dividing by a zero scalar follows IEEE rules and yields
//! inf/NaN components; callers guard against it.

use nalgebra::Vector3;

pub type Vec3 = Vector3<f64>;

/// Build a vector from its components
#[inline]
pub fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}
