//! Math type aliases and helper functions.
//!
//! Rendering math is always f32 and backed by `nalgebra`.

pub use nalgebra;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// Unnormalized normal of the triangle `(p0, p1, p2)`.
///
/// Follows the right-hand rule of the winding; the magnitude is twice the
/// triangle area.
pub fn triangle_normal(p0: &Vec3, p1: &Vec3, p2: &Vec3) -> Vec3 {
    (p1 - p0).cross(&(p2 - p0))
}

/// Check two vectors for equality within `epsilon` per component.
pub fn approx_eq(a: &Vec3, b: &Vec3, epsilon: f32) -> bool {
    (a - b).iter().all(|d| d.abs() <= epsilon)
}
