//! Rigid rotations and normalization on `nalgebra` vectors

use nalgebra::Vector3;

/// Right-handed rotation around the X axis
pub fn rotate_x(v: &Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (s, c) = angle.sin_cos();
    Vector3::new(v.x, c * v.y - s * v.z, s * v.y + c * v.z)
}

/// Right-handed rotation around the Y axis
pub fn rotate_y(v: &Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (s, c) = angle.sin_cos();
    Vector3::new(c * v.x + s * v.z, v.y, -s * v.x + c * v.z)
}

pub fn dot(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    a.dot(b)
}

/// Unit vector in the direction of `v`, or zero for a zero-length input
pub fn normalize(v: &Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}
