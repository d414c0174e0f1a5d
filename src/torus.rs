//! Parametric torus surface

use crate::config::TorusConfig;
use nalgebra::Vector3;
use std::f32::consts::TAU;

/// A point on the torus surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    /// Angle around the tube cross-section
    pub theta: f32,
    /// Angle around the central axis
    pub phi: f32,
}

impl SurfaceSample {
    pub fn new(theta: f32, phi: f32) -> Self {
        Self { theta, phi }
    }

    /// Object-space position
    pub fn position(&self, torus: &TorusConfig) -> Vector3<f32> {
        let (st, ct) = self.theta.sin_cos();
        let (sp, cp) = self.phi.sin_cos();
        let circle = torus.major_radius + torus.minor_radius * ct;
        Vector3::new(circle * cp, circle * sp, torus.minor_radius * st)
    }

    /// Object-space normal direction. Not unit length.
    pub fn normal(&self, torus: &TorusConfig) -> Vector3<f32> {
        let (st, ct) = self.theta.sin_cos();
        let (sp, cp) = self.phi.sin_cos();
        torus.minor_radius * Vector3::new(ct * cp, ct * sp, st)
    }
}

/// Number of evenly spaced steps of size `step` that start inside `[0, 2π)`
fn step_count(step: f32) -> usize {
    (TAU / step).ceil() as usize
}

/// Every sample of the fixed-resolution parametric grid, theta-major
pub fn sample_grid(torus: &TorusConfig) -> impl Iterator<Item = SurfaceSample> {
    let (theta_step, phi_step) = (torus.theta_step, torus.phi_step);
    let phi_count = step_count(phi_step);
    (0..step_count(theta_step)).flat_map(move |i| {
        let theta = i as f32 * theta_step;
        (0..phi_count).map(move |j| SurfaceSample::new(theta, j as f32 * phi_step))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_lies_on_surface() {
        let torus = TorusConfig::default();
        for sample in sample_grid(&torus).step_by(97) {
            let p = sample.position(&torus);
            // Distance from the central circle in the sample's cross-section plane
            let radial = (p.x * p.x + p.y * p.y).sqrt() - torus.major_radius;
            let tube = (radial * radial + p.z * p.z).sqrt();
            assert!((tube - torus.minor_radius).abs() < 1e-5, "{:?}", sample);
        }
    }

    #[test]
    fn test_outer_equator() {
        let torus = TorusConfig::default();
        let sample = SurfaceSample::new(0.0, 0.0);
        assert_eq!(sample.position(&torus), Vector3::new(1.5, 0.0, 0.0));
        assert_eq!(sample.normal(&torus), Vector3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_normal_points_away_from_tube_centre() {
        let torus = TorusConfig::default();
        let sample = SurfaceSample::new(1.1, 2.3);
        let (sp, cp) = sample.phi.sin_cos();
        let centre = Vector3::new(cp, sp, 0.0) * torus.major_radius;
        let outward = sample.position(&torus) - centre;
        let n = sample.normal(&torus);
        assert!((outward - n).norm() < 1e-5);
    }

    #[test]
    fn test_grid_covers_domain() {
        let torus = TorusConfig {
            theta_step: 1.0,
            phi_step: 2.0,
            ..TorusConfig::default()
        };
        let samples: Vec<_> = sample_grid(&torus).collect();
        // 7 theta steps x 4 phi steps inside [0, 2π)
        assert_eq!(samples.len(), 28);
        assert!(samples.iter().all(|s| s.theta < TAU && s.phi < TAU));
        assert_eq!(samples[0], SurfaceSample::new(0.0, 0.0));
        assert_eq!(samples[5], SurfaceSample::new(1.0, 2.0));
    }
}
