//! Torus surface rasterizer
//!
//! Samples the parametric surface on a fixed grid, rotates and projects each
//! sample, shades it with a single directional light and writes it through
//! the buffer's depth test. Sample order never affects the result.

use crate::animation::Angles;
use crate::buffer::RenderBuffer;
use crate::config::RenderConfig;
use crate::math::{dot, normalize, rotate_x, rotate_y};
use crate::torus::{sample_grid, SurfaceSample};
use nalgebra::Vector3;

/// A shaded sample mapped to a buffer cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub x: i64,
    pub y: i64,
    pub inverse_depth: f32,
    pub luminance: f32,
    pub glyph: char,
}

pub struct Rasterizer {
    config: RenderConfig,
    light: Vector3<f32>,
    ramp: Vec<char>,
}

impl Rasterizer {
    pub fn new(config: RenderConfig) -> Self {
        let light = normalize(&config.shading.light_vector());
        let ramp = config.shading.ramp.chars().collect();
        Self {
            config,
            light,
            ramp,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Lambertian term with no ambient; anything facing away is zero
    pub fn shade(&self, normal: &Vector3<f32>) -> f32 {
        dot(normal, &self.light).max(0.0)
    }

    /// Quantize a luminance in `[0, 1]` onto the ramp
    pub fn glyph_for(&self, luminance: f32) -> char {
        let Some(last) = self.ramp.len().checked_sub(1) else {
            return crate::buffer::BLANK;
        };
        let index = ((luminance * last as f32).floor().max(0.0) as usize).min(last);
        self.ramp[index]
    }

    /// Transform, project and shade one sample for a `width` x `height` buffer.
    ///
    /// Returns `None` when the sample lands outside the buffer.
    pub fn project(
        &self,
        sample: &SurfaceSample,
        angles: Angles,
        width: usize,
        height: usize,
    ) -> Option<Fragment> {
        let torus = &self.config.torus;
        let camera = &self.config.camera;

        let p = rotate_y(&rotate_x(&sample.position(torus), angles.ax), angles.ay);
        let n = normalize(&rotate_y(
            &rotate_x(&sample.normal(torus), angles.ax),
            angles.ay,
        ));

        // camera.distance > major + minor, so the denominator stays positive
        let inverse_depth = 1.0 / (camera.distance + p.z);
        let x_proj = p.x * inverse_depth;
        let y_proj = p.y * inverse_depth;

        let scale = camera.projection_scale(width, height);
        let x = (width as f32 * 0.5 + scale * camera.cell_aspect * x_proj).round() as i64;
        let y = (height as f32 * 0.5 - scale * y_proj).round() as i64;

        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            return None;
        }

        let luminance = self.shade(&n);
        Some(Fragment {
            x,
            y,
            inverse_depth,
            luminance,
            glyph: self.glyph_for(luminance),
        })
    }

    /// Clear `buffer` and draw one full frame of the torus at `angles`
    pub fn render(&self, buffer: &mut RenderBuffer, angles: Angles) {
        buffer.clear();
        let (width, height) = (buffer.width(), buffer.height());
        for sample in sample_grid(&self.config.torus) {
            if let Some(fragment) = self.project(&sample, angles, width, height) {
                buffer.depth_tested_write(
                    fragment.x,
                    fragment.y,
                    fragment.inverse_depth,
                    fragment.glyph,
                );
            }
        }
    }
}
