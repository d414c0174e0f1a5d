//! Render and driver configuration
//!
//! Every geometric and optical constant lives here. Defaults reproduce the
//! compiled-in values; a YAML file may override any subset of them.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::path::Path;
use std::time::Duration;

/// Shading ramp from darkest to brightest
pub const DEFAULT_RAMP: &str = " .:-=+*#%@";

/// Full application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub render: RenderConfig,
    pub viewport: ViewportConfig,
    pub animation: AnimationConfig,
}

/// Everything the rasterizer needs, fixed for the process lifetime
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    pub torus: TorusConfig,
    pub camera: CameraConfig,
    pub shading: ShadingConfig,
}

/// Torus geometry and parametric sampling density
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TorusConfig {
    /// Distance from the central axis to the tube centre
    pub major_radius: f32,
    /// Tube radius
    pub minor_radius: f32,
    /// Angular step around the tube cross-section
    pub theta_step: f32,
    /// Angular step around the central axis
    pub phi_step: f32,
}

impl Default for TorusConfig {
    fn default() -> Self {
        Self {
            major_radius: 1.0,
            minor_radius: 0.5,
            theta_step: 0.07,
            phi_step: 0.02,
        }
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the eye to the torus centre along +Z
    pub distance: f32,
    /// Projection scale as a fraction of `min(H, W / 2)`
    pub scale_factor: f32,
    /// Character cells are roughly twice as tall as they are wide
    pub cell_aspect: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 3.0,
            scale_factor: 0.75,
            cell_aspect: 2.0,
        }
    }
}

impl CameraConfig {
    /// Projection scale for a buffer of the given size
    pub fn projection_scale(&self, width: usize, height: usize) -> f32 {
        self.scale_factor * (height as f32).min(width as f32 / 2.0)
    }
}

/// Lighting and glyph quantization
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Direction towards the light; normalized on use
    pub light: [f32; 3],
    /// Glyphs ordered darkest to brightest
    pub ramp: String,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            light: [-0.5, 0.5, -1.0],
            ramp: DEFAULT_RAMP.to_string(),
        }
    }
}

impl ShadingConfig {
    pub fn light_vector(&self) -> Vector3<f32> {
        Vector3::new(self.light[0], self.light[1], self.light[2])
    }
}

/// Virtual buffer sizing relative to the terminal
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub base_width: usize,
    pub base_height: usize,
    /// Oversizes the virtual buffer so the upscaled image stays sharp
    pub overscan: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            base_width: 160,
            base_height: 90,
            overscan: 1.15,
        }
    }
}

/// Frame driver timing
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Rotation rate around X in rad/s
    pub spin_x: f32,
    /// Rotation rate around Y in rad/s
    pub spin_y: f32,
    /// Pacing delay after each presented frame
    pub frame_delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            spin_x: 0.7,
            spin_y: 1.1,
            frame_delay_ms: 10,
        }
    }
}

impl AnimationConfig {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

/// Upper bound on parametric samples drawn per frame
pub const MAX_SAMPLES_PER_FRAME: f32 = 2_000_000.0;

/// Upper bound on the virtual buffer overscan
pub const MAX_OVERSCAN: f32 = 4.0;

/// Upper bound on either base resolution axis
pub const MAX_BASE_DIMENSION: usize = 2048;

fn finite(name: &str, values: &[f32]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!("{} must be finite", name)))
    }
}

impl AppConfig {
    /// Check the invariants the renderer relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let torus = &self.render.torus;
        let camera = &self.render.camera;
        let shading = &self.render.shading;
        let viewport = &self.viewport;
        let animation = &self.animation;

        finite("torus radii", &[torus.major_radius, torus.minor_radius])?;
        finite("angular steps", &[torus.theta_step, torus.phi_step])?;
        finite(
            "camera parameters",
            &[camera.distance, camera.scale_factor, camera.cell_aspect],
        )?;
        finite("light direction", &shading.light)?;
        finite("overscan", &[viewport.overscan])?;
        finite("spin rates", &[animation.spin_x, animation.spin_y])?;

        if !(torus.major_radius > 0.0 && torus.minor_radius > 0.0) {
            return Err(ConfigError::Validation(
                "torus radii must be positive".to_string(),
            ));
        }
        if !(torus.theta_step > 0.0 && torus.phi_step > 0.0) {
            return Err(ConfigError::Validation(
                "angular steps must be positive".to_string(),
            ));
        }
        let samples = (TAU / torus.theta_step).ceil() * (TAU / torus.phi_step).ceil();
        if samples > MAX_SAMPLES_PER_FRAME {
            return Err(ConfigError::Validation(format!(
                "angular steps give {} samples per frame, limit is {}",
                samples, MAX_SAMPLES_PER_FRAME
            )));
        }
        // No near-plane clipping: every surface point must stay in front of the eye
        if camera.distance <= torus.major_radius + torus.minor_radius {
            return Err(ConfigError::Validation(format!(
                "camera distance {} must exceed major + minor radius ({})",
                camera.distance,
                torus.major_radius + torus.minor_radius
            )));
        }
        if !(camera.scale_factor > 0.0 && camera.cell_aspect > 0.0) {
            return Err(ConfigError::Validation(
                "projection scale and cell aspect must be positive".to_string(),
            ));
        }
        if shading.ramp.is_empty() {
            return Err(ConfigError::Validation(
                "shading ramp must contain at least one glyph".to_string(),
            ));
        }
        if shading.light_vector().norm() == 0.0 {
            return Err(ConfigError::Validation(
                "light direction must be non-zero".to_string(),
            ));
        }
        if viewport.base_width == 0
            || viewport.base_height == 0
            || viewport.base_width > MAX_BASE_DIMENSION
            || viewport.base_height > MAX_BASE_DIMENSION
        {
            return Err(ConfigError::Validation(format!(
                "base resolution must be between 1 and {}",
                MAX_BASE_DIMENSION
            )));
        }
        if !(1.0..=MAX_OVERSCAN).contains(&viewport.overscan) {
            return Err(ConfigError::Validation(format!(
                "overscan must be between 1.0 and {}",
                MAX_OVERSCAN
            )));
        }
        Ok(())
    }
}

/// Load and validate configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    Ok(config)
}
