//! Rotation angles advanced by wall-clock time

use crate::config::AnimationConfig;
use std::time::Duration;

/// Rotation angles handed to the rasterizer each frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Angles {
    /// Rotation around X, applied first
    pub ax: f32,
    /// Rotation around Y, applied second
    pub ay: f32,
}

impl Angles {
    pub fn new(ax: f32, ay: f32) -> Self {
        Self { ax, ay }
    }
}

/// Animation state owned by the frame driver
#[derive(Debug, Clone)]
pub struct Animation {
    angles: Angles,
    spin_x: f32,
    spin_y: f32,
    paused: bool,
}

impl Animation {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            angles: Angles::default(),
            spin_x: config.spin_x,
            spin_y: config.spin_y,
            paused: false,
        }
    }

    pub fn angles(&self) -> Angles {
        self.angles
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Advance both angles by their spin rate times `dt`
    pub fn advance(&mut self, dt: Duration) {
        if self.paused {
            return;
        }
        let secs = dt.as_secs_f32();
        self.angles.ax += self.spin_x * secs;
        self.angles.ay += self.spin_y * secs;
    }
}
