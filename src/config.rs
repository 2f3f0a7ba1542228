//! Construction parameters for the particle field and the scene around it.
//!
//! Defaults reproduce the shipped page: a 200x200 grid at 0.3 spacing seen
//! through a 75° camera parked at (0, 6, 5).

use glam::Vec3;

use crate::error::{Error, Result};

/// Shape of the particle grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub count_x: u32,
    pub count_y: u32,
    pub spacing: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count_x: 200,
            count_y: 200,
            spacing: 0.3,
        }
    }
}

impl FieldConfig {
    pub fn new(count_x: u32, count_y: u32, spacing: f32) -> Result<Self> {
        let cfg = Self {
            count_x,
            count_y,
            spacing,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.count_x == 0 {
            return Err(Error::parameter("count_x", "must be positive"));
        }
        if self.count_y == 0 {
            return Err(Error::parameter("count_y", "must be positive"));
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(Error::parameter(
                "spacing",
                format!("must be a positive finite number, got {}", self.spacing),
            ));
        }
        Ok(())
    }

    pub fn particle_count(&self) -> usize {
        self.count_x as usize * self.count_y as usize
    }
}

/// Camera, clock and point-size settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: Vec3,
    pub time_step: f32,
    pub point_size: f32,
    /// Upper bound applied to `devicePixelRatio` when sizing the backing buffer.
    pub max_pixel_ratio: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.01,
            far: 1000.0,
            camera_position: Vec3::new(0.0, 6.0, 5.0),
            time_step: 0.05,
            point_size: 15.0,
            max_pixel_ratio: 2.0,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(Error::parameter("fov_deg", "must lie in (0, 180)"));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(Error::parameter("near/far", "require 0 < near < far"));
        }
        if !self.camera_position.is_finite() {
            return Err(Error::parameter("camera_position", "must be finite"));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(Error::parameter("time_step", "must be positive"));
        }
        if !(self.point_size.is_finite() && self.point_size > 0.0) {
            return Err(Error::parameter("point_size", "must be positive"));
        }
        if !(self.max_pixel_ratio >= 1.0) {
            return Err(Error::parameter("max_pixel_ratio", "must be at least 1"));
        }
        Ok(())
    }
}
