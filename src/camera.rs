use glam::{Mat4, Vec3};

use crate::config::SceneConfig;

/// Perspective camera with a lazily rebuilt projection matrix.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    aspect: f32,
    target: Vec3,
    projection: Mat4,
    projection_dirty: bool,
}

impl PerspectiveCamera {
    pub fn new(config: &SceneConfig, aspect: f32) -> Self {
        let mut camera = Self {
            fov_deg: config.fov_deg,
            near: config.near,
            far: config.far,
            position: config.camera_position,
            aspect: 1.0,
            target: Vec3::ZERO,
            projection: Mat4::IDENTITY,
            projection_dirty: true,
        };
        camera.set_aspect(aspect);
        camera.update_projection_matrix();
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Ignores non-finite or non-positive ratios (collapsed window).
    pub fn set_aspect(&mut self, aspect: f32) {
        if !(aspect.is_finite() && aspect > 0.0) {
            log::debug!("ignoring aspect ratio {aspect}");
            return;
        }
        if aspect != self.aspect {
            self.aspect = aspect;
            self.projection_dirty = true;
        }
    }

    pub fn projection_dirty(&self) -> bool {
        self.projection_dirty
    }

    pub fn update_projection_matrix(&mut self) {
        if !self.projection_dirty {
            return;
        }
        self.projection = Mat4::perspective_rh_gl(
            self.fov_deg.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
        self.projection_dirty = false;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }
}
