//! Window size, backing-buffer size and pointer tracking.

use glam::Vec2;

use crate::camera::PerspectiveCamera;

/// Pointer position before any input arrives; outside every particle.
pub const POINTER_OFFSCREEN: Vec2 = Vec2::new(-10.0, -10.0);

/// Window dimensions in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl ViewportState {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        (self.width / self.height) as f32
    }

    /// Backing-buffer size in device pixels.
    pub fn buffer_size(&self) -> (u32, u32) {
        let scale = |v: f64| (v * self.pixel_ratio).round().max(0.0) as u32;
        (scale(self.width), scale(self.height))
    }
}

/// `devicePixelRatio` as used for the backing buffer: passed through below 1
/// (zoomed-out pages), capped at `max` above it. Unusable values fall back to 1.
pub fn effective_pixel_ratio(raw: f64, max: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw.min(max)
    } else {
        1.0
    }
}

/// Maps a pointer position in CSS pixels to normalized device coordinates,
/// y pointing up. Returns `None` for a zero-sized viewport.
pub fn to_ndc(x: f64, y: f64, viewport: &ViewportState) -> Option<Vec2> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        ((x / viewport.width) * 2.0 - 1.0) as f32,
        (-(y / viewport.height) * 2.0 + 1.0) as f32,
    ))
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    state: ViewportState,
    pointer: Vec2,
    max_pixel_ratio: f64,
}

impl ViewportController {
    pub fn new(width: f64, height: f64, pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        Self {
            state: ViewportState::new(width, height, effective_pixel_ratio(pixel_ratio, max_pixel_ratio)),
            pointer: POINTER_OFFSCREEN,
            max_pixel_ratio,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Last tracked pointer in NDC. Stored only; nothing in the wave reads it.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Records the new window size and pushes its aspect ratio into the camera.
    /// Returns the backing-buffer size the surface must be resized to.
    pub fn on_resize(
        &mut self,
        camera: &mut PerspectiveCamera,
        width: f64,
        height: f64,
        pixel_ratio: f64,
    ) -> (u32, u32) {
        let pixel_ratio = effective_pixel_ratio(pixel_ratio, self.max_pixel_ratio);
        self.state = ViewportState::new(width, height, pixel_ratio);
        camera.set_aspect(self.state.aspect());
        camera.update_projection_matrix();
        let size = self.state.buffer_size();
        log::debug!("viewport resized to {width}x{height} (buffer {}x{})", size.0, size.1);
        size
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if let Some(ndc) = to_ndc(x, y, &self.state) {
            self.pointer = ndc;
        }
    }
}
