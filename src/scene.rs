//! Everything the render loop needs except the GL context: camera, clock,
//! viewport, displacement program and background colour.

use std::fmt;
use std::str::FromStr;

use glam::{Mat4, Vec2, Vec3};

use crate::camera::PerspectiveCamera;
use crate::clock::FrameClock;
use crate::config::{FieldConfig, SceneConfig};
use crate::displacement::{DisplacementProgram, FragmentStage, PointColor};
use crate::error::{Error, Result};
use crate::field::ParticleField;
use crate::viewport::ViewportController;

/// Opaque clear colour behind the particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackgroundColor(pub u32);

impl BackgroundColor {
    pub const WHITE: BackgroundColor = BackgroundColor(0xffffff);
    pub const BLACK: BackgroundColor = BackgroundColor(0x000000);

    pub fn from_hex(value: u32) -> Result<Self> {
        if value > 0xffffff {
            return Err(Error::InvalidArgument(format!(
                "background colour {value:#x} does not fit in 0xRRGGBB"
            )));
        }
        Ok(BackgroundColor(value))
    }

    pub fn rgb(self) -> [f32; 3] {
        let channel = |shift: u32| ((self.0 >> shift) & 0xff) as f32 / 255.0;
        [channel(16), channel(8), channel(0)]
    }
}

impl FromStr for BackgroundColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            _ => {}
        }
        let hex = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .filter(|h| h.len() == 6 && h.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| Error::InvalidArgument(format!("unsupported background colour {s:?}")))?;
        u32::from_str_radix(hex, 16)
            .map(BackgroundColor)
            .map_err(|_| Error::InvalidArgument(format!("unsupported background colour {s:?}")))
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Uniform values for a single draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub time: f32,
    pub model_view: Mat4,
    pub projection: Mat4,
    pub color: [f32; 4],
    pub background: [f32; 3],
    pub point_size: f32,
}

pub struct Scene {
    field: ParticleField,
    program: DisplacementProgram,
    camera: PerspectiveCamera,
    clock: FrameClock,
    viewport: ViewportController,
    background: BackgroundColor,
}

impl Scene {
    pub fn new(
        field: FieldConfig,
        config: SceneConfig,
        width: f64,
        height: f64,
        pixel_ratio: f64,
    ) -> Result<Self> {
        config.validate()?;
        let field = ParticleField::generate(field)?;
        let viewport = ViewportController::new(width, height, pixel_ratio, config.max_pixel_ratio);
        let camera = PerspectiveCamera::new(&config, viewport.state().aspect());

        Ok(Self {
            field,
            program: DisplacementProgram::new(config.point_size, PointColor::White),
            camera,
            clock: FrameClock::new(config.time_step),
            viewport,
            background: BackgroundColor::BLACK,
        })
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn program(&self) -> &DisplacementProgram {
        &self.program
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn time(&self) -> f32 {
        self.clock.time()
    }

    pub fn pointer(&self) -> Vec2 {
        self.viewport.pointer()
    }

    pub fn background(&self) -> BackgroundColor {
        self.background
    }

    /// Steps the clock, aims the camera at the origin and returns the uniforms
    /// for this frame's draw.
    pub fn advance(&mut self) -> FrameUniforms {
        let time = self.clock.tick();
        self.camera.look_at(Vec3::ZERO);
        self.camera.update_projection_matrix();

        FrameUniforms {
            time,
            model_view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            color: self.program.fragment.output(),
            background: self.background.rgb(),
            point_size: self.program.vertex.point_size,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64, pixel_ratio: f64) -> (u32, u32) {
        self.viewport
            .on_resize(&mut self.camera, width, height, pixel_ratio)
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.viewport.on_pointer_move(x, y);
    }

    pub fn set_point_color(&mut self, color: PointColor) {
        self.program.set_fragment(FragmentStage::Flat(color));
    }

    /// Rejects anything but `"white"` / `"black"` and keeps the current colour.
    pub fn set_point_color_name(&mut self, name: &str) -> Result<()> {
        let color = name.parse()?;
        self.set_point_color(color);
        Ok(())
    }

    pub fn set_background(&mut self, color: BackgroundColor) {
        self.background = color;
    }
}
