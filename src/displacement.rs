//! The wave displacement program: vertex stage, fragment stage and the host-side
//! mirror of the vertex arithmetic.
//!
//! The GPU evaluates `shaders/particle.vert` once per particle per frame. The
//! same closed-form function is available here as [`VertexStage::displace`] so
//! that the maths can be inspected and tested without a GL context.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const VERTEX_SOURCE: &str = include_str!("../shaders/particle.vert");
pub const FRAGMENT_SOURCE: &str = include_str!("../shaders/particle.frag");

/// Smallest view-space depth used when dividing for perspective point size.
pub const MIN_DEPTH: f32 = 1e-6;

/// Displaced position and scale of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displaced {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexStage {
    pub source: &'static str,
    /// Multiplier applied to the displaced scale before perspective division.
    pub point_size: f32,
}

impl VertexStage {
    pub fn new(point_size: f32) -> Self {
        Self {
            source: VERTEX_SOURCE,
            point_size,
        }
    }

    /// All three updates read the undisplaced `x` and `y`.
    pub fn displace(position: [f32; 3], scale: f32, time: f32) -> Displaced {
        let [x, y, z] = position;
        let wave = (x + time).sin() * 0.5 + (y + time).cos() * 0.1 * 2.0;
        Displaced {
            x: x + (y + time).sin() * 0.5,
            y: y + wave,
            z,
            scale: scale + wave,
        }
    }

    /// Rendered size in pixels for a particle at view-space depth `view_z`
    /// (negative in front of the camera).
    pub fn point_size(&self, scale: f32, view_z: f32) -> f32 {
        scale * self.point_size / MIN_DEPTH.max(-view_z)
    }
}

/// Colour emitted by every fragment of the point cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointColor {
    White,
    Black,
}

impl PointColor {
    pub const ALPHA: f32 = 0.5;

    pub fn rgba(self) -> [f32; 4] {
        match self {
            PointColor::White => [1.0, 1.0, 1.0, Self::ALPHA],
            PointColor::Black => [0.0, 0.0, 0.0, Self::ALPHA],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PointColor::White => "white",
            PointColor::Black => "black",
        }
    }
}

impl FromStr for PointColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "white" => Ok(PointColor::White),
            "black" => Ok(PointColor::Black),
            other => Err(Error::InvalidArgument(format!(
                "unsupported point colour {other:?}, expected \"white\" or \"black\""
            ))),
        }
    }
}

impl fmt::Display for PointColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fragment strategy. Swapping the strategy only changes the `uColor` uniform,
/// the linked program stays the same.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FragmentStage {
    Flat(PointColor),
}

impl FragmentStage {
    pub fn source(&self) -> &'static str {
        FRAGMENT_SOURCE
    }

    pub fn output(&self) -> [f32; 4] {
        match self {
            FragmentStage::Flat(color) => color.rgba(),
        }
    }
}

/// Vertex and fragment stage pair drawn for every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacementProgram {
    pub vertex: VertexStage,
    pub fragment: FragmentStage,
}

impl DisplacementProgram {
    pub fn new(point_size: f32, color: PointColor) -> Self {
        Self {
            vertex: VertexStage::new(point_size),
            fragment: FragmentStage::Flat(color),
        }
    }

    pub fn set_fragment(&mut self, stage: FragmentStage) {
        self.fragment = stage;
    }

    pub fn point_color(&self) -> PointColor {
        match self.fragment {
            FragmentStage::Flat(color) => color,
        }
    }
}
