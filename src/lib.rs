#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod camera;
pub mod clock;
pub mod config;
pub mod displacement;
pub mod error;
pub mod field;
pub mod intro;
pub mod scene;
pub mod theme;
pub mod viewport;

pub use config::{FieldConfig, SceneConfig};
pub use displacement::{DisplacementProgram, FragmentStage, PointColor, VertexStage};
pub use error::{Error, Result};
pub use field::{Particle, ParticleField};
pub use scene::{BackgroundColor, FrameUniforms, Scene};
pub use theme::{KeyValueStore, MemoryStore, Theme, ThemeController};

// Only compile browser glue when targeting wasm32; everything above builds
// and tests on the host.
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{mount, pointer, set_background_color, set_point_color, time};
