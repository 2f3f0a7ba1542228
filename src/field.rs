//! Static particle grid: positions on the y = 0 plane plus a per-particle scale.

use bytemuck::{Pod, Zeroable};

use crate::config::FieldConfig;
use crate::error::Result;

/// One vertex of the point cloud, laid out exactly as the GPU reads it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Particle {
    pub position: [f32; 3],
    pub scale: f32,
}

impl Particle {
    /// Byte stride between consecutive particles in the vertex buffer.
    pub const STRIDE: i32 = std::mem::size_of::<Particle>() as i32;
    /// Byte offset of `scale` inside a particle.
    pub const SCALE_OFFSET: i32 = std::mem::size_of::<[f32; 3]>() as i32;
}

/// Particle buffer built once at start-up and never resized.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Lays particles out row-major over `(ix, iy)`, so cell `(ix, iy)` sits at
    /// index `ix * count_y + iy`.
    ///
    /// Both x and z are centred with `count_x * spacing / 2`; the z offset does
    /// not use `count_y`, which shifts the footprint when the counts differ.
    pub fn generate(config: FieldConfig) -> Result<Self> {
        config.validate()?;

        let offset = config.count_x as f32 * config.spacing / 2.0;
        let mut particles = Vec::with_capacity(config.particle_count());
        for ix in 0..config.count_x {
            for iy in 0..config.count_y {
                particles.push(Particle {
                    position: [
                        ix as f32 * config.spacing - offset,
                        0.0,
                        iy as f32 * config.spacing - offset,
                    ],
                    scale: 1.0,
                });
            }
        }

        log::debug!(
            "generated {}x{} particle field ({} points)",
            config.count_x,
            config.count_y,
            particles.len()
        );
        Ok(Self { config, particles })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn index_of(&self, ix: u32, iy: u32) -> Option<usize> {
        (ix < self.config.count_x && iy < self.config.count_y)
            .then(|| ix as usize * self.config.count_y as usize + iy as usize)
    }

    pub fn get(&self, ix: u32, iy: u32) -> Option<&Particle> {
        self.index_of(ix, iy).map(|k| &self.particles[k])
    }

    /// Raw interleaved bytes ready for `bufferData`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }
}
