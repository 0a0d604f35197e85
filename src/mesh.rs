//! Glyph geometry.
//!
//! The glyph is a solid cone with its base centered on the origin and its
//! apex on +z. It is generated once at startup and shared by every instance,
//! so the per-frame work is only the instance transforms.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Default cone base radius.
pub const CONE_RADIUS: f32 = 0.2;
/// Default cone height.
pub const CONE_HEIGHT: f32 = 0.7;
/// Default number of segments around the cone.
pub const CONE_SLICES: u32 = 10;
/// Most segments whose `3 * slices + 1` vertices still fit `u16` indices.
pub const MAX_CONE_SLICES: u32 = (u16::MAX as u32 - 1) / 3;

/// Vertex with position and normal, as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GlyphVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl GlyphVertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Indexed triangle mesh for the glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMesh {
    pub vertices: Vec<GlyphVertex>,
    pub indices: Vec<u16>,
}

impl GlyphMesh {
    /// Solid cone with smooth side shading and a flat base.
    ///
    /// `slices` is clamped to `3..=MAX_CONE_SLICES`.
    pub fn cone(radius: f32, height: f32, slices: u32) -> Self {
        let slices = slices.clamp(3, MAX_CONE_SLICES);
        let step = std::f32::consts::TAU / slices as f32;
        let side_normal = |angle: f32| {
            Vec3::new(height * angle.cos(), height * angle.sin(), radius).normalize_or_zero()
        };
        let rim = |angle: f32| Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0);

        let mut vertices = Vec::with_capacity(slices as usize * 4 + 1);
        let mut indices = Vec::with_capacity(slices as usize * 6);

        // Side: one rim vertex per slice plus one apex per slice so the apex
        // normal can follow the face it belongs to.
        for s in 0..slices {
            let angle = s as f32 * step;
            vertices.push(GlyphVertex::new(rim(angle), side_normal(angle)));
        }
        for s in 0..slices {
            let mid = (s as f32 + 0.5) * step;
            vertices.push(GlyphVertex::new(Vec3::new(0.0, 0.0, height), side_normal(mid)));
        }
        for s in 0..slices {
            let next = (s + 1) % slices;
            indices.extend_from_slice(&[s as u16, next as u16, (slices + s) as u16]);
        }

        // Base
        let base_start = vertices.len() as u16;
        for s in 0..slices {
            vertices.push(GlyphVertex::new(rim(s as f32 * step), Vec3::NEG_Z));
        }
        let center = vertices.len() as u16;
        vertices.push(GlyphVertex::new(Vec3::ZERO, Vec3::NEG_Z));
        for s in 0..slices as u16 {
            let next = (s + 1) % slices as u16;
            indices.extend_from_slice(&[center, base_start + next, base_start + s]);
        }

        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Default for GlyphMesh {
    fn default() -> Self {
        Self::cone(CONE_RADIUS, CONE_HEIGHT, CONE_SLICES)
    }
}
