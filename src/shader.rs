use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::glyph::GlyphInstance;
use crate::mesh::GlyphVertex;

pub const GLYPH_SHADER: &str = include_str!("glyph.wgsl");

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    /// Light position in eye space; `w` unused.
    pub light_position: [f32; 4],
    /// Ambient light level; `a` unused.
    pub ambient: [f32; 4],
}

impl Uniforms {
    pub fn new(projection: Mat4, view: Mat4, light_position: Vec3, ambient: f32) -> Self {
        Self {
            view_proj: (projection * view).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            light_position: light_position.extend(1.0).to_array(),
            ambient: [ambient, ambient, ambient, 1.0],
        }
    }
}

/// Per-instance data: model matrix columns and color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl From<&GlyphInstance> for InstanceRaw {
    fn from(glyph: &GlyphInstance) -> Self {
        Self {
            model: glyph.model_matrix().to_cols_array_2d(),
            color: glyph.color.extend(1.0).to_array(),
        }
    }
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4
];

pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<GlyphVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

pub fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRIBUTES,
    }
}
