//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Convert a 0xRRGGBB value to RGBA floats
pub fn hex_to_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
    let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
    let b = (hex & 0xFF) as f32 / 255.0;
    [r, g, b, alpha]
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    /// #32CD32
    pub const PADDLE: [f32; 4] = [0.196, 0.804, 0.196, 1.0];
    pub const PADDLE_SHINE: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
    pub const PADDLE_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.3];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BALL_HIGHLIGHT: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
    /// #EC407A halo
    pub const BALL_GLOW: [f32; 4] = [0.925, 0.251, 0.478, 0.35];
    pub const BLOCK_OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
}
