// Line geometry: the only primitive the renderer draws

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// A coloured line segment in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Vec4,
}

impl Line {
    pub fn new(from: Vec2, to: Vec2, color: Vec4) -> Self {
        Self { from, to, color }
    }
}

/// Append the closed outline through `points` to `lines`
pub fn push_polygon(lines: &mut Vec<Line>, points: &[Vec2], color: Vec4) {
    if points.len() < 2 {
        return;
    }
    for (i, from) in points.iter().enumerate() {
        let to = points[(i + 1) % points.len()];
        lines.push(Line::new(*from, to, color));
    }
}

/// Vertex for line-list rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LineVertex {
    /// Position in screen pixels
    pub position: [f32; 2],
    /// Vertex color (RGBA)
    pub color: [f32; 4],
}

impl LineVertex {
    /// Both endpoints of a line
    pub fn from_line(line: &Line) -> [Self; 2] {
        let color = line.color.to_array();
        [
            Self {
                position: line.from.to_array(),
                color,
            },
            Self {
                position: line.to.to_array(),
                color,
            },
        ]
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
