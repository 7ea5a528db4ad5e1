//! CPU-side quad batching.
//!
//! Every frame the game records quads into a [`SpriteBatch`]; the renderer
//! then streams the vertex/index arrays to the GPU and issues one
//! `draw_indexed` per [`DrawCall`].

use glam::Vec2;

/// Texture id reserved for the 1x1 white texture used by solid rectangles.
pub const WHITE_TEXTURE_ID: u32 = 0;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl SpriteVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// One textured quad, positioned by its top-left corner and rotated around it.
#[derive(Debug, Clone, Copy)]
pub struct QuadSpec {
    pub texture_id: u32,
    pub origin: Vec2,
    pub size: Vec2,
    pub rotation_deg: f32,
    pub color: [f32; 4],
}

/// A contiguous run of indices that share the same texture binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub texture_id: u32,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Default)]
pub struct SpriteBatch {
    vertices: Vec<SpriteVertex>,
    indices: Vec<u32>,
    draw_calls: Vec<DrawCall>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.draw_calls.clear();
    }

    pub fn add_quad(&mut self, spec: QuadSpec) {
        let rotation = Vec2::from_angle(spec.rotation_deg.to_radians());
        let corners = [
            (Vec2::new(0.0, 0.0), [0.0, 0.0]),
            (Vec2::new(spec.size.x, 0.0), [1.0, 0.0]),
            (Vec2::new(spec.size.x, spec.size.y), [1.0, 1.0]),
            (Vec2::new(0.0, spec.size.y), [0.0, 1.0]),
        ];

        let base_index = self.vertices.len() as u32;
        for (local, tex_coords) in corners {
            let world = spec.origin + rotation.rotate(local);
            self.vertices.push(SpriteVertex {
                position: world.to_array(),
                tex_coords,
                color: spec.color,
            });
        }

        let draw_start = self.indices.len() as u32;
        self.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);
        self.push_draw_call(spec.texture_id, draw_start, 6);
    }

    /// Merges with the previous draw call when the texture matches and the
    /// indices are contiguous.
    fn push_draw_call(&mut self, texture_id: u32, index_start: u32, index_count: u32) {
        if let Some(last) = self.draw_calls.last_mut() {
            let contiguous = last.index_start + last.index_count == index_start;
            if last.texture_id == texture_id && contiguous {
                last.index_count += index_count;
                return;
            }
        }
        self.draw_calls.push(DrawCall {
            texture_id,
            index_start,
            index_count,
        });
    }

    pub fn vertices(&self) -> &[SpriteVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
