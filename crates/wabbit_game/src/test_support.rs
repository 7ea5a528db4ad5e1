//! In-memory stand-ins for the GPU loader and canvas.

use std::path::Path;

use wabbit_core::{Canvas, Color, Rect, TextureHandle, TextureLoader, Vec2};

pub struct FakeLoader {
    next_id: u32,
    size: (u32, u32),
    pub loaded_paths: Vec<String>,
    pub unloaded_ids: Vec<u32>,
}

impl FakeLoader {
    /// Every texture this loader hands out reports `width` x `height`.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            next_id: 1,
            size: (width, height),
            loaded_paths: Vec::new(),
            unloaded_ids: Vec::new(),
        }
    }
}

impl TextureLoader for FakeLoader {
    fn load_texture(&mut self, path: &Path) -> TextureHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.loaded_paths.push(path.display().to_string());
        TextureHandle::new(id, self.size.0, self.size.1)
    }

    fn unload_texture(&mut self, handle: TextureHandle) {
        self.unloaded_ids.push(handle.id());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Texture {
        texture_id: u32,
        position: Vec2,
        rotation: f32,
        scale: f32,
        tint: Color,
    },
    StretchedTexture {
        texture_id: u32,
        dest: Rect,
        rotation: f32,
        tint: Color,
    },
    Rectangle {
        bounds: Rect,
        color: Color,
    },
    Text {
        text: String,
        position: Vec2,
        size: f32,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_texture(
        &mut self,
        texture: &TextureHandle,
        position: Vec2,
        rotation: f32,
        scale: f32,
        tint: Color,
    ) {
        self.ops.push(DrawOp::Texture {
            texture_id: texture.id(),
            position,
            rotation,
            scale,
            tint,
        });
    }

    fn draw_texture_stretched(
        &mut self,
        texture: &TextureHandle,
        dest: Rect,
        rotation: f32,
        tint: Color,
    ) {
        self.ops.push(DrawOp::StretchedTexture {
            texture_id: texture.id(),
            dest,
            rotation,
            tint,
        });
    }

    fn draw_rectangle(&mut self, bounds: Rect, color: Color) {
        self.ops.push(DrawOp::Rectangle { bounds, color });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            position,
            size,
            color,
        });
    }
}
