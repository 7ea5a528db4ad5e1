use wabbit_core::{Canvas, Color, Rect, TextureHandle, TextureLoader};

/// Static block the actor collides with.
///
/// A texture is optional per instance: untextured terrain is drawn as a solid
/// rectangle in `tint`. `bounds` never changes after creation.
#[derive(Debug)]
pub struct Terrain {
    pub bounds: Rect,
    texture: Option<TextureHandle>,
    pub rotation: f32,
    /// Kept for parity with the actor; textured terrain is stretched to
    /// `bounds`, so drawing ignores it.
    pub scale: f32,
    pub tint: Color,
    pub alpha: f32,
}

impl Terrain {
    pub fn create(bounds: Rect, rotation: f32, scale: f32, tint: Color, alpha: f32) -> Self {
        Self {
            bounds,
            texture: None,
            rotation,
            scale,
            tint,
            alpha,
        }
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        let tint = self.tint.fade(self.alpha);
        match &self.texture {
            Some(texture) => canvas.draw_texture_stretched(texture, self.bounds, self.rotation, tint),
            None => canvas.draw_rectangle(self.bounds, tint),
        }
    }

    pub fn destroy(self, loader: &mut dyn TextureLoader) {
        if let Some(texture) = self.texture {
            loader.unload_texture(texture);
        }
    }
}
