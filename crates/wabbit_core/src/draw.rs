//! Seam between game entities and whatever draws them.
//!
//! Entities never touch the GPU directly. They receive a [`TextureLoader`] at
//! creation/teardown and a [`Canvas`] every frame, which keeps actor and
//! terrain logic testable without a window.

use std::path::Path;

use glam::Vec2;

use crate::color::Color;
use crate::geometry::Rect;

/// Owned reference to a loaded texture.
///
/// Deliberately neither `Clone` nor `Copy`: each entity owns its handle
/// exclusively and gives it back through [`TextureLoader::unload_texture`],
/// which consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct TextureHandle {
    id: u32,
    width: u32,
    height: u32,
}

impl TextureHandle {
    /// Mints a handle for a texture a [`TextureLoader`] has just registered.
    ///
    /// Exclusivity only holds for handles the loader hands out: building a
    /// second handle with an id that is still loaded aliases it, and unloading
    /// either one frees the texture under the other. Outside loader
    /// implementations this is for tests.
    pub fn new(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

pub trait TextureLoader {
    /// Loads the image at `path`. Implementations degrade to a placeholder
    /// image instead of failing, so the returned handle always has a size.
    fn load_texture(&mut self, path: &Path) -> TextureHandle;

    fn unload_texture(&mut self, handle: TextureHandle);
}

pub trait Canvas {
    /// Draws the whole texture with its top-left corner at `position`,
    /// rotated by `rotation` degrees around that corner and scaled uniformly.
    fn draw_texture(
        &mut self,
        texture: &TextureHandle,
        position: Vec2,
        rotation: f32,
        scale: f32,
        tint: Color,
    );

    /// Draws the whole texture stretched over `dest`, rotated by `rotation`
    /// degrees around the top-left corner of `dest`.
    fn draw_texture_stretched(
        &mut self,
        texture: &TextureHandle,
        dest: Rect,
        rotation: f32,
        tint: Color,
    );

    fn draw_rectangle(&mut self, bounds: Rect, color: Color);

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color);
}
