use std::path::Path;

use wabbit_core::{Canvas, Color, Rect, TextureHandle, TextureLoader, Vec2};

/// Initial placement and look of an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSpawn {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: f32,
    pub tint: Color,
    pub alpha: f32,
    pub velocity: Vec2,
}

impl Default for ActorSpawn {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: 2.0,
            tint: Color::WHITE,
            alpha: 1.0,
            velocity: Vec2::ZERO,
        }
    }
}

/// The controllable wabbit.
///
/// `bounds` is the collision box: its size is the texture size times `scale`
/// and never changes; its origin follows `position` after every physics step.
#[derive(Debug)]
pub struct Actor {
    texture: TextureHandle,
    pub position: Vec2,
    pub velocity: Vec2,
    pub bounds: Rect,
    pub rotation: f32,
    pub scale: f32,
    pub tint: Color,
    pub alpha: f32,
    /// Set whenever a jump impulse fires. Nothing reads it during physics.
    pub jump_latched: bool,
}

impl Actor {
    pub fn create(loader: &mut dyn TextureLoader, texture_path: &Path, spawn: &ActorSpawn) -> Self {
        let texture = loader.load_texture(texture_path);
        Self::new(texture, spawn)
    }

    pub fn new(texture: TextureHandle, spawn: &ActorSpawn) -> Self {
        let size = texture.size() * spawn.scale;
        Self {
            texture,
            position: spawn.position,
            velocity: spawn.velocity,
            bounds: Rect::from_origin_size(spawn.position, size),
            rotation: spawn.rotation,
            scale: spawn.scale,
            tint: spawn.tint,
            alpha: spawn.alpha,
            jump_latched: false,
        }
    }

    pub fn sync_bounds(&mut self) {
        self.bounds.x = self.position.x;
        self.bounds.y = self.position.y;
    }

    pub fn texture(&self) -> &TextureHandle {
        &self.texture
    }

    /// Draws from `position` with the raw scale; `bounds` only drives collision.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.draw_texture(
            &self.texture,
            self.position,
            self.rotation,
            self.scale,
            self.tint.fade(self.alpha),
        );
    }

    pub fn destroy(self, loader: &mut dyn TextureLoader) {
        loader.unload_texture(self.texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DrawOp, FakeLoader, RecordingCanvas};

    #[test]
    fn create_derives_bounds_from_texture_and_scale() {
        let mut loader = FakeLoader::with_size(32, 24);
        let spawn = ActorSpawn {
            position: Vec2::new(10.0, 20.0),
            scale: 2.0,
            ..ActorSpawn::default()
        };
        let actor = Actor::create(&mut loader, Path::new("wabbit_alpha.png"), &spawn);

        assert_eq!(actor.bounds, Rect::new(10.0, 20.0, 64.0, 48.0));
        assert_eq!(loader.loaded_paths, vec!["wabbit_alpha.png".to_string()]);
    }

    #[test]
    fn sync_bounds_follows_position_and_keeps_size() {
        let mut actor = Actor::new(TextureHandle::new(1, 10, 10), &ActorSpawn::default());
        actor.position = Vec2::new(3.5, -2.0);
        actor.sync_bounds();
        assert_eq!(actor.bounds, Rect::new(3.5, -2.0, 20.0, 20.0));
    }

    #[test]
    fn render_uses_position_rotation_and_raw_scale() {
        let spawn = ActorSpawn {
            position: Vec2::new(7.0, 9.0),
            rotation: 15.0,
            scale: 3.0,
            ..ActorSpawn::default()
        };
        let actor = Actor::new(TextureHandle::new(4, 8, 8), &spawn);
        let mut canvas = RecordingCanvas::default();
        actor.render(&mut canvas);

        assert_eq!(
            canvas.ops,
            vec![DrawOp::Texture {
                texture_id: 4,
                position: Vec2::new(7.0, 9.0),
                rotation: 15.0,
                scale: 3.0,
                tint: Color::WHITE,
            }]
        );
    }

    #[test]
    fn destroy_releases_the_texture_once() {
        let mut loader = FakeLoader::with_size(16, 16);
        let actor = Actor::create(&mut loader, Path::new("a.png"), &ActorSpawn::default());
        let id = actor.texture().id();
        actor.destroy(&mut loader);
        assert_eq!(loader.unloaded_ids, vec![id]);
    }
}
