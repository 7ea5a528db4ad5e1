use wabbit_core::{Canvas, Color, Rect, TextureHandle, Vec2};
use wabbit_devtools::HudText;
use wabbit_render::{QuadSpec, SpriteBatch, WHITE_TEXTURE_ID};

/// Per-frame [`Canvas`]: sprites and rectangles go into the GPU batch, text
/// goes to the egui HUD queue.
pub struct FrameCanvas<'a> {
    batch: &'a mut SpriteBatch,
    texts: &'a mut Vec<HudText>,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(batch: &'a mut SpriteBatch, texts: &'a mut Vec<HudText>) -> Self {
        Self { batch, texts }
    }
}

impl Canvas for FrameCanvas<'_> {
    fn draw_texture(
        &mut self,
        texture: &TextureHandle,
        position: Vec2,
        rotation: f32,
        scale: f32,
        tint: Color,
    ) {
        self.batch.add_quad(QuadSpec {
            texture_id: texture.id(),
            origin: position,
            size: texture.size() * scale,
            rotation_deg: rotation,
            color: tint.to_array_f32(),
        });
    }

    fn draw_texture_stretched(
        &mut self,
        texture: &TextureHandle,
        dest: Rect,
        rotation: f32,
        tint: Color,
    ) {
        self.batch.add_quad(QuadSpec {
            texture_id: texture.id(),
            origin: dest.origin(),
            size: dest.size(),
            rotation_deg: rotation,
            color: tint.to_array_f32(),
        });
    }

    fn draw_rectangle(&mut self, bounds: Rect, color: Color) {
        self.batch.add_quad(QuadSpec {
            texture_id: WHITE_TEXTURE_ID,
            origin: bounds.origin(),
            size: bounds.size(),
            rotation_deg: 0.0,
            color: color.to_array_f32(),
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color) {
        self.texts.push(HudText {
            text: text.to_string(),
            position,
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_texture_covers_texture_size_times_scale() {
        let mut batch = SpriteBatch::new();
        let mut texts = Vec::new();
        let mut canvas = FrameCanvas::new(&mut batch, &mut texts);
        canvas.draw_texture(
            &TextureHandle::new(3, 32, 16),
            Vec2::new(10.0, 20.0),
            0.0,
            2.0,
            Color::WHITE,
        );

        let positions: Vec<[f32; 2]> = batch.vertices().iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![[10.0, 20.0], [74.0, 20.0], [74.0, 52.0], [10.0, 52.0]]
        );
        assert_eq!(batch.draw_calls()[0].texture_id, 3);
    }

    #[test]
    fn rectangles_use_the_white_texture_and_tint() {
        let mut batch = SpriteBatch::new();
        let mut texts = Vec::new();
        let mut canvas = FrameCanvas::new(&mut batch, &mut texts);
        canvas.draw_rectangle(Rect::new(240.0, 600.0, 400.0, 200.0), Color::GREEN);

        assert_eq!(batch.draw_calls()[0].texture_id, WHITE_TEXTURE_ID);
        assert_eq!(batch.vertices()[2].position, [640.0, 800.0]);
        assert_eq!(batch.vertices()[0].color, Color::GREEN.to_array_f32());
    }

    #[test]
    fn stretched_texture_fills_destination() {
        let mut batch = SpriteBatch::new();
        let mut texts = Vec::new();
        let mut canvas = FrameCanvas::new(&mut batch, &mut texts);
        canvas.draw_texture_stretched(
            &TextureHandle::new(2, 8, 8),
            Rect::new(0.0, 0.0, 100.0, 50.0),
            0.0,
            Color::WHITE,
        );
        assert_eq!(batch.vertices()[2].position, [100.0, 50.0]);
    }

    #[test]
    fn text_is_queued_for_the_overlay_not_batched() {
        let mut batch = SpriteBatch::new();
        let mut texts = Vec::new();
        let mut canvas = FrameCanvas::new(&mut batch, &mut texts);
        canvas.draw_text("ypos: 64", Vec2::new(880.0, 300.0), 20.0, Color::WHITE);

        assert!(batch.is_empty());
        assert_eq!(
            texts,
            vec![HudText {
                text: "ypos: 64".to_string(),
                position: Vec2::new(880.0, 300.0),
                size: 20.0,
                color: Color::WHITE,
            }]
        );
    }
}
