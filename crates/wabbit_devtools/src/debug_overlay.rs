//! egui layer drawn on top of the sprite pass.
//!
//! It carries two things: the always-on HUD text queued by the game each
//! frame (egui is the text renderer), and an F3-toggled debug window with
//! frame statistics.
//!
//! egui needs a split render because `egui_wgpu::Renderer::render()` wants a
//! `RenderPass<'static>`, while `begin_render_pass` borrows the encoder:
//!
//!   1. `prepare()` -- run egui UI logic, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers (borrows encoder mutably)
//!   3. `paint()`   -- render into a new render pass with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references

use wabbit_core::time::FrameClock;
use wabbit_core::{Color, Vec2};
use winit::window::Window;

#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    pub text: String,
    pub position: Vec2,
    pub size: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub draw_calls: u32,
    pub sprite_count: u32,
    pub texture_count: u32,
    pub jump_latched: bool,
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
    text_queue: Vec<HudText>,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible: false,
            text_queue: Vec::new(),
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    /// Text queued for this frame; drained by `prepare()`.
    pub fn text_queue_mut(&mut self) -> &mut Vec<HudText> {
        &mut self.text_queue
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        clock: &FrameClock,
        stats: &OverlayStats,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let texts = std::mem::take(&mut self.text_queue);
        let visible = self.visible;
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Background,
                egui::Id::new("hud_text"),
            ));
            for item in &texts {
                painter.text(
                    egui::pos2(item.position.x, item.position.y),
                    egui::Align2::LEFT_TOP,
                    &item.text,
                    egui::FontId::monospace(item.size),
                    to_color32(item.color),
                );
            }

            if visible {
                egui::Window::new("Debug")
                    .default_pos([10.0, 10.0])
                    .show(ctx, |ui| {
                        ui.label(format!("FPS: {:.1}", clock.smoothed_fps));
                        ui.label(format!("Frame time: {:.2} ms", clock.smoothed_frame_time_ms));
                        ui.label(format!("Target FPS: {}", clock.target_fps()));
                        ui.label(format!("Frame: {}", clock.frame_count));
                        ui.label(format!("Ticks: {}", clock.tick_count));
                        ui.separator();
                        ui.label(format!("Draw calls: {}", stats.draw_calls));
                        ui.label(format!("Sprites: {}", stats.sprite_count));
                        ui.label(format!("Textures: {}", stats.texture_count));
                        ui.label(format!("Jump latched: {}", stats.jump_latched));
                    });
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}
