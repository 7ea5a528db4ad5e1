//! Wabbit Hop -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. The simulation is
//! frame-locked: every `RedrawRequested` runs exactly one tick, then draws.
//!
//!   1. `begin_frame()` -- frame statistics and the next pacing deadline
//!   2. one-shot keys (Escape closes, F3 toggles the debug window)
//!   3. `World::tick()` -- input mapper, then the physics/collision step
//!   4. `World::render()` into a `FrameCanvas`: quads to the sprite batch,
//!      HUD text to the egui queue
//!   5. sprite pass (cleared to black), then the egui pass on top
//!
//! `about_to_wait` paces redraws with `ControlFlow::WaitUntil`; the surface is
//! also vsync'd, so either one alone caps the frame rate.

mod actor;
mod canvas;
mod controller;
mod physics;
#[cfg(test)]
mod replay;
mod stage;
mod terrain;
#[cfg(test)]
mod test_support;
mod world;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use canvas::FrameCanvas;
use controller::ControlInput;
use stage::{load_stage_or_default, StageFile, STAGE_FILE_NAME};
use wabbit_core::input::{InputState, Key};
use wabbit_core::time::FrameClock;
use wabbit_core::Color;
use wabbit_devtools::{DebugOverlay, OverlayStats};
use wabbit_platform::{create_window, search_and_set_resource_dir, PlatformConfig};
use wabbit_render::{GpuContext, SpriteRenderer};
use world::World;

const RESOURCE_DIR_NAME: &str = "resources";
const CLEAR_COLOR: Color = Color::BLACK;

struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: SpriteRenderer,
    overlay: DebugOverlay,
    clock: FrameClock,
    input: InputState,
    // Taken exactly once in `exiting` so its textures are released.
    world: Option<World>,
}

impl EngineState {
    fn new(window: Arc<Window>, stage: &StageFile) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let mut renderer =
            SpriteRenderer::new(&gpu, (stage.window.width, stage.window.height));
        let overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);
        let world = World::spawn(stage, &mut renderer.loader(&gpu));

        let mut clock = FrameClock::default();
        clock.set_target_fps(stage.window.target_fps);

        Ok(Self {
            window,
            gpu,
            renderer,
            overlay,
            clock,
            input: InputState::new(),
            world: Some(world),
        })
    }

    fn tick(&mut self) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        world.tick(ControlInput::from_input(&self.input));
        self.clock.record_tick();
    }

    fn render(&mut self) {
        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        {
            let batch = self.renderer.batch_mut();
            batch.clear();
            let mut canvas = FrameCanvas::new(batch, self.overlay.text_queue_mut());
            if let Some(world) = &self.world {
                world.render(&mut canvas);
            }
        }
        self.renderer.upload(&self.gpu);

        let batch = self.renderer.batch();
        let stats = OverlayStats {
            draw_calls: batch.draw_calls().len() as u32,
            sprite_count: batch.quad_count() as u32,
            texture_count: self.renderer.texture_count() as u32,
            jump_latched: self
                .world
                .as_ref()
                .is_some_and(|world| world.actor.jump_latched),
        };
        let (egui_primitives, egui_textures_delta) =
            self.overlay.prepare(&self.window, &self.clock, &stats);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(to_wgpu_color(CLEAR_COLOR)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            self.renderer.draw(&mut render_pass);
        }

        self.overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.overlay.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn destroy_world(&mut self) {
        if let Some(world) = self.world.take() {
            world.destroy(&mut self.renderer.loader(&self.gpu));
        }
    }
}

struct App {
    stage: StageFile,
    state: Option<EngineState>,
    failed: bool,
}

impl App {
    fn new(stage: StageFile) -> Self {
        Self {
            stage,
            state: None,
            failed: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, message: &str) {
        log::error!("{message}");
        self.failed = true;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let config = PlatformConfig {
            title: self.stage.window.title.clone(),
            width: self.stage.window.width,
            height: self.stage.window.height,
            ..PlatformConfig::default()
        };
        let window = match create_window(event_loop, &config) {
            Ok(window) => window,
            Err(err) => return self.fail(event_loop, &err),
        };
        log::info!("Window created: {}x{}", config.width, config.height);

        match EngineState::new(window, &self.stage) {
            Ok(state) => self.state = Some(state),
            Err(err) => self.fail(event_loop, &err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &self.state else {
            return;
        };
        if state.clock.is_frame_due(Instant::now()) {
            state.window.request_redraw();
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(state.clock.next_deadline()));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state.overlay.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                state.gpu.resize(physical_size.width, physical_size.height);
            }

            WindowEvent::Focused(false) => state.input.release_all(),

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(key),
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                state.clock.begin_frame();

                if state.input.is_just_pressed(Key::Escape) {
                    log::info!("Escape pressed, exiting.");
                    event_loop.exit();
                    return;
                }
                if state.input.is_just_pressed(Key::F3) {
                    state.overlay.toggle();
                }

                state.tick();
                state.render();
                state.input.end_frame();
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.as_mut() {
            state.destroy_world();
            log::info!(
                "Shutting down after {} frames ({} ticks)",
                state.clock.frame_count,
                state.clock.tick_count
            );
        }
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

fn to_wgpu_color(color: Color) -> wgpu::Color {
    let [r, g, b, a] = color.to_array_f32();
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Wabbit Hop starting...");

    // Without the folder every texture degrades to its placeholder, which is
    // still playable.
    if let Err(err) = search_and_set_resource_dir(RESOURCE_DIR_NAME) {
        log::warn!("{err}");
    }

    let stage = match load_stage_or_default(Path::new(STAGE_FILE_NAME)) {
        Ok(stage) => stage,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(stage);
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {err}");
        return ExitCode::FAILURE;
    }

    if app.failed {
        ExitCode::FAILURE
    } else {
        log::info!("Goodbye.");
        ExitCode::SUCCESS
    }
}
