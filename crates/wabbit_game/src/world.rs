//! The playable stage: one actor, one terrain block and the HUD lines that
//! describe them.

use std::path::Path;

use wabbit_core::{Canvas, Color, TextureLoader, Vec2};

use crate::actor::Actor;
use crate::controller::{apply_control, ControlInput, MotionConfig};
use crate::physics::{step, StepReport};
use crate::stage::StageFile;
use crate::terrain::Terrain;

pub const HELP_TEXT: &str = "Arrow keys to move left and right, SPACE to jump";
const HUD_TEXT_SIZE: f32 = 20.0;
/// Distance of the status column from the right edge of the stage.
const STATUS_COLUMN_INSET: f32 = 400.0;

#[derive(Debug)]
pub struct World {
    pub actor: Actor,
    pub terrain: Terrain,
    pub motion: MotionConfig,
    /// Bottom edge of the stage; the actor can never fall past it.
    pub floor_y: f32,
    stage_width: f32,
    greeting: String,
    last_report: StepReport,
}

impl World {
    pub fn spawn(stage: &StageFile, loader: &mut dyn TextureLoader) -> Self {
        let actor = Actor::create(
            loader,
            Path::new(&stage.actor.texture),
            &stage.actor.spawn(),
        );

        let settings = &stage.terrain;
        let mut terrain = Terrain::create(
            settings.bounds(),
            settings.rotation,
            settings.scale,
            settings.tint,
            settings.alpha,
        );
        if let Some(path) = &settings.texture {
            terrain = terrain.with_texture(loader.load_texture(Path::new(path)));
        }

        log::info!(
            "World spawned: actor {}x{} at ({}, {}), terrain {:?} (scale {})",
            actor.bounds.width,
            actor.bounds.height,
            actor.position.x,
            actor.position.y,
            terrain.bounds,
            terrain.scale
        );

        Self {
            actor,
            terrain,
            motion: stage.motion,
            floor_y: stage.window.height as f32,
            stage_width: stage.window.width as f32,
            greeting: stage.greeting.clone(),
            last_report: StepReport::default(),
        }
    }

    /// Input first, then physics. Exactly one of these per rendered frame.
    pub fn tick(&mut self, input: ControlInput) -> StepReport {
        apply_control(&mut self.actor, input, &self.motion);
        self.last_report = step(
            &mut self.actor,
            Some(&self.terrain),
            &self.motion,
            self.floor_y,
        );
        self.last_report
    }

    pub fn last_report(&self) -> StepReport {
        self.last_report
    }

    /// HUD text, then the actor, then the terrain on top of it.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        let status_x = self.stage_width - STATUS_COLUMN_INSET;
        let mut text = |line: &str, x: f32, y: f32| {
            canvas.draw_text(line, Vec2::new(x, y), HUD_TEXT_SIZE, Color::WHITE);
        };

        text(&self.greeting, 200.0, 200.0);
        text(HELP_TEXT, 200.0, 250.0);
        text(
            &format!(
                "Wabbit position: ({:.2}, {:.2})",
                self.actor.position.x, self.actor.position.y
            ),
            status_x,
            200.0,
        );
        text(
            &format!(
                "Wabbit velocity: ({:.2}, {:.2})",
                self.actor.velocity.x, self.actor.velocity.y
            ),
            status_x,
            250.0,
        );
        if let Some(feet_y) = self.last_report.feet_y {
            text(&format!("ypos: {feet_y}"), status_x, 300.0);
        }
        if self.last_report.collided {
            text("Collision detected", status_x, 350.0);
        }

        self.actor.render(canvas);
        self.terrain.render(canvas);
    }

    pub fn destroy(self, loader: &mut dyn TextureLoader) {
        self.actor.destroy(loader);
        self.terrain.destroy(loader);
        log::info!("World destroyed");
    }
}
