use serde::Deserialize;
use std::fs;
use std::path::Path;

use wabbit_core::{Color, Rect, Vec2};

use crate::actor::ActorSpawn;
use crate::controller::MotionConfig;

pub const STAGE_FILE_NAME: &str = "stage.json";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StageFile {
    pub version: String,
    pub greeting: String,
    pub window: WindowSettings,
    pub actor: ActorSettings,
    pub terrain: TerrainSettings,
    pub motion: MotionConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ActorSettings {
    pub texture: String,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale: f32,
    pub tint: Color,
    pub alpha: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TerrainSettings {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub scale: f32,
    pub tint: Color,
    pub alpha: f32,
    pub texture: Option<String>,
}

impl Default for StageFile {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            greeting: "Hello Wabbit".to_string(),
            window: WindowSettings::default(),
            actor: ActorSettings::default(),
            terrain: TerrainSettings::default(),
            motion: MotionConfig::default(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Wabbit Hop".to_string(),
            width: 1280,
            height: 800,
            target_fps: 60,
        }
    }
}

impl Default for ActorSettings {
    fn default() -> Self {
        let spawn = ActorSpawn::default();
        Self {
            texture: "wabbit_alpha.png".to_string(),
            x: spawn.position.x,
            y: spawn.position.y,
            rotation: spawn.rotation,
            scale: spawn.scale,
            tint: spawn.tint,
            alpha: spawn.alpha,
            velocity_x: spawn.velocity.x,
            velocity_y: spawn.velocity.y,
        }
    }
}

impl Default for TerrainSettings {
    /// A 400x200 block whose right edge sits at the horizontal centre of the
    /// default window, resting on the bottom edge.
    fn default() -> Self {
        Self {
            x: 1280.0 / 2.0 - 400.0,
            y: 800.0 - 200.0,
            width: 400.0,
            height: 200.0,
            rotation: 0.0,
            scale: 1.0,
            tint: Color::GREEN,
            alpha: 1.0,
            texture: None,
        }
    }
}

impl ActorSettings {
    pub fn spawn(&self) -> ActorSpawn {
        ActorSpawn {
            position: Vec2::new(self.x, self.y),
            rotation: self.rotation,
            scale: self.scale,
            tint: self.tint,
            alpha: self.alpha,
            velocity: Vec2::new(self.velocity_x, self.velocity_y),
        }
    }
}

impl TerrainSettings {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

pub fn load_stage_from_path(stage_path: &Path) -> Result<StageFile, String> {
    let raw = fs::read_to_string(stage_path)
        .map_err(|e| format!("Failed to read stage file {}: {e}", stage_path.display()))?;
    let stage: StageFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse stage JSON {}: {e}", stage_path.display()))?;
    validate_stage(&stage)?;
    Ok(stage)
}

/// A missing file is not an error: the built-in stage is used instead.
pub fn load_stage_or_default(stage_path: &Path) -> Result<StageFile, String> {
    if !stage_path.exists() {
        log::info!(
            "No stage file at {}; using built-in stage",
            stage_path.display()
        );
        return Ok(StageFile::default());
    }
    let stage = load_stage_from_path(stage_path)?;
    log::info!("Stage loaded: {} (version {})", stage_path.display(), stage.version);
    Ok(stage)
}

pub fn validate_stage(stage: &StageFile) -> Result<(), String> {
    let window = &stage.window;
    if window.width == 0 || window.height == 0 {
        return Err(format!(
            "Stage validation failed: window size must be non-zero, got {}x{}",
            window.width, window.height
        ));
    }
    if window.target_fps == 0 {
        return Err("Stage validation failed: window.target_fps must be > 0".to_string());
    }

    let actor = &stage.actor;
    if !(actor.scale.is_finite() && actor.scale > 0.0) {
        return Err(format!(
            "Stage validation failed: actor.scale must be > 0, got {}",
            actor.scale
        ));
    }
    if actor.texture.trim().is_empty() {
        return Err("Stage validation failed: actor.texture is empty".to_string());
    }
    let actor_values = [
        ("actor.x", actor.x),
        ("actor.y", actor.y),
        ("actor.rotation", actor.rotation),
        ("actor.alpha", actor.alpha),
        ("actor.velocity_x", actor.velocity_x),
        ("actor.velocity_y", actor.velocity_y),
    ];
    require_finite(&actor_values)?;

    let terrain = &stage.terrain;
    require_finite(&[
        ("terrain.x", terrain.x),
        ("terrain.y", terrain.y),
        ("terrain.width", terrain.width),
        ("terrain.height", terrain.height),
        ("terrain.rotation", terrain.rotation),
        ("terrain.scale", terrain.scale),
        ("terrain.alpha", terrain.alpha),
    ])?;
    if terrain.width < 0.0 || terrain.height < 0.0 {
        return Err(format!(
            "Stage validation failed: terrain size must not be negative, got {}x{}",
            terrain.width, terrain.height
        ));
    }
    if terrain.width == 0.0 || terrain.height == 0.0 {
        log::warn!("Stage terrain has zero area; nothing can collide with it.");
    }

    let motion = &stage.motion;
    require_finite(&[
        ("motion.max_x_velocity", motion.max_x_velocity),
        ("motion.start_speed", motion.start_speed),
        ("motion.accel_factor", motion.accel_factor),
        ("motion.brake", motion.brake),
        ("motion.jump_impulse", motion.jump_impulse),
        ("motion.jump_velocity_floor", motion.jump_velocity_floor),
        ("motion.nudge_up", motion.nudge_up),
        ("motion.gravity", motion.gravity),
    ])?;
    if motion.gravity <= 0.0 {
        return Err("Stage validation failed: motion.gravity must be > 0".to_string());
    }
    if motion.max_x_velocity <= 0.0 {
        return Err("Stage validation failed: motion.max_x_velocity must be > 0".to_string());
    }
    if motion.jump_velocity_floor >= 0.0 {
        return Err(
            "Stage validation failed: motion.jump_velocity_floor must be < 0".to_string(),
        );
    }
    if motion.start_speed <= 0.0 {
        return Err("Stage validation failed: motion.start_speed must be > 0".to_string());
    }
    // Below 1.0 a held arrow key would slow the actor down.
    if motion.accel_factor < 1.0 {
        return Err("Stage validation failed: motion.accel_factor must be >= 1".to_string());
    }
    // A non-positive brake never reaches zero and can push past max_x_velocity.
    if motion.brake <= 0.0 {
        return Err("Stage validation failed: motion.brake must be > 0".to_string());
    }
    if motion.jump_impulse < 0.0 {
        return Err("Stage validation failed: motion.jump_impulse must be >= 0".to_string());
    }
    if motion.nudge_up < 0.0 {
        return Err("Stage validation failed: motion.nudge_up must be >= 0".to_string());
    }

    Ok(())
}

fn require_finite(values: &[(&str, f32)]) -> Result<(), String> {
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(format!(
            "Stage validation failed: {name} must be finite, got {value}"
        )),
        None => Ok(()),
    }
}
