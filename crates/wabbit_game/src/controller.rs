use serde::Deserialize;
use wabbit_core::input::{InputState, Key};

use crate::actor::Actor;

/// Keys the wabbit reacts to, sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    pub right: bool,
    pub left: bool,
    pub jump: bool,
    pub nudge_up: bool,
}

impl ControlInput {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            right: input.is_held(Key::Right),
            left: input.is_held(Key::Left),
            jump: input.is_held(Key::Space),
            nudge_up: input.is_held(Key::Up),
        }
    }
}

/// Movement tuning. Units are pixels and pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub max_x_velocity: f32,
    /// Speed a run starts from when pressing against the current direction.
    pub start_speed: f32,
    pub accel_factor: f32,
    pub brake: f32,
    pub jump_impulse: f32,
    /// Lowest (most upward) vertical velocity a jump impulse can reach.
    pub jump_velocity_floor: f32,
    pub nudge_up: f32,
    pub gravity: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_x_velocity: 5.0,
            start_speed: 1.0,
            accel_factor: 1.2,
            brake: 0.5,
            jump_impulse: 5.0,
            jump_velocity_floor: -10.0,
            nudge_up: 5.0,
            gravity: 0.5,
        }
    }
}

/// Turns held keys into velocity (and the Up nudge into position) changes.
/// Runs once per tick before the physics step.
pub fn apply_control(actor: &mut Actor, input: ControlInput, config: &MotionConfig) {
    let vx = &mut actor.velocity.x;
    if input.right {
        if *vx <= 0.0 {
            *vx = config.start_speed;
        }
        *vx = (*vx * config.accel_factor).min(config.max_x_velocity);
    } else if input.left {
        if *vx >= 0.0 {
            *vx = -config.start_speed;
        }
        *vx = (*vx * config.accel_factor).max(-config.max_x_velocity);
    } else {
        *vx = brake_toward_zero(*vx, config.brake);
    }

    // Held jump keeps pushing every tick until the floor is reached.
    if input.jump {
        actor.velocity.y = (actor.velocity.y - config.jump_impulse).max(config.jump_velocity_floor);
        actor.jump_latched = true;
    }

    // Moves the sprite directly; velocity is untouched.
    if input.nudge_up {
        actor.position.y -= config.nudge_up;
    }
}

fn brake_toward_zero(velocity: f32, brake: f32) -> f32 {
    if velocity > 0.0 {
        (velocity - brake).max(0.0)
    } else if velocity < 0.0 {
        (velocity + brake).min(0.0)
    } else {
        velocity
    }
}
