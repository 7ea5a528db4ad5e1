//! One physics tick for the actor: integrate, then either roll back on terrain
//! overlap or apply gravity against the implicit floor at the bottom of the
//! screen. There is no horizontal clamp; the actor may leave the screen sideways.

use wabbit_core::overlap;

use crate::actor::Actor;
use crate::controller::MotionConfig;
use crate::terrain::Terrain;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub collided: bool,
    /// Bottom edge of the actor after integration, truncated to whole pixels.
    /// Only measured on ticks without a collision.
    pub feet_y: Option<i32>,
}

pub fn step(
    actor: &mut Actor,
    terrain: Option<&Terrain>,
    config: &MotionConfig,
    floor_y: f32,
) -> StepReport {
    let previous = actor.position;
    actor.position += actor.velocity;
    actor.sync_bounds();

    if terrain.is_some_and(|terrain| overlap(&actor.bounds, &terrain.bounds)) {
        // Undo the whole displacement. Only vertical velocity is cancelled,
        // so horizontal speed carries into the next tick.
        actor.position = previous;
        actor.velocity.y = 0.0;
        actor.sync_bounds();
        return StepReport {
            collided: true,
            feet_y: None,
        };
    }

    let feet_y = (actor.position.y + actor.bounds.height) as i32;
    apply_gravity(actor, config.gravity, floor_y);
    StepReport {
        collided: false,
        feet_y: Some(feet_y),
    }
}

fn apply_gravity(actor: &mut Actor, gravity: f32, floor_y: f32) {
    let ground_y = floor_y - actor.bounds.height;
    if actor.position.y >= ground_y {
        actor.position.y = ground_y;
        actor.velocity.y = 0.0;
    } else {
        actor.velocity.y += gravity;
    }
}
