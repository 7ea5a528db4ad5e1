use crate::controller::ControlInput;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default)]
    pub nudge_up: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<ControlInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(ControlInput {
                    right: frame.right,
                    left: frame.left,
                    jump: frame.jump,
                    nudge_up: frame.nudge_up,
                });
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::StageFile;
    use crate::test_support::FakeLoader;
    use crate::world::World;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "wabbit_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn load_inline(name_hint: &str, body: &str) -> ReplaySequence {
        let path = temp_file_path(name_hint);
        fs::write(&path, body).expect("write replay file");
        let replay = load_replay_from_path(&path).expect("replay should load");
        let _ = fs::remove_file(path);
        replay
    }

    fn fresh_world() -> World {
        let mut loader = FakeLoader::with_size(32, 32);
        World::spawn(&StageFile::default(), &mut loader)
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let replay = load_inline(
            "parse",
            r#"{
              "frames": [
                { "right": true, "repeat": 3 },
                { "jump": true }
              ]
            }"#,
        );
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 4);
        assert!(expanded[0].right);
        assert!(expanded[3].jump);
        assert!(!expanded[3].right);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let replay = load_inline(
            "deterministic",
            r#"{
              "frames": [
                { "right": true, "repeat": 60 },
                { "right": true, "jump": true, "repeat": 4 },
                { "right": true, "repeat": 120 },
                { "left": true, "nudge_up": true, "repeat": 5 },
                { "left": true, "repeat": 45 },
                { "repeat": 30 }
              ]
            }"#,
        );
        let inputs = replay.expanded_inputs();

        let mut run_a = fresh_world();
        let mut run_b = fresh_world();
        let reports_a: Vec<_> = inputs.iter().map(|input| run_a.tick(*input)).collect();
        let reports_b: Vec<_> = inputs.iter().map(|input| run_b.tick(*input)).collect();

        assert_eq!(reports_a, reports_b);
        assert_eq!(run_a.actor.position, run_b.actor.position);
        assert_eq!(run_a.actor.velocity, run_b.actor.velocity);
        assert_eq!(run_a.actor.bounds, run_b.actor.bounds);
    }

    #[test]
    fn running_right_lands_on_terrain_then_drops_past_it() {
        let replay = load_inline("run_right", r#"{ "frames": [ { "right": true, "repeat": 600 } ] }"#);
        let mut world = fresh_world();
        let mut collided = false;
        for input in replay.expanded_inputs() {
            collided |= world.tick(input).collided;
            assert!(world.actor.velocity.x <= world.motion.max_x_velocity);
        }

        assert!(collided);
        assert!(world.actor.position.x > world.terrain.bounds.right());
        assert_eq!(world.actor.position.y, world.floor_y - world.actor.bounds.height);
        assert_eq!(world.actor.velocity.x, world.motion.max_x_velocity);
    }

    #[test]
    fn jump_from_the_floor_rises_and_settles_back() {
        let replay = load_inline(
            "jump",
            r#"{
              "frames": [
                { "repeat": 200 },
                { "jump": true, "repeat": 10 },
                { "repeat": 300 }
              ]
            }"#,
        );
        let inputs = replay.expanded_inputs();
        let mut world = fresh_world();
        let ground_y = world.floor_y - world.actor.bounds.height;

        for input in &inputs[..200] {
            world.tick(*input);
        }
        assert_eq!(world.actor.position.y, ground_y);

        let mut highest = ground_y;
        for input in &inputs[200..] {
            world.tick(*input);
            assert!(world.actor.velocity.y >= world.motion.jump_velocity_floor);
            highest = highest.min(world.actor.position.y);
        }

        assert!(highest < ground_y - 100.0);
        assert!(world.actor.jump_latched);
        assert_eq!(world.actor.position.y, ground_y);
        assert_eq!(world.actor.velocity.y, 0.0);
    }
}
