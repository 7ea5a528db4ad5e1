//! Frame pacing and FPS smoothing.
//!
//! The simulation is frame-locked: every rendered frame runs exactly one
//! input + physics tick, so the clock only decides *when* the next frame is
//! due and keeps statistics for the debug overlay.

use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;
const LONG_FRAME_SECS: f64 = 0.25;

pub struct FrameClock {
    target_fps: u32,
    frame_budget: Duration,
    next_deadline: Instant,
    last_instant: Instant,
    pub real_dt: f64,
    pub frame_count: u64,
    pub tick_count: u64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        let now = Instant::now();
        let nominal_dt = 1.0 / target_fps as f64;
        Self {
            target_fps,
            frame_budget: Duration::from_secs_f64(nominal_dt),
            next_deadline: now,
            last_instant: now,
            real_dt: 0.0,
            frame_count: 0,
            tick_count: 0,
            fps_samples: [nominal_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: target_fps as f64,
            smoothed_frame_time_ms: nominal_dt * 1000.0,
        }
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
        self.frame_budget = Duration::from_secs_f64(1.0 / self.target_fps as f64);
        log::info!("Target frame rate: {} fps", self.target_fps);
    }

    pub fn begin_frame(&mut self) {
        self.begin_frame_at(Instant::now());
    }

    pub fn begin_frame_at(&mut self, now: Instant) {
        self.real_dt = now.saturating_duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.frame_count += 1;

        if self.real_dt > LONG_FRAME_SECS {
            log::warn!(
                "Frame took {:.1}ms (budget {:.1}ms)",
                self.real_dt * 1000.0,
                self.frame_budget.as_secs_f64() * 1000.0
            );
        }

        // Schedule from the previous deadline so pacing does not drift, but
        // never schedule into the past after a stall.
        self.next_deadline = (self.next_deadline + self.frame_budget).max(now);

        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn record_tick(&mut self) {
        self.tick_count += 1;
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    pub fn is_frame_due(&self, now: Instant) -> bool {
        now >= self.next_deadline
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}
