//! Frame Driver: one synchronous tick per display refresh, forever.
//!
//! The host calls [`FrameDriver::tick`] from its redraw callback, renders,
//! then asks for the next redraw. There is no stop state; the loop ends when
//! the window goes away.

use crate::scene::WaterScene;
use std::time::{Duration, Instant};

/// Frames between periodic progress logs.
const LOG_INTERVAL: u64 = 600;

/// Monotonic elapsed-time source. Created once, never reset.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// What one tick wrote into the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStamp {
    /// Seconds since the clock started; equals the time uniform after the tick.
    pub elapsed: f32,
    pub frame_index: u64,
}

#[derive(Debug, Default)]
pub struct FrameDriver {
    clock: Clock,
    frame_index: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the clock and write elapsed time into the time uniform.
    pub fn tick(&mut self, scene: &mut WaterScene) -> FrameStamp {
        let elapsed = self.clock.elapsed_secs();
        self.advance(scene, elapsed)
    }

    /// Write a given elapsed time into the scene. `tick` uses the clock; tests
    /// and headless tools pass time explicitly.
    pub fn advance(&mut self, scene: &mut WaterScene, elapsed: f32) -> FrameStamp {
        // The clock is monotonic; an explicit earlier time never rewinds the scene.
        let elapsed = elapsed.max(scene.uniforms.time);
        scene.uniforms.time = elapsed;

        let stamp = FrameStamp {
            elapsed,
            frame_index: self.frame_index,
        };
        if self.frame_index % LOG_INTERVAL == 0 {
            tracing::debug!(frame = self.frame_index, elapsed, "frame");
        }
        self.frame_index = self.frame_index.wrapping_add(1);
        stamp
    }

    pub fn frames(&self) -> u64 {
        self.frame_index
    }
}
