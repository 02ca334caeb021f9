//! Playback control for the preview
//!
//! Two independent flags, `auto_rotate` and `simulating`, plus a shared speed
//! multiplier. The controller only keeps time and reports what a frame
//! should do; the orchestrator applies it.

use std::f64::consts::TAU;

/// Slowest accepted playback speed
pub const MIN_SPEED: f32 = 0.05;
/// Fastest accepted playback speed
pub const MAX_SPEED: f32 = 10.0;

/// Run/pause flags and the accumulated playback time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub auto_rotate: bool,
    pub simulating: bool,
    pub speed: f32,
    /// Sole driver of the displacement waveform, in scaled seconds
    pub elapsed_time: f64,
}

impl PlaybackState {
    /// Waveform phase of the current elapsed time
    pub fn phase(&self) -> f32 {
        wave_phase(self.elapsed_time)
    }
}

/// Reduce an elapsed time to `[0, 2π)`.
///
/// Every displacement term is `2π`-periodic in time, so the reduced value
/// drives the same waveform while keeping `f32` precision at long run times.
pub fn wave_phase(elapsed: f64) -> f32 {
    elapsed.rem_euclid(TAU) as f32
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            simulating: true,
            speed: 1.0,
            elapsed_time: 0.0,
        }
    }
}

/// What one tick asks of the orchestrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    pub elapsed_time: f64,
    /// Time fed to the simulation step, see [`wave_phase`]
    pub phase: f32,
    /// Rotation about the vertical axis to apply this frame, if auto-rotating
    pub rotation_delta: Option<f32>,
    /// Whether the working mesh must be recomputed
    pub simulate: bool,
}

#[derive(Debug, Clone)]
pub struct PlaybackController {
    state: PlaybackState,
    /// Radians per second at speed 1.0
    rotation_rate: f32,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(PlaybackState::default())
    }
}

impl PlaybackController {
    pub fn new(state: PlaybackState) -> Self {
        let mut controller = Self {
            state,
            rotation_rate: 0.5,
        };
        controller.set_speed(state.speed);
        controller
    }

    pub fn with_rotation_rate(mut self, rate: f32) -> Self {
        if rate.is_finite() {
            self.rotation_rate = rate;
        }
        self
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn elapsed_time(&self) -> f64 {
        self.state.elapsed_time
    }

    pub fn phase(&self) -> f32 {
        self.state.phase()
    }

    pub fn is_rotating(&self) -> bool {
        self.state.auto_rotate
    }

    pub fn is_simulating(&self) -> bool {
        self.state.simulating
    }

    pub fn speed(&self) -> f32 {
        self.state.speed
    }

    pub fn rotation_rate(&self) -> f32 {
        self.rotation_rate
    }

    /// Flip auto-rotation, returning the new value
    pub fn toggle_rotation(&mut self) -> bool {
        self.state.auto_rotate = !self.state.auto_rotate;
        log::debug!("Auto-rotate {}", on_off(self.state.auto_rotate));
        self.state.auto_rotate
    }

    /// Flip simulation, returning the new value
    pub fn toggle_simulation(&mut self) -> bool {
        self.state.simulating = !self.state.simulating;
        log::debug!("Simulation {}", on_off(self.state.simulating));
        self.state.simulating
    }

    /// Set the speed multiplier, clamped to `[MIN_SPEED, MAX_SPEED]`
    pub fn set_speed(&mut self, speed: f32) {
        let clamped = if speed.is_finite() {
            speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            1.0
        };
        if clamped != speed {
            log::debug!("Playback speed {speed} clamped to {clamped}");
        }
        self.state.speed = clamped;
    }

    pub fn reset_time(&mut self) {
        self.state.elapsed_time = 0.0;
    }

    /// Advance time by `dt` seconds scaled by the speed.
    ///
    /// Time keeps running while the simulation is paused; only the mesh
    /// update is skipped.
    pub fn tick(&mut self, dt: f32) -> FrameTick {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let scaled = dt as f64 * self.state.speed as f64;
        self.state.elapsed_time += scaled;

        FrameTick {
            elapsed_time: self.state.elapsed_time,
            phase: self.state.phase(),
            rotation_delta: self
                .state
                .auto_rotate
                .then_some(scaled as f32 * self.rotation_rate),
            simulate: self.state.simulating,
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
