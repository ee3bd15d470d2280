/// Game loop timing and control system
///
/// Implements a fixed timestep game loop with variable rendering.
/// Simulation ticks run at a constant cadence (16ms by default) no matter
/// how fast frames are presented, and every tick runs to completion before
/// the next one starts. The stop signal is only checked between ticks.
use std::collections::VecDeque;

use anyhow::Result;

use super::clock::{Clock, SystemClock};
use super::input::{Action, InputManager};

/// Default tick length in milliseconds (~60Hz)
pub const DEFAULT_TICK_MS: u32 = 16;

/// Maximum number of fixed steps per frame to prevent spiral of death
pub const MAX_PHYSICS_STEPS: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Timing parameters for the fixed-step loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopConfig {
    /// Length of one simulation tick in milliseconds
    pub tick_ms: u32,
    /// Upper bound on ticks executed for a single rendered frame
    pub max_steps_per_frame: u32,
}

impl LoopConfig {
    /// Tick length in seconds, the `dt` handed to physics
    pub fn dt(&self) -> f32 {
        crate::core::math::ms_to_secs(self.tick_ms)
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            max_steps_per_frame: MAX_PHYSICS_STEPS,
        }
    }
}

/// Timing information for one fixed update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStep {
    /// 1-based tick counter
    pub index: u64,
    /// Simulation time at this tick, in milliseconds
    pub now_ms: u64,
    /// Tick length in seconds
    pub dt: f32,
}

/// Something the loop can drive: one fixed update per tick, one render per frame
pub trait Simulation {
    /// Advance the simulation by exactly one tick
    fn fixed_update(&mut self, input: &InputManager, step: TickStep);

    /// Hand the current frame to the renderer
    fn render(&mut self) -> Result<()>;
}

/// Game loop timing state
pub struct GameLoop<C: Clock = SystemClock> {
    clock: C,

    config: LoopConfig,

    /// Accumulated wall time not yet consumed by ticks (ms)
    accumulator_ms: u64,

    /// Clock reading at the start of the last frame
    last_frame_ms: u64,

    /// Simulation time advanced by ticks so far (ms)
    sim_time_ms: u64,

    /// Whether the game is paused
    paused: bool,

    /// Cleared by the stop signal; never set again
    running: bool,

    /// Frame timing history for FPS calculation
    frame_times: VecDeque<u64>,

    /// Current frame number
    frame_count: u64,

    /// Total updates executed
    update_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl GameLoop<SystemClock> {
    /// Create a new game loop on the wall clock
    pub fn new(config: LoopConfig) -> Self {
        Self::with_clock(SystemClock::new(), config)
    }
}

impl<C: Clock> GameLoop<C> {
    /// Create a game loop reading time from `clock`
    pub fn with_clock(clock: C, config: LoopConfig) -> Self {
        let config = LoopConfig {
            tick_ms: config.tick_ms.max(1),
            max_steps_per_frame: config.max_steps_per_frame.max(1),
        };
        let now = clock.elapsed_ms();

        Self {
            clock,
            config,
            accumulator_ms: 0,
            last_frame_ms: now,
            sim_time_ms: 0,
            paused: false,
            running: true,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            update_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = self.clock.elapsed_ms();
        let frame_time = now.saturating_sub(self.last_frame_ms);
        self.last_frame_ms = now;
        self.frame_count += 1;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }

        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        // If paused, don't accumulate time for updates
        if self.paused || !self.running {
            return 0;
        }

        self.accumulator_ms += frame_time;

        let tick = u64::from(self.config.tick_ms);
        let mut updates = 0;
        while self.accumulator_ms >= tick && updates < self.config.max_steps_per_frame {
            self.accumulator_ms -= tick;
            updates += 1;
        }

        if self.accumulator_ms >= tick {
            log::warn!(
                "Frame took {}ms, dropping {}ms of simulation time",
                frame_time,
                self.accumulator_ms - self.accumulator_ms % tick
            );
            self.accumulator_ms %= tick;
        }

        updates
    }

    /// Run one rendered frame: as many ticks as the clock allows, then a render
    ///
    /// Returns the number of ticks executed. The quit action and the stop
    /// signal are honoured between ticks, never in the middle of one.
    pub fn run_frame<S: Simulation>(&mut self, sim: &mut S, input: &InputManager) -> Result<u32> {
        let updates = self.begin_frame();
        let mut executed = 0;

        for _ in 0..updates {
            if !self.tick_boundary(input) {
                break;
            }
            let step = self.next_step();
            sim.fixed_update(input, step);
            executed += 1;
        }

        if self.running {
            sim.render()?;
        }

        Ok(executed)
    }

    /// Run exactly `ticks` ticks without consulting the clock, rendering after each
    ///
    /// Used for headless runs and tests. Stops early on the stop signal.
    pub fn run_ticks<S: Simulation>(
        &mut self,
        sim: &mut S,
        input: &InputManager,
        ticks: u32,
    ) -> Result<u32> {
        let mut executed = 0;

        for _ in 0..ticks {
            if self.paused || !self.tick_boundary(input) {
                break;
            }
            let step = self.next_step();
            sim.fixed_update(input, step);
            sim.render()?;
            executed += 1;
        }

        Ok(executed)
    }

    /// Check the stop signal at a tick boundary
    fn tick_boundary(&mut self, input: &InputManager) -> bool {
        if self.running && input.any_player_pressed(Action::Quit) {
            log::info!("Quit requested");
            self.stop();
        }
        self.running
    }

    fn next_step(&mut self) -> TickStep {
        self.update_count += 1;
        self.sim_time_ms += u64::from(self.config.tick_ms);

        TickStep {
            index: self.update_count,
            now_ms: self.sim_time_ms,
            dt: self.config.dt(),
        }
    }

    /// Time source driving this loop
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get the fixed timestep for physics updates (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        self.config.dt()
    }

    /// Get the loop configuration
    pub fn config(&self) -> LoopConfig {
        self.config
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Simulation time consumed by ticks so far (ms)
    pub fn sim_time_ms(&self) -> u64 {
        self.sim_time_ms
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of updates executed
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the stop signal has not been raised yet
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Raise the stop signal; takes effect at the next tick boundary
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Game loop stopping after {} updates", self.update_count);
        }
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator_ms = 0;
            log::info!("Game resumed");
        }
    }

    fn update_fps(&mut self) {
        let total: u64 = self.frame_times.iter().sum();
        self.current_fps = if total > 0 {
            self.frame_times.len() as f32 * 1000.0 / total as f32
        } else {
            0.0
        };
    }
}
