/// Game loop timing and control system
///
/// Two pieces live here. `FrameClock` measures how much real time passed
/// between rendered frames (or hands out a fixed frame time for
/// deterministic runs). `FixedTimestep` turns accumulated real time into a
/// number of fixed-size simulation steps, catching the simulation up to
/// real time every frame without interpolation.
use std::time::{Duration, Instant};

/// Default physics/update rate (60 updates per second)
pub const DEFAULT_STEP_RATE: u32 = 60;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Something that advances in fixed steps and reports how far it has got
pub trait Simulation {
    /// Simulated seconds elapsed so far
    fn simulated_time(&self) -> f64;

    /// Advance by exactly one fixed step
    fn step(&mut self);
}

/// Frame timing state
pub struct FrameClock {
    /// Time of last frame
    last_frame_time: Instant,

    /// Frame time handed out instead of measuring, if set
    fixed_frame_time: Option<Duration>,

    /// Whether time is paused
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Delta for the current frame in seconds (0 while paused)
    delta: f64,
}

impl FrameClock {
    /// Create a clock that measures real time
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame_time: now,
            fixed_frame_time: None,
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
            delta: 0.0,
        }
    }

    /// Create a clock that reports the same frame time every frame
    pub fn with_fixed_frame_time(frame_time: Duration) -> Self {
        let mut clock = Self::new();
        clock.fixed_frame_time = Some(frame_time);
        clock
    }

    /// Begin a new frame, returns the delta in seconds
    pub fn begin_frame(&mut self) -> f64 {
        let now = Instant::now();
        let frame_time = match self.fixed_frame_time {
            Some(fixed) => fixed,
            None => now.duration_since(self.last_frame_time),
        };
        self.last_frame_time = now;
        self.tick(frame_time)
    }

    /// Record a frame of the given length, returns the delta in seconds
    pub fn tick(&mut self, frame_time: Duration) -> f64 {
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        // Paused frames contribute no time to the simulation
        self.delta = if self.paused {
            0.0
        } else {
            frame_time.as_secs_f64()
        };
        self.delta
    }

    /// Delta of the current frame in seconds
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Check if time is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the clock
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Paused");
        }
    }

    /// Resume the clock
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Don't count the time spent paused as the next frame
            self.last_frame_time = Instant::now();
            log::info!("Resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Catch-up driver for a fixed-step simulation
///
/// Real time is accumulated as frames arrive; `catch_up` then steps the
/// simulation until its simulated time is no longer behind. There is no cap
/// on the number of steps in one frame.
#[derive(Debug, Default)]
pub struct FixedTimestep {
    /// Accumulated real time in seconds
    real_time: f64,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self { real_time: 0.0 }
    }

    /// Add a frame's worth of real time
    pub fn accumulate(&mut self, delta: f64) {
        if delta > 0.0 {
            self.real_time += delta;
        }
    }

    /// Step `sim` until it has caught up with real time, returns the step count
    pub fn catch_up<S: Simulation + ?Sized>(&self, sim: &mut S) -> u32 {
        let mut steps = 0;
        while sim.simulated_time() < self.real_time {
            sim.step();
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    /// Counts steps at a fixed rate without any physics
    struct StepCounter {
        steps: u64,
        rate: u32,
    }

    impl Simulation for StepCounter {
        fn simulated_time(&self) -> f64 {
            self.steps as f64 / self.rate as f64
        }

        fn step(&mut self) {
            self.steps += 1;
        }
    }

    fn counter() -> StepCounter {
        StepCounter {
            steps: 0,
            rate: DEFAULT_STEP_RATE,
        }
    }

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count, 0);
        assert_eq!(clock.delta(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_pause_resume() {
        let mut clock = FrameClock::new();
        clock.pause();
        assert!(clock.is_paused());
        clock.resume();
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = FrameClock::new();
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_paused_frames_have_no_delta() {
        let mut clock = FrameClock::new();
        clock.pause();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(clock.begin_frame(), 0.0);
        assert_eq!(clock.frame_count, 1);
    }

    #[test]
    fn test_fixed_frame_time() {
        let mut clock = FrameClock::with_fixed_frame_time(Duration::from_millis(250));
        assert_eq!(clock.begin_frame(), 0.25);
        assert_eq!(clock.begin_frame(), 0.25);
        assert_eq!(clock.frame_count, 2);
    }

    #[test]
    fn test_real_delta_is_measured() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        assert!(clock.begin_frame() >= 0.010);
    }

    #[test]
    fn test_fps_after_ten_frames() {
        let mut clock = FrameClock::new();
        for _ in 0..10 {
            clock.tick(Duration::from_millis(20));
        }
        assert!((clock.fps() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_catch_up_exact_multiple() {
        let mut sim = counter();
        let mut stepper = FixedTimestep::new();
        stepper.accumulate(0.25);
        assert_eq!(stepper.catch_up(&mut sim), 15);
        assert_eq!(sim.steps, 15);
    }

    #[test]
    fn test_catch_up_rounds_up() {
        // 0.125 s is 7.5 steps, so the simulation runs slightly ahead
        let mut sim = counter();
        let mut stepper = FixedTimestep::new();
        stepper.accumulate(0.125);
        assert_eq!(stepper.catch_up(&mut sim), 8);
    }

    #[test]
    fn test_catch_up_across_frames() {
        let mut sim = counter();
        let mut stepper = FixedTimestep::new();

        stepper.accumulate(0.125);
        assert_eq!(stepper.catch_up(&mut sim), 8);

        // Total 0.25 s is 15 steps; 8 already ran
        stepper.accumulate(0.125);
        assert_eq!(stepper.catch_up(&mut sim), 7);
        assert_eq!(sim.steps, 15);
    }

    #[test]
    fn test_long_frame_is_not_capped() {
        let mut sim = counter();
        let mut stepper = FixedTimestep::new();
        stepper.accumulate(2.0);
        assert_eq!(stepper.catch_up(&mut sim), 120);
    }

    #[test]
    fn test_zero_and_negative_delta_do_nothing() {
        let mut sim = counter();
        let mut stepper = FixedTimestep::new();
        stepper.accumulate(0.0);
        stepper.accumulate(-1.0);
        assert_eq!(stepper.real_time, 0.0);
        assert_eq!(stepper.catch_up(&mut sim), 0);
    }
}
