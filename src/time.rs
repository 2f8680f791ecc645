//! Frame pacing and FPS measurement for the host loop.
//!
//! The simulation advances in whole frames and has no notion of wall-clock
//! time, so the clock's only jobs are to keep the loop near its target rate
//! and to report how fast it is actually running.
//!
//! # Example
//!
//! ```ignore
//! use volcano::time::FrameClock;
//!
//! let mut clock = FrameClock::new(60);
//!
//! loop {
//!     clock.tick(); // sleeps out the rest of the 1/60 s budget
//!     if !clock.is_paused() {
//!         driver.advance();
//!     }
//!     println!("FPS: {:.1}", clock.fps());
//! }
//! ```

use log::debug;
use std::thread;
use std::time::{Duration, Instant};

/// Frame counter, FPS meter and rate limiter.
#[derive(Debug)]
pub struct FrameClock {
    /// When the last frame ended.
    last_frame: Instant,
    /// Time budget of one frame. `None` runs unthrottled.
    frame_budget: Option<Duration>,
    /// Total frames since start, excluding paused ones.
    frame_count: u64,
    /// Every tick since start, paused or not.
    tick_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frames counted at the last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
    paused: bool,
}

impl FrameClock {
    /// Create a clock that paces the loop to `target_fps` frames per second.
    ///
    /// A target of zero means no pacing.
    pub fn new(target_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            frame_budget: (target_fps > 0).then(|| Duration::from_secs(1) / target_fps),
            frame_count: 0,
            tick_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
        }
    }

    /// A clock that never sleeps.
    pub fn unlimited() -> Self {
        Self::new(0)
    }

    /// Wait out whatever is left of the current frame budget, then mark a new
    /// frame. Returns the time since the previous frame, sleep included.
    pub fn tick(&mut self) -> Duration {
        if let Some(budget) = self.frame_budget {
            let spent = self.last_frame.elapsed();
            if spent < budget {
                thread::sleep(budget - spent);
            }
        }
        self.update()
    }

    /// Mark a new frame without sleeping. Returns the time since the
    /// previous frame.
    pub fn update(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        self.tick_count += 1;
        if !self.paused {
            self.frame_count += 1;
        }

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            debug!("{:.1} fps", self.fps);
        }

        delta
    }

    /// Frames counted since start. Paused frames are not counted.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Ticks since start, including paused ones. Use this for host chores
    /// that must keep running while the simulation is frozen.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    /// Measured frames per second, refreshed every half second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Time budget of one frame, if the clock is paced.
    #[inline]
    pub fn frame_budget(&self) -> Option<Duration> {
        self.frame_budget
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop counting frames. Pacing continues so a paused window stays idle.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new(60);
        assert_eq!(clock.frame(), 0);
        assert!(!clock.is_paused());
        assert_eq!(clock.frame_budget(), Some(Duration::from_secs(1) / 60));
        assert_eq!(FrameClock::unlimited().frame_budget(), None);
    }

    #[test]
    fn test_tick_paces_to_budget() {
        let mut clock = FrameClock::new(50);
        clock.update();
        let delta = clock.tick();
        assert!(delta >= Duration::from_millis(20));
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_unlimited_tick_counts_frames() {
        let mut clock = FrameClock::unlimited();
        for _ in 0..10 {
            clock.tick();
        }
        assert_eq!(clock.frame(), 10);
    }

    #[test]
    fn test_pause_stops_frame_count() {
        let mut clock = FrameClock::unlimited();
        clock.update();
        clock.pause();
        clock.update();
        clock.update();
        assert_eq!(clock.frame(), 1);

        clock.toggle_pause();
        assert!(!clock.is_paused());
        clock.update();
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_ticks_advance_while_paused() {
        let mut clock = FrameClock::unlimited();
        clock.update();
        clock.pause();
        for _ in 0..30 {
            clock.tick();
        }
        assert_eq!(clock.frame(), 1);
        assert_eq!(clock.ticks(), 31);

        // A refresh keyed to ticks still comes due during a long pause.
        let mut due = 0;
        for _ in 0..60 {
            clock.tick();
            if clock.ticks() % 30 == 0 {
                due += 1;
            }
        }
        assert_eq!(due, 2);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_fps_refreshes() {
        let mut clock = FrameClock::unlimited();
        for _ in 0..5 {
            thread::sleep(Duration::from_millis(120));
            clock.update();
        }
        assert!(clock.fps() > 0.0);
    }
}
