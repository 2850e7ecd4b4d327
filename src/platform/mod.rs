//! Platform abstraction layer
//!
//! Handles the bits of the outside world the game loop touches:
//! - Wall-clock time for level timing
//! - Fixed-rate frame pacing

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of wall-clock seconds
pub trait Clock {
    /// Seconds since an arbitrary fixed origin; never decreases
    fn now_secs(&self) -> f64;
}

/// Real time since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to (tests, replays)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_secs(&self) -> f64 {
        (**self).now_secs()
    }
}

/// Sleeps between frames to hold a fixed frame rate
#[derive(Debug)]
pub struct FramePacer {
    frame: Duration,
    next: Instant,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        let frame = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
        Self {
            frame,
            next: Instant::now() + frame,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Block until the next frame is due. A frame that overran resets the
    /// schedule instead of trying to catch up.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.frame;
        } else {
            self.next = now + self.frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(10.0);
        assert_eq!(clock.now_secs(), 10.0);
        clock.advance(2.5);
        assert_eq!(clock.now_secs(), 12.5);
        clock.set(1.0);
        assert_eq!((&clock).now_secs(), 1.0);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_secs();
        let b = clock.now_secs();
        assert!(b >= a);
    }

    #[test]
    fn test_pacer_frame_length() {
        let pacer = FramePacer::new(60);
        let micros = pacer.frame_duration().as_micros();
        assert!((16_600..=16_700).contains(&micros));
        assert_eq!(FramePacer::new(0).frame_duration(), Duration::from_secs(1));
    }
}
