//! Hover distortion timer for gallery planes.
//!
//! Entering plays the distortion forward over `duration`. Leaving replays the
//! progress reached so far in reverse, over a duration shortened by the same
//! ratio.

use crate::easing::ease_out;

/// Forward playback time of the hover distortion, in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 800.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverAnimation {
    duration: f64,
    animating: bool,
    leaving: bool,
    entering_time: Option<f64>,
    leaving_time: f64,
    current_progress: f32,
}

impl Default for HoverAnimation {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS)
    }
}

impl HoverAnimation {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(f64::EPSILON),
            animating: false,
            leaving: false,
            entering_time: None,
            leaving_time: 0.0,
            current_progress: 0.0,
        }
    }

    pub fn on_enter(&mut self, now: f64) {
        self.animating = true;
        self.entering_time = Some(now);
        self.leaving = false;
    }

    /// Freezes the progress reached so far and starts the reverse playback.
    /// A leave without a preceding enter is ignored.
    pub fn on_leave(&mut self, now: f64) {
        let Some(entering) = self.entering_time else {
            return;
        };
        self.current_progress = self.forward(now, entering);
        self.animating = true;
        self.leaving = true;
        self.leaving_time = now;
    }

    /// Eased progress in `[0, 1]` to upload as the `progress` uniform.
    pub fn progress(&self, now: f64) -> f32 {
        let Some(entering) = self.entering_time.filter(|_| self.animating) else {
            return 0.0;
        };
        if !self.leaving {
            return self.forward(now, entering);
        }

        let playback_duration = self.duration * f64::from(self.current_progress);
        if playback_duration <= 0.0 {
            return 0.0;
        }
        let elapsed = (now - self.leaving_time).max(0.0);
        let t = (elapsed / playback_duration).min(1.0) as f32;
        self.current_progress * (1.0 - ease_out(t))
    }

    fn forward(&self, now: f64, entering: f64) -> f32 {
        let elapsed = (now - entering).max(0.0);
        ease_out((elapsed / self.duration).min(1.0) as f32)
    }
}
