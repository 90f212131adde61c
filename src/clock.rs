/// Accumulates scaled seconds from millisecond timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledClock {
    previous_ms: f64,
    elapsed: f32,
    pub scale: f32,
}

impl ScaledClock {
    pub fn new(start_ms: f64, scale: f32) -> Self {
        Self {
            previous_ms: start_ms,
            elapsed: 0.0,
            scale,
        }
    }

    /// Advances to `now_ms` and returns the accumulated time in seconds.
    /// A clock that goes backwards contributes nothing.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let delta = ((now_ms - self.previous_ms) / 1000.0).max(0.0) as f32;
        self.elapsed += delta * self.scale;
        self.previous_ms = now_ms;
        self.elapsed
    }
}
