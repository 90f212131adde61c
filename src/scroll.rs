/// Smoothing factor applied to the per-frame scroll delta.
pub const DEFAULT_LERP: f32 = 0.1;
/// Deltas smaller than this, in pixels, settle to zero.
const SETTLE_THRESHOLD: f32 = 1e-3;

/// Page scroll position plus a damped per-frame delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    position: f32,
    diff: f32,
    lerp: f32,
    primed: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(DEFAULT_LERP)
    }
}

impl ScrollState {
    pub fn new(lerp: f32) -> Self {
        Self {
            position: 0.0,
            diff: 0.0,
            lerp: lerp.clamp(0.0, 1.0),
            primed: false,
        }
    }

    /// Records this frame's scroll offset. The first sample only primes the
    /// state so a page opened mid-document doesn't register as a jump.
    pub fn update(&mut self, scroll_y: f32) {
        if !self.primed {
            self.position = scroll_y;
            self.primed = true;
            return;
        }
        let raw = scroll_y - self.position;
        self.position = scroll_y;
        self.diff += (raw - self.diff) * self.lerp;
        if self.diff.abs() < SETTLE_THRESHOLD {
            self.diff = 0.0;
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn diff(&self) -> f32 {
        self.diff
    }
}
