//! Easing curves over normalised progress. Inputs outside `[0, 1]` are clamped.

/// Quadratic ease-out: fast start, decelerating towards 1.
pub fn ease_out(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p) * (1.0 - p)
}
