//! Timing curves for counter animations.

/// Quartic ease-out: `1 - (1 - t)^4`.
///
/// Moves fast at the start and settles into the final value. Input is
/// clamped to `[0, 1]`.
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powf(4.0)
}
