//! Frame-delta exponential smoothing shared by every target/current pair.

use crate::color::Color;

/// Blend factor for one frame: `min(1, delta * rate)`, never negative.
///
/// Saturating at 1 keeps a huge `delta` (backgrounded tab) from overshooting.
#[inline]
pub fn blend_factor(delta: f32, rate: f32) -> f32 {
    (delta * rate).clamp(0.0, 1.0)
}

/// `current += (target - current) * min(1, delta * rate)`
#[inline]
pub fn ease_toward(current: f32, target: f32, delta: f32, rate: f32) -> f32 {
    current + (target - current) * blend_factor(delta, rate)
}

#[inline]
pub fn ease_color(current: Color, target: Color, delta: f32, rate: f32) -> Color {
    current.lerp(target, blend_factor(delta, rate))
}

/// Number of constant-delta frames needed to get within `epsilon` of the
/// target starting from `gap` away. `None` if the factor never moves.
pub fn frames_to_converge(gap: f32, epsilon: f32, delta: f32, rate: f32) -> Option<u32> {
    let k = blend_factor(delta, rate);
    if gap.abs() <= epsilon {
        return Some(0);
    }
    if k <= 0.0 {
        return None;
    }
    if k >= 1.0 {
        return Some(1);
    }
    let n = (epsilon / gap.abs()).ln() / (1.0 - k).ln();
    Some(n.ceil() as u32)
}
