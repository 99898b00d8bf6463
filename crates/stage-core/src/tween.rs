//! Eased property tweens on named ambient channels.

use crate::ambient::{AmbientVisualState, GlowSlot};
use crate::constants::CLOCK_EPSILON;
use crate::lifecycle::Generation;
use crate::timers::Owner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
}

impl Ease {
    /// Map linear progress `t` in \[0, 1\] to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2In => t * t,
            Ease::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::Power3In => t * t * t,
            Ease::Power3Out => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Ambient property a tween writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenChannel {
    Bloom,
    GlowScale(GlowSlot),
    GlowEmissive(GlowSlot),
    StarSpeed,
    StarOpacity,
}

impl TweenChannel {
    pub fn read(self, a: &AmbientVisualState) -> f32 {
        match self {
            TweenChannel::Bloom => a.bloom_intensity,
            TweenChannel::GlowScale(s) => a.glow(s).scale,
            TweenChannel::GlowEmissive(s) => a.glow(s).emissive_intensity,
            TweenChannel::StarSpeed => a.target_star_speed,
            TweenChannel::StarOpacity => a.target_star_opacity,
        }
    }

    pub fn write(self, a: &mut AmbientVisualState, v: f32) {
        match self {
            TweenChannel::Bloom => a.bloom_intensity = v,
            TweenChannel::GlowScale(s) => a.glow_mut(s).scale = v,
            TweenChannel::GlowEmissive(s) => a.glow_mut(s).emissive_intensity = v,
            TweenChannel::StarSpeed => a.target_star_speed = v,
            TweenChannel::StarOpacity => a.target_star_opacity = v,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub channel: TweenChannel,
    /// Captured from the channel on the first apply at or after `start_at`.
    from: Option<f32>,
    pub to: f32,
    pub start_at: f64,
    pub duration: f32,
    pub ease: Ease,
    pub owner: Owner,
}

impl Tween {
    pub fn new(channel: TweenChannel, to: f32, duration: f32, ease: Ease) -> Self {
        Self {
            channel,
            from: None,
            to,
            start_at: 0.0,
            duration: duration.max(0.0),
            ease,
            owner: Owner::Stage,
        }
    }

    pub fn from_value(mut self, value: f32) -> Self {
        self.from = Some(value);
        self
    }

    fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_at) / self.duration as f64).clamp(0.0, 1.0) as f32
    }
}

/// Active tweens in insertion order. Tweens on the same channel may overlap;
/// the one added last wins while both run.
#[derive(Default)]
pub struct Tweens {
    active: Vec<Tween>,
}

impl Tweens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tween: Tween) {
        self.active.push(tween);
    }

    /// Kill running and pending tweens on `channel` created by `owner`.
    pub fn kill_channel(&mut self, owner: Owner, channel: TweenChannel) -> usize {
        let before = self.active.len();
        self.active.retain(|t| !(t.owner == owner && t.channel == channel));
        before - self.active.len()
    }

    /// Write every started tween's value; finished tweens are removed after
    /// writing their final value.
    pub fn apply(&mut self, now: f64, ambient: &mut AmbientVisualState) {
        for t in &mut self.active {
            if now + CLOCK_EPSILON < t.start_at {
                continue;
            }
            let channel = t.channel;
            let from = *t.from.get_or_insert_with(|| channel.read(ambient));
            let k = t.ease.apply(t.progress(now));
            channel.write(ambient, from + (t.to - from) * k);
        }
        self.active.retain(|t| now + CLOCK_EPSILON < t.start_at + t.duration as f64);
    }

    /// Kill every tween created under `owner`. Returns how many were killed.
    pub fn kill_owned(&mut self, owner: Owner) -> usize {
        let before = self.active.len();
        self.active.retain(|t| t.owner != owner);
        before - self.active.len()
    }

    /// Drop scene tweens from any generation other than `current`.
    pub fn drop_stale(&mut self, current: Generation) -> usize {
        let before = self.active.len();
        self.active
            .retain(|t| !matches!(t.owner, Owner::Scene(g) if g != current));
        before - self.active.len()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
