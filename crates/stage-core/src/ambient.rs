//! Ambient backdrop state and the control surface scenes write through.
//!
//! Scenes only ever write *targets* (and the glow object records); the
//! render loop in [`crate::backdrop`] eases the displayed values toward them.

use crate::color::Color;
use glam::Vec3;

/// One of the two backdrop glow objects. The slots carry no meaning of their
/// own; scenes decide whether a slot is an orb, a planet or anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlowSlot {
    Primary,
    Secondary,
}

impl GlowSlot {
    pub const ALL: [GlowSlot; 2] = [GlowSlot::Primary, GlowSlot::Secondary];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            GlowSlot::Primary => 0,
            GlowSlot::Secondary => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlowObject {
    pub visible: bool,
    pub color: Color,
    pub scale: f32,
    pub pulse_speed: f32,
    pub emissive_intensity: f32,
    pub position: Vec3,
}

/// Partial glow update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlowUpdate {
    pub visible: Option<bool>,
    pub color: Option<Color>,
    pub scale: Option<f32>,
    pub pulse_speed: Option<f32>,
    pub emissive_intensity: Option<f32>,
    pub position: Option<Vec3>,
}

impl GlowUpdate {
    pub fn hidden() -> Self {
        Self {
            visible: Some(false),
            ..Default::default()
        }
    }

    pub fn shown() -> Self {
        Self {
            visible: Some(true),
            ..Default::default()
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn pulse_speed(mut self, speed: f32) -> Self {
        self.pulse_speed = Some(speed);
        self
    }

    pub fn emissive_intensity(mut self, intensity: f32) -> Self {
        self.emissive_intensity = Some(intensity);
        self
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    /// Shallow merge into `obj`.
    pub fn apply(&self, obj: &mut GlowObject) {
        if let Some(v) = self.visible {
            obj.visible = v;
        }
        if let Some(c) = self.color {
            obj.color = c;
        }
        if let Some(s) = self.scale {
            obj.scale = s;
        }
        if let Some(p) = self.pulse_speed {
            obj.pulse_speed = p;
        }
        if let Some(e) = self.emissive_intensity {
            obj.emissive_intensity = e;
        }
        if let Some(p) = self.position {
            obj.position = p;
        }
    }
}

/// Argument of `set_glow_objects`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlowObjectsUpdate {
    pub primary: Option<GlowUpdate>,
    pub secondary: Option<GlowUpdate>,
    pub bloom_intensity: Option<f32>,
}

impl GlowObjectsUpdate {
    /// Hide both objects and zero the bloom; what most scenes start with.
    pub fn hide_all() -> Self {
        Self {
            primary: Some(GlowUpdate::hidden()),
            secondary: Some(GlowUpdate::hidden()),
            bloom_intensity: Some(0.0),
        }
    }

    pub fn primary(mut self, update: GlowUpdate) -> Self {
        self.primary = Some(update);
        self
    }

    pub fn secondary(mut self, update: GlowUpdate) -> Self {
        self.secondary = Some(update);
        self
    }

    pub fn bloom(mut self, intensity: f32) -> Self {
        self.bloom_intensity = Some(intensity);
        self
    }
}

/// Argument of `set_backdrop_preset`. Values are not validated here; the
/// render loop clamps the effective speed when it consumes it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BackdropPreset {
    pub speed: Option<f32>,
    pub opacity: Option<f32>,
    pub tint: Option<Color>,
}

impl BackdropPreset {
    pub fn new(speed: f32, opacity: f32, tint: u32) -> Self {
        Self {
            speed: Some(speed),
            opacity: Some(opacity),
            tint: Some(Color::hex(tint)),
        }
    }

    pub fn speed(speed: f32) -> Self {
        Self {
            speed: Some(speed),
            ..Default::default()
        }
    }
}

/// Initial values the ambient state starts from and is reset to.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientDefaults {
    pub star_speed: f32,
    pub star_opacity: f32,
    pub tint: Color,
    pub glow: [GlowObject; 2],
    pub bloom_intensity: f32,
}

impl Default for AmbientDefaults {
    fn default() -> Self {
        Self {
            star_speed: 0.25,
            star_opacity: 0.4,
            tint: Color::hex(0xffb3c6),
            glow: [
                GlowObject {
                    visible: false,
                    color: Color::hex(0xff8fa3),
                    scale: 1.0,
                    pulse_speed: 1.35,
                    emissive_intensity: 1.5,
                    position: Vec3::new(0.0, 0.0, -5.0),
                },
                GlowObject {
                    visible: false,
                    color: Color::hex(0xffcdb2),
                    scale: 1.3,
                    pulse_speed: 1.1,
                    emissive_intensity: 1.4,
                    position: Vec3::new(0.0, 1.0, -6.0),
                },
            ],
            bloom_intensity: 0.0,
        }
    }
}

/// Session-lifetime backdrop record. Mutated in place by the active scene,
/// read (and partially eased) by the render loop every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientVisualState {
    pub target_star_speed: f32,
    pub current_star_speed: f32,
    pub target_star_opacity: f32,
    pub current_star_opacity: f32,
    pub target_tint: Color,
    pub current_tint: Color,
    pub warp_target: f32,
    pub warp_value: f32,
    pub glow: [GlowObject; 2],
    pub bloom_intensity: f32,
}

impl AmbientVisualState {
    pub fn new(defaults: &AmbientDefaults) -> Self {
        Self {
            target_star_speed: defaults.star_speed,
            current_star_speed: defaults.star_speed,
            target_star_opacity: defaults.star_opacity,
            current_star_opacity: defaults.star_opacity,
            target_tint: defaults.tint,
            current_tint: defaults.tint,
            warp_target: 0.0,
            warp_value: 0.0,
            glow: defaults.glow.clone(),
            bloom_intensity: defaults.bloom_intensity,
        }
    }

    /// Full reset, the only place displayed values may jump.
    pub fn reset(&mut self, defaults: &AmbientDefaults) {
        *self = Self::new(defaults);
    }

    pub fn set_backdrop_preset(&mut self, preset: BackdropPreset) {
        if let Some(s) = preset.speed {
            self.target_star_speed = s;
        }
        if let Some(o) = preset.opacity {
            self.target_star_opacity = o;
        }
        if let Some(t) = preset.tint {
            self.target_tint = t;
        }
    }

    pub fn set_glow_objects(&mut self, update: &GlowObjectsUpdate) {
        if let Some(p) = &update.primary {
            p.apply(&mut self.glow[0]);
        }
        if let Some(s) = &update.secondary {
            s.apply(&mut self.glow[1]);
        }
        if let Some(b) = update.bloom_intensity {
            self.bloom_intensity = b;
        }
    }

    #[inline]
    pub fn glow(&self, slot: GlowSlot) -> &GlowObject {
        &self.glow[slot.index()]
    }

    #[inline]
    pub fn glow_mut(&mut self, slot: GlowSlot) -> &mut GlowObject {
        &mut self.glow[slot.index()]
    }

    /// Speed the star field converges to: base target plus warp, never
    /// negative.
    #[inline]
    pub fn effective_star_speed(&self) -> f32 {
        (self.target_star_speed + self.warp_value).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_merges_only_provided_fields() {
        let d = AmbientDefaults::default();
        let mut s = AmbientVisualState::new(&d);
        s.set_backdrop_preset(BackdropPreset::speed(0.9));
        assert_eq!(s.target_star_speed, 0.9);
        assert_eq!(s.target_star_opacity, d.star_opacity);
        assert_eq!(s.target_tint, d.tint);
        // current values are untouched until the render loop runs
        assert_eq!(s.current_star_speed, d.star_speed);
    }

    #[test]
    fn negative_speed_is_stored_but_clamped_on_read() {
        let mut s = AmbientVisualState::new(&AmbientDefaults::default());
        s.set_backdrop_preset(BackdropPreset::speed(-3.0));
        assert_eq!(s.target_star_speed, -3.0);
        assert_eq!(s.effective_star_speed(), 0.0);
    }

    #[test]
    fn glow_update_is_shallow() {
        let mut s = AmbientVisualState::new(&AmbientDefaults::default());
        let before = s.glow(GlowSlot::Secondary).clone();
        s.set_glow_objects(
            &GlowObjectsUpdate::default()
                .primary(GlowUpdate::shown().scale(0.01))
                .bloom(1.2),
        );
        let orb = s.glow(GlowSlot::Primary);
        assert!(orb.visible);
        assert_eq!(orb.scale, 0.01);
        assert_eq!(orb.pulse_speed, 1.35);
        assert_eq!(s.glow(GlowSlot::Secondary), &before);
        assert_eq!(s.bloom_intensity, 1.2);
    }
}
