use crate::ambient::{GlowObject, GlowSlot};
use crate::color::Color;
use crate::constants::*;
use crate::smoothing::{ease_color, ease_toward};
use glam::{Mat4, Quat, Vec3};

/// Displayed (eased) state of one glow object.
#[derive(Clone, Debug, PartialEq)]
pub struct GlowDisplay {
    pub slot: GlowSlot,
    pub visible: bool,
    pub color: Color,
    pub emissive: f32,
    pub scale: f32,
    pub rotation: Vec3,
    pub position: Vec3,
}

impl GlowDisplay {
    pub fn new(slot: GlowSlot, obj: &GlowObject) -> Self {
        Self {
            slot,
            visible: obj.visible,
            color: obj.color,
            emissive: obj.emissive_intensity,
            scale: obj.scale,
            rotation: Vec3::ZERO,
            position: obj.position,
        }
    }

    fn pulse_amplitude(&self) -> f32 {
        match self.slot {
            GlowSlot::Primary => PRIMARY_PULSE_AMPLITUDE,
            GlowSlot::Secondary => SECONDARY_PULSE_AMPLITUDE,
        }
    }

    fn spin(&self) -> [f32; 2] {
        match self.slot {
            GlowSlot::Primary => PRIMARY_SPIN,
            GlowSlot::Secondary => SECONDARY_SPIN,
        }
    }

    /// Invisible objects are skipped entirely: no pulse, no spin, no easing.
    pub fn update(&mut self, obj: &GlowObject, elapsed: f32, delta: f32) {
        self.visible = obj.visible;
        if !obj.visible {
            return;
        }
        let pulse = 1.0 + (elapsed * obj.pulse_speed).sin() * self.pulse_amplitude();
        self.scale = obj.scale * pulse;
        let [sx, sy] = self.spin();
        self.rotation.x += sx * delta;
        self.rotation.y += sy * delta;
        self.color = ease_color(self.color, obj.color, delta, GLOW_COLOR_EASE_RATE);
        self.emissive = ease_toward(self.emissive, obj.emissive_intensity, delta, GLOW_COLOR_EASE_RATE);
        self.position = obj.position;
    }

    pub fn model(&self) -> Mat4 {
        let rot = Quat::from_euler(glam::EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rot, self.position)
    }
}
