//! Per-frame interpolation of the displayed backdrop toward the ambient
//! targets, plus the GPU instance data the front end uploads.

use crate::ambient::{AmbientVisualState, GlowSlot};
use crate::bursts::BurstManager;
use crate::color::Color;
use crate::constants::*;
use crate::glow::GlowDisplay;
use crate::smoothing::{ease_color, ease_toward};
use crate::starfield::StarField;
use bytemuck::{Pod, Zeroable};
use rand::Rng;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct StarInstance {
    pub position: [f32; 3],
    pub drift: f32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GlowInstance {
    pub model: [[f32; 4]; 4],
    /// rgb + emissive intensity
    pub color: [f32; 4],
    pub slot: u32,
    pub _pad: [u32; 3],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SparkInstance {
    /// Screen percent, `+y` down.
    pub position: [f32; 2],
    pub size_px: f32,
    pub rotation: f32,
    pub color: [f32; 4],
    pub shape: u32,
    pub _pad: [u32; 3],
}

/// Uniform parameters of the star pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarLook {
    pub tint: Color,
    pub opacity: f32,
}

/// Displayed backdrop: star field, eased tint, glow displays and bloom
/// strength. Targets live in [`AmbientVisualState`].
pub struct Backdrop {
    stars: StarField,
    tint: Color,
    glow: [GlowDisplay; 2],
    bloom_strength: f32,
    elapsed: f32,
}

impl Backdrop {
    pub fn new<R: Rng + ?Sized>(ambient: &AmbientVisualState, star_count: usize, rng: &mut R) -> Self {
        Self {
            stars: StarField::new(star_count, rng),
            tint: ambient.current_tint,
            glow: [
                GlowDisplay::new(GlowSlot::Primary, ambient.glow(GlowSlot::Primary)),
                GlowDisplay::new(GlowSlot::Secondary, ambient.glow(GlowSlot::Secondary)),
            ],
            bloom_strength: ambient.bloom_intensity,
            elapsed: 0.0,
        }
    }

    /// Snap the displayed values back onto a freshly reset ambient state.
    /// Star positions are kept.
    pub fn reset(&mut self, ambient: &AmbientVisualState) {
        self.tint = ambient.current_tint;
        for slot in GlowSlot::ALL {
            self.glow[slot.index()] = GlowDisplay::new(slot, ambient.glow(slot));
        }
        self.bloom_strength = ambient.bloom_intensity;
    }

    /// One render-loop step. The order is fixed: warp, effective speed, star
    /// speed, opacity, tint, star motion, glow objects, bloom.
    pub fn update<R: Rng + ?Sized>(&mut self, ambient: &mut AmbientVisualState, delta: f32, rng: &mut R) {
        let delta = delta.max(0.0);
        self.elapsed += delta;

        ambient.warp_value = ease_toward(ambient.warp_value, ambient.warp_target, delta, WARP_EASE_RATE);
        let effective = ambient.effective_star_speed();
        ambient.current_star_speed = ease_toward(ambient.current_star_speed, effective, delta, STAR_SPEED_EASE_RATE);
        ambient.current_star_opacity = ease_toward(
            ambient.current_star_opacity,
            ambient.target_star_opacity,
            delta,
            STAR_OPACITY_EASE_RATE,
        );
        self.tint = ease_color(self.tint, ambient.target_tint, delta, TINT_EASE_RATE);
        ambient.current_tint = self.tint;

        self.stars.advance(ambient.current_star_speed, delta, rng);

        for slot in GlowSlot::ALL {
            self.glow[slot.index()].update(ambient.glow(slot), self.elapsed, delta);
        }

        // per frame, independent of delta
        self.bloom_strength += (ambient.bloom_intensity - self.bloom_strength) * BLOOM_EASE_PER_FRAME;
    }

    pub fn bloom_strength(&self) -> f32 {
        self.bloom_strength
    }

    pub fn star_look(&self, ambient: &AmbientVisualState) -> StarLook {
        StarLook {
            tint: self.tint,
            opacity: ambient.current_star_opacity,
        }
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn glow(&self, slot: GlowSlot) -> &GlowDisplay {
        &self.glow[slot.index()]
    }

    pub fn star_instances(&self) -> Vec<StarInstance> {
        self.stars
            .stars()
            .iter()
            .map(|s| StarInstance {
                position: s.position.to_array(),
                drift: s.drift,
            })
            .collect()
    }

    /// Visible glow objects only.
    pub fn glow_instances(&self) -> Vec<GlowInstance> {
        self.glow
            .iter()
            .filter(|g| g.visible)
            .map(|g| GlowInstance {
                model: g.model().to_cols_array_2d(),
                color: g.color.with_alpha(g.emissive),
                slot: g.slot.index() as u32,
                _pad: [0; 3],
            })
            .collect()
    }

    pub fn spark_instances(bursts: &BurstManager) -> Vec<SparkInstance> {
        bursts
            .particles()
            .map(|p| SparkInstance {
                position: [p.x, p.y],
                size_px: p.size,
                rotation: p.rotation_deg.to_radians(),
                color: p.color.with_alpha(p.opacity),
                shape: p.shape.shader_index(),
                _pad: [0; 3],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambient::{AmbientDefaults, BackdropPreset, GlowObjectsUpdate, GlowUpdate};
    use rand::{rngs::StdRng, SeedableRng};

    fn setup() -> (AmbientVisualState, Backdrop, StdRng) {
        let mut rng = StdRng::seed_from_u64(11);
        let ambient = AmbientVisualState::new(&AmbientDefaults::default());
        let backdrop = Backdrop::new(&ambient, 32, &mut rng);
        (ambient, backdrop, rng)
    }

    #[test]
    fn warp_feeds_the_star_speed() {
        let (mut ambient, mut backdrop, mut rng) = setup();
        ambient.warp_target = 10.0;
        for _ in 0..120 {
            backdrop.update(&mut ambient, 1.0 / 60.0, &mut rng);
        }
        assert!(ambient.warp_value > 9.0);
        assert!(ambient.current_star_speed > 5.0);
    }

    #[test]
    fn negative_speed_converges_to_zero() {
        let (mut ambient, mut backdrop, mut rng) = setup();
        ambient.set_backdrop_preset(BackdropPreset::speed(-2.0));
        for _ in 0..600 {
            backdrop.update(&mut ambient, 1.0 / 60.0, &mut rng);
            assert!(ambient.current_star_speed >= 0.0);
        }
        assert!(ambient.current_star_speed < 1e-3);
    }

    #[test]
    fn bloom_eases_per_frame_regardless_of_delta() {
        let (mut ambient, mut a, mut rng) = setup();
        let mut b = Backdrop::new(&ambient, 0, &mut rng);
        ambient.set_glow_objects(&GlowObjectsUpdate::default().bloom(1.0));
        a.update(&mut ambient.clone(), 1.0 / 60.0, &mut rng);
        b.update(&mut ambient, 1.0, &mut rng);
        assert!((a.bloom_strength() - BLOOM_EASE_PER_FRAME).abs() < 1e-6);
        assert_eq!(a.bloom_strength(), b.bloom_strength());
    }

    #[test]
    fn only_visible_glows_are_instanced() {
        let (mut ambient, mut backdrop, mut rng) = setup();
        assert!(backdrop.glow_instances().is_empty());
        ambient.set_glow_objects(&GlowObjectsUpdate::default().secondary(GlowUpdate::shown()));
        backdrop.update(&mut ambient, 1.0 / 60.0, &mut rng);
        let glows = backdrop.glow_instances();
        assert_eq!(glows.len(), 1);
        assert_eq!(glows[0].slot, 1);
    }

    #[test]
    fn instance_strides_match_the_vertex_layouts() {
        assert_eq!(std::mem::size_of::<StarInstance>(), 16);
        assert_eq!(std::mem::size_of::<GlowInstance>(), 96);
        assert_eq!(std::mem::size_of::<SparkInstance>(), 48);
    }
}
