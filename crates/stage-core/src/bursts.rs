//! Registry of short-lived, self-expiring particle bursts.
//!
//! Coordinates are screen percentages (`0..100` on both axes, `+y` down).
//! Each burst owns its particles; the whole burst is removed once its
//! lifetime passes, whatever its particles are doing.

use crate::color::Color;
use crate::constants::*;
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BurstId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleShape {
    Heart,
    Circle,
    Star,
}

impl ParticleShape {
    const ALL: [ParticleShape; 3] = [ParticleShape::Heart, ParticleShape::Circle, ParticleShape::Star];

    /// Index passed to the sprite shader.
    pub fn shader_index(self) -> u32 {
        match self {
            ParticleShape::Heart => 0,
            ParticleShape::Circle => 1,
            ParticleShape::Star => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub rotation_deg: f32,
    pub opacity: f32,
    pub age: f32,
    pub color: Color,
    pub shape: ParticleShape,
}

impl Particle {
    #[inline]
    pub fn alive(&self) -> bool {
        self.age < BURST_PARTICLE_LIFE_SECS && self.opacity > 0.0 && self.size > BURST_SIZE_FLOOR
    }
}

#[derive(Clone, Debug)]
pub struct Burst {
    pub id: BurstId,
    pub x: f32,
    pub y: f32,
    pub intensity: f32,
    pub born_at: f64,
    pub expires_at: f64,
    pub particles: Vec<Particle>,
}

/// Number of particles a burst of `intensity` emits.
pub fn particle_count(intensity: f32) -> usize {
    (BURST_PARTICLES_PER_INTENSITY * intensity.max(0.0)).round() as usize
}

fn spawn_particle<R: Rng + ?Sized>(x: f32, y: f32, rng: &mut R) -> Particle {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let speed = rng.gen_range(BURST_SPEED_MIN..BURST_SPEED_MAX);
    Particle {
        x,
        y,
        vx: angle.cos() * speed,
        vy: angle.sin() * speed,
        size: rng.gen_range(BURST_SIZE_MIN..BURST_SIZE_MAX),
        rotation_deg: rng.gen_range(0.0..360.0),
        opacity: 1.0,
        age: 0.0,
        color: Color::hex(BURST_PALETTE[rng.gen_range(0..BURST_PALETTE.len())]),
        shape: ParticleShape::ALL[rng.gen_range(0..ParticleShape::ALL.len())],
    }
}

/// Active bursts in trigger order. Ids come from a session-long counter and
/// are never reused, so a late `remove` can never hit a newer burst.
#[derive(Default)]
pub struct BurstManager {
    next_id: u64,
    active: Vec<Burst>,
}

impl BurstManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger<R: Rng + ?Sized>(&mut self, now: f64, x: f32, y: f32, intensity: f32, rng: &mut R) -> BurstId {
        self.next_id += 1;
        let id = BurstId(self.next_id);
        let particles = (0..particle_count(intensity)).map(|_| spawn_particle(x, y, rng)).collect();
        self.active.push(Burst {
            id,
            x,
            y,
            intensity,
            born_at: now,
            expires_at: now + BURST_LIFETIME_SECS,
            particles,
        });
        log::debug!("[burst] trigger id={} at ({x:.0},{y:.0}) intensity={intensity}", id.0);
        id
    }

    /// Remove by id. Absent ids are a no-op and return `false`.
    pub fn remove(&mut self, id: BurstId) -> bool {
        let before = self.active.len();
        self.active.retain(|b| b.id != id);
        before != self.active.len()
    }

    /// Step particles and drop bursts whose lifetime has passed.
    pub fn update(&mut self, now: f64, dt: f32) {
        let expired: SmallVec<[BurstId; 4]> = self
            .active
            .iter()
            .filter(|b| now + CLOCK_EPSILON >= b.expires_at)
            .map(|b| b.id)
            .collect();
        for id in expired {
            self.remove(id);
            log::debug!("[burst] expired id={}", id.0);
        }
        if dt <= 0.0 {
            return;
        }
        for burst in &mut self.active {
            for p in &mut burst.particles {
                p.vy += BURST_GRAVITY * dt;
                p.x += p.vx * dt;
                p.y += p.vy * dt;
                p.age += dt;
                p.opacity = (p.opacity - BURST_OPACITY_DECAY * dt).max(0.0);
                p.size = (p.size - BURST_SIZE_DECAY * dt).max(BURST_SIZE_FLOOR);
                p.rotation_deg = (p.rotation_deg + BURST_SPIN_DEG_PER_SEC * dt) % 360.0;
            }
            burst
                .particles
                .retain(|p| p.alive() && (-10.0..=110.0).contains(&p.x) && (-10.0..=110.0).contains(&p.y));
        }
    }

    pub fn active(&self) -> &[Burst] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn contains(&self, id: BurstId) -> bool {
        self.active.iter().any(|b| b.id == id)
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.active.iter().flat_map(|b| b.particles.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn particle_count_rounds() {
        assert_eq!(particle_count(1.0), 80);
        assert_eq!(particle_count(1.5), 120);
        assert_eq!(particle_count(0.8), 64);
        assert_eq!(particle_count(-1.0), 0);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut m = BurstManager::new();
        let a = m.trigger(0.0, 50.0, 50.0, 1.0, &mut rng);
        assert!(m.remove(a));
        let b = m.trigger(0.0, 50.0, 50.0, 1.0, &mut rng);
        assert!(b > a);
        assert!(!m.remove(a));
        assert!(m.contains(b));
    }

    #[test]
    fn particles_fall_and_fade() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut m = BurstManager::new();
        m.trigger(0.0, 50.0, 50.0, 0.5, &mut rng);
        let vy0: Vec<f32> = m.particles().map(|p| p.vy).collect();
        m.update(0.1, 0.1);
        for (p, v) in m.particles().zip(vy0) {
            assert!(p.vy > v);
            assert!(p.opacity < 1.0);
        }
    }
}
