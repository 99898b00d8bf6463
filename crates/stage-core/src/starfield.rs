use crate::constants::*;
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: Vec3,
    /// Per-star extra velocity in \[0.3, 0.8), so the field never looks rigid.
    pub drift: f32,
}

/// Fixed-size star field flying toward the camera along +z.
pub struct StarField {
    stars: Vec<Star>,
}

fn random_xy<R: Rng + ?Sized>(rng: &mut R) -> (f32, f32) {
    let half = STAR_FIELD_SIZE * 0.5;
    (rng.gen_range(-half..half), rng.gen_range(-half..half))
}

impl StarField {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let stars = (0..count)
            .map(|_| {
                let (x, y) = random_xy(rng);
                Star {
                    position: Vec3::new(x, y, rng.gen_range(-STAR_FIELD_DEPTH..STAR_SPAWN_NEAR_Z)),
                    drift: STAR_DRIFT_MIN + rng.gen::<f32>() * STAR_DRIFT_SPAN,
                }
            })
            .collect();
        Self { stars }
    }

    /// Move every star by `(speed * 12 + drift * 3) * delta`; stars crossing
    /// the near plane are recycled to the far plane at a fresh x/y.
    /// Returns the number of recycled stars.
    pub fn advance<R: Rng + ?Sized>(&mut self, speed: f32, delta: f32, rng: &mut R) -> usize {
        let mut recycled = 0;
        for star in &mut self.stars {
            star.position.z += (speed * STAR_SPEED_SCALE + star.drift * STAR_DRIFT_SCALE) * delta;
            if star.position.z > STAR_NEAR_PLANE_Z {
                let (x, y) = random_xy(rng);
                star.position = Vec3::new(x, y, -STAR_FIELD_DEPTH);
                recycled += 1;
            }
        }
        recycled
    }

    #[inline]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
