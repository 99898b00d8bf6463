//! Three-phase warp schedule driving `warp_target`.

use crate::constants::CLOCK_EPSILON;
use crate::tween::Ease;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpTimeline {
    pub start_value: f32,
    pub peak: f32,
    pub started_at: f64,
    pub ramp_in: f32,
    pub hold: f32,
    pub ramp_out: f32,
}

impl WarpTimeline {
    pub fn total(&self) -> f64 {
        (self.ramp_in + self.hold + self.ramp_out) as f64
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now + CLOCK_EPSILON >= self.started_at + self.total()
    }

    /// `start → peak` (power2.inOut), hold, `peak → 0` (power3.out), then 0.
    pub fn value_at(&self, now: f64) -> f32 {
        let e = (now - self.started_at).max(0.0) as f32;
        let segment = |from: f32, to: f32, t: f32, dur: f32, ease: Ease| {
            if dur <= 0.0 {
                to
            } else {
                from + (to - from) * ease.apply(t / dur)
            }
        };
        if e < self.ramp_in {
            return segment(self.start_value, self.peak, e, self.ramp_in, Ease::Power2InOut);
        }
        let e = e - self.ramp_in;
        if e < self.hold {
            return self.peak;
        }
        let e = e - self.hold;
        if e < self.ramp_out {
            return segment(self.peak, 0.0, e, self.ramp_out, Ease::Power3Out);
        }
        0.0
    }
}

/// At most one active warp; a new trigger cancels the previous one and
/// starts from whatever `warp_target` currently is. No queueing.
#[derive(Default)]
pub struct WarpDirector {
    active: Option<WarpTimeline>,
}

impl WarpDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&mut self, now: f64, current_target: f32, peak: f32, ramp_in: f32, hold: f32, ramp_out: f32) {
        if self.active.is_some() {
            log::debug!("[warp] preempting running warp at {current_target:.2}");
        }
        self.active = Some(WarpTimeline {
            start_value: current_target,
            peak,
            started_at: now,
            ramp_in: ramp_in.max(0.0),
            hold: hold.max(0.0),
            ramp_out: ramp_out.max(0.0),
        });
        log::info!("[warp] peak={peak} in={ramp_in} hold={hold} out={ramp_out}");
    }

    /// Write the scheduled value into `warp_target`. Leaves it untouched when
    /// no warp is running.
    pub fn update(&mut self, now: f64, warp_target: &mut f32) {
        let Some(tl) = self.active else {
            return;
        };
        *warp_target = tl.value_at(now);
        if tl.is_finished(now) {
            self.active = None;
        }
    }

    /// Stop the running warp; `warp_target` keeps its last written value.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn timeline(&self) -> Option<&WarpTimeline> {
        self.active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn schedule_checkpoints() {
        let tl = WarpTimeline {
            start_value: 0.0,
            peak: 15.0,
            started_at: 0.0,
            ramp_in: 2.0,
            hold: 1.0,
            ramp_out: 1.2,
        };
        assert!(close(tl.value_at(0.0), 0.0));
        assert!(close(tl.value_at(1.0), 7.5));
        assert!(close(tl.value_at(2.0), 15.0));
        assert!(close(tl.value_at(3.0), 15.0));
        assert!(close(tl.value_at(3.6), 1.875));
        assert!(close(tl.value_at(4.2), 0.0));
        assert!(tl.is_finished(4.2));
    }

    #[test]
    fn zero_length_ramps_jump() {
        let tl = WarpTimeline {
            start_value: 3.0,
            peak: 9.0,
            started_at: 1.0,
            ramp_in: 0.0,
            hold: 0.5,
            ramp_out: 0.0,
        };
        assert_eq!(tl.value_at(1.0), 9.0);
        assert_eq!(tl.value_at(1.5), 0.0);
    }

    #[test]
    fn director_clears_after_finishing() {
        let mut d = WarpDirector::new();
        let mut target = 0.0;
        d.trigger(0.0, target, 10.0, 1.0, 0.0, 1.0);
        d.update(0.5, &mut target);
        assert!(close(target, 5.0));
        d.update(2.0, &mut target);
        assert_eq!(target, 0.0);
        assert!(!d.is_active());
    }
}
