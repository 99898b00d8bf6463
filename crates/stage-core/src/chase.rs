//! Active-chase accounting for the dodge-and-catch scene.
//!
//! Only time spent actively tapping counts. A gap of `idle_reset` seconds or
//! more between taps (or since the last tap, when polled) throws away all
//! progress, milestones included. Shorter gaps count up to `max_step`.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Milestone {
    pub at: f64,
    pub text: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChaseConfig {
    pub catch_after: f64,
    pub idle_reset: f64,
    pub max_step: f64,
    pub milestones: &'static [Milestone],
}

/// What a tap or a poll changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChaseUpdate {
    pub reset: bool,
    pub milestone: Option<&'static str>,
    pub became_catchable: bool,
}

#[derive(Clone, Debug)]
pub struct ChaseClock {
    config: ChaseConfig,
    elapsed: f64,
    last_tap: Option<f64>,
    shown: SmallVec<[usize; 8]>,
    catchable: bool,
}

impl ChaseClock {
    pub fn new(config: ChaseConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
            last_tap: None,
            shown: SmallVec::new(),
            catchable: false,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn started(&self) -> bool {
        self.last_tap.is_some()
    }

    pub fn is_catchable(&self) -> bool {
        self.catchable
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
        self.shown.clear();
        self.catchable = false;
    }

    /// Earliest milestone reached but not shown yet; one per call.
    fn next_milestone(&mut self) -> Option<&'static str> {
        let milestones = self.config.milestones;
        let (i, m) = milestones
            .iter()
            .enumerate()
            .find(|(i, m)| self.elapsed >= m.at && !self.shown.contains(i))?;
        self.shown.push(i);
        Some(m.text)
    }

    fn settle(&mut self, mut update: ChaseUpdate) -> ChaseUpdate {
        update.milestone = self.next_milestone();
        if !self.catchable && self.elapsed >= self.config.catch_after {
            self.catchable = true;
            update.became_catchable = true;
        }
        update
    }

    /// Record a tap at `now`.
    pub fn tap(&mut self, now: f64) -> ChaseUpdate {
        let mut update = ChaseUpdate::default();
        if let Some(last) = self.last_tap {
            let gap = (now - last).max(0.0);
            if gap >= self.config.idle_reset {
                update.reset = self.elapsed > 0.0 || self.catchable;
                self.reset();
            } else {
                self.elapsed += gap.min(self.config.max_step);
            }
        }
        self.last_tap = Some(now);
        self.settle(update)
    }

    /// Idle check between taps, driven by the scene's movement loop.
    pub fn poll(&mut self, now: f64) -> ChaseUpdate {
        let mut update = ChaseUpdate::default();
        if let Some(last) = self.last_tap {
            if now - last >= self.config.idle_reset && (self.elapsed > 0.0 || self.catchable) {
                update.reset = true;
                self.reset();
            }
        }
        self.settle(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MILESTONES: &[Milestone] = &[
        Milestone { at: 5.0, text: "five" },
        Milestone { at: 15.0, text: "fifteen" },
    ];

    fn clock() -> ChaseClock {
        ChaseClock::new(ChaseConfig {
            catch_after: 20.0,
            idle_reset: 5.0,
            max_step: 3.0,
            milestones: MILESTONES,
        })
    }

    #[test]
    fn first_tap_only_starts_the_chase() {
        let mut c = clock();
        let u = c.tap(10.0);
        assert_eq!(c.elapsed(), 0.0);
        assert!(c.started());
        assert_eq!(u, ChaseUpdate::default());
    }

    #[test]
    fn gaps_are_capped_and_milestones_fire_once() {
        let mut c = clock();
        c.tap(0.0);
        c.tap(4.0); // capped to 3
        assert_eq!(c.elapsed(), 3.0);
        let u = c.tap(6.0);
        assert_eq!(c.elapsed(), 5.0);
        assert_eq!(u.milestone, Some("five"));
        assert_eq!(c.tap(7.0).milestone, None);
    }

    #[test]
    fn long_gap_resets_without_counting() {
        let mut c = clock();
        let mut t = 0.0;
        c.tap(t);
        for _ in 0..10 {
            t += 2.0;
            c.tap(t);
        }
        assert_eq!(c.elapsed(), 20.0);
        assert!(c.is_catchable());
        let u = c.tap(t + 5.0);
        assert!(u.reset);
        assert_eq!(c.elapsed(), 0.0);
        assert!(!c.is_catchable());
    }

    #[test]
    fn poll_resets_when_idle() {
        let mut c = clock();
        c.tap(0.0);
        c.tap(2.0);
        assert!(!c.poll(6.0).reset);
        assert!(c.poll(7.0).reset);
        assert_eq!(c.elapsed(), 0.0);
        // nothing left to reset
        assert!(!c.poll(8.0).reset);
    }
}
