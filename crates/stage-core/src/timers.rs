//! Cooperative timeout/interval scheduler on the stage clock.

use crate::constants::CLOCK_EPSILON;
use crate::lifecycle::Generation;
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Who created a deferred callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    Stage,
    Scene(Generation),
}

/// Opaque routing key handed back to the owner when the timer fires.
/// `tag` picks the handler, `arg` carries a payload such as a target id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerKey {
    pub tag: u32,
    pub arg: u64,
}

impl TimerKey {
    pub const fn new(tag: u32) -> Self {
        Self { tag, arg: 0 }
    }

    pub const fn with_arg(tag: u32, arg: u64) -> Self {
        Self { tag, arg }
    }
}

#[derive(Clone, Debug)]
struct Timer {
    due: f64,
    period: Option<f64>,
    owner: Owner,
    key: TimerKey,
    armed_frame: u64,
}

/// A fired timer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Due {
    pub id: TimerId,
    pub owner: Owner,
    pub key: TimerKey,
}

/// Timers armed during frame N are never dispatched before frame N+1, and an
/// interval fires at most once per frame.
#[derive(Default)]
pub struct Scheduler {
    next_id: u64,
    frame: u64,
    timers: FnvHashMap<TimerId, Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a frame.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    fn insert(&mut self, due: f64, period: Option<f64>, owner: Owner, key: TimerKey) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.insert(
            id,
            Timer {
                due,
                period,
                owner,
                key,
                armed_frame: self.frame,
            },
        );
        id
    }

    pub fn set_timeout(&mut self, now: f64, delay: f64, owner: Owner, key: TimerKey) -> TimerId {
        self.insert(now + delay.max(0.0), None, owner, key)
    }

    pub fn set_interval(&mut self, now: f64, period: f64, owner: Owner, key: TimerKey) -> TimerId {
        let period = period.max(0.0);
        self.insert(now + period, Some(period), owner, key)
    }

    /// Cancelling an unknown or already fired timer is a no-op.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn cancel_owned(&mut self, owner: Owner) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, t| t.owner != owner);
        before - self.timers.len()
    }

    /// Cancel the owner's timers carrying `tag`.
    pub fn cancel_tagged(&mut self, owner: Owner, tag: u32) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, t| !(t.owner == owner && t.key.tag == tag));
        before - self.timers.len()
    }

    /// Earliest due timer eligible this frame. Timeouts are removed,
    /// intervals are re-armed one period later.
    pub fn pop_due(&mut self, now: f64) -> Option<Due> {
        let frame = self.frame;
        let (&id, _) = self
            .timers
            .iter()
            .filter(|(_, t)| t.armed_frame < frame && t.due <= now + CLOCK_EPSILON)
            .min_by(|(ia, a), (ib, b)| a.due.total_cmp(&b.due).then(ia.cmp(ib)))?;
        let timer = self.timers.get_mut(&id)?;
        let due = Due {
            id,
            owner: timer.owner,
            key: timer.key,
        };
        match timer.period {
            Some(period) => {
                timer.due += period;
                timer.armed_frame = frame;
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some(due)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_for(&self, owner: Owner) -> usize {
        self.timers.values().filter(|t| t.owner == owner).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const K: TimerKey = TimerKey::new(1);

    #[test]
    fn timer_set_this_frame_waits_for_the_next() {
        let mut s = Scheduler::new();
        s.begin_frame();
        s.set_timeout(0.0, 0.0, Owner::Stage, K);
        assert_eq!(s.pop_due(0.0), None);
        s.begin_frame();
        assert!(s.pop_due(0.0).is_some());
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn due_order_then_id_order() {
        let mut s = Scheduler::new();
        let b = s.set_timeout(0.0, 0.2, Owner::Stage, TimerKey::new(2));
        let a = s.set_timeout(0.0, 0.1, Owner::Stage, TimerKey::new(1));
        let c = s.set_timeout(0.0, 0.2, Owner::Stage, TimerKey::new(3));
        s.begin_frame();
        let order: Vec<TimerId> = std::iter::from_fn(|| s.pop_due(1.0)).map(|d| d.id).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn interval_fires_once_per_frame() {
        let mut s = Scheduler::new();
        let id = s.set_interval(0.0, 0.1, Owner::Stage, K);
        s.begin_frame();
        assert!(s.pop_due(1.0).is_some());
        assert!(s.pop_due(1.0).is_none());
        s.begin_frame();
        assert!(s.pop_due(1.0).is_some());
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
    }

    #[test]
    fn cancel_owned_leaves_others() {
        let mut s = Scheduler::new();
        let g = Owner::Scene(Generation(3));
        s.set_timeout(0.0, 1.0, g, K);
        s.set_interval(0.0, 1.0, g, K);
        s.set_timeout(0.0, 1.0, Owner::Stage, K);
        assert_eq!(s.cancel_owned(g), 2);
        assert_eq!(s.pending_for(g), 0);
        assert_eq!(s.pending(), 1);
    }
}
