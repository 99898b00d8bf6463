//! Generation stamps and one-shot completion guards.

/// Stamp of one scene mount. Deferred work carries the generation it was
/// created under and is dropped once the stage has moved on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
    #[inline]
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Completion {
    #[default]
    Idle,
    InProgress,
    Complete,
}

/// `Idle → InProgress → Complete` guard. Each transition is a
/// compare-and-set; repeating one is a silent no-op that returns `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OneShot {
    state: Completion,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Completion {
        self.state
    }

    fn transition(&mut self, from: Completion, to: Completion) -> bool {
        if self.state == from {
            self.state = to;
            true
        } else {
            false
        }
    }

    /// `Idle → InProgress`.
    pub fn begin(&mut self) -> bool {
        self.transition(Completion::Idle, Completion::InProgress)
    }

    /// `InProgress → Complete`.
    pub fn complete(&mut self) -> bool {
        self.transition(Completion::InProgress, Completion::Complete)
    }

    /// `Idle → Complete` for completions with no intermediate phase.
    pub fn finish(&mut self) -> bool {
        self.begin() && self.complete()
    }

    pub fn is_idle(&self) -> bool {
        self.state == Completion::Idle
    }

    pub fn is_done(&self) -> bool {
        self.state == Completion::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_trigger_is_a_no_op() {
        let mut g = OneShot::new();
        assert!(g.begin());
        assert!(!g.begin());
        assert!(g.complete());
        assert!(!g.complete());
        assert!(g.is_done());
    }

    #[test]
    fn complete_requires_begin() {
        let mut g = OneShot::new();
        assert!(!g.complete());
        assert!(g.is_idle());
        assert!(g.finish());
        assert!(!g.finish());
    }
}
