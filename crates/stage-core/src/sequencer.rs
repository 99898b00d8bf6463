use crate::error::StageError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionCause {
    Advance,
    Jump,
    Restart,
}

/// An index change (or a restart, which may keep the index at 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub cause: TransitionCause,
}

impl Transition {
    pub fn index_changed(&self) -> bool {
        self.from != self.to
    }
}

/// Current-index state machine over a fixed number of scenes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneSequencer {
    len: usize,
    current: usize,
}

impl SceneSequencer {
    pub fn new(len: usize) -> Result<Self, StageError> {
        if len == 0 {
            return Err(StageError::EmptySceneList);
        }
        Ok(Self { len, current: 0 })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.len
    }

    /// Saturating step forward; `None` at the last scene.
    pub fn advance(&mut self) -> Option<Transition> {
        if self.is_last() {
            return None;
        }
        let from = self.current;
        self.current += 1;
        Some(Transition {
            from,
            to: self.current,
            cause: TransitionCause::Advance,
        })
    }

    /// Jump to any valid index. Jumping to the current index is `Ok(None)`.
    pub fn jump(&mut self, index: usize) -> Result<Option<Transition>, StageError> {
        if index >= self.len {
            return Err(StageError::SceneIndexOutOfRange { index, len: self.len });
        }
        if index == self.current {
            return Ok(None);
        }
        let from = self.current;
        self.current = index;
        Ok(Some(Transition {
            from,
            to: index,
            cause: TransitionCause::Jump,
        }))
    }

    /// Always yields a transition, even from index 0.
    pub fn restart(&mut self) -> Transition {
        let from = self.current;
        self.current = 0;
        Transition {
            from,
            to: 0,
            cause: TransitionCause::Restart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(SceneSequencer::new(0), Err(StageError::EmptySceneList));
    }

    #[test]
    fn advance_saturates() {
        let mut s = SceneSequencer::new(3).unwrap();
        assert!(s.advance().is_some());
        assert!(s.advance().is_some());
        assert_eq!(s.advance(), None);
        assert_eq!(s.current(), 2);
    }

    #[test]
    fn jump_validates() {
        let mut s = SceneSequencer::new(4).unwrap();
        assert_eq!(
            s.jump(4),
            Err(StageError::SceneIndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(s.jump(0), Ok(None));
        let t = s.jump(3).unwrap().unwrap();
        assert_eq!((t.from, t.to), (0, 3));
        assert!(s.is_last());
    }

    #[test]
    fn restart_from_zero_still_transitions() {
        let mut s = SceneSequencer::new(2).unwrap();
        let t = s.restart();
        assert!(!t.index_changed());
        assert_eq!(t.cause, TransitionCause::Restart);
    }
}
