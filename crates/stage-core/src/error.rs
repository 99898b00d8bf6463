use thiserror::Error;

/// Misuse of the stage control surface.
///
/// Per-frame work never fails; these only surface from constructors and from
/// explicit navigation requests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StageError {
    #[error("scene index {index} is out of range for {len} scenes")]
    SceneIndexOutOfRange { index: usize, len: usize },
    #[error("scene list is empty")]
    EmptySceneList,
    #[error("invalid color literal {0:?}, expected #rrggbb")]
    InvalidColor(String),
    #[error("invalid mini-game config: {0}")]
    InvalidGameConfig(&'static str),
}
