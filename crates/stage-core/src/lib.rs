pub mod ambient;
pub mod backdrop;
pub mod bursts;
pub mod chase;
pub mod color;
pub mod constants;
pub mod error;
pub mod glow;
pub mod lifecycle;
pub mod minigame;
pub mod scene;
pub mod scenes;
pub mod sequencer;
pub mod smoothing;
pub mod stage;
pub mod starfield;
pub mod timers;
pub mod tween;
pub mod warp;

pub use ambient::*;
pub use backdrop::*;
pub use bursts::*;
pub use color::Color;
pub use error::StageError;
pub use lifecycle::*;
pub use scene::*;
pub use sequencer::*;
pub use stage::*;
pub use warp::*;
