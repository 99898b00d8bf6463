//! The scene catalogue, in presentation order.

mod arcade;
mod bubble_pop;
mod finale;
mod fireworks;
mod heart_pop;
mod heartbeat;
mod love_lock;
mod memory_match;
mod orbit;
mod void;
mod whack_heart;
mod wish;

pub use bubble_pop::BubblePop;
pub use finale::Finale;
pub use fireworks::Fireworks;
pub use heart_pop::HeartPop;
pub use heartbeat::Heartbeat;
pub use love_lock::LoveLock;
pub use memory_match::MemoryMatch;
pub use orbit::Orbit;
pub use void::Void;
pub use whack_heart::WhackHeart;
pub use wish::Wish;

use crate::lifecycle::OneShot;
use crate::scene::{Scene, SceneContext, SceneEntry};

fn entry<S: Scene + Default + 'static>(name: &'static str) -> SceneEntry {
    fn build<S: Scene + Default + 'static>() -> Box<dyn Scene> {
        Box::new(S::default())
    }
    SceneEntry {
        name,
        build: build::<S>,
    }
}

/// All eleven scenes.
pub fn catalog() -> Vec<SceneEntry> {
    vec![
        entry::<Void>("void"),
        entry::<MemoryMatch>("memory-match"),
        entry::<HeartPop>("heart-pop"),
        entry::<Fireworks>("fireworks"),
        entry::<BubblePop>("bubble-pop"),
        entry::<Heartbeat>("heartbeat"),
        entry::<WhackHeart>("whack-heart"),
        entry::<LoveLock>("love-lock"),
        entry::<Orbit>("orbit"),
        entry::<Wish>("wish"),
        entry::<Finale>("finale"),
    ]
}

/// Advance once; later presses are ignored.
fn advance_once(guard: &mut OneShot, ctx: &mut SceneContext) {
    if guard.finish() {
        ctx.advance();
    }
}

/// Card/cell centre in screen percent for a grid laid out around the
/// middle of the screen.
fn grid_cell_center(index: usize, columns: usize, rows: usize, pitch: [f32; 2]) -> (f32, f32) {
    let col = (index % columns) as f32;
    let row = (index / columns) as f32;
    let x = 50.0 + (col - (columns as f32 - 1.0) * 0.5) * pitch[0];
    let y = 55.0 + (row - (rows as f32 - 1.0) * 0.5) * pitch[1];
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_eleven_distinct_scenes() {
        let list = catalog();
        assert_eq!(list.len(), 11);
        for (i, e) in list.iter().enumerate() {
            assert!(list[i + 1..].iter().all(|o| o.name != e.name));
            assert_eq!((e.build)().name(), e.name);
        }
    }

    #[test]
    fn grid_centres_are_symmetric() {
        let (x0, y0) = grid_cell_center(0, 4, 3, [14.0, 16.0]);
        let (x3, y11) = (grid_cell_center(3, 4, 3, [14.0, 16.0]).0, grid_cell_center(11, 4, 3, [14.0, 16.0]).1);
        assert!((x0 + x3 - 100.0).abs() < 1e-4);
        assert!((y0 + y11 - 110.0).abs() < 1e-4);
    }
}
