use super::advance_once;
use crate::ambient::BackdropPreset;
use crate::lifecycle::OneShot;
use crate::scene::{InputMode, Scene, SceneAction, SceneContext, SceneInput, SceneView, SpriteView};
use crate::timers::{TimerId, TimerKey};
use rand::Rng;
use smallvec::SmallVec;

pub const SEEDS: usize = 24;
pub const BLOW_PERIOD: f64 = 0.13;
const REVEAL_AFTER: f64 = 1.0;
const DRIFT_SECS: f64 = 2.0;

const BLOW: u32 = 1;
const REVEAL: u32 = 2;

/// A seed in flight, offsets in screen percent.
#[derive(Clone, Copy, Debug)]
struct Drift {
    id: u64,
    dx: f32,
    dy: f32,
    released_at: f64,
}

/// A dandelion. Holding blows one seed per tick; the wish shows once the
/// head is bare.
#[derive(Default)]
pub struct Wish {
    released: usize,
    blowing: Option<TimerId>,
    drifting: SmallVec<[Drift; SEEDS]>,
    now: f64,
    revealed: OneShot,
    leaving: OneShot,
}

impl Wish {
    fn stop(&mut self, ctx: &mut SceneContext) {
        if let Some(id) = self.blowing.take() {
            ctx.cancel_timer(id);
        }
    }

    fn release_one(&mut self, ctx: &mut SceneContext) {
        if self.released >= SEEDS {
            return;
        }
        self.released += 1;
        let rng = ctx.rng();
        self.drifting.push(Drift {
            id: self.released as u64,
            dx: rng.gen_range(-22.0..22.0),
            dy: rng.gen_range(-32.0..-11.0),
            released_at: ctx.now(),
        });
        if self.released == SEEDS {
            self.stop(ctx);
            if self.revealed.begin() {
                ctx.set_timeout(REVEAL_AFTER, TimerKey::new(REVEAL));
            }
        }
    }
}

impl Scene for Wish {
    fn name(&self) -> &'static str {
        "wish"
    }

    fn activate(&mut self, ctx: &mut SceneContext) {
        ctx.configure_backdrop(BackdropPreset::new(0.62, 0.7, 0xffc8e3));
    }

    fn update(&mut self, ctx: &mut SceneContext, _dt: f32) {
        self.now = ctx.now();
        let now = self.now;
        self.drifting.retain(|d| now - d.released_at < DRIFT_SECS);
    }

    fn on_timer(&mut self, ctx: &mut SceneContext, key: TimerKey) {
        match key.tag {
            BLOW => self.release_one(ctx),
            REVEAL => {
                self.revealed.complete();
            }
            _ => {}
        }
    }

    fn on_input(&mut self, ctx: &mut SceneContext, input: SceneInput) {
        match input {
            SceneInput::PressStart { .. } => {
                if self.blowing.is_some() || self.released >= SEEDS {
                    return;
                }
                self.blowing = Some(ctx.set_interval(BLOW_PERIOD, TimerKey::new(BLOW)));
                self.release_one(ctx);
            }
            SceneInput::PressEnd => self.stop(ctx),
            SceneInput::Action(SceneAction::Continue) if self.revealed.is_done() => {
                advance_once(&mut self.leaving, ctx);
            }
            _ => {}
        }
    }

    fn view(&self) -> SceneView {
        if self.revealed.is_done() {
            return SceneView::titled("I already know mine came true.")
                .line("Because I have you.")
                .action(SceneAction::Continue, "ONE LAST THING →");
        }
        let mut view = SceneView::titled("Make a wish for us")
            .hint("tap and hold to blow")
            .input(InputMode::Hold);
        view.progress = Some((self.released as u32, SEEDS as u32));
        view.sprites = self
            .drifting
            .iter()
            .map(|d| {
                let t = ((self.now - d.released_at) / DRIFT_SECS).clamp(0.0, 1.0) as f32;
                SpriteView {
                    id: d.id,
                    x: 50.0 + d.dx * t,
                    y: 60.0 + d.dy * t,
                    size: 18.0 * (1.0 - 0.5 * t),
                    glyph: "✦",
                }
            })
            .collect();
        view
    }
}
