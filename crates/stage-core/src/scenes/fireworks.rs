use super::advance_once;
use crate::ambient::BackdropPreset;
use crate::lifecycle::OneShot;
use crate::scene::{InputMode, Scene, SceneAction, SceneContext, SceneInput, SceneView};
use crate::timers::TimerKey;
use rand::Rng;

pub const LAUNCHES: u32 = 6;

const DONE: u32 = 1;

#[derive(Default)]
pub struct Fireworks {
    launched: u32,
    done: OneShot,
    leaving: OneShot,
}

impl Fireworks {
    pub fn launched(&self) -> u32 {
        self.launched
    }

    pub fn is_done(&self) -> bool {
        self.done.is_done()
    }
}

impl Scene for Fireworks {
    fn name(&self) -> &'static str {
        "fireworks"
    }

    fn activate(&mut self, ctx: &mut SceneContext) {
        ctx.configure_backdrop(BackdropPreset::new(0.15, 0.55, 0xe8b86d));
    }

    fn on_timer(&mut self, _ctx: &mut SceneContext, key: TimerKey) {
        if key.tag == DONE {
            self.done.complete();
        }
    }

    fn on_input(&mut self, ctx: &mut SceneContext, input: SceneInput) {
        match input {
            SceneInput::Tap { x, y } if self.done.is_idle() => {
                let intensity = ctx.rng().gen_range(0.9..1.3);
                ctx.trigger_burst(x, y, intensity);
                self.launched += 1;
                if self.launched >= LAUNCHES && self.done.begin() {
                    ctx.set_timeout(0.9, TimerKey::new(DONE));
                }
            }
            SceneInput::Action(SceneAction::Continue) if self.done.is_done() => {
                advance_once(&mut self.leaving, ctx);
            }
            _ => {}
        }
    }

    fn view(&self) -> SceneView {
        if self.done.is_done() {
            return SceneView::titled("You light up my world")
                .action(SceneAction::Continue, "KEEP GOING →");
        }
        let mut view = SceneView::titled("Light up the sky")
            .hint("tap anywhere")
            .input(InputMode::Tap);
        view.progress = Some((self.launched.min(LAUNCHES), LAUNCHES));
        view
    }
}
