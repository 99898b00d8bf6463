use crate::ambient::BackdropPreset;
use crate::lifecycle::OneShot;
use crate::scene::{Scene, SceneAction, SceneContext, SceneInput, SceneView};
use crate::timers::TimerKey;

/// Follow-up bursts after activation: `(delay, x, y, intensity)`.
const VOLLEY: [(f64, f32, f32, f32); 2] = [(0.4, 44.0, 40.0, 1.5), (0.8, 56.0, 45.0, 1.6)];
const COPY_AFTER: f64 = 1.2;

const BURST: u32 = 1;
const COPY: u32 = 2;

pub const SAVE_MESSAGE: &str = "Take a screenshot and keep it forever 📸";

#[derive(Default)]
pub struct Finale {
    activated: OneShot,
}

impl Finale {
    pub fn is_activated(&self) -> bool {
        !self.activated.is_idle()
    }
}

impl Scene for Finale {
    fn name(&self) -> &'static str {
        "finale"
    }

    fn activate(&mut self, ctx: &mut SceneContext) {
        ctx.configure_backdrop(BackdropPreset::new(0.6, 0.86, 0xffd3f2));
    }

    fn on_timer(&mut self, ctx: &mut SceneContext, key: TimerKey) {
        match key.tag {
            BURST => {
                if let Some(&(_, x, y, intensity)) = VOLLEY.get(key.arg as usize) {
                    ctx.trigger_burst(x, y, intensity);
                }
            }
            COPY => {
                self.activated.complete();
            }
            _ => {}
        }
    }

    fn on_input(&mut self, ctx: &mut SceneContext, input: SceneInput) {
        let SceneInput::Action(action) = input else {
            return;
        };
        match action {
            SceneAction::Activate => {
                if !self.activated.begin() {
                    return;
                }
                ctx.trigger_warp(20.0, 1.2, 0.5, 1.8);
                ctx.trigger_burst(50.0, 50.0, 1.7);
                for (i, (delay, ..)) in VOLLEY.iter().enumerate() {
                    ctx.set_timeout(*delay, TimerKey::with_arg(BURST, i as u64));
                }
                ctx.set_timeout(COPY_AFTER, TimerKey::new(COPY));
            }
            SceneAction::Restart if self.activated.is_done() => ctx.restart(),
            SceneAction::SaveMoment if self.activated.is_done() => ctx.notify(SAVE_MESSAGE),
            _ => {}
        }
    }

    fn view(&self) -> SceneView {
        if self.activated.is_done() {
            SceneView::titled("Happy Valentine's Day")
                .line("I love you more than words on a screen could ever say.")
                .action(SceneAction::Restart, "↺ FROM THE START")
                .action(SceneAction::SaveMoment, "♥ SAVE THIS MOMENT")
        } else if self.activated.is_idle() {
            SceneView::titled("One more thing").action(SceneAction::Activate, "❤")
        } else {
            SceneView::default()
        }
    }
}
