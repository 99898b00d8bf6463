//! Hold to inflate a heart bubble, let go while it sits inside the good zone.
//! The zone narrows after every success; holding past the limit pops it.

use super::advance_once;
use crate::ambient::BackdropPreset;
use crate::lifecycle::OneShot;
use crate::scene::{Caption, InputMode, Scene, SceneAction, SceneContext, SceneInput, SceneView, SpriteView};
use crate::timers::TimerKey;

pub const START_SIZE: f32 = 40.0;
pub const GROW_PER_SEC: f32 = 120.0;
pub const POP_SIZE: f32 = 160.0;
pub const GOAL: u32 = 5;
const ZONE: (f32, f32) = (75.0, 135.0);
const ZONE_SHRINK: f32 = 5.0;

const DONE: u32 = 1;
const CAPTION: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// Not holding.
    Ignored,
    TooSmall,
    TooBig,
    Good,
}

#[derive(Default)]
pub struct BubblePop {
    holding: bool,
    size: f32,
    successes: u32,
    caption: Caption,
    done: OneShot,
    leaving: OneShot,
}

impl BubblePop {
    /// Good zone after `successes` wins.
    pub fn zone(successes: u32) -> (f32, f32) {
        let k = ZONE_SHRINK * successes as f32;
        (ZONE.0 + k, ZONE.1 - k)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn successes(&self) -> u32 {
        self.successes
    }

    fn release(&mut self, ctx: &mut SceneContext) -> Release {
        if !self.holding {
            return Release::Ignored;
        }
        self.holding = false;
        let (lo, hi) = Self::zone(self.successes);
        let outcome = if self.size < lo {
            Release::TooSmall
        } else if self.size > hi {
            Release::TooBig
        } else {
            Release::Good
        };
        match outcome {
            Release::Good => {
                self.successes += 1;
                ctx.trigger_burst(50.0, 55.0, 0.6 + self.size / POP_SIZE);
                if self.successes >= GOAL && self.done.begin() {
                    ctx.set_timeout(1.2, TimerKey::new(DONE));
                }
            }
            Release::TooSmall => self.caption.show(ctx, "too small!", 0.9, CAPTION),
            Release::TooBig => self.caption.show(ctx, "too big!", 0.9, CAPTION),
            Release::Ignored => {}
        }
        self.size = START_SIZE;
        outcome
    }
}

impl Scene for BubblePop {
    fn name(&self) -> &'static str {
        "bubble-pop"
    }

    fn activate(&mut self, ctx: &mut SceneContext) {
        ctx.configure_backdrop(BackdropPreset::new(0.25, 0.4, 0xffb3c6));
        self.size = START_SIZE;
    }

    fn update(&mut self, ctx: &mut SceneContext, dt: f32) {
        if !self.holding {
            return;
        }
        self.size += GROW_PER_SEC * dt;
        if self.size > POP_SIZE {
            self.holding = false;
            self.size = START_SIZE;
            ctx.trigger_burst(50.0, 55.0, 0.7);
            self.caption.show(ctx, "pop! too much air", 0.9, CAPTION);
        }
    }

    fn on_timer(&mut self, _ctx: &mut SceneContext, key: TimerKey) {
        match key.tag {
            DONE => {
                self.done.complete();
            }
            CAPTION => self.caption.on_timer(),
            _ => {}
        }
    }

    fn on_input(&mut self, ctx: &mut SceneContext, input: SceneInput) {
        match input {
            SceneInput::PressStart { .. } if self.done.is_idle() => {
                self.holding = true;
                self.size = START_SIZE;
            }
            SceneInput::PressEnd => {
                self.release(ctx);
            }
            SceneInput::Action(SceneAction::Continue) if self.done.is_done() => {
                advance_once(&mut self.leaving, ctx);
            }
            _ => {}
        }
    }

    fn view(&self) -> SceneView {
        if self.done.is_done() {
            return SceneView::titled("Full of love")
                .line("Just the right amount, every time.")
                .action(SceneAction::Continue, "BLOW ME AWAY →");
        }
        let (lo, hi) = Self::zone(self.successes);
        let mut view = SceneView::titled("Fill the heart")
            .hint("hold to inflate, let go in the glowing ring")
            .input(InputMode::Hold);
        view.caption = self.caption.get();
        view.progress = Some((self.successes.min(GOAL), GOAL));
        view.meter = Some(((self.size - lo) / (hi - lo)).clamp(0.0, 1.0));
        view.sprites.push(SpriteView {
            id: 1,
            x: 50.0,
            y: 55.0,
            size: self.size,
            glyph: "💗",
        });
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_narrows_but_stays_open() {
        assert_eq!(BubblePop::zone(0), (75.0, 135.0));
        let (lo, hi) = BubblePop::zone(GOAL - 1);
        assert_eq!((lo, hi), (95.0, 115.0));
        assert!(hi < POP_SIZE);
    }
}
