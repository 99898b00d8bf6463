use super::advance_once;
use crate::ambient::BackdropPreset;
use crate::chase::{ChaseClock, ChaseConfig, ChaseUpdate, Milestone};
use crate::lifecycle::OneShot;
use crate::scene::{Caption, Scene, SceneAction, SceneContext, SceneInput, SceneView, SpriteView};
use crate::timers::{TimerId, TimerKey};
use rand::Rng;

const DODGE_TAUNTS: [&str; 12] = [
    "too slow!",
    "nope!",
    "haha!",
    "not yet!",
    "almost!",
    "try again!",
    "so close!",
    "nice try!",
    "keep trying!",
    "you wish!",
    "faster!",
    "catch me!",
];

const MILESTONES: &[Milestone] = &[
    Milestone { at: 5.0, text: "She's quick..." },
    Milestone { at: 15.0, text: "Don't give up!" },
    Milestone { at: 25.0, text: "Getting closer..." },
    Milestone { at: 35.0, text: "She's slowing down..." },
    Milestone { at: 45.0, text: "Almost tired..." },
    Milestone { at: 55.0, text: "Just a little more..." },
];

pub const CHASE: ChaseConfig = ChaseConfig {
    catch_after: 60.0,
    idle_reset: 5.0,
    max_step: 3.0,
    milestones: MILESTONES,
};

pub const LOCK_SPRITE: u64 = 1;

const BOUNDS_X: (f32, f32) = (10.0, 90.0);
const BOUNDS_Y: (f32, f32) = (20.0, 79.0);

const MOVE: u32 = 1;
const TAUNT: u32 = 2;
const MILESTONE: u32 = 3;
const KEY_GONE: u32 = 4;
const MESSAGE: u32 = 5;

/// A padlock that runs from taps. Only sustained chasing tires it out.
pub struct LoveLock {
    chase: ChaseClock,
    x: f32,
    y: f32,
    move_timer: Option<TimerId>,
    taunt: Caption,
    milestone: Caption,
    caught: OneShot,
    key_gone: bool,
    message: bool,
    leaving: OneShot,
}

impl Default for LoveLock {
    fn default() -> Self {
        Self {
            chase: ChaseClock::new(CHASE),
            x: 50.0,
            y: 45.0,
            move_timer: None,
            taunt: Caption::default(),
            milestone: Caption::default(),
            caught: OneShot::new(),
            key_gone: false,
            message: false,
            leaving: OneShot::new(),
        }
    }
}

fn span<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    rng.gen_range(lo..hi)
}

impl LoveLock {
    pub fn chase(&self) -> &ChaseClock {
        &self.chase
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn is_caught(&self) -> bool {
        !self.caught.is_idle()
    }

    fn report(&mut self, ctx: &mut SceneContext, update: ChaseUpdate) {
        if update.reset {
            log::debug!("[scene] chase reset after idling");
        }
        if let Some(text) = update.milestone {
            self.milestone.show(ctx, text, 2.2, MILESTONE);
        }
    }

    fn schedule_move(&mut self, ctx: &mut SceneContext, delay: f64) {
        if let Some(id) = self.move_timer.take() {
            ctx.cancel_timer(id);
        }
        self.move_timer = Some(ctx.set_timeout(delay, TimerKey::new(MOVE)));
    }

    fn on_move(&mut self, ctx: &mut SceneContext) {
        self.move_timer = None;
        if !self.caught.is_idle() {
            return;
        }
        let update = self.chase.poll(ctx.now());
        self.report(ctx, update);
        let rng = ctx.rng();
        self.x = span(rng, BOUNDS_X);
        self.y = span(rng, BOUNDS_Y);
        let next = if self.chase.is_catchable() {
            rng.gen_range(2.2..3.5)
        } else if self.chase.elapsed() < 30.0 {
            rng.gen_range(0.7..1.2)
        } else {
            rng.gen_range(1.2..2.0)
        };
        self.schedule_move(ctx, next);
    }

    fn on_tap(&mut self, ctx: &mut SceneContext) {
        if !self.caught.is_idle() {
            return;
        }
        let was_catchable = self.chase.is_catchable();
        let update = self.chase.tap(ctx.now());

        if was_catchable && self.chase.is_catchable() {
            self.caught.begin();
            if let Some(id) = self.move_timer.take() {
                ctx.cancel_timer(id);
            }
            ctx.trigger_burst(self.x, self.y, 1.8);
            ctx.set_timeout(1.0, TimerKey::new(KEY_GONE));
            ctx.set_timeout(2.4, TimerKey::new(MESSAGE));
            log::info!("[scene] lock caught after {:.1}s of chasing", self.chase.elapsed());
            return;
        }

        let rng = ctx.rng();
        self.x = if self.x < 50.0 {
            span(rng, (58.0, BOUNDS_X.1))
        } else {
            span(rng, (BOUNDS_X.0, 42.0))
        };
        self.y = if self.y < 50.0 {
            span(rng, (58.0, BOUNDS_Y.1))
        } else {
            span(rng, (BOUNDS_Y.0, 42.0))
        };
        let taunt = DODGE_TAUNTS[rng.gen_range(0..DODGE_TAUNTS.len())];
        self.taunt.show(ctx, taunt, 0.9, TAUNT);
        self.report(ctx, update);
    }
}

impl Scene for LoveLock {
    fn name(&self) -> &'static str {
        "love-lock"
    }

    fn activate(&mut self, ctx: &mut SceneContext) {
        ctx.configure_backdrop(BackdropPreset::new(0.08, 0.25, 0xe8b86d));
        self.schedule_move(ctx, 0.8);
    }

    fn on_timer(&mut self, ctx: &mut SceneContext, key: TimerKey) {
        match key.tag {
            MOVE => self.on_move(ctx),
            TAUNT => self.taunt.on_timer(),
            MILESTONE => self.milestone.on_timer(),
            KEY_GONE => self.key_gone = true,
            MESSAGE => {
                self.message = true;
                self.caught.complete();
            }
            _ => {}
        }
    }

    fn on_input(&mut self, ctx: &mut SceneContext, input: SceneInput) {
        match input {
            SceneInput::Sprite(LOCK_SPRITE) => self.on_tap(ctx),
            SceneInput::Action(SceneAction::Continue) if self.caught.is_done() => {
                advance_once(&mut self.leaving, ctx);
            }
            _ => {}
        }
    }

    fn view(&self) -> SceneView {
        if self.message {
            return SceneView::titled("Forever locked in").action(SceneAction::Continue, "AND EVER →");
        }
        let hint = if self.chase.is_catchable() {
            "she's tired, catch her now!"
        } else {
            "tap the lock!"
        };
        let mut view = SceneView::titled("Lock our love").hint(hint);
        view.caption = self.milestone.get().or_else(|| self.taunt.get());
        view.meter = Some((self.chase.elapsed() / CHASE.catch_after).min(1.0) as f32);
        if !self.key_gone {
            view.sprites.push(SpriteView {
                id: LOCK_SPRITE,
                x: self.x,
                y: self.y,
                size: 100.0,
                glyph: if self.caught.is_idle() { "🔓" } else { "🔒" },
            });
        }
        view
    }
}
