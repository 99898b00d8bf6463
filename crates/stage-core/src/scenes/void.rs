use super::advance_once;
use crate::ambient::{BackdropPreset, GlowObjectsUpdate, GlowSlot, GlowUpdate};
use crate::color::Color;
use crate::lifecycle::OneShot;
use crate::scene::{InputMode, Scene, SceneAction, SceneContext, SceneInput, SceneView};
use crate::timers::TimerKey;
use crate::tween::{Ease, Tween, TweenChannel};
use glam::Vec3;

const BRIGHTEN: u32 = 1;
const REVEAL: u32 = 2;
const EXIT: u32 = 3;

// date, title, subtitle, orb button
const REVEAL_AT: [f64; 4] = [2.5, 3.3, 4.5, 5.5];

const ORB: TweenChannel = TweenChannel::GlowScale(GlowSlot::Primary);

/// Opening scene: a dim field, a glowing orb growing out of nothing, and a
/// tap on the orb to begin.
#[derive(Default)]
pub struct Void {
    revealed: usize,
    exiting: OneShot,
    leaving: OneShot,
}

impl Scene for Void {
    fn name(&self) -> &'static str {
        "void"
    }

    fn activate(&mut self, ctx: &mut SceneContext) {
        ctx.set_backdrop_preset(BackdropPreset::new(0.04, 0.12, 0xb78ccd));
        ctx.set_glow_objects(
            &GlowObjectsUpdate::default()
                .primary(
                    GlowUpdate::shown()
                        .color(Color::hex(0xff8fa3))
                        .scale(0.01)
                        .pulse_speed(1.35)
                        .emissive_intensity(1.5)
                        .position(Vec3::new(0.0, 0.8, -5.0)),
                )
                .secondary(GlowUpdate::hidden())
                .bloom(0.0),
        );

        ctx.set_timeout(0.5, TimerKey::new(BRIGHTEN));
        ctx.tween_after(0.8, Tween::new(ORB, 0.6, 1.5, Ease::Power3Out));
        ctx.tween_after(0.8, Tween::new(TweenChannel::Bloom, 1.2, 1.5, Ease::Power2Out));
        ctx.tween_after(2.0, Tween::new(ORB, 1.0, 1.2, Ease::Power2InOut));
        ctx.tween_after(3.3, Tween::new(ORB, 1.2, 1.0, Ease::Power2InOut));
        for (i, at) in REVEAL_AT.iter().enumerate() {
            ctx.set_timeout(*at, TimerKey::with_arg(REVEAL, i as u64 + 1));
        }
    }

    fn deactivate(&mut self, ctx: &mut SceneContext) {
        ctx.set_glow_objects(
            &GlowObjectsUpdate::default()
                .primary(GlowUpdate::hidden())
                .bloom(0.0),
        );
    }

    fn on_timer(&mut self, ctx: &mut SceneContext, key: TimerKey) {
        match key.tag {
            BRIGHTEN => ctx.set_backdrop_preset(BackdropPreset::new(0.08, 0.35, 0xb78ccd)),
            REVEAL => self.revealed = self.revealed.max(key.arg as usize),
            EXIT => advance_once(&mut self.leaving, ctx),
            _ => {}
        }
    }

    fn on_input(&mut self, ctx: &mut SceneContext, input: SceneInput) {
        if input != SceneInput::Action(SceneAction::Begin) || self.revealed < REVEAL_AT.len() {
            return;
        }
        if !self.exiting.finish() {
            return;
        }
        ctx.trigger_burst(50.0, 45.0, 1.6);
        ctx.kill_tweens(ORB);
        ctx.kill_tweens(TweenChannel::Bloom);
        ctx.tween(Tween::new(ORB, 0.0, 0.6, Ease::Power2In));
        ctx.tween(Tween::new(TweenChannel::Bloom, 0.0, 0.6, Ease::Power2Out));
        ctx.set_timeout(0.7, TimerKey::new(EXIT));
    }

    fn view(&self) -> SceneView {
        let mut view = SceneView::default().input(InputMode::Buttons);
        if self.revealed >= 1 {
            view.lines.push("February 14th".into());
        }
        if self.revealed >= 2 {
            view.title = "I Made Something For You".into();
        }
        if self.revealed >= 3 {
            view.lines.push("It comes from the heart.".into());
        }
        if self.revealed >= 4 && self.exiting.is_idle() {
            view = view
                .action(SceneAction::Begin, "◉")
                .hint("tap the orb to begin");
        }
        view
    }
}
