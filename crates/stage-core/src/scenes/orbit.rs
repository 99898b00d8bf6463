//! Two hearts circling each other. Holding pulls them in and speeds them up;
//! letting go before the end throws all of it away.

use super::advance_once;
use crate::ambient::BackdropPreset;
use crate::lifecycle::OneShot;
use crate::scene::{InputMode, Scene, SceneAction, SceneContext, SceneInput, SceneView, SpriteView};
use crate::timers::TimerKey;
use rand::seq::SliceRandom;
use std::f32::consts::{PI, TAU};

pub const HOLD_SECS: f64 = 30.0;
const COLLAPSE_SECS: f64 = 0.9;
const MESSAGE_AFTER: f64 = 2.2;

const HOLD_MESSAGES: [(f64, &str); 12] = [
    (0.00, "hold and don't let go…"),
    (0.06, "feel that?"),
    (0.12, "our hearts are syncing…"),
    (0.20, "closer…"),
    (0.28, "I can feel yours beating"),
    (0.36, "don't let go"),
    (0.44, "gravity is pulling us in"),
    (0.52, "almost touching…"),
    (0.60, "hold me tighter"),
    (0.70, "the universe is watching"),
    (0.80, "I'm not letting go either"),
    (0.90, "here it comes…"),
];

const RELEASE_MESSAGES: [&str; 6] = [
    "you let go…",
    "come back…",
    "don't be afraid",
    "try again, hold longer",
    "I'm still here",
    "one more time…",
];

const SUPERNOVA: u32 = 1;
const MESSAGE: u32 = 2;

/// Radius in screen percent and angular speed in rad/s at hold progress `p`.
pub fn orbit_at(p: f32) -> (f32, f32) {
    let p = p.clamp(0.0, 1.0);
    (8.0 - 6.8 * p, 1.8 * (1.0 + 11.0 * p))
}

/// Latest hold message reached at progress `p`.
pub fn hold_message(p: f64) -> &'static str {
    HOLD_MESSAGES
        .iter()
        .rev()
        .find(|(at, _)| p >= *at)
        .map_or(HOLD_MESSAGES[0].1, |(_, text)| *text)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Orbit,
    Collapse,
    Supernova,
    Message,
}

#[derive(Default)]
pub struct Orbit {
    phase: Phase,
    hold_started: Option<f64>,
    progress: f64,
    angle: f32,
    collapse: f32,
    release_msg: Option<&'static str>,
    leaving: OneShot,
}

impl Orbit {
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_holding(&self) -> bool {
        self.hold_started.is_some()
    }
}

impl Scene for Orbit {
    fn name(&self) -> &'static str {
        "orbit"
    }

    fn activate(&mut self, ctx: &mut SceneContext) {
        ctx.configure_backdrop(BackdropPreset::new(0.14, 0.35, 0xff8fa3));
    }

    fn update(&mut self, ctx: &mut SceneContext, dt: f32) {
        match self.phase {
            Phase::Orbit => {
                if let Some(start) = self.hold_started {
                    self.progress = ((ctx.now() - start) / HOLD_SECS).min(1.0);
                    if self.progress >= 1.0 {
                        self.phase = Phase::Collapse;
                        self.hold_started = None;
                        ctx.set_timeout(COLLAPSE_SECS, TimerKey::new(SUPERNOVA));
                    }
                }
                let (_, speed) = orbit_at(self.progress as f32);
                self.angle = (self.angle + speed * dt) % TAU;
            }
            Phase::Collapse => {
                self.collapse = (self.collapse + dt / COLLAPSE_SECS as f32).min(1.0);
                let (_, speed) = orbit_at(1.0);
                self.angle = (self.angle + speed * (1.0 + self.collapse) * dt) % TAU;
            }
            Phase::Supernova | Phase::Message => {}
        }
    }

    fn on_timer(&mut self, ctx: &mut SceneContext, key: TimerKey) {
        match key.tag {
            SUPERNOVA => {
                self.phase = Phase::Supernova;
                ctx.trigger_burst(50.0, 50.0, 1.2);
                ctx.set_timeout(MESSAGE_AFTER, TimerKey::new(MESSAGE));
            }
            MESSAGE => self.phase = Phase::Message,
            _ => {}
        }
    }

    fn on_input(&mut self, ctx: &mut SceneContext, input: SceneInput) {
        match input {
            SceneInput::PressStart { .. } if self.phase == Phase::Orbit => {
                self.hold_started = Some(ctx.now());
                self.release_msg = None;
            }
            SceneInput::PressEnd if self.phase == Phase::Orbit && self.hold_started.is_some() => {
                self.hold_started = None;
                self.progress = 0.0;
                self.release_msg = RELEASE_MESSAGES.choose(ctx.rng()).copied();
            }
            SceneInput::Action(SceneAction::Continue) if self.phase == Phase::Message => {
                advance_once(&mut self.leaving, ctx);
            }
            _ => {}
        }
    }

    fn view(&self) -> SceneView {
        match self.phase {
            Phase::Message => {
                return SceneView::titled("Better together").action(SceneAction::Continue, "ALWAYS →");
            }
            Phase::Supernova => return SceneView::default(),
            Phase::Orbit | Phase::Collapse => {}
        }
        let mut view = SceneView::titled("Two hearts, one orbit").input(InputMode::Hold);
        if self.is_holding() {
            view.caption = Some(hold_message(self.progress).to_string());
        } else if let Some(msg) = self.release_msg {
            view.caption = Some(msg.to_string());
        } else {
            view = view.hint("hold to bring them closer");
        }
        view.meter = Some(self.progress as f32);

        let (radius, _) = orbit_at(self.progress as f32);
        let radius = radius * (1.0 - self.collapse);
        for (id, offset) in [(1, 0.0), (2, PI)] {
            let a = self.angle + offset;
            view.sprites.push(SpriteView {
                id,
                x: 50.0 + a.cos() * radius,
                y: 50.0 + a.sin() * radius,
                size: 56.0,
                glyph: "❤",
            });
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_track_progress() {
        assert_eq!(hold_message(0.0), "hold and don't let go…");
        assert_eq!(hold_message(0.21), "closer…");
        assert_eq!(hold_message(1.0), "here it comes…");
    }

    #[test]
    fn hearts_close_in_and_speed_up() {
        let (r0, s0) = orbit_at(0.0);
        let (r1, s1) = orbit_at(1.0);
        assert!(r1 < r0 && r1 > 0.0);
        assert!((s1 / s0 - 12.0).abs() < 1e-4);
    }
}
