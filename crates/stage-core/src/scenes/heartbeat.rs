//! Near-black stage, an ECG trace and a sentence revealed one word per half
//! beat. Continuing flatlines the trace before moving on.

use super::advance_once;
use crate::ambient::BackdropPreset;
use crate::lifecycle::OneShot;
use crate::scene::{Scene, SceneAction, SceneContext, SceneInput, SceneView};
use crate::timers::TimerKey;

pub const BEAT: f64 = 0.833;
pub const WORDS: [&str; 7] = ["This", "is", "what", "you", "do", "to", "me."];

const TRACE_SECS: f64 = 4.2;
const RACE_SECS: f64 = 2.4;
const SETTLE_SECS: f64 = 2.1;
pub const FLATLINE_SECS: f64 = 2.25;

const WORD: u32 = 1;
const RACE: u32 = 2;
const FINAL: u32 = 3;
const FLATLINE: u32 = 4;

/// Offset of the `i`-th word from activation.
pub fn word_at(i: usize) -> f64 {
    TRACE_SECS + i as f64 * BEAT * 0.5
}

/// When the closing line shows, counted from activation.
pub fn final_at() -> f64 {
    word_at(WORDS.len() - 1) + RACE_SECS + SETTLE_SECS
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Tracing,
    Racing,
    Settled,
    Flatline,
}

#[derive(Default)]
pub struct Heartbeat {
    phase: Phase,
    words: usize,
    started_at: f64,
    now: f64,
    shown_final: bool,
    leaving: OneShot,
}

impl Heartbeat {
    pub fn words_shown(&self) -> usize {
        self.words
    }

    /// Fraction of the current trace drawn.
    fn trace(&self) -> f32 {
        let t = self.now - self.started_at;
        let v = match self.phase {
            Phase::Tracing => t / TRACE_SECS,
            Phase::Racing => (t - word_at(WORDS.len() - 1)) / RACE_SECS,
            Phase::Settled => 1.0,
            Phase::Flatline => 0.0,
        };
        v.clamp(0.0, 1.0) as f32
    }
}

impl Scene for Heartbeat {
    fn name(&self) -> &'static str {
        "heartbeat"
    }

    fn activate(&mut self, ctx: &mut SceneContext) {
        ctx.configure_backdrop(BackdropPreset::new(0.0, 0.02, 0x120012));
        self.started_at = ctx.now();
        self.now = self.started_at;
        for i in 0..WORDS.len() {
            ctx.set_timeout(word_at(i), TimerKey::with_arg(WORD, i as u64 + 1));
        }
        ctx.set_timeout(word_at(WORDS.len() - 1), TimerKey::new(RACE));
        ctx.set_timeout(final_at(), TimerKey::new(FINAL));
    }

    fn update(&mut self, ctx: &mut SceneContext, _dt: f32) {
        self.now = ctx.now();
    }

    fn on_timer(&mut self, ctx: &mut SceneContext, key: TimerKey) {
        match key.tag {
            WORD => self.words = self.words.max(key.arg as usize),
            RACE => {
                self.phase = Phase::Racing;
                log::debug!("[scene] heartbeat racing");
            }
            FINAL => {
                if self.phase != Phase::Flatline {
                    self.phase = Phase::Settled;
                }
                self.shown_final = true;
            }
            FLATLINE => advance_once(&mut self.leaving, ctx),
            _ => {}
        }
    }

    fn on_input(&mut self, ctx: &mut SceneContext, input: SceneInput) {
        if input != SceneInput::Action(SceneAction::Continue) || !self.shown_final {
            return;
        }
        if self.phase == Phase::Flatline {
            return;
        }
        self.phase = Phase::Flatline;
        ctx.set_timeout(FLATLINE_SECS, TimerKey::new(FLATLINE));
    }

    fn view(&self) -> SceneView {
        let mut view = SceneView::default();
        view.title = WORDS[..self.words].join(" ");
        view.meter = Some(self.trace());
        if self.shown_final && self.phase != Phase::Flatline {
            view = view
                .line("Every. Single. Time.")
                .action(SceneAction::Continue, "FEEL IT →");
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_follow_the_half_beat() {
        assert_eq!(word_at(0), 4.2);
        assert!((word_at(6) - (4.2 + 3.0 * BEAT)).abs() < 1e-9);
        assert!((final_at() - (word_at(6) + 4.5)).abs() < 1e-9);
    }
}
