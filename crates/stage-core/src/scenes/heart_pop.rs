use super::arcade::{Arcade, ArcadeCopy};
use crate::ambient::BackdropPreset;
use crate::minigame::{Layout, Ramp, TapGame, TapGameConfig, Timing};
use crate::scene::{Scene, SceneContext, SceneInput, SceneView};
use crate::timers::TimerKey;

const DECOY_TAUNTS: &[&str] = &["nope!", "wrong one!", "ouch!", "💔 hurts!", "tricked ya!"];

/// Hearts float up from the bottom; pop 14, skip the broken ones. Every pop
/// shortens both lifetimes and gaps.
pub fn config() -> TapGameConfig {
    let pace = Ramp::constant(1.0).popped(-0.028).at_least(0.45);
    TapGameConfig {
        layout: Layout::Field,
        goal: 14,
        first_spawn_secs: 0.0,
        max_active: 31,
        decoy_chance: Ramp::constant(0.15).popped(0.012).at_most(0.35),
        dual_chance: Ramp::constant(0.0),
        lifetime: Timing::between(Ramp::constant(5.0), Ramp::constant(7.0)).scaled(pace),
        gap: Timing::between(Ramp::constant(0.25), Ramp::constant(0.5))
            .scaled(pace)
            .floor(0.15),
        decoy_penalty: 1,
        miss_taunts: &[],
        decoy_taunts: DECOY_TAUNTS,
        caption_secs: 0.7,
        nudge_on_event: false,
    }
}

pub struct HeartPop {
    arcade: Arcade,
}

impl Default for HeartPop {
    fn default() -> Self {
        Self {
            arcade: Arcade::new(
                config,
                BackdropPreset::new(0.3, 0.5, 0xffb3c6),
                ArcadeCopy {
                    title: "Catch my love",
                    hint: "tap ❤ · avoid 💔",
                    done_title: "You make my heart burst",
                    continue_label: "MORE LOVE →",
                },
            ),
        }
    }
}

impl HeartPop {
    pub fn game(&self) -> Option<&TapGame> {
        self.arcade.game()
    }
}

impl Scene for HeartPop {
    fn name(&self) -> &'static str {
        "heart-pop"
    }

    fn activate(&mut self, ctx: &mut SceneContext) {
        self.arcade.activate(ctx);
    }

    fn update(&mut self, ctx: &mut SceneContext, _dt: f32) {
        self.arcade.update(ctx);
    }

    fn on_timer(&mut self, ctx: &mut SceneContext, key: TimerKey) {
        self.arcade.on_timer(ctx, key);
    }

    fn on_input(&mut self, ctx: &mut SceneContext, input: SceneInput) {
        self.arcade.on_input(ctx, input);
    }

    fn view(&self) -> SceneView {
        self.arcade.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_valid() {
        assert!(config().validate().is_ok());
    }
}
