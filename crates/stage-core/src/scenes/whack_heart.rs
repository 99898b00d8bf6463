use super::arcade::{Arcade, ArcadeCopy};
use crate::ambient::BackdropPreset;
use crate::minigame::{Layout, Ramp, TapGame, TapGameConfig, Timing};
use crate::scene::{Scene, SceneContext, SceneInput, SceneView};
use crate::timers::TimerKey;

const MISS_TAUNTS: &[&str] = &["too slow!", "nope!", "faster!", "wake up!", "cmon!", "zzz..."];
const DECOY_TAUNTS: &[&str] = &["not that one!", "ouch!", "wrong heart!", "tricked ya!"];

/// 3×3 whack-a-mole. Hearts show for less time as rounds pass and score
/// rises; past the halfway mark two can pop up at once.
pub fn config() -> TapGameConfig {
    let show = Ramp::constant(1.4).rounds(-0.035).progress(-0.4).at_least(0.5);
    TapGameConfig {
        layout: Layout::Grid { cells: 9, columns: 3 },
        goal: 12,
        first_spawn_secs: 0.8,
        max_active: 2,
        decoy_chance: Ramp::constant(0.2).rounds(0.012).at_most(0.45),
        dual_chance: Ramp::constant(-0.81).progress(1.8).at_least(0.0).at_most(0.65),
        lifetime: Timing::between(show, show),
        gap: Timing::between(
            Ramp::constant(0.35).progress(-0.2).at_least(0.15),
            Ramp::constant(0.65).progress(-0.35).at_least(0.3),
        ),
        decoy_penalty: 1,
        miss_taunts: MISS_TAUNTS,
        decoy_taunts: DECOY_TAUNTS,
        caption_secs: 0.8,
        nudge_on_event: true,
    }
}

pub struct WhackHeart {
    arcade: Arcade,
}

impl Default for WhackHeart {
    fn default() -> Self {
        Self {
            arcade: Arcade::new(
                config,
                BackdropPreset::new(0.2, 0.45, 0xffd6e0),
                ArcadeCopy {
                    title: "Whack my heart",
                    hint: "tap ❤ · avoid 💔",
                    done_title: "You got fast hands",
                    continue_label: "SHOW ME MORE →",
                },
            ),
        }
    }
}

impl WhackHeart {
    pub fn game(&self) -> Option<&TapGame> {
        self.arcade.game()
    }
}

impl Scene for WhackHeart {
    fn name(&self) -> &'static str {
        "whack-heart"
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
    use crate::minigame::Difficulty;

    #[test]
    fn config_is_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn show_time_shrinks_to_its_floor() {
        let c = config();
        let fresh = Difficulty::default();
        let late = Difficulty {
            round: 40,
            popped: 20,
            progress: 1.0,
        };
        assert!((c.lifetime.lo.eval(&fresh) - 1.4).abs() < 1e-9);
        assert_eq!(c.lifetime.lo.eval(&late), 0.5);
        assert_eq!(c.dual_chance.eval(&fresh), 0.0);
    }
}
