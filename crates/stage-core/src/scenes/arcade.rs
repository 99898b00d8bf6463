//! Shared host for the tap/avoid scenes: runs a [`TapGame`], pops a small
//! burst on hits and swaps to the scene's closing copy when it completes.

use super::{advance_once, grid_cell_center};
use crate::ambient::BackdropPreset;
use crate::lifecycle::OneShot;
use crate::minigame::{Layout, TapGame, TapGameConfig, TapOutcome};
use crate::scene::{InputMode, SceneAction, SceneContext, SceneInput, SceneView};
use crate::timers::TimerKey;

const HIT_BURST: f32 = 0.5;

pub(super) struct ArcadeCopy {
    pub title: &'static str,
    pub hint: &'static str,
    pub done_title: &'static str,
    pub continue_label: &'static str,
}

pub(super) struct Arcade {
    config: fn() -> TapGameConfig,
    preset: BackdropPreset,
    copy: ArcadeCopy,
    game: Option<TapGame>,
    leaving: OneShot,
}

impl Arcade {
    pub fn new(config: fn() -> TapGameConfig, preset: BackdropPreset, copy: ArcadeCopy) -> Self {
        Self {
            config,
            preset,
            copy,
            game: None,
            leaving: OneShot::new(),
        }
    }

    pub fn game(&self) -> Option<&TapGame> {
        self.game.as_ref()
    }

    pub fn activate(&mut self, ctx: &mut SceneContext) {
        ctx.configure_backdrop(self.preset);
        match TapGame::new((self.config)()) {
            Ok(mut game) => {
                game.start(ctx);
                self.game = Some(game);
            }
            Err(e) => log::error!("[scene] {}: {}", self.copy.title, e),
        }
    }

    pub fn update(&mut self, ctx: &mut SceneContext) {
        if let Some(game) = self.game.as_mut() {
            game.update(ctx);
        }
    }

    pub fn on_timer(&mut self, ctx: &mut SceneContext, key: TimerKey) {
        if let Some(game) = self.game.as_mut() {
            game.on_timer(ctx, key);
        }
    }

    /// Screen position of a live target before it is tapped away.
    fn target_position(game: &TapGame, now: f64, id: u64) -> Option<(f32, f32)> {
        let t = game.targets().iter().find(|t| t.id == id)?;
        Some(match (t.cell, game.config().layout) {
            (Some(cell), Layout::Grid { cells, columns }) => {
                let columns = columns as usize;
                let rows = cells.div_ceil(columns);
                grid_cell_center(cell, columns, rows, [16.0, 16.0])
            }
            _ => (t.x, t.y_at(now)),
        })
    }

    pub fn on_input(&mut self, ctx: &mut SceneContext, input: SceneInput) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let now = ctx.now();
        let (outcome, at) = match input {
            SceneInput::Sprite(id) => {
                let at = Self::target_position(game, now, id);
                (game.tap_target(ctx, id), at)
            }
            SceneInput::Cell(cell) => {
                let at = game
                    .targets()
                    .iter()
                    .find(|t| t.cell == Some(cell))
                    .and_then(|t| Self::target_position(game, now, t.id));
                (game.tap_cell(ctx, cell), at)
            }
            SceneInput::Action(SceneAction::Continue) if game.is_complete() => {
                if self.leaving.is_idle() {
                    ctx.trigger_burst(50.0, 50.0, 1.2);
                }
                advance_once(&mut self.leaving, ctx);
                return;
            }
            _ => return,
        };
        match outcome {
            TapOutcome::Hit => {
                if let Some((x, y)) = at {
                    ctx.trigger_burst(x, y, HIT_BURST);
                }
            }
            TapOutcome::Completed => {
                ctx.trigger_burst(50.0, 50.0, 1.4);
            }
            TapOutcome::Decoy | TapOutcome::Miss => {}
        }
    }

    pub fn view(&self) -> SceneView {
        let Some(game) = self.game.as_ref() else {
            return SceneView::titled(self.copy.title);
        };
        if game.is_complete() {
            return SceneView::titled(self.copy.done_title)
                .action(SceneAction::Continue, self.copy.continue_label);
        }
        let mut view = SceneView::titled(self.copy.title)
            .hint(self.copy.hint)
            .input(InputMode::Buttons);
        game.render_into(&mut view);
        view
    }
}
