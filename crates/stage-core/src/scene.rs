//! Scene contract: lifecycle hooks, the context handle scenes act through,
//! and the declarative view the front end renders.

use crate::ambient::{AmbientVisualState, BackdropPreset, GlowObjectsUpdate};
use crate::bursts::BurstId;
use crate::error::StageError;
use crate::lifecycle::Generation;
use crate::stage::{NavRequest, StageCore};
use crate::timers::{Owner, TimerId, TimerKey};
use crate::tween::{Tween, TweenChannel};
use rand::rngs::StdRng;

/// Pointer and button input routed to the active scene. Positions are
/// screen percentages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneInput {
    Tap { x: f32, y: f32 },
    PressStart { x: f32, y: f32 },
    PressEnd,
    Cell(usize),
    Sprite(u64),
    Action(SceneAction),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneAction {
    Begin,
    Continue,
    Activate,
    Restart,
    SaveMoment,
}

impl SceneAction {
    pub const ALL: [SceneAction; 5] = [
        SceneAction::Begin,
        SceneAction::Continue,
        SceneAction::Activate,
        SceneAction::Restart,
        SceneAction::SaveMoment,
    ];

    /// Stable name used in `data-action` attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            SceneAction::Begin => "begin",
            SceneAction::Continue => "continue",
            SceneAction::Activate => "activate",
            SceneAction::Restart => "restart",
            SceneAction::SaveMoment => "save",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

/// How the presentation layer should capture pointer input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Buttons,
    /// Taps anywhere are forwarded as `Tap`.
    Tap,
    /// Press/release are forwarded as `PressStart`/`PressEnd`.
    Hold,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CellView {
    pub glyph: String,
    pub lit: bool,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteView {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub glyph: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActionButton {
    pub action: SceneAction,
    pub label: String,
}

/// Everything the overlay needs to draw a scene panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneView {
    pub title: String,
    pub lines: Vec<String>,
    pub hint: Option<String>,
    pub caption: Option<String>,
    pub progress: Option<(u32, u32)>,
    pub meter: Option<f32>,
    pub grid_columns: u32,
    pub cells: Vec<CellView>,
    pub sprites: Vec<SpriteView>,
    pub actions: Vec<ActionButton>,
    pub input: InputMode,
}

impl SceneView {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    pub fn hint(mut self, text: impl Into<String>) -> Self {
        self.hint = Some(text.into());
        self
    }

    pub fn action(mut self, action: SceneAction, label: impl Into<String>) -> Self {
        self.actions.push(ActionButton {
            action,
            label: label.into(),
        });
        self
    }

    pub fn input(mut self, mode: InputMode) -> Self {
        self.input = mode;
        self
    }
}

/// A self-contained scene. Every hook receives a [`SceneContext`]; deferred
/// work must go through it so the stage can cancel it on unmount.
pub trait Scene {
    fn name(&self) -> &'static str;

    /// Claim the backdrop and start the scene's own timers.
    fn activate(&mut self, ctx: &mut SceneContext);

    fn deactivate(&mut self, _ctx: &mut SceneContext) {}

    fn update(&mut self, _ctx: &mut SceneContext, _dt: f32) {}

    fn on_timer(&mut self, _ctx: &mut SceneContext, _key: TimerKey) {}

    fn on_input(&mut self, _ctx: &mut SceneContext, _input: SceneInput) {}

    fn view(&self) -> SceneView;
}

/// Entry of the static scene list; each mount builds a fresh instance.
#[derive(Clone, Copy, Debug)]
pub struct SceneEntry {
    pub name: &'static str,
    pub build: fn() -> Box<dyn Scene>,
}

/// Handle a scene acts through while one of its hooks runs. Timers and
/// tweens created here belong to the current generation.
pub struct SceneContext<'a> {
    core: &'a mut StageCore,
}

impl<'a> SceneContext<'a> {
    pub(crate) fn new(core: &'a mut StageCore) -> Self {
        Self { core }
    }

    fn owner(&self) -> Owner {
        Owner::Scene(self.core.generation)
    }

    pub fn now(&self) -> f64 {
        self.core.clock
    }

    pub fn generation(&self) -> Generation {
        self.core.generation
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.core.rng
    }

    pub fn ambient(&self) -> &AmbientVisualState {
        &self.core.ambient
    }

    pub fn set_backdrop_preset(&mut self, preset: BackdropPreset) {
        self.core.ambient.set_backdrop_preset(preset);
    }

    pub fn set_glow_objects(&mut self, update: &GlowObjectsUpdate) {
        self.core.ambient.set_glow_objects(update);
    }

    /// Preset plus hidden glow objects and zero bloom.
    pub fn configure_backdrop(&mut self, preset: BackdropPreset) {
        self.set_backdrop_preset(preset);
        self.set_glow_objects(&GlowObjectsUpdate::hide_all());
    }

    pub fn trigger_warp(&mut self, peak: f32, ramp_in: f32, hold: f32, ramp_out: f32) {
        self.core.trigger_warp(peak, ramp_in, hold, ramp_out);
    }

    pub fn trigger_burst(&mut self, x: f32, y: f32, intensity: f32) -> BurstId {
        self.core.trigger_burst(x, y, intensity)
    }

    pub fn tween(&mut self, tween: Tween) {
        self.tween_after(0.0, tween);
    }

    pub fn tween_after(&mut self, delay: f64, mut tween: Tween) {
        tween.start_at = self.core.clock + delay.max(0.0);
        tween.owner = self.owner();
        self.core.tweens.add(tween);
    }

    pub fn kill_tweens(&mut self, channel: TweenChannel) -> usize {
        let owner = self.owner();
        self.core.tweens.kill_channel(owner, channel)
    }

    pub fn set_timeout(&mut self, delay: f64, key: TimerKey) -> TimerId {
        let owner = self.owner();
        self.core.scheduler.set_timeout(self.core.clock, delay, owner, key)
    }

    pub fn set_interval(&mut self, period: f64, key: TimerKey) -> TimerId {
        let owner = self.owner();
        self.core.scheduler.set_interval(self.core.clock, period, owner, key)
    }

    pub fn cancel_timer(&mut self, id: TimerId) -> bool {
        self.core.scheduler.cancel(id)
    }

    /// Cancel this scene's timers with the given tag.
    pub fn cancel_timers(&mut self, tag: u32) -> usize {
        let owner = self.owner();
        self.core.scheduler.cancel_tagged(owner, tag)
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.core.notify(text.into());
    }

    pub fn advance(&mut self) {
        self.core.request_nav(NavRequest::Advance);
    }

    pub fn restart(&mut self) {
        self.core.request_nav(NavRequest::Restart);
    }

    pub fn jump(&mut self, index: usize) -> Result<(), StageError> {
        self.core.check_index(index)?;
        self.core.request_nav(NavRequest::Jump(index));
        Ok(())
    }
}

/// Short scene-local message that clears itself.
#[derive(Clone, Debug, Default)]
pub struct Caption {
    text: Option<String>,
    timer: Option<TimerId>,
}

impl Caption {
    /// Show `text` for `secs`; `tag` is the timer tag the scene routes back
    /// into [`Caption::on_timer`].
    pub fn show(&mut self, ctx: &mut SceneContext, text: impl Into<String>, secs: f64, tag: u32) {
        if let Some(id) = self.timer.take() {
            ctx.cancel_timer(id);
        }
        self.text = Some(text.into());
        self.timer = Some(ctx.set_timeout(secs, TimerKey::new(tag)));
    }

    pub fn on_timer(&mut self) {
        self.text = None;
        self.timer = None;
    }

    pub fn get(&self) -> Option<String> {
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_names_round_trip() {
        for a in SceneAction::ALL {
            assert_eq!(SceneAction::parse(a.as_str()), Some(a));
        }
        assert_eq!(SceneAction::parse("nope"), None);
    }
}
