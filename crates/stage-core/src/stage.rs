//! The stage: explicitly owned ambient context, scene lifecycle and the
//! per-frame tick.

use crate::ambient::{AmbientDefaults, AmbientVisualState, BackdropPreset, GlowObjectsUpdate};
use crate::backdrop::Backdrop;
use crate::bursts::{BurstId, BurstManager};
use crate::constants::*;
use crate::error::StageError;
use crate::lifecycle::Generation;
use crate::scene::{Scene, SceneContext, SceneEntry, SceneInput, SceneView};
use crate::scenes;
use crate::sequencer::{SceneSequencer, Transition, TransitionCause};
use crate::timers::{Owner, Scheduler, TimerId, TimerKey};
use crate::tween::Tweens;
use crate::warp::WarpDirector;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Stage-owned timer tags
const TIMER_TOAST: u32 = 1;
const TIMER_MOUNT: u32 = 2;

#[derive(Clone, Debug)]
pub struct StageConfig {
    pub ambient: AmbientDefaults,
    pub scenes: Vec<SceneEntry>,
    /// Fixed RNG seed; entropy when `None`.
    pub seed: Option<u64>,
    pub star_count: usize,
    pub toast_secs: f64,
    /// Exit fade between deactivating a scene and mounting the next.
    pub exit_secs: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            ambient: AmbientDefaults::default(),
            scenes: scenes::catalog(),
            seed: None,
            star_count: STAR_COUNT,
            toast_secs: TOAST_SECS,
            exit_secs: SCENE_EXIT_SECS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NavRequest {
    Advance,
    Restart,
    Jump(usize),
}

/// Cross-fade in progress between two scenes.
#[derive(Clone, Debug, PartialEq)]
pub struct Fade {
    pub transition: Transition,
    pub started_at: f64,
    /// Last view of the outgoing scene, for the exit animation.
    pub exiting: Option<SceneView>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionView {
    pub from: usize,
    pub to: usize,
    /// 0 at the start of the exit fade, 1 when the next scene mounts.
    pub progress: f32,
}

/// Shared state scenes reach through [`SceneContext`].
pub struct StageCore {
    pub(crate) defaults: AmbientDefaults,
    pub(crate) ambient: AmbientVisualState,
    pub(crate) backdrop: Backdrop,
    pub(crate) bursts: BurstManager,
    pub(crate) warp: WarpDirector,
    pub(crate) tweens: Tweens,
    pub(crate) scheduler: Scheduler,
    pub(crate) sequencer: SceneSequencer,
    pub(crate) generation: Generation,
    pub(crate) clock: f64,
    pub(crate) rng: StdRng,
    pending_nav: Option<NavRequest>,
    toast: Option<String>,
    toast_timer: Option<TimerId>,
    toast_secs: f64,
    exit_secs: f64,
    fade: Option<Fade>,
    dropped_stale: usize,
}

impl StageCore {
    pub(crate) fn trigger_warp(&mut self, peak: f32, ramp_in: f32, hold: f32, ramp_out: f32) {
        let current = self.ambient.warp_target;
        self.warp.trigger(self.clock, current, peak, ramp_in, hold, ramp_out);
    }

    pub(crate) fn trigger_burst(&mut self, x: f32, y: f32, intensity: f32) -> BurstId {
        self.bursts.trigger(self.clock, x, y, intensity, &mut self.rng)
    }

    pub(crate) fn notify(&mut self, text: String) {
        if let Some(id) = self.toast_timer.take() {
            self.scheduler.cancel(id);
        }
        log::debug!("[stage] toast {text:?}");
        self.toast = Some(text);
        self.toast_timer = Some(
            self.scheduler
                .set_timeout(self.clock, self.toast_secs, Owner::Stage, TimerKey::new(TIMER_TOAST)),
        );
    }

    /// First request in a callback wins.
    pub(crate) fn request_nav(&mut self, nav: NavRequest) {
        if self.pending_nav.is_none() {
            self.pending_nav = Some(nav);
        }
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), StageError> {
        let len = self.sequencer.len();
        if index >= len {
            log::warn!("[stage] jump to {index} rejected, {len} scenes");
            return Err(StageError::SceneIndexOutOfRange { index, len });
        }
        Ok(())
    }
}

pub struct Stage {
    core: StageCore,
    scenes: Vec<SceneEntry>,
    active: Option<Box<dyn Scene>>,
}

impl Stage {
    /// Build the stage and mount the first scene. The first mount does not
    /// burst.
    pub fn new(config: StageConfig) -> Result<Self, StageError> {
        let sequencer = SceneSequencer::new(config.scenes.len())?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ambient = AmbientVisualState::new(&config.ambient);
        let backdrop = Backdrop::new(&ambient, config.star_count, &mut rng);
        let mut stage = Self {
            core: StageCore {
                defaults: config.ambient,
                ambient,
                backdrop,
                bursts: BurstManager::new(),
                warp: WarpDirector::new(),
                tweens: Tweens::new(),
                scheduler: Scheduler::new(),
                sequencer,
                generation: Generation::default(),
                clock: 0.0,
                rng,
                pending_nav: None,
                toast: None,
                toast_timer: None,
                toast_secs: config.toast_secs,
                exit_secs: config.exit_secs,
                fade: None,
                dropped_stale: 0,
            },
            scenes: config.scenes,
            active: None,
        };
        stage.core.generation = stage.core.generation.next();
        stage.mount(0);
        Ok(stage)
    }

    /// Advance the stage clock by `dt` seconds and run one frame.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.core.clock += dt as f64;
        self.core.scheduler.begin_frame();

        self.dispatch_timers();

        let now = self.core.clock;
        let generation = self.core.generation;
        self.core.dropped_stale += self.core.tweens.drop_stale(generation);
        self.core.tweens.apply(now, &mut self.core.ambient);
        self.core.warp.update(now, &mut self.core.ambient.warp_target);

        if let Some(scene) = self.active.as_mut() {
            scene.update(&mut SceneContext::new(&mut self.core), dt);
        }
        self.apply_pending_nav();

        let core = &mut self.core;
        core.backdrop.update(&mut core.ambient, dt, &mut core.rng);
        core.bursts.update(core.clock, dt);
    }

    fn dispatch_timers(&mut self) {
        while let Some(due) = self.core.scheduler.pop_due(self.core.clock) {
            match due.owner {
                Owner::Stage => self.on_stage_timer(due.id, due.key),
                Owner::Scene(g) if g == self.core.generation => {
                    if let Some(scene) = self.active.as_mut() {
                        scene.on_timer(&mut SceneContext::new(&mut self.core), due.key);
                    }
                    self.apply_pending_nav();
                }
                Owner::Scene(g) => {
                    self.core.scheduler.cancel(due.id);
                    self.core.dropped_stale += 1;
                    log::debug!("[stage] dropped stale timer from generation {}", g.0);
                }
            }
        }
    }

    fn on_stage_timer(&mut self, id: TimerId, key: TimerKey) {
        match key.tag {
            TIMER_TOAST if self.core.toast_timer == Some(id) => {
                self.core.toast = None;
                self.core.toast_timer = None;
            }
            TIMER_MOUNT => self.mount(key.arg as usize),
            _ => {}
        }
    }

    fn mount(&mut self, index: usize) {
        let Some(entry) = self.scenes.get(index).copied() else {
            log::warn!("[stage] no scene at index {index}");
            return;
        };
        self.core.fade = None;
        let mut scene = (entry.build)();
        log::info!("[scene] mount {} ({index}) generation {}", entry.name, self.core.generation.0);
        scene.activate(&mut SceneContext::new(&mut self.core));
        self.active = Some(scene);
        self.apply_pending_nav();
    }

    fn apply_pending_nav(&mut self) {
        let Some(nav) = self.core.pending_nav.take() else {
            return;
        };
        match nav {
            NavRequest::Advance => self.advance(),
            NavRequest::Restart => self.restart(),
            NavRequest::Jump(i) => {
                // validated when requested
                _ = self.jump(i);
            }
        }
    }

    fn unmount(&mut self) -> Option<SceneView> {
        let mut scene = self.active.take()?;
        let view = scene.view();
        scene.deactivate(&mut SceneContext::new(&mut self.core));
        let owner = Owner::Scene(self.core.generation);
        let timers = self.core.scheduler.cancel_owned(owner);
        let tweens = self.core.tweens.kill_owned(owner);
        log::debug!("[scene] unmount {} cancelled {timers} timers, {tweens} tweens", scene.name());
        Some(view)
    }

    fn begin_transition(&mut self, transition: Transition) {
        let exiting = self.unmount();
        self.core.pending_nav = None;
        self.core.scheduler.cancel_tagged(Owner::Stage, TIMER_MOUNT);
        self.core.generation = self.core.generation.next();

        let [cx, cy] = SCREEN_CENTER;
        if transition.cause == TransitionCause::Restart {
            let core = &mut self.core;
            core.ambient.reset(&core.defaults);
            core.backdrop.reset(&core.ambient);
            core.warp.cancel();
            core.tweens.clear();
            core.trigger_burst(cx, cy, RESTART_BURST_INTENSITY);
            log::info!("[stage] restart from scene {}", transition.from);
        }
        if transition.index_changed() {
            self.core.trigger_burst(cx, cy, TRANSITION_BURST_INTENSITY);
            log::info!("[stage] scene {} -> {}", transition.from, transition.to);
        }

        if self.core.exit_secs <= 0.0 {
            self.mount(transition.to);
            return;
        }
        self.core.fade = Some(Fade {
            transition,
            started_at: self.core.clock,
            exiting,
        });
        self.core.scheduler.set_timeout(
            self.core.clock,
            self.core.exit_secs,
            Owner::Stage,
            TimerKey::with_arg(TIMER_MOUNT, transition.to as u64),
        );
    }

    /// Saturating; a no-op at the last scene.
    pub fn advance(&mut self) {
        if let Some(t) = self.core.sequencer.advance() {
            self.begin_transition(t);
        }
    }

    /// Back to scene 0 with the ambient state reset to its defaults. Active
    /// bursts are kept.
    pub fn restart(&mut self) {
        let t = self.core.sequencer.restart();
        self.begin_transition(t);
    }

    pub fn jump(&mut self, index: usize) -> Result<(), StageError> {
        self.core.check_index(index)?;
        if let Some(t) = self.core.sequencer.jump(index)? {
            self.begin_transition(t);
        }
        Ok(())
    }

    /// Route input to the active scene; ignored during a cross-fade.
    pub fn input(&mut self, input: SceneInput) {
        if let Some(scene) = self.active.as_mut() {
            scene.on_input(&mut SceneContext::new(&mut self.core), input);
        }
        self.apply_pending_nav();
    }

    pub fn set_backdrop_preset(&mut self, preset: BackdropPreset) {
        self.core.ambient.set_backdrop_preset(preset);
    }

    pub fn set_glow_objects(&mut self, update: &GlowObjectsUpdate) {
        self.core.ambient.set_glow_objects(update);
    }

    pub fn trigger_warp(&mut self, peak: f32, ramp_in: f32, hold: f32, ramp_out: f32) {
        self.core.trigger_warp(peak, ramp_in, hold, ramp_out);
    }

    pub fn trigger_burst(&mut self, x: f32, y: f32, intensity: f32) -> BurstId {
        self.core.trigger_burst(x, y, intensity)
    }

    pub fn remove_burst(&mut self, id: BurstId) -> bool {
        self.core.bursts.remove(id)
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.core.notify(text.into());
    }

    pub fn current_index(&self) -> usize {
        self.core.sequencer.current()
    }

    pub fn scene_count(&self) -> usize {
        self.core.sequencer.len()
    }

    pub fn scene_name(&self, index: usize) -> Option<&'static str> {
        self.scenes.get(index).map(|e| e.name)
    }

    pub fn active_scene(&self) -> Option<&'static str> {
        self.active.as_ref().map(|s| s.name())
    }

    pub fn view(&self) -> Option<SceneView> {
        self.active.as_ref().map(|s| s.view())
    }

    pub fn fade(&self) -> Option<&Fade> {
        self.core.fade.as_ref()
    }

    pub fn transition(&self) -> Option<TransitionView> {
        let fade = self.core.fade.as_ref()?;
        let progress = if self.core.exit_secs > 0.0 {
            ((self.core.clock - fade.started_at) / self.core.exit_secs).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };
        Some(TransitionView {
            from: fade.transition.from,
            to: fade.transition.to,
            progress,
        })
    }

    pub fn toast(&self) -> Option<&str> {
        self.core.toast.as_deref()
    }

    pub fn now(&self) -> f64 {
        self.core.clock
    }

    pub fn generation(&self) -> Generation {
        self.core.generation
    }

    pub fn ambient(&self) -> &AmbientVisualState {
        &self.core.ambient
    }

    pub fn defaults(&self) -> &AmbientDefaults {
        &self.core.defaults
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.core.backdrop
    }

    pub fn bursts(&self) -> &BurstManager {
        &self.core.bursts
    }

    pub fn warp(&self) -> &WarpDirector {
        &self.core.warp
    }

    pub fn tweens(&self) -> &Tweens {
        &self.core.tweens
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.core.scheduler
    }

    /// Direct scheduler access, for stage-level tooling and tests.
    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.core.scheduler
    }

    /// Timers still pending for the mounted scene's generation.
    pub fn scene_timers_pending(&self) -> usize {
        self.core
            .scheduler
            .pending_for(Owner::Scene(self.core.generation))
    }

    /// Deferred callbacks discarded because their generation was stale.
    pub fn dropped_stale(&self) -> usize {
        self.core.dropped_stale
    }
}
