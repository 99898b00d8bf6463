//! Tap-the-target / avoid-the-decoy engine shared by the arcade scenes.
//!
//! A game is fully described by a [`TapGameConfig`]; difficulty curves are
//! declarative [`Ramp`]s over the game's progress so scenes only differ in
//! numbers and copy.

use crate::error::StageError;
use crate::lifecycle::OneShot;
use crate::scene::{Caption, CellView, SceneContext, SceneView, SpriteView};
use crate::timers::{TimerId, TimerKey};
use rand::Rng;

// Timer tags reserved for the engine; host scenes use tags below 100.
pub const TAG_SPAWN: u32 = 100;
pub const TAG_HIDE: u32 = 101;
pub const TAG_CAPTION: u32 = 102;

pub const TARGET_GLYPH: &str = "❤";
pub const DECOY_GLYPH: &str = "💔";

/// Where targets appear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layout {
    /// Fixed cells; at most one target per cell.
    Grid { cells: usize, columns: u32 },
    /// Free field; targets rise from the bottom edge to the top over their
    /// lifetime.
    Field,
}

/// Snapshot the ramps are evaluated against.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Difficulty {
    /// Spawn rounds so far.
    pub round: u32,
    /// Targets tapped so far, decoys included.
    pub popped: u32,
    /// `score / goal`, in \[0, 1\].
    pub progress: f64,
}

/// `clamp(base + per_round*round + per_popped*popped + per_progress*progress, min, max)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ramp {
    pub base: f64,
    pub per_round: f64,
    pub per_popped: f64,
    pub per_progress: f64,
    pub min: f64,
    pub max: f64,
}

impl Ramp {
    pub const fn constant(v: f64) -> Self {
        Self {
            base: v,
            per_round: 0.0,
            per_popped: 0.0,
            per_progress: 0.0,
            min: f64::MIN,
            max: f64::MAX,
        }
    }

    pub const fn rounds(mut self, k: f64) -> Self {
        self.per_round = k;
        self
    }

    pub const fn popped(mut self, k: f64) -> Self {
        self.per_popped = k;
        self
    }

    pub const fn progress(mut self, k: f64) -> Self {
        self.per_progress = k;
        self
    }

    pub const fn at_least(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    pub const fn at_most(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    pub fn eval(&self, d: &Difficulty) -> f64 {
        let v = self.base
            + self.per_round * d.round as f64
            + self.per_popped * d.popped as f64
            + self.per_progress * d.progress;
        v.clamp(self.min, self.max)
    }
}

/// `max(floor, uniform(lo, hi) * scale)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub lo: Ramp,
    pub hi: Ramp,
    pub scale: Ramp,
    pub floor: f64,
}

impl Timing {
    pub const fn between(lo: Ramp, hi: Ramp) -> Self {
        Self {
            lo,
            hi,
            scale: Ramp::constant(1.0),
            floor: 0.0,
        }
    }

    pub const fn scaled(mut self, scale: Ramp) -> Self {
        self.scale = scale;
        self
    }

    pub const fn floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    pub fn sample<R: Rng + ?Sized>(&self, d: &Difficulty, rng: &mut R) -> f64 {
        let (lo, hi) = (self.lo.eval(d), self.hi.eval(d));
        let v = if hi > lo { rng.gen_range(lo..hi) } else { lo };
        (v * self.scale.eval(d)).max(self.floor)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TapGameConfig {
    pub layout: Layout,
    pub goal: u32,
    pub first_spawn_secs: f64,
    /// Grid: cap on simultaneous targets. Field: oldest targets are dropped
    /// beyond it.
    pub max_active: usize,
    pub decoy_chance: Ramp,
    /// Chance a spawn round adds two targets instead of one.
    pub dual_chance: Ramp,
    pub lifetime: Timing,
    pub gap: Timing,
    pub decoy_penalty: u32,
    /// Shown when a real target expires untapped; empty disables it.
    pub miss_taunts: &'static [&'static str],
    pub decoy_taunts: &'static [&'static str],
    pub caption_secs: f64,
    /// Re-arm the spawn loop immediately after a tap or a miss.
    pub nudge_on_event: bool,
}

impl TapGameConfig {
    pub fn validate(&self) -> Result<(), StageError> {
        if self.goal == 0 {
            return Err(StageError::InvalidGameConfig("goal must be positive"));
        }
        if self.max_active == 0 {
            return Err(StageError::InvalidGameConfig("max_active must be positive"));
        }
        if let Layout::Grid { cells, columns } = self.layout {
            if cells == 0 || columns == 0 {
                return Err(StageError::InvalidGameConfig("grid must have cells and columns"));
            }
            if self.max_active > cells {
                return Err(StageError::InvalidGameConfig("max_active exceeds grid cells"));
            }
        }
        if self.lifetime.lo.eval(&Difficulty::default()) <= 0.0 {
            return Err(StageError::InvalidGameConfig("target lifetime must be positive"));
        }
        if self.decoy_taunts.is_empty() {
            return Err(StageError::InvalidGameConfig("decoy taunts must not be empty"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub id: u64,
    pub cell: Option<usize>,
    pub x: f32,
    pub size: f32,
    pub decoy: bool,
    pub born_at: f64,
    pub lifetime: f64,
    hide_timer: TimerId,
}

impl Target {
    /// Vertical position in screen percent for field targets.
    pub fn y_at(&self, now: f64) -> f32 {
        let t = if self.lifetime > 0.0 {
            ((now - self.born_at) / self.lifetime).clamp(0.0, 1.0)
        } else {
            1.0
        };
        (110.0 - 120.0 * t) as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// Nothing there, or the game is over.
    Miss,
    Hit,
    Decoy,
    Completed,
}

pub struct TapGame {
    config: TapGameConfig,
    targets: Vec<Target>,
    score: u32,
    round: u32,
    popped: u32,
    next_id: u64,
    spawn_timer: Option<TimerId>,
    caption: Caption,
    completion: OneShot,
    clock: f64,
}

fn pick<R: Rng + ?Sized>(list: &'static [&'static str], rng: &mut R) -> Option<&'static str> {
    if list.is_empty() {
        None
    } else {
        Some(list[rng.gen_range(0..list.len())])
    }
}

impl TapGame {
    pub fn new(config: TapGameConfig) -> Result<Self, StageError> {
        config.validate()?;
        Ok(Self {
            config,
            targets: Vec::new(),
            score: 0,
            round: 0,
            popped: 0,
            next_id: 0,
            spawn_timer: None,
            caption: Caption::default(),
            completion: OneShot::new(),
            clock: 0.0,
        })
    }

    pub fn config(&self) -> &TapGameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn is_complete(&self) -> bool {
        self.completion.is_done()
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty {
            round: self.round,
            popped: self.popped,
            progress: (self.score as f64 / self.config.goal as f64).min(1.0),
        }
    }

    pub fn start(&mut self, ctx: &mut SceneContext) {
        self.clock = ctx.now();
        let delay = self.config.first_spawn_secs;
        self.schedule_spawn(ctx, Some(delay));
    }

    pub fn update(&mut self, ctx: &SceneContext) {
        self.clock = ctx.now();
    }

    fn schedule_spawn(&mut self, ctx: &mut SceneContext, delay: Option<f64>) {
        if !self.completion.is_idle() {
            return;
        }
        if let Some(id) = self.spawn_timer.take() {
            ctx.cancel_timer(id);
        }
        let d = self.difficulty();
        let delay = delay.unwrap_or_else(|| self.config.gap.sample(&d, ctx.rng()));
        self.spawn_timer = Some(ctx.set_timeout(delay, TimerKey::new(TAG_SPAWN)));
    }

    fn free_cell<R: Rng + ?Sized>(&self, cells: usize, rng: &mut R) -> Option<usize> {
        let free: Vec<usize> = (0..cells)
            .filter(|c| !self.targets.iter().any(|t| t.cell == Some(*c)))
            .collect();
        if free.is_empty() {
            None
        } else {
            Some(free[rng.gen_range(0..free.len())])
        }
    }

    fn spawn_one(&mut self, ctx: &mut SceneContext) {
        let d = self.difficulty();
        let now = ctx.now();
        let cell = match self.config.layout {
            Layout::Grid { cells, .. } => match self.free_cell(cells, ctx.rng()) {
                Some(c) => Some(c),
                None => return,
            },
            Layout::Field => None,
        };
        let rng = ctx.rng();
        let decoy = rng.gen_bool(self.config.decoy_chance.eval(&d).clamp(0.0, 1.0));
        let lifetime = self.config.lifetime.sample(&d, rng);
        let x = rng.gen_range(6.0..94.0);
        let size = rng.gen_range(28.0..58.0);
        self.next_id += 1;
        let id = self.next_id;
        let hide_timer = ctx.set_timeout(lifetime, TimerKey::with_arg(TAG_HIDE, id));
        self.targets.push(Target {
            id,
            cell,
            x,
            size,
            decoy,
            born_at: now,
            lifetime,
            hide_timer,
        });
        if self.config.layout == Layout::Field && self.targets.len() > self.config.max_active {
            let dropped = self.targets.remove(0);
            ctx.cancel_timer(dropped.hide_timer);
        }
    }

    fn on_spawn(&mut self, ctx: &mut SceneContext) {
        self.spawn_timer = None;
        match self.config.layout {
            Layout::Grid { .. } => {
                let d = self.difficulty();
                let want = if ctx.rng().gen_bool(self.config.dual_chance.eval(&d).clamp(0.0, 1.0)) {
                    2
                } else {
                    1
                };
                let room = self.config.max_active.saturating_sub(self.targets.len());
                let count = want.min(room);
                if count > 0 {
                    self.round += 1;
                    for _ in 0..count {
                        self.spawn_one(ctx);
                    }
                }
            }
            Layout::Field => {
                self.round += 1;
                self.spawn_one(ctx);
            }
        }
        self.schedule_spawn(ctx, None);
    }

    fn on_hide(&mut self, ctx: &mut SceneContext, id: u64) {
        let Some(pos) = self.targets.iter().position(|t| t.id == id) else {
            return;
        };
        let target = self.targets.remove(pos);
        if !target.decoy {
            if let Some(text) = pick(self.config.miss_taunts, ctx.rng()) {
                self.caption.show(ctx, text, self.config.caption_secs, TAG_CAPTION);
            }
        }
        if self.config.nudge_on_event {
            self.schedule_spawn(ctx, None);
        }
    }

    /// Returns `true` if the key was the engine's.
    pub fn on_timer(&mut self, ctx: &mut SceneContext, key: TimerKey) -> bool {
        match key.tag {
            TAG_SPAWN => self.on_spawn(ctx),
            TAG_HIDE => self.on_hide(ctx, key.arg),
            TAG_CAPTION => self.caption.on_timer(),
            _ => return false,
        }
        true
    }

    pub fn tap_cell(&mut self, ctx: &mut SceneContext, cell: usize) -> TapOutcome {
        match self.targets.iter().find(|t| t.cell == Some(cell)) {
            Some(t) => {
                let id = t.id;
                self.tap_target(ctx, id)
            }
            None => TapOutcome::Miss,
        }
    }

    pub fn tap_target(&mut self, ctx: &mut SceneContext, id: u64) -> TapOutcome {
        if !self.completion.is_idle() {
            return TapOutcome::Miss;
        }
        let Some(pos) = self.targets.iter().position(|t| t.id == id) else {
            return TapOutcome::Miss;
        };
        let target = self.targets.remove(pos);
        ctx.cancel_timer(target.hide_timer);
        self.popped += 1;

        let outcome = if target.decoy {
            self.score = self.score.saturating_sub(self.config.decoy_penalty);
            if let Some(text) = pick(self.config.decoy_taunts, ctx.rng()) {
                self.caption.show(ctx, text, self.config.caption_secs, TAG_CAPTION);
            }
            TapOutcome::Decoy
        } else {
            self.score += 1;
            if self.score >= self.config.goal && self.completion.finish() {
                self.finish(ctx);
                return TapOutcome::Completed;
            }
            TapOutcome::Hit
        };
        if self.config.nudge_on_event {
            self.schedule_spawn(ctx, None);
        }
        outcome
    }

    fn finish(&mut self, ctx: &mut SceneContext) {
        self.spawn_timer = None;
        self.targets.clear();
        self.caption.on_timer();
        for tag in [TAG_SPAWN, TAG_HIDE, TAG_CAPTION] {
            ctx.cancel_timers(tag);
        }
        log::info!("[scene] tap game complete after {} taps", self.popped);
    }

    /// Fill the play area of `view`: grid cells or field sprites, the
    /// progress meter and the caption.
    pub fn render_into(&self, view: &mut SceneView) {
        view.progress = Some((self.score.min(self.config.goal), self.config.goal));
        view.meter = Some((self.score as f32 / self.config.goal as f32).min(1.0));
        view.caption = self.caption.get();
        match self.config.layout {
            Layout::Grid { cells, columns } => {
                view.grid_columns = columns;
                view.cells = (0..cells)
                    .map(|c| {
                        let t = self.targets.iter().find(|t| t.cell == Some(c));
                        CellView {
                            glyph: match t {
                                Some(t) if t.decoy => DECOY_GLYPH.to_string(),
                                Some(_) => TARGET_GLYPH.to_string(),
                                None => String::new(),
                            },
                            lit: t.is_some(),
                            disabled: self.is_complete(),
                        }
                    })
                    .collect();
            }
            Layout::Field => {
                view.sprites = self
                    .targets
                    .iter()
                    .map(|t| SpriteView {
                        id: t.id,
                        x: t.x,
                        y: t.y_at(self.clock),
                        size: t.size,
                        glyph: if t.decoy { DECOY_GLYPH } else { TARGET_GLYPH },
                    })
                    .collect();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramps_clamp() {
        let decoy = Ramp::constant(0.15).popped(0.012).at_most(0.35);
        let d = |popped| Difficulty {
            popped,
            ..Default::default()
        };
        assert!((decoy.eval(&d(0)) - 0.15).abs() < 1e-12);
        assert!((decoy.eval(&d(10)) - 0.27).abs() < 1e-12);
        assert_eq!(decoy.eval(&d(100)), 0.35);

        let dual = Ramp::constant(-0.81).progress(1.8).at_least(0.0).at_most(0.65);
        let p = |progress| Difficulty {
            progress,
            ..Default::default()
        };
        assert_eq!(dual.eval(&p(0.3)), 0.0);
        assert!((dual.eval(&p(0.5)) - 0.09).abs() < 1e-9);
        assert_eq!(dual.eval(&p(1.0)), 0.65);
    }

    #[test]
    fn timing_respects_floor() {
        use rand::{rngs::StdRng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(5);
        let gap = Timing::between(Ramp::constant(0.25), Ramp::constant(0.5))
            .scaled(Ramp::constant(1.0).popped(-0.028).at_least(0.45))
            .floor(0.15);
        let late = Difficulty {
            popped: 500,
            ..Default::default()
        };
        for _ in 0..100 {
            let v = gap.sample(&late, &mut rng);
            assert!((0.15..=0.5 * 0.45).contains(&v));
        }
    }

    #[test]
    fn target_rises_over_its_lifetime() {
        let t = Target {
            id: 1,
            cell: None,
            x: 50.0,
            size: 30.0,
            decoy: false,
            born_at: 2.0,
            lifetime: 4.0,
            hide_timer: TimerId(1),
        };
        assert_eq!(t.y_at(2.0), 110.0);
        assert_eq!(t.y_at(4.0), 50.0);
        assert_eq!(t.y_at(9.0), -10.0);
    }
}
