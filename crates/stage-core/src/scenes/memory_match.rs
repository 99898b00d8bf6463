use super::{advance_once, grid_cell_center};
use crate::ambient::BackdropPreset;
use crate::lifecycle::OneShot;
use crate::scene::{Caption, CellView, Scene, SceneAction, SceneContext, SceneInput, SceneView};
use crate::timers::TimerKey;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

const SYMBOLS: [&str; 6] = ["💕", "🌹", "💌", "🦋", "✨", "🔮"];
const MATCH_MESSAGES: [&str; 6] = [
    "Perfect match!",
    "You found one!",
    "Made for each other!",
    "Like us!",
    "Soulmates!",
    "Written in the stars!",
];

const COLUMNS: usize = 4;
const ROWS: usize = 3;
const CARD_PITCH: [f32; 2] = [14.0, 16.0];

const UNFLIP: u32 = 1;
const FINALE: u32 = 2;
const CAPTION: u32 = 3;

#[derive(Default)]
pub struct MemoryMatch {
    /// Pair index per card.
    deck: Vec<usize>,
    flipped: SmallVec<[usize; 2]>,
    matched: [bool; 6],
    locked: bool,
    matches: usize,
    caption: Caption,
    finale: OneShot,
    leaving: OneShot,
}

impl MemoryMatch {
    fn all_matched(&self) -> bool {
        self.matched.iter().all(|m| *m)
    }

    fn flip(&mut self, ctx: &mut SceneContext, card: usize) {
        if self.locked || !self.finale.is_idle() || card >= self.deck.len() {
            return;
        }
        if self.flipped.contains(&card) || self.matched[self.deck[card]] {
            return;
        }
        self.flipped.push(card);
        if self.flipped.len() < 2 {
            return;
        }
        let (a, b) = (self.flipped[0], self.flipped[1]);
        if self.deck[a] != self.deck[b] {
            self.locked = true;
            ctx.set_timeout(0.7, TimerKey::new(UNFLIP));
            return;
        }

        self.matched[self.deck[a]] = true;
        self.flipped.clear();
        self.matches += 1;
        for card in [a, b] {
            let (x, y) = grid_cell_center(card, COLUMNS, ROWS, CARD_PITCH);
            ctx.trigger_burst(x, y, 0.8);
        }
        let msg = MATCH_MESSAGES.get(self.matches - 1).copied().unwrap_or("Amazing!");
        self.caption.show(ctx, msg, 1.2, CAPTION);
        if self.all_matched() && self.finale.begin() {
            ctx.set_timeout(0.6, TimerKey::new(FINALE));
        }
    }
}

impl Scene for MemoryMatch {
    fn name(&self) -> &'static str {
        "memory-match"
    }

    fn activate(&mut self, ctx: &mut SceneContext) {
        ctx.configure_backdrop(BackdropPreset::new(0.3, 0.5, 0xd8b4fe));
        self.deck = (0..SYMBOLS.len()).flat_map(|p| [p, p]).collect();
        self.deck.shuffle(ctx.rng());
    }

    fn on_timer(&mut self, ctx: &mut SceneContext, key: TimerKey) {
        match key.tag {
            UNFLIP => {
                self.flipped.clear();
                self.locked = false;
            }
            FINALE => {
                ctx.trigger_warp(18.0, 1.2, 0.6, 1.5);
                ctx.trigger_burst(50.0, 50.0, 1.5);
                self.finale.complete();
            }
            CAPTION => self.caption.on_timer(),
            _ => {}
        }
    }

    fn on_input(&mut self, ctx: &mut SceneContext, input: SceneInput) {
        match input {
            SceneInput::Cell(card) => self.flip(ctx, card),
            SceneInput::Action(SceneAction::Continue) if self.finale.is_done() => {
                if self.leaving.is_idle() {
                    ctx.trigger_burst(50.0, 50.0, 1.2);
                }
                advance_once(&mut self.leaving, ctx);
            }
            _ => {}
        }
    }

    fn view(&self) -> SceneView {
        if self.finale.is_done() {
            return SceneView::titled("Every piece fits perfectly")
                .line("Just like us.")
                .action(SceneAction::Continue, "tap to continue");
        }
        let mut view = SceneView::titled("Match the Hearts").hint("find all the pairs");
        view.caption = self.caption.get();
        view.progress = Some((self.matches as u32, SYMBOLS.len() as u32));
        view.grid_columns = COLUMNS as u32;
        view.cells = self
            .deck
            .iter()
            .enumerate()
            .map(|(i, &pair)| {
                let face_up = self.matched[pair] || self.flipped.contains(&i);
                CellView {
                    glyph: if face_up { SYMBOLS[pair].to_string() } else { String::new() },
                    lit: self.matched[pair],
                    disabled: self.locked || self.matched[pair],
                }
            })
            .collect();
        view
    }
}
