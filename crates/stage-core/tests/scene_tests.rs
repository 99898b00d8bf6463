// Playing each interactive scene through the stage, the way the front end
// drives it: tick, read the view, send input.

use stage_core::*;

const FRAME: f32 = 1.0 / 60.0;

fn stage_at(index: usize) -> Stage {
    let mut stage = Stage::new(StageConfig {
        seed: Some(21),
        star_count: 32,
        ..Default::default()
    })
    .unwrap();
    stage.jump(index).unwrap();
    run(&mut stage, 1.0);
    stage
}

fn run(stage: &mut Stage, secs: f32) {
    let frames = (secs / FRAME).ceil() as usize;
    for _ in 0..frames {
        stage.tick(FRAME);
    }
}

fn view(stage: &Stage) -> SceneView {
    stage.view().expect("a mounted scene")
}

fn press(stage: &mut Stage, action: SceneAction) {
    stage.input(SceneInput::Action(action));
}

/// Tick until `done` holds or `limit` seconds pass; returns whether it held.
fn play(stage: &mut Stage, limit: f32, mut step: impl FnMut(&mut Stage) -> bool) -> bool {
    let frames = (limit / FRAME) as usize;
    for _ in 0..frames {
        stage.tick(FRAME);
        if step(stage) {
            return true;
        }
    }
    false
}

#[test]
fn memory_match_solves_and_advances() {
    let mut stage = stage_at(1);
    assert_eq!(stage.active_scene(), Some("memory-match"));
    assert_eq!(view(&stage).cells.len(), 12);

    let mut known: Vec<Option<String>> = vec![None; 12];
    let flip = |stage: &mut Stage, i: usize| -> String {
        stage.input(SceneInput::Cell(i));
        view(stage).cells[i].glyph.clone()
    };

    for _ in 0..40 {
        let cells = view(&stage).cells;
        if cells.iter().all(|c| c.lit) {
            break;
        }
        let Some(a) = (0..12).find(|&i| !cells[i].lit && known[i].is_none()) else {
            // every card seen: pair up the known ones
            let a = (0..12).find(|&i| !cells[i].lit).unwrap();
            let b = (0..12)
                .find(|&j| j != a && !cells[j].lit && known[j] == known[a])
                .unwrap();
            flip(&mut stage, a);
            flip(&mut stage, b);
            continue;
        };
        let g = flip(&mut stage, a);
        known[a] = Some(g.clone());
        if let Some(b) = (0..12).find(|&j| j != a && !cells[j].lit && known[j].as_deref() == Some(&g)) {
            flip(&mut stage, b);
            continue;
        }
        let c = (0..12).find(|&j| j != a && !cells[j].lit && known[j].is_none()).unwrap();
        let h = flip(&mut stage, c);
        known[c] = Some(h.clone());
        if h != g {
            // mismatch locks the board for 0.7 s
            assert!(view(&stage).cells.iter().all(|c| c.disabled));
            run(&mut stage, 0.8);
        }
    }
    assert_eq!(view(&stage).progress, Some((6, 6)));

    run(&mut stage, 0.7);
    assert!(stage.warp().is_active());
    assert_eq!(view(&stage).title, "Every piece fits perfectly");
    press(&mut stage, SceneAction::Continue);
    assert_eq!(stage.current_index(), 2);
}

#[test]
fn heart_pop_completes_by_tapping_hearts() {
    let mut stage = stage_at(2);
    assert_eq!(stage.active_scene(), Some("heart-pop"));

    let done = play(&mut stage, 90.0, |stage| {
        let v = view(stage);
        if v.title == "You make my heart burst" {
            return true;
        }
        if let Some(s) = v.sprites.iter().find(|s| s.glyph == "❤") {
            stage.input(SceneInput::Sprite(s.id));
        }
        false
    });
    assert!(done);
    let v = view(&stage);
    assert_eq!(v.actions[0].label, "MORE LOVE →");
    press(&mut stage, SceneAction::Continue);
    press(&mut stage, SceneAction::Continue);
    assert_eq!(stage.current_index(), 3);
}

#[test]
fn decoys_cost_a_point() {
    let mut stage = stage_at(2);
    let mut hits = 0;
    let mut decoy_hit = false;
    play(&mut stage, 60.0, |stage| {
        let v = view(stage);
        let score = v.progress.map_or(0, |p| p.0);
        if hits < 3 {
            if let Some(s) = v.sprites.iter().find(|s| s.glyph == "❤") {
                stage.input(SceneInput::Sprite(s.id));
                hits += 1;
            }
            return false;
        }
        if let Some(s) = v.sprites.iter().find(|s| s.glyph == "💔") {
            stage.input(SceneInput::Sprite(s.id));
            let after = view(stage);
            assert_eq!(after.progress.map(|p| p.0), Some(score - 1));
            assert!(after.caption.is_some());
            decoy_hit = true;
            return true;
        }
        false
    });
    assert!(decoy_hit);
}

#[test]
fn fireworks_burst_where_tapped() {
    let mut stage = stage_at(3);
    assert_eq!(view(&stage).input, InputMode::Tap);
    let before = stage.bursts().len();
    for i in 0..6 {
        let x = 20.0 + 10.0 * i as f32;
        stage.input(SceneInput::Tap { x, y: 30.0 });
        let last = stage.bursts().active().last().unwrap();
        assert_eq!((last.x, last.y), (x, 30.0));
    }
    assert_eq!(stage.bursts().len(), before + 6);
    // extra taps after the sixth do nothing
    stage.input(SceneInput::Tap { x: 50.0, y: 50.0 });
    assert_eq!(stage.bursts().len(), before + 6);

    run(&mut stage, 1.0);
    assert_eq!(view(&stage).title, "You light up my world");
    press(&mut stage, SceneAction::Continue);
    assert_eq!(stage.current_index(), 4);
}

#[test]
fn bubble_pops_when_overfilled_and_scores_in_the_zone() {
    let mut stage = stage_at(4);
    assert_eq!(view(&stage).input, InputMode::Hold);

    stage.input(SceneInput::PressStart { x: 50.0, y: 50.0 });
    run(&mut stage, 1.2);
    assert_eq!(view(&stage).caption.as_deref(), Some("pop! too much air"));
    stage.input(SceneInput::PressEnd);
    assert_eq!(view(&stage).progress, Some((0, 5)));

    stage.input(SceneInput::PressStart { x: 50.0, y: 50.0 });
    run(&mut stage, 0.1);
    stage.input(SceneInput::PressEnd);
    assert_eq!(view(&stage).caption.as_deref(), Some("too small!"));

    for round in 1..=5 {
        stage.input(SceneInput::PressStart { x: 50.0, y: 50.0 });
        run(&mut stage, 0.5);
        stage.input(SceneInput::PressEnd);
        if round < 5 {
            assert_eq!(view(&stage).progress, Some((round, 5)));
        }
    }
    run(&mut stage, 1.3);
    assert_eq!(view(&stage).actions[0].action, SceneAction::Continue);
    press(&mut stage, SceneAction::Continue);
    assert_eq!(stage.current_index(), 5);
}

#[test]
fn heartbeat_reveals_words_then_flatlines() {
    let mut stage = stage_at(5);
    assert_eq!(stage.ambient().target_star_speed, 0.0);
    run(&mut stage, 3.8);
    assert_eq!(view(&stage).title, "");
    run(&mut stage, 1.0);
    assert!(view(&stage).title.starts_with("This is"));
    // continue is not offered before the closing line
    press(&mut stage, SceneAction::Continue);
    run(&mut stage, 3.0);
    assert_eq!(stage.current_index(), 5);

    run(&mut stage, 4.0);
    let v = view(&stage);
    assert_eq!(v.title, "This is what you do to me.");
    assert_eq!(v.lines, vec!["Every. Single. Time.".to_string()]);

    press(&mut stage, SceneAction::Continue);
    run(&mut stage, 2.0);
    assert_eq!(stage.current_index(), 5);
    run(&mut stage, 0.5);
    assert_eq!(stage.current_index(), 6);
}

#[test]
fn whack_heart_completes_by_tapping_hearts() {
    let mut stage = stage_at(6);
    let v = view(&stage);
    assert_eq!(v.grid_columns, 3);
    assert_eq!(v.cells.len(), 9);

    let done = play(&mut stage, 90.0, |stage| {
        let v = view(stage);
        if v.title == "You got fast hands" {
            return true;
        }
        if let Some(i) = v.cells.iter().position(|c| c.glyph == "❤") {
            stage.input(SceneInput::Cell(i));
        }
        false
    });
    assert!(done);
    press(&mut stage, SceneAction::Continue);
    assert_eq!(stage.current_index(), 7);
    run(&mut stage, 1.0);
    assert_eq!(stage.active_scene(), Some("love-lock"));
}

#[test]
fn tapping_a_lit_cell_scores_and_bursts_there() {
    let mut stage = stage_at(6);
    let mut lit = None;
    let found = play(&mut stage, 10.0, |stage| {
        lit = view(stage).cells.iter().position(|c| c.glyph == "❤");
        lit.is_some()
    });
    assert!(found);
    let i = lit.unwrap();

    let before = view(&stage);
    let score = before.progress.unwrap().0;
    let bursts = stage.bursts().len();
    if let Some(empty) = before.cells.iter().position(|c| !c.lit) {
        stage.input(SceneInput::Cell(empty));
        assert_eq!(view(&stage).progress.unwrap().0, score);
        assert_eq!(stage.bursts().len(), bursts);
    }

    stage.input(SceneInput::Cell(i));
    let after = view(&stage);
    assert_eq!(after.progress.unwrap().0, score + 1);
    assert!(!after.cells[i].lit);
    assert_eq!(stage.bursts().len(), bursts + 1);
}

#[test]
fn love_lock_needs_a_minute_of_chasing() {
    let mut stage = stage_at(7);
    let mut caught_at = None;
    for tap in 0..40 {
        stage.input(SceneInput::Sprite(1));
        let v = view(&stage);
        if v.sprites.first().map(|s| s.glyph) == Some("🔒") {
            caught_at = Some(tap);
            break;
        }
        run(&mut stage, 2.0);
    }
    // first tap starts the clock, thirty 2 s gaps reach 60 s, the next catches
    assert_eq!(caught_at, Some(31));

    run(&mut stage, 2.5);
    let v = view(&stage);
    assert_eq!(v.title, "Forever locked in");
    assert!(v.sprites.is_empty());
    press(&mut stage, SceneAction::Continue);
    assert_eq!(stage.current_index(), 8);
}

#[test]
fn love_lock_resets_after_idling() {
    let mut stage = stage_at(7);
    for _ in 0..10 {
        stage.input(SceneInput::Sprite(1));
        run(&mut stage, 2.0);
    }
    let meter = view(&stage).meter.unwrap();
    assert!(meter > 0.25, "{meter}");
    run(&mut stage, 6.0);
    assert_eq!(view(&stage).meter, Some(0.0));
}

#[test]
fn orbit_release_resets_and_a_full_hold_merges() {
    let mut stage = stage_at(8);
    stage.input(SceneInput::PressStart { x: 50.0, y: 50.0 });
    run(&mut stage, 10.0);
    let meter = view(&stage).meter.unwrap();
    assert!(meter > 0.3 && meter < 0.36, "{meter}");
    stage.input(SceneInput::PressEnd);
    let v = view(&stage);
    assert_eq!(v.meter, Some(0.0));
    assert!(v.caption.is_some());

    stage.input(SceneInput::PressStart { x: 50.0, y: 50.0 });
    let bursts = stage.bursts().len();
    run(&mut stage, 31.0);
    assert_eq!(stage.bursts().len(), bursts + 1);
    run(&mut stage, 2.5);
    assert_eq!(view(&stage).title, "Better together");
    press(&mut stage, SceneAction::Continue);
    assert_eq!(stage.current_index(), 9);
}

#[test]
fn wish_blows_seeds_while_held() {
    let mut stage = stage_at(9);
    stage.input(SceneInput::PressStart { x: 50.0, y: 50.0 });
    assert_eq!(view(&stage).progress, Some((1, 24)));
    run(&mut stage, 0.5);
    assert_eq!(view(&stage).progress, Some((4, 24)));
    stage.input(SceneInput::PressEnd);
    run(&mut stage, 1.0);
    assert_eq!(view(&stage).progress, Some((4, 24)));

    stage.input(SceneInput::PressStart { x: 50.0, y: 50.0 });
    run(&mut stage, 3.0);
    assert_eq!(view(&stage).progress, Some((24, 24)));
    assert_eq!(stage.scene_timers_pending(), 1);
    run(&mut stage, 1.0);
    assert_eq!(view(&stage).title, "I already know mine came true.");
    press(&mut stage, SceneAction::Continue);
    assert_eq!(stage.current_index(), 10);
}
