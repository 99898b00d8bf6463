// Stage navigation driven with a simulated clock.

use stage_core::*;

const FRAME: f32 = 1.0 / 60.0;

fn make_stage() -> Stage {
    Stage::new(StageConfig {
        seed: Some(7),
        star_count: 64,
        ..Default::default()
    })
    .unwrap()
}

fn run(stage: &mut Stage, secs: f32) {
    let frames = (secs / FRAME).ceil() as usize;
    for _ in 0..frames {
        stage.tick(FRAME);
    }
}

/// Asks for an advance and then a jump on every input.
#[derive(Default)]
struct Eager {
    taps: u32,
}

impl Scene for Eager {
    fn name(&self) -> &'static str {
        "eager"
    }

    fn activate(&mut self, ctx: &mut SceneContext) {
        ctx.set_backdrop_preset(BackdropPreset::speed(0.3));
    }

    fn on_input(&mut self, ctx: &mut SceneContext, _input: SceneInput) {
        self.taps += 1;
        ctx.advance();
        ctx.jump(2).unwrap();
    }

    fn view(&self) -> SceneView {
        SceneView::titled(format!("taps {}", self.taps))
    }
}

fn eager_stage(len: usize) -> Stage {
    fn build() -> Box<dyn Scene> {
        Box::new(Eager::default())
    }
    Stage::new(StageConfig {
        scenes: vec![SceneEntry { name: "eager", build }; len],
        seed: Some(1),
        star_count: 16,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn first_scene_mounts_without_a_burst() {
    let stage = make_stage();
    assert_eq!(stage.scene_count(), 11);
    assert_eq!(stage.current_index(), 0);
    assert_eq!(stage.active_scene(), Some("void"));
    assert!(stage.bursts().is_empty());
    assert!(stage.transition().is_none());
}

#[test]
fn advance_saturates_at_the_last_scene() {
    let mut stage = make_stage();
    for _ in 0..10 {
        stage.advance();
    }
    assert_eq!(stage.current_index(), 10);
    let bursts = stage.bursts().len();
    stage.advance();
    assert_eq!(stage.current_index(), 10);
    // no transition, no flourish
    assert_eq!(stage.bursts().len(), bursts);

    run(&mut stage, 1.0);
    assert_eq!(stage.active_scene(), Some("finale"));
}

#[test]
fn jump_out_of_range_is_rejected() {
    let mut stage = make_stage();
    let err = stage.jump(11).unwrap_err();
    assert_eq!(err, StageError::SceneIndexOutOfRange { index: 11, len: 11 });
    assert_eq!(stage.current_index(), 0);
    assert_eq!(stage.active_scene(), Some("void"));
}

#[test]
fn jump_to_current_index_is_a_no_op() {
    let mut stage = make_stage();
    let generation = stage.generation();
    stage.jump(0).unwrap();
    assert_eq!(stage.generation(), generation);
    assert!(stage.bursts().is_empty());
}

#[test]
fn cross_fade_mounts_after_the_exit_delay() {
    let mut stage = make_stage();
    stage.jump(3).unwrap();
    assert_eq!(stage.active_scene(), None);
    assert!(stage.view().is_none());
    let t = stage.transition().unwrap();
    assert_eq!((t.from, t.to), (0, 3));
    assert_eq!(t.progress, 0.0);

    run(&mut stage, 0.4);
    let mid = stage.transition().unwrap().progress;
    assert!(mid > 0.3 && mid < 0.7, "progress {mid}");
    // input during the fade goes nowhere
    stage.input(SceneInput::Tap { x: 50.0, y: 50.0 });
    assert_eq!(stage.current_index(), 3);

    run(&mut stage, 0.5);
    assert!(stage.transition().is_none());
    assert_eq!(stage.active_scene(), Some("fireworks"));
}

#[test]
fn transition_adds_one_centred_burst() {
    let mut stage = make_stage();
    stage.advance();
    let bursts = stage.bursts().active();
    assert_eq!(bursts.len(), 1);
    assert_eq!((bursts[0].x, bursts[0].y), (50.0, 50.0));
    assert_eq!(bursts[0].intensity, 1.0);
}

#[test]
fn restart_resets_ambient_and_keeps_bursts() {
    let mut stage = make_stage();
    stage.jump(2).unwrap();
    run(&mut stage, 1.5);
    stage.set_backdrop_preset(BackdropPreset::new(0.9, 0.8, 0x336699));
    stage.trigger_warp(12.0, 0.5, 0.5, 0.5);
    run(&mut stage, 0.5);
    assert_ne!(stage.ambient(), &AmbientVisualState::new(stage.defaults()));

    let kept = stage.trigger_burst(20.0, 20.0, 1.0);
    let before = stage.bursts().len();
    stage.restart();

    assert_eq!(stage.current_index(), 0);
    assert_eq!(stage.ambient(), &AmbientVisualState::new(stage.defaults()));
    assert!(!stage.warp().is_active());
    assert!(stage.tweens().is_empty());
    assert!(stage.bursts().contains(kept));
    // restart flourish plus the index-change flourish
    assert_eq!(stage.bursts().len(), before + 2);

    run(&mut stage, 1.0);
    assert_eq!(stage.active_scene(), Some("void"));
}

#[test]
fn restart_from_the_first_scene_remounts_it() {
    let mut stage = make_stage();
    let generation = stage.generation();
    stage.restart();
    assert!(stage.generation() > generation);
    assert_eq!(stage.bursts().len(), 1);
    run(&mut stage, 1.0);
    assert_eq!(stage.active_scene(), Some("void"));
}

#[test]
fn first_navigation_request_in_a_callback_wins() {
    let mut stage = eager_stage(4);
    stage.input(SceneInput::PressEnd);
    // advance, not the jump to 2 requested right after it
    assert_eq!(stage.current_index(), 1);
}

#[test]
fn zero_exit_delay_mounts_immediately() {
    fn build() -> Box<dyn Scene> {
        Box::new(Eager::default())
    }
    let mut stage = Stage::new(StageConfig {
        scenes: vec![SceneEntry { name: "eager", build }; 3],
        seed: Some(1),
        star_count: 16,
        exit_secs: 0.0,
        ..Default::default()
    })
    .unwrap();
    stage.advance();
    assert!(stage.transition().is_none());
    assert_eq!(stage.active_scene(), Some("eager"));
    assert_eq!(stage.view().unwrap().title, "taps 0");
}

#[test]
fn empty_scene_list_is_an_error() {
    let err = Stage::new(StageConfig {
        scenes: Vec::new(),
        ..Default::default()
    });
    assert!(matches!(err, Err(StageError::EmptySceneList)));
}

#[test]
fn notify_replaces_and_expires() {
    let mut stage = make_stage();
    stage.notify("first");
    run(&mut stage, 1.0);
    stage.notify("second");
    assert_eq!(stage.toast(), Some("second"));
    run(&mut stage, 2.0);
    // the first toast's timer no longer applies
    assert_eq!(stage.toast(), Some("second"));
    run(&mut stage, 0.6);
    assert_eq!(stage.toast(), None);
}
