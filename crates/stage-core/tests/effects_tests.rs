// Bursts, warp and backdrop smoothing through the stage tick.

use stage_core::smoothing::frames_to_converge;
use stage_core::*;

const FRAME: f32 = 1.0 / 60.0;

/// Leaves the backdrop alone.
#[derive(Default)]
struct Blank;

impl Scene for Blank {
    fn name(&self) -> &'static str {
        "blank"
    }

    fn activate(&mut self, _ctx: &mut SceneContext) {}

    fn view(&self) -> SceneView {
        SceneView::default()
    }
}

fn blank_stage() -> Stage {
    fn build() -> Box<dyn Scene> {
        Box::new(Blank)
    }
    Stage::new(StageConfig {
        scenes: vec![SceneEntry { name: "blank", build }; 2],
        seed: Some(3),
        star_count: 32,
        ..Default::default()
    })
    .unwrap()
}

fn frames(stage: &mut Stage, n: usize) {
    for _ in 0..n {
        stage.tick(FRAME);
    }
}

#[test]
fn burst_lives_for_its_lifetime() {
    let mut stage = blank_stage();
    let id = stage.trigger_burst(50.0, 50.0, 1.0);
    assert_eq!(stage.bursts().len(), 1);
    assert!(!stage.bursts().active()[0].particles.is_empty());

    frames(&mut stage, 191); // just short of 3.2 s
    assert!(stage.bursts().contains(id));
    frames(&mut stage, 1); // 3.2 s
    assert!(!stage.bursts().contains(id));
    assert!(stage.bursts().is_empty());
}

#[test]
fn configured_tint_is_linear_and_survives_restart() {
    let mut config = StageConfig {
        seed: Some(3),
        star_count: 32,
        ..Default::default()
    };
    config.ambient.tint = "#ffb3c6".parse().unwrap();
    assert!("#ffb3c".parse::<Color>().is_err());
    let mut stage = Stage::new(config).unwrap();

    let tint = stage.ambient().target_tint;
    assert!((tint.r - 1.0).abs() < 1e-6);
    assert!((tint.g - 0.451).abs() < 1e-3);

    stage.set_backdrop_preset(BackdropPreset::new(1.0, 0.5, 0x2040ff));
    frames(&mut stage, 30);
    assert_ne!(stage.ambient().target_tint, tint);
    stage.restart();
    assert_eq!(stage.ambient().target_tint, tint);
    assert_eq!(stage.backdrop().star_look(stage.ambient()).tint, tint);
}

#[test]
fn removing_a_burst_twice_is_harmless() {
    let mut stage = blank_stage();
    let a = stage.trigger_burst(30.0, 40.0, 0.8);
    let b = stage.trigger_burst(60.0, 40.0, 0.8);
    assert_ne!(a, b);
    assert!(stage.remove_burst(a));
    assert!(!stage.remove_burst(a));
    assert!(stage.bursts().contains(b));
    assert_eq!(stage.bursts().len(), 1);
}

#[test]
fn overlapping_bursts_expire_independently() {
    let mut stage = blank_stage();
    let first = stage.trigger_burst(50.0, 50.0, 1.0);
    frames(&mut stage, 60);
    let second = stage.trigger_burst(50.0, 50.0, 1.0);
    frames(&mut stage, 150); // first is 3.5 s old, second 2.5 s
    assert!(!stage.bursts().contains(first));
    assert!(stage.bursts().contains(second));
}

#[test]
fn star_speed_eases_toward_a_new_preset() {
    let mut stage = blank_stage();
    let start = stage.ambient().current_star_speed;
    stage.set_backdrop_preset(BackdropPreset::speed(0.9));
    assert_eq!(stage.ambient().target_star_speed, 0.9);
    // no jump on the frame the preset lands
    assert_eq!(stage.ambient().current_star_speed, start);

    let gap = 0.9 - start;
    let epsilon = 0.9 * 0.01;
    let needed = frames_to_converge(gap, epsilon, FRAME, 2.2).unwrap();
    assert!(needed > 60, "converges in {needed} frames");

    frames(&mut stage, 60);
    let after_second = stage.ambient().current_star_speed;
    assert!(after_second > 0.8 && after_second < 0.9, "{after_second}");

    frames(&mut stage, needed as usize - 60);
    let v = stage.ambient().current_star_speed;
    assert!((v - 0.9).abs() <= epsilon, "{v}");
    assert!(v <= 0.9);
}

#[test]
fn warp_follows_its_schedule() {
    let mut stage = blank_stage();
    let t0 = stage.now();
    stage.trigger_warp(15.0, 2.0, 1.0, 1.2);
    let tl = *stage.warp().timeline().unwrap();
    assert_eq!(tl.value_at(t0), 0.0);
    assert!((tl.value_at(t0 + 1.0) - 7.5).abs() < 1e-3);
    assert!((tl.value_at(t0 + 2.0) - 15.0).abs() < 1e-3);
    assert!((tl.value_at(t0 + 3.0) - 15.0).abs() < 1e-3);
    assert!(tl.value_at(t0 + 4.2).abs() < 1e-3);

    frames(&mut stage, 60);
    let expected = tl.value_at(stage.now());
    assert!((stage.ambient().warp_target - expected).abs() < 1e-4);
    // the smoothed value lags behind the target
    assert!(stage.ambient().warp_value < stage.ambient().warp_target);

    frames(&mut stage, 200);
    assert!(!stage.warp().is_active());
    assert_eq!(stage.ambient().warp_target, 0.0);
}

#[test]
fn new_warp_preempts_from_the_current_target() {
    let mut stage = blank_stage();
    stage.trigger_warp(15.0, 2.0, 1.0, 1.2);
    frames(&mut stage, 90);
    let current = stage.ambient().warp_target;
    assert!(current > 7.5 && current < 15.0, "{current}");

    stage.trigger_warp(20.0, 1.0, 0.0, 1.0);
    let tl = stage.warp().timeline().unwrap();
    assert_eq!(tl.start_value, current);
    assert_eq!(tl.peak, 20.0);

    frames(&mut stage, 130);
    assert!(!stage.warp().is_active());
    assert_eq!(stage.ambient().warp_target, 0.0);
}

#[test]
fn glow_and_bloom_follow_the_ambient_state() {
    let mut stage = blank_stage();
    stage.set_glow_objects(
        &GlowObjectsUpdate::default()
            .primary(GlowUpdate::shown().scale(0.8))
            .bloom(1.0),
    );
    assert!(stage.backdrop().glow_instances().is_empty());
    frames(&mut stage, 1);
    assert_eq!(stage.backdrop().glow_instances().len(), 1);
    // bloom eases per frame
    assert!((stage.backdrop().bloom_strength() - 0.08).abs() < 1e-6);
    frames(&mut stage, 120);
    assert!(stage.backdrop().bloom_strength() > 0.99);

    stage.set_glow_objects(&GlowObjectsUpdate::hide_all());
    frames(&mut stage, 1);
    assert!(stage.backdrop().glow_instances().is_empty());
}

#[test]
fn spark_instances_cover_live_particles() {
    let mut stage = blank_stage();
    stage.trigger_burst(50.0, 50.0, 1.0);
    frames(&mut stage, 1);
    let sparks = Backdrop::spark_instances(stage.bursts());
    assert_eq!(sparks.len(), stage.bursts().particles().count());
    assert!(!sparks.is_empty());
    assert_eq!(stage.backdrop().star_instances().len(), 32);
}
