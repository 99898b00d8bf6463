// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;
use stage_core::{InputMode, SceneAction, SceneInput};

#[test]
fn percent_maps_the_box_corners() {
    assert_eq!(percent_in_rect(0.0, 0.0, 800.0, 600.0), [0.0, 0.0]);
    assert_eq!(percent_in_rect(400.0, 150.0, 800.0, 600.0), [50.0, 25.0]);
    assert_eq!(percent_in_rect(800.0, 600.0, 800.0, 600.0), [100.0, 100.0]);
}

#[test]
fn percent_clamps_outside_the_box() {
    assert_eq!(percent_in_rect(-20.0, 900.0, 800.0, 600.0), [0.0, 100.0]);
}

#[test]
fn percent_of_an_empty_box_is_the_centre() {
    assert_eq!(percent_in_rect(10.0, 10.0, 0.0, 600.0), [50.0, 50.0]);
}

#[test]
fn buttons_win_over_other_targets() {
    let t = target_from_data(Some("continue"), Some("3"), Some("7"), None);
    assert_eq!(t, PointerTarget::Action(SceneAction::Continue));
    let t = target_from_data(None, Some("3"), Some("7"), Some("1"));
    assert_eq!(t, PointerTarget::Cell(3));
    let t = target_from_data(None, None, Some("7"), Some("1"));
    assert_eq!(t, PointerTarget::Sprite(7));
    assert_eq!(target_from_data(None, None, None, Some("4")), PointerTarget::Dot(4));
}

#[test]
fn malformed_data_falls_through() {
    let t = target_from_data(Some("dance"), Some("x"), None, None);
    assert_eq!(t, PointerTarget::Backdrop);
}

#[test]
fn backdrop_presses_follow_the_input_mode() {
    let pos = [30.0, 70.0];
    assert_eq!(
        route_pointer_down(PointerTarget::Backdrop, InputMode::Buttons, pos),
        Routed::Ignore
    );
    assert_eq!(
        route_pointer_down(PointerTarget::Backdrop, InputMode::Tap, pos),
        Routed::Scene(SceneInput::Tap { x: 30.0, y: 70.0 })
    );
    assert_eq!(
        route_pointer_down(PointerTarget::Backdrop, InputMode::Hold, pos),
        Routed::Scene(SceneInput::PressStart { x: 30.0, y: 70.0 })
    );
}

#[test]
fn targets_route_regardless_of_mode() {
    let pos = [0.0, 0.0];
    assert_eq!(
        route_pointer_down(PointerTarget::Cell(2), InputMode::Buttons, pos),
        Routed::Scene(SceneInput::Cell(2))
    );
    assert_eq!(
        route_pointer_down(PointerTarget::Sprite(9), InputMode::Tap, pos),
        Routed::Scene(SceneInput::Sprite(9))
    );
    assert_eq!(
        route_pointer_down(PointerTarget::Dot(5), InputMode::Hold, pos),
        Routed::Jump(5)
    );
}

#[test]
fn navigation_keys() {
    assert_eq!(command_for_key("ArrowRight"), Some(KeyCommand::Advance));
    assert_eq!(command_for_key("n"), Some(KeyCommand::Advance));
    assert_eq!(command_for_key("R"), Some(KeyCommand::Restart));
    assert_eq!(command_for_key("End"), Some(KeyCommand::Last));
    assert_eq!(command_for_key("ArrowLeft"), None);
}

#[test]
fn digits_jump_one_based_with_zero_as_ten() {
    assert_eq!(command_for_key("1"), Some(KeyCommand::Jump(0)));
    assert_eq!(command_for_key("9"), Some(KeyCommand::Jump(8)));
    assert_eq!(command_for_key("0"), Some(KeyCommand::Jump(9)));
    assert_eq!(command_for_key("10"), None);
}
