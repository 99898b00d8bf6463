use stage_core::{InputMode, SceneAction, SceneInput};
use web_sys as web;

/// Pointer state tracked across down/up so a hold can be released even when
/// the pointer leaves the element it started on.
#[derive(Default, Clone, Copy)]
pub struct PointerState {
    pub holding: bool,
}

/// What the pointer landed on, read from the overlay's `data-*` attributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerTarget {
    Action(SceneAction),
    Cell(usize),
    Sprite(u64),
    Dot(usize),
    Backdrop,
}

/// Where a pointer-down goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Routed {
    Scene(SceneInput),
    Jump(usize),
    Ignore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Advance,
    Restart,
    Jump(usize),
    Last,
    ToggleHelp,
    Fullscreen,
}

// ---------------- Pointer helpers ----------------
/// Position inside a `w`×`h` box as screen percent, `+y` down.
#[inline]
pub fn percent_in_rect(x_css: f32, y_css: f32, w: f32, h: f32) -> [f32; 2] {
    if w > 0.0 && h > 0.0 {
        [
            (x_css / w * 100.0).clamp(0.0, 100.0),
            (y_css / h * 100.0).clamp(0.0, 100.0),
        ]
    } else {
        [50.0, 50.0]
    }
}

#[inline]
pub fn pointer_canvas_percent(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> [f32; 2] {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    percent_in_rect(x_css, y_css, rect.width() as f32, rect.height() as f32)
}

/// Buttons win over cells, cells over sprites, sprites over progress dots.
pub fn target_from_data(
    action: Option<&str>,
    cell: Option<&str>,
    sprite: Option<&str>,
    dot: Option<&str>,
) -> PointerTarget {
    if let Some(a) = action.and_then(SceneAction::parse) {
        return PointerTarget::Action(a);
    }
    if let Some(i) = cell.and_then(|s| s.parse().ok()) {
        return PointerTarget::Cell(i);
    }
    if let Some(id) = sprite.and_then(|s| s.parse().ok()) {
        return PointerTarget::Sprite(id);
    }
    if let Some(i) = dot.and_then(|s| s.parse().ok()) {
        return PointerTarget::Dot(i);
    }
    PointerTarget::Backdrop
}

pub fn route_pointer_down(target: PointerTarget, mode: InputMode, pos: [f32; 2]) -> Routed {
    let [x, y] = pos;
    match target {
        PointerTarget::Action(a) => Routed::Scene(SceneInput::Action(a)),
        PointerTarget::Cell(i) => Routed::Scene(SceneInput::Cell(i)),
        PointerTarget::Sprite(id) => Routed::Scene(SceneInput::Sprite(id)),
        PointerTarget::Dot(i) => Routed::Jump(i),
        PointerTarget::Backdrop => match mode {
            InputMode::Buttons => Routed::Ignore,
            InputMode::Tap => Routed::Scene(SceneInput::Tap { x, y }),
            InputMode::Hold => Routed::Scene(SceneInput::PressStart { x, y }),
        },
    }
}

// ---------------- Keyboard ----------------
#[inline]
pub fn command_for_key(key: &str) -> Option<KeyCommand> {
    match key {
        "ArrowRight" | "n" | "N" => Some(KeyCommand::Advance),
        "r" | "R" => Some(KeyCommand::Restart),
        "End" => Some(KeyCommand::Last),
        "h" | "H" => Some(KeyCommand::ToggleHelp),
        "Enter" => Some(KeyCommand::Fullscreen),
        "0" => Some(KeyCommand::Jump(9)),
        _ => {
            let d = key.parse::<usize>().ok().filter(|d| (1..=9).contains(d))?;
            Some(KeyCommand::Jump(d - 1))
        }
    }
}
