use crate::dom;
use crate::input::{self, PointerState, Routed};
use stage_core::{SceneInput, Stage};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub stage: Rc<RefCell<Stage>>,
    pub pointer: Rc<RefCell<PointerState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_release(&w, "pointerup");
    wire_release(&w, "pointercancel");
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    dom::add_window_listener("pointerdown", move |ev: web::PointerEvent| {
        let target = input::target_from_data(
            dom::closest_data(&ev, "action").as_deref(),
            dom::closest_data(&ev, "cell").as_deref(),
            dom::closest_data(&ev, "sprite").as_deref(),
            dom::closest_data(&ev, "dot").as_deref(),
        );
        let pos = input::pointer_canvas_percent(&ev, &w.canvas);
        let mut stage = w.stage.borrow_mut();
        let mode = stage.view().map(|v| v.input).unwrap_or_default();
        match input::route_pointer_down(target, mode, pos) {
            Routed::Scene(scene_input) => {
                if matches!(scene_input, SceneInput::PressStart { .. }) {
                    w.pointer.borrow_mut().holding = true;
                }
                stage.input(scene_input);
                ev.prevent_default();
            }
            Routed::Jump(index) => {
                if let Err(e) = stage.jump(index) {
                    log::warn!("[click] {e}");
                }
                ev.prevent_default();
            }
            Routed::Ignore => {}
        }
    });
}

fn wire_release(w: &InputWiring, event: &str) {
    let w = w.clone();
    dom::add_window_listener(event, move |_ev: web::PointerEvent| {
        let was_holding = std::mem::take(&mut w.pointer.borrow_mut().holding);
        if was_holding {
            w.stage.borrow_mut().input(SceneInput::PressEnd);
        }
    });
}
