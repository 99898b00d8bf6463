use crate::dom;
use crate::input::{self, KeyCommand};
use crate::overlay;
use stage_core::Stage;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    stage: &Rc<RefCell<Stage>>,
) {
    if ev.repeat() {
        return;
    }
    let Some(cmd) = input::command_for_key(&ev.key()) else {
        return;
    };
    match cmd {
        KeyCommand::Advance => stage.borrow_mut().advance(),
        KeyCommand::Restart => {
            stage.borrow_mut().restart();
            log::info!("[keys] restart");
        }
        KeyCommand::Jump(index) => {
            if let Err(e) = stage.borrow_mut().jump(index) {
                log::warn!("[keys] {e}");
            }
        }
        KeyCommand::Last => {
            let mut stage = stage.borrow_mut();
            let last = stage.scene_count().saturating_sub(1);
            if let Err(e) = stage.jump(last) {
                log::warn!("[keys] {e}");
            }
        }
        KeyCommand::ToggleHelp => {
            if let Some(doc) = dom::window_document() {
                overlay::toggle_help(&doc);
            }
        }
        KeyCommand::Fullscreen => {
            if let Some(doc) = dom::window_document() {
                if doc.fullscreen_element().is_some() {
                    doc.exit_fullscreen();
                } else if let Some(root) = doc.document_element() {
                    // the whole page, so the overlay stays on top of the canvas
                    _ = root.request_fullscreen();
                }
            }
        }
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(stage: Rc<RefCell<Stage>>) {
    dom::add_window_listener("keydown", move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &stage);
    });
}
