use crate::constants::{DOTS_ID, HELP_ID, PANEL_ID, SPRITES_ID, TOAST_ID};
use crate::markup;
use stage_core::Stage;
use web_sys as web;

/// DOM side of the scene panel. Each element is only rewritten when its
/// markup changes.
pub struct Overlay {
    panel: Option<web::Element>,
    sprites: Option<web::Element>,
    toast: Option<web::Element>,
    dots: Option<web::Element>,
    last_panel: String,
    last_sprites: String,
    last_toast: Option<String>,
    last_dots: Option<(usize, usize)>,
    last_opacity: Option<f32>,
}

impl Overlay {
    pub fn new(document: &web::Document) -> Self {
        let panel = document.get_element_by_id(PANEL_ID);
        if panel.is_none() {
            log::warn!("[overlay] missing #{PANEL_ID}");
        }
        Self {
            panel,
            sprites: document.get_element_by_id(SPRITES_ID),
            toast: document.get_element_by_id(TOAST_ID),
            dots: document.get_element_by_id(DOTS_ID),
            last_panel: String::new(),
            last_sprites: String::new(),
            last_toast: None,
            last_dots: None,
            last_opacity: None,
        }
    }

    pub fn sync(&mut self, stage: &Stage) {
        // while cross-fading, show the outgoing scene fading out
        let (view, opacity) = match (stage.view(), stage.fade(), stage.transition()) {
            (Some(v), _, _) => (Some(v), 1.0),
            (None, Some(fade), Some(t)) => (fade.exiting.clone(), 1.0 - t.progress),
            _ => (None, 0.0),
        };
        let (panel, sprites) = match &view {
            Some(v) => (markup::panel_html(v), markup::sprites_html(&v.sprites)),
            None => (String::new(), String::new()),
        };

        if let Some(el) = &self.panel {
            if panel != self.last_panel {
                el.set_inner_html(&panel);
                self.last_panel = panel;
            }
            if self.last_opacity != Some(opacity) {
                _ = el.set_attribute("style", &format!("opacity:{opacity:.3}"));
                self.last_opacity = Some(opacity);
            }
        }
        if let Some(el) = &self.sprites {
            if sprites != self.last_sprites {
                el.set_inner_html(&sprites);
                self.last_sprites = sprites;
            }
        }

        let toast = stage.toast().map(str::to_owned);
        if toast != self.last_toast {
            if let Some(el) = &self.toast {
                match &toast {
                    Some(text) => {
                        el.set_inner_html(&markup::escape(text));
                        _ = el.class_list().remove_1("hidden");
                    }
                    None => {
                        _ = el.class_list().add_1("hidden");
                    }
                }
            }
            self.last_toast = toast;
        }

        let dots = (stage.current_index(), stage.scene_count());
        if self.last_dots != Some(dots) {
            if let Some(el) = &self.dots {
                el.set_inner_html(&markup::dots_html(dots.0, dots.1));
            }
            self.last_dots = Some(dots);
        }
    }
}

#[inline]
pub fn toggle_help(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HELP_ID) {
        _ = el.class_list().toggle("hidden");
    }
}
