// HTML for the overlay. Pure string building so it runs on the host too.

use stage_core::{SceneView, SpriteView};
use std::fmt::Write;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Scene panel: title, lines, progress, meter, grid, caption, hint, buttons.
/// Sprites are rendered separately by [`sprites_html`].
pub fn panel_html(view: &SceneView) -> String {
    let mut html = String::new();
    if !view.title.is_empty() {
        _ = write!(html, "<h1 class='title'>{}</h1>", escape(&view.title));
    }
    for line in &view.lines {
        _ = write!(html, "<p class='line'>{}</p>", escape(line));
    }
    if let Some((done, goal)) = view.progress {
        _ = write!(html, "<div class='progress'>{done} / {goal}</div>");
    }
    if let Some(m) = view.meter {
        let pct = (m.clamp(0.0, 1.0) * 100.0).round();
        _ = write!(
            html,
            "<div class='meter'><div class='meter-fill' style='width:{pct}%'></div></div>"
        );
    }
    if !view.cells.is_empty() {
        let cols = view.grid_columns.max(1);
        _ = write!(
            html,
            "<div class='grid' style='grid-template-columns:repeat({cols},1fr)'>"
        );
        for (i, cell) in view.cells.iter().enumerate() {
            let mut class = String::from("cell");
            if cell.lit {
                class.push_str(" lit");
            }
            if cell.disabled {
                class.push_str(" disabled");
            }
            _ = write!(
                html,
                "<button class='{class}' data-cell='{i}'>{}</button>",
                escape(&cell.glyph)
            );
        }
        html.push_str("</div>");
    }
    if let Some(caption) = &view.caption {
        _ = write!(html, "<div class='caption'>{}</div>", escape(caption));
    }
    if let Some(hint) = &view.hint {
        _ = write!(html, "<p class='hint'>{}</p>", escape(hint));
    }
    if !view.actions.is_empty() {
        html.push_str("<div class='actions'>");
        for b in &view.actions {
            _ = write!(
                html,
                "<button class='action' data-action='{}'>{}</button>",
                b.action.as_str(),
                escape(&b.label)
            );
        }
        html.push_str("</div>");
    }
    html
}

/// Absolutely positioned sprites, coordinates in screen percent.
pub fn sprites_html(sprites: &[SpriteView]) -> String {
    let mut html = String::new();
    for s in sprites {
        _ = write!(
            html,
            "<div class='sprite' data-sprite='{}' style='left:{:.2}%;top:{:.2}%;font-size:{:.1}px'>{}</div>",
            s.id,
            s.x,
            s.y,
            s.size,
            escape(s.glyph)
        );
    }
    html
}

/// One dot per scene; the current one is marked, all of them jump.
pub fn dots_html(current: usize, count: usize) -> String {
    let mut html = String::new();
    for i in 0..count {
        let class = if i == current { "dot current" } else { "dot" };
        _ = write!(html, "<button class='{class}' data-dot='{i}'></button>");
    }
    html
}
