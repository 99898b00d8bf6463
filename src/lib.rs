#![cfg(target_arch = "wasm32")]
use instant::Instant;
use stage_core::{Color, Stage, StageConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod markup;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("stage-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let mut config = StageConfig::default();
    // host page may retint the star field: <canvas data-tint="#rrggbb">
    if let Some(tint) = canvas.get_attribute("data-tint") {
        if let Ok(color) = tint.parse::<Color>() {
            config.ambient.tint = color;
        }
    }
    let stage = Stage::new(config)?;
    log::info!("[stage] {} scenes", stage.scene_count());
    let stage = Rc::new(RefCell::new(stage));

    // The overlay keeps working without WebGPU; only the backdrop is lost
    let gpu = frame::init_gpu(&canvas).await;

    events::wire_global_keydown(stage.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        stage: stage.clone(),
        pointer: Rc::new(RefCell::new(input::PointerState::default())),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        stage,
        canvas,
        overlay: overlay::Overlay::new(&document),
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
