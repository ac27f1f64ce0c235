#![cfg(target_arch = "wasm32")]
use crate::engine::persist::restore_or_center;
use crate::engine::{Instrument, InstrumentConfig, MotionController, WaveformSampler};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod audio;
mod canvas;
mod constants;
mod dom;
pub mod engine;
mod events;
mod frame;
mod input;
mod readout;

use constants::{PAD_ID, WAVEFORM_CANVAS_ID};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
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
    log::info!("noise-sculptor starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let pad: web::HtmlElement = dom::element(&document, PAD_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", PAD_ID))?;
    let canvas: web::HtmlCanvasElement = dom::element(&document, WAVEFORM_CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", WAVEFORM_CANVAS_ID))?;
    wire_canvas_resize(&canvas);
    let surface = canvas::CanvasSurface::new(canvas)?;

    // The context starts suspended until the first play gesture resumes it.
    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let backend = audio::WebAudioBackend::new(audio_ctx.clone());

    let store = dom::LocalStorageStore::default();
    let initial = restore_or_center(&store);
    let config = InstrumentConfig::default();
    let motion = MotionController::new(config.motion_duration);
    let sampler = WaveformSampler::new(config.analyser_size);
    let instrument = Instrument::new(backend, config, initial)
        .map_err(|e| anyhow::anyhow!("audio graph: {}", e))?;

    let handle = app::AppHandle::new(
        app::App {
            instrument,
            motion,
            sampler,
            surface,
            store,
            rng: StdRng::from_entropy(),
            drag: input::DragState::default(),
        },
        document,
        audio_ctx,
    );
    handle.render_all();

    events::wire_pad_pointer(&handle, &pad);
    events::wire_controls(&handle);
    events::wire_global_keydown(handle.clone());
    events::wire_pagehide(&handle);

    Ok(())
}
