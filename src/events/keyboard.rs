use crate::app::AppHandle;
use crate::engine::MotionRequest;
use crate::input::{self, KeyAction};
use wasm_bindgen::JsCast;
use web_sys as web;

fn target_is_editable(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| input::is_editable_tag(&el.tag_name()))
        .unwrap_or(false)
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, handle: &AppHandle) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    if target_is_editable(ev) {
        return;
    }
    let Some(action) = input::action_for_key(&ev.key()) else {
        return;
    };
    log::debug!("[gesture] key {:?}", action);
    match action {
        KeyAction::TogglePlay => handle.toggle_playing(),
        KeyAction::Random => handle.start_motion(MotionRequest::Random),
        KeyAction::Reset => handle.start_motion(MotionRequest::Reset),
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(handle: AppHandle) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &handle);
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
