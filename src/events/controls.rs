use crate::app::AppHandle;
use crate::constants::{PLAY_BUTTON_ID, RANDOM_BUTTON_ID, RESET_BUTTON_ID, RESONANCE_INPUT_ID};
use crate::dom;
use crate::engine::MotionRequest;
use crate::input::{self, PageHideAction};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_controls(handle: &AppHandle) {
    let document = handle.document.clone();

    let h = handle.clone();
    dom::add_click_listener(&document, PLAY_BUTTON_ID, move || h.toggle_playing());

    let h = handle.clone();
    dom::add_click_listener(&document, RANDOM_BUTTON_ID, move || {
        h.start_motion(MotionRequest::Random)
    });

    let h = handle.clone();
    dom::add_click_listener(&document, RESET_BUTTON_ID, move || {
        h.start_motion(MotionRequest::Reset)
    });

    wire_resonance_input(handle);
}

fn wire_resonance_input(handle: &AppHandle) {
    let Some(el) = dom::element::<web::HtmlInputElement>(&handle.document, RESONANCE_INPUT_ID)
    else {
        log::warn!("[dom] missing #{}", RESONANCE_INPUT_ID);
        return;
    };
    el.set_value(&format!("{}", handle.app.borrow().instrument.resonance()));

    let h = handle.clone();
    let input_el = el.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::Event| {
        match input::parse_resonance(&input_el.value()) {
            Some(q) => h.set_resonance(q),
            None => log::warn!("[gesture] ignoring resonance {:?}", input_el.value()),
        }
    }) as Box<dyn FnMut(_)>);
    _ = el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Tear everything down when the page unloads; only pause when it is cached.
pub fn wire_pagehide(handle: &AppHandle) {
    let h = handle.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(
        move |ev: web::PageTransitionEvent| match input::page_hide_action(ev.persisted()) {
            PageHideAction::Suspend => h.suspend(),
            PageHideAction::Teardown => h.shutdown(),
        },
    ) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
