use crate::app::AppHandle;
use crate::engine::Position;
use crate::input;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pad_pointer(handle: &AppHandle, pad: &web::HtmlElement) {
    wire_pointerdown(handle, pad);
    wire_pointermove(handle, pad);
    wire_pointerup(handle, pad, "pointerup");
    wire_pointerup(handle, pad, "pointercancel");
}

fn pad_position(ev: &web::PointerEvent, pad: &web::HtmlElement) -> Position {
    let pct = input::pointer_pad_percent(ev, pad);
    Position::new(pct.x, pct.y)
}

fn wire_pointerdown(handle: &AppHandle, pad: &web::HtmlElement) {
    let h = handle.clone();
    let pad_for_closure = pad.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        // A grab always wins over a running glide.
        h.cancel_motion();
        _ = pad_for_closure.set_pointer_capture(ev.pointer_id());
        {
            let mut app = h.app.borrow_mut();
            app.drag.active = true;
            app.drag.pointer_id = ev.pointer_id();
        }
        let p = pad_position(&ev, &pad_for_closure);
        h.set_position(p);
        log::debug!("[gesture] grab at ({:.1},{:.1})", p.x, p.y);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = pad.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(handle: &AppHandle, pad: &web::HtmlElement) {
    let h = handle.clone();
    let pad_for_closure = pad.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let dragging = {
            let app = h.app.borrow();
            app.drag.active && app.drag.pointer_id == ev.pointer_id()
        };
        if !dragging {
            return;
        }
        h.set_position(pad_position(&ev, &pad_for_closure));
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = pad.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(handle: &AppHandle, pad: &web::HtmlElement, event: &str) {
    let h = handle.clone();
    let pad_for_closure = pad.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let was_dragging = {
            let mut app = h.app.borrow_mut();
            let was = app.drag.active && app.drag.pointer_id == ev.pointer_id();
            if was {
                app.drag.active = false;
            }
            was
        };
        if !was_dragging {
            return;
        }
        _ = pad_for_closure.release_pointer_capture(ev.pointer_id());
        h.save_position();
        log::debug!("[gesture] release");
    }) as Box<dyn FnMut(_)>);
    _ = pad.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}
