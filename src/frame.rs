use crate::engine::{TaskSlot, TaskToken};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameClosure = Closure<dyn FnMut()>;

/// A cancellable `requestAnimationFrame` loop.
///
/// `step` runs once per frame and returns whether to keep going. Cancelling
/// both revokes the pending callback and invalidates the task token, so a
/// callback that slips through still returns without calling `step`.
pub struct FrameLoop {
    label: &'static str,
    slot: TaskSlot,
    raf_id: Rc<Cell<Option<i32>>>,
    closure: Rc<RefCell<Option<FrameClosure>>>,
}

impl FrameLoop {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            slot: TaskSlot::new(),
            raf_id: Rc::new(Cell::new(None)),
            closure: Rc::new(RefCell::new(None)),
        }
    }

    pub fn start(&self, mut step: impl FnMut() -> bool + 'static) {
        self.cancel();
        let token = self.slot.spawn();
        let first = token.clone();
        let label = self.label;
        let raf_id = self.raf_id.clone();
        let weak: Weak<RefCell<Option<FrameClosure>>> = Rc::downgrade(&self.closure);
        let tick = Closure::wrap(Box::new(move || {
            raf_id.set(None);
            if !token.is_live() {
                return;
            }
            if !step() {
                token.finish();
                return;
            }
            if token.is_live() {
                schedule(label, &weak, &raf_id, &token);
            }
        }) as Box<dyn FnMut()>);
        *self.closure.borrow_mut() = Some(tick);
        schedule(self.label, &Rc::downgrade(&self.closure), &self.raf_id, &first);
    }

    /// Stop the loop synchronously. Returns true if it was running.
    pub fn cancel(&self) -> bool {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        let was_running = self.slot.cancel();
        if was_running {
            log::debug!("[frame] {} cancelled", self.label);
        }
        was_running
    }
}

fn schedule(
    label: &'static str,
    closure: &Weak<RefCell<Option<FrameClosure>>>,
    raf_id: &Rc<Cell<Option<i32>>>,
    token: &TaskToken,
) {
    if !token.is_live() {
        return;
    }
    let Some(cell) = closure.upgrade() else {
        return;
    };
    let cell = cell.borrow();
    let Some(cb) = cell.as_ref() else {
        return;
    };
    let requested = web::window()
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("no window"))
        .and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()));
    match requested {
        Ok(id) => raf_id.set(Some(id)),
        Err(e) => {
            log::warn!("[frame] {} could not schedule: {:?}", label, e);
            token.finish();
        }
    }
}
