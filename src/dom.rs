use crate::constants::STORAGE_KEY;
use crate::engine::persist::{decode_position, encode_position, PositionStore, StoreError};
use crate::engine::Position;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn element<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
            ev.stop_propagation();
            handler()
        }) as Box<dyn FnMut(_)>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] missing #{}", element_id);
    }
}

#[inline]
pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn set_style(document: &web::Document, id: &str, property: &str, value: &str) {
    if let Some(el) = element::<web::HtmlElement>(document, id) {
        _ = el.style().set_property(property, value);
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Last pad position in `localStorage`.
pub struct LocalStorageStore {
    key: &'static str,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self { key: STORAGE_KEY }
    }
}

impl LocalStorageStore {
    fn storage(&self) -> Result<web::Storage, StoreError> {
        web::window()
            .ok_or_else(|| StoreError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".into()))
    }
}

impl PositionStore for LocalStorageStore {
    fn load(&self) -> Result<Option<Position>, StoreError> {
        let raw = self
            .storage()?
            .get_item(self.key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        raw.as_deref().map(decode_position).transpose()
    }

    fn save(&self, position: Position) -> Result<(), StoreError> {
        let raw = encode_position(position)?;
        self.storage()?
            .set_item(self.key, &raw)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}
