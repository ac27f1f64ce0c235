use glam::Vec2;
use web_sys as web;

#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
}

impl DragState {
    /// A held pointer owns the position; glides wait until release.
    #[inline]
    pub fn blocks_motion(&self) -> bool {
        self.active
    }
}

/// Response to `pagehide`. A page kept in the back/forward cache can be
/// shown again, so it keeps its audio graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageHideAction {
    Suspend,
    Teardown,
}

#[inline]
pub fn page_hide_action(persisted: bool) -> PageHideAction {
    if persisted {
        PageHideAction::Suspend
    } else {
        PageHideAction::Teardown
    }
}

/// Keyboard shortcuts for the pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlay,
    Random,
    Reset,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Spacebar" => Some(KeyAction::TogglePlay),
        "r" | "R" => Some(KeyAction::Random),
        "c" | "C" => Some(KeyAction::Reset),
        _ => None,
    }
}

/// Shortcuts stay out of the way of text-like form fields.
#[inline]
pub fn is_editable_tag(tag_name: &str) -> bool {
    matches!(
        tag_name.to_ascii_uppercase().as_str(),
        "INPUT" | "TEXTAREA" | "SELECT"
    )
}

// ---------------- Pad coordinates ----------------

/// Client coordinates to pad percent, both axes clamped to `[0, 100]`.
/// A degenerate rect maps to the center.
#[inline]
pub fn pad_percent(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Vec2 {
    if !(rect_size.x > 0.0 && rect_size.y > 0.0) {
        return Vec2::splat(50.0);
    }
    let local = (client - rect_origin) / rect_size * 100.0;
    let x = if local.x.is_finite() { local.x.clamp(0.0, 100.0) } else { 50.0 };
    let y = if local.y.is_finite() { local.y.clamp(0.0, 100.0) } else { 50.0 };
    Vec2::new(x, y)
}

#[inline]
pub fn pointer_pad_percent(ev: &web::PointerEvent, pad: &web::Element) -> Vec2 {
    let rect = pad.get_bounding_client_rect();
    pad_percent(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

/// Resonance input value; unparsable text yields `None`.
#[inline]
pub fn parse_resonance(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|q| q.is_finite())
}
