use crate::constants::{
    COLOR_DOT_ID, COLOR_NAME_ID, FILTER_LABEL_ID, KNOB_ID, PLAY_BUTTON_ID, RESONANCE_VALUE_ID,
    RESPONSE_HIGHPASS_ID, RESPONSE_LOWPASS_ID, RESPONSE_PASS_RGBA, RESPONSE_STOP_RGBA,
    ROLLOFF_LABEL_ID, WAVEFORM_STATUS_ID,
};
use crate::dom;
use crate::engine::{filter_label, rolloff_label, PadView, ResponseLayer};
use web_sys as web;

/// Push the whole view into the page.
pub fn render(document: &web::Document, view: &PadView) {
    render_position(document, view);
    render_transport(document, view.playing);
    dom::set_text(
        document,
        RESONANCE_VALUE_ID,
        &format!("{:.1}", view.resonance),
    );
}

/// Knob, labels, color and response strip. Runs on every position change.
pub fn render_position(document: &web::Document, view: &PadView) {
    dom::set_style(document, KNOB_ID, "left", &format!("{:.2}%", view.position.x));
    dom::set_style(document, KNOB_ID, "top", &format!("{:.2}%", view.position.y));

    dom::set_text(document, FILTER_LABEL_ID, &filter_label(&view.display));
    dom::set_text(document, ROLLOFF_LABEL_ID, &rolloff_label(&view.display));

    let css = view.color.css();
    dom::set_style(document, COLOR_DOT_ID, "background-color", &css);
    dom::set_text(document, COLOR_NAME_ID, view.color.dominant.label());

    render_layer(
        document,
        RESPONSE_LOWPASS_ID,
        &view.response.lowpass,
        lowpass_gradient,
    );
    render_layer(
        document,
        RESPONSE_HIGHPASS_ID,
        &view.response.highpass,
        highpass_gradient,
    );
}

pub fn render_transport(document: &web::Document, playing: bool) {
    dom::set_text(
        document,
        PLAY_BUTTON_ID,
        if playing { "Stop" } else { "Play" },
    );
    dom::set_text(
        document,
        WAVEFORM_STATUS_ID,
        if playing { "Live" } else { "Idle" },
    );
    if let Some(el) = document.get_element_by_id(PLAY_BUTTON_ID) {
        _ = el.class_list().toggle_with_force("active", playing);
    }
}

fn render_layer(
    document: &web::Document,
    id: &str,
    layer: &ResponseLayer,
    gradient: fn(&ResponseLayer) -> String,
) {
    dom::set_style(document, id, "background", &gradient(layer));
    dom::set_style(document, id, "opacity", &format!("{:.3}", layer.opacity));
}

fn lowpass_gradient(layer: &ResponseLayer) -> String {
    format!(
        "linear-gradient(to right, {pass} 0%, {pass} {edge:.1}%, {stop} {skirt:.1}%, {stop} 100%)",
        pass = RESPONSE_PASS_RGBA,
        stop = RESPONSE_STOP_RGBA,
        edge = layer.edge_pct,
        skirt = layer.skirt_pct,
    )
}

fn highpass_gradient(layer: &ResponseLayer) -> String {
    format!(
        "linear-gradient(to right, {stop} 0%, {stop} {skirt:.1}%, {pass} {edge:.1}%, {pass} 100%)",
        pass = RESPONSE_PASS_RGBA,
        stop = RESPONSE_STOP_RGBA,
        edge = layer.edge_pct,
        skirt = layer.skirt_pct,
    )
}
