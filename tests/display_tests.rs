// Host-side tests for readout labels and the filter-response overlay.

#![allow(dead_code)]
mod common;

use approx::assert_relative_eq;
use common::engine::display::*;
use common::engine::mapper::{map_position, DisplayFilterState, FilterType};
use common::engine::position::Position;

fn state(
    frequency_hz: u32,
    filter_type: FilterType,
    rolloff_db: i32,
    blend: f32,
) -> DisplayFilterState {
    DisplayFilterState {
        frequency_hz,
        filter_type,
        rolloff_db,
        filter_blend: blend,
        crossfade_position: 0.0,
    }
}

#[test]
fn thousands_are_grouped() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(40), "40");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(1_000), "1,000");
    assert_eq!(group_thousands(22_000), "22,000");
    assert_eq!(group_thousands(1_234_567), "1,234,567");
}

#[test]
fn labels_read_like_the_readout() {
    let s = state(1_234, FilterType::Lowpass, -24, 0.0);
    assert_eq!(filter_label(&s), "1,234 Hz LPF");
    assert_eq!(rolloff_label(&s), "~-24 dB/oct");
    let s = state(178, FilterType::Highpass, -12, 1.0);
    assert_eq!(filter_label(&s), "178 Hz HPF");
    assert_eq!(rolloff_label(&s), "~-12 dB/oct");
}

#[test]
fn labels_follow_the_mapper() {
    let d = map_position(Position::new(0.0, 0.0), 1.0).display();
    assert_eq!(filter_label(&d), "40 Hz LPF");
    assert_eq!(rolloff_label(&d), "~-12 dB/oct");
    let d = map_position(Position::new(100.0, 100.0), 1.0).display();
    assert!(filter_label(&d).ends_with(" Hz HPF"));
    assert!(filter_label(&d).starts_with("31,62"));
    assert_eq!(rolloff_label(&d), "~-48 dB/oct");
}

#[test]
fn lowpass_overlay_is_visible_on_the_lowpass_side() {
    let o = FilterResponseOverlay::from_display(&state(40, FilterType::Lowpass, -12, 0.0));
    assert_relative_eq!(o.lowpass.edge_pct, 13.846, epsilon = 0.01);
    assert_relative_eq!(o.lowpass.skirt_pct, 15.846, epsilon = 0.01);
    assert_eq!(o.lowpass.opacity, 1.0);

    // Highpass rests at the 20 Hz floor and is hidden.
    assert_relative_eq!(o.highpass.edge_pct, 6.924, epsilon = 0.01);
    assert_relative_eq!(o.highpass.skirt_pct, 4.924, epsilon = 0.01);
    assert_eq!(o.highpass.opacity, 0.0);
}

#[test]
fn highpass_overlay_is_visible_on_the_highpass_side() {
    let o = FilterResponseOverlay::from_display(&state(31_623, FilterType::Highpass, -48, 1.0));
    assert_relative_eq!(o.highpass.edge_pct, 80.5, epsilon = 0.01);
    assert_relative_eq!(o.highpass.skirt_pct, 72.5, epsilon = 0.01);
    assert_eq!(o.highpass.opacity, 1.0);

    assert_relative_eq!(o.lowpass.edge_pct, 75.923, epsilon = 0.01);
    assert_relative_eq!(o.lowpass.skirt_pct, 83.923, epsilon = 0.01);
    assert_eq!(o.lowpass.opacity, 0.0);
}

#[test]
fn overlay_stops_are_clamped() {
    let o = FilterResponseOverlay::from_display(&state(1, FilterType::Lowpass, -48, 0.0));
    assert_eq!(o.lowpass.edge_pct, 5.0);
    assert_eq!(o.lowpass.skirt_pct, 8.0);
    let o = FilterResponseOverlay::from_display(&state(10_000_000, FilterType::Highpass, -48, 1.0));
    assert_eq!(o.highpass.edge_pct, 95.0);
    assert_eq!(o.highpass.skirt_pct, 92.0);
}

#[test]
fn both_layers_fade_through_the_middle() {
    let o = FilterResponseOverlay::from_display(&state(500, FilterType::Lowpass, -24, 0.5));
    assert_relative_eq!(o.lowpass.opacity, 0.25, epsilon = 1e-6);
    assert_relative_eq!(o.highpass.opacity, 0.25, epsilon = 1e-6);
    assert_eq!(o.layer(FilterType::Lowpass), &o.lowpass);
    assert_eq!(o.layer(FilterType::Highpass), &o.highpass);
}
