// Host-side tests for the instrument: control state driving the graph.

#![allow(dead_code)]
mod common;

use approx::assert_relative_eq;
use common::engine::color::NoiseColor;
use common::engine::graph::{db_to_gain, Param, TOTAL_NODE_COUNT};
use common::engine::instrument::*;
use common::engine::mapper::{map_position, FilterType};
use common::engine::position::Position;
use common::engine::waveform::{WaveformSampler, WaveformSource};
use common::{RecordingBackend, RecordingSurface};

const NOISE: usize = 0;
const LPF12: usize = 1;
const HPF12: usize = 4;
const XF12: usize = 7;
const MASTER: usize = 12;

fn instrument(initial: Position) -> (Instrument<RecordingBackend>, RecordingBackend) {
    let backend = RecordingBackend::with_waveform(vec![0.5; 256]);
    let probe = backend.clone();
    let inst = Instrument::new(backend, InstrumentConfig::default(), initial).expect("instrument");
    (inst, probe)
}

#[test]
fn default_config_values() {
    let c = InstrumentConfig::default();
    assert_eq!(c.noise_level_db, -15.0);
    assert_eq!(c.analyser_size, 256);
    assert_eq!(c.motion_duration.as_millis(), 600);
    assert_eq!(c.initial_resonance, 1.0);
}

#[test]
fn starts_silent_with_the_initial_mapping_applied() {
    let (inst, probe) = instrument(Position::new(20.0, 10.0));
    assert!(!inst.is_playing());
    let expected = map_position(Position::new(20.0, 10.0), 1.0);
    assert_eq!(inst.params(), &expected);

    let log = probe.log.borrow();
    assert_eq!(log.last_set(NOISE, Param::Level), Some(0.0));
    assert_eq!(log.last_set(LPF12, Param::Frequency), Some(expected.low_freq));
}

#[test]
fn initial_position_is_clamped() {
    let (inst, _) = instrument(Position::new(-20.0, 400.0));
    assert_eq!(inst.position(), Position::new(0.0, 100.0));
}

#[test]
fn position_changes_reach_the_graph_before_returning() {
    let (mut inst, probe) = instrument(Position::CENTER);
    let view = inst.set_position(Position::new(90.0, 90.0));
    let expected = map_position(Position::new(90.0, 90.0), 1.0);

    let log = probe.log.borrow();
    assert_eq!(log.last_set(HPF12, Param::Frequency), Some(expected.high_freq));
    assert_eq!(log.last_set(XF12, Param::Fade), Some(1.0));
    assert_eq!(log.last_set(MASTER, Param::Fade), Some(1.0));
    assert_eq!(view.position, Position::new(90.0, 90.0));
    assert_eq!(view.display.filter_type, FilterType::Highpass);
    assert_eq!(view.display, expected.display());
}

#[test]
fn resonance_reaches_all_filters_and_is_clamped() {
    let (mut inst, probe) = instrument(Position::CENTER);
    let view = inst.set_resonance(4.0);
    assert_eq!(view.resonance, 4.0);
    {
        let log = probe.log.borrow();
        for node in 1..=6 {
            assert_eq!(log.last_set(node, Param::Q), Some(4.0));
        }
    }
    inst.set_resonance(99.0);
    assert_eq!(inst.resonance(), 10.0);
    inst.set_resonance(f32::NAN);
    assert_eq!(inst.resonance(), 1.0);
}

#[test]
fn playing_sets_the_noise_level() {
    let (mut inst, probe) = instrument(Position::CENTER);
    assert!(inst.toggle_playing());
    let level = probe.log.borrow().last_set(NOISE, Param::Level).expect("level");
    assert_relative_eq!(level, db_to_gain(-15.0), epsilon = 1e-6);

    assert!(!inst.toggle_playing());
    assert_eq!(probe.log.borrow().last_set(NOISE, Param::Level), Some(0.0));
}

#[test]
fn repeated_play_state_is_a_no_op() {
    let (mut inst, probe) = instrument(Position::CENTER);
    inst.set_playing(true);
    probe.log.borrow_mut().clear_calls();
    inst.set_playing(true);
    assert!(probe.log.borrow().calls.is_empty());
}

#[test]
fn view_carries_color_and_overlay() {
    let (inst, _) = instrument(Position::CENTER);
    let view = inst.view();
    assert_eq!(view.color.dominant, NoiseColor::White);
    assert!(!view.playing);
    assert!(view.response.lowpass.opacity > 0.0);
    assert!(view.response.highpass.opacity > 0.0);
}

#[test]
fn waveform_snapshots_come_from_the_tap() {
    let (mut inst, _) = instrument(Position::CENTER);
    let mut sampler = WaveformSampler::new(inst.config().analyser_size);
    let mut surface = RecordingSurface::new(256.0, 100.0);
    sampler.set_playing(true, &mut surface);
    assert!(sampler.tick(&mut inst, &mut surface));
    let pts = &surface.draws[0];
    assert_eq!(pts.len(), 256);
    assert!(pts.iter().all(|&(_, y)| (y - 75.0).abs() < 1e-4));

    let mut out = [0.0f32; 4];
    inst.snapshot(&mut out);
    assert_eq!(out, [0.5; 4]);
}

#[test]
fn shutdown_silences_and_releases_the_graph() {
    let (mut inst, probe) = instrument(Position::CENTER);
    inst.set_playing(true);
    inst.shutdown();
    inst.shutdown();
    assert!(!inst.is_playing());
    assert!(inst.graph().is_disposed());
    {
        let log = probe.log.borrow();
        assert_eq!(log.disposed().len(), TOTAL_NODE_COUNT);
        assert_eq!(log.last_set(NOISE, Param::Level), Some(0.0));
    }

    // Later input is accepted but no longer touches audio.
    probe.log.borrow_mut().clear_calls();
    inst.set_position(Position::new(10.0, 10.0));
    assert!(probe.log.borrow().calls.is_empty());
    assert_eq!(inst.position(), Position::new(10.0, 10.0));
}
