use super::color::{compute_color, ColorBlend};
use super::constants::{ANALYSER_SIZE, MOTION_DURATION_MS, NOISE_LEVEL_DB, RESONANCE_DEFAULT};
use super::display::FilterResponseOverlay;
use super::graph::{db_to_gain, AudioBackend, FilterGraph, GraphError};
use super::mapper::{clamp_resonance, map_position, DisplayFilterState, FilterParameters};
use super::position::Position;
use super::waveform::WaveformSource;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct InstrumentConfig {
    pub noise_level_db: f32,
    pub analyser_size: usize,
    pub motion_duration: Duration,
    pub initial_resonance: f32,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            noise_level_db: NOISE_LEVEL_DB,
            analyser_size: ANALYSER_SIZE,
            motion_duration: Duration::from_millis(MOTION_DURATION_MS),
            initial_resonance: RESONANCE_DEFAULT,
        }
    }
}

/// Everything the readout shows for the current control state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PadView {
    pub position: Position,
    pub resonance: f32,
    pub playing: bool,
    pub display: DisplayFilterState,
    pub color: ColorBlend,
    pub response: FilterResponseOverlay,
}

/// Single owner of the control state and the filter graph.
///
/// Every position or resonance change is mapped and written to the graph
/// before the setter returns, so graph state never lags the last input.
pub struct Instrument<B: AudioBackend> {
    graph: FilterGraph<B>,
    config: InstrumentConfig,
    position: Position,
    resonance: f32,
    playing: bool,
    params: FilterParameters,
}

impl<B: AudioBackend> Instrument<B> {
    pub fn new(
        backend: B,
        config: InstrumentConfig,
        initial: Position,
    ) -> Result<Self, GraphError> {
        let mut graph = FilterGraph::build(backend, config.analyser_size)?;
        let position = initial.clamped();
        let resonance = clamp_resonance(config.initial_resonance);
        let params = map_position(position, resonance);
        graph.set_source_level(0.0);
        graph.apply(&params);
        log::info!(
            "[pad] ready at ({:.1},{:.1}) q={:.2}",
            position.x,
            position.y,
            resonance
        );
        Ok(Self {
            graph,
            config,
            position,
            resonance,
            playing: false,
            params,
        })
    }

    pub fn config(&self) -> &InstrumentConfig {
        &self.config
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn params(&self) -> &FilterParameters {
        &self.params
    }

    pub fn graph(&self) -> &FilterGraph<B> {
        &self.graph
    }

    pub fn set_position(&mut self, position: Position) -> PadView {
        self.position = position.clamped();
        self.remap();
        self.view()
    }

    pub fn set_resonance(&mut self, q: f32) -> PadView {
        self.resonance = clamp_resonance(q);
        self.remap();
        self.view()
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.playing == playing {
            return;
        }
        self.playing = playing;
        let level = if playing {
            db_to_gain(self.config.noise_level_db)
        } else {
            0.0
        };
        self.graph.set_source_level(level);
        log::info!("[pad] {}", if playing { "playing" } else { "stopped" });
    }

    pub fn toggle_playing(&mut self) -> bool {
        self.set_playing(!self.playing);
        self.playing
    }

    pub fn view(&self) -> PadView {
        let display = self.params.display();
        PadView {
            position: self.position,
            resonance: self.resonance,
            playing: self.playing,
            display,
            color: compute_color(self.position),
            response: FilterResponseOverlay::from_display(&display),
        }
    }

    /// Stop the source and release the graph. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.playing = false;
        self.graph.set_source_level(0.0);
        self.graph.dispose();
    }

    fn remap(&mut self) {
        self.params = map_position(self.position, self.resonance);
        self.graph.apply(&self.params);
    }
}

impl<B: AudioBackend> WaveformSource for Instrument<B> {
    fn snapshot(&mut self, out: &mut [f32]) {
        self.graph.read_waveform(out);
    }
}
