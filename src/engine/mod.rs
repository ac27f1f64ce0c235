pub mod color;
pub mod constants;
pub mod display;
pub mod graph;
pub mod instrument;
pub mod mapper;
pub mod motion;
pub mod persist;
pub mod position;
pub mod task;
pub mod waveform;

pub use color::{compute_color, ColorBlend, ColorModel, NoiseColor, RadialColorModel};
pub use display::{filter_label, rolloff_label, FilterResponseOverlay, ResponseLayer};
pub use graph::{AudioBackend, FilterGraph, GraphError, NodeKind, Param, Port};
pub use instrument::{Instrument, InstrumentConfig, PadView};
pub use mapper::{map_position, DisplayFilterState, FilterParameters, FilterType, RolloffTier};
pub use motion::{MotionController, MotionRequest, MotionStep};
pub use persist::{PositionStore, StoreError};
pub use position::Position;
pub use task::{TaskSlot, TaskToken};
pub use waveform::{RenderSurface, WaveformSampler, WaveformSource};
