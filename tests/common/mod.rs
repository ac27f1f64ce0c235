// Shared host-side harness. The main crate is wasm-only, so the pure engine
// modules are included here and every test file reaches them via `common::engine`.
#![allow(dead_code)]

pub mod engine {
    pub mod color {
        include!("../../src/engine/color.rs");
    }
    pub mod constants {
        include!("../../src/engine/constants.rs");
    }
    pub mod display {
        include!("../../src/engine/display.rs");
    }
    pub mod graph {
        include!("../../src/engine/graph.rs");
    }
    pub mod instrument {
        include!("../../src/engine/instrument.rs");
    }
    pub mod mapper {
        include!("../../src/engine/mapper.rs");
    }
    pub mod motion {
        include!("../../src/engine/motion.rs");
    }
    pub mod persist {
        include!("../../src/engine/persist.rs");
    }
    pub mod position {
        include!("../../src/engine/position.rs");
    }
    pub mod task {
        include!("../../src/engine/task.rs");
    }
    pub mod waveform {
        include!("../../src/engine/waveform.rs");
    }
}

use engine::graph::{AudioBackend, NodeKind, Param, Port};
use engine::persist::{PositionStore, StoreError};
use engine::position::Position;
use engine::waveform::{RenderSurface, WaveformSource};
use std::cell::RefCell;
use std::rc::Rc;

// ---------------- Audio backend double ----------------

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Create(usize, NodeKind),
    Connect(usize, usize, Port),
    Output(usize),
    Set(usize, Param, f32),
    Read(usize),
    Dispose(usize),
}

#[derive(Debug, Default)]
pub struct BackendLog {
    pub calls: Vec<Call>,
    pub kinds: Vec<NodeKind>,
}

impl BackendLog {
    pub fn created(&self) -> usize {
        self.kinds.len()
    }

    pub fn connections(&self) -> Vec<(usize, usize, Port)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Connect(a, b, p) => Some((*a, *b, *p)),
                _ => None,
            })
            .collect()
    }

    pub fn disposed(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Dispose(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    /// Last value written to `param` on `node`.
    pub fn last_set(&self, node: usize, param: Param) -> Option<f32> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Set(n, p, v) if *n == node && *p == param => Some(*v),
            _ => None,
        })
    }

    pub fn sets(&self) -> Vec<(usize, Param, f32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Set(n, p, v) => Some((*n, *p, *v)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

/// Records every call. Nodes are plain indices into `kinds`.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    pub log: Rc<RefCell<BackendLog>>,
    /// Fail the n-th `create` (0-based).
    pub fail_create_at: Option<usize>,
    /// Fail the n-th `connect` (0-based).
    pub fail_connect_at: Option<usize>,
    pub waveform: Vec<f32>,
    connects: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create(at: usize) -> Self {
        Self {
            fail_create_at: Some(at),
            ..Self::default()
        }
    }

    pub fn failing_connect(at: usize) -> Self {
        Self {
            fail_connect_at: Some(at),
            ..Self::default()
        }
    }

    pub fn with_waveform(samples: Vec<f32>) -> Self {
        Self {
            waveform: samples,
            ..Self::default()
        }
    }
}

impl AudioBackend for RecordingBackend {
    type Node = usize;
    type Error = String;

    fn create(&mut self, kind: NodeKind) -> Result<usize, String> {
        let mut log = self.log.borrow_mut();
        if self.fail_create_at == Some(log.kinds.len()) {
            return Err(format!("refused {:?}", kind));
        }
        let id = log.kinds.len();
        log.kinds.push(kind);
        log.calls.push(Call::Create(id, kind));
        Ok(id)
    }

    fn connect(&mut self, from: &usize, to: &usize, port: Port) -> Result<(), String> {
        let n = self.connects;
        self.connects += 1;
        if self.fail_connect_at == Some(n) {
            return Err("connect refused".into());
        }
        self.log
            .borrow_mut()
            .calls
            .push(Call::Connect(*from, *to, port));
        Ok(())
    }

    fn connect_output(&mut self, node: &usize) -> Result<(), String> {
        self.log.borrow_mut().calls.push(Call::Output(*node));
        Ok(())
    }

    fn set_param(&mut self, node: &usize, param: Param, value: f32) {
        self.log
            .borrow_mut()
            .calls
            .push(Call::Set(*node, param, value));
    }

    fn read_waveform(&mut self, tap: &usize, out: &mut [f32]) {
        self.log.borrow_mut().calls.push(Call::Read(*tap));
        for (o, s) in out.iter_mut().zip(self.waveform.iter()) {
            *o = *s;
        }
    }

    fn dispose(&mut self, node: usize) {
        self.log.borrow_mut().calls.push(Call::Dispose(node));
    }
}

// ---------------- Render surface / source doubles ----------------

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub draws: Vec<Vec<(f32, f32)>>,
    pub clears: usize,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn draw_polyline(&mut self, points: &[(f32, f32)]) {
        self.draws.push(points.to_vec());
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

/// Always returns the same samples; counts snapshots.
pub struct FixedSource {
    pub samples: Vec<f32>,
    pub reads: usize,
}

impl FixedSource {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, reads: 0 }
    }
}

impl WaveformSource for FixedSource {
    fn snapshot(&mut self, out: &mut [f32]) {
        self.reads += 1;
        for (o, s) in out.iter_mut().zip(self.samples.iter()) {
            *o = *s;
        }
    }
}

// ---------------- Position store double ----------------

#[derive(Default)]
pub struct MemoryStore {
    pub raw: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: RefCell::new(Some(raw.to_string())),
        }
    }
}

impl PositionStore for MemoryStore {
    fn load(&self) -> Result<Option<Position>, StoreError> {
        self.raw
            .borrow()
            .as_deref()
            .map(engine::persist::decode_position)
            .transpose()
    }

    fn save(&self, position: Position) -> Result<(), StoreError> {
        *self.raw.borrow_mut() = Some(engine::persist::encode_position(position)?);
        Ok(())
    }
}
