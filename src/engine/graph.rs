use super::mapper::{FilterParameters, FilterType, RolloffTier};
use std::fmt::Debug;
use thiserror::Error;

/// What to ask the audio backend to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Noise,
    Filter { family: FilterType, tier: RolloffTier },
    Crossfade,
    Analyser { size: usize },
}

/// Input port on the destination node of a connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Port {
    Main,
    A,
    B,
}

/// Scalar parameter written during `apply`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    Frequency,
    Q,
    Fade,
    Level,
}

/// Node construction and control primitives supplied by the host audio engine.
///
/// The graph only decides how many nodes exist, how they connect, and which
/// scalar of each node gets written. DSP is entirely the backend's concern.
pub trait AudioBackend {
    type Node: Clone;
    type Error: Debug;

    fn create(&mut self, kind: NodeKind) -> Result<Self::Node, Self::Error>;
    fn connect(&mut self, from: &Self::Node, to: &Self::Node, port: Port)
        -> Result<(), Self::Error>;
    /// Route a node to the audible output.
    fn connect_output(&mut self, node: &Self::Node) -> Result<(), Self::Error>;
    fn set_param(&mut self, node: &Self::Node, param: Param, value: f32);
    /// Fill `out` with the latest time-domain snapshot of an analyser node.
    fn read_waveform(&mut self, tap: &Self::Node, out: &mut [f32]);
    /// Release a node. Must tolerate nodes that were never connected.
    fn dispose(&mut self, node: Self::Node);
}

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to create {label} node: {reason}")]
    Create { label: &'static str, reason: String },
    #[error("failed to connect {from} -> {to}: {reason}")]
    Connect {
        from: &'static str,
        to: &'static str,
        reason: String,
    },
}

const LOWPASS_LABELS: [&str; 3] = ["lpf12", "lpf24", "lpf48"];
const HIGHPASS_LABELS: [&str; 3] = ["hpf12", "hpf24", "hpf48"];
const TYPE_FADE_LABELS: [&str; 3] = ["xf12", "xf24", "xf48"];
const TIER_FADE_LABELS: [&str; 2] = ["xf12_24", "xf24_48"];

pub const FILTER_NODE_COUNT: usize = 6;
pub const CROSSFADE_NODE_COUNT: usize = 6;
pub const TOTAL_NODE_COUNT: usize = 1 + FILTER_NODE_COUNT + CROSSFADE_NODE_COUNT + 1;

/// Named handles for the fixed topology.
///
/// ```text
/// noise ─┬─ lpf12 ─A─ xf12 ─A─ xf12_24 ─A─┐
///        ├─ hpf12 ─B─┘     ┌B─┘           master ─┬─ output
///        ├─ lpf24 ─A─ xf24 ┴A─ xf24_48 ─B─┘       └─ analyser
///        ├─ hpf24 ─B─┘     ┌B─┘
///        ├─ lpf48 ─A─ xf48 ┘
///        └─ hpf48 ─B─┘
/// ```
#[derive(Clone, Debug)]
pub struct GraphNodes<N> {
    pub noise: N,
    pub lowpass: [N; 3],
    pub highpass: [N; 3],
    pub type_fades: [N; 3],
    pub tier_fades: [N; 2],
    pub master: N,
    pub analyser: N,
}

impl<N> GraphNodes<N> {
    fn into_vec(self) -> Vec<N> {
        let mut all = Vec::with_capacity(TOTAL_NODE_COUNT);
        all.push(self.noise);
        all.extend(self.lowpass);
        all.extend(self.highpass);
        all.extend(self.type_fades);
        all.extend(self.tier_fades);
        all.push(self.master);
        all.push(self.analyser);
        all
    }
}

/// Noise source, six filters, crossfade tree and analyser tap.
///
/// Built once; `apply` only ever writes node parameters. Nodes are released by
/// `dispose` or on drop, whichever happens first.
pub struct FilterGraph<B: AudioBackend> {
    backend: B,
    nodes: Option<GraphNodes<B::Node>>,
    analyser_size: usize,
}

impl<B: AudioBackend> FilterGraph<B> {
    /// Create and wire every node. On failure, nodes created so far are
    /// disposed before the error is returned.
    pub fn build(mut backend: B, analyser_size: usize) -> Result<Self, GraphError> {
        let mut created: Vec<B::Node> = Vec::with_capacity(TOTAL_NODE_COUNT);
        match build_nodes(&mut backend, &mut created, analyser_size) {
            Ok(nodes) => {
                log::info!(
                    "[graph] built {} nodes ({} filters, {} crossfades)",
                    created.len(),
                    FILTER_NODE_COUNT,
                    CROSSFADE_NODE_COUNT
                );
                Ok(Self {
                    backend,
                    nodes: Some(nodes),
                    analyser_size,
                })
            }
            Err(e) => {
                log::error!("[graph] build failed: {}", e);
                for node in created.into_iter().rev() {
                    backend.dispose(node);
                }
                Err(e)
            }
        }
    }

    pub fn nodes(&self) -> Option<&GraphNodes<B::Node>> {
        self.nodes.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn analyser_size(&self) -> usize {
        self.analyser_size
    }

    pub fn is_disposed(&self) -> bool {
        self.nodes.is_none()
    }

    /// Write one parameter set into the live nodes. Each write lands on its
    /// own; a reader between writes can observe a partially applied set.
    pub fn apply(&mut self, params: &FilterParameters) {
        let Some(nodes) = self.nodes.as_ref() else {
            log::debug!("[graph] apply after dispose ignored");
            return;
        };
        let b = &mut self.backend;
        for n in &nodes.lowpass {
            b.set_param(n, Param::Frequency, params.low_freq);
        }
        for n in &nodes.highpass {
            b.set_param(n, Param::Frequency, params.high_freq);
        }
        for n in nodes.lowpass.iter().chain(nodes.highpass.iter()) {
            b.set_param(n, Param::Q, params.resonance_q);
        }
        for n in &nodes.type_fades {
            b.set_param(n, Param::Fade, params.filter_blend);
        }
        b.set_param(&nodes.tier_fades[0], Param::Fade, params.rolloff.tier0_to_1);
        b.set_param(&nodes.tier_fades[1], Param::Fade, params.rolloff.tier1_to_2);
        b.set_param(&nodes.master, Param::Fade, params.rolloff.master.fade());
        log::trace!(
            "[graph] lpf={:.1}Hz hpf={:.1}Hz blend={:.3} q={:.2}",
            params.low_freq,
            params.high_freq,
            params.filter_blend,
            params.resonance_q
        );
    }

    /// Gain of the noise source (linear). Zero silences the instrument.
    pub fn set_source_level(&mut self, gain: f32) {
        if let Some(nodes) = self.nodes.as_ref() {
            self.backend.set_param(&nodes.noise, Param::Level, gain);
        }
    }

    /// Copy the analyser's latest snapshot into `out`. Leaves `out` untouched
    /// once disposed.
    pub fn read_waveform(&mut self, out: &mut [f32]) {
        if let Some(nodes) = self.nodes.as_ref() {
            self.backend.read_waveform(&nodes.analyser, out);
        }
    }

    /// Release every node. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if let Some(nodes) = self.nodes.take() {
            for node in nodes.into_vec() {
                self.backend.dispose(node);
            }
            log::info!("[graph] disposed");
        }
    }
}

impl<B: AudioBackend> Drop for FilterGraph<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn create<B: AudioBackend>(
    backend: &mut B,
    created: &mut Vec<B::Node>,
    kind: NodeKind,
    label: &'static str,
) -> Result<B::Node, GraphError> {
    let node = backend.create(kind).map_err(|e| GraphError::Create {
        label,
        reason: format!("{:?}", e),
    })?;
    created.push(node.clone());
    Ok(node)
}

fn connect<B: AudioBackend>(
    backend: &mut B,
    (from, from_label): (&B::Node, &'static str),
    (to, to_label): (&B::Node, &'static str),
    port: Port,
) -> Result<(), GraphError> {
    backend
        .connect(from, to, port)
        .map_err(|e| GraphError::Connect {
            from: from_label,
            to: to_label,
            reason: format!("{:?}", e),
        })
}

fn build_nodes<B: AudioBackend>(
    backend: &mut B,
    created: &mut Vec<B::Node>,
    analyser_size: usize,
) -> Result<GraphNodes<B::Node>, GraphError> {
    let noise = create(backend, created, NodeKind::Noise, "noise")?;

    let lowpass = filter_bank(backend, created, FilterType::Lowpass, LOWPASS_LABELS)?;
    let highpass = filter_bank(backend, created, FilterType::Highpass, HIGHPASS_LABELS)?;
    let type_fades = [
        create(backend, created, NodeKind::Crossfade, TYPE_FADE_LABELS[0])?,
        create(backend, created, NodeKind::Crossfade, TYPE_FADE_LABELS[1])?,
        create(backend, created, NodeKind::Crossfade, TYPE_FADE_LABELS[2])?,
    ];
    let tier_fades = [
        create(backend, created, NodeKind::Crossfade, TIER_FADE_LABELS[0])?,
        create(backend, created, NodeKind::Crossfade, TIER_FADE_LABELS[1])?,
    ];
    let master = create(backend, created, NodeKind::Crossfade, "master")?;
    let analyser = create(
        backend,
        created,
        NodeKind::Analyser {
            size: analyser_size,
        },
        "analyser",
    )?;

    // Filters into their type crossfaders first: lowpass on A, highpass on B.
    for i in 0..3 {
        connect(
            backend,
            (&lowpass[i], LOWPASS_LABELS[i]),
            (&type_fades[i], TYPE_FADE_LABELS[i]),
            Port::A,
        )?;
        connect(
            backend,
            (&highpass[i], HIGHPASS_LABELS[i]),
            (&type_fades[i], TYPE_FADE_LABELS[i]),
            Port::B,
        )?;
    }

    // The 24 dB tier feeds both tier crossfaders.
    let tiers = [
        (0, Port::A, 0),
        (1, Port::B, 0),
        (1, Port::A, 1),
        (2, Port::B, 1),
    ];
    for (type_i, port, tier_i) in tiers {
        connect(
            backend,
            (&type_fades[type_i], TYPE_FADE_LABELS[type_i]),
            (&tier_fades[tier_i], TIER_FADE_LABELS[tier_i]),
            port,
        )?;
    }
    connect(
        backend,
        (&tier_fades[0], TIER_FADE_LABELS[0]),
        (&master, "master"),
        Port::A,
    )?;
    connect(
        backend,
        (&tier_fades[1], TIER_FADE_LABELS[1]),
        (&master, "master"),
        Port::B,
    )?;

    backend
        .connect_output(&master)
        .map_err(|e| GraphError::Connect {
            from: "master",
            to: "output",
            reason: format!("{:?}", e),
        })?;
    connect(backend, (&master, "master"), (&analyser, "analyser"), Port::Main)?;

    // Source fan-out last so nothing is audible until the tree is complete.
    for (n, label) in lowpass.iter().zip(LOWPASS_LABELS) {
        connect(backend, (&noise, "noise"), (n, label), Port::Main)?;
    }
    for (n, label) in highpass.iter().zip(HIGHPASS_LABELS) {
        connect(backend, (&noise, "noise"), (n, label), Port::Main)?;
    }

    Ok(GraphNodes {
        noise,
        lowpass,
        highpass,
        type_fades,
        tier_fades,
        master,
        analyser,
    })
}

fn filter_bank<B: AudioBackend>(
    backend: &mut B,
    created: &mut Vec<B::Node>,
    family: FilterType,
    labels: [&'static str; 3],
) -> Result<[B::Node; 3], GraphError> {
    let [t0, t1, t2] = RolloffTier::ALL;
    Ok([
        create(backend, created, NodeKind::Filter { family, tier: t0 }, labels[0])?,
        create(backend, created, NodeKind::Filter { family, tier: t1 }, labels[1])?,
        create(backend, created, NodeKind::Filter { family, tier: t2 }, labels[2])?,
    ])
}

/// Equal-power crossfade law: gains for inputs A and B at a fade in `[0, 1]`.
#[inline]
pub fn equal_power_gains(fade: f32) -> (f32, f32) {
    let f = fade.clamp(0.0, 1.0) * std::f32::consts::FRAC_PI_2;
    (f.cos(), f.sin())
}

/// Convert decibels to linear gain.
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}
