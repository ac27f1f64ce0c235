use crate::constants::{NOISE_BUFFER_SECONDS, NOISE_SEED};
use crate::engine::graph::{equal_power_gains, AudioBackend, NodeKind, Param, Port};
use crate::engine::mapper::{FilterType, RolloffTier};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::JsValue;
use web_sys as web;

/// WebAudio realization of one graph node. Multi-node shapes keep their
/// inner nodes so they can be driven and torn down together.
#[derive(Clone)]
pub enum WebNode {
    /// Looping white-noise buffer into a level gain.
    Noise {
        source: web::AudioBufferSourceNode,
        level: web::GainNode,
    },
    /// Cascaded biquads, 12 dB/oct each.
    Filter { stages: Vec<web::BiquadFilterNode> },
    /// Two input gains summed into one output.
    Crossfade {
        a: web::GainNode,
        b: web::GainNode,
        out: web::GainNode,
    },
    Analyser(web::AnalyserNode),
}

#[inline]
fn as_node<T: AsRef<web::AudioNode>>(n: &T) -> &web::AudioNode {
    n.as_ref()
}

impl WebNode {
    fn output(&self) -> Option<&web::AudioNode> {
        match self {
            WebNode::Noise { level, .. } => Some(as_node(level)),
            WebNode::Filter { stages } => stages.last().map(as_node),
            WebNode::Crossfade { out, .. } => Some(as_node(out)),
            WebNode::Analyser(a) => Some(as_node(a)),
        }
    }

    fn input(&self, port: Port) -> Option<&web::AudioNode> {
        match (self, port) {
            (WebNode::Filter { stages }, Port::Main) => stages.first().map(as_node),
            (WebNode::Crossfade { a, .. }, Port::A) => Some(as_node(a)),
            (WebNode::Crossfade { b, .. }, Port::B) => Some(as_node(b)),
            (WebNode::Analyser(a), Port::Main) => Some(as_node(a)),
            _ => None,
        }
    }
}

pub struct WebAudioBackend {
    ctx: web::AudioContext,
}

impl WebAudioBackend {
    pub fn new(ctx: web::AudioContext) -> Self {
        Self { ctx }
    }
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, JsValue> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(e)
        }
    }
}

fn create_noise(audio_ctx: &web::AudioContext) -> Result<WebNode, JsValue> {
    let sr = audio_ctx.sample_rate();
    let len = (sr * NOISE_BUFFER_SECONDS) as u32;
    let buffer = audio_ctx.create_buffer(1, len.max(1), sr)?;
    let mut rng = StdRng::seed_from_u64(NOISE_SEED);
    let mut samples: Vec<f32> = (0..len).map(|_| rng.gen_range(-1.0..=1.0)).collect();
    buffer.copy_to_channel(&mut samples, 0)?;

    let source = web::AudioBufferSourceNode::new(audio_ctx).map_err(|e| {
        log::error!("AudioBufferSourceNode error: {:?}", e);
        e
    })?;
    source.set_buffer(Some(&buffer));
    source.set_loop(true);
    let level = create_gain(audio_ctx, 0.0, "Noise level")?;
    source.connect_with_audio_node(&level)?;
    #[allow(deprecated)]
    source.start()?;
    Ok(WebNode::Noise { source, level })
}

fn create_filter(
    audio_ctx: &web::AudioContext,
    family: FilterType,
    tier: RolloffTier,
) -> Result<WebNode, JsValue> {
    let (kind, open_hz) = match family {
        FilterType::Lowpass => (web::BiquadFilterType::Lowpass, 20_000.0),
        FilterType::Highpass => (web::BiquadFilterType::Highpass, 20.0),
    };
    let mut stages: Vec<web::BiquadFilterNode> = Vec::with_capacity(tier.sections());
    for _ in 0..tier.sections() {
        let f = web::BiquadFilterNode::new(audio_ctx).map_err(|e| {
            log::error!("BiquadFilterNode error: {:?}", e);
            e
        })?;
        f.set_type(kind);
        f.frequency().set_value(open_hz);
        if let Some(prev) = stages.last() {
            prev.connect_with_audio_node(&f)?;
        }
        stages.push(f);
    }
    Ok(WebNode::Filter { stages })
}

fn create_crossfade(audio_ctx: &web::AudioContext) -> Result<WebNode, JsValue> {
    let (ga, gb) = equal_power_gains(0.5);
    let a = create_gain(audio_ctx, ga, "Crossfade A")?;
    let b = create_gain(audio_ctx, gb, "Crossfade B")?;
    let out = create_gain(audio_ctx, 1.0, "Crossfade out")?;
    a.connect_with_audio_node(&out)?;
    b.connect_with_audio_node(&out)?;
    Ok(WebNode::Crossfade { a, b, out })
}

fn create_analyser(audio_ctx: &web::AudioContext, size: usize) -> Result<WebNode, JsValue> {
    let analyser = web::AnalyserNode::new(audio_ctx).map_err(|e| {
        log::error!("AnalyserNode error: {:?}", e);
        e
    })?;
    analyser.set_fft_size(size.next_power_of_two().clamp(32, 32_768) as u32);
    Ok(WebNode::Analyser(analyser))
}

impl AudioBackend for WebAudioBackend {
    type Node = WebNode;
    type Error = JsValue;

    fn create(&mut self, kind: NodeKind) -> Result<WebNode, JsValue> {
        match kind {
            NodeKind::Noise => create_noise(&self.ctx),
            NodeKind::Filter { family, tier } => create_filter(&self.ctx, family, tier),
            NodeKind::Crossfade => create_crossfade(&self.ctx),
            NodeKind::Analyser { size } => create_analyser(&self.ctx, size),
        }
    }

    fn connect(&mut self, from: &WebNode, to: &WebNode, port: Port) -> Result<(), JsValue> {
        let out = from
            .output()
            .ok_or_else(|| JsValue::from_str("node has no output"))?;
        let input = to
            .input(port)
            .ok_or_else(|| JsValue::from_str(&format!("node has no {:?} input", port)))?;
        out.connect_with_audio_node(input).map(|_| ())
    }

    fn connect_output(&mut self, node: &WebNode) -> Result<(), JsValue> {
        let out = node
            .output()
            .ok_or_else(|| JsValue::from_str("node has no output"))?;
        out.connect_with_audio_node(&self.ctx.destination())
            .map(|_| ())
    }

    fn set_param(&mut self, node: &WebNode, param: Param, value: f32) {
        match (node, param) {
            (WebNode::Filter { stages }, Param::Frequency) => {
                for s in stages {
                    s.frequency().set_value(value);
                }
            }
            (WebNode::Filter { stages }, Param::Q) => {
                for s in stages {
                    s.q().set_value(value);
                }
            }
            (WebNode::Crossfade { a, b, .. }, Param::Fade) => {
                let (ga, gb) = equal_power_gains(value);
                a.gain().set_value(ga);
                b.gain().set_value(gb);
            }
            (WebNode::Noise { level, .. }, Param::Level) => {
                level.gain().set_value(value);
            }
            (_, p) => log::trace!("[graph] {:?} not applicable to node", p),
        }
    }

    fn read_waveform(&mut self, tap: &WebNode, out: &mut [f32]) {
        if let WebNode::Analyser(a) = tap {
            let len = (a.fft_size() as usize).min(out.len());
            a.get_float_time_domain_data(&mut out[..len]);
        }
    }

    fn dispose(&mut self, node: WebNode) {
        match node {
            WebNode::Noise { source, level } => {
                #[allow(deprecated)]
                {
                    _ = source.stop();
                }
                _ = source.disconnect();
                _ = level.disconnect();
            }
            WebNode::Filter { stages } => {
                for s in stages {
                    _ = s.disconnect();
                }
            }
            WebNode::Crossfade { a, b, out } => {
                _ = a.disconnect();
                _ = b.disconnect();
                _ = out.disconnect();
            }
            WebNode::Analyser(a) => {
                _ = a.disconnect();
            }
        }
    }
}
