/// Drawing target for the waveform preview.
pub trait RenderSurface {
    /// Current drawable size in pixels.
    fn size(&self) -> (f32, f32);
    /// Replace the current contents with a single polyline.
    fn draw_polyline(&mut self, points: &[(f32, f32)]);
    fn clear(&mut self);
}

/// Read-only access to the analysis tap.
pub trait WaveformSource {
    /// Fill `out` with the most recent samples, each in `[-1, 1]`.
    fn snapshot(&mut self, out: &mut [f32]);
}

/// Map samples to pixel coordinates: `x = i/len * width`,
/// `y = (s + 1)/2 * height`. Samples are clamped to `[-1, 1]`.
pub fn polyline_into(samples: &[f32], width: f32, height: f32, out: &mut Vec<(f32, f32)>) {
    out.clear();
    let len = samples.len();
    if len == 0 {
        return;
    }
    out.extend(samples.iter().enumerate().map(|(i, s)| {
        let s = if s.is_finite() { s.clamp(-1.0, 1.0) } else { 0.0 };
        let x = (i as f32 / len as f32) * width;
        let y = ((s + 1.0) / 2.0) * height;
        (x, y)
    }));
}

pub fn polyline(samples: &[f32], width: f32, height: f32) -> Vec<(f32, f32)> {
    let mut out = Vec::with_capacity(samples.len());
    polyline_into(samples, width, height, &mut out);
    out
}

/// Per-frame waveform preview state.
///
/// Draws only while playing. The playing → stopped edge clears the surface
/// exactly once; ticks while stopped are no-ops.
#[derive(Debug)]
pub struct WaveformSampler {
    playing: bool,
    samples: Vec<f32>,
    points: Vec<(f32, f32)>,
}

impl WaveformSampler {
    pub fn new(snapshot_len: usize) -> Self {
        Self {
            playing: false,
            samples: vec![0.0; snapshot_len],
            points: Vec::with_capacity(snapshot_len),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn snapshot_len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true when the state actually changed.
    pub fn set_playing<S: RenderSurface + ?Sized>(
        &mut self,
        playing: bool,
        surface: &mut S,
    ) -> bool {
        if self.playing == playing {
            return false;
        }
        self.playing = playing;
        if !playing {
            surface.clear();
            log::debug!("[waveform] stopped, surface cleared");
        } else {
            log::debug!("[waveform] live");
        }
        true
    }

    /// Pull one snapshot and draw it. Returns whether the loop should keep
    /// rescheduling.
    pub fn tick<W, S>(&mut self, source: &mut W, surface: &mut S) -> bool
    where
        W: WaveformSource + ?Sized,
        S: RenderSurface + ?Sized,
    {
        if !self.playing {
            return false;
        }
        source.snapshot(&mut self.samples);
        let (w, h) = surface.size();
        polyline_into(&self.samples, w, h, &mut self.points);
        surface.draw_polyline(&self.points);
        true
    }
}
