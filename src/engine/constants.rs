// Curve, color and timing constants shared by the pad engine.
//
// Keep these free of platform types; host-side tests include this file directly.

// Pad coordinate range (percent of pad width/height)
pub const PAD_MIN: f32 = 0.0;
pub const PAD_MAX: f32 = 100.0;
pub const PAD_CENTER: f32 = 50.0;

// Lowpass/highpass crossfade window on the normalized x axis
pub const BLEND_START_X: f32 = 0.4;
pub const BLEND_WIDTH_X: f32 = 0.2;

// Lowpass cutoff curve: 10^(LPF_LOG_TOP - factor * LPF_LOG_SPAN)
pub const LPF_X_SLOPE: f32 = 2.0;
pub const LPF_LOG_TOP: f32 = 4.3;
pub const LPF_LOG_SPAN: f32 = 2.7;
pub const LPF_OPEN_HZ: f32 = 22_000.0; // effectively no filtering

// Highpass cutoff curve: 10^(HPF_LOG_BASE + factor * HPF_LOG_SPAN)
pub const HPF_X_SLOPE: f32 = 1.5;
pub const HPF_X_OFFSET: f32 = 0.5;
pub const HPF_LOG_BASE: f32 = 1.5;
pub const HPF_LOG_SPAN: f32 = 3.0;
pub const HPF_OPEN_HZ: f32 = 20.0; // effectively no filtering

// Display type hysteresis thresholds on the blend value
pub const DISPLAY_LOWPASS_BELOW: f32 = 0.1;
pub const DISPLAY_HIGHPASS_ABOVE: f32 = 0.9;

// Rolloff tiers (dB/octave, as positive magnitudes)
pub const TIER_SLOPES_DB: [f32; 3] = [12.0, 24.0, 48.0];
pub const TIER_SPLIT_Y: f32 = 0.5;

// Resonance (Q) range shared by all six filters
pub const RESONANCE_MIN: f32 = 0.1;
pub const RESONANCE_MAX: f32 = 10.0;
pub const RESONANCE_DEFAULT: f32 = 1.0;

// Radial color model
pub const COLOR_ANCHOR_RADIUS: f32 = 0.4;
pub const COLOR_ANCHOR_EXPONENT: f32 = 1.2;
pub const COLOR_ANCHOR_GAIN: f32 = 2.0;
pub const COLOR_WHITE_GAIN: f32 = 0.7;

// Anchors in normalized pad space (x right, y down)
pub const PINK_ANCHOR: [f32; 2] = [0.15, 0.35]; // left, upper-mid
pub const BROWN_ANCHOR: [f32; 2] = [0.15, 0.8]; // left, lower
pub const BLUE_ANCHOR: [f32; 2] = [0.85, 0.55]; // right, mid
pub const VIOLET_ANCHOR: [f32; 2] = [0.85, 0.15]; // right, upper

// Reference colors (sRGB)
pub const BROWN_RGB: [u8; 3] = [160, 60, 45];
pub const PINK_RGB: [u8; 3] = [255, 50, 150];
pub const WHITE_RGB: [u8; 3] = [245, 245, 245];
pub const BLUE_RGB: [u8; 3] = [75, 115, 215];
pub const VIOLET_RGB: [u8; 3] = [150, 60, 200];

// Motion
pub const MOTION_DURATION_MS: u64 = 600;

// Audio source and analysis
pub const NOISE_LEVEL_DB: f32 = -15.0;
pub const ANALYSER_SIZE: usize = 256;

// Filter-response strip (percent of strip width per decade above 10 Hz)
pub const RESPONSE_PCT_PER_DECADE: f32 = 23.0;
pub const RESPONSE_FULL_RANGE_HZ: f32 = 20_000.0;
pub const RESPONSE_FLOOR_HZ: f32 = 20.0;
pub const RESPONSE_DB_PER_PCT: f32 = 6.0;
