// Front-end wiring constants: DOM ids, drawing style, storage.
// Curve and color tuning lives in `engine::constants`.

// Pad and readout elements
pub const PAD_ID: &str = "noise-pad";
pub const KNOB_ID: &str = "pad-knob";
pub const FILTER_LABEL_ID: &str = "filter-label";
pub const COLOR_DOT_ID: &str = "color-dot";
pub const COLOR_NAME_ID: &str = "color-name";
pub const ROLLOFF_LABEL_ID: &str = "rolloff-label";
pub const RESPONSE_LOWPASS_ID: &str = "response-lowpass";
pub const RESPONSE_HIGHPASS_ID: &str = "response-highpass";

// Controls
pub const PLAY_BUTTON_ID: &str = "play-button";
pub const RANDOM_BUTTON_ID: &str = "random-button";
pub const RESET_BUTTON_ID: &str = "reset-button";
pub const RESONANCE_INPUT_ID: &str = "resonance-input";
pub const RESONANCE_VALUE_ID: &str = "resonance-value";

// Waveform preview
pub const WAVEFORM_CANVAS_ID: &str = "waveform-canvas";
pub const WAVEFORM_STATUS_ID: &str = "waveform-status";
pub const WAVEFORM_STROKE: &str = "#333333";
pub const WAVEFORM_LINE_WIDTH: f64 = 1.5;

// Filter-response band colors
pub const RESPONSE_PASS_RGBA: &str = "rgba(50,200,50,0.3)";
pub const RESPONSE_STOP_RGBA: &str = "rgba(50,50,50,0.1)";

// Looping white-noise buffer length
pub const NOISE_BUFFER_SECONDS: f32 = 2.0;
pub const NOISE_SEED: u64 = 0x1234_ABCD;

// Persistence
pub const STORAGE_KEY: &str = "noise-sculptor.position";
