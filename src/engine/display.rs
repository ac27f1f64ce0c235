use super::constants::{
    RESPONSE_DB_PER_PCT, RESPONSE_FLOOR_HZ, RESPONSE_FULL_RANGE_HZ, RESPONSE_PCT_PER_DECADE,
};
use super::mapper::{DisplayFilterState, FilterType};

/// "1,234 Hz LPF"
pub fn filter_label(state: &DisplayFilterState) -> String {
    format!(
        "{} Hz {}",
        group_thousands(state.frequency_hz),
        state.filter_type.short_label()
    )
}

/// "~-24 dB/oct"
pub fn rolloff_label(state: &DisplayFilterState) -> String {
    format!("~{} dB/oct", state.rolloff_db)
}

pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One translucent band on the filter-response strip. Stops are percentages
/// of the strip width on a log-frequency axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResponseLayer {
    /// Where the pass band ends (lowpass) or begins (highpass).
    pub edge_pct: f32,
    /// Where the attenuated region settles; further from the edge for steeper slopes.
    pub skirt_pct: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterResponseOverlay {
    pub lowpass: ResponseLayer,
    pub highpass: ResponseLayer,
}

impl FilterResponseOverlay {
    pub fn from_display(state: &DisplayFilterState) -> Self {
        let blend = state.filter_blend;
        let slope_pct = state.rolloff_db as f32 / -RESPONSE_DB_PER_PCT;

        let lp_hz = if blend < 0.5 {
            state.frequency_hz as f32
        } else {
            RESPONSE_FULL_RANGE_HZ
        };
        let lp_raw = strip_pct(lp_hz);
        let lowpass = ResponseLayer {
            edge_pct: lp_raw.clamp(5.0, 95.0),
            skirt_pct: (lp_raw + slope_pct).clamp(8.0, 98.0),
            opacity: (1.0 - blend * 1.5).max(0.0),
        };

        let hp_hz = if blend > 0.5 {
            state.frequency_hz as f32
        } else {
            RESPONSE_FLOOR_HZ
        };
        let hp_raw = strip_pct(hp_hz);
        let highpass = ResponseLayer {
            edge_pct: hp_raw.clamp(5.0, 95.0),
            skirt_pct: (hp_raw - slope_pct).clamp(2.0, 92.0),
            opacity: (blend * 1.5 - 0.5).max(0.0),
        };

        Self { lowpass, highpass }
    }

    pub fn layer(&self, family: FilterType) -> &ResponseLayer {
        match family {
            FilterType::Lowpass => &self.lowpass,
            FilterType::Highpass => &self.highpass,
        }
    }
}

#[inline]
fn strip_pct(hz: f32) -> f32 {
    (hz.max(1.0).log10() - 1.0) * RESPONSE_PCT_PER_DECADE
}
