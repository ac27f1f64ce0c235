use super::constants::*;
use super::position::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterType {
    Lowpass,
    Highpass,
}

impl FilterType {
    pub const ALL: [FilterType; 2] = [FilterType::Lowpass, FilterType::Highpass];

    pub fn short_label(self) -> &'static str {
        match self {
            FilterType::Lowpass => "LPF",
            FilterType::Highpass => "HPF",
        }
    }
}

/// Filter steepness class. Each tier is realized as one lowpass and one
/// highpass node of that slope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RolloffTier {
    Db12,
    Db24,
    Db48,
}

impl RolloffTier {
    pub const ALL: [RolloffTier; 3] = [RolloffTier::Db12, RolloffTier::Db24, RolloffTier::Db48];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            RolloffTier::Db12 => 0,
            RolloffTier::Db24 => 1,
            RolloffTier::Db48 => 2,
        }
    }

    /// Slope magnitude in dB/octave.
    #[inline]
    pub fn slope_db(self) -> f32 {
        TIER_SLOPES_DB[self.index()]
    }

    /// Number of cascaded 12 dB/oct sections needed for this slope.
    #[inline]
    pub fn sections(self) -> usize {
        match self {
            RolloffTier::Db12 => 1,
            RolloffTier::Db24 => 2,
            RolloffTier::Db48 => 4,
        }
    }
}

/// Which tier-crossfader the master crossfader listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierBranch {
    /// 12 ↔ 24 dB/oct stage (master fade 0)
    Gentle,
    /// 24 ↔ 48 dB/oct stage (master fade 1)
    Steep,
}

impl TierBranch {
    #[inline]
    pub fn fade(self) -> f32 {
        match self {
            TierBranch::Gentle => 0.0,
            TierBranch::Steep => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RolloffMix {
    pub tier0_to_1: f32,
    pub tier1_to_2: f32,
    pub master: TierBranch,
}

impl RolloffMix {
    /// Fade amount of whichever tier-crossfader is currently selected.
    #[inline]
    pub fn crossfade_position(&self) -> f32 {
        match self.master {
            TierBranch::Gentle => self.tier0_to_1,
            TierBranch::Steep => self.tier1_to_2,
        }
    }

    /// Perceived slope in dB/octave (negative), continuous across the branch switch.
    #[inline]
    pub fn effective_rolloff_db(&self) -> f32 {
        match self.master {
            TierBranch::Gentle => -12.0 - 12.0 * self.tier0_to_1,
            TierBranch::Steep => -24.0 - 24.0 * self.tier1_to_2,
        }
    }
}

/// Everything the filter graph needs for one pad position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterParameters {
    pub low_freq: f32,
    pub high_freq: f32,
    pub filter_blend: f32,
    pub rolloff: RolloffMix,
    pub resonance_q: f32,
}

impl FilterParameters {
    #[inline]
    pub fn display_type(&self) -> FilterType {
        display_type_for_blend(self.filter_blend)
    }

    #[inline]
    pub fn display_frequency(&self) -> f32 {
        if self.filter_blend < 0.5 {
            self.low_freq
        } else {
            self.high_freq
        }
    }

    #[inline]
    pub fn display_rolloff(&self) -> f32 {
        self.rolloff.effective_rolloff_db()
    }

    pub fn display(&self) -> DisplayFilterState {
        DisplayFilterState::from(self)
    }
}

/// Rounded projection of [`FilterParameters`] for the readout. Never feed this
/// back into the audio graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayFilterState {
    pub frequency_hz: u32,
    pub filter_type: FilterType,
    pub rolloff_db: i32,
    pub filter_blend: f32,
    pub crossfade_position: f32,
}

impl From<&FilterParameters> for DisplayFilterState {
    fn from(p: &FilterParameters) -> Self {
        Self {
            frequency_hz: round_half_up(p.display_frequency()).max(0.0) as u32,
            filter_type: p.display_type(),
            rolloff_db: round_half_up(p.display_rolloff()) as i32,
            filter_blend: p.filter_blend,
            crossfade_position: p.rolloff.crossfade_position(),
        }
    }
}

/// Map a pad position and resonance to filter parameters.
///
/// Pure and idempotent. Out-of-range inputs are clamped before any log/pow so
/// boundary and garbage values never produce NaN.
pub fn map_position(position: Position, resonance: f32) -> FilterParameters {
    let n = position.normalized();
    FilterParameters {
        low_freq: lowpass_cutoff(n.x),
        high_freq: highpass_cutoff(n.x),
        filter_blend: filter_blend(n.x),
        rolloff: rolloff_mix(n.y),
        resonance_q: clamp_resonance(resonance),
    }
}

/// 0 below x=0.4, 1 above x=0.6, linear in between.
#[inline]
pub fn filter_blend(norm_x: f32) -> f32 {
    ((norm_x - BLEND_START_X) / BLEND_WIDTH_X).clamp(0.0, 1.0)
}

#[inline]
pub fn lowpass_cutoff(norm_x: f32) -> f32 {
    let factor = (1.0 - norm_x * LPF_X_SLOPE).max(0.0);
    if factor > 0.0 {
        10f32.powf(LPF_LOG_TOP - factor * LPF_LOG_SPAN)
    } else {
        LPF_OPEN_HZ
    }
}

#[inline]
pub fn highpass_cutoff(norm_x: f32) -> f32 {
    let factor = (norm_x * HPF_X_SLOPE - HPF_X_OFFSET).max(0.0);
    if factor > 0.0 {
        10f32.powf(HPF_LOG_BASE + factor * HPF_LOG_SPAN)
    } else {
        HPF_OPEN_HZ
    }
}

/// Two chained two-input fades plus a hard selector. The selector flips at
/// exactly y=0.5 with no smoothing.
pub fn rolloff_mix(norm_y: f32) -> RolloffMix {
    if norm_y < TIER_SPLIT_Y {
        RolloffMix {
            tier0_to_1: norm_y * 2.0,
            tier1_to_2: 0.0,
            master: TierBranch::Gentle,
        }
    } else {
        RolloffMix {
            tier0_to_1: 1.0,
            tier1_to_2: (norm_y - TIER_SPLIT_Y) * 2.0,
            master: TierBranch::Steep,
        }
    }
}

#[inline]
pub fn display_type_for_blend(blend: f32) -> FilterType {
    if blend < DISPLAY_LOWPASS_BELOW {
        FilterType::Lowpass
    } else if blend > DISPLAY_HIGHPASS_ABOVE {
        FilterType::Highpass
    } else if blend < 0.5 {
        FilterType::Lowpass
    } else {
        FilterType::Highpass
    }
}

#[inline]
pub fn clamp_resonance(q: f32) -> f32 {
    if q.is_nan() {
        RESONANCE_DEFAULT
    } else {
        q.clamp(RESONANCE_MIN, RESONANCE_MAX)
    }
}

// Halves round towards +inf: -30.5 -> -30, 30.5 -> 31.
#[inline]
pub fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}
