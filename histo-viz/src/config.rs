//! Histogram configuration and its validation.

use thiserror::Error;

use crate::bin_summary_strategy::BinSummaryStrategy;
use crate::spectral_band_aggregator::BandSpreadMode;

/// Upper bound on the number of bins; target frames have this fixed capacity.
pub const MAX_BINS: usize = 512;

pub const DEFAULT_MAX_FREQUENCY: f32 = 10_000.0;
pub const DEFAULT_MIN_FREQUENCY: f32 = 1_200.0;
pub const DEFAULT_NUM_OF_BINS: usize = 30;
pub const DEFAULT_PADDING: f32 = 0.1;
pub const DEFAULT_GAIN: f32 = 10.0;
pub const DEFAULT_GRAVITY: f32 = 10.0;
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

/// Largest padding the sanitiser lets through; a padding of 1 would hide every bar.
pub const MAX_PADDING: f32 = 0.99;

/// Tunables of the histogram. All of them may change at any time; a change
/// applies from the next processed sample buffer on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramConfig {
    /// Upper bound of the displayed frequency range, in Hz.
    pub max_frequency: f32,
    /// Lower bound of the displayed frequency range, in Hz.
    pub min_frequency: f32,
    pub num_of_bins: usize,
    /// Horizontal gap between bars, as a fraction of each bar's slot.
    pub padding: f32,
    /// Multiplier from spectral magnitude to bar height.
    pub gain: f32,
    /// Downward acceleration of falling bars, in px/s².
    pub gravity: f32,
    /// Sampling rate of the incoming buffers, in Hz.
    pub sample_rate: f32,
    pub spread: BandSpreadMode,
    pub summary: BinSummaryStrategy,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            max_frequency: DEFAULT_MAX_FREQUENCY,
            min_frequency: DEFAULT_MIN_FREQUENCY,
            num_of_bins: DEFAULT_NUM_OF_BINS,
            padding: DEFAULT_PADDING,
            gain: DEFAULT_GAIN,
            gravity: DEFAULT_GRAVITY,
            sample_rate: DEFAULT_SAMPLE_RATE,
            spread: BandSpreadMode::Even,
            summary: BinSummaryStrategy::Average,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("minimum frequency {min} Hz must be below maximum frequency {max} Hz")]
    FrequencyRange { min: f32, max: f32 },
    #[error("frequencies must be finite and non-negative, got {0} Hz")]
    NegativeFrequency(f32),
    #[error("at least one bin is required")]
    NoBins,
    #[error("{requested} bins requested, at most {max} are supported")]
    TooManyBins { requested: usize, max: usize },
    #[error("padding must be within [0, 1), got {0}")]
    Padding(f32),
    #[error("gain must be positive, got {0}")]
    Gain(f32),
    #[error("gravity must be finite, got {0}")]
    Gravity(f32),
    #[error("sample rate must be positive, got {0} Hz")]
    SampleRate(f32),
}

impl HistogramConfig {
    /// Check every constraint, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for frequency in [self.min_frequency, self.max_frequency] {
            if !frequency.is_finite() || frequency < 0.0 {
                return Err(ConfigError::NegativeFrequency(frequency));
            }
        }
        if self.min_frequency >= self.max_frequency {
            return Err(ConfigError::FrequencyRange {
                min: self.min_frequency,
                max: self.max_frequency,
            });
        }
        if self.num_of_bins == 0 {
            return Err(ConfigError::NoBins);
        }
        if self.num_of_bins > MAX_BINS {
            return Err(ConfigError::TooManyBins {
                requested: self.num_of_bins,
                max: MAX_BINS,
            });
        }
        if !(0.0..1.0).contains(&self.padding) {
            return Err(ConfigError::Padding(self.padding));
        }
        if !(self.gain > 0.0 && self.gain.is_finite()) {
            return Err(ConfigError::Gain(self.gain));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::Gravity(self.gravity));
        }
        if !(self.sample_rate > 0.0 && self.sample_rate.is_finite()) {
            return Err(ConfigError::SampleRate(self.sample_rate));
        }
        Ok(())
    }

    /// Clamp every field into its valid range instead of failing.
    ///
    /// Non-finite values fall back to their defaults, a reversed frequency
    /// range is swapped, and a zero bin count is kept (processing becomes a
    /// no-op). Non-positive gravity is kept and disables falling.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };

        let sample_rate = if self.sample_rate > 0.0 && self.sample_rate.is_finite() {
            self.sample_rate
        } else {
            defaults.sample_rate
        };
        let mut min_frequency = finite_or(self.min_frequency, defaults.min_frequency).max(0.0);
        let mut max_frequency = finite_or(self.max_frequency, defaults.max_frequency).max(0.0);
        if min_frequency > max_frequency {
            core::mem::swap(&mut min_frequency, &mut max_frequency);
        }
        if min_frequency == max_frequency {
            max_frequency = min_frequency + 1.0;
        }

        Self {
            max_frequency,
            min_frequency,
            num_of_bins: self.num_of_bins.min(MAX_BINS),
            padding: finite_or(self.padding, defaults.padding).clamp(0.0, MAX_PADDING),
            gain: finite_or(self.gain, defaults.gain).max(0.0),
            gravity: finite_or(self.gravity, defaults.gravity),
            sample_rate,
            spread: self.spread,
            summary: self.summary,
        }
    }

    /// True when switching from `other` to `self` moves any bin boundary.
    pub fn layout_differs(&self, other: &Self) -> bool {
        self.min_frequency != other.min_frequency
            || self.max_frequency != other.max_frequency
            || self.num_of_bins != other.num_of_bins
            || self.sample_rate != other.sample_rate
            || self.spread != other.spread
    }
}
