use heapless::Vec;
use histo_dsp::{bin_width, nyquist, SPECTRUM_LEN};
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::bin_summary_strategy::BinSummaryStrategy;
use crate::config::{HistogramConfig, MAX_BINS};

/// Lowest edge used for logarithmic spacing, so a 0 Hz minimum stays finite.
const LOG_FLOOR_HZ: f32 = 20.0;

/// How the frequency range is divided into bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandSpreadMode {
    /// Equal-width sub-bands.
    #[default]
    Even,
    /// Sub-bands of equal width on a log-frequency axis.
    Logarithmic,
}

impl BandSpreadMode {
    pub(crate) fn to_bits(self) -> u32 {
        match self {
            BandSpreadMode::Even => 0,
            BandSpreadMode::Logarithmic => 1,
        }
    }

    pub(crate) fn from_bits(bits: u32) -> Self {
        match bits {
            1 => BandSpreadMode::Logarithmic,
            _ => BandSpreadMode::Even,
        }
    }
}

/// One bin's frequency range `[lo_frequency, hi_frequency)` and the
/// half-open span of FFT bins `start..end` that feed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandRange {
    pub lo_frequency: f32,
    pub hi_frequency: f32,
    pub start: u16,
    pub end: u16,
}

impl BandRange {
    /// True when no FFT bin feeds this band (it lies above Nyquist).
    pub fn is_silent(&self) -> bool {
        self.start >= self.end
    }
}

/// Maps the configured frequency range onto bins and reduces a magnitude
/// spectrum to one value per bin.
pub struct SpectralBandAggregator {
    band_ranges: Vec<BandRange, MAX_BINS>,
}

impl SpectralBandAggregator {
    pub const fn new() -> Self {
        Self {
            band_ranges: Vec::new(),
        }
    }

    pub fn from_config(config: &HistogramConfig) -> Self {
        let mut sba = Self::new();
        sba.configure(config);
        sba
    }

    pub fn band_ranges(&self) -> &[BandRange] {
        &self.band_ranges
    }

    /// Recompute the band ranges in place. Does not allocate.
    pub fn configure(&mut self, config: &HistogramConfig) {
        let count = config.num_of_bins.min(MAX_BINS);
        let width = bin_width(config.sample_rate);
        let nyquist = nyquist(config.sample_rate);

        self.band_ranges.clear();
        let mut lo = config.min_frequency;
        for i in 0..count {
            let hi = band_edge(config, i + 1, count).max(lo);
            let (start, end) = fft_span(lo, hi, width, nyquist);
            // Capacity is MAX_BINS and count never exceeds it.
            let _ = self.band_ranges.push(BandRange {
                lo_frequency: lo,
                hi_frequency: hi,
                start,
                end,
            });
            lo = hi;
        }
        debug!(
            "band layout: {} bins over {}..{} Hz",
            count,
            config.min_frequency,
            config.max_frequency
        );
    }

    /// Summarise `spectrum` into one gain-scaled value per band.
    pub fn aggregate(
        &self,
        spectrum: &[f32],
        strategy: BinSummaryStrategy,
        gain: f32,
        targets: &mut Vec<f32, MAX_BINS>,
    ) {
        targets.clear();
        targets.extend(self.band_ranges.iter().map(|band| {
            let slice = spectrum
                .get(band.start as usize..band.end as usize)
                .unwrap_or(&[]);
            gain * strategy.calculate(slice).max(0.0)
        }));
    }
}

impl Default for SpectralBandAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Frequency of boundary `index` out of `count` bins. Edge 0 is the minimum
/// and edge `count` is the maximum frequency, exactly.
pub fn band_edge(config: &HistogramConfig, index: usize, count: usize) -> f32 {
    if index == 0 {
        return config.min_frequency;
    }
    if index >= count {
        return config.max_frequency;
    }
    let fraction = index as f32 / count as f32;
    match config.spread {
        BandSpreadMode::Even => {
            config.min_frequency + (config.max_frequency - config.min_frequency) * fraction
        }
        BandSpreadMode::Logarithmic => {
            let floor = config.min_frequency.max(LOG_FLOOR_HZ);
            if floor >= config.max_frequency {
                return config.min_frequency
                    + (config.max_frequency - config.min_frequency) * fraction;
            }
            floor * (config.max_frequency / floor).powf(fraction)
        }
    }
}

/// FFT bins whose centre frequency lies in `[lo, hi)`, limited to below Nyquist.
/// A band narrower than one FFT bin borrows the bin nearest its centre.
fn fft_span(lo: f32, hi: f32, width: f32, nyquist: f32) -> (u16, u16) {
    if lo >= nyquist {
        return (0, 0);
    }
    let limit = SPECTRUM_LEN as f32;
    let start = (lo / width).ceil().min(limit);
    let end = (hi / width).ceil().min(limit);
    if start < end {
        return (start as u16, end as u16);
    }
    let nearest = ((lo + hi) / 2.0 / width).round();
    if nearest < limit {
        (nearest as u16, nearest as u16 + 1)
    } else {
        (0, 0)
    }
}
