use heapless::Vec;
use histo_dsp::{process_frame, push_samples, Frame, Spectrum, FFT_SIZE, SPECTRUM_LEN};

use crate::config::{HistogramConfig, MAX_BINS};
use crate::spectral_band_aggregator::{BandRange, SpectralBandAggregator};

/// Gain-scaled target height for every bin, in bin order.
pub type TargetBins = Vec<f32, MAX_BINS>;

/// Turns raw sample buffers into per-bin target heights.
///
/// Keeps a sliding history of the last `FFT_SIZE` samples so short callback
/// buffers still contribute to a full frame. All storage is inline;
/// [`SpectralReducer::reduce`] never allocates.
pub struct SpectralReducer {
    config: HistogramConfig,
    sba: SpectralBandAggregator,
    history: Frame,
    frame: Frame,
    spectrum: Spectrum,
}

impl SpectralReducer {
    pub fn new(config: HistogramConfig) -> Self {
        let config = config.sanitized();
        Self {
            config,
            sba: SpectralBandAggregator::from_config(&config),
            history: [0.0; FFT_SIZE],
            frame: [0.0; FFT_SIZE],
            spectrum: [0.0; SPECTRUM_LEN],
        }
    }

    pub fn config(&self) -> &HistogramConfig {
        &self.config
    }

    /// Applies `config` to the next buffer. Band ranges are only recomputed
    /// when a boundary moves.
    pub fn set_config(&mut self, config: HistogramConfig) {
        let config = config.sanitized();
        if config.layout_differs(&self.config) {
            self.sba.configure(&config);
        }
        self.config = config;
    }

    pub fn band_ranges(&self) -> &[BandRange] {
        self.sba.band_ranges()
    }

    /// Magnitude spectrum of the last reduced frame.
    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    /// Reduce `samples` into `targets`.
    ///
    /// With no bins configured the spectrum is skipped and `targets` is
    /// emptied, so the bin state drops to zero bins. Returns `false` and
    /// leaves `targets` untouched for an empty buffer.
    pub fn reduce(&mut self, samples: &[f32], targets: &mut TargetBins) -> bool {
        if self.config.num_of_bins == 0 {
            targets.clear();
            return true;
        }
        if samples.is_empty() {
            trace!("skipping empty buffer");
            return false;
        }

        push_samples(&mut self.history, samples);
        self.frame.copy_from_slice(&self.history);
        process_frame(&mut self.frame, &mut self.spectrum);
        self.sba
            .aggregate(&self.spectrum, self.config.summary, self.config.gain, targets);
        trace!("reduced {} samples into {} bins", samples.len(), targets.len());
        true
    }
}
