use heapless::Vec;

use crate::config::{HistogramConfig, MAX_BINS};
use crate::gravity_animator::GravityAnimator;
use crate::sample_sink::SampleSink;
use crate::spectral_band_aggregator::BandRange;
use crate::spectral_reducer::{SpectralReducer, TargetBins};

/// Snapshot of one bin for display or inspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lo_frequency: f32,
    pub hi_frequency: f32,
    pub height: f32,
    pub velocity: f32,
}

/// Reducer and animator driven from a single thread.
///
/// Use this when the same loop both receives samples and renders frames;
/// [`crate::worker::histogram_worker`] splits the two across threads.
pub struct HistogramPlot {
    reducer: SpectralReducer,
    animator: GravityAnimator,
    targets: TargetBins,
    /// Band ranges matching the animator's bins.
    layout: Vec<BandRange, MAX_BINS>,
    /// Band ranges matching `targets`, shown from the next `advance`.
    staged: Vec<BandRange, MAX_BINS>,
    config_changed: bool,
    staged_ready: bool,
}

impl HistogramPlot {
    pub fn new(config: HistogramConfig) -> Self {
        let reducer = SpectralReducer::new(config);
        let num_bins = reducer.config().num_of_bins;
        let mut targets = TargetBins::new();
        targets.extend(core::iter::repeat(0.0).take(num_bins));
        let mut layout = Vec::new();
        let _ = layout.extend_from_slice(reducer.band_ranges());
        Self {
            reducer,
            animator: GravityAnimator::new(num_bins),
            targets,
            staged: layout.clone(),
            layout,
            config_changed: false,
            staged_ready: false,
        }
    }

    pub fn config(&self) -> &HistogramConfig {
        self.reducer.config()
    }

    /// Takes effect from the next sample buffer on.
    pub fn set_config(&mut self, config: HistogramConfig) {
        self.reducer.set_config(config);
        self.config_changed = true;
    }

    /// Steps the gravity model by `dt` seconds towards the latest targets.
    pub fn advance(&mut self, dt: f32) {
        self.animator
            .step(&self.targets, dt, self.reducer.config().gravity);
        if self.staged_ready {
            core::mem::swap(&mut self.layout, &mut self.staged);
            self.staged_ready = false;
        }
    }

    pub fn targets(&self) -> &[f32] {
        &self.targets
    }

    pub fn heights(&self) -> &[f32] {
        self.animator.heights()
    }

    pub fn current_height(&self) -> f32 {
        self.animator.current_height()
    }

    pub fn padding(&self) -> f32 {
        self.reducer.config().padding
    }

    /// Band ranges of the displayed bins. A new layout shows up together
    /// with the heights computed for it.
    pub fn band_ranges(&self) -> &[BandRange] {
        &self.layout
    }

    /// Bins as currently displayed.
    pub fn bins(&self) -> impl Iterator<Item = Bin> + '_ {
        self.layout
            .iter()
            .zip(self.animator.heights())
            .zip(self.animator.velocities())
            .map(|((range, &height), &velocity)| Bin {
                lo_frequency: range.lo_frequency,
                hi_frequency: range.hi_frequency,
                height,
                velocity,
            })
    }
}

impl Default for HistogramPlot {
    fn default() -> Self {
        Self::new(HistogramConfig::default())
    }
}

impl SampleSink for HistogramPlot {
    fn set_sample_data(&mut self, samples: &[f32]) {
        if self.reducer.reduce(samples, &mut self.targets) && self.config_changed {
            self.staged.clear();
            let _ = self.staged.extend_from_slice(self.reducer.band_ranges());
            self.config_changed = false;
            self.staged_ready = true;
        }
    }
}
