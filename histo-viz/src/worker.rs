//! Two-thread split: the audio thread reduces, the render thread animates.
//!
//! Targets cross over through a triple buffer. The audio side always has a
//! free slot to write into and the render side always reads a complete
//! frame, so neither thread waits on the other and a bin count change is
//! seen as a whole new frame, never a half-resized one.

use std::sync::Arc;

use triple_buffer::{Input, Output, TripleBuffer};

use crate::config::HistogramConfig;
use crate::gravity_animator::GravityAnimator;
use crate::sample_sink::SampleSink;
use crate::shared_config::SharedConfig;
use crate::spectral_reducer::{SpectralReducer, TargetBins};

/// Targets computed from one sample buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetFrame {
    pub targets: TargetBins,
    /// Config generation the targets were computed with.
    pub generation: u32,
}

/// Creates the audio-side and render-side halves of a histogram.
pub fn histogram_worker(config: HistogramConfig) -> (AudioReceiver, HistogramView) {
    let shared = Arc::new(SharedConfig::new(config));
    let config = shared.load();
    let generation = shared.generation();

    let mut initial = TargetFrame {
        targets: TargetBins::new(),
        generation,
    };
    initial
        .targets
        .extend(core::iter::repeat(0.0).take(config.num_of_bins));
    let (input, output) = TripleBuffer::new(&initial).split();

    info!(
        "histogram plot: {} bins, {}..{} Hz",
        config.num_of_bins,
        config.min_frequency,
        config.max_frequency
    );

    let receiver = AudioReceiver {
        shared: Arc::clone(&shared),
        generation,
        reducer: SpectralReducer::new(config),
        frame: initial.clone(),
        input,
    };
    let view = HistogramView {
        shared,
        output,
        animator: GravityAnimator::new(config.num_of_bins),
    };
    (receiver, view)
}

/// Audio-thread half. Implements [`SampleSink`] for the audio engine.
pub struct AudioReceiver {
    shared: Arc<SharedConfig>,
    generation: u32,
    reducer: SpectralReducer,
    frame: TargetFrame,
    input: Input<TargetFrame>,
}

impl AudioReceiver {
    /// Configuration handle shared with the view.
    pub fn config(&self) -> &Arc<SharedConfig> {
        &self.shared
    }

    fn refresh_config(&mut self) {
        if self.shared.generation() == self.generation {
            return;
        }
        if let Some((generation, config)) = self.shared.snapshot() {
            if config.num_of_bins != self.reducer.config().num_of_bins {
                debug!(
                    "bin count {} -> {} from next buffer",
                    self.reducer.config().num_of_bins,
                    config.num_of_bins
                );
            }
            self.generation = generation;
            self.reducer.set_config(config);
        }
    }
}

impl SampleSink for AudioReceiver {
    fn set_sample_data(&mut self, samples: &[f32]) {
        self.refresh_config();
        if self.reducer.reduce(samples, &mut self.frame.targets) {
            self.frame.generation = self.generation;
            self.input.write(self.frame.clone());
        }
    }
}

/// Render-thread half: steps the gravity model and exposes bin heights.
pub struct HistogramView {
    shared: Arc<SharedConfig>,
    output: Output<TargetFrame>,
    animator: GravityAnimator,
}

impl HistogramView {
    /// Configuration handle for UI setters.
    pub fn config(&self) -> &Arc<SharedConfig> {
        &self.shared
    }

    /// Pulls the newest published targets and advances every bin by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let gravity = self.shared.gravity();
        let frame = self.output.read();
        self.animator.step(&frame.targets, dt, gravity);
    }

    pub fn heights(&self) -> &[f32] {
        self.animator.heights()
    }

    pub fn velocities(&self) -> &[f32] {
        self.animator.velocities()
    }

    pub fn current_height(&self) -> f32 {
        self.animator.current_height()
    }

    pub fn num_of_bins(&self) -> usize {
        self.animator.num_bins()
    }

    pub fn padding(&self) -> f32 {
        self.shared.padding()
    }
}
