//! Frequency histogram with gravity-decayed bars.
//!
//! Audio buffers go in through [`SampleSink`], get reduced to one
//! gain-scaled magnitude per frequency bin by the [`SpectralReducer`], and
//! the [`GravityAnimator`] turns those targets into bar heights that rise
//! instantly and fall under constant acceleration.
//!
//! [`HistogramPlot`] runs both halves on one thread. With the `std` feature,
//! [`histogram_worker`] splits them into an [`AudioReceiver`] for the audio
//! callback and a [`HistogramView`] for the render loop.
#![no_std]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod fmt;

pub mod bin_summary_strategy;
pub mod color_strategy;
pub mod config;
pub mod gravity_animator;
pub mod histogram_plot;
pub mod renderer;
pub mod sample_sink;
pub mod shared_config;
pub mod spectral_band_aggregator;
pub mod spectral_reducer;
#[cfg(feature = "std")]
pub mod worker;

pub use bin_summary_strategy::BinSummaryStrategy;
pub use config::{ConfigError, HistogramConfig, MAX_BINS};
pub use gravity_animator::GravityAnimator;
pub use histogram_plot::{Bin, HistogramPlot};
pub use renderer::{bar_slots, BarGraphRenderer, BarSlot, Renderer};
pub use sample_sink::SampleSink;
pub use shared_config::SharedConfig;
pub use spectral_band_aggregator::{BandRange, BandSpreadMode, SpectralBandAggregator};
pub use spectral_reducer::{SpectralReducer, TargetBins};
#[cfg(feature = "std")]
pub use worker::{histogram_worker, AudioReceiver, HistogramView, TargetFrame};
