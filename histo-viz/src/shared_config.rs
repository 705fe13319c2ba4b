//! Lock-free configuration shared between the UI and the audio thread.
//!
//! Every field lives in its own atomic. A sequence counter turns the set of
//! fields into a seqlock: writers make it odd while they store, readers
//! retry (a bounded number of times) when they see a write in progress or
//! the counter moved under them.

use core::hint::spin_loop;
use core::sync::atomic::{fence, AtomicU32, AtomicUsize, Ordering};

use crate::bin_summary_strategy::BinSummaryStrategy;
use crate::config::HistogramConfig;
use crate::spectral_band_aggregator::BandSpreadMode;

/// Attempts a reader makes before giving up on a snapshot.
pub const SNAPSHOT_RETRIES: usize = 4;

struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

pub struct SharedConfig {
    sequence: AtomicU32,
    max_frequency: AtomicF32,
    min_frequency: AtomicF32,
    num_of_bins: AtomicUsize,
    padding: AtomicF32,
    gain: AtomicF32,
    gravity: AtomicF32,
    sample_rate: AtomicF32,
    spread: AtomicU32,
    summary: AtomicU32,
}

impl SharedConfig {
    pub fn new(config: HistogramConfig) -> Self {
        let config = config.sanitized();
        Self {
            sequence: AtomicU32::new(0),
            max_frequency: AtomicF32::new(config.max_frequency),
            min_frequency: AtomicF32::new(config.min_frequency),
            num_of_bins: AtomicUsize::new(config.num_of_bins),
            padding: AtomicF32::new(config.padding),
            gain: AtomicF32::new(config.gain),
            gravity: AtomicF32::new(config.gravity),
            sample_rate: AtomicF32::new(config.sample_rate),
            spread: AtomicU32::new(config.spread.to_bits()),
            summary: AtomicU32::new(config.summary.to_bits()),
        }
    }

    /// Counter that changes with every store. Even while no write is in flight.
    pub fn generation(&self) -> u32 {
        self.sequence.load(Ordering::Acquire)
    }

    /// One consistent read, or `None` if a writer interfered.
    pub fn try_snapshot(&self) -> Option<(u32, HistogramConfig)> {
        let before = self.sequence.load(Ordering::Acquire);
        if before & 1 == 1 {
            return None;
        }
        let config = self.load_fields();
        fence(Ordering::Acquire);
        let after = self.sequence.load(Ordering::Relaxed);
        (before == after).then_some((before, config))
    }

    /// Bounded snapshot for the audio thread: gives up after
    /// [`SNAPSHOT_RETRIES`] attempts so the caller can keep its last copy.
    pub fn snapshot(&self) -> Option<(u32, HistogramConfig)> {
        for _ in 0..SNAPSHOT_RETRIES {
            if let Some(snapshot) = self.try_snapshot() {
                return Some(snapshot);
            }
            spin_loop();
        }
        trace!("config snapshot contended, keeping previous");
        None
    }

    /// Consistent read that waits out concurrent writers. Not for the audio thread.
    pub fn load(&self) -> HistogramConfig {
        loop {
            if let Some((_, config)) = self.try_snapshot() {
                return config;
            }
            spin_loop();
        }
    }

    /// Replace the whole configuration. Out-of-range values are clamped.
    pub fn store(&self, config: HistogramConfig) {
        self.update(|current| *current = config);
    }

    /// Read-modify-write under the write side of the seqlock.
    pub fn update<F: FnOnce(&mut HistogramConfig)>(&self, f: F) {
        let start = self.begin_write();
        let mut config = self.load_fields();
        f(&mut config);
        let sanitized = config.sanitized();
        if sanitized != config {
            warn!("histogram config out of range, clamped");
        }
        self.store_fields(&sanitized);
        self.sequence.store(start.wrapping_add(2), Ordering::Release);
        debug!("histogram config stored, generation {}", start.wrapping_add(2));
    }

    pub fn set_max_frequency(&self, max_frequency: f32) {
        self.update(|c| c.max_frequency = max_frequency);
    }

    pub fn set_min_frequency(&self, min_frequency: f32) {
        self.update(|c| c.min_frequency = min_frequency);
    }

    pub fn set_num_of_bins(&self, num_of_bins: usize) {
        self.update(|c| c.num_of_bins = num_of_bins);
    }

    pub fn set_padding(&self, padding: f32) {
        self.update(|c| c.padding = padding);
    }

    pub fn set_gain(&self, gain: f32) {
        self.update(|c| c.gain = gain);
    }

    pub fn set_gravity(&self, gravity: f32) {
        self.update(|c| c.gravity = gravity);
    }

    pub fn set_sample_rate(&self, sample_rate: f32) {
        self.update(|c| c.sample_rate = sample_rate);
    }

    pub fn set_spread(&self, spread: BandSpreadMode) {
        self.update(|c| c.spread = spread);
    }

    pub fn set_summary(&self, summary: BinSummaryStrategy) {
        self.update(|c| c.summary = summary);
    }

    pub fn padding(&self) -> f32 {
        self.padding.load()
    }

    pub fn gravity(&self) -> f32 {
        self.gravity.load()
    }

    pub fn num_of_bins(&self) -> usize {
        self.num_of_bins.load(Ordering::Relaxed)
    }

    // Writers exclude each other by claiming an odd sequence number.
    fn begin_write(&self) -> u32 {
        loop {
            let current = self.sequence.load(Ordering::Relaxed);
            if current & 1 == 0
                && self
                    .sequence
                    .compare_exchange_weak(
                        current,
                        current.wrapping_add(1),
                        Ordering::Acquire,
                        Ordering::Relaxed,
                    )
                    .is_ok()
            {
                fence(Ordering::Release);
                return current;
            }
            spin_loop();
        }
    }

    fn load_fields(&self) -> HistogramConfig {
        HistogramConfig {
            max_frequency: self.max_frequency.load(),
            min_frequency: self.min_frequency.load(),
            num_of_bins: self.num_of_bins.load(Ordering::Relaxed),
            padding: self.padding.load(),
            gain: self.gain.load(),
            gravity: self.gravity.load(),
            sample_rate: self.sample_rate.load(),
            spread: BandSpreadMode::from_bits(self.spread.load(Ordering::Relaxed)),
            summary: BinSummaryStrategy::from_bits(self.summary.load(Ordering::Relaxed)),
        }
    }

    fn store_fields(&self, config: &HistogramConfig) {
        self.max_frequency.store(config.max_frequency);
        self.min_frequency.store(config.min_frequency);
        self.num_of_bins.store(config.num_of_bins, Ordering::Relaxed);
        self.padding.store(config.padding);
        self.gain.store(config.gain);
        self.gravity.store(config.gravity);
        self.sample_rate.store(config.sample_rate);
        self.spread.store(config.spread.to_bits(), Ordering::Relaxed);
        self.summary.store(config.summary.to_bits(), Ordering::Relaxed);
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(HistogramConfig::default())
    }
}
