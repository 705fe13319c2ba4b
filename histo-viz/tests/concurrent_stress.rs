use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use histo_viz::{histogram_worker, BandSpreadMode, HistogramConfig, SampleSink};
use rand::Rng;

#[test]
fn test_reconfiguration_under_concurrent_audio_and_render() {
    let (mut receiver, mut view) = histogram_worker(HistogramConfig::default());
    let shared = Arc::clone(view.config());
    let stop = Arc::new(AtomicBool::new(false));

    let audio = {
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut rng = rand::rng();
            let mut buffer = vec![0.0f32; 2048];
            let mut calls = 0usize;
            while !stop.load(Ordering::Relaxed) {
                let len = rng.random_range(1..=buffer.len());
                for sample in &mut buffer[..len] {
                    *sample = rng.random_range(-1.5..1.5);
                }
                receiver.set_sample_data(&buffer[..len]);
                calls += 1;
            }
            calls
        })
    };

    let ui = thread::spawn(move || {
        let mut rng = rand::rng();
        for i in 0..2_000 {
            shared.set_num_of_bins(rng.random_range(0..=64));
            if i % 7 == 0 {
                shared.set_min_frequency(rng.random_range(0.0..5_000.0));
                shared.set_max_frequency(rng.random_range(5_000.0..20_000.0));
            }
            if i % 11 == 0 {
                shared.set_spread(BandSpreadMode::Logarithmic);
            } else if i % 13 == 0 {
                shared.set_spread(BandSpreadMode::Even);
            }
            thread::yield_now();
        }
    });

    let mut frames = 0;
    while !ui.is_finished() || frames < 2_000 {
        view.advance(0.004);
        let heights = view.heights();
        assert_eq!(heights.len(), view.num_of_bins());
        assert!(heights.iter().all(|h| h.is_finite() && *h >= 0.0));

        let current = view.current_height();
        if heights.is_empty() {
            assert_eq!(current, 0.0);
        } else {
            assert!(heights.contains(&current));
        }
        frames += 1;
    }

    ui.join().unwrap();
    stop.store(true, Ordering::Relaxed);
    let calls = audio.join().unwrap();
    assert!(calls > 0);
}

#[test]
fn test_config_snapshots_are_never_torn() {
    // Every stored config keeps max == min + 1000, the initial one included;
    // a torn read would break it.
    let (_receiver, view) = histogram_worker(HistogramConfig {
        min_frequency: 0.0,
        max_frequency: 1_000.0,
        ..HistogramConfig::default()
    });
    let writer_config = Arc::clone(view.config());
    let reader_config = Arc::clone(view.config());
    let initial_generation = reader_config.generation();

    let writer = thread::spawn(move || {
        for i in 0..5_000 {
            let min = (i % 100) as f32 * 10.0;
            writer_config.store(HistogramConfig {
                min_frequency: min,
                max_frequency: min + 1_000.0,
                ..HistogramConfig::default()
            });
        }
    });

    let mut checked_after_write = 0;
    loop {
        let done = writer.is_finished();
        if let Some((generation, config)) = reader_config.snapshot() {
            assert_eq!(generation % 2, 0);
            assert_eq!(config.max_frequency, config.min_frequency + 1_000.0);
            if generation != initial_generation {
                checked_after_write += 1;
            }
        }
        if done {
            break;
        }
    }
    writer.join().unwrap();
    assert!(checked_after_write > 0);
}
