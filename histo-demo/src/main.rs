use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use histo_viz::{bar_slots, histogram_worker};
use log::{info, warn};

mod cli;
mod tone;

use cli::Args;

const LEVELS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Longest run accepted from `--seconds`, one day.
const MAX_RUN_SECONDS: f32 = 86_400.0;

/// `--seconds` as a duration, clamped to `0..=MAX_RUN_SECONDS`. NaN runs for 0.
fn run_time(seconds: f32) -> Duration {
    if seconds.is_nan() {
        return Duration::ZERO;
    }
    Duration::from_secs_f32(seconds.clamp(0.0, MAX_RUN_SECONDS))
}

/// One character row: each bar becomes a block whose fill tracks its height.
fn bar_row(heights: &[f32], padding: f32, width: u32, ceiling: f32) -> String {
    let mut row = vec![' '; width as usize];
    let ceiling = if ceiling > 0.0 { ceiling } else { 1.0 };

    for (slot, &height) in bar_slots(width, heights.len(), padding).zip(heights) {
        let level = ((height / ceiling).clamp(0.0, 1.0) * 8.0).round() as usize;
        let start = (slot.x.max(0) as usize).min(row.len());
        let end = (start + slot.width as usize).min(row.len());
        for cell in &mut row[start..end] {
            *cell = LEVELS[level];
        }
    }
    row.into_iter().collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = args.histogram_config();
    if let Err(err) = config.validate() {
        warn!("{}, using clamped values", err);
    }

    let (receiver, mut view) = histogram_worker(config);
    let sample_rate = view.config().load().sample_rate;
    let running = Arc::new(AtomicBool::new(true));
    let audio = tone::spawn(
        receiver,
        args.tones.clone(),
        args.buffer,
        sample_rate,
        Arc::clone(&running),
    )?;

    let frame = Duration::from_secs_f32(1.0 / args.fps.max(1.0));
    let duration = run_time(args.seconds);
    let start = Instant::now();
    let mut last = start;
    let mut frames = 0u64;

    while start.elapsed() < duration {
        let now = Instant::now();
        view.advance(now.duration_since(last).as_secs_f32());
        last = now;

        println!(
            "|{}| {:6.2}",
            bar_row(view.heights(), view.padding(), args.width, args.ceiling),
            view.current_height()
        );
        frames += 1;
        thread::sleep(frame);
    }

    running.store(false, Ordering::Relaxed);
    let callbacks = audio.join().map_err(|_| "audio thread panicked")?;
    info!("{} frames rendered, {} audio callbacks", frames, callbacks);
    Ok(())
}
