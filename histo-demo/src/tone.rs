use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use histo_viz::{AudioReceiver, SampleSink};
use log::{debug, info};
use wavegen::{sine, Waveform};

/// Feeds a sum of sines into `receiver` in `buffer`-sized chunks at the
/// pace a sound card would, until `running` is cleared.
pub fn spawn(
    mut receiver: AudioReceiver,
    tones: Vec<f32>,
    buffer: usize,
    sample_rate: f32,
    running: Arc<AtomicBool>,
) -> std::io::Result<JoinHandle<usize>> {
    let buffer = buffer.max(1);
    let period = Duration::from_secs_f32(buffer as f32 / sample_rate);

    thread::Builder::new().name("audio".into()).spawn(move || {
        let amplitude = 1.0 / tones.len().max(1) as f32;
        let components = tones.iter().map(|&frequency| sine!(frequency, amplitude)).collect();
        let waveform = Waveform::<f32>::with_components(sample_rate, components);
        let mut samples = waveform.iter();
        let mut chunk = vec![0.0f32; buffer];
        let mut callbacks = 0;

        info!("audio thread started: {:?} Hz, {} samples per callback", tones, buffer);
        while running.load(Ordering::Relaxed) {
            for (slot, sample) in chunk.iter_mut().zip(&mut samples) {
                *slot = sample;
            }
            receiver.set_sample_data(&chunk);
            callbacks += 1;
            thread::sleep(period);
        }
        debug!("audio thread stopping after {} callbacks", callbacks);
        callbacks
    })
}
