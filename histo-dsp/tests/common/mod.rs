use histo_dsp::{Frame, FFT_SIZE};
use wavegen::{sine, Waveform};

pub const SAMPLE_RATE: f32 = 44_100.0;

/// One frame of a sine at `frequency` Hz sampled at 44.1 kHz.
pub fn sine_frame(frequency: f32, amplitude: f32) -> Frame {
    let waveform = Waveform::<f32>::with_components(44_100.0, vec![sine!(frequency, amplitude)]);
    let mut frame = [0.0; FFT_SIZE];
    for (slot, sample) in frame.iter_mut().zip(waveform.iter()) {
        *slot = sample;
    }
    frame
}

pub fn peak_bin(spectrum: &[f32]) -> usize {
    spectrum
        .iter()
        .enumerate()
        .skip(1)
        .fold((0, f32::NEG_INFINITY), |best, (i, &m)| if m > best.1 { (i, m) } else { best })
        .0
}
