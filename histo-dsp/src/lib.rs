#![no_std]

use microdsp::common::{apply_window_function, real_fft, WindowFunctionType::Hann};
use microfft::Complex32;
#[allow(unused_imports)]
use micromath::F32Ext;

/// Number of samples in one analysis frame.
pub const FFT_SIZE: usize = 1024;

/// Number of magnitude bins per frame, DC up to (not including) Nyquist.
pub const SPECTRUM_LEN: usize = FFT_SIZE / 2;

/// Brings a full-scale sine centred on an FFT bin to a magnitude of about 1.0
/// (Hann coherent gain of 0.5, single-sided spectrum).
pub const MAGNITUDE_SCALE: f32 = 4.0 / FFT_SIZE as f32;

/// One analysis frame of time-domain samples.
pub type Frame = [f32; FFT_SIZE];

/// Magnitude spectrum of one frame.
pub type Spectrum = [f32; SPECTRUM_LEN];

/// Clamp a raw sample into [-1, 1]. NaN and infinities become silence.
pub fn sanitize_sample(sample: f32) -> f32 {
    if sample.is_finite() {
        sample.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Shift `samples` into the end of `history`, dropping the oldest samples.
///
/// Only the most recent `FFT_SIZE` samples of a longer buffer are kept.
pub fn push_samples(history: &mut Frame, samples: &[f32]) {
    let incoming = &samples[samples.len().saturating_sub(FFT_SIZE)..];
    let keep = FFT_SIZE - incoming.len();
    history.copy_within(incoming.len().., 0);
    for (slot, &sample) in history[keep..].iter_mut().zip(incoming) {
        *slot = sanitize_sample(sample);
    }
}

/// Apply a Hann window to a slice of f32 samples.
pub fn apply_hann_window(samples: &mut [f32]) {
    apply_window_function(Hann, samples);
}

/// Compute the FFT of one frame in place.
pub fn compute_fft(samples: &mut Frame) -> &mut [Complex32] {
    real_fft(samples)
}

/// Compute the scaled magnitude of the FFT output.
pub fn compute_magnitude(
    fft_output: &[Complex32],
    magnitude: &mut [f32],
) -> Result<(), &'static str> {
    if fft_output.len() != SPECTRUM_LEN {
        return Err("FFT output must contain exactly 512 complex numbers");
    }
    if magnitude.len() != SPECTRUM_LEN {
        return Err("Magnitude buffer must hold exactly 512 values");
    }
    fill_magnitude(fft_output, magnitude);
    Ok(())
}

fn fill_magnitude(fft_output: &[Complex32], magnitude: &mut [f32]) {
    for (out, component) in magnitude.iter_mut().zip(fft_output) {
        *out = (component.re * component.re + component.im * component.im).sqrt() * MAGNITUDE_SCALE;
    }
    // The real FFT packs the Nyquist term into the imaginary part of bin 0,
    // and DC is not folded like the other bins.
    if let (Some(dc), Some(component)) = (magnitude.first_mut(), fft_output.first()) {
        *dc = component.re.abs() * MAGNITUDE_SCALE * 0.5;
    }
}

/// Window, transform and take the magnitude spectrum of one frame.
///
/// `frame` is used as scratch and holds FFT coefficients afterwards.
pub fn process_frame(frame: &mut Frame, magnitude: &mut Spectrum) {
    apply_hann_window(frame);
    let fft_output = compute_fft(frame);
    fill_magnitude(fft_output, magnitude);
}

/// Width of one FFT bin in Hz.
pub fn bin_width(sample_rate: f32) -> f32 {
    sample_rate / FFT_SIZE as f32
}

/// Highest representable frequency for `sample_rate`.
pub fn nyquist(sample_rate: f32) -> f32 {
    sample_rate / 2.0
}

/// Centre frequency of FFT bin `bin`.
pub fn bin_to_frequency(bin: usize, sample_rate: f32) -> f32 {
    bin as f32 * bin_width(sample_rate)
}

/// FFT bin whose range contains `frequency`. Negative input maps to DC.
pub fn frequency_to_bin(frequency: f32, sample_rate: f32) -> usize {
    (frequency / bin_width(sample_rate)).max(0.0) as usize
}
