use rand::Rng;
use wavegen::{sine, Waveform};

/// `len` samples of a full-scale sine at `frequency` Hz, 44.1 kHz.
pub fn sine_buffer(frequency: f32, len: usize) -> Vec<f32> {
    Waveform::<f32>::with_components(44_100.0, vec![sine!(frequency, 1.0)])
        .iter()
        .take(len)
        .collect()
}

/// `len` samples of uniform noise, deliberately exceeding [-1, 1].
pub fn noise_buffer(len: usize) -> Vec<f32> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random_range(-2.0..2.0)).collect()
}
