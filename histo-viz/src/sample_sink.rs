/// Receiver side of an audio engine: one call per I/O callback buffer.
///
/// Implementations run on the audio thread and must not block or allocate.
pub trait SampleSink {
    /// Hands over one buffer of PCM samples. The buffer is not retained.
    fn set_sample_data(&mut self, samples: &[f32]);
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    fn set_sample_data(&mut self, samples: &[f32]) {
        (**self).set_sample_data(samples);
    }
}
