/// A single stream of samples, polled once per sample slot.
///
/// Implementations are called from interrupt context while a buffer is being
/// filled, so `next_sample()` must not block and should not allocate.
pub trait SampleSource {
    /// Produce the next sample, nominally in `[-1.0, 1.0]`.
    fn next_sample(&mut self) -> f32;
}

impl<F> SampleSource for F
where
    F: FnMut() -> f32,
{
    fn next_sample(&mut self) -> f32 {
        self()
    }
}
