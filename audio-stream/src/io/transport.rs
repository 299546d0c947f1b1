//! Hardware collaborators of the streaming engine.
//!
//! The engine never touches the serial-audio peripheral or the DMA controller
//! directly. A board support layer implements [`Transport`] to start and stop
//! the circular DMA transfer over the engine's buffers, and [`MicrosClock`] to
//! time buffer fills.

/// The DMA-driven serial audio transport.
///
/// Once started, the transport cycles through the engine's buffers in order,
/// and raises exactly one "buffer consumed" interrupt per buffer. The buffer
/// being signaled is the one that just finished; the hardware is already
/// reading the next one.
pub trait Transport {
    /// Begin streaming, starting with buffer 0.
    fn start(&mut self);

    /// Abort streaming.
    fn stop(&mut self);
}

/// Free-running microsecond counter. Wrapping is expected.
pub trait MicrosClock {
    /// Current time in microseconds.
    fn micros(&mut self) -> u32;

    /// Microseconds elapsed since `start`.
    fn micros_since(&mut self, start: u32) -> u32 {
        self.micros().wrapping_sub(start)
    }
}
