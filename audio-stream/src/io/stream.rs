//! Double-buffered, interrupt-driven sample streaming.
//!
//! [`StreamEngine`] owns two sample buffers that the DMA transport streams out
//! in alternation. Each time the transport finishes a buffer it has already
//! moved on to the other one, and the interrupt handler calls
//! [`on_buffer_consumed()`](StreamEngine::on_buffer_consumed) to refill the
//! finished buffer from the registered sample sources.
//!
//! ## Architecture
//!
//! ```text
//! Sample sources           Buffers (ping-pong)                 Transport
//! ┌──────────┐          ┌──────────────────────┐          ┌───────────┐
//! │ ch 0     ├──fill───►│ [0] L R L R ...      │───DMA───►│ I2S TX    │
//! │ ch 1     ├──fill───►│ [1] L R L R ...      │          │           │
//! └──────────┘          └──────────────────────┘          └─────┬─────┘
//!                                 ▲                              │
//!                                 └───── on_buffer_consumed() ◄──┘
//! ```
//!
//! ## Interrupt safety
//!
//! Only the buffer index advance runs inside a critical section. The fill that
//! follows writes the buffer the hardware is *not* reading, using a local copy
//! of the index, so it can run with interrupts enabled.
//!
//! ## Usage with RTIC
//!
//! ```ignore
//! // In init: build the engine over the board's codec, DMA and timer.
//! let mut engine = StreamEngine::new(codec, dma, timer, StreamConfig::new());
//! engine.register_source(0, left)?;
//! engine.register_source(1, right)?;
//! engine.enable_channel(0)?;
//! engine.enable_channel(1)?;
//!
//! // In the DMA "major loop complete" ISR:
//! engine.on_buffer_consumed();
//! ```

use core::fmt;

use log::{debug, info, warn};

use super::frame::{self, Buffer};
use super::transport::{MicrosClock, Transport};
use crate::constants::{BUFFER_COUNT, CHANNELS, DEFAULT_FRAMES, DEFAULT_SAMPLE_RATE};
use crate::control::CodecControl;
use crate::dsp::pitch::adjust_frequency;
use crate::source::SampleSource;

/// Construction-time stream parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamConfig {
    /// Nominal output sample rate in Hz.
    pub sample_rate: f32,
}

impl StreamConfig {
    /// Configuration with [`DEFAULT_SAMPLE_RATE`].
    pub const fn new() -> Self {
        StreamConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    /// Override the sample rate.
    pub const fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig::new()
    }
}

/// Engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Nothing is streaming; buffers are not refilled.
    Idle,
    /// The codec is up and the transport is cycling through the buffers.
    Running,
}

/// Errors returned by [`StreamEngine`] channel operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError<E> {
    /// The channel index is not below [`CHANNELS`].
    InvalidChannel(usize),
    /// The channel has no registered sample source.
    NoSource(usize),
    /// The codec power hook failed; the engine was reset.
    Power(E),
    /// The codec enable hook failed; the engine was reset.
    Enable(E),
}

impl<E: fmt::Debug> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::InvalidChannel(ch) => write!(f, "invalid channel {ch}"),
            StreamError::NoSource(ch) => write!(f, "no sample source registered on channel {ch}"),
            StreamError::Power(e) => write!(f, "codec power-up failed: {e:?}"),
            StreamError::Enable(e) => write!(f, "codec enable failed: {e:?}"),
        }
    }
}

/// Double-buffered sample streaming engine.
///
/// Generic over the codec hooks `C`, the DMA transport `T` and the
/// microsecond clock `K`. `FRAMES` is the number of sample slots per buffer.
/// Sample sources are borrowed for `'a`; they are owned by the application.
///
/// A registered source is mutably borrowed by the engine. To retune it while
/// streaming, keep it in a [`RefCell`](core::cell::RefCell) and register a
/// closure that polls it:
///
/// ```ignore
/// let sine = RefCell::new(SineSource::new(48_000.0));
/// let mut tap = || sine.borrow_mut().next_sample();
/// engine.register_source(0, &mut tap)?;
/// engine.enable_channel(0)?;
///
/// // Outside the interrupt, e.g. from an RTIC task holding the lock:
/// engine.adjust_rate(-15.0);
/// sine.borrow_mut().set_clock(engine.frequency());
/// sine.borrow_mut().glide_to(660.0, 0.05);
/// ```
pub struct StreamEngine<'a, C, T, K, const FRAMES: usize = DEFAULT_FRAMES> {
    codec: C,
    transport: T,
    clock: K,
    /// Nominal sample rate.
    sample_rate: f32,
    /// Cent-adjusted sample rate.
    frequency: f32,
    state: StreamState,
    /// Buffer most recently filled; the transport is reading the other one.
    index: usize,
    buffers: [Buffer<FRAMES>; BUFFER_COUNT],
    sources: [Option<&'a mut dyn SampleSource>; CHANNELS],
    enabled: [bool; CHANNELS],
    /// Duration of the last buffer fill.
    fill_micros: u32,
}

impl<'a, C, T, K, const FRAMES: usize> StreamEngine<'a, C, T, K, FRAMES>
where
    C: CodecControl,
    T: Transport,
    K: MicrosClock,
{
    /// Create an idle engine with silent buffers and no sources.
    pub fn new(codec: C, transport: T, clock: K, config: StreamConfig) -> Self {
        StreamEngine {
            codec,
            transport,
            clock,
            sample_rate: config.sample_rate,
            frequency: config.sample_rate,
            state: StreamState::Idle,
            index: 0,
            buffers: [[[0; CHANNELS]; FRAMES]; BUFFER_COUNT],
            sources: core::array::from_fn(|_| None),
            enabled: [false; CHANNELS],
            fill_micros: 0,
        }
    }

    // ── Channels ───────────────────────────────────────────────────────

    /// Bind `source` to `channel`. The channel stays disabled until
    /// [`enable_channel()`](Self::enable_channel) is called.
    pub fn register_source(
        &mut self,
        channel: usize,
        source: &'a mut dyn SampleSource,
    ) -> Result<(), StreamError<C::Error>> {
        let slot = self
            .sources
            .get_mut(channel)
            .ok_or(StreamError::InvalidChannel(channel))?;
        *slot = Some(source);
        Ok(())
    }

    /// Disable `channel` and release its source.
    pub fn unregister_source(&mut self, channel: usize) -> Option<&'a mut dyn SampleSource> {
        self.disable_channel(channel);
        self.sources.get_mut(channel)?.take()
    }

    /// Start playing `channel`.
    ///
    /// The first enabled channel brings the output up: codec power, codec
    /// enable, then both buffers are filled around starting the transport. If
    /// either codec hook fails, the engine is [`reset()`](Self::reset) and the
    /// error is returned.
    pub fn enable_channel(&mut self, channel: usize) -> Result<(), StreamError<C::Error>> {
        match self.sources.get(channel) {
            None => return Err(StreamError::InvalidChannel(channel)),
            Some(None) => return Err(StreamError::NoSource(channel)),
            Some(Some(_)) => {}
        }

        if self.state == StreamState::Idle {
            self.bring_up()?;
        }

        self.enabled[channel] = true;
        debug!("channel {} enabled", channel);
        Ok(())
    }

    /// Stop playing `channel` and overwrite its samples in both buffers with
    /// silence. The source stays registered.
    pub fn disable_channel(&mut self, channel: usize) {
        if channel >= CHANNELS {
            return;
        }

        self.enabled[channel] = false;
        for buffer in self.buffers.iter_mut() {
            frame::silence_channel(buffer, channel);
        }
    }

    /// Whether `channel` is currently playing.
    pub fn is_channel_enabled(&self, channel: usize) -> bool {
        self.enabled.get(channel).copied().unwrap_or(false)
    }

    /// Whether `channel` has a registered source.
    pub fn has_source(&self, channel: usize) -> bool {
        matches!(self.sources.get(channel), Some(Some(_)))
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    fn bring_up(&mut self) -> Result<(), StreamError<C::Error>> {
        debug!("bringing up codec");

        if let Err(e) = self.codec.handle_power(true) {
            warn!("codec power-up failed, resetting");
            self.reset();
            return Err(StreamError::Power(e));
        }

        if let Err(e) = self.codec.handle_enable(true) {
            warn!("codec enable failed, resetting");
            self.reset();
            return Err(StreamError::Enable(e));
        }

        // Fill and stream the first buffer.
        self.index = 0;
        self.fill_buffer(0);
        self.transport.start();

        // Fill the second buffer before the first interrupt can arrive. From
        // here on, each completed buffer is refilled from the interrupt.
        let next = self.advance();
        self.fill_buffer(next);

        self.state = StreamState::Running;
        info!("streaming started at {} Hz", self.sample_rate);
        Ok(())
    }

    /// Stop streaming and return to [`StreamState::Idle`].
    ///
    /// Aborts the transport, disables and powers down the codec, disables all
    /// channels, clears the rate adjustment and silences both buffers.
    /// Registered sources are kept.
    pub fn reset(&mut self) {
        self.transport.stop();

        if self.codec.handle_enable(false).is_err() {
            warn!("codec disable failed during reset");
        }
        if self.codec.handle_power(false).is_err() {
            warn!("codec power-down failed during reset");
        }

        self.state = StreamState::Idle;
        self.index = 0;
        self.fill_micros = 0;
        self.adjust_rate(0.0);
        self.enabled = [false; CHANNELS];
        for buffer in self.buffers.iter_mut() {
            frame::silence(buffer);
        }
        debug!("stream reset");
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Whether the transport is streaming.
    pub fn is_running(&self) -> bool {
        self.state == StreamState::Running
    }

    // ── Interrupt path ─────────────────────────────────────────────────

    /// Handle the transport's "buffer consumed" interrupt: switch to the
    /// buffer that just finished and refill it.
    ///
    /// Does nothing while idle.
    pub fn on_buffer_consumed(&mut self) {
        if self.state != StreamState::Running {
            return;
        }

        let index = critical_section::with(|_| self.advance());
        self.fill_buffer(index);
    }

    fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % BUFFER_COUNT;
        self.index
    }

    /// Poll every enabled source once per frame into buffer `index`.
    fn fill_buffer(&mut self, index: usize) {
        let start = self.clock.micros();

        let buffer = &mut self.buffers[index];
        for (channel, slot) in self.sources.iter_mut().enumerate() {
            let Some(source) = slot else {
                continue;
            };
            if !self.enabled[channel] {
                continue;
            }

            for frame in buffer.iter_mut() {
                frame[channel] = frame::to_sample(source.next_sample());
            }
        }

        self.fill_micros = self.clock.micros_since(start);
    }

    // ── Timing ─────────────────────────────────────────────────────────

    /// Retune the output rate by `cents`. Only the value reported by
    /// [`frequency()`](Self::frequency) changes; buffers are untouched.
    /// Sources derive their increments from it through their own clock
    /// setting, e.g. `SineSource::set_clock`.
    pub fn adjust_rate(&mut self, cents: f32) {
        self.frequency = adjust_frequency(self.sample_rate, cents);
    }

    /// Cent-adjusted sample rate in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Nominal sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Fraction of one buffer's playback time spent on the last fill.
    ///
    /// Multiplied by 100 it estimates the CPU usage in percent. Values at or
    /// above `1.0` mean the sources cannot keep up with the output rate.
    pub fn load(&self) -> f32 {
        let fill_sec = self.fill_micros as f32 / 1_000_000.0;
        let buffer_sec = FRAMES as f32 / self.sample_rate;
        fill_sec / buffer_sec
    }

    /// Duration of the last buffer fill in microseconds.
    pub fn last_fill_micros(&self) -> u32 {
        self.fill_micros
    }

    // ── Access ─────────────────────────────────────────────────────────

    /// Index of the buffer most recently filled.
    pub fn active_buffer(&self) -> usize {
        self.index
    }

    /// Sample data of buffer `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= BUFFER_COUNT`.
    pub fn buffer(&self, index: usize) -> &Buffer<FRAMES> {
        &self.buffers[index]
    }

    /// Both buffers, e.g. to set up DMA descriptors.
    pub fn buffers(&self) -> &[Buffer<FRAMES>; BUFFER_COUNT] {
        &self.buffers
    }

    /// The codec hooks.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Mutable access to the codec, e.g. for volume control.
    pub fn codec_mut(&mut self) -> &mut C {
        &mut self.codec
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}
