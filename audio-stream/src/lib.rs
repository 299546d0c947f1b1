//! # audio-stream
//!
//! A `no_std`, zero-allocation audio output engine for embedded synthesizers.
//! Sample sources are polled from the DMA interrupt to keep a pair of I2S
//! buffers filled, and two smoothing primitives keep pitch and level changes
//! free of clicks.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Trait | [`source`] / [`control`] | `SampleSource` and `CodecControl` traits |
//! | Smoothing | [`dsp`] | `Ramp`, `PhaseAccumulator`, cent math |
//! | I/O | [`io`] | `StreamEngine`, buffer layout, transport traits |
//! | Codec | [`codec`] | Pin-driven codec hooks (feature-gated) |
//! | Sources | [`sources`] | DC and sine sources (feature-gated) |
//!
//! ## Quick start
//!
//! ```ignore
//! use audio_stream::io::{StreamConfig, StreamEngine};
//! use audio_stream::sources::SineSource;
//!
//! let mut sine = SineSource::new(48_000.0);
//! sine.frequency(440.0);
//! sine.amplitude(0.5);
//!
//! let mut engine = StreamEngine::new(codec, dma, timer, StreamConfig::new());
//! engine.register_source(0, &mut sine)?;
//! engine.enable_channel(0)?;
//!
//! // In the DMA completion ISR:
//! engine.on_buffer_consumed();
//!
//! // In the foreground, now and then:
//! if engine.load() > 0.9 { /* sources are too expensive */ }
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `sources` | yes | Ready-made sample sources |
//! | `gpio-codec` | yes | Pin-driven codec control (requires `embedded-hal`) |
//!
//! ## Audio parameters
//!
//! - **Channels:** 2 ([`constants::CHANNELS`])
//! - **Buffer size:** 64 frames by default ([`constants::DEFAULT_FRAMES`])
//! - **Sample rate:** 48 kHz by default ([`constants::DEFAULT_SAMPLE_RATE`])
//! - **Sample format:** `i32` (signed, centered)

#![no_std]

pub mod constants;
pub mod control;
pub mod dsp;
pub mod io;
pub mod source;

#[cfg(feature = "gpio-codec")]
pub mod codec;

#[cfg(feature = "sources")]
pub mod sources;

pub use control::CodecControl;
pub use source::SampleSource;
