//! Sample frame layout and conversion utilities.
//!
//! ## Buffer Format
//!
//! A buffer is an array of frames, one frame per sample slot. Each frame holds
//! one `i32` per channel, so the memory layout is interleaved
//! `L R L R ...`, matching the I2S word order the DMA engine streams out.
//! Samples are centered: `0` is silence, `i32::MAX` is positive full scale.

use crate::constants::{CHANNELS, SAMPLE_FULL_SCALE};

/// One sample slot: a sample per channel.
pub type Frame = [i32; CHANNELS];

/// A buffer of `FRAMES` interleaved frames.
pub type Buffer<const FRAMES: usize> = [Frame; FRAMES];

/// Convert a float sample in `[-1.0, 1.0]` to a centered `i32` sample.
///
/// Out-of-range values saturate; `NaN` becomes silence.
#[inline(always)]
pub fn to_sample(value: f32) -> i32 {
    (value * SAMPLE_FULL_SCALE) as i32
}

/// Convert a centered `i32` sample back to a float in `[-1.0, 1.0]`.
#[inline(always)]
pub fn from_sample(sample: i32) -> f32 {
    sample as f32 / SAMPLE_FULL_SCALE
}

/// Overwrite one channel of every frame with silence.
///
/// # Panics
///
/// Panics if `frames` is non-empty and `channel >= CHANNELS`.
pub fn silence_channel(frames: &mut [Frame], channel: usize) {
    for frame in frames.iter_mut() {
        frame[channel] = 0;
    }
}

/// Overwrite every frame with silence.
pub fn silence(frames: &mut [Frame]) {
    frames.fill([0; CHANNELS]);
}

/// View a buffer as the flat interleaved word sequence handed to DMA.
pub fn as_words(frames: &[Frame]) -> &[i32] {
    frames.as_flattened()
}
