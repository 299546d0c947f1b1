//! Sine oscillator built on [`PhaseAccumulator`].
//!
//! Frequency and amplitude changes can glide, so retuning a playing voice
//! does not click.

use core::f32::consts::TAU;

use crate::dsp::{PhaseAccumulator, Ramp};
use crate::source::SampleSource;

/// Sine wave source.
///
/// # Example
/// ```
/// use audio_stream::sources::SineSource;
///
/// let mut sine = SineSource::new(48_000.0);
/// sine.frequency(440.0);
/// sine.amplitude(0.8);
/// sine.glide_to(880.0, 0.05);
/// ```
pub struct SineSource {
    phase: PhaseAccumulator,
    magnitude: Ramp,
    /// Clock the phase advances with: one step per sample slot.
    sample_rate: f32,
    frequency: f32,
    /// Completed cycles, for syncing other voices.
    cycles: u32,
}

impl SineSource {
    /// Create a silent oscillator for a stream running at `sample_rate`.
    pub const fn new(sample_rate: f32) -> Self {
        SineSource {
            phase: PhaseAccumulator::new(),
            magnitude: Ramp::new(0.0, 1.0),
            sample_rate,
            frequency: 0.0,
            cycles: 0,
        }
    }

    /// Follow a retuned stream clock, e.g. [`StreamEngine::frequency()`]
    /// after [`adjust_rate()`].
    ///
    /// The playing frequency is recomputed against the new clock; an ongoing
    /// glide continues toward its target at the new clock.
    ///
    /// [`StreamEngine::frequency()`]: crate::io::StreamEngine::frequency
    /// [`adjust_rate()`]: crate::io::StreamEngine::adjust_rate
    pub fn set_clock(&mut self, hz: f32) {
        self.sample_rate = hz;
        if self.phase.increment_ramp().is_adjusting() {
            self.phase.set_frequency_target(self.frequency, hz);
        } else {
            self.phase.set_frequency_immediate(self.frequency, hz);
        }
    }

    /// The clock the oscillator advances with, in Hz.
    pub fn clock(&self) -> f32 {
        self.sample_rate
    }

    /// Set the frequency in Hz immediately.
    pub fn frequency(&mut self, hz: f32) {
        self.frequency = hz;
        self.phase.set_frequency_immediate(hz, self.sample_rate);
    }

    /// Glide from the current frequency to `hz` over `seconds`.
    pub fn glide_to(&mut self, hz: f32, seconds: f32) {
        self.phase
            .set_glide_duration(seconds, self.frequency, hz, self.sample_rate);
        self.phase.set_frequency_target(hz, self.sample_rate);
        self.frequency = hz;
    }

    /// Set the amplitude immediately (0.0 = silent, 1.0 = full scale).
    pub fn amplitude(&mut self, level: f32) {
        self.magnitude.set_immediate(level.clamp(0.0, 1.0));
    }

    /// Fade the amplitude to `level` over `seconds`.
    pub fn amplitude_fade(&mut self, level: f32, seconds: f32) {
        let level = level.clamp(0.0, 1.0);
        let steps = seconds * self.sample_rate;
        if steps < 1.0 {
            self.magnitude.set_immediate(level);
            return;
        }
        self.magnitude
            .set_steps_for_range(steps, level - self.magnitude.get());
        self.magnitude.set_target(level);
    }

    /// Restart the waveform at phase 0.
    pub fn sync(&mut self) {
        self.phase.set(0.0);
    }

    /// The frequency the oscillator plays or glides toward.
    pub fn target_frequency(&self) -> f32 {
        self.frequency
    }

    /// The instantaneous frequency in Hz.
    pub fn current_frequency(&self) -> f32 {
        self.phase.increment() * self.sample_rate
    }

    /// Number of completed cycles.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }
}

impl SampleSource for SineSource {
    fn next_sample(&mut self) -> f32 {
        let sample = libm::sinf(TAU * self.phase.get()) * self.magnitude.get();

        if self.phase.step() {
            self.cycles = self.cycles.wrapping_add(1);
        }
        self.magnitude.step();
        sample
    }
}
