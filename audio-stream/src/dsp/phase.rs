//! Normalized phase accumulator with glidable frequency.
//!
//! The phase runs over `[0, 1)` and advances by a per-step increment of
//! `frequency / clock`. The increment is a [`Ramp`], so frequency changes can
//! be applied immediately or glided over a duration given in seconds.

use super::ramp::Ramp;

/// Periodic phase signal in `[0, 1)`.
///
/// Frequency inputs are not validated: a zero clock or non-finite frequency
/// produces a non-finite increment. The per-step increment must stay below
/// `1.0` (frequency under the clock rate) for wraps to be reported once per
/// cycle.
///
/// # Example
/// ```
/// use audio_stream::dsp::PhaseAccumulator;
///
/// let mut phase = PhaseAccumulator::new();
/// phase.set_frequency_immediate(12_000.0, 48_000.0);
/// let wraps = (0..8).filter(|_| phase.step()).count();
/// assert_eq!(wraps, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseAccumulator {
    phase: f32,
    increment: Ramp,
}

impl PhaseAccumulator {
    /// Create an accumulator at phase `0.0` with a zero increment.
    pub const fn new() -> Self {
        PhaseAccumulator {
            phase: 0.0,
            increment: Ramp::new(0.0, 1000.0),
        }
    }

    /// Reset the phase to `0.0` and the increment to its defaults.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.increment.reset();
    }

    /// Current phase in `[0, 1)`.
    #[inline]
    pub fn get(&self) -> f32 {
        self.phase
    }

    /// Set the phase, e.g. to resynchronize. Values outside `[0, 1)` are
    /// wrapped into range.
    pub fn set(&mut self, phase: f32) {
        let wrapped = phase - libm::floorf(phase);
        // floorf of a tiny negative value can round the result up to 1.0
        self.phase = if wrapped >= 1.0 { 0.0 } else { wrapped };
    }

    /// Current per-step increment (cycles per step).
    #[inline]
    pub fn increment(&self) -> f32 {
        self.increment.get()
    }

    /// The increment ramp, for inspecting an ongoing glide.
    pub fn increment_ramp(&self) -> &Ramp {
        &self.increment
    }

    /// Set the frequency without gliding.
    pub fn set_frequency_immediate(&mut self, frequency: f32, clock: f32) {
        self.increment.set_immediate(frequency / clock);
    }

    /// Glide to `frequency` using the current glide configuration.
    pub fn set_frequency_target(&mut self, frequency: f32, clock: f32) {
        self.increment.set_target(frequency / clock);
    }

    /// Configure the glide so that moving from `from_frequency` to
    /// `to_frequency` takes `duration` seconds. Smaller frequency distances
    /// take a proportional fraction of that time.
    pub fn set_glide_duration(
        &mut self,
        duration: f32,
        from_frequency: f32,
        to_frequency: f32,
        clock: f32,
    ) {
        let range = to_frequency / clock - from_frequency / clock;
        let steps = duration * clock;
        self.increment.set_steps_for_range(steps, range);
    }

    /// Advance the phase by one step. Returns `true` if the phase wrapped.
    pub fn step(&mut self) -> bool {
        let mut wrap = false;

        self.phase += self.increment.get();
        if self.phase >= 1.0 {
            self.phase -= 1.0;
            wrap = true;
        }

        self.increment.step();
        wrap
    }
}
