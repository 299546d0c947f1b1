//! DC level source — outputs a constant value.
//!
//! Supports immediate level changes and linear ramps over a duration.

use crate::dsp::Ramp;
use crate::source::SampleSource;

/// Constant level source with click-free level changes.
///
/// # Example
/// ```
/// use audio_stream::sources::DcSource;
/// use audio_stream::SampleSource;
///
/// let mut dc = DcSource::new(48_000.0);
/// dc.amplitude(0.5);
/// assert_eq!(dc.next_sample(), 0.5);
/// ```
pub struct DcSource {
    level: Ramp,
    sample_rate: f32,
}

impl DcSource {
    /// Create a silent source for a stream running at `sample_rate`.
    pub const fn new(sample_rate: f32) -> Self {
        DcSource {
            level: Ramp::new(0.0, 1.0),
            sample_rate,
        }
    }

    /// Follow a retuned stream clock; later ramp durations are measured
    /// against it.
    pub fn set_clock(&mut self, hz: f32) {
        self.sample_rate = hz;
    }

    /// Set the level immediately (-1.0 to 1.0).
    pub fn amplitude(&mut self, level: f32) {
        self.level.set_immediate(level.clamp(-1.0, 1.0));
    }

    /// Ramp linearly to `level` over `milliseconds`.
    pub fn amplitude_ramp(&mut self, level: f32, milliseconds: f32) {
        let level = level.clamp(-1.0, 1.0);
        let steps = milliseconds * self.sample_rate / 1000.0;
        if steps < 1.0 {
            self.level.set_immediate(level);
            return;
        }

        self.level.set_steps_for_range(steps, level - self.level.get());
        self.level.set_target(level);
    }

    /// The current level.
    pub fn level(&self) -> f32 {
        self.level.get()
    }

    /// Whether a ramp is in progress.
    pub fn is_ramping(&self) -> bool {
        self.level.is_adjusting()
    }
}

impl SampleSource for DcSource {
    fn next_sample(&mut self) -> f32 {
        let sample = self.level.get();
        self.level.step();
        sample
    }
}
