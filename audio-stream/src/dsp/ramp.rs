//! Linear value smoothing.
//!
//! A [`Ramp`] moves its current value toward a target by a fixed delta per
//! [`step()`](Ramp::step), and snaps exactly onto the target once it is within
//! one delta. The number of steps a glide needs is fixed when the target is
//! set, so float accumulation cannot add a trailing step, and the glide never
//! oscillates around the target.

/// Relative tolerance when rounding `distance / delta` to a whole step count.
/// `delta` is itself `range / steps`, so the quotient is only off by a few ulps.
const STEP_COUNT_TOLERANCE: f32 = 1e-4;

/// Construction-time defaults restored by [`Ramp::reset()`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct Defaults {
    value: f32,
    steps: f32,
}

/// A value that glides linearly toward a target.
///
/// # Example
/// ```
/// use audio_stream::dsp::Ramp;
///
/// let mut gain = Ramp::new(0.0, 4.0);
/// gain.set_target(1.0);
/// while gain.step() {}
/// assert_eq!(gain.get(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    defaults: Defaults,
    current: f32,
    target: f32,
    /// Magnitude of one step; the direction comes from `target - current`.
    delta: f32,
    /// Steps left in the current glide, including the final snap.
    remaining: u32,
    adjusting: bool,
}

impl Ramp {
    /// Create a ramp resting at `value` that traverses a range of `1.0` in
    /// `steps` steps.
    pub const fn new(value: f32, steps: f32) -> Self {
        Ramp {
            defaults: Defaults { value, steps },
            current: value,
            target: value,
            delta: 1.0 / steps,
            remaining: 0,
            adjusting: false,
        }
    }

    /// Restore the construction-time value and step count.
    pub fn reset(&mut self) {
        self.set_immediate(self.defaults.value);
        self.set_steps(self.defaults.steps);
    }

    /// The current value.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// The value the ramp is gliding toward.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Size of one step.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Whether a glide is in progress.
    #[inline]
    pub fn is_adjusting(&self) -> bool {
        self.adjusting
    }

    /// Jump to `value`, cancelling any glide.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.remaining = 0;
        self.adjusting = false;
    }

    /// Start gliding toward `target` with the configured step size.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        self.remaining = self.steps_to_target();
        self.adjusting = true;
    }

    /// Take `steps` steps to traverse a range of `1.0`.
    pub fn set_steps(&mut self, steps: f32) {
        self.set_steps_for_range(steps, 1.0);
    }

    /// Take `steps` steps to traverse `range`.
    ///
    /// Smaller distances take a proportional fraction of the steps. The sign of
    /// `range` is irrelevant.
    pub fn set_steps_for_range(&mut self, steps: f32, range: f32) {
        self.delta = libm::fabsf(range / steps);
        if self.adjusting {
            self.remaining = self.steps_to_target();
        }
    }

    /// Number of `step()` calls from the current value to the target, at
    /// least one. Zero when the delta cannot make progress.
    fn steps_to_target(&self) -> u32 {
        if !(self.delta > 0.0 && self.delta.is_finite()) {
            return 0;
        }

        let ratio = libm::fabsf(self.target - self.current) / self.delta;
        let whole = libm::roundf(ratio);
        let count = if libm::fabsf(ratio - whole) <= whole * STEP_COUNT_TOLERANCE {
            whole
        } else {
            libm::ceilf(ratio)
        };
        // Float-to-int casts saturate, NaN becomes 0.
        (count as u32).max(1)
    }

    /// Move one step toward the target. Returns `true` if the value changed
    /// state, `false` if no glide was in progress.
    ///
    /// Every step moves by exactly the delta, except the last one, which lands
    /// on the target.
    pub fn step(&mut self) -> bool {
        if !self.adjusting {
            return false;
        }

        self.remaining = self.remaining.saturating_sub(1);
        let distance = self.target - self.current;
        if self.remaining == 0 || libm::fabsf(distance) <= self.delta {
            self.current = self.target;
            self.remaining = 0;
            self.adjusting = false;
            return true;
        }

        self.current += libm::copysignf(self.delta, distance);
        true
    }
}

impl Default for Ramp {
    fn default() -> Self {
        Ramp::new(0.0, 1000.0)
    }
}
