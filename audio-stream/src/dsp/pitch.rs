//! Musical pitch helpers.

/// Cents per octave.
pub const CENTS_PER_OCTAVE: f32 = 1200.0;

/// Shift `frequency` by `cents` (1/100 of an equal-tempered semitone).
#[inline]
pub fn adjust_frequency(frequency: f32, cents: f32) -> f32 {
    frequency * libm::exp2f(cents / CENTS_PER_OCTAVE)
}
