//! Smoothing primitives for click-free parameter changes.
//!
//! - [`Ramp`] — a value gliding linearly toward a target
//! - [`PhaseAccumulator`] — a `[0, 1)` phase whose frequency can glide
//! - [`pitch`] — cent arithmetic

pub mod phase;
pub mod pitch;
pub mod ramp;

pub use phase::PhaseAccumulator;
pub use ramp::Ramp;
