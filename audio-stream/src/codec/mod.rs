//! Codec control implementations.
//!
//! # Feature gate
//!
//! This module is available when the `gpio-codec` feature is enabled (on by default).

mod gpio;

pub use gpio::{GpioCodec, Level, DEFAULT_SETTLE_MS};
