//! Pin-driven codec power and enable control.
//!
//! Many I2S DACs need no register setup: a regulator enable line switches the
//! analog supply and a second line (`XSMT`, `/PDN`, `EN`) takes the chip out
//! of mute or power-down. [`GpioCodec`] drives those two lines and implements
//! [`CodecControl`] for the streaming engine.
//!
//! The driver is generic over any [`embedded_hal::digital::OutputPin`] and
//! [`embedded_hal::delay::DelayNs`] implementation.
//!
//! # Example
//!
//! ```ignore
//! let codec = GpioCodec::new(regulator_en, dac_xsmt, delay)
//!     .with_enable_level(Level::ActiveLow)
//!     .with_settle_ms(10);
//! let mut engine = StreamEngine::new(codec, dma, timer, StreamConfig::new());
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::control::CodecControl;

/// Default time for the analog supply to settle after power-up.
pub const DEFAULT_SETTLE_MS: u32 = 5;

/// Electrical level that means "on" for a control line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Driving the pin high turns the function on.
    ActiveHigh,
    /// Driving the pin low turns the function on.
    ActiveLow,
}

impl Level {
    fn state(self, on: bool) -> PinState {
        match self {
            Level::ActiveHigh => PinState::from(on),
            Level::ActiveLow => PinState::from(!on),
        }
    }
}

/// Codec controlled by a power pin and an enable pin.
///
/// Both pins must share an error type, as pins from one HAL do.
pub struct GpioCodec<P, E, D> {
    power: P,
    enable: E,
    delay: D,
    power_level: Level,
    enable_level: Level,
    settle_ms: u32,
    powered: bool,
    enabled: bool,
}

impl<P, E, D> GpioCodec<P, E, D>
where
    P: OutputPin,
    E: OutputPin<Error = P::Error>,
    D: DelayNs,
{
    /// Create a driver with active-high pins and the default settle time.
    ///
    /// The pins are not touched until the first hook call.
    pub fn new(power: P, enable: E, delay: D) -> Self {
        Self {
            power,
            enable,
            delay,
            power_level: Level::ActiveHigh,
            enable_level: Level::ActiveHigh,
            settle_ms: DEFAULT_SETTLE_MS,
            powered: false,
            enabled: false,
        }
    }

    /// Set the active level of the power pin.
    pub fn with_power_level(mut self, level: Level) -> Self {
        self.power_level = level;
        self
    }

    /// Set the active level of the enable pin.
    pub fn with_enable_level(mut self, level: Level) -> Self {
        self.enable_level = level;
        self
    }

    /// Set the delay after switching the supply on.
    pub fn with_settle_ms(mut self, settle_ms: u32) -> Self {
        self.settle_ms = settle_ms;
        self
    }

    /// Whether the supply is switched on.
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Whether the chip is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Release the pins and delay.
    pub fn release(self) -> (P, E, D) {
        (self.power, self.enable, self.delay)
    }
}

impl<P, E, D> CodecControl for GpioCodec<P, E, D>
where
    P: OutputPin,
    E: OutputPin<Error = P::Error>,
    D: DelayNs,
{
    type Error = P::Error;

    fn handle_power(&mut self, on: bool) -> Result<(), Self::Error> {
        if on == self.powered {
            return Ok(());
        }

        // Never leave the digital side enabled on a dead supply.
        if !on && self.enabled {
            self.handle_enable(false)?;
        }

        self.power.set_state(self.power_level.state(on))?;
        self.powered = on;

        if on {
            self.delay.delay_ms(self.settle_ms);
        }
        Ok(())
    }

    fn handle_enable(&mut self, on: bool) -> Result<(), Self::Error> {
        if on == self.enabled {
            return Ok(());
        }

        self.enable.set_state(self.enable_level.state(on))?;
        self.enabled = on;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use embedded_hal::digital::{self, ErrorType};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockError;

    impl digital::Error for MockError {
        fn kind(&self) -> digital::ErrorKind {
            digital::ErrorKind::Other
        }
    }

    /// Output pin that mirrors its level into a shared cell.
    struct MockPin<'a> {
        high: &'a Cell<bool>,
        writes: &'a Cell<u32>,
        fail: bool,
    }

    impl ErrorType for MockPin<'_> {
        type Error = MockError;
    }

    impl OutputPin for MockPin<'_> {
        fn set_low(&mut self) -> Result<(), MockError> {
            if self.fail {
                return Err(MockError);
            }
            self.high.set(false);
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), MockError> {
            if self.fail {
                return Err(MockError);
            }
            self.high.set(true);
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }
    }

    /// Delay that only accumulates the requested time.
    struct MockDelay<'a> {
        total_ns: &'a Cell<u64>,
    }

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns.set(self.total_ns.get() + ns as u64);
        }
    }

    struct Rig {
        power: Cell<bool>,
        enable: Cell<bool>,
        writes: Cell<u32>,
        delay_ns: Cell<u64>,
    }

    impl Rig {
        fn new() -> Self {
            Rig {
                power: Cell::new(false),
                enable: Cell::new(false),
                writes: Cell::new(0),
                delay_ns: Cell::new(0),
            }
        }

        fn codec(&self, fail_power: bool) -> GpioCodec<MockPin<'_>, MockPin<'_>, MockDelay<'_>> {
            GpioCodec::new(
                MockPin {
                    high: &self.power,
                    writes: &self.writes,
                    fail: fail_power,
                },
                MockPin {
                    high: &self.enable,
                    writes: &self.writes,
                    fail: false,
                },
                MockDelay {
                    total_ns: &self.delay_ns,
                },
            )
        }
    }

    #[test]
    fn power_on_drives_pin_and_waits() {
        let rig = Rig::new();
        let mut codec = rig.codec(false).with_settle_ms(20);

        codec.handle_power(true).unwrap();
        assert!(rig.power.get());
        assert!(codec.is_powered());
        assert!(rig.delay_ns.get() >= 20_000_000);
    }

    #[test]
    fn hooks_are_idempotent() {
        let rig = Rig::new();
        let mut codec = rig.codec(false);

        codec.handle_power(true).unwrap();
        codec.handle_power(true).unwrap();
        codec.handle_enable(true).unwrap();
        codec.handle_enable(true).unwrap();
        assert_eq!(rig.writes.get(), 2);

        codec.handle_enable(false).unwrap();
        codec.handle_enable(false).unwrap();
        assert_eq!(rig.writes.get(), 3);
    }

    #[test]
    fn power_off_disables_first() {
        let rig = Rig::new();
        let mut codec = rig.codec(false);
        codec.handle_power(true).unwrap();
        codec.handle_enable(true).unwrap();

        codec.handle_power(false).unwrap();
        assert!(!rig.enable.get());
        assert!(!rig.power.get());
        assert!(!codec.is_enabled());
        assert!(!codec.is_powered());
    }

    #[test]
    fn active_low_enable_inverts() {
        let rig = Rig::new();
        let mut codec = rig.codec(false).with_enable_level(Level::ActiveLow);
        codec.handle_power(true).unwrap();

        codec.handle_enable(true).unwrap();
        assert!(!rig.enable.get());
        codec.handle_enable(false).unwrap();
        assert!(rig.enable.get());
    }

    #[test]
    fn pin_error_is_reported_and_state_kept() {
        let rig = Rig::new();
        let mut codec = rig.codec(true);

        assert_eq!(codec.handle_power(true), Err(MockError));
        assert!(!codec.is_powered());
        assert_eq!(rig.delay_ns.get(), 0);
    }
}
