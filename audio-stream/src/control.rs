/// Power and enable hooks of a codec chip.
///
/// The streaming engine calls these when it brings the output up for the first
/// time and when it is reset. Both must be idempotent.
pub trait CodecControl {
    /// Error type for hook failures.
    type Error;

    /// Enable or disable the analog power supply.
    fn handle_power(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Enable or disable the digital operating mode.
    fn handle_enable(&mut self, on: bool) -> Result<(), Self::Error>;
}
