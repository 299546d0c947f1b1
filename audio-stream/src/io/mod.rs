//! Output streaming.
//!
//! ## Components
//!
//! | Item | Description |
//! |------|-------------|
//! | [`StreamEngine`] | Double-buffered, ISR-refilled sample stream |
//! | [`Transport`] / [`MicrosClock`] | Board-provided DMA transport and timer |
//! | [`frame`] | Buffer layout and sample conversion |
//!
//! ## Buffer Layout
//!
//! The engine owns two buffers of `[[i32; 2]; FRAMES]`:
//! - Each frame holds one centered `i32` sample per channel, left first
//! - The transport streams buffer 0, then 1, then 0 again, forever
//! - After each buffer, the ISR refills the one just finished while the DMA
//!   reads the other

pub mod frame;
pub mod stream;
pub mod transport;

pub use frame::{Buffer, Frame};
pub use stream::{StreamConfig, StreamEngine, StreamError, StreamState};
pub use transport::{MicrosClock, Transport};
