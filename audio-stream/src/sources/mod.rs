//! Sample sources built on the smoothing primitives.
//!
//! Each implements [`SampleSource`](crate::source::SampleSource) and can be
//! registered on a [`StreamEngine`](crate::io::StreamEngine) channel.

mod dc;
mod sine;

pub use dc::DcSource;
pub use sine::SineSource;
