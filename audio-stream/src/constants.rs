/// Number of output channels (stereo).
pub const CHANNELS: usize = 2;

/// Number of sample buffers cycled by the transport (ping-pong pair).
pub const BUFFER_COUNT: usize = 2;

/// Default number of frames (sample slots) per buffer.
pub const DEFAULT_FRAMES: usize = 64;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;

/// Full-scale value a sample of `1.0` is scaled to.
pub const SAMPLE_FULL_SCALE: f32 = i32::MAX as f32;
