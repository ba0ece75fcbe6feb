//! Audio output layer for the tessitura synthesizer.
//!
//! This crate provides:
//!
//! - **Real-time output**: [`OutputStream`] over cpal, plus device listing
//! - **The mixing engine**: [`PolyEngine`] pulls the voice controller once
//!   per buffer and sums the returned voices into the output
//! - **The input handoff**: [`KeyHandle`] carries press/release events from
//!   any thread into the audio callback without locks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tessitura_io::{OutputStream, PolyEngine, StreamConfig};
//! use tessitura_synth::{Voice, Waveform};
//!
//! let mut stream = OutputStream::new(StreamConfig::default())?;
//! let (handle, mut engine) = PolyEngine::new(stream.sample_rate() as f32);
//!
//! let channels = stream.channels() as usize;
//! handle.press(81, Voice::from_notation("A3", Waveform::Saw, 48000.0)?);
//!
//! stream.run(move |buffer| engine.render(buffer, channels))?;
//! ```

mod engine;
mod stream;

pub use engine::{KeyEvent, KeyHandle, PolyEngine};
pub use stream::{
    AudioDevice, OutputStream, StreamConfig, default_output_device, list_output_devices,
};

/// Error types for audio output operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Audio stream setup or runtime error.
    #[error("audio stream error: {0}")]
    Stream(String),

    /// No audio output device available on the system.
    #[error("no audio output device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("output device not found: {0}")]
    DeviceNotFound(String),

    /// The selected device reports a channel layout the mixer cannot fill.
    #[error("unsupported channel count: {0}")]
    UnsupportedChannelCount(u16),
}

/// Convenience result type for audio output operations.
pub type Result<T> = std::result::Result<T, Error>;
