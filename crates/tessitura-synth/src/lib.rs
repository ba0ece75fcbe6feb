//! Tessitura Synth - Synthesis engine for the tessitura synthesizer
//!
//! This crate provides the playable half of the synthesizer: waveform
//! oscillators, ADSR envelopes, voices with a three-stage lifecycle, and the
//! polyphonic voice controller that tracks what is currently sounding.
//!
//! # Core Components
//!
//! ## Oscillators
//!
//! [`Oscillator`] advances a normalized phase and renders one of the
//! [`Waveform`] shapes at it:
//!
//! ```rust
//! use tessitura_synth::{Oscillator, Waveform};
//!
//! let mut osc = Oscillator::new(48000.0);
//! osc.set_frequency(440.0);
//! osc.set_waveform(Waveform::Saw);
//!
//! let sample = osc.advance();
//! ```
//!
//! ## Envelopes
//!
//! [`AdsrEnvelope`] shapes amplitude through attack, decay, sustain, and
//! release stages, gated open on key press and closed on key release:
//!
//! ```rust
//! use tessitura_synth::{AdsrEnvelope, EnvelopeStage};
//!
//! let mut env = AdsrEnvelope::new(48000.0);
//! env.trigger_gate(true);
//! let level = env.advance();
//!
//! env.trigger_gate(false);
//! assert_eq!(env.stage(), EnvelopeStage::Release);
//! ```
//!
//! ## Voices
//!
//! [`Voice`] is one independently-sounding unit — a fixed-pitch note or an
//! [`ArpeggioPattern`] cycling through a chord's frequencies. A voice moves
//! from sounding through releasing to silent; with no envelope attached the
//! release is synchronous, with one attached the voice falls silent only
//! when the envelope has cycled back to idle.
//!
//! ## Voice Controller
//!
//! [`VoiceController`] owns the currently pressed and currently releasing
//! voices, keyed by a caller-supplied identifier (a key code, typically):
//!
//! ```rust
//! use tessitura_synth::{Voice, VoiceController, Waveform};
//!
//! let mut ctrl: VoiceController<u32> = VoiceController::new();
//! ctrl.press(81, Voice::from_notation("A3", Waveform::Sine, 48000.0).unwrap());
//!
//! let mut mix = 0.0;
//! for voice in ctrl.pull() {
//!     mix += voice.produce_sample() * 0.5;
//! }
//! ```

pub mod controller;
pub mod envelope;
pub mod osc;
pub mod voice;

pub use controller::VoiceController;
pub use envelope::{AdsrEnvelope, EnvelopeStage};
pub use osc::{Oscillator, UnknownWaveform, Waveform};
pub use voice::{ArpeggioPattern, Voice, VoiceStage};
