//! Tessitura Theory - Music-theory engine for the tessitura synthesizer
//!
//! This crate converts symbolic musical input (note names, chord notations)
//! into frequencies and note lists. It is the pure, table-driven half of the
//! synthesizer: no audio, no state, safe to call from any thread.
//!
//! # Core Components
//!
//! ## Pitch resolution
//!
//! A pitch notation is a letter A–G, an optional accidental (`#`/`b`), and an
//! optional trailing octave digit (default 4):
//!
//! ```rust
//! use tessitura_theory::notation_to_freq;
//!
//! let a4 = notation_to_freq("A4").unwrap();
//! assert!((a4 - 440.0).abs() < 1e-3);
//!
//! let fsharp = notation_to_freq("F#3").unwrap();
//! ```
//!
//! Odd enharmonic spellings (`B#`, `Cb`, `E#`, `Fb`) are corrected to their
//! natural equivalents before lookup.
//!
//! ## Key signatures
//!
//! The seven scale degrees of a major or minor key:
//!
//! ```rust
//! use tessitura_theory::key_signature;
//!
//! let c_major = key_signature("C", true, None).unwrap();
//! assert_eq!(c_major, ["C", "D", "E", "F", "G", "A", "B"]);
//! ```
//!
//! ## Chords
//!
//! [`Chord`] parses notations like `"Cmaj7"`, `"Dm9"`, or `"Esus4"` and
//! derives the chord's note list. Changing the root, octave, or notation
//! rebuilds the list:
//!
//! ```rust
//! use tessitura_theory::Chord;
//!
//! let chord = Chord::new("Cmaj", None).unwrap();
//! assert_eq!(chord.notations(), ["C", "E", "G"]);
//! ```
//!
//! # Errors
//!
//! Malformed pitch input surfaces as [`TheoryError::UnknownNotation`] or
//! [`TheoryError::UnknownRoot`]; both abort the triggering operation so no
//! voice is ever created with an undefined frequency. An unrecognized
//! chord-type token is *not* an error — it falls back to the triad reading.

pub mod chord;
pub mod key;
pub mod pitch;

pub use chord::{Chord, ChordKind, standard_chord_makeup};
pub use key::{MAJOR_DEGREES, MINOR_DEGREES, key_signature};
pub use pitch::{FLAT_NOTATIONS, SHARP_NOTATIONS, correct_enharmonic, notation_to_freq};

use thiserror::Error;

/// Errors from pitch, key-signature, and chord resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// A pitch notation matched neither the sharp nor the flat table.
    #[error("unknown notation: '{0}'")]
    UnknownNotation(String),

    /// A key or chord root matched neither the sharp nor the flat table.
    #[error("unknown root: '{0}'")]
    UnknownRoot(String),
}

/// Convenience result type for theory operations.
pub type Result<T> = std::result::Result<T, TheoryError>;
