//! Chromatic pitch tables and notation-to-frequency resolution.
//!
//! The tables run from A: tuning is anchored at A4 = 440 Hz and octave
//! numbers advance when the chromatic cycle wraps past G#. Both a sharp and
//! a flat spelling of the twelve tones are kept so that either accidental
//! style resolves.

use crate::{Result, TheoryError};

/// The twelve chromatic tones in sharp spelling, rooted at A.
pub const SHARP_NOTATIONS: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// The twelve chromatic tones in flat spelling, rooted at A.
pub const FLAT_NOTATIONS: [&str; 12] = [
    "A", "Bb", "B", "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab",
];

/// Accidental spellings that resolve to a natural tone.
const ODD_NOTATIONS: [&str; 4] = ["B#", "Cb", "E#", "Fb"];

/// Natural equivalents for [`ODD_NOTATIONS`], index-aligned.
const CORRECTED_NOTATIONS: [&str; 4] = ["C", "C", "F", "F"];

/// Default octave when a notation carries no octave digit.
pub const DEFAULT_OCTAVE: i32 = 4;

/// Replace an odd enharmonic spelling (`B#`, `Cb`, `E#`, `Fb`) with its
/// natural equivalent. Any other spelling passes through unchanged.
pub fn correct_enharmonic(name: &str) -> &str {
    match ODD_NOTATIONS.iter().position(|&odd| odd == name) {
        Some(idx) => CORRECTED_NOTATIONS[idx],
        None => name,
    }
}

/// Split a notation into its pitch name and octave.
///
/// The octave is the trailing digit when present, [`DEFAULT_OCTAVE`]
/// otherwise. `"A#3"` splits into `("A#", 3)`; `"C"` into `("C", 4)`.
pub fn split_octave(notation: &str) -> (&str, i32) {
    match notation.chars().last().and_then(|c| c.to_digit(10)) {
        Some(digit) => (&notation[..notation.len() - 1], digit as i32),
        None => (notation, DEFAULT_OCTAVE),
    }
}

/// Look up a pitch name's chromatic index, trying the sharp table first and
/// falling back to the flat table. The name must already be
/// enharmonic-corrected.
pub(crate) fn chromatic_index(name: &str) -> Option<usize> {
    SHARP_NOTATIONS
        .iter()
        .position(|&n| n == name)
        .or_else(|| FLAT_NOTATIONS.iter().position(|&n| n == name))
}

/// Resolve a pitch notation to its frequency in Hz.
///
/// Parses the trailing octave digit (default 4), corrects odd enharmonics,
/// looks the name up in the sharp table with a flat-table fallback, and
/// applies the equal-temperament formula `440 * 2^(semitones/12)` where
/// `semitones` counts from A4.
///
/// # Errors
///
/// [`TheoryError::UnknownNotation`] when the name is in neither table.
///
/// # Example
///
/// ```rust
/// use tessitura_theory::notation_to_freq;
///
/// assert!((notation_to_freq("A4").unwrap() - 440.0).abs() < 1e-3);
/// assert!((notation_to_freq("A3").unwrap() - 220.0).abs() < 1e-3);
/// ```
pub fn notation_to_freq(notation: &str) -> Result<f32> {
    let (name, octave) = split_octave(notation);
    let name = correct_enharmonic(name);

    let index = chromatic_index(name)
        .ok_or_else(|| TheoryError::UnknownNotation(notation.to_string()))?;

    let semitones = index as i32 + (octave - DEFAULT_OCTAVE) * 12;
    Ok(440.0 * libm::powf(2.0, semitones as f32 / 12.0))
}
