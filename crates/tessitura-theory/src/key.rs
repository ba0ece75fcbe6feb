//! Key-signature derivation.
//!
//! A key signature is the seven scale degrees of a major or minor key,
//! sampled from a doubled 24-entry rotation of the chromatic table the root
//! was found in. Keeping the whole two-octave rotation means chord makeup
//! can reach degrees past the first octave without re-deriving.

use crate::pitch::{FLAT_NOTATIONS, SHARP_NOTATIONS, correct_enharmonic};
use crate::{Result, TheoryError};

/// Major-scale degree offsets into the chromatic rotation
/// (whole, whole, half, whole, whole, whole, half).
pub const MAJOR_DEGREES: [usize; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Minor-scale degree offsets into the chromatic rotation
/// (whole, half, whole, whole, half, whole, whole).
pub const MINOR_DEGREES: [usize; 7] = [0, 2, 3, 5, 7, 8, 10];

/// Derive the seven notes of the major or minor key rooted at `root`.
///
/// The root is enharmonic-corrected, then located in the sharp table with a
/// flat-table fallback; the signature is spelled from whichever table
/// matched. When `octave` is supplied each note carries an octave digit,
/// incremented once the rotation wraps past the table's 12-tone boundary.
///
/// # Errors
///
/// [`TheoryError::UnknownRoot`] when the corrected root is in neither
/// table; callers must not proceed to chord derivation.
///
/// # Example
///
/// ```rust
/// use tessitura_theory::key_signature;
///
/// let a_minor = key_signature("A", false, None).unwrap();
/// assert_eq!(a_minor, ["A", "B", "C", "D", "E", "F", "G"]);
///
/// let with_octaves = key_signature("G", true, Some(3)).unwrap();
/// assert_eq!(with_octaves[0], "G3");
/// assert_eq!(with_octaves[1], "A4"); // wrapped past G#
/// ```
pub fn key_signature(root: &str, major: bool, octave: Option<i32>) -> Result<Vec<String>> {
    let root = correct_enharmonic(root);

    // Spell from the table the root was found in.
    let (table, start) = match SHARP_NOTATIONS.iter().position(|&n| n == root) {
        Some(pos) => (&SHARP_NOTATIONS, pos),
        None => match FLAT_NOTATIONS.iter().position(|&n| n == root) {
            Some(pos) => (&FLAT_NOTATIONS, pos),
            None => return Err(TheoryError::UnknownRoot(root.to_string())),
        },
    };

    // Two full turns of the chromatic cycle, octave digit bumped on wrap.
    let mut rotation: Vec<String> = Vec::with_capacity(24);
    match octave {
        Some(o) => {
            rotation.extend(table.iter().map(|n| format!("{n}{o}")));
            rotation.extend(table.iter().map(|n| format!("{n}{}", o + 1)));
        }
        None => {
            rotation.extend(table.iter().map(|&n| n.to_string()));
            rotation.extend(table.iter().map(|&n| n.to_string()));
        }
    }

    let degrees = if major { &MAJOR_DEGREES } else { &MINOR_DEGREES };
    Ok(degrees
        .iter()
        .map(|&d| rotation[start + d].clone())
        .collect())
}
