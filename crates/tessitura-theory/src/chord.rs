//! Chord notation parsing and note derivation.
//!
//! A chord notation reads `<root><marker?><type?><modifier?>` — `"Cmaj7"`,
//! `"Dm9"`, `"Gsus2"`. The resolver extracts the root, the major/minor
//! marker, and the chord-type token in priority order, derives the base note
//! set from the key signatures of the root, then applies any trailing
//! modifier against the already-derived notes.
//!
//! Extended chords borrow degrees from the parallel key: the makeup table in
//! [`standard_chord_makeup`] mixes major- and minor-key degrees to produce
//! the dominant/half-diminished colorations, so a plain `C7` gets its
//! flatted seventh from C minor while root, third, and fifth come from
//! C major.

use crate::key::key_signature;
use crate::pitch::{FLAT_NOTATIONS, SHARP_NOTATIONS};
use crate::{Result, TheoryError};

/// The chord types the notation grammar can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChordKind {
    /// Major triad (`Cmaj`, or bare `C`).
    MajorTriad,
    /// Minor triad (`Cm`).
    MinorTriad,
    /// Sixth (`C6`).
    Sixth,
    /// Minor sixth (`Cm6`).
    MinorSixth,
    /// Dominant seventh (`C7`).
    Seventh,
    /// Minor seventh (`Cm7`).
    MinorSeventh,
    /// Major seventh (`Cmaj7`).
    MajorSeventh,
    /// Ninth (`C9`).
    Ninth,
    /// Minor ninth (`Cm9`).
    MinorNinth,
    /// Major ninth (`Cmaj9`).
    MajorNinth,
    /// Eleventh (`C11`).
    Eleventh,
    /// Thirteenth (`C13`).
    Thirteenth,
}

impl ChordKind {
    /// Slice length applied to the derived makeup for this kind.
    pub fn arity(self) -> usize {
        match self {
            ChordKind::MajorTriad | ChordKind::MinorTriad => 3,
            ChordKind::Sixth
            | ChordKind::MinorSixth
            | ChordKind::Seventh
            | ChordKind::MinorSeventh
            | ChordKind::MajorSeventh => 4,
            ChordKind::Ninth | ChordKind::MinorNinth | ChordKind::MajorNinth => 5,
            ChordKind::Eleventh => 6,
            ChordKind::Thirteenth => 7,
        }
    }
}

/// Derive the full six-degree makeup a standard chord is sliced from.
///
/// Builds the major and minor key signatures of `root` for the requested
/// octave and the next one, then selects fixed degree positions per the
/// 2×2 `(major_key, major_chord)` table. The mixed arms implement the
/// borrow-from-the-parallel-key rule: a major-key, non-major chord takes
/// its seventh and eleventh from the parallel minor.
pub fn standard_chord_makeup(
    root: &str,
    major_key: bool,
    major_chord: bool,
    octave: Option<i32>,
) -> Result<Vec<String>> {
    let maj = key_signature(root, true, octave)?;
    let min = key_signature(root, false, octave)?;

    let next_octave = octave.map(|o| o + 1);
    let maj2 = key_signature(root, true, next_octave)?;
    let min2 = key_signature(root, false, next_octave)?;

    let picks: [&String; 6] = match (major_key, major_chord) {
        (true, true) => [&maj[0], &maj[2], &maj[4], &maj[6], &maj2[1], &maj2[3]],
        (false, true) => [&min[0], &min[2], &min[4], &min[6], &min2[1], &min2[3]],
        (true, false) => [&maj[0], &maj[2], &maj[4], &min[6], &maj2[1], &min2[3]],
        (false, false) => [&maj[0], &min[2], &maj[4], &min[6], &maj2[1], &min2[3]],
    };
    Ok(picks.into_iter().cloned().collect())
}

fn makeup_slice(
    root: &str,
    major_key: bool,
    octave: Option<i32>,
    arity: usize,
) -> Result<Vec<String>> {
    let mut notes = standard_chord_makeup(root, major_key, false, octave)?;
    notes.truncate(arity);
    Ok(notes)
}

/// Notes of the major triad rooted at `root`.
pub fn major_triad(root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    makeup_slice(root, true, octave, 3)
}

/// Notes of the minor triad rooted at `root`.
pub fn minor_triad(root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    makeup_slice(root, false, octave, 3)
}

/// Notes of the dominant seventh chord rooted at `root`.
pub fn seventh(root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    makeup_slice(root, true, octave, 4)
}

/// Notes of the major seventh chord rooted at `root`.
pub fn major_seventh(root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    makeup_slice(root, true, octave, 4)
}

/// Notes of the minor seventh chord rooted at `root`.
pub fn minor_seventh(root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    makeup_slice(root, false, octave, 4)
}

/// Notes of the ninth chord rooted at `root`.
pub fn ninth(root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    makeup_slice(root, true, octave, 5)
}

/// Notes of the major ninth chord rooted at `root`.
pub fn major_ninth(root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    makeup_slice(root, true, octave, 5)
}

/// Notes of the minor ninth chord rooted at `root`.
pub fn minor_ninth(root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    makeup_slice(root, false, octave, 5)
}

/// Notes of the eleventh chord rooted at `root`.
pub fn eleventh(root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    makeup_slice(root, true, octave, 6)
}

/// Notes of the thirteenth chord rooted at `root`.
///
/// The makeup table tops out at six degrees, so the thirteenth shares the
/// eleventh's note set.
pub fn thirteenth(root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    makeup_slice(root, true, octave, 7)
}

/// Notes of the sixth chord rooted at `root` — degrees {1,3,5,6} of the
/// major key signature rather than the generic makeup.
pub fn sixth(root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    let sig = key_signature(root, true, octave)?;
    Ok(vec![
        sig[0].clone(),
        sig[2].clone(),
        sig[4].clone(),
        sig[5].clone(),
    ])
}

/// Notes of the minor sixth chord rooted at `root` — degrees {1,3,5,6} of
/// the minor key signature.
pub fn minor_sixth(root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    let sig = key_signature(root, false, octave)?;
    Ok(vec![
        sig[0].clone(),
        sig[2].clone(),
        sig[4].clone(),
        sig[5].clone(),
    ])
}

/// Derive the note set for a chord kind.
pub fn notes_for_kind(kind: ChordKind, root: &str, octave: Option<i32>) -> Result<Vec<String>> {
    match kind {
        ChordKind::MajorTriad => major_triad(root, octave),
        ChordKind::MinorTriad => minor_triad(root, octave),
        ChordKind::Sixth => sixth(root, octave),
        ChordKind::MinorSixth => minor_sixth(root, octave),
        ChordKind::Seventh => seventh(root, octave),
        ChordKind::MinorSeventh => minor_seventh(root, octave),
        ChordKind::MajorSeventh => major_seventh(root, octave),
        ChordKind::Ninth => ninth(root, octave),
        ChordKind::MinorNinth => minor_ninth(root, octave),
        ChordKind::MajorNinth => major_ninth(root, octave),
        ChordKind::Eleventh => eleventh(root, octave),
        ChordKind::Thirteenth => thirteenth(root, octave),
    }
}

/// Resolve a chord notation straight to its note list.
///
/// Convenience for callers that don't need a reusable [`Chord`] value.
pub fn resolve_notation(notation: &str, octave: Option<i32>) -> Result<Vec<String>> {
    Ok(Chord::new(notation, octave)?.into_notations())
}

/// Split a notation into root and remainder: two characters when an
/// accidental follows the letter, one otherwise.
fn split_root(notation: &str) -> (&str, &str) {
    let mut indices = notation.char_indices();
    if indices.next().is_none() {
        return ("", "");
    }
    match indices.next() {
        Some((idx, c)) if c == '#' || c == 'b' => notation.split_at(idx + c.len_utf8()),
        Some((idx, _)) => notation.split_at(idx),
        None => (notation, ""),
    }
}

/// Move a note name one or more semitones around the pitch-class table,
/// wrapping at the ends. An octave digit, if present, is carried through
/// unchanged.
fn shift_pitch_class(note: &mut String, delta: i32) {
    let (name, suffix) = match note.chars().last().filter(|c| c.is_ascii_digit()) {
        Some(_) => note.split_at(note.len() - 1),
        None => (note.as_str(), ""),
    };

    let table: &[&str; 12] = if SHARP_NOTATIONS.contains(&name) {
        &SHARP_NOTATIONS
    } else {
        &FLAT_NOTATIONS
    };
    let Some(idx) = table.iter().position(|&n| n == name) else {
        return;
    };

    let shifted = (idx as i32 + delta).rem_euclid(12) as usize;
    *note = format!("{}{}", table[shifted], suffix);
}

/// A chord: a notation, an optional root octave, and the note list derived
/// from them.
///
/// The note list is rebuilt on every setter call, so it is always consistent
/// with the last-set `{root, octave, notation}` triple; a setter that fails
/// to resolve leaves the chord unchanged.
///
/// # Example
///
/// ```rust
/// use tessitura_theory::Chord;
///
/// let mut chord = Chord::new("Dm7", None).unwrap();
/// assert_eq!(chord.notations().len(), 4);
///
/// chord.set_notation("Dsus2").unwrap();
/// assert_eq!(chord.notations(), ["D", "F", "A"]);
/// ```
#[derive(Debug, Clone)]
pub struct Chord {
    notation: String,
    root_octave: Option<i32>,
    notes: Vec<String>,
}

impl Chord {
    /// Parse `notation` and derive the chord's notes, with octave digits
    /// attached when `octave` is given.
    pub fn new(notation: &str, octave: Option<i32>) -> Result<Self> {
        let mut chord = Self {
            notation: notation.to_string(),
            root_octave: octave,
            notes: Vec::new(),
        };
        chord.notes = chord.derive(notation, octave)?;
        Ok(chord)
    }

    /// The derived note list.
    pub fn notations(&self) -> &[String] {
        &self.notes
    }

    /// Consume the chord, returning its note list.
    pub fn into_notations(self) -> Vec<String> {
        self.notes
    }

    /// The chord notation string.
    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// The root parsed from the notation.
    pub fn root(&self) -> &str {
        split_root(&self.notation).0
    }

    /// The root octave, if one was set.
    pub fn root_octave(&self) -> Option<i32> {
        self.root_octave
    }

    /// Replace the notation and rebuild the note list.
    pub fn set_notation(&mut self, notation: &str) -> Result<()> {
        let notes = self.derive(notation, self.root_octave)?;
        self.notation = notation.to_string();
        self.notes = notes;
        Ok(())
    }

    /// Replace the root (keeping marker, type, and modifier) and rebuild.
    pub fn set_root(&mut self, root: &str) -> Result<()> {
        let (_, rest) = split_root(&self.notation);
        let notation = format!("{root}{rest}");
        self.set_notation(&notation)
    }

    /// Replace the root octave and rebuild.
    pub fn set_root_octave(&mut self, octave: Option<i32>) -> Result<()> {
        let notation = self.notation.clone();
        let notes = self.derive(&notation, octave)?;
        self.root_octave = octave;
        self.notes = notes;
        Ok(())
    }

    /// Parse a notation and derive its note list.
    ///
    /// Priority order: root, then `maj`/`m` marker, then chord-type token
    /// (`6`, `7`, `9`, `11`, `13` — anything else falls back to the triad),
    /// then a trailing `aug`/`dim`/`sus` modifier applied to the derived
    /// notes.
    fn derive(&self, notation: &str, octave: Option<i32>) -> Result<Vec<String>> {
        let (root, rest) = split_root(notation);
        if root.is_empty() {
            return Err(TheoryError::UnknownRoot(String::new()));
        }

        // Marker is tri-state: +1 explicit major, -1 minor, 0 unspecified.
        let (marker, rest) = if let Some(r) = rest.strip_prefix("maj") {
            (1i8, r)
        } else if let Some(r) = rest.strip_prefix('m') {
            (-1, r)
        } else {
            (0, rest)
        };

        let (kind, rest) = if rest.starts_with('6') {
            let kind = if marker == -1 {
                ChordKind::MinorSixth
            } else {
                ChordKind::Sixth
            };
            // The sixth token is two characters wide in this grammar.
            (kind, rest.get(2..).unwrap_or(""))
        } else if rest.starts_with('7') {
            let kind = match marker {
                1 => ChordKind::MajorSeventh,
                -1 => ChordKind::MinorSeventh,
                _ => ChordKind::Seventh,
            };
            (kind, &rest[1..])
        } else if rest.starts_with('9') {
            let kind = match marker {
                1 => ChordKind::MajorNinth,
                -1 => ChordKind::MinorNinth,
                _ => ChordKind::Ninth,
            };
            (kind, &rest[1..])
        } else if rest.starts_with("11") {
            (ChordKind::Eleventh, &rest[2..])
        } else if rest.starts_with("13") {
            (ChordKind::Thirteenth, &rest[2..])
        } else {
            // Unrecognized type token reads as a triad; the token text, if
            // any, may still carry a modifier below.
            let kind = if marker >= 0 {
                ChordKind::MajorTriad
            } else {
                ChordKind::MinorTriad
            };
            (kind, rest)
        };

        let mut notes = notes_for_kind(kind, root, octave)?;

        if rest.starts_with("aug") {
            self.augment(&mut notes);
        } else if rest.starts_with("dim") {
            self.diminish(&mut notes);
        } else if let Some(suffix) = rest.strip_prefix("sus") {
            let variant = suffix.chars().next().and_then(|c| c.to_digit(10));
            self.sustain(&mut notes, variant);
        }

        Ok(notes)
    }

    /// Raise the fifth one semitone, wrapping within the pitch-class table.
    fn augment(&self, notes: &mut [String]) {
        if notes.len() > 2 {
            shift_pitch_class(&mut notes[2], 1);
        }
    }

    /// `dim` is parsed but deliberately not applied: the diminished voicing
    /// is unimplemented in this notation scheme and the note set is left
    /// unchanged.
    fn diminish(&self, _notes: &mut [String]) {}

    /// Shift the third: down a semitone for `sus2`, up for `sus4`.
    /// A missing or unrecognized numeric suffix reads as `sus4`.
    fn sustain(&self, notes: &mut [String], variant: Option<u32>) {
        if notes.len() > 1 {
            let delta = if variant == Some(2) { -1 } else { 1 };
            shift_pitch_class(&mut notes[1], delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(notation: &str) -> Vec<String> {
        resolve_notation(notation, None).unwrap()
    }

    #[test]
    fn test_major_triad() {
        assert_eq!(notes("Cmaj"), ["C", "E", "G"]);
        // Bare root reads as a major triad.
        assert_eq!(notes("C"), ["C", "E", "G"]);
    }

    #[test]
    fn test_minor_triad() {
        assert_eq!(notes("Cm"), ["C", "D#", "G"]);
        assert_eq!(notes("Am"), ["A", "C", "E"]);
    }

    #[test]
    fn test_dominant_seventh_borrows_flat_seventh() {
        assert_eq!(notes("C7"), ["C", "E", "G", "A#"]);
    }

    #[test]
    fn test_major_seventh_shares_dominant_coloration() {
        // The makeup wiring renders maj7 with the borrowed seventh as well.
        assert_eq!(notes("Cmaj7"), notes("C7"));
    }

    #[test]
    fn test_minor_seventh() {
        assert_eq!(notes("Cm7"), ["C", "D#", "G", "A#"]);
        assert_eq!(notes("Dm7"), ["D", "F", "A", "C"]);
    }

    #[test]
    fn test_ninth_family() {
        assert_eq!(notes("C9"), ["C", "E", "G", "A#", "D"]);
        assert_eq!(notes("Cm9").len(), 5);
        assert_eq!(notes("Cmaj9").len(), 5);
    }

    #[test]
    fn test_eleventh() {
        assert_eq!(notes("C11"), ["C", "E", "G", "A#", "D", "F"]);
    }

    #[test]
    fn test_thirteenth_tops_out_at_makeup_length() {
        assert_eq!(notes("C13"), notes("C11"));
    }

    #[test]
    fn test_sixth_from_key_signature() {
        assert_eq!(notes("C6"), ["C", "E", "G", "A"]);
        assert_eq!(notes("Cm6"), ["C", "D#", "G", "G#"]);
    }

    #[test]
    fn test_sus_four_raises_third() {
        assert_eq!(notes("Csus4"), ["C", "F", "G"]);
        // Missing suffix defaults to sus4.
        assert_eq!(notes("Csus"), ["C", "F", "G"]);
    }

    #[test]
    fn test_sus_two_lowers_third() {
        assert_eq!(notes("Csus2"), ["C", "D#", "G"]);
    }

    #[test]
    fn test_augmented_raises_fifth() {
        assert_eq!(notes("Caug"), ["C", "E", "G#"]);
    }

    #[test]
    fn test_augment_wraps_table_boundary() {
        // The fifth of C#'s triad is G#, table index 11; raising wraps to A.
        assert_eq!(notes("C#aug"), ["C#", "F", "A"]);
    }

    #[test]
    fn test_dim_is_a_documented_no_op() {
        assert_eq!(notes("Cdim"), notes("Cmaj"));
    }

    #[test]
    fn test_minor_marker_with_modifier() {
        assert_eq!(notes("Dm7sus4"), ["D", "F#", "A", "C"]);
    }

    #[test]
    fn test_sharp_and_flat_roots() {
        assert_eq!(notes("A#m7"), ["A#", "C#", "F", "G#"]);
        assert_eq!(notes("Bbmaj")[0], "Bb");
    }

    #[test]
    fn test_octave_digits_attach() {
        let notes = resolve_notation("Cmaj", Some(3)).unwrap();
        assert_eq!(notes, ["C3", "E3", "G3"]);
    }

    #[test]
    fn test_octave_wraps_into_next() {
        // G's third and fifth sit past the table wrap, an octave up.
        let notes = resolve_notation("Gmaj", Some(3)).unwrap();
        assert_eq!(notes, ["G3", "B4", "D4"]);
    }

    #[test]
    fn test_modifier_with_octave_digits() {
        let notes = resolve_notation("Csus4", Some(3)).unwrap();
        assert_eq!(notes, ["C3", "F3", "G3"]);
    }

    #[test]
    fn test_unknown_root_propagates() {
        assert!(matches!(
            resolve_notation("Xmaj", None),
            Err(TheoryError::UnknownRoot(_))
        ));
        assert!(resolve_notation("", None).is_err());
    }

    #[test]
    fn test_chord_rebuild_on_set_notation() {
        let mut chord = Chord::new("Cmaj", None).unwrap();
        chord.set_notation("Am").unwrap();
        assert_eq!(chord.notations(), ["A", "C", "E"]);
        assert_eq!(chord.notation(), "Am");
    }

    #[test]
    fn test_chord_rebuild_on_set_root() {
        let mut chord = Chord::new("Cmaj7", None).unwrap();
        chord.set_root("D").unwrap();
        assert_eq!(chord.notation(), "Dmaj7");
        assert_eq!(chord.notations(), notes("D7"));
    }

    #[test]
    fn test_chord_rebuild_on_set_octave() {
        let mut chord = Chord::new("Cmaj", None).unwrap();
        chord.set_root_octave(Some(2)).unwrap();
        assert_eq!(chord.notations(), ["C2", "E2", "G2"]);
    }

    #[test]
    fn test_failed_setter_leaves_chord_unchanged() {
        let mut chord = Chord::new("Cmaj", None).unwrap();
        assert!(chord.set_notation("Xmaj").is_err());
        assert_eq!(chord.notation(), "Cmaj");
        assert_eq!(chord.notations(), ["C", "E", "G"]);
    }

    #[test]
    fn test_root_accessor() {
        assert_eq!(Chord::new("F#m", None).unwrap().root(), "F#");
        assert_eq!(Chord::new("Bb7", None).unwrap().root(), "Bb");
        assert_eq!(Chord::new("G", None).unwrap().root(), "G");
    }

    #[test]
    fn test_makeup_table_major_chord_arm() {
        // The (major key, major chord) arm keeps the natural seventh.
        let makeup = standard_chord_makeup("C", true, true, None).unwrap();
        assert_eq!(makeup, ["C", "E", "G", "B", "D", "F"]);
    }

    #[test]
    fn test_kind_arity() {
        assert_eq!(ChordKind::MajorTriad.arity(), 3);
        assert_eq!(ChordKind::MinorSeventh.arity(), 4);
        assert_eq!(ChordKind::Ninth.arity(), 5);
        assert_eq!(ChordKind::Eleventh.arity(), 6);
        assert_eq!(ChordKind::Thirteenth.arity(), 7);
    }
}
