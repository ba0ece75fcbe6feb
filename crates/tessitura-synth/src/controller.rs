//! Polyphonic voice controller.
//!
//! Tracks the currently pressed and currently releasing voices, keyed by an
//! opaque caller-supplied identifier (a keyboard key code, typically). The
//! controller is the single integration point between input events and the
//! mixing loop: `press`/`release` mutate the collections, `pull` purges
//! finished voices and hands back everything that must be summed this tick.
//!
//! Operations on unknown identifiers are no-ops, not errors — input sources
//! deliver spurious and duplicate events, and idempotence beats strictness
//! at this boundary.

use crate::voice::Voice;

/// Owner of the sounding and releasing voice sets.
///
/// A voice lives in exactly one of the two collections from press until it
/// is purged after falling silent. Both keep insertion order, so `pull`
/// yields voices in the order they were pressed.
///
/// # Example
///
/// ```rust
/// use tessitura_synth::{Voice, VoiceController, Waveform};
///
/// let mut ctrl: VoiceController<u32> = VoiceController::new();
/// ctrl.press(1, Voice::note(440.0, Waveform::Sine, 48000.0));
/// assert!(ctrl.is_held(1));
///
/// ctrl.release(1);
/// // Un-enveloped voices fall silent synchronously and vanish on pull.
/// assert_eq!(ctrl.pull().count(), 0);
/// assert!(!ctrl.is_held(1));
/// ```
#[derive(Debug, Default)]
pub struct VoiceController<K> {
    active: Vec<(K, Voice)>,
    releasing: Vec<(K, Voice)>,
}

impl<K: PartialEq + Copy> VoiceController<K> {
    /// Create an empty controller.
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            releasing: Vec::new(),
        }
    }

    /// Press `key` with `voice`.
    ///
    /// Idempotent: if `key` is already active the incoming voice is dropped,
    /// so duplicate key-down events cannot stack voices under one key.
    /// Otherwise the voice is reset to its sounding stage and appended.
    pub fn press(&mut self, key: K, mut voice: Voice) {
        if self.active.iter().any(|(k, _)| *k == key) {
            return;
        }
        voice.reset();
        self.active.push((key, voice));
    }

    /// Release every active voice under `key`, moving each to the releasing
    /// set. Releasing an unknown key is a no-op.
    pub fn release(&mut self, key: K) {
        let mut i = 0;
        while i < self.active.len() {
            if self.active[i].0 == key {
                let (k, mut voice) = self.active.remove(i);
                voice.request_release();
                self.releasing.push((k, voice));
            } else {
                i += 1;
            }
        }
    }

    /// Release every active voice.
    pub fn release_all(&mut self) {
        for (k, mut voice) in self.active.drain(..) {
            voice.request_release();
            self.releasing.push((k, voice));
        }
    }

    /// Whether `key` appears in either the active or the releasing set.
    pub fn is_held(&self, key: K) -> bool {
        self.active.iter().any(|(k, _)| *k == key)
            || self.releasing.iter().any(|(k, _)| *k == key)
    }

    /// Number of actively held voices.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of voices still releasing.
    pub fn releasing_count(&self) -> usize {
        self.releasing.len()
    }

    /// Whether no voice is sounding or releasing.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.releasing.is_empty()
    }

    /// Purge voices that finished releasing, then yield the voices to mix
    /// this tick: active first, then releasing, each in insertion order.
    ///
    /// Runs in O(active + releasing) and allocates nothing.
    pub fn pull(&mut self) -> impl Iterator<Item = &mut Voice> {
        self.releasing.retain(|(_, voice)| !voice.is_silent());
        self.active
            .iter_mut()
            .map(|(_, voice)| voice)
            .chain(self.releasing.iter_mut().map(|(_, voice)| voice))
    }
}
