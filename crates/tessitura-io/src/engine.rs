//! The polyphonic mixing engine and its key-event handoff.
//!
//! Input events arrive from an arbitrary thread through [`KeyHandle`]; the
//! audio callback owns the [`PolyEngine`] and with it the voice controller.
//! Events cross the boundary over a single-producer channel, so the
//! callback never takes a lock and a pull can never observe a half-applied
//! press or release: events are whole values, applied between buffers.

use std::sync::mpsc;

use tessitura_synth::{Voice, VoiceController};

/// A key event crossing from the input thread to the audio callback.
#[derive(Debug)]
pub enum KeyEvent {
    /// Press a key with the voice to sound.
    Press(u32, Voice),
    /// Release every voice held under a key.
    Release(u32),
    /// Release everything (panic button, end of score).
    ReleaseAll,
}

/// Sender half of the key-event handoff. Cheap to clone; safe to use from
/// any thread.
#[derive(Debug, Clone)]
pub struct KeyHandle {
    tx: mpsc::Sender<KeyEvent>,
}

impl KeyHandle {
    /// Send a press event. Dropped silently once the engine is gone.
    pub fn press(&self, key: u32, voice: Voice) {
        let _ = self.tx.send(KeyEvent::Press(key, voice));
    }

    /// Send a release event for `key`.
    pub fn release(&self, key: u32) {
        let _ = self.tx.send(KeyEvent::Release(key));
    }

    /// Release every held voice.
    pub fn release_all(&self) {
        let _ = self.tx.send(KeyEvent::ReleaseAll);
    }
}

/// The mixing engine: drains pending key events, pulls the controller once
/// per buffer, and sums the returned voices into the output.
///
/// # Example
///
/// ```rust
/// use tessitura_io::PolyEngine;
/// use tessitura_synth::{Voice, Waveform};
///
/// let (handle, mut engine) = PolyEngine::new(48000.0);
/// handle.press(81, Voice::note(440.0, Waveform::Sine, 48000.0));
///
/// let mut buffer = [0.0f32; 512];
/// engine.render(&mut buffer, 2);
/// assert!(buffer.iter().any(|s| *s != 0.0));
/// ```
#[derive(Debug)]
pub struct PolyEngine {
    controller: VoiceController<u32>,
    events: mpsc::Receiver<KeyEvent>,
    sample_rate: f32,
}

/// Fixed per-voice headroom applied when summing into the mix.
const VOICE_GAIN: f32 = 0.5;

impl PolyEngine {
    /// Create an engine and the handle that feeds it events.
    pub fn new(sample_rate: f32) -> (KeyHandle, Self) {
        let (tx, rx) = mpsc::channel();
        (
            KeyHandle { tx },
            Self {
                controller: VoiceController::new(),
                events: rx,
                sample_rate,
            },
        )
    }

    /// Sample rate the engine was created for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Voices currently sounding or releasing.
    pub fn voice_count(&self) -> usize {
        self.controller.active_count() + self.controller.releasing_count()
    }

    /// Whether `key` is currently held (sounding or releasing).
    pub fn is_held(&self, key: u32) -> bool {
        self.controller.is_held(key)
    }

    /// Fill one interleaved output buffer of `channels` channels.
    ///
    /// Applies all pending key events, then sums
    /// `produce_sample() * 0.5` across the pulled voices for each frame,
    /// replicating the summed value to every channel.
    pub fn render(&mut self, buffer: &mut [f32], channels: usize) {
        self.apply_pending_events();

        buffer.fill(0.0);
        if channels == 0 {
            return;
        }

        let frames = buffer.len() / channels;
        for voice in self.controller.pull() {
            for frame in 0..frames {
                let sample = voice.produce_sample() * VOICE_GAIN;
                let base = frame * channels;
                for slot in &mut buffer[base..base + channels] {
                    *slot += sample;
                }
            }
        }
    }

    /// Drain the event channel into the controller. Never blocks.
    fn apply_pending_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                KeyEvent::Press(key, voice) => self.controller.press(key, voice),
                KeyEvent::Release(key) => self.controller.release(key),
                KeyEvent::ReleaseAll => self.controller.release_all(),
            }
        }
    }
}
