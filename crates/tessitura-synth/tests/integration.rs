//! Integration tests for the tessitura-synth crate.
//!
//! Covers the voice lifecycle across press/release/pull, arpeggiator
//! behavior over chords, and the controller invariants the mixing loop
//! depends on.

use tessitura_synth::{AdsrEnvelope, ArpeggioPattern, Voice, VoiceController, Waveform};
use tessitura_theory::Chord;

const SR: f32 = 48000.0;

fn enveloped(frequency: f32, release_ms: f32) -> Voice {
    let mut voice = Voice::note(frequency, Waveform::Sine, SR);
    let mut env = AdsrEnvelope::new(SR);
    env.set_attack_ms(1.0);
    env.set_decay_ms(1.0);
    env.set_release_ms(release_ms);
    voice.set_envelope(env);
    voice
}

/// Run one mixing tick: pull and sum a block of samples.
fn mix_block(ctrl: &mut VoiceController<u32>, frames: usize) -> Vec<f32> {
    let mut block = vec![0.0f32; frames];
    for voice in ctrl.pull() {
        for slot in block.iter_mut() {
            *slot += voice.produce_sample() * 0.5;
        }
    }
    block
}

// ---------------------------------------------------------------------------
// 1. Press/release lifecycle through the controller
// ---------------------------------------------------------------------------

#[test]
fn enveloped_voice_stays_pulled_until_idle_then_vanishes() {
    let mut ctrl: VoiceController<u32> = VoiceController::new();
    ctrl.press(81, enveloped(440.0, 5.0)); // 5 ms tail = 240 samples

    // Build up the attack, then release.
    mix_block(&mut ctrl, 256);
    ctrl.release(81);

    // The very next pull still includes the releasing voice.
    assert_eq!(ctrl.pull().count(), 1);

    // Consume well past the release tail.
    for _ in 0..8 {
        mix_block(&mut ctrl, 256);
    }

    // The envelope has reverted to idle; the voice is purged for good.
    assert_eq!(ctrl.pull().count(), 0);
    assert!(!ctrl.is_held(81));
}

#[test]
fn purge_is_monotonic() {
    let mut ctrl: VoiceController<u32> = VoiceController::new();
    ctrl.press(81, enveloped(440.0, 2.0));
    ctrl.release(81);

    for _ in 0..20 {
        mix_block(&mut ctrl, 256);
    }
    assert_eq!(ctrl.pull().count(), 0);

    // Once purged, nothing brings the voice back.
    for _ in 0..5 {
        assert_eq!(ctrl.pull().count(), 0);
    }
}

#[test]
fn double_press_leaves_one_voice_under_key() {
    let mut ctrl: VoiceController<u32> = VoiceController::new();
    ctrl.press(70, enveloped(220.0, 50.0));
    ctrl.press(70, enveloped(220.0, 50.0));

    assert_eq!(ctrl.active_count(), 1);
    assert_eq!(ctrl.pull().count(), 1);
}

#[test]
fn release_tail_carries_signal() {
    let mut ctrl: VoiceController<u32> = VoiceController::new();
    ctrl.press(81, enveloped(440.0, 50.0));
    mix_block(&mut ctrl, 512);

    ctrl.release(81);
    let tail = mix_block(&mut ctrl, 256);
    let energy: f32 = tail.iter().map(|s| s.abs()).sum();
    assert!(energy > 0.0, "releasing voice should still sound");
}

#[test]
fn chord_pressed_across_keys_mixes_all_notes() {
    let chord = Chord::new("Cmaj", Some(3)).unwrap();
    let mut ctrl: VoiceController<u32> = VoiceController::new();

    for (i, notation) in chord.notations().iter().enumerate() {
        let voice = Voice::from_notation(notation, Waveform::Sine, SR).unwrap();
        ctrl.press(i as u32, voice);
    }
    assert_eq!(ctrl.active_count(), 3);

    let block = mix_block(&mut ctrl, 256);
    assert!(block.iter().any(|s| s.abs() > 0.0));

    // Headroom: three sine voices at 0.5 each can peak at 1.5, never more.
    assert!(block.iter().all(|s| s.abs() <= 1.5 + 1e-3));
}

// ---------------------------------------------------------------------------
// 2. Arpeggiated voices
// ---------------------------------------------------------------------------

#[test]
fn arpeggio_over_chord_ping_pongs() {
    let chord = Chord::new("Cmaj7", Some(3)).unwrap();
    assert_eq!(chord.notations().len(), 4);

    let pattern = ArpeggioPattern::from_notations(chord.notations(), 0.001, true).unwrap();
    assert_eq!(pattern.step_count(), 6); // 2n - 2

    let mut voice = Voice::arpeggio(pattern, Waveform::Saw, SR);
    let start = voice.frequency();

    // Walk exactly one full pattern: 6 steps of 48 samples (plus rollover).
    let mut sequence = vec![start];
    for _ in 0..6 {
        for _ in 0..49 {
            voice.produce_sample();
        }
        sequence.push(voice.frequency());
    }

    // After a full cycle the pattern is back on its first frequency.
    assert_eq!(sequence[0], sequence[6]);
    // The walk up and the walk back mirror each other.
    assert_eq!(sequence[1], sequence[5]);
    assert_eq!(sequence[2], sequence[4]);
}

#[test]
fn arpeggiated_voice_releases_like_a_note() {
    let pattern = ArpeggioPattern::new(vec![220.0, 277.18, 329.63], 0.01, true);
    let mut voice = Voice::arpeggio(pattern, Waveform::Square, SR);
    let mut env = AdsrEnvelope::new(SR);
    env.set_release_ms(2.0);
    voice.set_envelope(env);

    for _ in 0..100 {
        voice.produce_sample();
    }
    voice.request_release();

    for _ in 0..1000 {
        voice.produce_sample();
    }
    assert!(voice.is_silent());
}

// ---------------------------------------------------------------------------
// 3. Mixed press/release traffic
// ---------------------------------------------------------------------------

#[test]
fn overlapping_voices_resolve_independently() {
    let mut ctrl: VoiceController<u32> = VoiceController::new();
    ctrl.press(1, enveloped(220.0, 2.0));
    ctrl.press(2, enveloped(330.0, 400.0));

    mix_block(&mut ctrl, 128);
    ctrl.release(1);
    ctrl.release(2);

    // Key 1's short tail dies quickly; key 2 keeps ringing.
    for _ in 0..10 {
        mix_block(&mut ctrl, 256);
    }
    assert!(!ctrl.is_held(1));
    assert!(ctrl.is_held(2));
    assert_eq!(ctrl.pull().count(), 1);
}

#[test]
fn repress_during_release_stacks_then_settles() {
    let mut ctrl: VoiceController<u32> = VoiceController::new();
    ctrl.press(1, enveloped(440.0, 3.0));
    mix_block(&mut ctrl, 128);
    ctrl.release(1);

    // Fast re-press: old voice still releasing, new one sounding.
    ctrl.press(1, enveloped(440.0, 3.0));
    assert_eq!(ctrl.pull().count(), 2);

    // Old tail finishes; only the held voice remains.
    for _ in 0..10 {
        mix_block(&mut ctrl, 256);
    }
    assert_eq!(ctrl.pull().count(), 1);
    assert_eq!(ctrl.active_count(), 1);
}
