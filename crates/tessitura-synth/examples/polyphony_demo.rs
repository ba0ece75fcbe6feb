//! Polyphony demo: chord resolution, voice lifecycle, and the controller.
//!
//! Run with: cargo run -p tessitura-synth --example polyphony_demo

use tessitura_synth::{AdsrEnvelope, Voice, VoiceController, Waveform};
use tessitura_theory::{Chord, notation_to_freq};

fn main() {
    let sample_rate = 48000.0;

    // --- Chord resolution ---
    println!("=== Chord Resolution ===\n");

    for notation in ["Cmaj", "Am", "Dm7", "G7", "Csus4", "Faug"] {
        let chord = Chord::new(notation, Some(3)).expect("known chord");
        let notes = chord.notations().join(" ");
        let freqs: Vec<String> = chord
            .notations()
            .iter()
            .map(|n| format!("{:.1}", notation_to_freq(n).expect("resolvable")))
            .collect();
        println!("{:<6} -> {:<16} ({} Hz)", notation, notes, freqs.join(", "));
    }

    // --- Pressing a chord into the controller ---
    println!("\n=== Voice Lifecycle Through the Controller ===\n");

    let chord = Chord::new("Am", Some(3)).expect("known chord");
    let mut ctrl: VoiceController<u32> = VoiceController::new();

    for (key, notation) in chord.notations().iter().enumerate() {
        let mut voice =
            Voice::from_notation(notation, Waveform::Saw, sample_rate).expect("resolvable");
        let mut env = AdsrEnvelope::new(sample_rate);
        env.set_attack_ms(5.0);
        env.set_release_ms(40.0);
        voice.set_envelope(env);
        ctrl.press(key as u32, voice);
    }

    println!("Pressed {} voices: Am in octave 3", ctrl.active_count());
    println!("\nBlock# | Active | Releasing | Peak");
    println!("-------+--------+-----------+-------");

    let mut block = [0.0f32; 256];
    for n in 0..12 {
        // Release the whole chord after the fourth block.
        if n == 4 {
            ctrl.release_all();
            println!("--- release all ---");
        }

        block.fill(0.0);
        for voice in ctrl.pull() {
            for slot in block.iter_mut() {
                *slot += voice.produce_sample() * 0.5;
            }
        }

        let peak = block.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        println!(
            "{:>6} | {:>6} | {:>9} | {:>5.3}",
            n,
            ctrl.active_count(),
            ctrl.releasing_count(),
            peak
        );

        if ctrl.is_empty() {
            println!("\nAll release tails finished; the controller purged every voice.");
            break;
        }
    }
}
