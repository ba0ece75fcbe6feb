//! Arpeggio demo: ping-pong patterns over chord note sets.
//!
//! Run with: cargo run -p tessitura-synth --example arpeggio_demo

use tessitura_synth::{ArpeggioPattern, Voice, Waveform};
use tessitura_theory::Chord;

fn main() {
    let sample_rate = 48000.0;
    let step_secs = 0.002; // 96 samples per step, fast enough to print a cycle

    println!("=== Arpeggio Patterns ===\n");

    for notation in ["Cmaj", "Am7", "G9"] {
        let chord = Chord::new(notation, Some(3)).expect("known chord");
        let n = chord.notations().len();

        let pattern = ArpeggioPattern::from_notations(chord.notations(), step_secs, true)
            .expect("resolvable");
        println!(
            "{:<5} {} notes -> {} steps with auto-reverse (2n-2)",
            notation,
            n,
            pattern.step_count()
        );

        // Walk one full cycle plus one wrap and log each retune.
        let mut voice = Voice::arpeggio(pattern, Waveform::Square, sample_rate);
        let samples_per_step = (sample_rate * step_secs) as usize + 1;

        let mut freqs = vec![voice.frequency()];
        for _ in 0..2 * n - 1 {
            for _ in 0..samples_per_step {
                voice.produce_sample();
            }
            freqs.push(voice.frequency());
        }

        let walked: Vec<String> = freqs.iter().map(|f| format!("{f:.1}")).collect();
        println!("      {} Hz\n", walked.join(" -> "));
    }
}
