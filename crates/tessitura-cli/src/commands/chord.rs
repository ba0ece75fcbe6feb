//! Chord playback command.

use super::common::{SoundArgs, StreamArgs, run_performance, sleep_while_running};
use clap::Args;
use tessitura_theory::Chord;

#[derive(Args)]
pub struct ChordArgs {
    /// Chord notation, e.g. "Cmaj7", "Dm9", "Esus4"
    #[arg(value_name = "NOTATION")]
    notation: String,

    /// Root octave to build the chord in
    #[arg(short, long)]
    octave: Option<i32>,

    /// How long to hold the chord, in ms
    #[arg(short, long, default_value = "1500")]
    duration: u64,

    #[command(flatten)]
    sound: SoundArgs,

    #[command(flatten)]
    stream: StreamArgs,
}

pub fn run(args: ChordArgs) -> anyhow::Result<()> {
    let chord = Chord::new(&args.notation, args.octave)?;
    println!(
        "{} resolves to: {}",
        args.notation,
        chord.notations().join(" ")
    );

    let ChordArgs {
        duration,
        sound,
        stream,
        ..
    } = args;
    let notes = chord.into_notations();
    let tail = sound.tail_ms();

    run_performance(&stream, move |handle, sample_rate, stop| {
        for (i, notation) in notes.iter().enumerate() {
            match sound.voice_for(notation, sample_rate) {
                Ok(voice) => handle.press(i as u32, voice),
                Err(err) => tracing::error!(error = %err, note = %notation, "skipping note"),
            }
        }
        sleep_while_running(stop, duration);
        handle.release_all();
        sleep_while_running(stop, tail);
    })
}
