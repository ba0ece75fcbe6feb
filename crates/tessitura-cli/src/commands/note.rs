//! Single-note playback command.

use super::common::{SoundArgs, StreamArgs, run_performance, sleep_while_running};
use clap::Args;
use tessitura_theory::notation_to_freq;

#[derive(Args)]
pub struct NoteArgs {
    /// Pitch notation, e.g. "A4", "F#3", "Bb2"
    #[arg(value_name = "NOTATION")]
    notation: String,

    /// How long to hold the note, in ms
    #[arg(short, long, default_value = "1000")]
    duration: u64,

    #[command(flatten)]
    sound: SoundArgs,

    #[command(flatten)]
    stream: StreamArgs,
}

pub fn run(args: NoteArgs) -> anyhow::Result<()> {
    // Resolve before touching the audio device so bad input fails fast.
    let freq = notation_to_freq(&args.notation)?;
    println!(
        "Playing {} ({:.2} Hz) for {} ms",
        args.notation, freq, args.duration
    );

    let NoteArgs {
        notation,
        duration,
        sound,
        stream,
    } = args;
    let tail = sound.tail_ms();

    run_performance(&stream, move |handle, sample_rate, stop| {
        match sound.voice_for(&notation, sample_rate) {
            Ok(voice) => {
                handle.press(0, voice);
                sleep_while_running(stop, duration);
                handle.release_all();
                sleep_while_running(stop, tail);
            }
            Err(err) => tracing::error!(error = %err, "failed to build voice"),
        }
    })
}
