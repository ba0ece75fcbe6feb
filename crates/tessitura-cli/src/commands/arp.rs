//! Arpeggiated chord playback command.

use super::common::{SoundArgs, StreamArgs, run_performance, sleep_while_running};
use clap::Args;
use tessitura_synth::{ArpeggioPattern, Voice};
use tessitura_theory::Chord;

#[derive(Args)]
pub struct ArpArgs {
    /// Chord notation to arpeggiate, e.g. "Cmaj7"
    #[arg(value_name = "NOTATION")]
    notation: String,

    /// Root octave to build the chord in
    #[arg(short, long)]
    octave: Option<i32>,

    /// Step rate in ms per note
    #[arg(short, long, default_value = "150")]
    rate: u64,

    /// Walk the pattern straight through instead of ping-pong
    #[arg(long)]
    no_reverse: bool,

    /// Total play time in ms
    #[arg(short, long, default_value = "2400")]
    duration: u64,

    #[command(flatten)]
    sound: SoundArgs,

    #[command(flatten)]
    stream: StreamArgs,
}

pub fn run(args: ArpArgs) -> anyhow::Result<()> {
    let chord = Chord::new(&args.notation, args.octave)?;
    let pattern = ArpeggioPattern::from_notations(
        chord.notations(),
        args.rate as f32 / 1000.0,
        !args.no_reverse,
    )?;
    println!(
        "Arpeggiating {} ({}) over {} steps",
        args.notation,
        chord.notations().join(" "),
        pattern.step_count()
    );

    let ArpArgs {
        duration,
        sound,
        stream,
        ..
    } = args;
    let tail = sound.tail_ms();

    run_performance(&stream, move |handle, sample_rate, stop| {
        let mut voice = Voice::arpeggio(pattern, sound.waveform, sample_rate);
        sound.attach_envelope(&mut voice, sample_rate);

        handle.press(0, voice);
        sleep_while_running(stop, duration);
        handle.release_all();
        sleep_while_running(stop, tail);
    })
}
