//! Score-driven performance command.
//!
//! Reads a score (file or stdin), maps its keys through the QWERTY layout,
//! and drives press/release events against the engine — the scripted
//! equivalent of playing the keyboard.

use super::common::{SoundArgs, StreamArgs, run_performance, sleep_while_running};
use crate::keymap;
use crate::score::{self, ScoreEvent};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

#[derive(Args)]
pub struct PerformArgs {
    /// Score file; "-" or absent reads stdin
    #[arg(value_name = "SCORE")]
    score: Option<PathBuf>,

    #[command(flatten)]
    sound: SoundArgs,

    #[command(flatten)]
    stream: StreamArgs,
}

pub fn run(args: PerformArgs) -> anyhow::Result<()> {
    let text = match &args.score {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read score '{}'", path.display()))?,
        _ => std::io::read_to_string(std::io::stdin()).context("failed to read score from stdin")?,
    };

    let events = score::parse(&text)?;
    println!("Performing {} events", events.len());

    let PerformArgs { sound, stream, .. } = args;
    let tail = sound.tail_ms();

    run_performance(&stream, move |handle, sample_rate, stop| {
        for event in events {
            if !stop.load(Ordering::SeqCst) {
                break;
            }
            match event {
                ScoreEvent::Press(key) => match keymap::notation_for(key) {
                    Some(notation) => match sound.voice_for(notation, sample_rate) {
                        Ok(voice) => handle.press(key.to_ascii_uppercase() as u32, voice),
                        Err(err) => tracing::error!(error = %err, "failed to build voice"),
                    },
                    None => tracing::warn!(key = %key, "no note mapped to key"),
                },
                ScoreEvent::Release(key) => handle.release(key.to_ascii_uppercase() as u32),
                ScoreEvent::Wait(ms) => sleep_while_running(stop, ms),
                ScoreEvent::ReleaseAll => handle.release_all(),
            }
        }
        handle.release_all();
        sleep_while_running(stop, tail);
    })
}
