//! Shared argument blocks and the playback scaffold.
//!
//! Every playing command follows the same shape: open the output stream,
//! hand the audio callback a [`PolyEngine`], and feed it key events from a
//! driver thread. Ctrl+C releases everything and stops the stream.

use clap::Args;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tessitura_io::{KeyHandle, OutputStream, PolyEngine, StreamConfig};
use tessitura_synth::{AdsrEnvelope, Voice, Waveform};

/// Voice shaping options shared by the playing commands.
#[derive(Args, Clone)]
pub struct SoundArgs {
    /// Waveform shape (sine, triangle, saw, square, pulse, noise)
    #[arg(short, long, default_value = "sine")]
    pub waveform: Waveform,

    /// Attach an ADSR amplitude envelope
    #[arg(short, long)]
    pub envelope: bool,

    /// Envelope attack time in ms
    #[arg(long, default_value = "10")]
    pub attack: f32,

    /// Envelope decay time in ms
    #[arg(long, default_value = "100")]
    pub decay: f32,

    /// Envelope sustain level (0.0 to 1.0)
    #[arg(long, default_value = "0.7")]
    pub sustain_level: f32,

    /// Auto-release after holding this many ms (0 holds until release)
    #[arg(long, default_value = "0")]
    pub hold: f32,

    /// Envelope release time in ms
    #[arg(long, default_value = "200")]
    pub release: f32,
}

impl SoundArgs {
    /// Build a configured voice for a pitch notation.
    pub fn voice_for(&self, notation: &str, sample_rate: f32) -> tessitura_theory::Result<Voice> {
        let mut voice = Voice::from_notation(notation, self.waveform, sample_rate)?;
        self.attach_envelope(&mut voice, sample_rate);
        Ok(voice)
    }

    /// Attach the configured envelope, when enabled.
    pub fn attach_envelope(&self, voice: &mut Voice, sample_rate: f32) {
        if !self.envelope {
            return;
        }
        let mut env = AdsrEnvelope::new(sample_rate);
        env.set_attack_ms(self.attack);
        env.set_decay_ms(self.decay);
        env.set_sustain_level(self.sustain_level);
        env.set_release_ms(self.release);
        if self.hold > 0.0 {
            env.set_sustain_ms(Some(self.hold));
        }
        voice.set_envelope(env);
    }

    /// Milliseconds to keep rendering after the final release so envelope
    /// tails can finish.
    pub fn tail_ms(&self) -> u64 {
        if self.envelope {
            self.release as u64 + 150
        } else {
            50
        }
    }
}

/// Output stream options shared by the playing commands.
#[derive(Args, Clone)]
pub struct StreamArgs {
    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    pub sample_rate: u32,

    /// Buffer size in frames
    #[arg(long, default_value = "256")]
    pub buffer_size: u32,

    /// Output device (exact or partial name)
    #[arg(long)]
    pub output: Option<String>,
}

impl StreamArgs {
    fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            sample_rate: self.sample_rate,
            buffer_size: self.buffer_size,
            output_device: self.output.clone(),
        }
    }
}

/// Open the output stream and run `driver` on its own thread while the
/// audio callback renders. Returns when the driver finishes or Ctrl+C
/// stops playback.
pub fn run_performance<F>(stream_args: &StreamArgs, driver: F) -> anyhow::Result<()>
where
    F: FnOnce(&KeyHandle, f32, &Arc<AtomicBool>) + Send + 'static,
{
    let mut stream = OutputStream::new(stream_args.stream_config())?;
    let sample_rate = stream.sample_rate() as f32;
    let channels = stream.channels() as usize;
    let stop = stream.stop_flag();

    let (handle, mut engine) = PolyEngine::new(sample_rate);

    let ctrlc_handle = handle.clone();
    let ctrlc_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        ctrlc_handle.release_all();
        ctrlc_stop.store(false, Ordering::SeqCst);
    })?;

    let driver_stop = Arc::clone(&stop);
    let driver_thread = std::thread::spawn(move || {
        driver(&handle, sample_rate, &driver_stop);
        driver_stop.store(false, Ordering::SeqCst);
    });

    stream.run(move |buffer| engine.render(buffer, channels))?;
    let _ = driver_thread.join();
    Ok(())
}

/// Sleep for `ms`, returning early if the stop flag clears.
pub fn sleep_while_running(stop: &Arc<AtomicBool>, ms: u64) {
    let mut remaining = ms;
    while remaining > 0 && stop.load(Ordering::SeqCst) {
        let chunk = remaining.min(20);
        std::thread::sleep(Duration::from_millis(chunk));
        remaining -= chunk;
    }
}
