//! Voices: single playable units with a three-stage lifecycle.
//!
//! A [`Voice`] couples an oscillator with a pitch source — one fixed
//! frequency, or an [`ArpeggioPattern`] cycling through a chord — and an
//! optional amplitude envelope. Lifecycle: sounding → releasing → silent.
//! Without an envelope, a release request silences the voice synchronously;
//! with one, the voice keeps producing its decay tail until the envelope
//! reports it has cycled back to idle.

use crate::envelope::{AdsrEnvelope, EnvelopeStage};
use crate::osc::{Oscillator, Waveform};
use tessitura_theory::notation_to_freq;

/// Voice lifecycle stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VoiceStage {
    /// Producing signal; the key is held.
    #[default]
    Sounding,
    /// Release requested; may still produce a decay tail.
    Releasing,
    /// Terminal: produces nothing and can be purged.
    Silent,
}

/// A cyclic frequency sequence for arpeggiated voices.
///
/// The active frequency advances every `step_secs` seconds of samples,
/// wrapping modulo the sequence length. With auto-reverse, the inner notes
/// are re-appended in reverse so an n-note chord plays a ping-pong pattern
/// of `2n - 2` steps.
///
/// # Example
///
/// ```rust
/// use tessitura_synth::ArpeggioPattern;
/// use tessitura_theory::Chord;
///
/// let chord = Chord::new("Cmaj", Some(3)).unwrap();
/// let pattern = ArpeggioPattern::from_notations(chord.notations(), 0.1, true).unwrap();
/// assert_eq!(pattern.step_count(), 4); // C E G E
/// ```
#[derive(Debug, Clone)]
pub struct ArpeggioPattern {
    frequencies: Vec<f32>,
    step_secs: f32,
    step: u32,
    index: usize,
}

impl ArpeggioPattern {
    /// Build a pattern from raw frequencies.
    pub fn new(mut frequencies: Vec<f32>, step_secs: f32, auto_reverse: bool) -> Self {
        if auto_reverse && frequencies.len() > 2 {
            for i in (1..frequencies.len() - 1).rev() {
                let f = frequencies[i];
                frequencies.push(f);
            }
        }
        Self {
            frequencies,
            step_secs,
            step: 0,
            index: 0,
        }
    }

    /// Build a pattern by resolving pitch notations (a chord's note list).
    pub fn from_notations(
        notations: &[String],
        step_secs: f32,
        auto_reverse: bool,
    ) -> tessitura_theory::Result<Self> {
        let frequencies = notations
            .iter()
            .map(|n| notation_to_freq(n))
            .collect::<tessitura_theory::Result<Vec<f32>>>()?;
        Ok(Self::new(frequencies, step_secs, auto_reverse))
    }

    /// Number of steps before the pattern repeats.
    pub fn step_count(&self) -> usize {
        self.frequencies.len()
    }

    /// The frequency the pattern starts on.
    pub fn first_frequency(&self) -> f32 {
        self.frequencies.first().copied().unwrap_or(0.0)
    }

    /// Count one sample; returns the next frequency when the step interval
    /// rolls over.
    #[inline]
    fn advance(&mut self, sample_rate: f32) -> Option<f32> {
        self.step += 1;
        if self.step as f32 > sample_rate * self.step_secs {
            self.step = 0;
            self.index = (self.index + 1) % self.frequencies.len();
            Some(self.frequencies[self.index])
        } else {
            None
        }
    }
}

/// Pitch source for a voice: one fixed note or an arpeggio pattern.
#[derive(Debug, Clone)]
enum VoiceSource {
    Note,
    Arpeggio(ArpeggioPattern),
}

/// One independently-sounding voice.
///
/// # Example
///
/// ```rust
/// use tessitura_synth::{AdsrEnvelope, Voice, Waveform};
///
/// let mut voice = Voice::from_notation("A4", Waveform::Saw, 48000.0).unwrap();
/// voice.set_envelope(AdsrEnvelope::new(48000.0));
///
/// let sample = voice.produce_sample();
/// voice.request_release();
/// ```
#[derive(Debug, Clone)]
pub struct Voice {
    osc: Oscillator,
    source: VoiceSource,
    envelope: Option<AdsrEnvelope>,
    stage: VoiceStage,
}

impl Voice {
    /// Create a fixed-pitch voice.
    pub fn note(frequency: f32, waveform: Waveform, sample_rate: f32) -> Self {
        let mut osc = Oscillator::new(sample_rate);
        osc.set_frequency(frequency);
        osc.set_waveform(waveform);
        Self {
            osc,
            source: VoiceSource::Note,
            envelope: None,
            stage: VoiceStage::Sounding,
        }
    }

    /// Create a fixed-pitch voice from a pitch notation.
    pub fn from_notation(
        notation: &str,
        waveform: Waveform,
        sample_rate: f32,
    ) -> tessitura_theory::Result<Self> {
        Ok(Self::note(notation_to_freq(notation)?, waveform, sample_rate))
    }

    /// Create an arpeggiated voice starting on the pattern's first note.
    pub fn arpeggio(pattern: ArpeggioPattern, waveform: Waveform, sample_rate: f32) -> Self {
        let mut voice = Self::note(pattern.first_frequency(), waveform, sample_rate);
        voice.source = VoiceSource::Arpeggio(pattern);
        voice
    }

    /// Attach an amplitude envelope and gate it open.
    pub fn set_envelope(&mut self, mut envelope: AdsrEnvelope) {
        envelope.trigger_gate(true);
        self.envelope = Some(envelope);
    }

    /// The attached envelope, if any.
    pub fn envelope(&self) -> Option<&AdsrEnvelope> {
        self.envelope.as_ref()
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> VoiceStage {
        self.stage
    }

    /// Whether the voice has reached the terminal silent stage.
    pub fn is_silent(&self) -> bool {
        self.stage == VoiceStage::Silent
    }

    /// Current oscillator frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.osc.frequency()
    }

    /// Selected waveform.
    pub fn waveform(&self) -> Waveform {
        self.osc.waveform()
    }

    /// Set the frequency-modulation input on the underlying oscillator.
    pub fn set_fm(&mut self, fm: f32) {
        self.osc.set_fm(fm);
    }

    /// Return the voice to the sounding stage, re-gating the envelope.
    /// Used when a key is pressed again after its voice began releasing.
    pub fn reset(&mut self) {
        self.stage = VoiceStage::Sounding;
        if let Some(env) = &mut self.envelope {
            env.trigger_gate(true);
        }
    }

    /// Request the release phase. Idempotent: calls after the first have no
    /// effect. Without an envelope the voice falls silent synchronously;
    /// with one it stays releasing until the envelope reverts to idle.
    pub fn request_release(&mut self) {
        if self.stage != VoiceStage::Sounding {
            return;
        }
        match &mut self.envelope {
            Some(env) => {
                env.trigger_gate(false);
                self.stage = VoiceStage::Releasing;
            }
            None => self.stage = VoiceStage::Silent,
        }
    }

    /// Produce the next sample.
    ///
    /// Advances the oscillator (retuning from the arpeggio pattern when its
    /// step interval rolls over) and applies the envelope level. A silent
    /// voice returns 0.0 without advancing phase.
    #[inline]
    pub fn produce_sample(&mut self) -> f32 {
        if self.stage == VoiceStage::Silent {
            return 0.0;
        }

        if let VoiceSource::Arpeggio(pattern) = &mut self.source {
            if let Some(freq) = pattern.advance(self.osc.sample_rate()) {
                self.osc.set_frequency(freq);
            }
        }

        let sample = self.osc.advance();

        let Some(env) = &mut self.envelope else {
            return sample;
        };
        let level = env.advance();

        // A timed sustain can start the release without a key-up.
        if self.stage == VoiceStage::Sounding && env.stage() == EnvelopeStage::Release {
            self.stage = VoiceStage::Releasing;
        }

        if self.stage == VoiceStage::Releasing && env.is_idle() {
            self.stage = VoiceStage::Silent;
            return 0.0;
        }

        sample * level
    }
}
