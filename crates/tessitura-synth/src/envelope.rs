//! ADSR envelope generator.
//!
//! Linear attack/decay/release ramps from millisecond parameters. The
//! envelope is gated: opening the gate starts the attack, closing it starts
//! the release from the current level, and reversion to [`EnvelopeStage::Idle`]
//! after a release signals that the release cycle has fully completed —
//! that reversion is what lets a releasing voice fall silent.
//!
//! An optional timed sustain auto-enters the release stage once the hold
//! time expires, so a held key can still decay on its own.

/// Envelope stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeStage {
    /// Inactive — output is zero.
    #[default]
    Idle,
    /// Ramping up toward peak level.
    Attack,
    /// Falling from peak toward the sustain level.
    Decay,
    /// Holding at the sustain level while the gate is open.
    Sustain,
    /// Decaying to zero after the gate closed (or the timed sustain ran out).
    Release,
}

/// Gated ADSR amplitude envelope.
///
/// # Example
///
/// ```rust
/// use tessitura_synth::{AdsrEnvelope, EnvelopeStage};
///
/// let mut env = AdsrEnvelope::new(48000.0);
/// env.set_attack_ms(5.0);
/// env.set_release_ms(50.0);
///
/// env.trigger_gate(true);
/// let mut buffer = [0.0f32; 256];
/// env.append_samples(&mut buffer);
///
/// env.trigger_gate(false);
/// assert_eq!(env.stage(), EnvelopeStage::Release);
/// ```
#[derive(Debug, Clone)]
pub struct AdsrEnvelope {
    stage: EnvelopeStage,
    level: f32,
    sample_rate: f32,

    attack_ms: f32,
    decay_ms: f32,
    sustain_level: f32,
    release_ms: f32,
    /// Timed sustain: auto-release after this many ms in sustain.
    /// `None` holds for as long as the gate stays open.
    sustain_ms: Option<f32>,

    /// Samples spent in the sustain stage, for the timed variant.
    held_samples: u32,
    /// Per-sample release slope, fixed when the release stage is entered.
    release_step: f32,
}

impl Default for AdsrEnvelope {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl AdsrEnvelope {
    /// Create an envelope with default settings: attack 10 ms, decay
    /// 100 ms, sustain 0.7, release 200 ms, untimed sustain.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            stage: EnvelopeStage::Idle,
            level: 0.0,
            sample_rate,
            attack_ms: 10.0,
            decay_ms: 100.0,
            sustain_level: 0.7,
            release_ms: 200.0,
            sustain_ms: None,
            held_samples: 0,
            release_step: 0.0,
        }
    }

    /// Set attack time in milliseconds.
    pub fn set_attack_ms(&mut self, ms: f32) {
        self.attack_ms = ms.max(0.1);
    }

    /// Attack time in milliseconds.
    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    /// Set decay time in milliseconds.
    pub fn set_decay_ms(&mut self, ms: f32) {
        self.decay_ms = ms.max(0.1);
    }

    /// Decay time in milliseconds.
    pub fn decay_ms(&self) -> f32 {
        self.decay_ms
    }

    /// Set sustain level (0.0 to 1.0).
    pub fn set_sustain_level(&mut self, level: f32) {
        self.sustain_level = level.clamp(0.0, 1.0);
    }

    /// Sustain level.
    pub fn sustain_level(&self) -> f32 {
        self.sustain_level
    }

    /// Set release time in milliseconds.
    pub fn set_release_ms(&mut self, ms: f32) {
        self.release_ms = ms.max(0.1);
    }

    /// Release time in milliseconds.
    pub fn release_ms(&self) -> f32 {
        self.release_ms
    }

    /// Set the timed sustain: `Some(ms)` auto-releases after holding that
    /// long, `None` holds until the gate closes.
    pub fn set_sustain_ms(&mut self, ms: Option<f32>) {
        self.sustain_ms = ms;
    }

    /// Set the sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Open (`true`) or close (`false`) the gate.
    ///
    /// Opening starts the attack from the current level, so fast
    /// retriggering stays click-free. Closing moves any non-idle stage into
    /// release.
    pub fn trigger_gate(&mut self, open: bool) {
        if open {
            self.stage = EnvelopeStage::Attack;
            self.held_samples = 0;
        } else if self.stage != EnvelopeStage::Idle {
            self.enter_release();
        }
    }

    /// Force the envelope back to idle.
    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Idle;
        self.level = 0.0;
        self.held_samples = 0;
    }

    /// Current stage.
    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Current level without advancing.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Whether the envelope has reverted to idle.
    pub fn is_idle(&self) -> bool {
        self.stage == EnvelopeStage::Idle
    }

    /// Advance one sample and return the current level.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }

            EnvelopeStage::Attack => {
                self.level += 1.0 / self.samples_for(self.attack_ms);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }

            EnvelopeStage::Decay => {
                self.level -= (1.0 - self.sustain_level) / self.samples_for(self.decay_ms);
                if self.level <= self.sustain_level {
                    self.level = self.sustain_level;
                    self.stage = EnvelopeStage::Sustain;
                    self.held_samples = 0;
                }
            }

            EnvelopeStage::Sustain => {
                self.level = self.sustain_level;
                if let Some(ms) = self.sustain_ms {
                    self.held_samples += 1;
                    if self.held_samples as f32 >= self.samples_for(ms) {
                        self.enter_release();
                    }
                }
            }

            EnvelopeStage::Release => {
                self.level -= self.release_step;
                if self.level <= 0.0 {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        self.level
    }

    /// Fill `buffer` with successive envelope levels.
    pub fn append_samples(&mut self, buffer: &mut [f32]) {
        for slot in buffer.iter_mut() {
            *slot = self.advance();
        }
    }

    /// Enter release with a slope that reaches zero from the current level
    /// in `release_ms`.
    fn enter_release(&mut self) {
        self.release_step = self.level / self.samples_for(self.release_ms);
        self.stage = EnvelopeStage::Release;
    }

    #[inline]
    fn samples_for(&self, ms: f32) -> f32 {
        (ms * self.sample_rate / 1000.0).max(1.0)
    }
}
