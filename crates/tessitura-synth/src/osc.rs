//! Waveform oscillator.
//!
//! The oscillator advances a normalized phase in [0, 1) by
//! `frequency * (1 + fm) / sample_rate` each sample and evaluates the
//! selected [`Waveform`] at the new position. Shapes are naive (not
//! band-limited); the selection happens once at voice creation, not
//! per sample.

use core::f32::consts::TAU;
use core::str::FromStr;
use thiserror::Error;

/// Oscillator waveform shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Waveform {
    /// Sine — pure fundamental tone.
    #[default]
    Sine,
    /// Triangle — odd harmonics, softer than saw.
    Triangle,
    /// Sawtooth — all harmonics, bright timbre.
    Saw,
    /// Square (50% duty cycle) — odd harmonics, hollow timbre.
    Square,
    /// Pulse with variable duty cycle (0.0 to 1.0).
    Pulse(f32),
    /// White noise.
    Noise,
}

/// A waveform name that matched no known shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown waveform: '{0}'")]
pub struct UnknownWaveform(pub String);

impl FromStr for Waveform {
    type Err = UnknownWaveform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sine" => Ok(Waveform::Sine),
            "triangle" => Ok(Waveform::Triangle),
            "saw" | "sawtooth" => Ok(Waveform::Saw),
            "square" => Ok(Waveform::Square),
            "pulse" => Ok(Waveform::Pulse(0.5)),
            "noise" => Ok(Waveform::Noise),
            other => Err(UnknownWaveform(other.to_string())),
        }
    }
}

/// Phase-accumulating oscillator.
///
/// # Example
///
/// ```rust
/// use tessitura_synth::{Oscillator, Waveform};
///
/// let mut osc = Oscillator::new(48000.0);
/// osc.set_frequency(220.0);
/// osc.set_waveform(Waveform::Square);
///
/// let sample = osc.advance();
/// assert!((-1.0..=1.0).contains(&sample));
/// ```
#[derive(Debug, Clone)]
pub struct Oscillator {
    /// Current phase position in [0.0, 1.0).
    phase: f32,
    /// Sample rate in Hz.
    sample_rate: f32,
    /// Frequency in Hz.
    frequency: f32,
    /// Frequency-modulation input, as a fraction of the base frequency.
    fm: f32,
    /// Selected waveform.
    waveform: Waveform,
    /// Xorshift state for the noise shape.
    noise_state: u32,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Oscillator {
    /// Create an oscillator at the given sample rate (440 Hz sine).
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            sample_rate,
            frequency: 440.0,
            fm: 0.0,
            waveform: Waveform::Sine,
            noise_state: 0x12345678,
        }
    }

    /// Set frequency in Hz.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.frequency = freq_hz.max(0.0);
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Set the waveform shape.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Current waveform shape.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Set the frequency-modulation input. `0.0` is no modulation; `0.5`
    /// raises the effective frequency by half.
    pub fn set_fm(&mut self, fm: f32) {
        self.fm = fm;
    }

    /// Set the sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Current sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Current phase in [0.0, 1.0).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance one sample and render the selected shape at the new phase.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let freq = self.frequency * (1.0 + self.fm);
        self.phase = (self.phase + freq / self.sample_rate).rem_euclid(1.0);
        self.render(self.phase)
    }

    /// Evaluate the selected waveform at `phase`.
    #[inline]
    fn render(&mut self, phase: f32) -> f32 {
        match self.waveform {
            Waveform::Sine => libm::sinf(phase * TAU),
            Waveform::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
            Waveform::Saw => 2.0 * phase - 1.0,
            Waveform::Square => {
                if phase < 0.5 { 1.0 } else { -1.0 }
            }
            Waveform::Pulse(duty) => {
                if phase < duty.clamp(0.01, 0.99) {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Noise => self.next_noise(),
        }
    }

    #[inline]
    fn next_noise(&mut self) -> f32 {
        // Xorshift32
        let mut x = self.noise_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.noise_state = x;
        (x as i32 as f32) / (i32::MAX as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_frequency_by_zero_crossings() {
        let mut osc = Oscillator::new(48000.0);
        osc.set_frequency(440.0);

        let mut crossings: i32 = 0;
        let mut prev = 0.0;
        for _ in 0..48000 {
            let sample = osc.advance();
            if prev <= 0.0 && sample > 0.0 {
                crossings += 1;
            }
            prev = sample;
        }

        assert!(
            (crossings - 440).abs() <= 2,
            "expected ~440 crossings, got {crossings}"
        );
    }

    #[test]
    fn test_all_shapes_stay_in_range() {
        let shapes = [
            Waveform::Sine,
            Waveform::Triangle,
            Waveform::Saw,
            Waveform::Square,
            Waveform::Pulse(0.25),
            Waveform::Noise,
        ];
        for shape in shapes {
            let mut osc = Oscillator::new(48000.0);
            osc.set_frequency(440.0);
            osc.set_waveform(shape);
            for _ in 0..5000 {
                let sample = osc.advance();
                assert!(
                    (-1.0..=1.0).contains(&sample),
                    "{shape:?} out of range: {sample}"
                );
            }
        }
    }

    #[test]
    fn test_pulse_duty_cycle() {
        let mut osc = Oscillator::new(48000.0);
        osc.set_frequency(100.0);
        osc.set_waveform(Waveform::Pulse(0.25));

        let mut positive = 0usize;
        for _ in 0..48000 {
            if osc.advance() > 0.0 {
                positive += 1;
            }
        }

        let ratio = positive as f32 / 48000.0;
        assert!(
            (ratio - 0.25).abs() < 0.05,
            "expected ~25% positive, got {:.1}%",
            ratio * 100.0
        );
    }

    #[test]
    fn test_fm_raises_effective_frequency() {
        let mut plain = Oscillator::new(48000.0);
        plain.set_frequency(440.0);
        let mut modulated = Oscillator::new(48000.0);
        modulated.set_frequency(440.0);
        modulated.set_fm(1.0); // doubles the rate

        plain.advance();
        modulated.advance();
        assert!(
            (modulated.phase() - 2.0 * plain.phase()).abs() < 1e-6,
            "fm=1.0 should double the phase step"
        );
    }

    #[test]
    fn test_reset_returns_phase_to_zero() {
        let mut osc = Oscillator::new(48000.0);
        osc.set_frequency(440.0);
        for _ in 0..100 {
            osc.advance();
        }
        assert!(osc.phase() > 0.0);
        osc.reset();
        assert_eq!(osc.phase(), 0.0);
    }

    #[test]
    fn test_waveform_from_str() {
        assert_eq!("sine".parse::<Waveform>().unwrap(), Waveform::Sine);
        assert_eq!("saw".parse::<Waveform>().unwrap(), Waveform::Saw);
        assert_eq!("sawtooth".parse::<Waveform>().unwrap(), Waveform::Saw);
        assert_eq!("noise".parse::<Waveform>().unwrap(), Waveform::Noise);
        assert!("warble".parse::<Waveform>().is_err());
    }
}
