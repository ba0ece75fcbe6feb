//! Criterion benchmarks for tessitura-synth components
//!
//! Run with: cargo bench -p tessitura-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tessitura_synth::{AdsrEnvelope, Oscillator, Voice, VoiceController, Waveform};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 256, 1024];

// ============================================================================
// Oscillator benchmarks
// ============================================================================

fn bench_oscillator_waveforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Oscillator");

    let waveforms = [
        ("Sine", Waveform::Sine),
        ("Triangle", Waveform::Triangle),
        ("Saw", Waveform::Saw),
        ("Square", Waveform::Square),
        ("Pulse25", Waveform::Pulse(0.25)),
        ("Noise", Waveform::Noise),
    ];

    for (name, waveform) in &waveforms {
        for &block_size in BLOCK_SIZES {
            let mut osc = Oscillator::new(SAMPLE_RATE);
            osc.set_frequency(440.0);
            osc.set_waveform(*waveform);

            group.bench_with_input(
                BenchmarkId::new(*name, block_size),
                &block_size,
                |b, &size| {
                    b.iter(|| {
                        let mut sum = 0.0f32;
                        for _ in 0..size {
                            sum += osc.advance();
                        }
                        black_box(sum)
                    })
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Voice benchmarks
// ============================================================================

fn bench_enveloped_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("Voice");

    for &block_size in BLOCK_SIZES {
        let mut voice = Voice::note(440.0, Waveform::Saw, SAMPLE_RATE);
        voice.set_envelope(AdsrEnvelope::new(SAMPLE_RATE));

        group.bench_with_input(
            BenchmarkId::new("enveloped_saw", block_size),
            &block_size,
            |b, &size| {
                b.iter(|| {
                    let mut sum = 0.0f32;
                    for _ in 0..size {
                        sum += voice.produce_sample();
                    }
                    black_box(sum)
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// Controller benchmarks
// ============================================================================

fn bench_polyphonic_pull(c: &mut Criterion) {
    let mut group = c.benchmark_group("Controller");

    for &voices in &[4usize, 8, 16] {
        let mut ctrl: VoiceController<u32> = VoiceController::new();
        for i in 0..voices {
            let mut voice = Voice::note(110.0 * (i as f32 + 1.0), Waveform::Saw, SAMPLE_RATE);
            voice.set_envelope(AdsrEnvelope::new(SAMPLE_RATE));
            ctrl.press(i as u32, voice);
        }

        group.bench_with_input(
            BenchmarkId::new("pull_and_mix_256", voices),
            &voices,
            |b, _| {
                b.iter(|| {
                    let mut block = [0.0f32; 256];
                    for voice in ctrl.pull() {
                        for slot in block.iter_mut() {
                            *slot += voice.produce_sample() * 0.5;
                        }
                    }
                    black_box(block[0])
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_oscillator_waveforms,
    bench_enveloped_voice,
    bench_polyphonic_pull
);
criterion_main!(benches);
