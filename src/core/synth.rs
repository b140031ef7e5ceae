// src/core/synth.rs
//
// Synthetic test signals: rectangular pulses and noisy sine superpositions.
// The noise generator is seeded so every run yields identical samples.

use std::f64::consts::PI;
use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::config::SineConfig;
use crate::error::{check_sample_rate, DspError, DspResult};

/// Sampled signal with and without additive noise
#[derive(Debug, Clone, PartialEq)]
pub struct SynthSignal {
    /// Sample times [s]
    pub t: Vec<f64>,
    /// Sample interval [s]
    pub dt: f64,
    pub noisy: Vec<f64>,
    /// Offset plus sines, no noise
    pub ideal: Vec<f64>,
}

impl SynthSignal {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn sample_rate(&self) -> f64 {
        1.0 / self.dt
    }
}

/// Zero signal of `length` samples with ones inside each range.
///
/// Ranges reaching past the end are cut at `length`.
pub fn pulse_train(length: usize, pulses: &[Range<usize>]) -> Vec<f64> {
    let mut signal = vec![0.0; length];
    for pulse in pulses {
        let end = pulse.end.min(length);
        if pulse.start < end {
            signal[pulse.start..end].fill(1.0);
        }
    }
    signal
}

/// `offset + sum(a_i * sin(2*pi*f_i*t))`, plus seeded Gaussian noise
pub fn sum_of_sines(config: &SineConfig) -> DspResult<SynthSignal> {
    check_sample_rate(config.rate)?;
    if config.freqs.len() != config.amps.len() {
        return Err(DspError::LengthMismatch {
            left: config.freqs.len(),
            right: config.amps.len(),
        });
    }

    let dt = 1.0 / config.rate;
    let n = (config.duration * config.rate).ceil().max(0.0) as usize;
    let t: Vec<f64> = (0..n).map(|i| i as f64 * dt).collect();

    let ideal: Vec<f64> = t
        .iter()
        .map(|&ti| {
            let sines: f64 = config
                .amps
                .iter()
                .zip(config.freqs.iter())
                .map(|(&amp, &freq)| amp * (2.0 * PI * freq * ti).sin())
                .sum();
            sines + config.offset
        })
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let noisy = ideal
        .iter()
        .map(|&x| {
            let z: f64 = rng.sample(StandardNormal);
            x + config.noise_amp * z
        })
        .collect();

    Ok(SynthSignal { t, dt, noisy, ideal })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_train() {
        let signal = pulse_train(20, &[7..10, 14..17]);
        assert_eq!(signal.len(), 20);
        assert_eq!(signal.iter().sum::<f64>(), 6.0);
        assert_eq!(signal[6], 0.0);
        assert_eq!(signal[7], 1.0);
        assert_eq!(signal[9], 1.0);
        assert_eq!(signal[10], 0.0);
        assert_eq!(signal[16], 1.0);
        assert_eq!(signal[17], 0.0);
    }

    #[test]
    fn test_pulse_train_clips_ranges() {
        let signal = pulse_train(5, &[3..9, 7..8]);
        assert_eq!(signal, vec![0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_sum_of_sines_length_and_grid() {
        let signal = sum_of_sines(&SineConfig::default()).unwrap();
        assert_eq!(signal.len(), 12000);
        assert_eq!(signal.t[0], 0.0);
        assert!((signal.dt - 0.005).abs() < 1e-15);
        assert!((signal.sample_rate() - 200.0).abs() < 1e-9);
        // sin terms vanish at t = 0
        assert!((signal.ideal[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_noise_is_seeded() {
        let config = SineConfig::default();
        let a = sum_of_sines(&config).unwrap();
        let b = sum_of_sines(&config).unwrap();
        assert_eq!(a, b);

        let other = sum_of_sines(&SineConfig { seed: 1, ..config }).unwrap();
        assert_ne!(a.noisy, other.noisy);
        assert_eq!(a.ideal, other.ideal);
    }

    #[test]
    fn test_mismatched_amplitudes() {
        let config = SineConfig {
            amps: vec![1.0],
            ..SineConfig::default()
        };
        assert_eq!(
            sum_of_sines(&config).unwrap_err(),
            DspError::LengthMismatch { left: 3, right: 1 }
        );
    }
}
