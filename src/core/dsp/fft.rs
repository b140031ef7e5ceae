//! FFT processing: full complex DFT, frequency bins and one-sided power

use rustfft::{FftPlanner, num_complex::Complex};
use serde::{Deserialize, Serialize};

use super::spectral::Spectrum;
use crate::error::{check_sample_interval, check_sample_rate, DspError, DspResult};

/// FFT computation over whole signals
pub struct FftProcessor {
    planner: FftPlanner<f64>,
}

impl Default for FftProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FftProcessor {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Complex DFT of a real signal, same length as the input
    pub fn complex_spectrum(&mut self, samples: &[f64]) -> DspResult<Vec<Complex<f64>>> {
        if samples.is_empty() {
            return Err(DspError::EmptyInput);
        }
        let fft = self.planner.plan_fft_forward(samples.len());

        let mut buffer: Vec<Complex<f64>> = samples
            .iter()
            .map(|&s| Complex::new(s, 0.0))
            .collect();

        fft.process(&mut buffer);
        Ok(buffer)
    }

    /// Two-sided magnitude spectrum `|X_k|`
    pub fn magnitude_spectrum(&mut self, samples: &[f64]) -> DspResult<Vec<f64>> {
        Ok(magnitude(&self.complex_spectrum(samples)?))
    }
}

/// Element-wise absolute value of a complex spectrum
pub fn magnitude(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm()).collect()
}

/// DFT sample frequencies for `n` samples at interval `dt`.
///
/// Non-negative frequencies come first, followed by the mirrored negative
/// ones: `[0, 1, ..., ceil(n/2)-1, -floor(n/2), ..., -1] / (n*dt)`.
pub fn fftfreq(n: usize, dt: f64) -> DspResult<Vec<f64>> {
    check_sample_interval(dt)?;
    let spacing = 1.0 / (n as f64 * dt);
    let positive = n.div_ceil(2);
    Ok((0..n)
        .map(|k| {
            if k < positive {
                k as f64 * spacing
            } else {
                -((n - k) as f64) * spacing
            }
        })
        .collect())
}

/// Frequencies of a real-input DFT: `k*fs/n` for `k = 0..=n/2`
pub fn rfftfreq(n: usize, fs: f64) -> DspResult<Vec<f64>> {
    check_sample_rate(fs)?;
    Ok((0..=n / 2).map(|k| k as f64 * fs / n as f64).collect())
}

/// How the discarded negative-frequency half is accounted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerScaling {
    /// Plain `|X|^2` of the retained bins, as drawn in the book figure
    #[default]
    Raw,
    /// Bins other than DC (and the Nyquist bin for even lengths) are doubled
    Doubled,
}

/// One-sided power spectrum from a two-sided magnitude spectrum.
///
/// Keeps the first `ceil(n/2)` bins and squares them.
pub fn one_sided_power(
    magnitude: &[f64],
    freqs: &[f64],
    scaling: PowerScaling,
) -> DspResult<Spectrum> {
    if magnitude.len() != freqs.len() {
        return Err(DspError::LengthMismatch {
            left: magnitude.len(),
            right: freqs.len(),
        });
    }
    let n = magnitude.len();
    let keep = n.div_ceil(2);

    let values = magnitude[..keep]
        .iter()
        .enumerate()
        .map(|(k, &m)| {
            let power = m * m;
            let nyquist = n % 2 == 0 && k == n / 2;
            match scaling {
                PowerScaling::Doubled if k != 0 && !nyquist => 2.0 * power,
                _ => power,
            }
        })
        .collect();

    Ok(Spectrum::new(freqs[..keep].to_vec(), values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fftfreq_even() {
        let freqs = fftfreq(8, 0.1).unwrap();
        let expected = [0.0, 1.25, 2.5, 3.75, -5.0, -3.75, -2.5, -1.25];
        for (f, e) in freqs.iter().zip(expected.iter()) {
            assert!((f - e).abs() < 1e-12, "{} != {}", f, e);
        }
    }

    #[test]
    fn test_fftfreq_odd() {
        let freqs = fftfreq(5, 1.0).unwrap();
        let expected = [0.0, 0.2, 0.4, -0.4, -0.2];
        for (f, e) in freqs.iter().zip(expected.iter()) {
            assert!((f - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_fftfreq_rejects_bad_interval() {
        assert_eq!(fftfreq(8, 0.0), Err(DspError::InvalidSampleInterval(0.0)));
    }

    #[test]
    fn test_rfftfreq() {
        let freqs = rfftfreq(256, 100.0).unwrap();
        assert_eq!(freqs.len(), 129);
        assert_eq!(freqs[0], 0.0);
        assert!((freqs[128] - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_dft_of_sine_peaks_at_its_bin() {
        let n = 64;
        let samples: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 4.0 * i as f64 / n as f64).sin())
            .collect();
        let mut fft = FftProcessor::new();
        let mag = fft.magnitude_spectrum(&samples).unwrap();
        assert_eq!(mag.len(), n);
        assert!((mag[4] - n as f64 / 2.0).abs() < 1e-9);
        assert!((mag[n - 4] - n as f64 / 2.0).abs() < 1e-9);
        assert!(mag[5] < 1e-9);
    }

    #[test]
    fn test_dc_bin_is_sum() {
        let mut fft = FftProcessor::new();
        let spec = fft.complex_spectrum(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((spec[0].re - 10.0).abs() < 1e-12);
        assert!(spec[0].im.abs() < 1e-12);
    }

    #[test]
    fn test_one_sided_power_doubled() {
        let mag = [1.0, 2.0, 3.0, 4.0, 3.0, 2.0];
        let freqs = fftfreq(6, 1.0).unwrap();
        let raw = one_sided_power(&mag, &freqs, PowerScaling::Raw).unwrap();
        let doubled = one_sided_power(&mag, &freqs, PowerScaling::Doubled).unwrap();
        assert_eq!(raw.values, vec![1.0, 4.0, 9.0]);
        assert_eq!(doubled.values, vec![1.0, 8.0, 18.0]);
    }

    #[test]
    fn test_one_sided_power_length_mismatch() {
        let err = one_sided_power(&[1.0, 2.0], &[0.0], PowerScaling::Raw).unwrap_err();
        assert_eq!(err, DspError::LengthMismatch { left: 2, right: 1 });
    }
}
