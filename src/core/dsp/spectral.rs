//! Power spectral density estimators: periodogram and Welch's method
//!
//! Both estimators remove the mean of each segment, apply a taper and scale
//! to a one-sided density (units²/Hz). Real-input transforms go through
//! `realfft`, which returns only the non-negative half of the spectrum.

use log::{debug, warn};
use realfft::RealFftPlanner;
use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

use super::fft::rfftfreq;
use super::stats::mean;
use super::windows::{create_window, window_power, WindowType};
use crate::error::{check_sample_rate, DspError, DspResult};

/// Frequency axis paired with one value per bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    pub freqs: Vec<f64>,
    pub values: Vec<f64>,
}

impl Spectrum {
    pub fn new(freqs: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(freqs.len(), values.len());
        Self { freqs, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Spacing between adjacent bins (0 for fewer than two bins)
    pub fn resolution(&self) -> f64 {
        match self.freqs.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// Frequency and value of the largest bin, ignoring DC
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.freqs
            .iter()
            .zip(self.values.iter())
            .skip(1)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(&f, &v)| (f, v))
    }
}

/// Parameters for Welch's averaged periodogram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WelchParams {
    /// Sample rate used to label the frequency axis [Hz]
    pub fs: f64,
    /// Samples per segment
    pub nperseg: usize,
    /// Overlap between segments, `nperseg / 2` when unset
    pub noverlap: Option<usize>,
    pub window: WindowType,
}

impl Default for WelchParams {
    fn default() -> Self {
        Self {
            fs: 1.0,
            nperseg: 256,
            noverlap: None,
            window: WindowType::Hann,
        }
    }
}

impl WelchParams {
    pub fn new(fs: f64, nperseg: usize) -> Self {
        Self {
            fs,
            nperseg,
            ..Default::default()
        }
    }
}

/// Spectral estimator holding a reusable FFT planner
pub struct SpectralEstimator {
    planner: RealFftPlanner<f64>,
}

impl Default for SpectralEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralEstimator {
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::new(),
        }
    }

    /// Single-segment PSD estimate over the whole series
    pub fn periodogram(
        &mut self,
        samples: &[f64],
        fs: f64,
        window: WindowType,
    ) -> DspResult<Spectrum> {
        if samples.is_empty() {
            return Err(DspError::EmptyInput);
        }
        check_sample_rate(fs)?;

        let n = samples.len();
        debug!("periodogram: {} samples, {} window, fs {} Hz", n, window.name(), fs);
        let taper = create_window(n, window);
        let scale = 1.0 / (fs * window_power(&taper));

        let values = self.segment_density(samples, &taper, scale)?;
        Ok(Spectrum::new(rfftfreq(n, fs)?, values))
    }

    /// Welch estimate: mean of the densities of overlapping tapered segments
    pub fn welch(&mut self, samples: &[f64], params: &WelchParams) -> DspResult<Spectrum> {
        if samples.is_empty() {
            return Err(DspError::EmptyInput);
        }
        check_sample_rate(params.fs)?;
        if params.nperseg == 0 {
            return Err(DspError::ZeroSegmentLength);
        }

        let n = samples.len();
        let nperseg = if params.nperseg > n {
            warn!(
                "nperseg = {} is greater than the signal length {}, using nperseg = {}",
                params.nperseg, n, n
            );
            n
        } else {
            params.nperseg
        };
        let noverlap = params.noverlap.unwrap_or(nperseg / 2);
        if noverlap >= nperseg {
            return Err(DspError::OverlapTooLarge { nperseg, noverlap });
        }

        let step = nperseg - noverlap;
        let num_segments = (n - noverlap) / step;
        debug!(
            "welch: {} segments of {} samples, step {}, {} window, fs {} Hz",
            num_segments,
            nperseg,
            step,
            params.window.name(),
            params.fs
        );

        let taper = create_window(nperseg, params.window);
        let scale = 1.0 / (params.fs * window_power(&taper));

        let mut accumulated = vec![0.0; nperseg / 2 + 1];
        for segment in 0..num_segments {
            let start = segment * step;
            let density = self.segment_density(&samples[start..start + nperseg], &taper, scale)?;
            for (acc, d) in accumulated.iter_mut().zip(density) {
                *acc += d;
            }
        }

        let values = accumulated
            .into_iter()
            .map(|v| v / num_segments as f64)
            .collect();

        Ok(Spectrum::new(rfftfreq(nperseg, params.fs)?, values))
    }

    /// Detrended, tapered, one-sided density of one segment
    fn segment_density(&mut self, segment: &[f64], taper: &[f64], scale: f64) -> DspResult<Vec<f64>> {
        let n = segment.len();
        let r2c = self.planner.plan_fft_forward(n);

        let offset = mean(segment);
        let mut input: Vec<f64> = segment
            .iter()
            .zip(taper.iter())
            .map(|(&s, &w)| (s - offset) * w)
            .collect();
        let mut output: Vec<Complex<f64>> = r2c.make_output_vec();

        r2c.process(&mut input, &mut output)
            .map_err(|e| DspError::Fft(e.to_string()))?;

        Ok(output
            .iter()
            .enumerate()
            .map(|(k, c)| {
                let density = c.norm_sqr() * scale;
                // DC and the even-length Nyquist bin have no mirrored twin
                if k == 0 || (n % 2 == 0 && k == n / 2) {
                    density
                } else {
                    2.0 * density
                }
            })
            .collect())
    }
}

/// Periodogram with a fresh planner
pub fn periodogram(samples: &[f64], fs: f64, window: WindowType) -> DspResult<Spectrum> {
    SpectralEstimator::new().periodogram(samples, fs, window)
}

/// Welch estimate with a fresh planner
pub fn welch(samples: &[f64], params: &WelchParams) -> DspResult<Spectrum> {
    SpectralEstimator::new().welch(samples, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, fs: f64, n: usize, amp: f64) -> Vec<f64> {
        (0..n)
            .map(|i| amp * (2.0 * PI * freq * i as f64 / fs).sin())
            .collect()
    }

    #[test]
    fn test_periodogram_bins_and_peak() {
        let fs = 200.0;
        let samples = sine(20.0, fs, 2000, 1.0);
        let pxx = periodogram(&samples, fs, WindowType::Rectangular).unwrap();

        assert_eq!(pxx.len(), 1001);
        assert!((pxx.resolution() - 0.1).abs() < 1e-12);
        let (f, _) = pxx.peak().unwrap();
        assert!((f - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_periodogram_parseval() {
        // Integrated one-sided density equals the variance of the signal
        let fs = 50.0;
        let samples = sine(5.0, fs, 500, 2.0);
        let pxx = periodogram(&samples, fs, WindowType::Rectangular).unwrap();
        let power: f64 = pxx.values.iter().sum::<f64>() * pxx.resolution();
        assert!((power - 2.0).abs() < 1e-9, "power = {}", power);
    }

    #[test]
    fn test_periodogram_removes_mean() {
        let samples = vec![3.0; 64];
        let pxx = periodogram(&samples, 1.0, WindowType::Rectangular).unwrap();
        assert!(pxx.values.iter().all(|&v| v.abs() < 1e-20));
    }

    #[test]
    fn test_welch_segment_count_and_resolution() {
        let samples = sine(10.0, 100.0, 12000, 1.0);
        let pxx = welch(&samples, &WelchParams::new(100.0, 256)).unwrap();
        assert_eq!(pxx.len(), 129);
        assert!((pxx.resolution() - 100.0 / 256.0).abs() < 1e-12);
    }

    #[test]
    fn test_welch_clamps_long_segments() {
        let samples = sine(1.0, 16.0, 64, 1.0);
        let pxx = welch(&samples, &WelchParams::new(16.0, 1024)).unwrap();
        assert_eq!(pxx.len(), 33);
    }

    #[test]
    fn test_welch_rejects_bad_overlap() {
        let params = WelchParams {
            noverlap: Some(256),
            ..WelchParams::new(1.0, 256)
        };
        let err = welch(&vec![0.0; 1024], &params).unwrap_err();
        assert_eq!(err, DspError::OverlapTooLarge { nperseg: 256, noverlap: 256 });
    }

    #[test]
    fn test_welch_explicit_overlap() {
        // Without overlap and taper, Welch is the mean of the per-block periodograms
        let samples: Vec<f64> = (0..16).map(|i| ((i * 5) % 7) as f64).collect();
        let params = WelchParams {
            noverlap: Some(0),
            window: WindowType::Rectangular,
            ..WelchParams::new(2.0, 4)
        };
        let pxx = welch(&samples, &params).unwrap();
        assert_eq!(pxx.len(), 3);

        let blocks: Vec<Spectrum> = samples
            .chunks(4)
            .map(|block| periodogram(block, 2.0, WindowType::Rectangular).unwrap())
            .collect();
        for k in 0..pxx.len() {
            let expected = blocks.iter().map(|b| b.values[k]).sum::<f64>() / 4.0;
            assert!((pxx.values[k] - expected).abs() < 1e-12);
        }
        assert_eq!(pxx.freqs, blocks[0].freqs);

        let dense = WelchParams {
            noverlap: Some(3),
            ..WelchParams::new(2.0, 4)
        };
        let pxx = welch(&samples, &dense).unwrap();
        assert_eq!(pxx.len(), 3);
        assert!(pxx.values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_single_sample_segments_are_finite() {
        let pxx = welch(&[7.0], &WelchParams::new(1.0, 256)).unwrap();
        assert_eq!(pxx.values, vec![0.0]);

        let params = WelchParams {
            noverlap: Some(0),
            ..WelchParams::new(1.0, 1)
        };
        let pxx = welch(&[1.0, 2.0, 3.0, 4.0], &params).unwrap();
        assert_eq!(pxx.len(), 1);
        assert!(pxx.values.iter().all(|v| v.is_finite()));

        for window in [WindowType::Hann, WindowType::Hamming, WindowType::Blackman] {
            let pxx = periodogram(&[3.0], 10.0, window).unwrap();
            assert_eq!(pxx.values, vec![0.0]);
            assert_eq!(pxx.freqs, vec![0.0]);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            periodogram(&[], 1.0, WindowType::Hann).unwrap_err(),
            DspError::EmptyInput
        );
        assert_eq!(
            welch(&[], &WelchParams::default()).unwrap_err(),
            DspError::EmptyInput
        );
    }
}
