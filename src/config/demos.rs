// src/config/demos.rs
//
// Constants for each demo figure, grouped into typed configs

use std::ops::Range;
use serde::{Deserialize, Serialize};

use crate::core::dsp::{PowerScaling, WindowType};

/// The demos that can be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemoKind {
    /// Full and zoomed view of a grayscale image with a colorbar
    Grayscale,
    /// Autocorrelation of a two-pulse signal
    Autocorrelation,
    /// Fourier transform and power spectra of noisy sines
    FftSines,
}

impl DemoKind {
    pub fn all() -> Vec<Self> {
        vec![Self::Grayscale, Self::Autocorrelation, Self::FftSines]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DemoKind::Grayscale => "grayscale",
            DemoKind::Autocorrelation => "autocorrelation",
            DemoKind::FftSines => "fft",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DemoKind::Grayscale => "Grayscale image, zoomed crop and colorbar",
            DemoKind::Autocorrelation => "Full autocorrelation of a pulse train",
            DemoKind::FftSines => "FFT, power spectrum, periodogram and Welch estimate",
        }
    }
}

impl std::fmt::Display for DemoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rectangular pulse signal for the autocorrelation demo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseConfig {
    /// Number of samples
    pub length: usize,
    /// Index ranges (end exclusive) set to 1
    pub pulses: Vec<Range<usize>>,
    pub font_size: f32,
    pub out_file: String,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            length: 20,
            pulses: vec![7..10, 14..17],
            font_size: 14.0,
            out_file: "autoCorrelation.jpg".to_string(),
        }
    }
}

/// Superposition of sines plus offset and Gaussian noise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SineConfig {
    /// Sample rate [Hz]
    pub rate: f64,
    /// Duration [s]
    pub duration: f64,
    /// Sine frequencies [Hz]
    pub freqs: Vec<f64>,
    /// Sine amplitudes, paired with `freqs`
    pub amps: Vec<f64>,
    pub offset: f64,
    /// Standard deviation of the additive noise
    pub noise_amp: f64,
    pub seed: u64,
}

impl Default for SineConfig {
    fn default() -> Self {
        Self {
            rate: 200.0,
            duration: 60.0,
            freqs: vec![3.0, 7.0, 20.0],
            amps: vec![1.0, 2.0, 3.0],
            offset: 1.0,
            noise_amp: 5.0,
            seed: 12345,
        }
    }
}

/// Spectral estimator settings and output names for the FFT demo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumConfig {
    /// Sample rate passed to Welch's method [Hz]; the book figure uses
    /// 100 Hz although the signal is sampled at 200 Hz
    pub welch_fs: f64,
    pub welch_nperseg: usize,
    pub welch_window: WindowType,
    pub periodogram_window: WindowType,
    pub power_scaling: PowerScaling,
    pub font_size: f32,
    pub fft_file: String,
    pub doublesided_file: String,
    pub power_file: String,
    pub periodogram_file: String,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            welch_fs: 100.0,
            welch_nperseg: 256,
            welch_window: WindowType::Hann,
            periodogram_window: WindowType::Rectangular,
            power_scaling: PowerScaling::Raw,
            font_size: 16.0,
            fft_file: "FFT_sines.jpg".to_string(),
            doublesided_file: "FFT_doublesided.jpg".to_string(),
            power_file: "FFT_sines_power_lin_log.jpg".to_string(),
            periodogram_file: "FFT_sines_periodogram.jpg".to_string(),
        }
    }
}

/// Crop bounds and output for the grayscale demo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrayscaleConfig {
    /// Horizontal limits of the zoomed panel, in pixel coordinates
    pub zoom_xlim: (f64, f64),
    /// Vertical limits of the zoomed panel, bottom first (descending keeps
    /// row 0 on top)
    pub zoom_ylim: (f64, f64),
    /// Vertical extent of the colorbar in figure fractions, applied after layout
    pub colorbar_span: (f64, f64),
    pub width_ratios: Vec<f64>,
    pub font_size: f32,
    pub out_file: String,
}

impl Default for GrayscaleConfig {
    fn default() -> Self {
        Self {
            zoom_xlim: (210.0, 220.0),
            zoom_ylim: (125.0, 115.0),
            colorbar_span: (0.1, 0.95),
            width_ratios: vec![1.0, 1.0, 0.1],
            font_size: 12.0,
            out_file: "grayscale_demo.png".to_string(),
        }
    }
}

/// Every constant used by the demos
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    pub pulse: PulseConfig,
    pub sines: SineConfig,
    pub spectrum: SpectrumConfig,
    pub grayscale: GrayscaleConfig,
}

impl DemoConfig {
    /// Effective configuration as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
