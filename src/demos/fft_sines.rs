// src/demos/fft_sines.rs
//
// Fourier transform and power spectra of three noisy sine waves.
// Shows the raw DFT magnitude, the one-sided power on linear and log scales,
// and compares the periodogram with Welch's averaged estimate.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

use super::DemoOutput;
use crate::config::{DemoKind, SineConfig, SpectrumConfig};
use crate::core::dsp::{
    fftfreq, magnitude, one_sided_power, FftProcessor, SpectralEstimator, Spectrum, WelchParams,
};
use crate::core::synth::{sum_of_sines, SynthSignal};
use crate::core::visualization::{Figure, Style};

const FORMULA: &str = "signal = offset + Σ a_i·sin(ω_i·t) + noise";
const FFT_LABEL: &str = "|FFT| ()";

/// Every spectrum shown by the demo
#[derive(Debug, Clone)]
pub struct SpectralResults {
    /// Two-sided DFT bin frequencies [Hz]
    pub freq: Vec<f64>,
    /// Two-sided `|FFT|`
    pub fft_abs: Vec<f64>,
    /// One-sided `|FFT|^2`
    pub power: Spectrum,
    pub periodogram: Spectrum,
    pub welch: Spectrum,
}

/// Sample data for the demo: sines plus offset and seeded noise
pub fn generate_data(config: &SineConfig) -> Result<SynthSignal> {
    sum_of_sines(config).context("Failed to synthesize the sine signal")
}

pub fn analyze(signal: &SynthSignal, config: &SpectrumConfig) -> Result<SpectralResults> {
    let mut fft = FftProcessor::new();
    let spectrum = fft.complex_spectrum(&signal.noisy)?;
    let first: Vec<String> = spectrum
        .iter()
        .take(3)
        .map(|c| format!("{:.2}{:+.2}j", c.re, c.im))
        .collect();
    info!("first FFT coefficients: [{}]", first.join(", "));

    let fft_abs = magnitude(&spectrum);
    let freq = fftfreq(signal.len(), signal.dt)?;

    // Real input: the upper half mirrors the lower half
    let power = one_sided_power(&fft_abs, &freq, config.power_scaling)?;

    let fs = signal.sample_rate();
    if (config.welch_fs - fs).abs() > f64::EPSILON * fs {
        debug!(
            "Welch estimate uses fs = {} Hz, the signal is sampled at {} Hz",
            config.welch_fs, fs
        );
    }

    let mut estimator = SpectralEstimator::new();
    let periodogram = estimator.periodogram(&signal.noisy, fs, config.periodogram_window)?;
    let welch_params = WelchParams {
        window: config.welch_window,
        ..WelchParams::new(config.welch_fs, config.welch_nperseg)
    };
    let welch = estimator.welch(&signal.noisy, &welch_params)?;

    Ok(SpectralResults {
        freq,
        fft_abs,
        power,
        periodogram,
        welch,
    })
}

/// Noisy vs ideal signal next to the DFT magnitude
pub fn signal_and_fft_figure(signal: &SynthSignal, results: &SpectralResults) -> Result<Figure> {
    let mut fig = Figure::subplots(1, 2, (10.0, 5.0));

    let ax = &mut fig[0];
    ax.plot(&signal.t, &signal.noisy)?.width(0.7).label("noisy");
    ax.plot(&signal.t, &signal.ideal)?.width(2.0).dashed().label("ideal");
    ax.set_xlim(0.0, 0.4);
    ax.set_ylim(-15.0, 25.0);
    ax.set_xlabel("Time (s)");
    ax.set_ylabel("Signal ()");
    ax.legend();
    ax.text(0.2, 24.0, FORMULA, None);

    let ax = &mut fig[1];
    ax.plot(&results.freq, &results.fft_abs)?;
    ax.set_xlim(0.0, 35.0);
    ax.set_xlabel("Frequency (Hz)");
    ax.set_ylabel(FFT_LABEL);
    ax.hide_yticklabels();

    Ok(fig)
}

/// `|FFT|` against the bin index, both halves
pub fn doublesided_figure(results: &SpectralResults) -> Figure {
    let mut fig = Figure::new(640, 480);
    let ax = &mut fig[0];
    ax.plot_values(&results.fft_abs);
    ax.set_xlabel("Points");
    ax.set_ylabel(FFT_LABEL);
    fig
}

/// The same power spectrum on a linear and a log scale
pub fn power_lin_log_figure(results: &SpectralResults) -> Result<Figure> {
    let mut fig = Figure::subplots(2, 1, (6.4, 4.8)).with_shared_x();
    let power = &results.power;

    fig[0].plot(&power.freqs, &power.values)?;
    fig[0].set_ylabel("Power (linear)");

    fig[1].semilogy(&power.freqs, &power.values)?;
    fig[1].set_xlabel("Frequency (Hz)");
    fig[1].set_ylabel("Power (dB)");

    Ok(fig)
}

/// Periodogram above the Welch estimate, both log-scaled
pub fn periodogram_figure(results: &SpectralResults) -> Result<Figure> {
    let mut fig = Figure::subplots(2, 1, (6.4, 4.8)).with_shared_x();

    let ax = &mut fig[0];
    ax.semilogy(&results.periodogram.freqs, &results.periodogram.values)?
        .label("periodogram");
    ax.set_ylabel("Spectral Density (dB)");
    ax.legend();
    ax.set_ylim(1e-4, 1e3);

    let ax = &mut fig[1];
    ax.semilogy(&results.welch.freqs, &results.welch.values)?
        .label("welch");
    ax.set_xlabel("Frequency (Hz)");
    ax.set_ylabel("Spectral Density (dB)");
    ax.legend();

    Ok(fig)
}

pub fn run(
    sines: &SineConfig,
    config: &SpectrumConfig,
    style: &Style,
    out_dir: &Path,
) -> Result<DemoOutput> {
    let mut style = style.clone();
    style.set_fonts(config.font_size);

    let signal = generate_data(sines)?;
    let results = analyze(&signal, config)?;

    let mut output = DemoOutput::new(DemoKind::FftSines);
    output.files.push(style.show_data(
        &signal_and_fft_figure(&signal, &results)?,
        &out_dir.join(&config.fft_file),
    )?);
    output.files.push(style.show_data(
        &doublesided_figure(&results),
        &out_dir.join(&config.doublesided_file),
    )?);
    output.files.push(style.show_data(
        &power_lin_log_figure(&results)?,
        &out_dir.join(&config.power_file),
    )?);
    output.files.push(style.show_data(
        &periodogram_figure(&results)?,
        &out_dir.join(&config.periodogram_file),
    )?);

    output.notes.push(format!(
        "{} samples at {} Hz",
        signal.len(),
        signal.sample_rate()
    ));
    output.notes.push(format!(
        "periodogram ({}): {} bins, {:.4} Hz apart",
        config.periodogram_window.name(),
        results.periodogram.len(),
        results.periodogram.resolution()
    ));
    output.notes.push(format!(
        "welch ({}): {} bins, {:.4} Hz apart",
        config.welch_window.name(),
        results.welch.len(),
        results.welch.resolution()
    ));
    if let Some((f, _)) = results.power.peak() {
        output.notes.push(format!("strongest component at {:.2} Hz", f));
    }
    Ok(output)
}
