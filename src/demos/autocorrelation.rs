// src/demos/autocorrelation.rs
//
// Autocorrelation of a signal made of two rectangular pulses

use anyhow::Result;
use log::info;
use std::path::Path;

use super::DemoOutput;
use crate::config::{DemoKind, PulseConfig};
use crate::core::dsp::{autocorrelate, Correlation};
use crate::core::synth::pulse_train;
use crate::core::visualization::{Figure, Style};

/// Pulse signal from the config and its full autocorrelation
pub fn compute(config: &PulseConfig) -> (Vec<f64>, Correlation) {
    let signal = pulse_train(config.length, &config.pulses);
    let auto_corr = autocorrelate(&signal);
    (signal, auto_corr)
}

pub fn build_figure(auto_corr: &Correlation) -> Result<Figure> {
    let shift: Vec<f64> = auto_corr.shifts.iter().map(|&s| s as f64).collect();

    let mut fig = Figure::new(640, 480);
    let ax = &mut fig[0];
    ax.plot(&shift, &auto_corr.values)?;
    ax.set_xlabel("Shift");
    ax.set_ylabel("Auto-Correlation");
    ax.set_margins(0.0, 0.05);
    Ok(fig)
}

pub fn run(config: &PulseConfig, style: &Style, out_dir: &Path) -> Result<DemoOutput> {
    let mut style = style.clone();
    style.set_fonts(config.font_size);

    let (signal, auto_corr) = compute(config);
    let center = auto_corr.at_shift(0).unwrap_or(0.0);
    info!(
        "autocorrelation of {} samples: {} shifts, value {} at shift 0",
        signal.len(),
        auto_corr.len(),
        center
    );

    let fig = build_figure(&auto_corr)?;
    let path = style.show_data(&fig, &out_dir.join(&config.out_file))?;

    let mut output = DemoOutput::new(DemoKind::Autocorrelation);
    output.files.push(path);
    output.notes.push(format!(
        "{} samples -> {} shifts, zero-shift value {}",
        signal.len(),
        auto_corr.len(),
        center
    ));
    Ok(output)
}
