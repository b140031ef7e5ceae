//! The demo figures
//!
//! Each demo builds its own data from [`DemoConfig`], computes one transform
//! and writes its figures into an output directory. Demos share no state.

pub mod autocorrelation;
pub mod fft_sines;
pub mod grayscale;

use anyhow::Result;
use image::GrayImage;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{DemoConfig, DemoKind};
use crate::core::sample_image::camera;
use crate::core::visualization::Style;

/// Files written by one demo plus a few headline numbers
#[derive(Debug, Clone, Serialize)]
pub struct DemoOutput {
    pub kind: DemoKind,
    pub files: Vec<PathBuf>,
    pub notes: Vec<String>,
}

impl DemoOutput {
    pub fn new(kind: DemoKind) -> Self {
        Self {
            kind,
            files: Vec::new(),
            notes: Vec::new(),
        }
    }
}

/// Run one demo. `image` replaces the built-in sample for the grayscale demo.
pub fn run_demo(
    kind: DemoKind,
    config: &DemoConfig,
    style: &Style,
    out_dir: &Path,
    image: Option<&GrayImage>,
) -> Result<DemoOutput> {
    match kind {
        DemoKind::Grayscale => {
            let sample;
            let img = match image {
                Some(img) => img,
                None => {
                    sample = camera();
                    &sample
                }
            };
            grayscale::run(&config.grayscale, img, style, out_dir)
        }
        DemoKind::Autocorrelation => autocorrelation::run(&config.pulse, style, out_dir),
        DemoKind::FftSines => fft_sines::run(&config.sines, &config.spectrum, style, out_dir),
    }
}
