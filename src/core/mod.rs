//! Numerical kernels, sample data and figure rendering

pub mod dsp;
pub mod sample_image;
pub mod synth;
pub mod visualization;

pub use dsp::{Correlation, Spectrum, WelchParams};
pub use synth::SynthSignal;
pub use visualization::{Figure, Style};
