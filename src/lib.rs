//! sapfigures - demo figures for signal and image processing
//!
//! Three small, independent demos, each of which synthesizes or loads a
//! dataset, applies one textbook transform and writes figures to disk:
//!
//! - **Grayscale**: full view of a sample image, a 10x10 pixel zoom with a
//!   flipped y range, and a colorbar aligned with the images
//! - **Autocorrelation**: full (2N-1 shift) autocorrelation of a pulse train
//! - **FFT**: DFT magnitude, one-sided power on linear and log scales,
//!   periodogram and Welch estimates of three noisy sines
//!
//! ## Module Structure
//!
//! - `core` - DSP kernels, signal synthesis, sample image, figure rendering
//! - `demos` - the three demos
//! - `cli` - command-line interface
//! - `config` - demo constants
//! - `error` - error types of the kernels and the plotting layer
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sapfigures::core::dsp::autocorrelate;
//! use sapfigures::core::synth::pulse_train;
//!
//! let signal = pulse_train(20, &[7..10, 14..17]);
//! let ac = autocorrelate(&signal);
//! assert_eq!(ac.len(), 39);
//! assert_eq!(ac.at_shift(0), Some(6.0));
//! ```
//!
//! ## Output Files
//!
//! | Demo            | Files                                                   |
//! |-----------------|---------------------------------------------------------|
//! | grayscale       | `grayscale_demo.png`                                    |
//! | autocorrelation | `autoCorrelation.jpg`                                   |
//! | fft             | `FFT_sines.jpg`, `FFT_doublesided.jpg`,                 |
//! |                 | `FFT_sines_power_lin_log.jpg`, `FFT_sines_periodogram.jpg` |

// Kernels, data and rendering
pub mod core;

// Command-line interface
pub mod cli;

// Demo constants
pub mod config;

// The demo figures
pub mod demos;

pub mod error;

pub use config::{DemoConfig, DemoKind};
pub use crate::core::dsp::{autocorrelate, correlate_full, fftfreq, periodogram, welch};
pub use crate::core::{Correlation, Figure, Spectrum, Style, SynthSignal, WelchParams};
pub use demos::{run_demo, DemoOutput};
pub use error::{DspError, PlotError};
