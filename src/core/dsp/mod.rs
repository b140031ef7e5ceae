//! Digital Signal Processing kernels
//!
//! - `correlation` - full linear cross/auto-correlation
//! - `fft` - complex DFT, frequency bins, one-sided power
//! - `spectral` - periodogram and Welch PSD estimates
//! - `windows` - tapers for the estimators

pub mod correlation;
pub mod fft;
pub mod spectral;
pub mod stats;
pub mod windows;

pub use correlation::{autocorrelate, correlate_full, Correlation};
pub use fft::{fftfreq, magnitude, one_sided_power, rfftfreq, FftProcessor, PowerScaling};
pub use spectral::{periodogram, welch, SpectralEstimator, Spectrum, WelchParams};
pub use windows::{create_window, WindowType};
