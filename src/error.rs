//! Error types for the numerical kernels and the plotting layer

use thiserror::Error;

/// Errors raised by the DSP kernels when their inputs cannot be processed
#[derive(Debug, Error, PartialEq)]
pub enum DspError {
    #[error("input signal is empty")]
    EmptyInput,

    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("sample interval must be positive and finite, got {0}")]
    InvalidSampleInterval(f64),

    #[error("segment length must be at least 1")]
    ZeroSegmentLength,

    #[error("overlap ({noverlap}) must be smaller than the segment length ({nperseg})")]
    OverlapTooLarge { nperseg: usize, noverlap: usize },

    #[error("FFT failed: {0}")]
    Fft(String),

    #[error("paired arrays differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

pub type DspResult<T> = Result<T, DspError>;

pub(crate) fn check_sample_rate(fs: f64) -> DspResult<()> {
    if fs.is_finite() && fs > 0.0 {
        Ok(())
    } else {
        Err(DspError::InvalidSampleRate(fs))
    }
}

pub(crate) fn check_sample_interval(dt: f64) -> DspResult<()> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(DspError::InvalidSampleInterval(dt))
    }
}

/// Errors raised while building or saving a figure
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("x and y differ in length: {x} vs {y}")]
    SeriesLength { x: usize, y: usize },

    #[error("axes {0} has no image to build a colorbar from")]
    NoMappable(usize),

    #[error("figure has no axes {0}")]
    NoAxes(usize),

    #[error("failed to write figure: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
