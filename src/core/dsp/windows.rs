//! Window function implementations
//!
//! All windows are generated in their periodic (DFT-even) form, which is
//! what spectral estimators expect: the denominator is `n`, not `n - 1`.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowType {
    /// Boxcar, all ones
    Rectangular,
    #[default]
    Hann,
    Hamming,
    Blackman,
}

impl WindowType {
    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Rectangular => "boxcar",
            WindowType::Hann => "hann",
            WindowType::Hamming => "hamming",
            WindowType::Blackman => "blackman",
        }
    }
}

/// Create window function. A single-sample window is always `[1.0]`.
pub fn create_window(size: usize, window_type: WindowType) -> Vec<f64> {
    if size == 1 {
        return vec![1.0];
    }
    let n = size as f64;
    (0..size)
        .map(|i| {
            let x = i as f64;
            match window_type {
                WindowType::Rectangular => 1.0,
                WindowType::Hann => {
                    0.5 * (1.0 - (2.0 * PI * x / n).cos())
                }
                WindowType::Hamming => {
                    0.54 - 0.46 * (2.0 * PI * x / n).cos()
                }
                WindowType::Blackman => {
                    0.42 - 0.5 * (2.0 * PI * x / n).cos()
                        + 0.08 * (4.0 * PI * x / n).cos()
                }
            }
        })
        .collect()
}

/// Sum of squared window coefficients, used for density scaling
pub fn window_power(window: &[f64]) -> f64 {
    window.iter().map(|w| w * w).sum()
}
