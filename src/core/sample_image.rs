// src/core/sample_image.rs
//
// Grayscale sample data for the image demo

use anyhow::{Context, Result};
use image::{GrayImage, Luma};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;

/// Side length of the built-in sample image
pub const CAMERA_SIZE: u32 = 512;

const TEXTURE_SEED: u64 = 0x5a9;

/// Built-in 512x512 test scene.
///
/// A vertical shading gradient with a ringed disc and a fine pixel texture,
/// so that a 10x10 crop shows individual samples. Identical on every call.
pub fn camera() -> GrayImage {
    let mut rng = ChaCha8Rng::seed_from_u64(TEXTURE_SEED);
    let size = CAMERA_SIZE as f64;
    let (cx, cy, radius) = (size / 2.0, size * 0.39, size * 0.23);

    GrayImage::from_fn(CAMERA_SIZE, CAMERA_SIZE, |x, y| {
        let (xf, yf) = (x as f64, y as f64);
        let shading = 40.0 + 150.0 * yf / (size - 1.0);
        let r = ((xf - cx).powi(2) + (yf - cy).powi(2)).sqrt();

        let base = if r < radius {
            128.0 + 90.0 * (r / 6.0).cos()
        } else {
            shading
        };
        let texture: f64 = rng.gen_range(-12.0..=12.0);
        Luma([(base + texture).round().clamp(0.0, 255.0) as u8])
    })
}

/// Load any image file supported by the image crate as 8-bit luma
pub fn load_grayscale(path: &Path) -> Result<GrayImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?;
    Ok(img.to_luma8())
}

/// Smallest and largest intensity in the image
pub fn intensity_range(img: &GrayImage) -> (u8, u8) {
    img.pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])))
}
