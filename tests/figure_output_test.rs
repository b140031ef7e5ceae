// tests/figure_output_test.rs
//
// End-to-end rendering of every demo into target/figure-output.
// Most cases render without a font so they do not depend on the host; the
// text cases use SAPFIGURES_FONT or a system font and return early without one.
//
// Usage:
//   cargo test --test figure_output_test

use std::path::{Path, PathBuf};

use sapfigures::config::{DemoConfig, DemoKind, PulseConfig};
use sapfigures::core::sample_image::camera;
use sapfigures::core::visualization::{Style, FONT_ENV};
use sapfigures::demos::{autocorrelation, run_demo};

const FIGURE_OUTPUT_DIR: &str = "target/figure-output";

fn output_dir(name: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join(FIGURE_OUTPUT_DIR)
        .join(name);
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    dir
}

fn assert_image(path: &Path) {
    assert!(path.exists(), "missing {}", path.display());
    let img = image::open(path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
    assert!(img.width() > 100 && img.height() > 100);
}

#[test]
fn grayscale_demo_writes_png() {
    let out = output_dir("grayscale");
    let config = DemoConfig::default();
    let result = run_demo(DemoKind::Grayscale, &config, &Style::plain(), &out, None).unwrap();

    assert_eq!(result.kind, DemoKind::Grayscale);
    assert_eq!(result.files, vec![out.join("grayscale_demo.png")]);
    assert_image(&result.files[0]);
}

#[test]
fn grayscale_demo_accepts_custom_image() {
    let out = output_dir("grayscale_custom");
    let config = DemoConfig::default();
    let img = image::GrayImage::from_fn(300, 240, |x, y| image::Luma([((x + y) % 256) as u8]));
    let result =
        run_demo(DemoKind::Grayscale, &config, &Style::plain(), &out, Some(&img)).unwrap();

    assert_image(&result.files[0]);
    assert!(result.notes[0].contains("300x240"));
}

#[test]
fn autocorrelation_demo_writes_jpeg() {
    let out = output_dir("autocorrelation");
    let config = DemoConfig::default();
    let result =
        run_demo(DemoKind::Autocorrelation, &config, &Style::plain(), &out, None).unwrap();

    assert_eq!(result.files, vec![out.join("autoCorrelation.jpg")]);
    assert_image(&result.files[0]);
}

#[test]
fn fft_demo_writes_four_figures() {
    let out = output_dir("fft");
    let config = DemoConfig::default();
    let result = run_demo(DemoKind::FftSines, &config, &Style::plain(), &out, None).unwrap();

    let expected: Vec<PathBuf> = [
        "FFT_sines.jpg",
        "FFT_doublesided.jpg",
        "FFT_sines_power_lin_log.jpg",
        "FFT_sines_periodogram.jpg",
    ]
    .iter()
    .map(|name| out.join(name))
    .collect();
    assert_eq!(result.files, expected);
    for file in &result.files {
        assert_image(file);
    }
    assert!(result.notes.iter().any(|n| n.contains("12000 samples")));
    assert!(result.notes.iter().any(|n| n.starts_with("periodogram (boxcar)")));
    assert!(result.notes.iter().any(|n| n.starts_with("welch (hann)")));
}

#[test]
fn demos_are_independent() {
    // Running in any order gives the same files
    let config = DemoConfig::default();
    let style = Style::plain();
    let out = output_dir("all");
    for kind in DemoKind::all().iter().rev() {
        run_demo(*kind, &config, &style, &out, None).unwrap();
    }
    for kind in DemoKind::all() {
        let again = run_demo(kind, &config, &style, &out, None).unwrap();
        for file in &again.files {
            assert_image(file);
        }
    }
    assert_eq!(camera().dimensions(), (512, 512));
}

// ============================================================================
// Rendering with text
// ============================================================================

fn text_style() -> Option<Style> {
    let hint = std::env::var_os(FONT_ENV).map(PathBuf::from);
    let style = Style::load(hint.as_deref());
    if style.has_text() {
        Some(style)
    } else {
        eprintln!("no font available, skipping text rendering");
        None
    }
}

#[test]
fn demos_render_with_text() {
    let Some(style) = text_style() else { return };
    let out = output_dir("with_text");
    let config = DemoConfig::default();
    for kind in DemoKind::all() {
        let result = run_demo(kind, &config, &style, &out, None).unwrap();
        for file in &result.files {
            assert_image(file);
        }
    }
}

#[test]
fn text_reserves_room_left_of_the_axes() {
    let Some(mut style) = text_style() else { return };
    style.set_fonts(14.0);
    let (_, ac) = autocorrelation::compute(&PulseConfig::default());

    let mut plain_fig = autocorrelation::build_figure(&ac).unwrap();
    plain_fig.tight_layout(&Style::plain());
    let mut text_fig = autocorrelation::build_figure(&ac).unwrap();
    text_fig.tight_layout(&style);

    let plain = plain_fig[0].position().unwrap();
    let text = text_fig[0].position().unwrap();
    assert!(text.left > plain.left);
    assert!(text.bottom > plain.bottom);

    // Tick labels and the rotated y label land in the left margin
    let img = text_fig.render(&style);
    let (width, height) = img.dimensions();
    let margin_px = ((text.left * width as f64) as u32).saturating_sub(8);
    let inked = (0..margin_px)
        .flat_map(|x| (0..height).map(move |y| (x, y)))
        .filter(|&(x, y)| img.get_pixel(x, y).0 != [255, 255, 255])
        .count();
    assert!(inked > 0);

    let bare = plain_fig.render(&Style::plain());
    let plain_margin = ((plain.left * width as f64) as u32).saturating_sub(8);
    let bare_inked = (0..plain_margin)
        .flat_map(|x| (0..height).map(move |y| (x, y)))
        .filter(|&(x, y)| bare.get_pixel(x, y).0 != [255, 255, 255])
        .count();
    assert_eq!(bare_inked, 0);
}
