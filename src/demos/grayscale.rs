// src/demos/grayscale.rs
//
// Content of a grayscale image: full view, a 10x10 pixel zoom and a colorbar

use anyhow::{Context, Result};
use image::GrayImage;
use log::debug;
use std::path::Path;

use super::DemoOutput;
use crate::config::{DemoKind, GrayscaleConfig};
use crate::core::sample_image::intensity_range;
use crate::core::visualization::{Colormap, Figure, Rect, Style};

/// Build the three-panel figure, with the colorbar already repositioned
pub fn build_figure(config: &GrayscaleConfig, img: &GrayImage, style: &Style) -> Result<Figure> {
    let mut fig = Figure::subplots(1, 3, (10.0, 4.0)).with_width_ratios(&config.width_ratios);

    fig[0].imshow(img, Colormap::Gray);

    // Zoom in; the descending y range keeps row 0 on top
    fig[1].imshow(img, Colormap::Gray);
    fig[1].set_xlim(config.zoom_xlim.0, config.zoom_xlim.1);
    fig[1].set_ylim(config.zoom_ylim.0, config.zoom_ylim.1);

    fig.colorbar(0, 2)?;
    fig.tight_layout(style);

    // Stretch the colorbar so it lines up with the images
    let mut pts = fig[2]
        .position()
        .context("layout did not place the colorbar")?
        .points();
    pts[0][1] = config.colorbar_span.0;
    pts[1][1] = config.colorbar_span.1;
    fig[2].set_position(Rect::from_points(pts));

    Ok(fig)
}

pub fn run(
    config: &GrayscaleConfig,
    img: &GrayImage,
    style: &Style,
    out_dir: &Path,
) -> Result<DemoOutput> {
    let mut style = style.clone();
    style.set_fonts(config.font_size);

    let (lo, hi) = intensity_range(img);
    debug!("image {}x{}, intensities {}..{}", img.width(), img.height(), lo, hi);

    let fig = build_figure(config, img, &style)?;
    let path = style.show_data(&fig, &out_dir.join(&config.out_file))?;

    let mut output = DemoOutput::new(DemoKind::Grayscale);
    output.files.push(path);
    output.notes.push(format!("{}x{} pixels, gray levels {}..{}", img.width(), img.height(), lo, hi));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample_image::camera;

    #[test]
    fn test_colorbar_is_stretched() {
        let config = GrayscaleConfig::default();
        let fig = build_figure(&config, &camera(), &Style::plain()).unwrap();
        let [[_, y0], [_, y1]] = fig[2].position().unwrap().points();
        assert!((y0 - 0.1).abs() < 1e-12);
        assert!((y1 - 0.95).abs() < 1e-12);
        assert!(fig[2].colorbar.is_some());
    }

    #[test]
    fn test_zoom_limits() {
        let config = GrayscaleConfig::default();
        let fig = build_figure(&config, &camera(), &Style::plain()).unwrap();
        assert_eq!(fig[1].resolved_xlim(), (210.0, 220.0));
        assert_eq!(fig[1].resolved_ylim(), (125.0, 115.0));
        assert_eq!(fig[0].resolved_ylim(), (511.5, -0.5));
    }
}
