// src/core/visualization/figure.rs
//
// Figure and axes model: what to draw and where. Pixel work lives in render.rs.

use image::{GrayImage, RgbImage};
use std::ops::{Index, IndexMut};

use super::colormap::Colormap;
use super::render;
use super::style::Style;
use super::ticks::{format_linear_tick, format_log_tick, linear_ticks, log_ticks};
use crate::core::dsp::stats::finite_range;
use crate::core::sample_image::intensity_range;
use crate::error::PlotError;

/// Output resolution: pixels per inch
pub const DPI: f64 = 100.0;
/// Pixels per typographic point at [`DPI`]
pub const PX_PER_PT: f32 = (DPI / 72.0) as f32;

const DEFAULT_LINE_WIDTH: f32 = 1.5;
const DEFAULT_MARGIN: f64 = 0.05;
const TICK_LEN: f64 = 5.0;

/// Rectangle in figure fractions, origin bottom-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self { left, bottom, width, height }
    }

    /// Corner points `[[x0, y0], [x1, y1]]`
    pub fn points(&self) -> [[f64; 2]; 2] {
        [
            [self.left, self.bottom],
            [self.left + self.width, self.bottom + self.height],
        ]
    }

    pub fn from_points(points: [[f64; 2]; 2]) -> Self {
        let [[x0, y0], [x1, y1]] = points;
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Pixel box `(x0, y0, x1, y1)` with the origin top-left
    pub(crate) fn to_pixels(self, width: u32, height: u32) -> (f64, f64, f64, f64) {
        let (w, h) = (width as f64, height as f64);
        (
            self.left * w,
            (1.0 - self.bottom - self.height) * h,
            (self.left + self.width) * w,
            (1.0 - self.bottom) * h,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// One plotted data series
#[derive(Debug, Clone)]
pub struct Line {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Width in points
    pub width: f32,
    pub style: LineStyle,
    pub label: Option<String>,
}

impl Line {
    pub fn width(&mut self, width: f32) -> &mut Self {
        self.width = width;
        self
    }

    pub fn dashed(&mut self) -> &mut Self {
        self.style = LineStyle::Dashed;
        self
    }

    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }
}

/// Grayscale raster shown with a colormap
#[derive(Debug, Clone)]
pub struct ImageLayer {
    pub image: GrayImage,
    pub colormap: Colormap,
    pub vmin: f64,
    pub vmax: f64,
}

/// Colour scale for an image shown elsewhere in the figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorbarLayer {
    pub colormap: Colormap,
    pub vmin: f64,
    pub vmax: f64,
}

/// Free text anchored at its lower-left corner, in data coordinates
#[derive(Debug, Clone)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    /// Size in points, the style size when unset
    pub size: Option<f32>,
}

/// A single plot panel
#[derive(Debug, Clone, Default)]
pub struct Axes {
    pub lines: Vec<Line>,
    pub image: Option<ImageLayer>,
    pub colorbar: Option<ColorbarLayer>,
    pub texts: Vec<TextLabel>,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    /// Autoscale padding as a fraction of the data span, per axis
    pub margins: Option<(f64, f64)>,
    pub yscale: Scale,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub legend: bool,
    pub hide_yticklabels: bool,
    position: Option<Rect>,
}

impl Axes {
    /// Plot `y` against `x`
    pub fn plot(&mut self, x: &[f64], y: &[f64]) -> Result<&mut Line, PlotError> {
        if x.len() != y.len() {
            return Err(PlotError::SeriesLength { x: x.len(), y: y.len() });
        }
        self.lines.push(Line {
            x: x.to_vec(),
            y: y.to_vec(),
            width: DEFAULT_LINE_WIDTH,
            style: LineStyle::Solid,
            label: None,
        });
        let idx = self.lines.len() - 1;
        Ok(&mut self.lines[idx])
    }

    /// Plot `y` against its sample index
    pub fn plot_values(&mut self, y: &[f64]) -> &mut Line {
        let x: Vec<f64> = (0..y.len()).map(|i| i as f64).collect();
        self.lines.push(Line {
            x,
            y: y.to_vec(),
            width: DEFAULT_LINE_WIDTH,
            style: LineStyle::Solid,
            label: None,
        });
        let idx = self.lines.len() - 1;
        &mut self.lines[idx]
    }

    /// Plot with a logarithmic y axis
    pub fn semilogy(&mut self, x: &[f64], y: &[f64]) -> Result<&mut Line, PlotError> {
        self.yscale = Scale::Log;
        self.plot(x, y)
    }

    /// Show a grayscale image, scaled between its own min and max
    pub fn imshow(&mut self, image: &GrayImage, colormap: Colormap) -> &mut ImageLayer {
        let (lo, hi) = intensity_range(image);
        self.image.insert(ImageLayer {
            image: image.clone(),
            colormap,
            vmin: lo as f64,
            vmax: hi as f64,
        })
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.xlim = Some((lo, hi));
    }

    /// `lo` is drawn at the bottom; pass `lo > hi` to flip the axis
    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        self.ylim = Some((lo, hi));
    }

    pub fn set_margins(&mut self, x: f64, y: f64) {
        self.margins = Some((x, y));
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    pub fn legend(&mut self) {
        self.legend = true;
    }

    pub fn hide_yticklabels(&mut self) {
        self.hide_yticklabels = true;
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, size: Option<f32>) {
        self.texts.push(TextLabel { x, y, text: text.into(), size });
    }

    /// Position assigned by layout or by [`Axes::set_position`]
    pub fn position(&self) -> Option<Rect> {
        self.position
    }

    pub fn set_position(&mut self, rect: Rect) {
        self.position = Some(rect);
    }

    /// Finite x extent of the data
    fn data_xrange(&self) -> Option<(f64, f64)> {
        let xs: Vec<f64> = self.lines.iter().flat_map(|l| l.x.iter().copied()).collect();
        finite_range(&xs)
    }

    /// Finite y extent of the data; positive values only on a log axis
    fn data_yrange(&self) -> Option<(f64, f64)> {
        let ys: Vec<f64> = self
            .lines
            .iter()
            .flat_map(|l| l.y.iter().copied())
            .filter(|&v| self.yscale == Scale::Linear || v > 0.0)
            .collect();
        finite_range(&ys)
    }

    fn margin(&self) -> (f64, f64) {
        self.margins.unwrap_or((DEFAULT_MARGIN, DEFAULT_MARGIN))
    }

    /// Horizontal limits: explicit, image extent, colorbar, or padded data range
    pub fn resolved_xlim(&self) -> (f64, f64) {
        if let Some(lim) = self.xlim {
            return lim;
        }
        if let Some(layer) = &self.image {
            return (-0.5, layer.image.width() as f64 - 0.5);
        }
        if self.colorbar.is_some() {
            return (0.0, 1.0);
        }
        pad_range(self.data_xrange(), self.margin().0, Scale::Linear)
    }

    /// Vertical limits as (bottom, top)
    pub fn resolved_ylim(&self) -> (f64, f64) {
        if let Some(lim) = self.ylim {
            return lim;
        }
        if let Some(layer) = &self.image {
            return (layer.image.height() as f64 - 0.5, -0.5);
        }
        if let Some(bar) = &self.colorbar {
            return (bar.vmin, bar.vmax);
        }
        pad_range(self.data_yrange(), self.margin().1, self.yscale)
    }

    /// Tick positions and labels along y for the given limits
    pub(crate) fn yticks(&self, ylim: (f64, f64)) -> Vec<(f64, String)> {
        axis_ticks(ylim, self.yscale, 6)
    }
}

/// Ticks and labels for limits on a linear or log axis
pub(crate) fn axis_ticks(lim: (f64, f64), scale: Scale, target: usize) -> Vec<(f64, String)> {
    match scale {
        Scale::Linear => {
            let ticks = linear_ticks(lim.0, lim.1, target);
            let step = match ticks.as_slice() {
                [a, b, ..] => b - a,
                _ => 1.0,
            };
            ticks
                .into_iter()
                .map(|t| (t, format_linear_tick(t, step)))
                .collect()
        }
        Scale::Log => log_ticks(lim.0, lim.1)
            .into_iter()
            .map(|e| (10f64.powi(e), format_log_tick(e)))
            .collect(),
    }
}

fn pad_range(range: Option<(f64, f64)>, margin: f64, scale: Scale) -> (f64, f64) {
    let Some((lo, hi)) = range else {
        return match scale {
            Scale::Linear => (0.0, 1.0),
            Scale::Log => (1.0, 10.0),
        };
    };
    match scale {
        Scale::Linear => {
            if hi > lo {
                let pad = (hi - lo) * margin;
                (lo - pad, hi + pad)
            } else {
                (lo - 0.5, hi + 0.5)
            }
        }
        Scale::Log => {
            let (llo, lhi) = (lo.log10(), hi.log10());
            let (llo, lhi) = if lhi > llo {
                let pad = (lhi - llo) * margin;
                (llo - pad, lhi + pad)
            } else {
                (llo - 0.5, lhi + 0.5)
            };
            (10f64.powf(llo), 10f64.powf(lhi))
        }
    }
}

/// A grid of axes rendered onto one raster
#[derive(Debug, Clone)]
pub struct Figure {
    width: u32,
    height: u32,
    rows: usize,
    cols: usize,
    width_ratios: Vec<f64>,
    share_x: bool,
    axes: Vec<Axes>,
}

impl Figure {
    /// Single-panel figure of the given pixel size
    pub fn new(width: u32, height: u32) -> Self {
        Self::subplots_px(1, 1, width, height)
    }

    /// `rows x cols` panels on a figure of `figsize` inches at [`DPI`]
    pub fn subplots(rows: usize, cols: usize, figsize: (f64, f64)) -> Self {
        let width = (figsize.0 * DPI).round() as u32;
        let height = (figsize.1 * DPI).round() as u32;
        Self::subplots_px(rows, cols, width, height)
    }

    fn subplots_px(rows: usize, cols: usize, width: u32, height: u32) -> Self {
        let (rows, cols) = (rows.max(1), cols.max(1));
        Self {
            width,
            height,
            rows,
            cols,
            width_ratios: vec![1.0; cols],
            share_x: false,
            axes: vec![Axes::default(); rows * cols],
        }
    }

    /// Relative column widths; ignored unless one ratio per column is given
    pub fn with_width_ratios(mut self, ratios: &[f64]) -> Self {
        if ratios.len() == self.cols && ratios.iter().all(|&r| r > 0.0) {
            self.width_ratios = ratios.to_vec();
        }
        self
    }

    /// All panels use the same x limits; only the bottom row gets x tick labels
    pub fn with_shared_x(mut self) -> Self {
        self.share_x = true;
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    /// Attach a colorbar for the image in axes `mappable`, drawn in axes `cax`
    pub fn colorbar(&mut self, mappable: usize, cax: usize) -> Result<(), PlotError> {
        let source = self.axes.get(mappable).ok_or(PlotError::NoAxes(mappable))?;
        let layer = source.image.as_ref().ok_or(PlotError::NoMappable(mappable))?;
        let bar = ColorbarLayer {
            colormap: layer.colormap,
            vmin: layer.vmin,
            vmax: layer.vmax,
        };
        self.axes.get_mut(cax).ok_or(PlotError::NoAxes(cax))?.colorbar = Some(bar);
        Ok(())
    }

    /// Effective x limits of axes `idx`, honouring a shared x axis
    pub fn xlim_of(&self, idx: usize) -> (f64, f64) {
        if !self.share_x {
            return self.axes[idx].resolved_xlim();
        }
        if let Some(lim) = self.axes.iter().find_map(|a| a.xlim) {
            return lim;
        }
        let union = self
            .axes
            .iter()
            .filter_map(|a| a.data_xrange())
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)));
        let margin = self
            .axes
            .iter()
            .map(|a| a.margin().0)
            .fold(0.0, f64::max);
        pad_range(union, margin, Scale::Linear)
    }

    /// Whether x tick labels are drawn for axes `idx`
    pub(crate) fn shows_xticklabels(&self, idx: usize) -> bool {
        !self.share_x || idx / self.cols == self.rows - 1
    }

    /// Assign every axes a position that leaves room for its ticks and labels
    pub fn tight_layout(&mut self, style: &Style) {
        let rects = self.layout(style);
        for (axes, rect) in self.axes.iter_mut().zip(rects) {
            axes.position = Some(rect);
        }
    }

    /// Grid positions in figure fractions, one per axes
    pub(crate) fn layout(&self, style: &Style) -> Vec<Rect> {
        let (w, h) = (self.width as f64, self.height as f64);
        let label_px = (style.font_size() * PX_PER_PT) as f64;
        let tick_px = label_px * render::TICK_FONT_SCALE as f64;
        let text = style.has_text();

        // Space needed left of, right of and below a panel
        let mut left = 8.0_f64;
        let mut right = 8.0_f64;
        let mut bottom = 8.0_f64;
        for (idx, axes) in self.axes.iter().enumerate() {
            let mut need_left = TICK_LEN + 4.0;
            if axes.colorbar.is_none() && text {
                if !axes.hide_yticklabels {
                    let widest = axes
                        .yticks(axes.resolved_ylim())
                        .iter()
                        .map(|(_, s)| render::text_width(style, s, tick_px as f32))
                        .fold(0.0, f64::max);
                    need_left += widest + 4.0;
                }
                if axes.ylabel.is_some() {
                    need_left += label_px * 1.3;
                }
            }
            left = left.max(need_left);

            if let Some(bar) = &axes.colorbar {
                let widest = if text {
                    axis_ticks((bar.vmin, bar.vmax), Scale::Linear, 6)
                        .iter()
                        .map(|(_, s)| render::text_width(style, s, tick_px as f32))
                        .fold(0.0, f64::max)
                } else {
                    0.0
                };
                right = right.max(TICK_LEN + widest + 10.0);
            }

            let mut need_bottom = TICK_LEN + 4.0;
            if text && self.shows_xticklabels(idx) && axes.colorbar.is_none() {
                need_bottom += tick_px * 1.3;
                if axes.xlabel.is_some() {
                    need_bottom += label_px * 1.4;
                }
            }
            bottom = bottom.max(need_bottom);
        }
        let top = if text { label_px * 0.8 } else { 8.0 };

        let wspace = left + right.min(16.0);
        let hspace = if self.share_x { label_px * 0.8 } else { bottom + top };

        let avail_w = (w - left - right - wspace * (self.cols - 1) as f64).max(1.0);
        let avail_h = (h - top - bottom - hspace * (self.rows - 1) as f64).max(1.0);
        let ratio_sum: f64 = self.width_ratios.iter().sum();
        let cell_h = avail_h / self.rows as f64;

        let mut rects = Vec::with_capacity(self.axes.len());
        for row in 0..self.rows {
            let mut x = left;
            for col in 0..self.cols {
                let cell_w = avail_w * self.width_ratios[col] / ratio_sum;
                let y_top = top + row as f64 * (cell_h + hspace);
                rects.push(Rect::new(
                    x / w,
                    1.0 - (y_top + cell_h) / h,
                    cell_w / w,
                    cell_h / h,
                ));
                x += cell_w + wspace;
            }
        }
        rects
    }

    /// Draw the figure onto a white canvas
    pub fn render(&self, style: &Style) -> RgbImage {
        let rects = self.layout(style);
        let mut canvas = render::Canvas::new(self.width, self.height, style);
        for (idx, axes) in self.axes.iter().enumerate() {
            let rect = axes.position.unwrap_or(rects[idx]);
            let view = render::AxesView {
                rect,
                xlim: self.xlim_of(idx),
                ylim: axes.resolved_ylim(),
                xticklabels: self.shows_xticklabels(idx),
            };
            canvas.draw_axes(axes, &view);
        }
        canvas.into_image()
    }
}

impl Index<usize> for Figure {
    type Output = Axes;

    fn index(&self, idx: usize) -> &Axes {
        &self.axes[idx]
    }
}

impl IndexMut<usize> for Figure {
    fn index_mut(&mut self, idx: usize) -> &mut Axes {
        &mut self.axes[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_rect_points_round_trip() {
        let rect = Rect::new(0.1, 0.2, 0.3, 0.4);
        let mut pts = rect.points();
        assert!((pts[1][0] - 0.4).abs() < 1e-12);
        assert!((pts[1][1] - 0.6).abs() < 1e-12);
        pts[0][1] = 0.1;
        pts[1][1] = 0.95;
        let moved = Rect::from_points(pts);
        assert!((moved.bottom - 0.1).abs() < 1e-12);
        assert!((moved.height - 0.85).abs() < 1e-12);
        assert!((moved.left - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_plot_rejects_length_mismatch() {
        let mut fig = Figure::new(100, 100);
        assert!(matches!(
            fig[0].plot(&[1.0, 2.0], &[1.0]),
            Err(PlotError::SeriesLength { x: 2, y: 1 })
        ));
    }

    #[test]
    fn test_autoscale_margins() {
        let mut fig = Figure::new(100, 100);
        fig[0].plot(&[0.0, 10.0], &[-1.0, 1.0]).unwrap();
        let (lo, hi) = fig[0].resolved_xlim();
        assert!((lo + 0.5).abs() < 1e-12 && (hi - 10.5).abs() < 1e-12);
        fig[0].set_margins(0.0, 0.05);
        assert_eq!(fig[0].resolved_xlim(), (0.0, 10.0));
        let (lo, hi) = fig[0].resolved_ylim();
        assert!((lo + 1.1).abs() < 1e-12 && (hi - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_log_autoscale_ignores_nonpositive() {
        let mut fig = Figure::new(100, 100);
        fig[0].semilogy(&[0.0, 1.0, 2.0], &[0.0, 1.0, 100.0]).unwrap();
        fig[0].set_margins(0.0, 0.0);
        let (lo, hi) = fig[0].resolved_ylim();
        assert!((lo - 1.0).abs() < 1e-9);
        assert!((hi - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_image_limits_flip_y() {
        let mut fig = Figure::new(100, 100);
        fig[0].imshow(&GrayImage::from_pixel(8, 4, Luma([3])), Colormap::Gray);
        assert_eq!(fig[0].resolved_xlim(), (-0.5, 7.5));
        assert_eq!(fig[0].resolved_ylim(), (3.5, -0.5));
    }

    #[test]
    fn test_colorbar_requires_image() {
        let mut fig = Figure::subplots(1, 2, (4.0, 2.0));
        assert!(matches!(fig.colorbar(0, 1), Err(PlotError::NoMappable(0))));
        assert!(matches!(fig.colorbar(5, 1), Err(PlotError::NoAxes(5))));

        let img = GrayImage::from_fn(4, 4, |x, _| Luma([x as u8 * 20 + 10]));
        fig[0].imshow(&img, Colormap::Gray);
        fig.colorbar(0, 1).unwrap();
        let bar = fig[1].colorbar.unwrap();
        assert_eq!((bar.vmin, bar.vmax), (10.0, 70.0));
    }

    #[test]
    fn test_shared_x_union() {
        let mut fig = Figure::subplots(2, 1, (4.0, 4.0)).with_shared_x();
        fig[0].plot(&[0.0, 5.0], &[1.0, 1.0]).unwrap();
        fig[1].plot(&[-5.0, 10.0], &[1.0, 1.0]).unwrap();
        fig[0].set_margins(0.0, 0.0);
        fig[1].set_margins(0.0, 0.0);
        assert_eq!(fig.xlim_of(0), (-5.0, 10.0));
        assert_eq!(fig.xlim_of(1), (-5.0, 10.0));
        assert!(!fig.shows_xticklabels(0));
        assert!(fig.shows_xticklabels(1));
    }

    #[test]
    fn test_layout_respects_width_ratios() {
        let mut fig = Figure::subplots(1, 3, (10.0, 4.0)).with_width_ratios(&[1.0, 1.0, 0.1]);
        fig.tight_layout(&Style::plain());
        let widths: Vec<f64> = fig.axes().iter().map(|a| a.position().unwrap().width).collect();
        assert!((widths[0] - widths[1]).abs() < 1e-12);
        assert!((widths[0] / widths[2] - 10.0).abs() < 1e-9);
        for axes in fig.axes() {
            let [[x0, y0], [x1, y1]] = axes.position().unwrap().points();
            assert!(x0 >= 0.0 && y0 >= 0.0 && x1 <= 1.0 && y1 <= 1.0);
        }
    }

    #[test]
    fn test_render_size() {
        let mut fig = Figure::subplots(1, 2, (3.0, 2.0));
        fig[0].plot(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        let img = fig.render(&Style::plain());
        assert_eq!(img.dimensions(), (300, 200));
    }
}
