// src/core/visualization/render.rs
//
// Rasterisation of axes onto an RGB canvas using imageproc primitives

use ab_glyph::PxScale;
use image::{imageops, GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut, text_size,
};
use imageproc::rect::Rect as PixelRect;

use super::colormap::{BLACK, COLOR_CYCLE, GRID_GRAY, WHITE};
use super::figure::{axis_ticks, Axes, LineStyle, Rect, Scale, PX_PER_PT};
use super::style::Style;

/// Tick labels are drawn this much smaller than axis labels
pub(crate) const TICK_FONT_SCALE: f32 = 0.85;

const TICK_LEN: f64 = 5.0;
const DASH_ON: f64 = 3.7;
const DASH_OFF: f64 = 1.6;

/// Width of `text` in pixels at `size_px`
pub(crate) fn text_width(style: &Style, text: &str, size_px: f32) -> f64 {
    match style.font() {
        Some(font) => text_size(PxScale::from(size_px), font, text).0 as f64,
        None => text.chars().count() as f64 * size_px as f64 * 0.6,
    }
}

/// Where an axes sits and what data range it shows
pub(crate) struct AxesView {
    pub rect: Rect,
    pub xlim: (f64, f64),
    /// (bottom, top)
    pub ylim: (f64, f64),
    pub xticklabels: bool,
}

/// Data to pixel mapping for one panel
#[derive(Debug, Clone, Copy)]
struct Frame {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    xlim: (f64, f64),
    ylim: (f64, f64),
    ylog: bool,
}

impl Frame {
    fn ymap(&self, y: f64) -> f64 {
        if self.ylog {
            y.log10()
        } else {
            y
        }
    }

    fn px_x(&self, x: f64) -> f64 {
        let f = (x - self.xlim.0) / (self.xlim.1 - self.xlim.0);
        self.x0 + f * (self.x1 - self.x0)
    }

    fn px_y(&self, y: f64) -> f64 {
        let (lo, hi) = (self.ymap(self.ylim.0), self.ymap(self.ylim.1));
        let f = (self.ymap(y) - lo) / (hi - lo);
        self.y1 - f * (self.y1 - self.y0)
    }

    /// Pixel position of a data point, `None` when it cannot be drawn
    fn to_px(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() || (self.ylog && y <= 0.0) {
            return None;
        }
        Some((self.px_x(x), self.px_y(y)))
    }

    /// Data coordinates of a pixel position (inverse of `to_px`, linear only)
    fn to_data(&self, px: f64, py: f64) -> (f64, f64) {
        let fx = (px - self.x0) / (self.x1 - self.x0);
        let fy = (self.y1 - py) / (self.y1 - self.y0);
        (
            self.xlim.0 + fx * (self.xlim.1 - self.xlim.0),
            self.ylim.0 + fy * (self.ylim.1 - self.ylim.0),
        )
    }

    fn contains_x(&self, px: f64) -> bool {
        px >= self.x0 - 0.5 && px <= self.x1 + 0.5
    }

    fn contains_y(&self, py: f64) -> bool {
        py >= self.y0 - 0.5 && py <= self.y1 + 0.5
    }

    /// Shrink to the data aspect ratio so one data unit is square, centred
    fn equal_aspect(mut self) -> Self {
        let dw = (self.xlim.1 - self.xlim.0).abs();
        let dh = (self.ylim.1 - self.ylim.0).abs();
        if dw <= 0.0 || dh <= 0.0 {
            return self;
        }
        let (w, h) = (self.x1 - self.x0, self.y1 - self.y0);
        let scale = (w / dw).min(h / dh);
        let (nw, nh) = (dw * scale, dh * scale);
        self.x0 += (w - nw) / 2.0;
        self.x1 = self.x0 + nw;
        self.y0 += (h - nh) / 2.0;
        self.y1 = self.y0 + nh;
        self
    }
}

/// Walks a dash pattern across consecutive segments
struct Dasher {
    on: f64,
    off: f64,
    pos: f64,
    drawing: bool,
}

impl Dasher {
    fn new(width_pt: f32) -> Self {
        let scale = (width_pt * PX_PER_PT) as f64;
        Self {
            on: DASH_ON * scale,
            off: DASH_OFF * scale,
            pos: 0.0,
            drawing: true,
        }
    }

    /// Visible pieces of the segment `a -> b`
    fn split(&mut self, a: (f64, f64), b: (f64, f64)) -> Vec<((f64, f64), (f64, f64))> {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len = (dx * dx + dy * dy).sqrt();
        let mut pieces = Vec::new();
        if len == 0.0 {
            return pieces;
        }
        let mut t = 0.0;
        while t < len {
            let period = if self.drawing { self.on } else { self.off };
            let step = (period - self.pos).min(len - t);
            if self.drawing {
                let p = (a.0 + dx * t / len, a.1 + dy * t / len);
                let q = (a.0 + dx * (t + step) / len, a.1 + dy * (t + step) / len);
                pieces.push((p, q));
            }
            t += step;
            self.pos += step;
            if self.pos >= period {
                self.pos = 0.0;
                self.drawing = !self.drawing;
            }
        }
        pieces
    }
}

/// Liang-Barsky clipping of `a -> b` to the frame box
fn clip_segment(a: (f64, f64), b: (f64, f64), f: &Frame) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let checks = [
        (-dx, a.0 - f.x0),
        (dx, f.x1 - a.0),
        (-dy, a.1 - f.y0),
        (dy, f.y1 - a.1),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
    }
    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}

pub(crate) struct Canvas<'a> {
    img: RgbImage,
    style: &'a Style,
}

impl<'a> Canvas<'a> {
    pub fn new(width: u32, height: u32, style: &'a Style) -> Self {
        Self {
            img: RgbImage::from_pixel(width.max(1), height.max(1), WHITE),
            style,
        }
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }

    fn label_px(&self) -> f32 {
        self.style.font_size() * PX_PER_PT
    }

    fn tick_px(&self) -> f32 {
        self.label_px() * TICK_FONT_SCALE
    }

    pub fn draw_axes(&mut self, axes: &Axes, view: &AxesView) {
        let (x0, y0, x1, y1) = view.rect.to_pixels(self.img.width(), self.img.height());
        let mut frame = Frame {
            x0,
            y0,
            x1,
            y1,
            xlim: view.xlim,
            ylim: view.ylim,
            ylog: axes.yscale == Scale::Log && axes.image.is_none() && axes.colorbar.is_none(),
        };
        if axes.image.is_some() {
            frame = frame.equal_aspect();
        }

        if axes.image.is_some() {
            self.draw_image(axes, &frame);
        }
        if axes.colorbar.is_some() {
            self.draw_colorbar_gradient(axes, &frame);
        }
        for (i, line) in axes.lines.iter().enumerate() {
            let color = COLOR_CYCLE[i % COLOR_CYCLE.len()];
            self.draw_line(line.x.as_slice(), line.y.as_slice(), line.width, line.style, color, &frame);
        }

        self.draw_spines(&frame);
        if axes.colorbar.is_some() {
            self.draw_colorbar_ticks(&frame);
        } else {
            let left_extent = self.draw_ticks(axes, view, &frame);
            self.draw_axis_labels(axes, view, &frame, left_extent);
        }

        for text in &axes.texts {
            if let Some((px, py)) = frame.to_px(text.x, text.y) {
                let size = text.size.unwrap_or(self.style.font_size()) * PX_PER_PT;
                let h = size as f64;
                self.text(px, py - h, &text.text, size, BLACK);
            }
        }

        if axes.legend {
            self.draw_legend(axes, &frame);
        }
    }

    fn draw_image(&mut self, axes: &Axes, f: &Frame) {
        let Some(layer) = &axes.image else { return };
        let (w, h) = (layer.image.width() as i64, layer.image.height() as i64);
        let (px0, px1) = (f.x0.round() as i64, f.x1.round() as i64);
        let (py0, py1) = (f.y0.round() as i64, f.y1.round() as i64);

        for py in py0.max(0)..py1.min(self.img.height() as i64) {
            for px in px0.max(0)..px1.min(self.img.width() as i64) {
                let (dx, dy) = f.to_data(px as f64 + 0.5, py as f64 + 0.5);
                // Pixel (col, row) covers [col - 0.5, col + 0.5)
                let col = (dx + 0.5).floor() as i64;
                let row = (dy + 0.5).floor() as i64;
                if col < 0 || row < 0 || col >= w || row >= h {
                    continue;
                }
                let value = layer.image.get_pixel(col as u32, row as u32)[0] as f64;
                let color = layer.colormap.map(value, layer.vmin, layer.vmax);
                self.img.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    fn draw_colorbar_gradient(&mut self, axes: &Axes, f: &Frame) {
        let Some(bar) = &axes.colorbar else { return };
        let (px0, px1) = (f.x0.round() as i64, f.x1.round() as i64);
        let (py0, py1) = (f.y0.round() as i64, f.y1.round() as i64);
        for py in py0.max(0)..py1.min(self.img.height() as i64) {
            let (_, value) = f.to_data(f.x0, py as f64 + 0.5);
            let color = bar.colormap.map(value, bar.vmin, bar.vmax);
            for px in px0.max(0)..px1.min(self.img.width() as i64) {
                self.img.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    fn draw_line(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        width_pt: f32,
        style: LineStyle,
        color: Rgb<u8>,
        f: &Frame,
    ) {
        let width_px = ((width_pt * PX_PER_PT).round() as i32).max(1);
        let mut dasher = Dasher::new(width_pt);
        let points: Vec<Option<(f64, f64)>> = xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| f.to_px(x, y))
            .collect();

        for pair in points.windows(2) {
            let (Some(a), Some(b)) = (pair[0], pair[1]) else { continue };
            let Some((a, b)) = clip_segment(a, b, f) else { continue };
            match style {
                LineStyle::Solid => self.thick_segment(a, b, width_px, color),
                LineStyle::Dashed => {
                    for (p, q) in dasher.split(a, b) {
                        self.thick_segment(p, q, width_px, color);
                    }
                }
            }
        }
    }

    fn thick_segment(&mut self, a: (f64, f64), b: (f64, f64), width: i32, color: Rgb<u8>) {
        let horizontal = (b.0 - a.0).abs() >= (b.1 - a.1).abs();
        for k in 0..width {
            let offset = k as f64 - (width - 1) as f64 / 2.0;
            let (ox, oy) = if horizontal { (0.0, offset) } else { (offset, 0.0) };
            draw_line_segment_mut(
                &mut self.img,
                ((a.0 + ox) as f32, (a.1 + oy) as f32),
                ((b.0 + ox) as f32, (b.1 + oy) as f32),
                color,
            );
        }
    }

    fn draw_spines(&mut self, f: &Frame) {
        let (x0, y0) = (f.x0.round() as i32, f.y0.round() as i32);
        let w = (f.x1 - f.x0).round().max(1.0) as u32;
        let h = (f.y1 - f.y0).round().max(1.0) as u32;
        draw_hollow_rect_mut(&mut self.img, PixelRect::at(x0, y0).of_size(w + 1, h + 1), BLACK);
    }

    /// Draws x and y ticks; returns how far left of the frame the y tick labels reach
    fn draw_ticks(&mut self, axes: &Axes, view: &AxesView, f: &Frame) -> f64 {
        let target = ((f.x1 - f.x0) / 80.0).clamp(2.0, 8.0) as usize;
        let tick_px = self.tick_px();

        for (value, label) in axis_ticks(view.xlim, Scale::Linear, target) {
            let px = f.px_x(value);
            if !f.contains_x(px) {
                continue;
            }
            self.segment((px, f.y1), (px, f.y1 + TICK_LEN), BLACK);
            if view.xticklabels {
                let w = text_width(self.style, &label, tick_px);
                self.text(px - w / 2.0, f.y1 + TICK_LEN + 2.0, &label, tick_px, BLACK);
            }
        }

        let mut widest = 0.0_f64;
        for (value, label) in axes.yticks(view.ylim) {
            let py = f.px_y(value);
            if !f.contains_y(py) {
                continue;
            }
            self.segment((f.x0 - TICK_LEN, py), (f.x0, py), BLACK);
            if !axes.hide_yticklabels {
                let w = text_width(self.style, &label, tick_px);
                widest = widest.max(w);
                self.text(
                    f.x0 - TICK_LEN - 3.0 - w,
                    py - tick_px as f64 * 0.6,
                    &label,
                    tick_px,
                    BLACK,
                );
            }
        }
        TICK_LEN + 3.0 + widest
    }

    fn draw_axis_labels(&mut self, axes: &Axes, view: &AxesView, f: &Frame, left_extent: f64) {
        let label_px = self.label_px();
        if let Some(xlabel) = &axes.xlabel {
            if view.xticklabels {
                let w = text_width(self.style, xlabel, label_px);
                let y = f.y1 + TICK_LEN + 4.0 + self.tick_px() as f64 * 1.2;
                self.text((f.x0 + f.x1) / 2.0 - w / 2.0, y, xlabel, label_px, BLACK);
            }
        }
        if let Some(ylabel) = &axes.ylabel {
            let x = f.x0 - left_extent - 4.0 - label_px as f64 * 1.2;
            self.vertical_text(x, (f.y0 + f.y1) / 2.0, ylabel, label_px, BLACK);
        }
    }

    fn draw_colorbar_ticks(&mut self, f: &Frame) {
        let tick_px = self.tick_px();
        let target = ((f.y1 - f.y0) / 60.0).clamp(2.0, 8.0) as usize;
        for (value, label) in axis_ticks(f.ylim, Scale::Linear, target) {
            let py = f.px_y(value);
            if !f.contains_y(py) {
                continue;
            }
            self.segment((f.x1, py), (f.x1 + TICK_LEN, py), BLACK);
            self.text(f.x1 + TICK_LEN + 3.0, py - tick_px as f64 * 0.6, &label, tick_px, BLACK);
        }
    }

    fn draw_legend(&mut self, axes: &Axes, f: &Frame) {
        let entries: Vec<(usize, &str)> = axes
            .lines
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.label.as_deref().map(|s| (i, s)))
            .collect();
        if entries.is_empty() {
            return;
        }

        let size = self.tick_px();
        let row_h = size as f64 * 1.4;
        let sample_w = 28.0;
        let text_w = entries
            .iter()
            .map(|(_, s)| text_width(self.style, s, size))
            .fold(0.0, f64::max);
        let box_w = 8.0 + sample_w + 6.0 + text_w + 8.0;
        let box_h = 6.0 + row_h * entries.len() as f64 + 4.0;
        let bx = f.x1 - box_w - 8.0;
        let by = f.y0 + 8.0;

        draw_filled_rect_mut(
            &mut self.img,
            PixelRect::at(bx as i32, by as i32).of_size(box_w as u32, box_h as u32),
            WHITE,
        );
        draw_hollow_rect_mut(
            &mut self.img,
            PixelRect::at(bx as i32, by as i32).of_size(box_w as u32, box_h as u32),
            GRID_GRAY,
        );

        for (row, (i, label)) in entries.into_iter().enumerate() {
            let line = &axes.lines[i];
            let color = COLOR_CYCLE[i % COLOR_CYCLE.len()];
            let cy = by + 6.0 + row_h * (row as f64 + 0.5);
            let width_px = ((line.width * PX_PER_PT).round() as i32).max(1);
            let (a, b) = ((bx + 8.0, cy), (bx + 8.0 + sample_w, cy));
            match line.style {
                LineStyle::Solid => self.thick_segment(a, b, width_px, color),
                LineStyle::Dashed => {
                    let mut dasher = Dasher::new(line.width);
                    for (p, q) in dasher.split(a, b) {
                        self.thick_segment(p, q, width_px, color);
                    }
                }
            }
            self.text(bx + 8.0 + sample_w + 6.0, cy - size as f64 * 0.6, label, size, BLACK);
        }
    }

    fn segment(&mut self, a: (f64, f64), b: (f64, f64), color: Rgb<u8>) {
        draw_line_segment_mut(&mut self.img, (a.0 as f32, a.1 as f32), (b.0 as f32, b.1 as f32), color);
    }

    /// Horizontal text with its top-left corner at `(x, y)`; no-op without a font
    fn text(&mut self, x: f64, y: f64, text: &str, size_px: f32, color: Rgb<u8>) {
        if let Some(font) = self.style.font() {
            draw_text_mut(
                &mut self.img,
                color,
                x.round() as i32,
                y.round() as i32,
                PxScale::from(size_px),
                font,
                text,
            );
        }
    }

    /// Text rotated 90 degrees counter-clockwise, centred vertically on `cy`
    fn vertical_text(&mut self, x: f64, cy: f64, text: &str, size_px: f32, color: Rgb<u8>) {
        let Some(font) = self.style.font() else { return };
        let scale = PxScale::from(size_px);
        let (w, h) = text_size(scale, font, text);
        let mut mask = GrayImage::new(w.max(1) + 2, h.max(1) + 2);
        draw_text_mut(&mut mask, Luma([255u8]), 1, 1, scale, font, text);
        let rotated = imageops::rotate270(&mask);

        let ox = x.round() as i64;
        let oy = (cy - rotated.height() as f64 / 2.0).round() as i64;
        for (mx, my, coverage) in rotated.enumerate_pixels() {
            let alpha = coverage[0] as f64 / 255.0;
            if alpha == 0.0 {
                continue;
            }
            let (px, py) = (ox + mx as i64, oy + my as i64);
            if px < 0 || py < 0 || px >= self.img.width() as i64 || py >= self.img.height() as i64 {
                continue;
            }
            let bg = *self.img.get_pixel(px as u32, py as u32);
            let blended = Rgb([0, 1, 2].map(|c| {
                (bg[c] as f64 * (1.0 - alpha) + color[c] as f64 * alpha).round() as u8
            }));
            self.img.put_pixel(px as u32, py as u32, blended);
        }
    }
}
