//! Image colour mapping and the line colour cycle

use image::Rgb;

/// Colour map applied to scalar image data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    #[default]
    Gray,
}

impl Colormap {
    /// Colour for a value already normalised to `[0, 1]`
    pub fn color(&self, t: f64) -> Rgb<u8> {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Colormap::Gray => {
                let v = (t * 255.0).round() as u8;
                Rgb([v, v, v])
            }
        }
    }

    /// Colour for `value` on the scale `[vmin, vmax]`
    pub fn map(&self, value: f64, vmin: f64, vmax: f64) -> Rgb<u8> {
        let span = vmax - vmin;
        let t = if span.abs() > f64::EPSILON {
            (value - vmin) / span
        } else {
            0.0
        };
        self.color(t)
    }
}

/// Default line colours, cycled per axes
pub const COLOR_CYCLE: [Rgb<u8>; 6] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
    Rgb([148, 103, 189]),
    Rgb([140, 86, 75]),
];

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const GRID_GRAY: Rgb<u8> = Rgb([204, 204, 204]);
