//! Figure rendering for the demos
//!
//! A small matplotlib-like layer: a [`Figure`] holds a grid of [`Axes`],
//! each with line series, an image or a colorbar. Rendering produces an
//! `RgbImage`; [`Style::show_data`] writes it to disk.

mod colormap;
mod figure;
mod render;
mod style;
mod ticks;

pub use colormap::{Colormap, COLOR_CYCLE};
pub use figure::{
    Axes, ColorbarLayer, Figure, ImageLayer, Line, LineStyle, Rect, Scale, TextLabel, DPI,
    PX_PER_PT,
};
pub use style::{Style, FONT_ENV};
pub use ticks::{linear_ticks, log_ticks};
