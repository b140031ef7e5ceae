// src/core/visualization/style.rs
//
// Shared figure styling: font loading, font size and save-and-report.
// A font is an optional enhancement. Without one, figures are still drawn,
// only without any text.

use ab_glyph::FontArc;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use super::figure::Figure;
use crate::error::PlotError;

/// Environment variable naming a TTF/OTF file to use for figure text
pub const FONT_ENV: &str = "SAPFIGURES_FONT";

const DEFAULT_FONT_SIZE: f32 = 12.0;

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font and size used when rendering figures
#[derive(Clone)]
pub struct Style {
    font: Option<FontArc>,
    font_size: f32,
}

impl std::fmt::Debug for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Style")
            .field("has_font", &self.font.is_some())
            .field("font_size", &self.font_size)
            .finish()
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::plain()
    }
}

impl Style {
    /// Style without a font: figures carry no text
    pub fn plain() -> Self {
        Self {
            font: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn with_font(font: FontArc) -> Self {
        Self {
            font: Some(font),
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Try the explicit path (`--font` or `SAPFIGURES_FONT`), then common
    /// system fonts. Falls back to [`Style::plain`] with a warning.
    pub fn load(hint: Option<&Path>) -> Self {
        let candidates = hint
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));
        Self::from_candidates(candidates)
    }

    /// Style with the first loadable font among `candidates`
    fn from_candidates(candidates: impl IntoIterator<Item = PathBuf>) -> Self {
        for path in candidates {
            match load_font(&path) {
                Some(font) => {
                    debug!("Using font {}", path.display());
                    return Self::with_font(font);
                }
                None => debug!("No usable font at {}", path.display()),
            }
        }

        warn!(
            "No usable font found (set --font or {}), rendering figures without text",
            FONT_ENV
        );
        Self::plain()
    }

    /// Set the base font size in points for subsequent figures
    pub fn set_fonts(&mut self, size: f32) {
        self.font_size = size;
    }

    pub fn font(&self) -> Option<&FontArc> {
        self.font.as_ref()
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn has_text(&self) -> bool {
        self.font.is_some()
    }

    /// Render `figure` and write it to `out_file`; the extension picks the format
    pub fn show_data(&self, figure: &Figure, out_file: &Path) -> Result<PathBuf, PlotError> {
        if let Some(parent) = out_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let img = figure.render(self);
        img.save(out_file)?;
        info!("Image saved to {}", out_file.display());
        Ok(out_file.to_path_buf())
    }
}

fn load_font(path: &Path) -> Option<FontArc> {
    let bytes = std::fs::read(path).ok()?;
    FontArc::try_from_vec(bytes).ok()
}
