//! Centre logo overlay.
//!
//! The overlay covers encoded modules; symbols carrying it are encoded at
//! ECC level H so they stay scannable.

use ab_glyph::FontArc;
use image::{Rgba, RgbaImage};
use tiny_skia::Pixmap;

use crate::paint::{self, shaded, solid};
use crate::render::{Geometry, LogoMode};
use crate::theme::Theme;

const BACKING: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Backing disc radius as a fraction of the logo size.
pub const BACKING_RADIUS: f32 = 0.56;

/// Uploaded bitmap side as a fraction of the logo size.
pub const IMAGE_SCALE: f32 = 0.82;

/// Logo size in pixels: a percentage of the matrix's painted width.
pub fn logo_size_px(geometry: &Geometry, percent: u8) -> f32 {
    geometry.modules as f32 * geometry.cell * f32::from(percent.min(100)) / 100.0
}

pub fn overlay_visible(mode: LogoMode, has_bitmap: bool) -> bool {
    match mode {
        LogoMode::None => false,
        LogoMode::Badge => true,
        LogoMode::Upload => has_bitmap,
    }
}

#[derive(Clone, Copy)]
pub struct Overlay<'a> {
    pub mode: LogoMode,
    pub percent: u8,
    pub bitmap: Option<&'a Pixmap>,
    pub badge_text: &'a str,
    pub font: Option<&'a FontArc>,
}

impl Overlay<'_> {
    fn size(&self, geometry: &Geometry) -> Option<f32> {
        let size = logo_size_px(geometry, self.percent);
        (overlay_visible(self.mode, self.bitmap.is_some()) && size >= 1.0).then_some(size)
    }

    fn shows_text(&self) -> bool {
        self.mode == LogoMode::Badge && self.font.is_some() && !self.badge_text.is_empty()
    }
}

/// Paints the backing disc and either the uploaded bitmap or, for a badge
/// with nothing to write, an emblem disc. Returns whether anything was drawn.
pub fn paint_logo(
    pixmap: &mut Pixmap,
    geometry: &Geometry,
    theme: &Theme,
    overlay: &Overlay<'_>,
) -> bool {
    let Some(size) = overlay.size(geometry) else {
        return false;
    };

    let c = geometry.side / 2.0;
    let radius = BACKING_RADIUS * size;
    paint::fill_circle(pixmap, c, c, radius, &solid(BACKING));
    paint::stroke_circle(pixmap, c, c, radius, (size * 0.03).max(1.5), theme.edge_color);

    match (overlay.mode, overlay.bitmap) {
        (LogoMode::Upload, Some(bitmap)) => {
            let side = IMAGE_SCALE * size;
            let pattern = paint::cover_pattern(bitmap, c - side / 2.0, c - side / 2.0, side);
            paint::fill_circle(pixmap, c, c, side / 2.0, &shaded(pattern));
        }
        _ if !overlay.shows_text() => {
            paint::fill_circle(pixmap, c, c, 0.3 * size, &solid(theme.dark_color));
        }
        _ => {}
    }
    true
}

/// Writes the badge text over an already painted backing disc.
pub fn paint_badge_text(
    img: &mut RgbaImage,
    geometry: &Geometry,
    theme: &Theme,
    overlay: &Overlay<'_>,
) {
    let (Some(size), Some(font)) = (overlay.size(geometry), overlay.font) else {
        return;
    };
    if overlay.shows_text() {
        let c = geometry.side / 2.0;
        let text = overlay.badge_text;
        paint::draw_text_centered(img, font, text, c, c, size * 0.32, theme.dark_color);
    }
}
