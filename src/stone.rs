//! Per-module painting: finder squares and stones.

use image::{Rgba, RgbaImage};
use rand::Rng;
use tiny_skia::Pixmap;

use crate::paint::{self, lerp_color, radial_gradient, shaded, solid, with_alpha};
use crate::render::Geometry;
use crate::theme::Theme;

/// Texture side as a fraction of the cell size.
pub const TEXTURE_SCALE: f32 = 0.88;

/// Source of light-stone texture indices.
pub trait VariantPicker {
    /// Returns an index in `0..count`; `count` is at least 1.
    fn pick(&mut self, count: usize) -> usize;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPicker;

impl VariantPicker for RandomPicker {
    fn pick(&mut self, count: usize) -> usize {
        rand::thread_rng().gen_range(0..count.max(1))
    }
}

#[derive(Clone, Debug)]
pub struct StoneTextures {
    pub dark: RgbaImage,
    pub light: Vec<RgbaImage>,
}

impl StoneTextures {
    pub fn is_usable(&self) -> bool {
        !self.light.is_empty()
    }

    /// Premultiplied copies for pattern fills. `None` if any texture is empty.
    pub fn to_pixmaps(&self) -> Option<TexturePixmaps> {
        if !self.is_usable() {
            return None;
        }
        Some(TexturePixmaps {
            dark: paint::image_to_pixmap(&self.dark)?,
            light: self
                .light
                .iter()
                .map(paint::image_to_pixmap)
                .collect::<Option<Vec<_>>>()?,
        })
    }
}

pub struct TexturePixmaps {
    dark: Pixmap,
    light: Vec<Pixmap>,
}

fn module_color(theme: &Theme, is_dark: bool) -> Rgba<u8> {
    if is_dark {
        theme.dark_color
    } else {
        theme.light_color
    }
}

pub fn paint_finder_cell(
    pixmap: &mut Pixmap,
    geometry: &Geometry,
    row: usize,
    col: usize,
    is_dark: bool,
    theme: &Theme,
) {
    let (x, y) = geometry.cell_origin(row, col);
    let cell = geometry.cell;
    paint::fill_rect(pixmap, x, y, cell, cell, module_color(theme, is_dark));
}

pub fn paint_flat_stone(
    pixmap: &mut Pixmap,
    geometry: &Geometry,
    row: usize,
    col: usize,
    is_dark: bool,
    theme: &Theme,
) {
    let (cx, cy) = geometry.cell_center(row, col);
    let cell = geometry.cell;
    let r = theme.stone_radius * cell;
    let color = module_color(theme, is_dark);

    let (highlight, edge) = if is_dark {
        (lerp_color(color, theme.highlight_color, 0.35), theme.edge_color)
    } else {
        (theme.highlight_color, lerp_color(color, theme.edge_color, 0.3))
    };
    let body = radial_gradient(
        (cx - 0.3 * r, cy - 0.35 * r),
        1.3 * r,
        &[(0.0, highlight), (0.45, color), (1.0, edge)],
    )
    .map_or_else(|| solid(color), shaded);
    paint::fill_circle(pixmap, cx, cy, r, &body);
    paint::stroke_circle(pixmap, cx, cy, r, (cell * 0.04).max(0.8), theme.ring_color);

    if is_dark && theme.has_veins {
        paint::stroke_arc(
            pixmap,
            cx,
            cy,
            0.55 * r,
            3.6,
            4.6,
            (cell * 0.025).max(0.6),
            with_alpha(theme.highlight_color, 0.25),
        );
    }
}

/// Paints a stone by filling its disc with a texture drawn at
/// [`TEXTURE_SCALE`] of the cell, then a gloss and an edge ring.
#[allow(clippy::too_many_arguments)]
pub fn paint_textured_stone<P: VariantPicker + ?Sized>(
    pixmap: &mut Pixmap,
    geometry: &Geometry,
    row: usize,
    col: usize,
    is_dark: bool,
    theme: &Theme,
    textures: &TexturePixmaps,
    picker: &mut P,
) {
    let (cx, cy) = geometry.cell_center(row, col);
    let cell = geometry.cell;
    let r = theme.stone_radius * cell;

    let texture = if is_dark {
        &textures.dark
    } else {
        let index = picker.pick(textures.light.len());
        &textures.light[index.min(textures.light.len() - 1)]
    };
    let side = cell * TEXTURE_SCALE;
    let pattern = paint::cover_pattern(texture, cx - side / 2.0, cy - side / 2.0, side);
    paint::fill_circle(pixmap, cx, cy, r, &shaded(pattern));

    let gloss = radial_gradient(
        (cx - 0.35 * r, cy - 0.4 * r),
        r,
        &[
            (0.0, with_alpha(theme.highlight_color, 0.45)),
            (1.0, with_alpha(theme.highlight_color, 0.0)),
        ],
    );
    if let Some(gloss) = gloss {
        paint::fill_circle(pixmap, cx, cy, r, &shaded(gloss));
    }
    paint::stroke_circle(pixmap, cx, cy, r, (cell * 0.03).max(0.6), theme.edge_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{assert_near, pixmap_to_rgba_image, skia_color};
    use crate::theme::StoneStyle;

    const BG: Rgba<u8> = Rgba([200, 160, 100, 255]);

    fn canvas() -> Pixmap {
        let mut pixmap = Pixmap::new(290, 290).unwrap();
        pixmap.fill(skia_color(BG));
        pixmap
    }

    #[test]
    fn random_picker_stays_in_range() {
        let mut picker = RandomPicker;
        for count in 1..6 {
            for _ in 0..200 {
                assert!(picker.pick(count) < count);
            }
        }
    }

    #[test]
    fn finder_cell_fills_entire_cell() {
        let g = Geometry::new(290, 21);
        let theme = StoneStyle::Classic.theme();
        let mut pixmap = canvas();
        paint_finder_cell(&mut pixmap, &g, 0, 0, true, &theme);
        let img = pixmap_to_rgba_image(&pixmap);
        // Cell (0, 0) spans pixels 40..50 on both axes.
        assert_near(*img.get_pixel(40, 40), theme.dark_color);
        assert_near(*img.get_pixel(49, 49), theme.dark_color);
        assert_eq!(*img.get_pixel(50, 50), BG);
    }

    #[test]
    fn flat_stone_leaves_cell_corners() {
        let g = Geometry::new(290, 21);
        let theme = StoneStyle::Slate.theme();
        let mut pixmap = canvas();
        paint_flat_stone(&mut pixmap, &g, 10, 10, false, &theme);
        let img = pixmap_to_rgba_image(&pixmap);
        let (x, y) = g.cell_origin(10, 10);
        assert_eq!(*img.get_pixel(x as u32, y as u32), BG);
        let (cx, cy) = g.cell_center(10, 10);
        assert_ne!(*img.get_pixel(cx as u32, cy as u32), BG);
    }

    #[test]
    fn dark_flat_stone_is_shaded_towards_its_edge() {
        let g = Geometry::new(580, 21);
        let theme = StoneStyle::Classic.theme();
        let mut pixmap = Pixmap::new(580, 580).unwrap();
        pixmap.fill(skia_color(BG));
        paint_flat_stone(&mut pixmap, &g, 10, 10, true, &theme);
        let img = pixmap_to_rgba_image(&pixmap);
        // Upper-left highlight is brighter than the lower-right body.
        let (cx, cy) = g.cell_center(10, 10);
        let lit = img.get_pixel((cx - 3.0) as u32, (cy - 3.0) as u32);
        let shade = img.get_pixel((cx + 5.0) as u32, (cy + 5.0) as u32);
        assert!(lit[0] as u16 + lit[1] as u16 > shade[0] as u16 + shade[1] as u16);
    }

    struct Fixed(usize);

    impl VariantPicker for Fixed {
        fn pick(&mut self, _count: usize) -> usize {
            self.0
        }
    }

    #[test]
    fn textured_light_stone_uses_picked_variant() {
        let g = Geometry::new(290, 21);
        let theme = StoneStyle::Photo.theme();
        let textures = StoneTextures {
            dark: RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])),
            light: vec![
                RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255])),
                RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255])),
            ],
        };
        let pixmaps = textures.to_pixmaps().unwrap();

        let mut pixmap = canvas();
        paint_textured_stone(&mut pixmap, &g, 10, 10, false, &theme, &pixmaps, &mut Fixed(1));
        let img = pixmap_to_rgba_image(&pixmap);
        // Just inside the right edge of the stone, past the gloss highlight.
        let (cx, cy) = g.cell_center(10, 10);
        let p = img.get_pixel((cx + 2.0) as u32, (cy + 2.0) as u32);
        assert!(p[2] > p[0], "expected the blue variant, got {p:?}");
        // The texture is clipped to the disc.
        let (x, y) = g.cell_origin(10, 10);
        assert_eq!(*img.get_pixel(x as u32, y as u32), BG);
    }

    #[test]
    fn unusable_textures_have_no_pixmaps() {
        let empty_light = StoneTextures {
            dark: RgbaImage::new(8, 8),
            light: Vec::new(),
        };
        assert!(empty_light.to_pixmaps().is_none());

        let empty_dark = StoneTextures {
            dark: RgbaImage::new(0, 0),
            light: vec![RgbaImage::new(8, 8)],
        };
        assert!(empty_dark.is_usable());
        assert!(empty_dark.to_pixmaps().is_none());
    }
}
