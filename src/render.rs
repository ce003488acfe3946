//! Stylised rasterisation of a QR matrix onto a square surface.

use ab_glyph::FontArc;
use image::{Rgba, RgbaImage};
use tiny_skia::Pixmap;

use crate::board::paint_board;
use crate::logo::{paint_badge_text, paint_logo, Overlay};
use crate::paint::{self, image_to_pixmap, pixmap_to_rgba_image};
use crate::qr::{CellKind, EccLevel, QrMatrix};
use crate::stone::{self, StoneTextures, VariantPicker};
use crate::theme::{BoardStyle, StoneStyle};

/// Blank margin around the matrix, in modules, on every side.
pub const QUIET_ZONE: usize = 4;

pub const DEFAULT_CANVAS_SIZE: u32 = 1024;
pub const DEFAULT_LOGO_PERCENT: u8 = 22;
pub const DEFAULT_BADGE_TEXT: &str = "QR";
pub const PLACEHOLDER_TEXT: &str = "Enter a link to generate QR";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LogoMode {
    #[default]
    None,
    Badge,
    Upload,
}

impl LogoMode {
    pub fn ecc_level(self) -> EccLevel {
        EccLevel::for_logo(self != LogoMode::None)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub style: StoneStyle,
    pub board: BoardStyle,
    pub logo_mode: LogoMode,
    /// Logo size as a percentage of the matrix width, `0..=100`.
    pub logo_size_percent: u8,
    pub canvas_size: u32,
    pub badge_text: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: StoneStyle::default(),
            board: BoardStyle::default(),
            logo_mode: LogoMode::default(),
            logo_size_percent: DEFAULT_LOGO_PERCENT,
            canvas_size: DEFAULT_CANVAS_SIZE,
            badge_text: DEFAULT_BADGE_TEXT.to_string(),
        }
    }
}

impl RenderConfig {
    pub fn with_logo_size(mut self, percent: u8) -> Self {
        self.logo_size_percent = percent.min(100);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub side: f32,
    pub modules: usize,
    pub cell: f32,
}

impl Geometry {
    pub fn new(side: u32, modules: usize) -> Self {
        let total = modules + 2 * QUIET_ZONE;
        Self {
            side: side as f32,
            modules,
            cell: side as f32 / total as f32,
        }
    }

    pub fn total_cells(&self) -> usize {
        self.modules + 2 * QUIET_ZONE
    }

    /// Top-left pixel of module `(row, col)`.
    pub fn cell_origin(&self, row: usize, col: usize) -> (f32, f32) {
        (
            (col + QUIET_ZONE) as f32 * self.cell,
            (row + QUIET_ZONE) as f32 * self.cell,
        )
    }

    pub fn cell_center(&self, row: usize, col: usize) -> (f32, f32) {
        let (x, y) = self.cell_origin(row, col);
        (x + self.cell / 2.0, y + self.cell / 2.0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderAssets<'a> {
    /// `None` when textures are pending or failed; textured styles then paint flat.
    pub textures: Option<&'a StoneTextures>,
    pub logo: Option<&'a RgbaImage>,
    pub font: Option<&'a FontArc>,
}

/// Paints `matrix` onto `surface`, replacing its previous content.
pub fn render<P: VariantPicker + ?Sized>(
    surface: &mut RgbaImage,
    matrix: &QrMatrix,
    config: &RenderConfig,
    assets: RenderAssets<'_>,
    picker: &mut P,
) {
    let theme = config.style.theme();
    let board = config.board.theme();
    let geometry = Geometry::new(surface.width(), matrix.width());

    let Some(mut pixmap) = Pixmap::new(surface.width(), surface.height()) else {
        tracing::warn!(width = surface.width(), "Surface has no area, nothing rendered");
        return;
    };

    // Texture mode is decided once for the whole surface.
    let textures = match (theme.textures, assets.textures) {
        (Some(_), Some(textures)) => textures.to_pixmaps(),
        _ => None,
    };
    let logo = assets.logo.and_then(image_to_pixmap);

    tracing::debug!(
        width = matrix.width(),
        cell = geometry.cell,
        style = config.style.name(),
        board = config.board.name(),
        textured = textures.is_some(),
        "Rendering"
    );

    paint_board(&mut pixmap, &board, &geometry);

    for ((row, col), cell) in matrix.cells().indexed_iter() {
        let is_dark = cell.is_dark;
        match (cell.kind, &textures) {
            (CellKind::Finder, _) => {
                stone::paint_finder_cell(&mut pixmap, &geometry, row, col, is_dark, &theme)
            }
            (CellKind::Stone, Some(textures)) => stone::paint_textured_stone(
                &mut pixmap,
                &geometry,
                row,
                col,
                is_dark,
                &theme,
                textures,
                &mut *picker,
            ),
            (CellKind::Stone, None) => {
                stone::paint_flat_stone(&mut pixmap, &geometry, row, col, is_dark, &theme)
            }
        }
    }

    let overlay = Overlay {
        mode: config.logo_mode,
        percent: config.logo_size_percent,
        bitmap: logo.as_ref(),
        badge_text: &config.badge_text,
        font: assets.font,
    };
    paint_logo(&mut pixmap, &geometry, &theme, &overlay);

    *surface = pixmap_to_rgba_image(&pixmap);
    paint_badge_text(surface, &geometry, &theme, &overlay);
}

pub fn render_placeholder(surface: &mut RgbaImage, font: Option<&FontArc>) {
    surface.pixels_mut().for_each(|p| *p = Rgba([255, 255, 255, 255]));
    if let Some(font) = font {
        let c = surface.width() as f32 / 2.0;
        let size = (surface.width() as f32 / 24.0).max(8.0);
        paint::draw_text_centered(
            surface,
            font,
            PLACEHOLDER_TEXT,
            c,
            surface.height() as f32 / 2.0,
            size,
            Rgba([0x2c, 0x2c, 0x2c, 255]),
        );
    }
}
