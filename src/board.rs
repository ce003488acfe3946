//! Board background: flat or wood-grain surface, grid lines and star points.

use tiny_skia::Pixmap;

use crate::paint::{self, skia_color, solid, with_alpha};
use crate::render::Geometry;
use crate::theme::BoardTheme;

/// Number of grain strokes across the board.
pub const GRAIN_STROKES: usize = 70;

/// Horizontal offset of the `i`-th grain stroke, in pixels.
pub fn grain_wobble(i: usize) -> f32 {
    (i as f32 * 0.85).sin() * 7.0
}

/// Module indices of the 3x3 star points, along either axis.
pub fn star_points(modules: usize) -> [usize; 3] {
    [3, (modules - 1) / 2, modules - 4]
}

pub fn paint_board(pixmap: &mut Pixmap, board: &BoardTheme, geometry: &Geometry) {
    if board.wood {
        paint_wood(pixmap, board, geometry.side);
        paint_grid(pixmap, board, geometry);
    } else {
        pixmap.fill(skia_color(board.background.0));
    }
    paint_border(pixmap, board, geometry);
}

fn paint_wood(pixmap: &mut Pixmap, board: &BoardTheme, side: f32) {
    let (top, bottom) = board.background;
    paint::fill_vertical_gradient(pixmap, top, bottom);

    let spacing = side / GRAIN_STROKES as f32;
    for i in 0..GRAIN_STROKES {
        let wobble = grain_wobble(i);
        let x = (i as f32 + 0.5) * spacing + wobble;
        let opacity = 0.08 + 0.05 * ((i * 7) % 5) as f32 / 4.0;
        let width = 1.0 + (i % 3) as f32 * 0.6;
        paint::stroke_segment(
            pixmap,
            (x, 0.0),
            (x - wobble * 0.6, side),
            width,
            with_alpha(board.grain_color, opacity),
        );
    }
}

fn paint_grid(pixmap: &mut Pixmap, board: &BoardTheme, geometry: &Geometry) {
    let n = geometry.modules;
    let (first, _) = geometry.cell_center(0, 0);
    let (last, _) = geometry.cell_center(0, n - 1);
    let line = with_alpha(board.line_color, 0.55);
    let width = (geometry.cell * 0.06).max(1.0);

    for k in 0..n {
        let (pos, _) = geometry.cell_center(0, k);
        paint::stroke_segment(pixmap, (pos, first), (pos, last), width, line);
        paint::stroke_segment(pixmap, (first, pos), (last, pos), width, line);
    }

    let radius = (geometry.cell * 0.14).max(1.5);
    let star = solid(board.star_point_color);
    for row in star_points(n) {
        for col in star_points(n) {
            let (x, y) = geometry.cell_center(row, col);
            paint::fill_circle(pixmap, x, y, radius, &star);
        }
    }
}

fn paint_border(pixmap: &mut Pixmap, board: &BoardTheme, geometry: &Geometry) {
    let side = geometry.side;
    let t = (geometry.cell * 0.3).max(2.0);
    let color = board.border_color;
    paint::fill_rect(pixmap, 0.0, 0.0, side, t, color);
    paint::fill_rect(pixmap, 0.0, side - t, side, t, color);
    paint::fill_rect(pixmap, 0.0, t, t, side - 2.0 * t, color);
    paint::fill_rect(pixmap, side - t, t, t, side - 2.0 * t, color);
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use super::*;
    use crate::paint::{assert_near, pixmap_to_rgba_image};
    use crate::theme::BoardStyle;

    fn geometry() -> Geometry {
        Geometry::new(290, 21)
    }

    fn painted(board: &BoardTheme) -> RgbaImage {
        let mut pixmap = Pixmap::new(290, 290).unwrap();
        paint_board(&mut pixmap, board, &geometry());
        pixmap_to_rgba_image(&pixmap)
    }

    #[test]
    fn star_indices() {
        assert_eq!(star_points(21), [3, 10, 17]);
        assert_eq!(star_points(25), [3, 12, 21]);
        assert_eq!(star_points(177), [3, 88, 173]);
    }

    #[test]
    fn wobble_formula() {
        assert_eq!(grain_wobble(0), 0.0);
        assert!((grain_wobble(1) - 0.85f32.sin() * 7.0).abs() < 1e-6);
        for i in 0..GRAIN_STROKES {
            assert!(grain_wobble(i).abs() <= 7.0);
        }
    }

    #[test]
    fn plain_board_is_flat() {
        let board = BoardStyle::Plain.theme();
        let img = painted(&board);
        assert_near(*img.get_pixel(145, 145), board.background.0);
        assert_near(*img.get_pixel(100, 190), board.background.0);
        assert_near(*img.get_pixel(0, 0), board.border_color);
    }

    #[test]
    fn wood_board_is_deterministic() {
        let board = BoardStyle::Kaya.theme();
        assert_eq!(painted(&board), painted(&board));
    }

    #[test]
    fn star_point_is_painted() {
        let board = BoardStyle::Kaya.theme();
        let img = painted(&board);
        let (x, y) = geometry().cell_center(3, 3);
        assert_near(*img.get_pixel(x as u32, y as u32), board.star_point_color);
    }

    #[test]
    fn grid_lines_cross_module_centres() {
        let board = BoardStyle::Shinkaya.theme();
        let img = painted(&board);
        let mut wood = Pixmap::new(290, 290).unwrap();
        paint_wood(&mut wood, &board, 290.0);
        let wood = pixmap_to_rgba_image(&wood);

        // Module (5, 5) spans 90..100 with its centre at 95.
        let (x, y) = geometry().cell_center(5, 5);
        let (x, y) = (x as u32, y as u32 + 3);
        assert_ne!(img.get_pixel(x, y), wood.get_pixel(x, y));
        assert_eq!(img.get_pixel(x - 5, y), wood.get_pixel(x - 5, y));
    }
}
