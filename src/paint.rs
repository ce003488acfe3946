//! Drawing helpers over `tiny_skia::Pixmap`, plus text on the exported image.
//!
//! Degenerate shapes (zero radius, empty rects) are skipped.

use ab_glyph::{FontArc, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use imageproc::pixelops::interpolate;
use tiny_skia::{
    Color, FillRule, FilterQuality, GradientStop, IntSize, LineCap, LinearGradient, Paint, Path,
    PathBuilder, Pattern, Pixmap, Point, RadialGradient, Rect, Shader, SpreadMode, Stroke,
    Transform,
};

pub fn lerp_color(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    interpolate(b, a, t.clamp(0.0, 1.0))
}

pub fn with_alpha(color: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let a = (color[3] as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
    Rgba([color[0], color[1], color[2], a])
}

pub fn skia_color(color: Rgba<u8>) -> Color {
    Color::from_rgba8(color[0], color[1], color[2], color[3])
}

pub fn solid(color: Rgba<u8>) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

pub fn shaded(shader: Shader<'_>) -> Paint<'_> {
    Paint {
        shader,
        anti_alias: true,
        ..Paint::default()
    }
}

pub fn fill_rect(pixmap: &mut Pixmap, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
    if let Some(rect) = Rect::from_xywh(x, y, w, h) {
        pixmap.fill_rect(rect, &solid(color), Transform::identity(), None);
    }
}

/// Fills the whole pixmap with a top-to-bottom gradient.
pub fn fill_vertical_gradient(pixmap: &mut Pixmap, top: Rgba<u8>, bottom: Rgba<u8>) {
    let (w, h) = (pixmap.width() as f32, pixmap.height() as f32);
    let shader = LinearGradient::new(
        Point::from_xy(0.0, 0.0),
        Point::from_xy(0.0, h),
        vec![
            GradientStop::new(0.0, skia_color(top)),
            GradientStop::new(1.0, skia_color(bottom)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    );
    match (shader, Rect::from_xywh(0.0, 0.0, w, h)) {
        (Some(shader), Some(rect)) => {
            pixmap.fill_rect(rect, &shaded(shader), Transform::identity(), None)
        }
        _ => pixmap.fill(skia_color(top)),
    }
}

pub fn fill_circle(pixmap: &mut Pixmap, cx: f32, cy: f32, r: f32, paint: &Paint<'_>) {
    if let Some(path) = PathBuilder::from_circle(cx, cy, r) {
        pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn stroke(pixmap: &mut Pixmap, path: &Path, width: f32, color: Rgba<u8>) {
    let stroke = Stroke {
        width,
        line_cap: LineCap::Round,
        ..Stroke::default()
    };
    pixmap.stroke_path(path, &solid(color), &stroke, Transform::identity(), None);
}

pub fn stroke_circle(pixmap: &mut Pixmap, cx: f32, cy: f32, r: f32, width: f32, color: Rgba<u8>) {
    if let Some(path) = PathBuilder::from_circle(cx, cy, r) {
        stroke(pixmap, &path, width, color);
    }
}

pub fn stroke_segment(
    pixmap: &mut Pixmap,
    from: (f32, f32),
    to: (f32, f32),
    width: f32,
    color: Rgba<u8>,
) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.0, from.1);
    pb.line_to(to.0, to.1);
    if let Some(path) = pb.finish() {
        stroke(pixmap, &path, width, color);
    }
}

/// Arc from `start` to `end` radians (clockwise in image space) as cubic
/// segments of at most a quarter turn.
pub fn arc_path(cx: f32, cy: f32, r: f32, start: f32, end: f32) -> Option<Path> {
    let sweep = end - start;
    let segments = (sweep.abs() / std::f32::consts::FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / segments as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let mut pb = PathBuilder::new();
    pb.move_to(cx + r * start.cos(), cy + r * start.sin());
    for i in 0..segments {
        let a0 = start + step * i as f32;
        let a1 = a0 + step;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        pb.cubic_to(
            cx + r * (c0 - k * s0),
            cy + r * (s0 + k * c0),
            cx + r * (c1 + k * s1),
            cy + r * (s1 - k * c1),
            cx + r * c1,
            cy + r * s1,
        );
    }
    pb.finish()
}

#[allow(clippy::too_many_arguments)]
pub fn stroke_arc(
    pixmap: &mut Pixmap,
    cx: f32,
    cy: f32,
    r: f32,
    start: f32,
    end: f32,
    width: f32,
    color: Rgba<u8>,
) {
    if let Some(path) = arc_path(cx, cy, r, start, end) {
        stroke(pixmap, &path, width, color);
    }
}

/// Radial gradient around `center`; `stops` are `(offset, colour)` pairs.
pub fn radial_gradient(
    center: (f32, f32),
    radius: f32,
    stops: &[(f32, Rgba<u8>)],
) -> Option<Shader<'static>> {
    let point = Point::from_xy(center.0, center.1);
    RadialGradient::new(
        point,
        point,
        radius,
        stops
            .iter()
            .map(|&(offset, color)| GradientStop::new(offset, skia_color(color)))
            .collect(),
        SpreadMode::Pad,
        Transform::identity(),
    )
}

/// Shader drawing `source` to cover the square at `(x, y)` of side `side`,
/// cropping the longer axis.
pub fn cover_pattern(source: &Pixmap, x: f32, y: f32, side: f32) -> Shader<'_> {
    let (w, h) = (source.width() as f32, source.height() as f32);
    let scale = side / w.min(h);
    let tx = x + (side - w * scale) / 2.0;
    let ty = y + (side - h * scale) / 2.0;
    Pattern::new(
        source.as_ref(),
        SpreadMode::Pad,
        FilterQuality::Bilinear,
        1.0,
        Transform::from_row(scale, 0.0, 0.0, scale, tx, ty),
    )
}

/// Copies an image into a premultiplied pixmap. `None` for an empty image.
pub fn image_to_pixmap(img: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(img.width(), img.height())?;
    let mut bytes = img.as_raw().clone();
    for pixel in bytes.chunks_exact_mut(4) {
        let alpha = pixel[3] as u16;
        pixel[0] = ((pixel[0] as u16 * alpha + 127) / 255) as u8;
        pixel[1] = ((pixel[1] as u16 * alpha + 127) / 255) as u8;
        pixel[2] = ((pixel[2] as u16 * alpha + 127) / 255) as u8;
    }
    Pixmap::from_vec(bytes, size)
}

pub fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

pub fn draw_text_centered(
    img: &mut RgbaImage,
    font: &FontArc,
    text: &str,
    cx: f32,
    cy: f32,
    size: f32,
    color: Rgba<u8>,
) {
    let scale = PxScale::from(size);
    let (w, h) = text_size(scale, font, text);
    let x = (cx - w as f32 / 2.0).round() as i32;
    let y = (cy - h as f32 / 2.0).round() as i32;
    draw_text_mut(img, color, x, y, scale, font, text);
}

#[cfg(test)]
pub(crate) fn assert_near(actual: Rgba<u8>, expected: Rgba<u8>) {
    let close = actual
        .0
        .iter()
        .zip(expected.0.iter())
        .all(|(a, e)| (*a as i16 - *e as i16).abs() <= 3);
    assert!(close, "expected ~{expected:?}, got {actual:?}");
}
