//! PNG export of the painted surface.

use std::io::Cursor;

use base64::Engine;
use image::{ImageFormat, RgbaImage};

use crate::error::ExportError;
use crate::theme::{BoardStyle, StoneStyle};

pub fn encode_png(surface: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Cursor::new(Vec::new());
    surface.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// `data:image/png;base64,...` form of the surface.
pub fn to_data_uri(surface: &RgbaImage) -> Result<String, ExportError> {
    let png = encode_png(surface)?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    ))
}

/// Download name: `go-stone-qr-<style>.png`, with `-<board>` appended for
/// anything but the default board.
pub fn suggested_file_name(style: StoneStyle, board: BoardStyle) -> String {
    if board == BoardStyle::default() {
        format!("go-stone-qr-{}.png", style.name())
    } else {
        format!("go-stone-qr-{}-{}.png", style.name(), board.name())
    }
}
