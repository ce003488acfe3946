use ndarray::Array2;
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use rayon::prelude::*;

use crate::error::EncodeError;

/// Side length of a finder pattern, in modules.
pub const FINDER_SIZE: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EccLevel {
    L,
    M,
    Q,
    H,
}

impl EccLevel {
    /// `H` when a centre logo may occlude modules, otherwise `M`.
    pub fn for_logo(has_logo: bool) -> Self {
        if has_logo {
            EccLevel::H
        } else {
            EccLevel::M
        }
    }
}

impl From<EccLevel> for EcLevel {
    fn from(v: EccLevel) -> Self {
        match v {
            EccLevel::L => EcLevel::L,
            EccLevel::M => EcLevel::M,
            EccLevel::Q => EcLevel::Q,
            EccLevel::H => EcLevel::H,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Finder,
    Stone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub is_dark: bool,
    pub kind: CellKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrMatrix {
    cells: Array2<Cell>,
    level: EccLevel,
}

impl QrMatrix {
    /// Number of modules along one side (`4 * version + 17`).
    pub fn width(&self) -> usize {
        self.cells.nrows()
    }

    pub fn version(&self) -> usize {
        (self.width() - 17) / 4
    }

    pub fn ecc_level(&self) -> EccLevel {
        self.level
    }

    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.cells[[row, col]].is_dark
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }
}

/// Top-left, top-right and bottom-left 7x7 corners of a `size`-wide symbol.
pub fn is_finder_position(row: usize, col: usize, size: usize) -> bool {
    let near_top = row < FINDER_SIZE;
    let near_left = col < FINDER_SIZE;
    let near_bottom = row + FINDER_SIZE >= size;
    let near_right = col + FINDER_SIZE >= size;

    (near_top && near_left) || (near_top && near_right) || (near_bottom && near_left)
}

/// Smallest version that fits `text` at `level`.
pub fn encode(text: &str, level: EccLevel) -> Result<QrMatrix, EncodeError> {
    if text.is_empty() {
        return Err(EncodeError::Empty);
    }

    let code = QrCode::with_error_correction_level(text, level.into()).map_err(|e| match e {
        QrError::DataTooLong => EncodeError::DataTooLong {
            len: text.len(),
            level,
        },
        other => EncodeError::Qr(other),
    })?;

    let colors = code.to_colors();
    let size = code.width();

    let flat_cells: Vec<Cell> = colors
        .par_iter()
        .enumerate()
        .map(|(i, color)| {
            let kind = if is_finder_position(i / size, i % size, size) {
                CellKind::Finder
            } else {
                CellKind::Stone
            };

            Cell {
                is_dark: *color == Color::Dark,
                kind,
            }
        })
        .collect();

    let cells = Array2::from_shape_vec((size, size), flat_cells)?;

    tracing::debug!(width = size, ?level, bytes = text.len(), "Encoded QR matrix");

    Ok(QrMatrix { cells, level })
}
