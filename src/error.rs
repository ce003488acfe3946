use std::path::PathBuf;

use crate::qr::EccLevel;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Cannot encode empty text")]
    Empty,

    #[error("Text of {len} bytes does not fit a version 40 symbol at ECC level {level:?}")]
    DataTooLong { len: usize, level: EccLevel },

    #[error("QR encoder error: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("Module grid has the wrong shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    #[error("URL is empty")]
    Empty,

    #[error("Not a valid URL: {input}")]
    Invalid {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid font file {0}")]
    Font(PathBuf),

    #[error("Asset loader task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Url(#[from] UrlError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
