//! Render QR codes as Go stones on a wooden board.
//!
//! A URL is encoded with [`qr::encode`], then [`render::render`] paints the
//! board, one stone per module and an optional centre logo onto an RGBA
//! surface. [`state::RenderController`] ties these together and keeps the
//! last matrix so that style changes re-render without re-encoding.
//!
//! ```no_run
//! use go_stone_qr::render::RenderConfig;
//! use go_stone_qr::state::RenderController;
//!
//! let mut controller = RenderController::new(RenderConfig::default());
//! controller.submit_url("example.com").unwrap();
//! let png = go_stone_qr::export::encode_png(controller.surface()).unwrap();
//! ```

pub mod assets;
pub mod board;
pub mod error;
pub mod export;
pub mod logo;
pub mod paint;
pub mod qr;
pub mod render;
pub mod state;
pub mod stone;
pub mod theme;

pub use error::{AssetError, EncodeError, ExportError, RenderError, UrlError};
pub use qr::{encode, EccLevel, QrMatrix};
pub use render::{render, LogoMode, RenderConfig};
pub use state::{normalize_url, RenderController, Status};
