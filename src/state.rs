//! Render state and the controller that owns it.
//!
//! The controller is the only writer of [`RenderState`]. Every operation
//! either completes (state, surface and status consistent) or rejects and
//! leaves the previous state in place.

use std::fmt;
use std::sync::Arc;

use ab_glyph::FontArc;
use image::RgbaImage;
use url::Url;

use crate::assets::{default_font, TextureCache};
use crate::error::{AssetError, EncodeError, RenderError, UrlError};
use crate::qr::{encode, QrMatrix};
use crate::render::{render, render_placeholder, LogoMode, RenderAssets, RenderConfig};
use crate::stone::{RandomPicker, VariantPicker};
use crate::theme::{BoardStyle, StoneStyle};

/// Keeps absolute URLs (canonicalised) and prefixes anything else with `https://`.
pub fn normalize_url(raw: &str) -> Result<String, UrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    match Url::parse(trimmed) {
        Ok(url) => Ok(String::from(url)),
        Err(_) => Url::parse(&format!("https://{trimmed}"))
            .map(String::from)
            .map_err(|source| UrlError::Invalid {
                input: trimmed.to_string(),
                source,
            }),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    EnterLink,
    Generated { url: String },
    InvalidUrl,
    NeedsUpload,
    TextureLoadFailed,
    LogoLoadFailed,
    TooLong,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::EnterLink => write!(f, "Enter a link to generate a QR code."),
            Status::Generated { url } => write!(f, "QR code ready for {url}"),
            Status::InvalidUrl => write!(f, "Please enter a valid URL."),
            Status::NeedsUpload => write!(f, "Upload a logo image to place it in the centre."),
            Status::TextureLoadFailed => {
                write!(f, "Stone textures failed to load; using flat stones.")
            }
            Status::LogoLoadFailed => write!(f, "The logo image could not be loaded."),
            Status::TooLong => write!(f, "That link is too long to fit in a QR code."),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderState {
    pub last_url: String,
    pub last_matrix: Option<Arc<QrMatrix>>,
    pub logo: Option<RgbaImage>,
    /// Set once a texture load fails; textured styles then paint flat.
    pub degraded: bool,
}

impl RenderState {
    pub fn is_ready(&self) -> bool {
        self.last_matrix.is_some()
    }

    fn clear(&mut self) {
        self.last_url.clear();
        self.last_matrix = None;
    }
}

pub struct RenderController<P = RandomPicker> {
    config: RenderConfig,
    state: RenderState,
    textures: TextureCache,
    font: Option<FontArc>,
    surface: RgbaImage,
    status: Status,
    picker: P,
}

impl RenderController<RandomPicker> {
    pub fn new(config: RenderConfig) -> Self {
        Self::with_picker(config, RandomPicker)
    }
}

impl<P: VariantPicker> RenderController<P> {
    pub fn with_picker(config: RenderConfig, picker: P) -> Self {
        let font = default_font();
        let mut surface = RgbaImage::new(config.canvas_size, config.canvas_size);
        render_placeholder(&mut surface, font.as_ref());
        Self {
            config,
            state: RenderState::default(),
            textures: TextureCache::default(),
            font,
            surface,
            status: Status::EnterLink,
            picker,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    pub fn matrix(&self) -> Option<&Arc<QrMatrix>> {
        self.state.last_matrix.as_ref()
    }

    /// Invalid input resets to the empty state; input too long to encode keeps
    /// the previous matrix and surface.
    pub fn submit_url(&mut self, raw: &str) -> Result<(), RenderError> {
        let url = match normalize_url(raw) {
            Ok(url) => url,
            Err(e) => {
                tracing::info!(input = raw, "Rejected URL");
                self.state.clear();
                render_placeholder(&mut self.surface, self.font.as_ref());
                self.status = Status::InvalidUrl;
                return Err(e.into());
            }
        };

        let level = self.config.logo_mode.ecc_level();
        let reusable = self
            .state
            .last_matrix
            .as_ref()
            .filter(|m| self.state.last_url == url && m.ecc_level() == level)
            .cloned();

        let matrix = match reusable {
            Some(matrix) => matrix,
            None => Arc::new(self.encode_url(&url)?),
        };

        tracing::info!(%url, width = matrix.width(), "Accepted URL");
        self.state.last_url = url;
        self.state.last_matrix = Some(matrix);
        self.redraw();
        Ok(())
    }

    pub fn change_style(&mut self, style: StoneStyle) {
        self.config.style = style;
        self.redraw();
    }

    pub fn change_board(&mut self, board: BoardStyle) {
        self.config.board = board;
        self.redraw();
    }

    pub fn change_logo_size(&mut self, percent: u8) {
        self.config.logo_size_percent = percent.min(100);
        self.redraw();
    }

    /// Switches the logo mode, re-encoding only if the ECC level changes.
    pub fn change_logo_mode(&mut self, mode: LogoMode) -> Result<(), RenderError> {
        let needs_encode = self
            .state
            .last_matrix
            .as_ref()
            .is_some_and(|m| m.ecc_level() != mode.ecc_level());

        if needs_encode {
            let previous = std::mem::replace(&mut self.config.logo_mode, mode);
            let url = self.state.last_url.clone();
            match self.encode_url(&url) {
                Ok(matrix) => self.state.last_matrix = Some(Arc::new(matrix)),
                Err(e) => {
                    self.config.logo_mode = previous;
                    return Err(e.into());
                }
            }
        } else {
            self.config.logo_mode = mode;
        }

        self.redraw();
        if mode == LogoMode::Upload && self.state.logo.is_none() {
            self.status = Status::NeedsUpload;
        }
        Ok(())
    }

    pub fn upload_logo(&mut self, logo: Option<RgbaImage>) {
        self.state.logo = logo;
        self.redraw();
    }

    /// Records a failed logo load: the logo is dropped and the status says why.
    pub fn logo_load_failed(&mut self, error: &AssetError) {
        tracing::warn!(%error, "Logo load failed");
        self.state.logo = None;
        self.redraw();
        self.status = Status::LogoLoadFailed;
    }

    pub fn set_textures(&mut self, textures: TextureCache) {
        if textures.is_failed() {
            self.mark_degraded();
        }
        self.textures = textures;
        self.redraw();
    }

    pub fn set_font(&mut self, font: Option<FontArc>) {
        self.font = font;
        if !self.state.is_ready() {
            render_placeholder(&mut self.surface, self.font.as_ref());
        }
    }

    /// Forces flat stones for every subsequent render.
    pub fn mark_degraded(&mut self) {
        if !self.state.degraded {
            tracing::warn!("Entering degraded mode");
        }
        self.state.degraded = true;
    }

    fn encode_url(&mut self, url: &str) -> Result<QrMatrix, EncodeError> {
        let level = self.config.logo_mode.ecc_level();
        encode(url, level).inspect_err(|e| {
            tracing::warn!(error = %e, "Encoding failed");
            self.status = Status::TooLong;
        })
    }

    fn redraw(&mut self) {
        let Some(matrix) = self.state.last_matrix.clone() else {
            return;
        };

        let textured_style = self.config.style.theme().textures.is_some();
        let textures = if self.state.degraded {
            None
        } else {
            self.textures.textures()
        };

        let side = self.config.canvas_size;
        let mut surface = RgbaImage::new(side, side);
        let assets = RenderAssets {
            textures,
            logo: self.state.logo.as_ref(),
            font: self.font.as_ref(),
        };
        render(&mut surface, &matrix, &self.config, assets, &mut self.picker);
        self.surface = surface;

        self.status = if self.config.logo_mode == LogoMode::Upload && self.state.logo.is_none() {
            Status::NeedsUpload
        } else if textured_style && self.state.degraded {
            Status::TextureLoadFailed
        } else {
            Status::Generated {
                url: self.state.last_url.clone(),
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::assert_near;
    use crate::qr::EccLevel;
    use crate::stone::StoneTextures;
    use image::Rgba;

    fn controller() -> RenderController {
        RenderController::new(RenderConfig {
            canvas_size: 200,
            ..RenderConfig::default()
        })
    }

    #[test]
    fn normalize_adds_scheme() {
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com/");
        assert_eq!(normalize_url("  example.com/path  ").unwrap(), "https://example.com/path");
    }

    #[test]
    fn normalize_keeps_absolute_urls() {
        assert_eq!(normalize_url("https://a.b/c").unwrap(), "https://a.b/c");
        assert_eq!(normalize_url("http://example.com").unwrap(), "http://example.com/");
    }

    #[test]
    fn normalize_rejects_empty_and_garbage() {
        assert!(matches!(normalize_url(""), Err(UrlError::Empty)));
        assert!(matches!(normalize_url("   "), Err(UrlError::Empty)));
        assert!(matches!(normalize_url("not a url"), Err(UrlError::Invalid { .. })));
    }

    #[test]
    fn starts_empty() {
        let c = controller();
        assert!(!c.state().is_ready());
        assert_eq!(c.status(), &Status::EnterLink);
        assert_eq!(c.surface().dimensions(), (200, 200));
    }

    #[test]
    fn valid_url_becomes_ready() {
        let mut c = controller();
        c.submit_url("example.com").unwrap();
        assert!(c.state().is_ready());
        assert_eq!(c.state().last_url, "https://example.com/");
        assert_eq!(
            c.status(),
            &Status::Generated {
                url: "https://example.com/".into()
            }
        );
        assert_eq!(c.matrix().unwrap().ecc_level(), EccLevel::M);
    }

    #[test]
    fn invalid_url_resets_to_empty() {
        let mut c = controller();
        c.submit_url("example.com").unwrap();
        assert!(c.submit_url("not a url").is_err());
        assert!(!c.state().is_ready());
        assert!(c.state().last_url.is_empty());
        assert_eq!(c.status(), &Status::InvalidUrl);
    }

    #[test]
    fn oversized_url_keeps_previous_state() {
        let mut c = controller();
        c.change_logo_mode(LogoMode::Badge).unwrap();
        c.submit_url("example.com").unwrap();
        let before = c.matrix().cloned().unwrap();

        let long = format!("https://example.com/{}", "a".repeat(3000));
        let err = c.submit_url(&long).unwrap_err();
        assert!(matches!(err, RenderError::Encode(EncodeError::DataTooLong { .. })));
        assert_eq!(c.status(), &Status::TooLong);
        assert!(Arc::ptr_eq(c.matrix().unwrap(), &before));
        assert_eq!(c.state().last_url, "https://example.com/");
    }

    #[test]
    fn resubmitting_same_url_reuses_matrix() {
        let mut c = controller();
        c.submit_url("example.com").unwrap();
        let first = c.matrix().cloned().unwrap();
        c.submit_url("https://example.com/").unwrap();
        assert!(Arc::ptr_eq(c.matrix().unwrap(), &first));
    }

    #[test]
    fn board_and_style_changes_keep_matrix() {
        let mut c = controller();
        c.submit_url("example.com").unwrap();
        let first = c.matrix().cloned().unwrap();
        let before = c.surface().clone();

        c.change_board(BoardStyle::Plain);
        assert!(Arc::ptr_eq(c.matrix().unwrap(), &first));
        assert_ne!(c.surface(), &before);

        c.change_style(StoneStyle::Jade);
        c.change_logo_size(40);
        assert!(Arc::ptr_eq(c.matrix().unwrap(), &first));
    }

    #[test]
    fn changes_while_empty_do_not_render() {
        let mut c = controller();
        let before = c.surface().clone();
        c.change_board(BoardStyle::Bamboo);
        c.change_style(StoneStyle::Slate);
        assert!(!c.state().is_ready());
        assert_eq!(c.surface(), &before);
        assert_eq!(c.config().board, BoardStyle::Bamboo);
    }

    #[test]
    fn upload_mode_without_logo_needs_upload() {
        let mut c = controller();
        c.submit_url("example.com").unwrap();
        c.change_logo_mode(LogoMode::Upload).unwrap();

        assert_eq!(c.status(), &Status::NeedsUpload);
        let matrix = c.matrix().cloned().unwrap();
        assert_eq!(matrix.ecc_level(), EccLevel::H);

        // Identical to the same matrix rendered with no overlay at all.
        let config = RenderConfig {
            logo_mode: LogoMode::None,
            ..c.config().clone()
        };
        let mut expected = RgbaImage::new(200, 200);
        render(&mut expected, &matrix, &config, RenderAssets::default(), &mut RandomPicker);
        assert_eq!(c.surface(), &expected);
    }

    #[test]
    fn switching_between_logo_modes_with_same_level_keeps_matrix() {
        let mut c = controller();
        c.submit_url("example.com").unwrap();
        c.change_logo_mode(LogoMode::Badge).unwrap();
        let h = c.matrix().cloned().unwrap();
        c.change_logo_mode(LogoMode::Upload).unwrap();
        assert!(Arc::ptr_eq(c.matrix().unwrap(), &h));

        c.change_logo_mode(LogoMode::None).unwrap();
        assert_eq!(c.matrix().unwrap().ecc_level(), EccLevel::M);
    }

    #[test]
    fn uploaded_logo_is_drawn() {
        let mut c = controller();
        c.submit_url("example.com").unwrap();
        c.change_logo_mode(LogoMode::Upload).unwrap();
        c.upload_logo(Some(RgbaImage::from_pixel(8, 8, Rgba([0, 128, 255, 255]))));

        assert!(matches!(c.status(), Status::Generated { .. }));
        assert_near(*c.surface().get_pixel(100, 100), Rgba([0, 128, 255, 255]));

        c.upload_logo(None);
        assert_eq!(c.status(), &Status::NeedsUpload);
    }

    #[test]
    fn failed_logo_load_drops_logo() {
        let mut c = controller();
        c.submit_url("example.com").unwrap();
        c.change_logo_mode(LogoMode::Upload).unwrap();
        c.upload_logo(Some(RgbaImage::new(4, 4)));
        c.logo_load_failed(&AssetError::Font("x".into()));
        assert!(c.state().logo.is_none());
        assert_eq!(c.status(), &Status::LogoLoadFailed);
    }

    #[test]
    fn failed_textures_degrade_to_flat() {
        let mut c = controller();
        c.change_style(StoneStyle::Photo);
        c.submit_url("example.com").unwrap();
        let pending = c.surface().clone();

        c.set_textures(TextureCache::Failed);
        assert!(c.state().degraded);
        assert_eq!(c.status(), &Status::TextureLoadFailed);
        assert_eq!(c.surface(), &pending);
    }

    #[test]
    fn textures_arriving_later_repaint_current_matrix() {
        let mut c = controller();
        c.change_style(StoneStyle::Photo);
        c.submit_url("example.com").unwrap();
        let pending = c.surface().clone();
        let matrix = c.matrix().cloned().unwrap();

        c.set_textures(TextureCache::Ready(StoneTextures {
            dark: RgbaImage::from_pixel(4, 4, Rgba([200, 0, 0, 255])),
            light: vec![RgbaImage::from_pixel(4, 4, Rgba([0, 0, 200, 255]))],
        }));

        assert!(!c.state().degraded);
        assert!(Arc::ptr_eq(c.matrix().unwrap(), &matrix));
        assert_ne!(c.surface(), &pending);
        assert_eq!(
            c.status(),
            &Status::Generated {
                url: "https://example.com/".into()
            }
        );
    }

    #[test]
    fn controller_starts_with_bundled_font() {
        let c = controller();
        assert!(c.surface().pixels().any(|p| p[0] < 128));
    }

    #[test]
    fn degraded_mode_ignores_later_textures() {
        let mut c = controller();
        c.change_style(StoneStyle::Photo);
        c.submit_url("example.com").unwrap();
        c.mark_degraded();
        let flat = c.surface().clone();
        c.set_textures(TextureCache::Ready(StoneTextures {
            dark: RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255])),
            light: vec![RgbaImage::from_pixel(4, 4, Rgba([250, 250, 250, 255]))],
        }));
        assert_eq!(c.surface(), &flat);
    }

    #[test]
    fn status_messages_are_readable() {
        assert!(Status::InvalidUrl.to_string().contains("valid URL"));
        let ready = Status::Generated {
            url: "https://a.b/".into(),
        };
        assert!(ready.to_string().contains("https://a.b/"));
    }
}
