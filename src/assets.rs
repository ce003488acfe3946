//! Asynchronous loading of stone textures, the uploaded logo and the badge font.

use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use image::RgbaImage;

use crate::error::AssetError;
use crate::stone::StoneTextures;
use crate::theme::TextureSpec;

#[derive(Clone, Debug, Default)]
pub enum TextureCache {
    /// Not requested yet, or still loading. Renders paint flat stones meanwhile.
    #[default]
    Pending,
    Ready(StoneTextures),
    Failed,
}

impl TextureCache {
    pub fn textures(&self) -> Option<&StoneTextures> {
        match self {
            TextureCache::Ready(textures) => Some(textures),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TextureCache::Failed)
    }
}

impl From<Result<StoneTextures, AssetError>> for TextureCache {
    fn from(result: Result<StoneTextures, AssetError>) -> Self {
        match result {
            Ok(textures) if textures.is_usable() => TextureCache::Ready(textures),
            Ok(_) => TextureCache::Failed,
            Err(e) => {
                tracing::warn!(error = %e, "Stone textures unavailable, using flat stones");
                TextureCache::Failed
            }
        }
    }
}

/// Reads and decodes an image file off the async runtime's worker threads.
pub async fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage, AssetError> {
    let path = path.as_ref().to_path_buf();
    let bytes = tokio::fs::read(&path).await.map_err(|source| AssetError::Read {
        path: path.clone(),
        source,
    })?;

    let image = tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes)
            .map(|img| img.to_rgba8())
            .map_err(|source| AssetError::Decode { path, source })
    })
    .await??;

    Ok(image)
}

pub async fn load_logo(path: impl AsRef<Path>) -> Result<RgbaImage, AssetError> {
    let logo = load_image(path.as_ref()).await?;
    tracing::info!(
        path = %path.as_ref().display(),
        width = logo.width(),
        height = logo.height(),
        "Loaded logo"
    );
    Ok(logo)
}

const DEFAULT_FONT_BYTES: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

/// The bundled DejaVu Sans Bold, used for badge and placeholder text unless
/// another font is loaded.
pub fn default_font() -> Option<FontArc> {
    FontArc::try_from_slice(DEFAULT_FONT_BYTES).ok()
}

pub async fn load_font(path: impl AsRef<Path>) -> Result<FontArc, AssetError> {
    let path = path.as_ref().to_path_buf();
    let bytes = tokio::fs::read(&path).await.map_err(|source| AssetError::Read {
        path: path.clone(),
        source,
    })?;
    FontArc::try_from_vec(bytes).map_err(|_| AssetError::Font(path))
}

#[derive(Clone, Debug)]
pub struct AssetLoader {
    texture_dir: PathBuf,
}

impl AssetLoader {
    pub fn new(texture_dir: impl Into<PathBuf>) -> Self {
        Self {
            texture_dir: texture_dir.into(),
        }
    }

    pub fn texture_dir(&self) -> &Path {
        &self.texture_dir
    }

    /// Loads every texture named by `spec`; all files load concurrently and
    /// any single failure fails the whole set.
    pub async fn load_textures(&self, spec: &TextureSpec) -> Result<StoneTextures, AssetError> {
        let dark = tokio::spawn(load_image(self.texture_dir.join(spec.dark_stone)));
        let light: Vec<_> = spec
            .light_stone_variants
            .iter()
            .map(|name| tokio::spawn(load_image(self.texture_dir.join(name))))
            .collect();

        let dark = dark.await??;
        let mut variants = Vec::with_capacity(light.len());
        for handle in light {
            variants.push(handle.await??);
        }

        tracing::info!(
            dir = %self.texture_dir.display(),
            variants = variants.len(),
            "Loaded stone textures"
        );

        Ok(StoneTextures {
            dark,
            light: variants,
        })
    }
}
