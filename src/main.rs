mod args;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use go_stone_qr::assets::{self, AssetLoader, TextureCache};
use go_stone_qr::export::{encode_png, suggested_file_name, to_data_uri};
use go_stone_qr::render::RenderConfig;
use go_stone_qr::state::RenderController;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.size == 0 {
        return Err(anyhow::anyhow!("Size must be positive"));
    }

    let config = RenderConfig {
        style: args.style.into(),
        board: args.board.into(),
        logo_mode: args.logo_mode.into(),
        logo_size_percent: args.logo_size,
        canvas_size: args.size,
        badge_text: args.badge_text.clone(),
    };
    let texture_spec = config.style.theme().textures;
    let mut controller = RenderController::new(config);

    // Start every load up front; all of them finish before the first render.
    let loader = AssetLoader::new(&args.textures);
    let textures = texture_spec.map(|spec| {
        let loader = loader.clone();
        tokio::spawn(async move { loader.load_textures(&spec).await })
    });
    let logo = args.logo.clone().map(|path| tokio::spawn(assets::load_logo(path)));
    let font = args.font.clone().map(|path| tokio::spawn(assets::load_font(path)));

    if let Some(handle) = textures {
        controller.set_textures(TextureCache::from(handle.await?));
    }
    if let Some(handle) = logo {
        match handle.await? {
            Ok(image) => controller.upload_logo(Some(image)),
            Err(e) => controller.logo_load_failed(&e),
        }
    }
    if let Some(handle) = font {
        match handle.await? {
            Ok(font) => controller.set_font(Some(font)),
            Err(e) => tracing::warn!(error = %e, "Font unavailable, keeping the bundled font"),
        }
    }

    let submitted = controller.submit_url(&args.url);
    println!("{}", controller.status());
    submitted?;

    let cfg = controller.config();
    if args.data_uri {
        println!("{}", to_data_uri(controller.surface())?);
        return Ok(());
    }

    let output = args
        .output
        .unwrap_or_else(|| suggested_file_name(cfg.style, cfg.board).into());
    let png = encode_png(controller.surface())?;
    tokio::fs::write(&output, png)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Saved to: {}", output.display());
    Ok(())
}
