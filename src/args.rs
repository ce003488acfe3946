use clap::{Parser, ValueEnum};
use go_stone_qr::render::{LogoMode, DEFAULT_BADGE_TEXT, DEFAULT_CANVAS_SIZE};
use go_stone_qr::theme::{BoardStyle, StoneStyle};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
#[clap(rename_all = "lower")]
pub enum StyleArg {
    Classic,
    Yunzi,
    Slate,
    Jade,
    Photo,
}

impl From<StyleArg> for StoneStyle {
    fn from(v: StyleArg) -> Self {
        match v {
            StyleArg::Classic => StoneStyle::Classic,
            StyleArg::Yunzi => StoneStyle::Yunzi,
            StyleArg::Slate => StoneStyle::Slate,
            StyleArg::Jade => StoneStyle::Jade,
            StyleArg::Photo => StoneStyle::Photo,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[clap(rename_all = "lower")]
pub enum BoardArg {
    Kaya,
    Shinkaya,
    Bamboo,
    Plain,
}

impl From<BoardArg> for BoardStyle {
    fn from(v: BoardArg) -> Self {
        match v {
            BoardArg::Kaya => BoardStyle::Kaya,
            BoardArg::Shinkaya => BoardStyle::Shinkaya,
            BoardArg::Bamboo => BoardStyle::Bamboo,
            BoardArg::Plain => BoardStyle::Plain,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[clap(rename_all = "lower")]
pub enum LogoArg {
    None,
    Badge,
    Upload,
}

impl From<LogoArg> for LogoMode {
    fn from(v: LogoArg) -> Self {
        match v {
            LogoArg::None => LogoMode::None,
            LogoArg::Badge => LogoMode::Badge,
            LogoArg::Upload => LogoMode::Upload,
        }
    }
}

#[derive(Parser)]
#[command(name = "go-stone-qr")]
#[command(about = "Render a QR code as Go stones on a wooden board")]
pub struct Args {
    /// Link to encode; a missing scheme becomes https://
    #[arg(short, long)]
    pub url: String,

    /// Output PNG path (default: go-stone-qr-<style>[-<board>].png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stone style
    #[arg(short, long, value_enum, default_value = "classic")]
    pub style: StyleArg,

    /// Board style
    #[arg(short, long, value_enum, default_value = "kaya")]
    pub board: BoardArg,

    /// Centre logo mode
    #[arg(short = 'm', long, value_enum, default_value = "none")]
    pub logo_mode: LogoArg,

    /// Logo image used by the upload logo mode
    #[arg(short, long)]
    pub logo: Option<PathBuf>,

    /// Logo size as a percentage of the QR width (0-100)
    #[arg(long, default_value = "22", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub logo_size: u8,

    /// Side of the square output image in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE)]
    pub size: u32,

    /// Directory holding black.png and white-1.png..white-3.png for the photo style
    #[arg(short, long, default_value = "textures")]
    pub textures: PathBuf,

    /// Font file for badge text, replacing the bundled DejaVu Sans Bold
    #[arg(short, long)]
    pub font: Option<PathBuf>,

    /// Text shown by the badge logo mode
    #[arg(long, default_value = DEFAULT_BADGE_TEXT)]
    pub badge_text: String,

    /// Print the PNG as a data URI instead of writing a file
    #[arg(long)]
    pub data_uri: bool,
}
