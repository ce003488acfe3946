//! Named stone and board themes.
//!
//! Lookups never fail: unknown names resolve to the default preset.

use image::Rgba;

const fn rgb(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// Photographic textures for a stone style, as file names inside a texture directory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureSpec {
    pub dark_stone: &'static str,
    pub light_stone_variants: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub dark_color: Rgba<u8>,
    pub light_color: Rgba<u8>,
    pub edge_color: Rgba<u8>,
    pub highlight_color: Rgba<u8>,
    pub ring_color: Rgba<u8>,
    pub has_veins: bool,
    /// Stone radius as a fraction of the cell size.
    pub stone_radius: f32,
    pub textures: Option<TextureSpec>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardTheme {
    pub border_color: Rgba<u8>,
    /// Top and bottom stops of the background's vertical gradient.
    pub background: (Rgba<u8>, Rgba<u8>),
    pub grain_color: Rgba<u8>,
    pub line_color: Rgba<u8>,
    pub star_point_color: Rgba<u8>,
    /// `false` paints a flat fill with no grain, grid or star points.
    pub wood: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StoneStyle {
    #[default]
    Classic,
    Yunzi,
    Slate,
    Jade,
    Photo,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoardStyle {
    #[default]
    Kaya,
    Shinkaya,
    Bamboo,
    Plain,
}

const PHOTO_TEXTURES: TextureSpec = TextureSpec {
    dark_stone: "black.png",
    light_stone_variants: &["white-1.png", "white-2.png", "white-3.png"],
};

impl StoneStyle {
    pub const ALL: [StoneStyle; 5] = [
        StoneStyle::Classic,
        StoneStyle::Yunzi,
        StoneStyle::Slate,
        StoneStyle::Jade,
        StoneStyle::Photo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StoneStyle::Classic => "classic",
            StoneStyle::Yunzi => "yunzi",
            StoneStyle::Slate => "slate",
            StoneStyle::Jade => "jade",
            StoneStyle::Photo => "photo",
        }
    }

    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }

    pub fn theme(self) -> Theme {
        match self {
            StoneStyle::Classic => Theme {
                dark_color: rgb(0x1c, 0x1c, 0x1f),
                light_color: rgb(0xf4, 0xf1, 0xe8),
                edge_color: rgb(0x05, 0x05, 0x06),
                highlight_color: rgb(0xff, 0xff, 0xff),
                ring_color: rgb(0x3a, 0x34, 0x2c),
                has_veins: true,
                stone_radius: 0.45,
                textures: None,
            },
            StoneStyle::Yunzi => Theme {
                dark_color: rgb(0x23, 0x2b, 0x27),
                light_color: rgb(0xee, 0xe9, 0xd6),
                edge_color: rgb(0x0b, 0x10, 0x0d),
                highlight_color: rgb(0xfb, 0xf8, 0xee),
                ring_color: rgb(0x4d, 0x47, 0x3b),
                has_veins: false,
                stone_radius: 0.44,
                textures: None,
            },
            StoneStyle::Slate => Theme {
                dark_color: rgb(0x2a, 0x2d, 0x34),
                light_color: rgb(0xe6, 0xe4, 0xdf),
                edge_color: rgb(0x0e, 0x10, 0x14),
                highlight_color: rgb(0xd8, 0xdc, 0xe4),
                ring_color: rgb(0x55, 0x58, 0x60),
                has_veins: true,
                stone_radius: 0.36,
                textures: None,
            },
            StoneStyle::Jade => Theme {
                dark_color: rgb(0x1f, 0x4d, 0x3a),
                light_color: rgb(0xe3, 0xf1, 0xe6),
                edge_color: rgb(0x0c, 0x26, 0x1b),
                highlight_color: rgb(0xf2, 0xff, 0xf6),
                ring_color: rgb(0x2f, 0x5e, 0x4a),
                has_veins: false,
                stone_radius: 0.44,
                textures: None,
            },
            StoneStyle::Photo => Theme {
                dark_color: rgb(0x18, 0x18, 0x1a),
                light_color: rgb(0xf2, 0xef, 0xe6),
                edge_color: rgb(0x06, 0x06, 0x07),
                highlight_color: rgb(0xff, 0xff, 0xff),
                ring_color: rgb(0x40, 0x3a, 0x32),
                has_veins: false,
                stone_radius: 0.44,
                textures: Some(PHOTO_TEXTURES),
            },
        }
    }
}

impl BoardStyle {
    pub const ALL: [BoardStyle; 4] = [
        BoardStyle::Kaya,
        BoardStyle::Shinkaya,
        BoardStyle::Bamboo,
        BoardStyle::Plain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BoardStyle::Kaya => "kaya",
            BoardStyle::Shinkaya => "shinkaya",
            BoardStyle::Bamboo => "bamboo",
            BoardStyle::Plain => "plain",
        }
    }

    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }

    pub fn theme(self) -> BoardTheme {
        match self {
            BoardStyle::Kaya => BoardTheme {
                border_color: rgb(0x8a, 0x5a, 0x2b),
                background: (rgb(0xe3, 0xb8, 0x6f), rgb(0xcf, 0x9a, 0x52)),
                grain_color: rgb(0x9c, 0x66, 0x2d),
                line_color: rgb(0x4a, 0x32, 0x1a),
                star_point_color: rgb(0x3b, 0x27, 0x13),
                wood: true,
            },
            BoardStyle::Shinkaya => BoardTheme {
                border_color: rgb(0xa8, 0x7a, 0x45),
                background: (rgb(0xf2, 0xd6, 0x9c), rgb(0xe4, 0xbf, 0x7d)),
                grain_color: rgb(0xc0, 0x8f, 0x4e),
                line_color: rgb(0x5e, 0x43, 0x24),
                star_point_color: rgb(0x4c, 0x35, 0x1b),
                wood: true,
            },
            BoardStyle::Bamboo => BoardTheme {
                border_color: rgb(0x7b, 0x6a, 0x2e),
                background: (rgb(0xde, 0xcb, 0x84), rgb(0xc9, 0xb2, 0x63)),
                grain_color: rgb(0x8d, 0x7a, 0x36),
                line_color: rgb(0x43, 0x3a, 0x18),
                star_point_color: rgb(0x36, 0x2e, 0x12),
                wood: true,
            },
            BoardStyle::Plain => BoardTheme {
                border_color: rgb(0xd9, 0xd9, 0xd9),
                background: (rgb(0xff, 0xff, 0xff), rgb(0xff, 0xff, 0xff)),
                grain_color: rgb(0xff, 0xff, 0xff),
                line_color: rgb(0xcc, 0xcc, 0xcc),
                star_point_color: rgb(0xaa, 0xaa, 0xaa),
                wood: false,
            },
        }
    }
}

/// Looks up a stone theme by name; unknown names give the default theme.
pub fn lookup_style(name: &str) -> Theme {
    StoneStyle::from_name(name).theme()
}

pub fn lookup_board(name: &str) -> BoardTheme {
    BoardStyle::from_name(name).theme()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for style in StoneStyle::ALL {
            assert_eq!(StoneStyle::from_name(style.name()), style);
        }
        for board in BoardStyle::ALL {
            assert_eq!(BoardStyle::from_name(board.name()), board);
        }
    }

    #[test]
    fn unknown_names_fall_back_to_default() {
        assert_eq!(lookup_style("marble"), StoneStyle::Classic.theme());
        assert_eq!(lookup_style(""), StoneStyle::Classic.theme());
        assert_eq!(lookup_board("oak"), BoardStyle::Kaya.theme());
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(StoneStyle::from_name(" Jade "), StoneStyle::Jade);
        assert_eq!(BoardStyle::from_name("PLAIN"), BoardStyle::Plain);
    }

    #[test]
    fn only_photo_is_textured() {
        for style in StoneStyle::ALL {
            let theme = style.theme();
            assert_eq!(theme.textures.is_some(), style == StoneStyle::Photo);
            assert!(theme.stone_radius >= 0.36 && theme.stone_radius <= 0.45);
        }
        let spec = StoneStyle::Photo.theme().textures.unwrap();
        assert!(!spec.light_stone_variants.is_empty());
    }
}
