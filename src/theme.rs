use clap::ValueEnum;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn palette(self) -> &'static ColorPalette {
        palette_for(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub card: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub border: Color,
    /// Two-stop header band, top then bottom.
    pub header: [Color; 2],
}

const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

static LIGHT: ColorPalette = ColorPalette {
    primary: hex(0xE91E63),
    secondary: hex(0xF06292),
    background: hex(0xFFF3F8),
    card: hex(0xFFFFFF),
    text: hex(0x1C1C1E),
    text_secondary: hex(0x8E8E93),
    border: hex(0xE5E5EA),
    header: [hex(0xE91E63), hex(0xF06292)],
};

static DARK: ColorPalette = ColorPalette {
    primary: hex(0xFF1744),
    secondary: hex(0xFF6B9D),
    background: hex(0x000000),
    card: hex(0x1C1C1E),
    text: hex(0xFFFFFF),
    text_secondary: hex(0x8E8E93),
    border: hex(0x2C2C2E),
    header: [hex(0x1A1A2E), hex(0x16213E)],
};

pub fn palette_for(mode: ThemeMode) -> &'static ColorPalette {
    match mode {
        ThemeMode::Light => &LIGHT,
        ThemeMode::Dark => &DARK,
    }
}
