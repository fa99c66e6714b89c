//! Theme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Brand Colors
    pub primary: Color,
    pub accent: Color,

    // Semantic Colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Background Colors
    pub bg_dark: Color,
    pub bg_header: Color,
    pub bg_card: Color,
    pub border: Color,

    // Card Colors
    pub prompt: Color,
    pub answer: Color,
    pub meta: Color,

    // Text Colors
    pub text: Color,
    pub text_muted: Color,
    pub text_dim: Color,
}

/// Available theme names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    Slate,
    KanagawaWave,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Slate => "slate",
            ThemeName::KanagawaWave => "kanagawa-wave",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Slate => "Slate",
            ThemeName::KanagawaWave => "Kanagawa Wave",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "kanagawa-wave" | "kanagawa_wave" | "kanagawa" => ThemeName::KanagawaWave,
            _ => ThemeName::Slate,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Slate => ThemeName::KanagawaWave,
            ThemeName::KanagawaWave => ThemeName::Slate,
        }
    }
}

/// Theme struct that holds colors and provides style methods.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn new(name: ThemeName) -> Self {
        let colors = match name {
            ThemeName::Slate => Self::slate_colors(),
            ThemeName::KanagawaWave => Self::kanagawa_wave_colors(),
        };
        Self { name, colors }
    }

    pub fn from_name(name: &str) -> Self {
        Self::new(ThemeName::parse(name))
    }

    /// Same palette as the web page served by `zhixiao serve`.
    fn slate_colors() -> ThemeColors {
        ThemeColors {
            primary: Color::Rgb(29, 78, 216),       // Blue 700
            accent: Color::Rgb(14, 165, 233),       // Sky 500

            success: Color::Rgb(34, 197, 94),       // Green
            warning: Color::Rgb(250, 204, 21),      // Yellow
            error: Color::Rgb(239, 68, 68),         // Red

            bg_dark: Color::Rgb(15, 23, 42),        // Slate 900
            bg_header: Color::Rgb(17, 24, 39),      // Gray 900
            bg_card: Color::Rgb(30, 41, 59),        // Slate 800
            border: Color::Rgb(51, 65, 85),         // Slate 700

            prompt: Color::Rgb(14, 165, 233),       // Sky 500
            answer: Color::Rgb(147, 197, 253),      // Blue 300
            meta: Color::Rgb(147, 197, 253),        // Blue 300

            text: Color::Rgb(226, 232, 240),        // Slate 200
            text_muted: Color::Rgb(148, 163, 184),  // Slate 400
            text_dim: Color::Rgb(100, 116, 139),    // Slate 500
        }
    }

    /// Kanagawa Wave theme - inspired by the famous painting and kanagawa.nvim
    fn kanagawa_wave_colors() -> ThemeColors {
        ThemeColors {
            primary: Color::Rgb(0x7E, 0x9C, 0xD8),      // crystalBlue
            accent: Color::Rgb(0xD2, 0x7E, 0x99),       // sakuraPink

            success: Color::Rgb(0x98, 0xBB, 0x6C),      // springGreen
            warning: Color::Rgb(0xFF, 0x9E, 0x3B),      // roninYellow
            error: Color::Rgb(0xE8, 0x24, 0x24),        // samuraiRed

            bg_dark: Color::Rgb(0x16, 0x16, 0x1D),      // sumiInk0
            bg_header: Color::Rgb(0x1F, 0x1F, 0x28),    // sumiInk1
            bg_card: Color::Rgb(0x2A, 0x2A, 0x37),      // sumiInk2
            border: Color::Rgb(0x36, 0x36, 0x46),       // sumiInk3

            prompt: Color::Rgb(0xE6, 0xC3, 0x84),       // carpYellow
            answer: Color::Rgb(0x7F, 0xB4, 0xCA),       // springBlue
            meta: Color::Rgb(0x95, 0x7F, 0xB8),         // oniViolet

            text: Color::Rgb(0xDC, 0xD7, 0xBA),         // fujiWhite
            text_muted: Color::Rgb(0xC8, 0xC0, 0x93),   // oldWhite
            text_dim: Color::Rgb(0x54, 0x54, 0x6D),     // sumiInk4
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Styles
    // ══════════════════════════════════════════════════════════════════════

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.colors.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.colors.text)
            .bg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive(&self) -> Style {
        Style::default()
            .fg(self.colors.text_muted)
            .bg(self.colors.border)
    }

    pub fn card_border(&self) -> Style {
        Style::default()
            .fg(self.colors.border)
    }

    pub fn prompt(&self) -> Style {
        Style::default()
            .fg(self.colors.prompt)
            .add_modifier(Modifier::BOLD)
    }

    pub fn answer(&self) -> Style {
        Style::default()
            .fg(self.colors.answer)
    }

    pub fn hint(&self) -> Style {
        Style::default()
            .fg(self.colors.text_dim)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn meta(&self) -> Style {
        Style::default()
            .fg(self.colors.meta)
    }

    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.colors.text_dim)
    }

    pub fn key_highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::Slate)
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Icons
// ══════════════════════════════════════════════════════════════════════════

pub mod icons {
    pub const EMPTY: &str = "—";
    pub const SHUFFLE: &str = "🔀";
    pub const WARNING: &str = "⚠";
}
