use eframe::egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// Parse a stored theme name. Anything unrecognised is `None` so
    /// the caller can fall back to its default.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub muted: Color32,
    pub panel: Color32,
    pub h1_size: f32,
    pub h2_size: f32,
    pub body_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            background: Color32::from_rgb(0x12, 0x12, 0x16),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0xF9, 0x73, 0x16),
            muted: Color32::from_rgb(0x8A, 0x8A, 0x94),
            panel: Color32::from_rgb(0x1F, 0x1F, 0x26),
            h1_size: 96.0,
            h2_size: 64.0,
            body_size: 40.0,
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0xDB, 0x27, 0x77),
            muted: Color32::from_rgb(0x6B, 0x72, 0x80),
            panel: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            h1_size: 96.0,
            h2_size: 64.0,
            body_size: 40.0,
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    pub fn heading_size(&self, level: u8) -> f32 {
        match level {
            1 => self.h1_size,
            2 => self.h2_size,
            _ => self.body_size,
        }
    }

    pub fn visuals(&self) -> eframe::egui::Visuals {
        match self.mode {
            ThemeMode::Dark => eframe::egui::Visuals::dark(),
            ThemeMode::Light => eframe::egui::Visuals::light(),
        }
    }
}

/// Parse `#rrggbb` (or `rrggbb`) into a color.
pub fn parse_hex_color(value: &str) -> Option<Color32> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        assert_eq!(ThemeMode::from_name("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_name("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::from_name("Dark"), None);
        assert_eq!(ThemeMode::Light.toggled().as_str(), "dark");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#ff8000"),
            Some(Color32::from_rgb(0xFF, 0x80, 0x00))
        );
        assert_eq!(
            parse_hex_color("102030"),
            Some(Color32::from_rgb(0x10, 0x20, 0x30))
        );
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }
}
