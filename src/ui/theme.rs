use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

pub const DEFAULT_THEME: &str = "default";
pub const EYE_CARE_THEME: &str = "eye-care";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_secondary: String,
    pub panel_bg: String,
    pub accent: String,
    pub accent_fg: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub cursor_bg: String,
    pub cursor_fg: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes override the bundled ones
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("wordgate")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }

    pub fn is_eye_care(&self) -> bool {
        self.name == EYE_CARE_THEME
    }

    /// Name of the theme the title toggle switches to.
    pub fn toggled_name(&self) -> &'static str {
        if self.is_eye_care() {
            DEFAULT_THEME
        } else {
            EYE_CARE_THEME
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#FFFFFF".to_string(),
            fg: "#2C3E50".to_string(),
            text_secondary: "#4A6FA5".to_string(),
            panel_bg: "#F5F7FB".to_string(),
            accent: "#1976D2".to_string(),
            accent_fg: "#FFFFFF".to_string(),
            border: "#B3CDE0".to_string(),
            border_focused: "#1976D2".to_string(),
            header_bg: "#1976D2".to_string(),
            header_fg: "#FFFFFF".to_string(),
            cursor_bg: "#B0B0B0".to_string(),
            cursor_fg: "#000000".to_string(),
            error: "#D32F2F".to_string(),
            warning: "#F57C00".to_string(),
            success: "#388E3C".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_secondary(&self) -> Color { Self::parse_color(&self.text_secondary) }
    pub fn panel_bg(&self) -> Color { Self::parse_color(&self.panel_bg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_fg(&self) -> Color { Self::parse_color(&self.accent_fg) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn cursor_bg(&self) -> Color { Self::parse_color(&self.cursor_bg) }
    pub fn cursor_fg(&self) -> Color { Self::parse_color(&self.cursor_fg) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_themes_parse() {
        let names = Theme::available_themes();
        assert!(names.contains(&DEFAULT_THEME.to_string()));
        assert!(names.contains(&EYE_CARE_THEME.to_string()));
        let eye = Theme::load(EYE_CARE_THEME).unwrap();
        assert!(eye.is_eye_care());
        assert_eq!(eye.toggled_name(), DEFAULT_THEME);
    }

    #[test]
    fn parse_color_falls_back_to_white() {
        assert_eq!(ThemeColors::parse_color("#E3F2FD"), Color::Rgb(0xE3, 0xF2, 0xFD));
        assert_eq!(ThemeColors::parse_color("nope"), Color::White);
    }
}
