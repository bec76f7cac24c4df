use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::app::config::AppConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(24, 24, 27),
            surface: Color::Rgb(39, 39, 42),
            overlay: Color::Rgb(113, 113, 122),
            text: Color::Rgb(244, 244, 245),
            red: Color::Rgb(243, 139, 168),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            blue: Color::Rgb(137, 180, 250),
            magenta: Color::Rgb(203, 166, 247),
            cyan: Color::Rgb(148, 226, 213),
        }
    }
}

// Helper for serialization/deserialization
#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

pub fn get_theme_path() -> PathBuf {
    AppConfig::get_config_dir().join("theme.toml")
}

/// Reads `theme.toml` next to the config file, falling back to the default.
pub fn load_current_theme() -> Theme {
    let path = get_theme_path();
    let Ok(content) = fs::read_to_string(&path) else {
        return Theme::default();
    };

    // Try parsing as nested [theme] first, then as a flat file
    if let Ok(wrapper) = toml::from_str::<ThemeFile>(&content) {
        return wrapper.theme;
    }
    match toml::from_str::<Theme>(&content) {
        Ok(theme) => theme,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable theme file");
            Theme::default()
        }
    }
}
