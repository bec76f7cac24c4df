use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    // Global
    pub quit: String,
    pub toggle_keyhints: String,

    // Gate
    pub connect: String,
    pub disconnect: String,
    pub recheck: String,

    // View Switching
    pub view_grid: String,
    pub view_tiles: String,
    pub view_list: String,
    pub cycle_view: String,

    // Navigation (Shared)
    pub nav_up: String,
    pub nav_up_alt: String,
    pub nav_down: String,
    pub nav_down_alt: String,
    pub nav_left: String,
    pub nav_left_alt: String,
    pub nav_right: String,
    pub nav_right_alt: String,

    // Gallery / Viewer
    pub open: String,
    pub close: String,
    pub close_alt: String,
    pub download: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            toggle_keyhints: "?".to_string(),

            connect: "c".to_string(),
            disconnect: "d".to_string(),
            recheck: "r".to_string(),

            view_grid: "1".to_string(),
            view_tiles: "2".to_string(),
            view_list: "3".to_string(),
            cycle_view: "Tab".to_string(),

            nav_up: "k".to_string(),
            nav_up_alt: "Up".to_string(),
            nav_down: "j".to_string(),
            nav_down_alt: "Down".to_string(),
            nav_left: "h".to_string(),
            nav_left_alt: "Left".to_string(),
            nav_right: "l".to_string(),
            nav_right_alt: "Right".to_string(),

            open: "Enter".to_string(),
            close: "Esc".to_string(),
            close_alt: "x".to_string(),
            download: "s".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn matches(&self, event: KeyEvent, key_str: &str) -> bool {
        match key_str {
            "Space" => event.code == KeyCode::Char(' '),
            "Enter" => event.code == KeyCode::Enter,
            "Backspace" => event.code == KeyCode::Backspace,
            "Esc" => event.code == KeyCode::Esc,
            "Tab" => event.code == KeyCode::Tab,
            "BackTab" => event.code == KeyCode::BackTab,
            "Up" => event.code == KeyCode::Up,
            "Down" => event.code == KeyCode::Down,
            "Left" => event.code == KeyCode::Left,
            "Right" => event.code == KeyCode::Right,
            s if s.chars().count() == 1 => {
                if let Some(ch) = s.chars().next() {
                    // Check for shift modifier if char is uppercase
                    if ch.is_uppercase() {
                        event.code == KeyCode::Char(ch)
                            || (event.code == KeyCode::Char(ch.to_ascii_lowercase())
                                && event.modifiers.contains(KeyModifiers::SHIFT))
                    } else {
                        event.code == KeyCode::Char(ch)
                    }
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    pub fn matches_any(&self, event: KeyEvent, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.matches(event, k))
    }

    // Helper for UI display
    pub fn display(&self, key_str: &str) -> String {
        match key_str {
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "BackTab" => "S-Tab".to_string(),
            "Backspace" => "Bksp".to_string(),
            _ => key_str.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_named_and_char_keys() {
        let keys = KeyConfig::default();
        assert!(keys.matches(key(KeyCode::Right), &keys.nav_right_alt));
        assert!(keys.matches(key(KeyCode::Char('l')), &keys.nav_right));
        assert!(keys.matches(key(KeyCode::Esc), &keys.close));
        assert!(!keys.matches(key(KeyCode::Char('x')), &keys.download));
    }

    #[test]
    fn test_uppercase_accepts_shift() {
        let keys = KeyConfig::default();
        let shifted = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::SHIFT);
        assert!(keys.matches(shifted, "S"));
        assert!(keys.matches(key(KeyCode::Char('S')), "S"));
        assert!(!keys.matches(key(KeyCode::Char('s')), "S"));
    }

    #[test]
    fn test_partial_key_table_fills_defaults() {
        let keys: KeyConfig = toml::from_str("download = \"D\"").unwrap();
        assert_eq!(keys.download, "D");
        assert_eq!(keys.quit, "q");
    }
}
