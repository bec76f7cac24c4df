use crossterm::event::KeyEvent;
use crate::app::keys::KeyConfig;
use crate::app::session::{self, Services};
use crate::app::App;
use crate::gallery::ViewerCommand;

pub fn command_for_key(key: KeyEvent, keys: &KeyConfig) -> Option<ViewerCommand> {
    if keys.matches_any(key, &[keys.nav_right.as_str(), keys.nav_right_alt.as_str()]) {
        Some(ViewerCommand::Next)
    } else if keys.matches_any(key, &[keys.nav_left.as_str(), keys.nav_left_alt.as_str()]) {
        Some(ViewerCommand::Previous)
    } else if keys.matches_any(key, &[keys.close.as_str(), keys.close_alt.as_str()]) {
        Some(ViewerCommand::Dismiss)
    } else if keys.matches(key, &keys.download) {
        Some(ViewerCommand::Download)
    } else {
        None
    }
}

pub fn apply_command(command: ViewerCommand, app: &mut App, services: &Services) {
    match command {
        ViewerCommand::Next => {
            app.gallery.show_next();
        }
        ViewerCommand::Previous => {
            app.gallery.show_previous();
        }
        ViewerCommand::Dismiss => app.gallery.clear_selection(),
        ViewerCommand::Download => {
            if let Some(id) = app.gallery.selection() {
                session::request_download(app, services, id);
            }
        }
    }
    session::sync_viewer(app);
}

/// The viewer swallows every key while open.
pub fn handle_viewer_events(key: KeyEvent, app: &mut App, services: &Services) -> bool {
    if let Some(command) = command_for_key(key, &app.keys) {
        apply_command(command, app, services);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_arrow_and_escape_mapping() {
        let keys = KeyConfig::default();
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(command_for_key(press(KeyCode::Right), &keys), Some(ViewerCommand::Next));
        assert_eq!(command_for_key(press(KeyCode::Left), &keys), Some(ViewerCommand::Previous));
        assert_eq!(command_for_key(press(KeyCode::Esc), &keys), Some(ViewerCommand::Dismiss));
        assert_eq!(command_for_key(press(KeyCode::Char('s')), &keys), Some(ViewerCommand::Download));
        assert_eq!(command_for_key(press(KeyCode::Char('z')), &keys), None);
    }
}
