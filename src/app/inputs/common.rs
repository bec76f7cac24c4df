use crossterm::event::{KeyCode, KeyEvent};
use crate::app::App;

pub fn handle_common_events(key: KeyEvent, app: &mut App) -> bool {
    let keys = app.keys.clone();

    // Quit ('q')
    if keys.matches(key, &keys.quit) {
        // Close popups and the viewer first, then quit (Neovim-style)
        if app.show_keyhints {
            app.show_keyhints = false;
        } else if app.gallery.selection().is_some() {
            app.gallery.clear_selection();
        } else {
            app.shutdown();
        }
        return true;
    }

    if keys.matches(key, &keys.toggle_keyhints) {
        app.show_keyhints = !app.show_keyhints;
        return true;
    }

    // Global Popup Close (Esc)
    if key.code == KeyCode::Esc && app.show_keyhints {
        app.show_keyhints = false;
        return true;
    }

    false
}
