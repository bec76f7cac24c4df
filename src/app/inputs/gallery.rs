use crossterm::event::KeyEvent;
use crate::app::session::{self, Services};
use crate::app::App;
use crate::gallery::ViewMode;

pub fn handle_gallery_events(key: KeyEvent, app: &mut App, services: &Services) -> bool {
    let keys = app.keys.clone(); // Clone keys to avoid borrowing app
    let columns = match app.gallery.view_mode {
        ViewMode::List => 1,
        _ => app.grid_columns.max(1),
    };

    // View Switchers
    if keys.matches(key, &keys.view_grid) { app.gallery.set_view_mode(ViewMode::Grid); return true; }
    if keys.matches(key, &keys.view_tiles) { app.gallery.set_view_mode(ViewMode::Tiles); return true; }
    if keys.matches(key, &keys.view_list) { app.gallery.set_view_mode(ViewMode::List); return true; }
    if keys.matches(key, &keys.cycle_view) { app.gallery.cycle_view_mode(); return true; }

    if app.gallery.is_loading() {
        return false;
    }

    // Cursor
    if keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt) {
        app.gallery.move_cursor(0, -1, columns);
        return true;
    }
    if keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt) {
        app.gallery.move_cursor(0, 1, columns);
        return true;
    }
    if keys.matches(key, &keys.nav_left) || keys.matches(key, &keys.nav_left_alt) {
        app.gallery.move_cursor(-1, 0, columns);
        return true;
    }
    if keys.matches(key, &keys.nav_right) || keys.matches(key, &keys.nav_right_alt) {
        app.gallery.move_cursor(1, 0, columns);
        return true;
    }

    // Open the viewer
    if keys.matches(key, &keys.open) {
        if app.gallery.select_at_cursor() {
            session::sync_viewer(app);
        }
        return true;
    }

    if keys.matches(key, &keys.download) {
        if let Some(id) = app.gallery.cursor_photo().map(|p| p.id) {
            session::request_download(app, services, id);
        }
        return true;
    }

    false
}
