use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use crate::access::AccessDecision;
use crate::app::session::{self, Services};
use crate::app::App;
use crate::gallery::ViewerCommand;

use super::viewer::apply_command;

pub fn handle_mouse(mouse: MouseEvent, app: &mut App, services: &Services) {
    if app.input_state.is_some() || app.access_decision() != AccessDecision::Granted {
        return;
    }

    if app.gallery.selection().is_some() {
        handle_viewer_mouse(mouse, app, services);
    } else {
        handle_gallery_mouse(mouse, app);
    }
}

/// Vertical drag on the viewer; releasing far enough dismisses it.
fn handle_viewer_mouse(mouse: MouseEvent, app: &mut App, services: &Services) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.gallery.viewer.drag.begin(mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => {
            let units = app.drag_units_per_row;
            app.gallery.viewer.drag.drag_to_row(mouse.row, units);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.gallery.release_drag();
        }
        MouseEventKind::ScrollDown => apply_command(ViewerCommand::Next, app, services),
        MouseEventKind::ScrollUp => apply_command(ViewerCommand::Previous, app, services),
        _ => {}
    }
}

fn handle_gallery_mouse(mouse: MouseEvent, app: &mut App) {
    let columns = app.grid_columns.max(1);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let at = Position::new(mouse.column, mouse.row);
            let hit = app
                .tile_areas
                .iter()
                .find(|(area, _)| area.contains(at))
                .map(|(_, id)| *id);
            if let Some(id) = hit {
                if app.gallery.select(id) {
                    session::sync_viewer(app);
                }
            }
        }
        MouseEventKind::ScrollDown => app.gallery.move_cursor(0, 1, columns),
        MouseEventKind::ScrollUp => app.gallery.move_cursor(0, -1, columns),
        _ => {}
    }
}
