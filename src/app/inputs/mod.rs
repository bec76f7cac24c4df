use crate::access::AccessDecision;
use crate::app::session::Services;
use crate::app::App;
use crossterm::event::{KeyEvent, KeyEventKind};

pub mod common;
pub mod gallery;
pub mod gate;
pub mod input_box;
pub mod mouse;
pub mod viewer;

pub use mouse::handle_mouse;

pub fn handle_key(key: KeyEvent, app: &mut App, services: &Services) {
    // Some terminals report releases too; act on presses only
    if key.kind == KeyEventKind::Release {
        return;
    }

    // 1. Priority: Input Box
    // It captures keys aggressively, so we check it first and return if consumed
    if input_box::handle_input_box(key, app, services) {
        return;
    }

    // 2. Common/Global Keys (Quit, Help)
    if common::handle_common_events(key, app) {
        return;
    }

    // 3. Context Specific Handlers
    // The viewer is modal: while a photo is open it owns the keyboard.
    match app.access_decision() {
        AccessDecision::Granted if app.gallery.selection().is_some() => {
            viewer::handle_viewer_events(key, app, services);
        }
        AccessDecision::Granted => {
            if !gallery::handle_gallery_events(key, app, services) {
                gate::handle_gate_events(key, app, services);
            }
        }
        _ => {
            gate::handle_gate_events(key, app, services);
        }
    }
}
