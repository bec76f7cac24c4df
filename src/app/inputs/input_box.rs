use crossterm::event::{KeyCode, KeyEvent};
use crate::app::session::{self, Services};
use crate::app::{App, InputMode};
use tracing::debug;

pub fn handle_input_box(key: KeyEvent, app: &mut App, services: &Services) -> bool {
    if app.input_state.is_none() {
        return false;
    }

    match key.code {
        KeyCode::Esc => {
            app.input_state = None;
        }
        KeyCode::Enter => {
            // Take ownership, releasing the app borrow
            if let Some(input) = app.input_state.take() {
                match input.mode {
                    InputMode::ConnectWallet => {
                        if let Err(e) = session::connect(app, services, &input.value) {
                            debug!(error = %e, "connect rejected");
                            app.show_toast("❌ Not a valid 0x address");
                        }
                    }
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.input_state.as_mut() {
                input.value.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.input_state.as_mut() {
                input.value.push(c);
            }
        }
        _ => {}
    }
    true
}
