use crossterm::event::KeyEvent;
use crate::access::AccessDecision;
use crate::app::session::{self, Services};
use crate::app::{App, InputMode, InputState};

fn open_connect_prompt(app: &mut App) {
    let current = app.wallet.address().unwrap_or_default().to_string();
    app.input_state = Some(InputState::new(
        InputMode::ConnectWallet,
        "Wallet address (0x…)",
        &current,
    ));
}

pub fn handle_gate_events(key: KeyEvent, app: &mut App, services: &Services) -> bool {
    let keys = app.keys.clone();
    let decision = app.access_decision();

    if keys.matches(key, &keys.connect)
        || (decision == AccessDecision::ConnectPrompt && keys.matches(key, &keys.open))
    {
        open_connect_prompt(app);
        return true;
    }

    if decision == AccessDecision::ConnectPrompt {
        return false;
    }

    if keys.matches(key, &keys.recheck) {
        app.show_toast("🔄 Checking token balance");
        session::check_access(app, services);
        return true;
    }

    if keys.matches(key, &keys.disconnect) {
        session::disconnect(app);
        app.show_toast("🔌 Disconnected");
        return true;
    }

    false
}
