use crate::app::{App, Screen};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod confirm_delete;
mod dashboard;
mod login;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.screen {
        Screen::Login => login::handle_login_key(key, app, action_tx),
        Screen::Main if app.delete_context.is_some() => {
            confirm_delete::handle_confirm_delete_key(key, app, action_tx)
        }
        Screen::Main => dashboard::handle_dashboard_key(key, app, action_tx),
    }
}
