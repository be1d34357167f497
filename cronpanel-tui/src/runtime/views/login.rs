use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_login_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.login.submitting {
        if key.code == KeyCode::Esc {
            app.quit();
        }
        return;
    }

    match key.code {
        KeyCode::Enter => enqueue_action(action_tx, Action::SubmitLogin),
        KeyCode::Esc => app.quit(),
        KeyCode::Backspace => app.login.token.backspace(),
        KeyCode::Left => app.login.token.move_left(),
        KeyCode::Right => app.login.token.move_right(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.login.token.clear();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.login.token.insert(c);
        }
        _ => {}
    }
}
