use crate::app::{App, FormField};
use crate::sync::ResourceKind;
use cronpanel_client::ServiceType;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_dashboard_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Tab => {
            let kind = app.next_tab();
            enqueue_action(action_tx, Action::Sync(kind));
            return;
        }
        KeyCode::BackTab => {
            let kind = app.prev_tab();
            enqueue_action(action_tx, Action::Sync(kind));
            return;
        }
        KeyCode::Char('l') if ctrl => {
            enqueue_action(action_tx, Action::Logout);
            return;
        }
        _ => {}
    }

    // The cron field swallows plain characters, so shortcuts only apply
    // outside it.
    if let Some(service) = app.active_service() {
        if app.form(service).focused == FormField::Cron {
            if handle_cron_key(key, app, service) {
                return;
            }
        }
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('r') => enqueue_action(action_tx, Action::Sync(app.active_tab)),
        KeyCode::Char(c @ '1'..='5') => {
            let index = (c as usize) - ('1' as usize);
            let kind = app.select_tab(ResourceKind::ALL[index]);
            enqueue_action(action_tx, Action::Sync(kind));
        }
        _ => match app.active_tab {
            ResourceKind::Projects => handle_form_key(key, app, ServiceType::Project, action_tx),
            ResourceKind::Databases => handle_form_key(key, app, ServiceType::Database, action_tx),
            ResourceKind::Schedules => handle_schedules_key(key, app),
            ResourceKind::Logs => handle_logs_key(key, app),
            ResourceKind::Uptime => {}
        },
    }
}

/// Returns true when the key was consumed as text editing.
fn handle_cron_key(key: KeyEvent, app: &mut App, service: ServiceType) -> bool {
    let cron = &mut app.form_mut(service).cron;
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            cron.insert(c);
            true
        }
        KeyCode::Backspace => {
            cron.backspace();
            true
        }
        _ => false,
    }
}

fn handle_form_key(key: KeyEvent, app: &mut App, service: ServiceType, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Down => app.focus_next_field(service),
        KeyCode::Up => app.focus_prev_field(service),
        KeyCode::Right => app.adjust_field(service, true),
        KeyCode::Left => app.adjust_field(service, false),
        KeyCode::Enter => enqueue_action(action_tx, Action::CreateSchedule(service)),
        _ => {}
    }
}

fn handle_schedules_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.schedule_cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => app.schedule_cursor_up(),
        KeyCode::Char('d') | KeyCode::Delete => {
            if !app.request_delete() {
                app.set_status("No schedule selected.".to_string());
            }
        }
        _ => {}
    }
}

fn handle_logs_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_logs_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_logs_up(),
        _ => {}
    }
}
