use crate::app::{App, Screen};
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::info;

use super::action_queue::{channel, completion_channel, Action};
use super::actions::{apply_completion, run_action};
use super::views::handle_key;
use super::Context;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ctx: &Context,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let (completion_tx, mut completion_rx) = completion_channel();

    // A saved session skips the login screen.
    if ctx.session.is_authenticated() {
        info!("resuming saved session");
        for kind in app.enter_main(Instant::now()) {
            let _ = action_tx.send(Action::Sync(kind));
        }
    }

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_loading() {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, app, &action_tx);
                }
            }
        }

        if app.screen == Screen::Main && app.poller.is_due(Instant::now()) {
            let _ = action_tx.send(Action::RefreshAll);
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, ctx, &completion_tx);
        }

        while let Ok(completion) = completion_rx.try_recv() {
            apply_completion(completion, app, ctx, &completion_tx);
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
