mod app;
mod cli;
mod config;
mod logging;
mod poller;
mod runtime;
mod session_store;
mod sync;
mod time_utils;
mod ui;
mod view;

use anyhow::{bail, Context as _, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::CronpanelConfig;
use cronpanel_client::{ApiClient, ControlPlane, Credential, DevBackend, Session, DEV_TOKEN};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use runtime::Context;
use session_store::SessionStore;
use std::io;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut cfg = CronpanelConfig::load()?;
    cfg.apply_env_overrides();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::ConfigPath => {
            let path = CronpanelConfig::config_path()?;
            if !path.exists() {
                CronpanelConfig::default().save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
        Commands::Logout => {
            let store = SessionStore::default_location()?;
            store.clear()?;
            println!("Logged out. Removed {}", store.path().display());
            Ok(())
        }
        Commands::Login => login(&cfg).await,
        Commands::Run => {
            let store = SessionStore::default_location()?;
            let session = Session::init(store.load()?);
            let client = ApiClient::new(&cfg.api_url, session.clone(), cfg.request_timeout())
                .with_context(|| format!("Invalid api_url {}", cfg.api_url))?;
            let ctx = Context {
                backend: Arc::new(client),
                session,
                store,
            };
            let label = cfg.api_url.clone();
            run_dashboard(&cfg, ctx, label).await
        }
        Commands::Dev => {
            let store = SessionStore::at(config::root_dir()?.join("dev-session"));
            let ctx = Context {
                backend: Arc::new(DevBackend::new()),
                session: Session::init(store.load()?),
                store,
            };
            let label = format!("dev (token: {})", DEV_TOKEN);
            run_dashboard(&cfg, ctx, label).await
        }
    }
}

/// Prompt for a token without echo, check it against the server and save it.
async fn login(cfg: &CronpanelConfig) -> Result<()> {
    let raw = rpassword::prompt_password("API token: ").context("Failed to read token")?;
    let Some(credential) = Credential::new(&raw) else {
        bail!("No token entered");
    };

    let client = ApiClient::new(&cfg.api_url, Session::default(), cfg.request_timeout())?;
    if let Err(e) = client.login(&credential).await {
        bail!("Login failed: {}", e.operator_message());
    }

    let store = SessionStore::default_location()?;
    store.save(&credential)?;
    println!("Login successful. Token saved to {}", store.path().display());
    Ok(())
}

async fn run_dashboard(cfg: &CronpanelConfig, ctx: Context, label: String) -> Result<()> {
    let _log_guard = logging::init(cfg)?;
    tracing::info!(target_label = %label, "starting dashboard");

    let mut app = App::new(cfg, label);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &ctx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "dashboard exited with error");
    }
    res
}
