use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cronpanel")]
#[command(about = "Terminal dashboard for control-plane projects, databases and schedules")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run the dashboard against the configured control plane (default)
    Run,
    /// Run the dashboard against an in-memory control plane
    Dev,
    /// Validate an API token and save it for later runs
    Login,
    /// Remove the saved token
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
