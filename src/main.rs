#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use anyhow::Context;
use budget_run::app::App;
use budget_run::config::{CliOverrides, GameConfig};
use budget_run::constants::LOOP_TIME;
use budget_run::formatter;
use clap::Parser;
use tracing::info;

/// The main entry point of the application.
///
/// Loads the configuration, opens the window, then runs frames until the player quits.
pub fn main() -> anyhow::Result<()> {
    formatter::init_tracing().context("Could not initialize tracing")?;

    let config = GameConfig::with_overrides(CliOverrides::parse()).context("Could not load configuration")?;
    info!(?config, "Configuration loaded");

    let mut app = App::new(&config).context("Could not create app")?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}

    Ok(())
}
