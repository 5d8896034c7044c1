//! Plays a session without a window, turning at random, and reports how it ended.
//!
//! Handy for watching the simulation in logs: `RUST_LOG=budget_run=trace cargo run --bin headless`.

use anyhow::Context;
use budget_run::config::{CliOverrides, GameConfig};
use budget_run::excuse::{CannedExcuses, ExcuseLookup};
use budget_run::formatter;
use budget_run::game::Game;
use budget_run::hud::{format_money, SessionHud, SessionStatus};
use budget_run::map::direction::Direction;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;

const FRAME_MS: f64 = 1000.0 / 60.0;
/// Ten simulated minutes.
const MAX_FRAMES: u64 = 60 * 60 * 10;
const TURN_EVERY: u64 = 45;
const SEED: u64 = 0x5EED;

fn main() -> anyhow::Result<()> {
    formatter::init_tracing().context("Could not initialize tracing")?;
    let config = GameConfig::with_overrides(CliOverrides::parse()).context("Could not load configuration")?;

    let mut game = Game::with_seed(config.difficulty, SEED)?;
    let mut hud = SessionHud::default();
    let mut pilot = SmallRng::seed_from_u64(SEED);

    game.start();
    hud.session_started();

    let mut frame = 0;
    while frame < MAX_FRAMES && !game.stage().is_terminal() {
        formatter::increment_tick();
        if frame % TURN_EVERY == 0 {
            let direction = Direction::DIRECTIONS[pilot.random_range(0..Direction::DIRECTIONS.len())];
            game.queue_direction(direction);
        }
        for event in game.tick(frame as f64 * FRAME_MS) {
            event.dispatch(&mut hud);
        }
        frame += 1;
    }

    if let SessionStatus::BudgetCut { .. } = hud.status {
        let excuse = ExcuseLookup::spawn(CannedExcuses::default(), hud.score, config.excuse_timeout()).wait();
        hud.set_excuse(&excuse);
    }

    info!(
        frames = frame,
        score = %format_money(hud.score),
        remaining = game.remaining_items(),
        "{}",
        hud.title(game.difficulty(), game.speed_multiplier())
    );

    Ok(())
}
