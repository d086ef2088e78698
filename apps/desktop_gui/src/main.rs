use std::path::PathBuf;

mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use game_core::{
    load_settings_from, CounterDisplay, GameController, GridBoard, ManualScheduler, MissedTicks,
};
use tracing_subscriber::EnvFilter;
use ui::GoblinApp;

#[derive(Parser, Debug)]
#[command(about = "Goblin board desktop window")]
struct Args {
    /// Settings file; defaults to ./goblin.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    interval_ms: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings =
        load_settings_from(args.config.as_deref()).context("failed to load game settings")?;
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(interval_ms) = args.interval_ms {
        settings.move_interval_ms = interval_ms;
    }

    let mut game = GameController::new(
        &settings,
        GridBoard::new(),
        CounterDisplay::default(),
        ManualScheduler::with_missed_ticks(MissedTicks::Delay),
    )
    .context("invalid board settings")?;
    game.initialize();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Goblin Board")
            .with_inner_size([560.0, 680.0])
            .with_min_inner_size([460.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Goblin Board",
        options,
        Box::new(|_cc| Ok(Box::new(GoblinApp::new(game)))),
    )
    .map_err(|err| anyhow!("goblin board window failed: {err}"))
}
