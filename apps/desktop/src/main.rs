use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::{load_settings_from, CounterDisplay, GameController, GridBoard, TokioScheduler};
use shared::protocol::InputEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod render;

const HELP: &str = "commands: start | pause | reset | toggle (or empty line) | faster (+) | slower (-) | status | quit";

#[derive(Parser, Debug)]
#[command(about = "Catch-me-if-you-can goblin board in the terminal")]
struct Args {
    /// Settings file; defaults to ./goblin.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Start moving the goblin right away.
    #[arg(long)]
    autostart: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
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

    let (scheduler, mut ticks) = TokioScheduler::new();
    let mut game = GameController::new(
        &settings,
        GridBoard::new(),
        CounterDisplay::default(),
        scheduler,
    )
    .context("invalid board settings")?;
    game.initialize();
    if args.autostart {
        game.start();
    }

    println!("{HELP}");
    draw(&game);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match line.trim() {
                    "quit" | "exit" => break,
                    "status" => {
                        println!("{}", serde_json::to_string(&game.snapshot())?);
                        continue;
                    }
                    "help" => {
                        println!("{HELP}");
                        continue;
                    }
                    _ => {}
                }
                match InputEvent::from_command(&line) {
                    Some(event) => {
                        game.handle(event);
                        draw(&game);
                    }
                    None => println!("unknown command '{}'; {HELP}", line.trim()),
                }
            }
            Some(handle) = ticks.recv() => {
                if game.on_tick(handle).is_some() {
                    draw(&game);
                }
            }
        }
    }

    game.pause();
    tracing::info!(moves = game.state().move_count(), "bye");
    Ok(())
}

fn draw(game: &GameController<GridBoard, CounterDisplay, TokioScheduler>) {
    print!("{}", render::render_board(game.renderer()));
    println!("{}", render::render_status(&game.snapshot()));
}
