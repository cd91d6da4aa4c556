//! Headless Hexic runner (default binary).
//!
//! Builds a game from a seed or a fixture board, plays a script of actions
//! against it, and prints the settled board.
//!
//! ```text
//! hexic --board yellow-starflower --script "moveDown moveDown moveDown moveLeft moveLeft moveLeft rotateCcw"
//! ```

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hexic::config::{parse_run_args, RunConfig};
use hexic::core::{fixture, GameState, Layout};
use hexic::engine::{apply_script, parse_script, run_until_quiescent};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_run_args(&args, RunConfig::from_env())?;
    run(&config)
}

fn run(config: &RunConfig) -> Result<()> {
    let mut game = match config.board_text()? {
        Some(text) => {
            let board = fixture::load(&text, Layout::standard())
                .with_context(|| format!("invalid board '{}'", config.board.as_deref().unwrap_or("")))?;
            GameState::from_board(board, config.level, config.seed)
        }
        None => GameState::new(config.seed, config.level),
    };
    info!(seed = config.seed, level = config.level, "game created");

    match config.script_text()? {
        Some(text) => {
            let actions = parse_script(&text).context("failed to parse script")?;
            let report = apply_script(&mut game, &actions, config.max_ticks)
                .with_context(|| format!("script stopped after {} ticks", game.ticks()))?;
            info!(
                steps = report.steps,
                ticks = report.ticks,
                events = report.events.len(),
                "script finished"
            );
            for event in &report.events {
                info!(?event, "event");
            }
        }
        None => {
            let ticks = run_until_quiescent(&mut game, config.max_ticks)
                .context("board did not settle")?;
            info!(ticks, "board settled");
        }
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    } else {
        println!("{}", game.board());
        println!(
            "score {}  level {}  combos {}  cursor {}",
            game.score(),
            game.level(),
            game.combos_remaining(),
            game.cursor().describe()
        );
    }
    Ok(())
}
