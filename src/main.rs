//! Headless runner (default binary).
//!
//! Plays one game with scripted pseudo-random input at a fixed 16ms tick and
//! prints the final field. Useful for soak-testing the rules engine and for
//! watching its logs:
//!
//! ```text
//! RUST_LOG=stackfall_core=debug stackfall --seed 7 --frames 20000 --config game.json
//! ```

#[macro_use]
extern crate tracing;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stackfall::core::{Catalog, GameConfig, GameState, GridDisplay, SimpleRng, UniformRandomizer};
use stackfall::types::{InputSnapshot, TICK_MS};

const DEFAULT_FRAMES: u32 = 60 * 60 * 5;

/// Plays one headless game with scripted input and prints the final field.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed for both the piece randomizer and the scripted input
    #[arg(long, default_value_t = 1)]
    seed: u32,
    /// Upper bound on simulated 16ms frames
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u32,
    /// JSON game configuration; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    GameConfig::from_json_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Mostly idle, with occasional taps of each control
fn scripted_input(rng: &mut SimpleRng) -> InputSnapshot {
    let mut roll = |per_mille: u32| rng.next_range(1000) < per_mille;
    InputSnapshot {
        rotate_left: roll(10),
        rotate_right: roll(15),
        hard_drop: roll(4),
        down: roll(60),
        left: roll(80),
        right: roll(80),
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stackfall=info,stackfall_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let catalog = Catalog::standard();

    let mut display = GridDisplay::new(config.bounds());
    let mut game = GameState::new(&catalog, config, UniformRandomizer::new(args.seed))?;
    let mut input_rng = SimpleRng::new(args.seed.wrapping_add(1));

    info!(seed = args.seed, frames = args.frames, "starting headless game");
    let time = Instant::now();
    game.start(&mut display);

    let mut locks = 0u32;
    let mut lines = 0u32;
    let mut frame = 0;
    while frame < args.frames {
        frame += 1;
        let input = scripted_input(&mut input_rng);
        if !game.tick(TICK_MS, &input, &mut display) {
            continue;
        }

        if let Some(event) = game.take_last_event() {
            locks += 1;
            lines += event.lines_cleared;
            if event.game_over {
                warn!(frame, "topped out");
                break;
            }
        }
    }

    info!(
        "{frame} frames simulated in {:.3}s",
        time.elapsed().as_secs_f64()
    );
    print!("{}", display.render());
    println!(
        "pieces: {}, locked: {locks}, lines: {lines}, game time: {}ms, paint writes: {}",
        game.pieces_spawned(),
        game.now_ms(),
        display.writes()
    );

    Ok(())
}
