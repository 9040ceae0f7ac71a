//! Runs one SET game in the terminal.
//!
//! Non-human players are driven by generators; human players read
//! `<player> <slot>` lines from stdin.

mod config;
mod console;
mod input;
mod metrics;
mod rules;

use std::sync::Arc;

use anyhow::Error;
use config::{CliOverrides, ServerConfig};
use console::ConsoleDisplay;
use ctrlc::set_handler;
use log::info;
use metrics::MetricsDisplay;
use pico_args::Arguments;
use rules::ClassicSet;
use set_arena::{DisplaySink, GameSession};

const HELP: &str = "\
Run a SET game with a console display

USAGE:
  sa_server [OPTIONS]

OPTIONS:
  --config     FILE        JSON game configuration  [default: built from env]
  --players    N           Number of players        [default: env SA_PLAYERS or 2]
  --humans     N           Players reading stdin    [default: env SA_HUMAN_PLAYERS or 0]
  --round-ms   MS          Round length, 0 counts up, negative hides the clock
  --metrics    IP:PORT     Prometheus scrape address [default: env SA_METRICS_BIND or off]
  --seed       N           Fixed deck shuffle seed

FLAGS:
  --hints                  Show every match on the table after each deal
  -h, --help               Print help information

INPUT:
  <player> <slot>          Toggle a token for a human player
  quit                     End the game

ENVIRONMENT:
  SA_TABLE_SIZE, SA_DECK_SIZE, SA_PLAYERS, SA_HUMAN_PLAYERS, SA_ROUND_MS,
  SA_POINT_FREEZE_MS, SA_PENALTY_FREEZE_MS, SA_HINTS, SA_SEED, ...
  (See .env.example for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let cli = CliOverrides {
        config_file: pargs.opt_value_from_str("--config")?,
        players: pargs.opt_value_from_str("--players")?,
        humans: pargs.opt_value_from_str("--humans")?,
        round_ms: pargs.opt_value_from_str("--round-ms")?,
        hints: pargs.contains("--hints"),
        metrics: pargs.opt_value_from_str("--metrics")?,
        seed: pargs.opt_value_from_str("--seed")?,
    };

    env_logger::builder().format_target(false).init();

    let config = ServerConfig::from_env(cli)?;
    let humans = config.game.human_players;
    info!(
        "Starting game: {} players ({} human), {} slots, clock {}",
        config.game.players,
        humans,
        config.game.table_size,
        config.game.timer_mode()
    );

    let display: Arc<dyn DisplaySink> = match config.metrics {
        Some(addr) => {
            metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
            info!("Metrics available at http://{}/metrics", addr);
            Arc::new(MetricsDisplay::new(ConsoleDisplay::new()))
        }
        None => Arc::new(ConsoleDisplay::new()),
    };

    let mut session = GameSession::new(config.game, Arc::new(ClassicSet), display)?;
    if let Some(seed) = config.seed {
        session = session.with_seed(seed);
    }
    let game = session.start();

    // Catching signals for exit.
    let terminator = game.terminator();
    set_handler(move || terminator.terminate())?;

    if humans > 0 {
        info!("Type '<player> <slot>' to play, 'quit' to stop");
        tokio::spawn(input::forward_input(
            input::spawn_stdin_reader(),
            game.players().to_vec(),
            humans,
            game.terminator(),
        ));
    }

    let summary = game.join().await?;
    for (player, score) in &summary.scores {
        info!("Player {}: {} points", player, score);
    }
    println!("{}", serde_json::to_string(&summary)?);

    Ok(())
}
