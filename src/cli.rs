use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::core::config::{load_config, ConfigOverrides};
use crate::core::engine::Engine;
use crate::core::game::Context;
use crate::core::renderer::ScreenRenderer;
use crate::core::scheduler::TokioScheduler;
use crate::games::rand_num;

#[derive(Parser, Debug)]
#[command(name = "guessduel")]
#[command(about = "Guess the hidden number before the computer does")]
#[command(version)]
pub struct Cli {
    /// JSON config file (defaults to ./guessduel.json when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Smallest number the target can be
    #[arg(long)]
    pub min: Option<i32>,

    /// Largest number the target can be
    #[arg(long)]
    pub max: Option<i32>,

    /// Attempts shared by both players
    #[arg(short, long)]
    pub attempts: Option<u32>,

    /// Computer thinking time in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Line-based console instead of the full-screen UI
    #[arg(long)]
    pub plain: bool,

    /// Write logs here (the full-screen UI logs nowhere otherwise)
    #[arg(long, env = "GUESSDUEL_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            min_number: self.min,
            max_number: self.max,
            max_attempts: self.attempts,
            computer_delay_ms: self.delay_ms,
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), cli.plain)?;

    let config = load_config(cli.config.as_deref(), &cli.overrides())?;
    info!(?config, plain = cli.plain, "starting {}", rand_num::INFO.name);

    let (display_tx, display_rx) = mpsc::unbounded_channel();
    let (scheduler, wakeups) = TokioScheduler::channel();
    let game = rand_num::new_live_duel(config.clone(), scheduler, Context::new(display_tx))?;
    let engine = Engine::new(game, display_rx, wakeups);

    if cli.plain {
        return engine.run_plain(&rand_num::INFO).await;
    }

    let renderer = ScreenRenderer::new(rand_num::INFO, config.min_number, config.max_number);
    let terminal = ratatui::init();
    let result = engine.run(terminal, &renderer).await;
    ratatui::restore();
    result
}

fn init_tracing(log_file: Option<&Path>, plain: bool) -> Result<()> {
    let filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter("info"))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if plain => {
            tracing_subscriber::fmt()
                .with_env_filter(filter("warn"))
                .with_writer(std::io::stderr)
                .init();
        }
        // the full-screen UI owns the terminal
        None => {}
    }
    Ok(())
}
