use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, SpeedTier, WallMode};
use grid_snake::modes::HumanMode;
use grid_snake::render::{DEFAULT_CELL_WIDTH, Renderer};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a grid, in your terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Let the snake pass through walls and reappear on the other side
    #[arg(long)]
    wall_pass: bool,

    /// Tick speed
    #[arg(long)]
    speed: Option<Speed>,

    /// Terminal columns per grid cell, including the one-column gutter
    #[arg(long, default_value_t = DEFAULT_CELL_WIDTH)]
    cell_width: u16,

    /// Where to write logs (the terminal is taken by the game)
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Speed {
    Slow,
    Normal,
    Fast,
}

impl From<Speed> for SpeedTier {
    fn from(speed: Speed) -> Self {
        match speed {
            Speed::Slow => SpeedTier::Slow,
            Speed::Normal => SpeedTier::Normal,
            Speed::Fast => SpeedTier::Fast,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if self.wall_pass {
            config.wall_mode = WallMode::Pass;
        }
        if let Some(speed) = self.speed {
            config.speed = speed.into();
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = cli.game_config()?;
    tracing::info!(?config, "starting grid_snake");

    let mut human_mode = HumanMode::new(config, Renderer::with_cell_width(cli.cell_width))?;
    human_mode.run().await?;

    Ok(())
}
