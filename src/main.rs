use std::fs::{self, OpenOptions};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_tui::analysis::{Analyst, GeminiAnalyst, DEFAULT_MODEL};
use snake_tui::game::GameConfig;
use snake_tui::modes::{print_leaderboard, PlayMode};
use snake_tui::storage::{FileStore, KeyValueStore, Leaderboard};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "snake_tui")]
#[command(version, about = "Terminal Snake with a leaderboard and AI commentary")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Player name to pre-fill (defaults to the last one used)
    #[arg(long)]
    name: Option<String>,

    /// Board size (the board is square)
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u16).range(8..=40))]
    grid_size: u16,

    /// Directory for the leaderboard and saved player name
    #[arg(long, env = "SNAKE_DATA_DIR", default_value = ".snake_tui")]
    data_dir: PathBuf,

    /// Gemini API key; post-game commentary is disabled without it
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model used for commentary
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Log file (defaults to snake.log inside the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
    /// Print the saved leaderboard and exit
    Leaderboard,
}

/// The terminal belongs to the TUI, so logs go to a file.
/// Without a usable log file the game runs with logging off.
fn init_logging(path: &Path) -> bool {
    match try_init_logging(path) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("Logging disabled: {err:#}");
            false
        }
    }
}

fn try_init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snake_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| cli.data_dir.join("snake.log"));
    init_logging(&log_file);

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&cli.data_dir));

    match cli.mode {
        Mode::Play => {
            let config = GameConfig::new(usize::from(cli.grid_size));

            let analyst = cli
                .api_key
                .filter(|key| !key.trim().is_empty())
                .map(|key| Arc::new(GeminiAnalyst::new(key, cli.model.clone())) as Arc<dyn Analyst>);

            info!(
                data_dir = ?cli.data_dir,
                grid_size = config.grid_size,
                analysis = analyst.is_some(),
                "starting snake"
            );

            let mut play_mode = PlayMode::new(config, store, analyst, cli.name);
            play_mode.run().await?;
        }
        Mode::Leaderboard => {
            let leaderboard = Leaderboard::new(store);
            print_leaderboard(&leaderboard, &mut stdout().lock())?;
        }
    }

    Ok(())
}
