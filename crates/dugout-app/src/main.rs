// Lineup planner entry point.
//
// Startup sequence:
// 1. Parse CLI arguments, initialize tracing (stderr)
// 2. Load config, apply CLI overrides
// 3. Load the roster snapshot
// 4. Plan the lineup and print it to stdout
// 5. Optionally persist ratings and the lineup

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use dugout_lineup::Strategy;
use tracing::info;

use dugout_app::app;
use dugout_app::config;
use dugout_app::db;
use dugout_app::roster;

#[derive(Parser, Debug)]
#[command(name = "dugout")]
#[command(about = "Build a batting order from a roster snapshot", long_about = None)]
struct Cli {
    /// Directory holding `config/` and `defaults/`
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Roster CSV (overrides `data_paths.roster`)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Number of batting positions to fill
    #[arg(long)]
    size: Option<usize>,

    /// Search strategy: exhaustive, greedy or weight-assign
    #[arg(long, value_parser = parse_strategy)]
    strategy: Option<Strategy>,

    /// Largest permutation count the exhaustive search may enumerate
    #[arg(long)]
    ceiling: Option<u64>,

    /// Split the exhaustive search across threads
    #[arg(long)]
    parallel: bool,

    /// Save ratings and the lineup to the database
    #[arg(long)]
    persist: bool,
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    Strategy::from_str_opt(s).ok_or_else(|| format!("unknown strategy '{s}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. CLI + tracing
    let cli = Cli::parse();
    init_tracing()?;
    info!("dugout starting up");

    // 2. Config
    let mut config = config::load_config(&cli.base_dir).context("failed to load configuration")?;
    if let Some(size) = cli.size {
        anyhow::ensure!(size > 0, "--size must be greater than 0");
        config.lineup.size = size;
    }
    if let Some(strategy) = cli.strategy {
        config.lineup.strategy = strategy;
    }
    if let Some(ceiling) = cli.ceiling {
        anyhow::ensure!(ceiling > 0, "--ceiling must be greater than 0");
        config.lineup.permutation_ceiling = ceiling;
    }
    if cli.parallel {
        config.lineup.parallel = true;
    }
    info!(
        "Config loaded: size={}, strategy={:?}, ceiling={}, parallel={}",
        config.lineup.size,
        config.lineup.strategy,
        config.lineup.permutation_ceiling,
        config.lineup.parallel
    );

    // 3. Roster
    let roster_path = cli
        .roster
        .clone()
        .unwrap_or_else(|| resolve(&cli.base_dir, &config.data_paths.roster));
    let players = roster::load_roster(&roster_path)
        .with_context(|| format!("failed to load roster from {}", roster_path.display()))?;
    info!("Loaded {} players from {}", players.len(), roster_path.display());

    // 4. Plan
    let report = app::plan_lineup(players, config.lineup.options()).await?;
    print!("{}", report.render_table());

    // 5. Persist
    if cli.persist {
        let db_path = if config.db_path == ":memory:" {
            config.db_path.clone()
        } else {
            resolve(&cli.base_dir, &config.db_path).display().to_string()
        };
        let db = db::Database::open(&db_path).context("failed to open database")?;
        info!("Database opened at {}", db_path);
        app::persist_report(&db, &report)?;
    }

    Ok(())
}

/// Relative config paths are taken from `base_dir`.
fn resolve(base_dir: &Path, path: &str) -> PathBuf {
    base_dir.join(path)
}

/// Initialize tracing to stderr; stdout carries the lineup table.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dugout_app=info,dugout_lineup=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
