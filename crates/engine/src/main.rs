//! Tomebound Engine - balance simulation entry point.

use std::sync::Arc;

use chrono::{NaiveTime, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tomebound_engine::infrastructure::clock::{ManualClock, SeededRandom, SystemRandom};
use tomebound_engine::infrastructure::config::EngineConfig;
use tomebound_engine::infrastructure::game_data;
use tomebound_engine::infrastructure::memory::InMemoryPlayerRepo;
use tomebound_engine::infrastructure::ports::RandomPort;
use tomebound_engine::simulation::BalanceSimulation;
use tomebound_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root so data paths resolve the same from any crate.
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tomebound_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::from_env();
    tracing::info!(
        game_data = %config.game_data_path.display(),
        seed = ?config.rng_seed,
        players = config.simulation.players,
        days = config.simulation.days,
        "Starting Tomebound simulation"
    );

    let data = Arc::new(game_data::load_from_path(&config.game_data_path)?);

    let random: Arc<dyn RandomPort> = match config.rng_seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(SystemRandom::new()),
    };
    let start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let clock = Arc::new(ManualClock::new(start));
    let players = Arc::new(InMemoryPlayerRepo::new());

    let app = Arc::new(App::new(data, players, clock.clone(), random.clone()));
    let report = BalanceSimulation::new(app, clock, random, config.simulation)
        .run()
        .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
