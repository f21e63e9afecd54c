//! Engine configuration from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_GAME_DATA_PATH: &str = "data/game_data.json";

/// Parameters for the balance simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub players: u32,
    pub days: u32,
    pub battles_per_day: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            players: 100,
            days: 14,
            battles_per_day: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub game_data_path: PathBuf,
    /// Selects the seeded random source when set.
    pub rng_seed: Option<u64>,
    pub simulation: SimulationConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            game_data_path: PathBuf::from(DEFAULT_GAME_DATA_PATH),
            rng_seed: None,
            simulation: SimulationConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let sim = defaults.simulation;

        Self {
            game_data_path: lookup("GAME_DATA_PATH")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.game_data_path),
            rng_seed: parse_var(&lookup, "RNG_SEED"),
            simulation: SimulationConfig {
                players: parse_var(&lookup, "SIMULATION_PLAYERS").unwrap_or(sim.players),
                days: parse_var(&lookup, "SIMULATION_DAYS").unwrap_or(sim.days),
                battles_per_day: parse_var(&lookup, "SIMULATION_BATTLES_PER_DAY")
                    .unwrap_or(sim.battles_per_day),
            },
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable configuration value");
            None
        }
    }
}
