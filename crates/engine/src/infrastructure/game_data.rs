//! Static game data loading.
//!
//! The tables are read once at startup, validated, and shared as
//! `Arc<GameData>` for the life of the process.

use std::path::{Path, PathBuf};

use tomebound_domain::{DomainError, GameData};

#[derive(Debug, thiserror::Error)]
pub enum GameDataError {
    #[error("Failed to read game data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed game data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Inconsistent game data: {0}")]
    Invalid(#[from] DomainError),
}

/// Read, parse and validate the tables at `path`.
pub fn load_from_path(path: &Path) -> Result<GameData, GameDataError> {
    let json = std::fs::read_to_string(path).map_err(|source| GameDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = load_from_str(&json)?;

    tracing::info!(
        path = %path.display(),
        cards = data.cards.len(),
        quests = data.quests.len(),
        rewards = data.rewards.len(),
        tomes = data.tomes.len(),
        leagues = data.leagues.len(),
        "Game data loaded"
    );
    Ok(data)
}

pub fn load_from_str(json: &str) -> Result<GameData, GameDataError> {
    let data: GameData = serde_json::from_str(json)?;
    data.validate()?;
    Ok(data)
}
