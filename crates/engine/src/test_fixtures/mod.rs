//! Common test helpers: the sample game data, a fixed instant and
//! ready-made players.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tomebound_domain::{
    BattleOutcome, GameData, ObjectiveKind, PlayerName, PlayerProgression, TomeDataId,
    UtcOffset,
};

use crate::infrastructure::clock::{PortRandom, SeededRandom};
use crate::infrastructure::game_data::load_from_str;
use crate::infrastructure::ports::{MockClockPort, MockPlayerRepo};

const SAMPLE_DATA: &str = include_str!("../../../../data/game_data.json");

pub fn game_data() -> GameData {
    load_from_str(SAMPLE_DATA).expect("sample game data is valid")
}

pub fn shared_data() -> Arc<GameData> {
    Arc::new(game_data())
}

/// Wednesday 2025-06-11 10:00 UTC.
pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 11, 10, 0, 0).unwrap()
}

pub fn seeded() -> Arc<SeededRandom> {
    Arc::new(SeededRandom::new(7))
}

pub fn clock_at(now: DateTime<Utc>) -> MockClockPort {
    let mut clock = MockClockPort::new();
    clock.expect_now().returning(move || now);
    clock
}

/// A fresh player with all three quest slots filled.
pub fn test_player() -> PlayerProgression {
    let data = game_data();
    let random = SeededRandom::new(11);
    let mut player = PlayerProgression::new(
        PlayerName::new("Tester").unwrap(),
        UtcOffset::UTC,
        &data,
        test_time(),
    );
    player.setup_quests(&data, test_time(), &mut PortRandom(&random));
    player
}

/// [`test_player`] after `wins` won battles have been fed to its quests.
/// Slot 0 always holds a daily battle quest, collectable after three wins.
pub fn player_with_wins(wins: u32) -> PlayerProgression {
    let data = game_data();
    let random = SeededRandom::new(13);
    let mut player = test_player();
    for _ in 0..wins {
        player
            .record_battle(
                BattleOutcome {
                    won: true,
                    rank_change: 25,
                    xp: 10,
                },
                &data,
                test_time(),
            )
            .unwrap();
        player.update_quests(
            &[ObjectiveKind::Battle],
            &data,
            test_time(),
            &mut PortRandom(&random),
        );
    }
    player
}

/// [`test_player`] holding one locked `wood` tome in slot 0.
pub fn player_with_tome() -> PlayerProgression {
    let data = game_data();
    let mut player = test_player();
    player
        .grant_tome(TomeDataId::new("wood"), &data, test_time())
        .unwrap();
    player
}

/// Repo mock that serves `player` for its own id.
pub fn repo_with(player: PlayerProgression) -> MockPlayerRepo {
    let mut repo = MockPlayerRepo::new();
    let player_id = player.id();
    repo.expect_get()
        .withf(move |id| *id == player_id)
        .returning(move |_| Ok(Some(player.clone())));
    repo
}
