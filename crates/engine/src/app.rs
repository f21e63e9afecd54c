//! Application state and composition.

use std::sync::Arc;

use tomebound_domain::GameData;

use crate::infrastructure::ports::{ClockPort, PlayerRepo, RandomPort};
use crate::use_cases::player::{CreatePlayer, RecordBattle, SetDeck, UpgradeCard};
use crate::use_cases::quests::{CollectQuest, UpdateQuests};
use crate::use_cases::tomes::{ClaimTome, GrantTome, OpenTome, RushTome, StartTomeUnlock};
use crate::use_cases::{PlayerUseCases, QuestUseCases, TomeUseCases};

/// Main application state.
///
/// Holds the shared game data, the player store and all use cases.
pub struct App {
    pub data: Arc<GameData>,
    pub players: Arc<dyn PlayerRepo>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub player: PlayerUseCases,
    pub quests: QuestUseCases,
    pub tomes: TomeUseCases,
}

impl App {
    pub fn new(
        data: Arc<GameData>,
        players: Arc<dyn PlayerRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let player = PlayerUseCases::new(
            Arc::new(CreatePlayer::new(
                players.clone(),
                data.clone(),
                clock.clone(),
                random.clone(),
            )),
            Arc::new(RecordBattle::new(
                players.clone(),
                data.clone(),
                clock.clone(),
                random.clone(),
            )),
            Arc::new(SetDeck::new(players.clone())),
            Arc::new(UpgradeCard::new(
                players.clone(),
                data.clone(),
                clock.clone(),
                random.clone(),
            )),
        );

        let quests = QuestUseCases::new(
            Arc::new(CollectQuest::new(
                players.clone(),
                data.clone(),
                clock.clone(),
                random.clone(),
            )),
            Arc::new(UpdateQuests::new(
                players.clone(),
                data.clone(),
                clock.clone(),
                random.clone(),
            )),
        );

        let tomes = TomeUseCases::new(
            Arc::new(GrantTome::new(
                players.clone(),
                data.clone(),
                clock.clone(),
            )),
            Arc::new(StartTomeUnlock::new(
                players.clone(),
                data.clone(),
                clock.clone(),
            )),
            Arc::new(RushTome::new(
                players.clone(),
                data.clone(),
                clock.clone(),
            )),
            Arc::new(OpenTome::new(
                players.clone(),
                data.clone(),
                clock.clone(),
                random.clone(),
            )),
            Arc::new(ClaimTome::new(
                players.clone(),
                data.clone(),
                clock,
                random,
            )),
        );

        Self {
            data,
            players,
            use_cases: UseCases {
                player,
                quests,
                tomes,
            },
        }
    }
}
