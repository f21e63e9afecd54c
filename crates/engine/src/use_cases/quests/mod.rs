//! Quest slot use cases.
//!
//! Collecting a finished phase and feeding game events into objectives.

mod collect_quest;
mod error;
mod update_quests;

use std::sync::Arc;

pub use collect_quest::{CollectQuest, QuestCollected};
pub use error::QuestError;
pub use update_quests::UpdateQuests;

/// Container for quest use cases.
pub struct QuestUseCases {
    pub collect: Arc<CollectQuest>,
    pub update: Arc<UpdateQuests>,
}

impl QuestUseCases {
    pub fn new(collect: Arc<CollectQuest>, update: Arc<UpdateQuests>) -> Self {
        Self { collect, update }
    }
}
