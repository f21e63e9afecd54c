//! Quest catalog rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CardId, QuestId, RewardId};

/// Number of concurrent quest slots per player.
pub const QUEST_SLOT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestPeriod {
    Daily,
    Weekly,
    Event,
}

impl QuestPeriod {
    /// Periods each quest slot accepts. Slot 2 only ever holds weekly quests.
    pub fn allowed_in_slot(&self, slot: usize) -> bool {
        match slot {
            0 => matches!(self, QuestPeriod::Daily),
            1 => matches!(self, QuestPeriod::Daily | QuestPeriod::Event),
            2 => matches!(self, QuestPeriod::Weekly),
            _ => false,
        }
    }
}

/// What kind of live counter an objective reads. Also the filter passed to
/// quest updates after a game event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    Battle,
    OpenTomes,
    UpgradeCards,
}

/// Which card a battle objective is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardTarget {
    /// No card constraint.
    #[default]
    Any,
    /// A fixed card from the catalog.
    Card(CardId),
    /// A card drawn from the player's collection once, at assignment.
    RandomOwned,
}

/// Objective parameters of a quest definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QuestObjective {
    /// Play (or win, with `requires_victory`) battles, optionally with a
    /// bound card in the deck (or leading it, with `as_leader`).
    #[serde(rename_all = "camelCase")]
    Battle {
        #[serde(default)]
        requires_victory: bool,
        #[serde(default)]
        as_leader: bool,
        #[serde(default)]
        target: CardTarget,
    },
    OpenTomes,
    UpgradeCards,
}

/// The part of an objective two active quests may not share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectiveSignature {
    pub kind: ObjectiveKind,
    pub requires_victory: bool,
    pub as_leader: bool,
}

impl QuestObjective {
    pub fn kind(&self) -> ObjectiveKind {
        match self {
            QuestObjective::Battle { .. } => ObjectiveKind::Battle,
            QuestObjective::OpenTomes => ObjectiveKind::OpenTomes,
            QuestObjective::UpgradeCards => ObjectiveKind::UpgradeCards,
        }
    }

    pub fn signature(&self) -> ObjectiveSignature {
        match self {
            QuestObjective::Battle {
                requires_victory,
                as_leader,
                ..
            } => ObjectiveSignature {
                kind: ObjectiveKind::Battle,
                requires_victory: *requires_victory,
                as_leader: *as_leader,
            },
            other => ObjectiveSignature {
                kind: other.kind(),
                requires_victory: false,
                as_leader: false,
            },
        }
    }
}

/// Reward definitions indexed by league. Leagues past the end of the list
/// use the last entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueRewards(Vec<RewardId>);

impl LeagueRewards {
    pub fn new(rewards: Vec<RewardId>) -> Self {
        Self(rewards)
    }

    pub fn single(reward: RewardId) -> Self {
        Self(vec![reward])
    }

    pub fn for_league(&self, league: usize) -> Option<&RewardId> {
        self.0.get(league).or_else(|| self.0.last())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RewardId> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One step of a phased quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestPhase {
    /// Progress needed to collect this phase.
    pub threshold: u32,
    pub rewards: LeagueRewards,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestDefinition {
    pub id: QuestId,
    pub period: QuestPeriod,
    /// Persists until completed instead of expiring with its period.
    #[serde(default)]
    pub permanent: bool,
    pub phases: Vec<QuestPhase>,
    pub objective: QuestObjective,
    /// Zero takes the definition out of random assignment.
    pub assignment_chance: f64,
    /// Minimum account level per quest slot index.
    #[serde(default)]
    pub min_level: [u32; QUEST_SLOT_COUNT],
    /// Hard end for event quests.
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

impl QuestDefinition {
    pub fn phase(&self, index: u32) -> Option<&QuestPhase> {
        self.phases.get(index as usize)
    }

    pub fn phase_count(&self) -> u32 {
        self.phases.len() as u32
    }

    pub fn min_level_for_slot(&self, slot: usize) -> u32 {
        self.min_level.get(slot).copied().unwrap_or(u32::MAX)
    }
}
