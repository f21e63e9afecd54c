//! Quest slots
//!
//! A player always has exactly three slots. Each slot holds at most one
//! active quest; expiration and replenishment happen lazily inside
//! [`QuestBook::update`], never on a timer.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::common::{next_weekday, timezone_midnight, UtcOffset};
use crate::error::DomainError;
use crate::game_data::{
    CardTarget, GameData, ObjectiveKind, ObjectiveSignature, QuestDefinition, QuestObjective,
    QuestPeriod, QUEST_SLOT_COUNT,
};
use crate::ids::{CardId, QuestId, RewardId};
use crate::random::RandomSource;
use crate::value_objects::{CardCollection, Deck, PlayerStats};

/// Player state that quest assignment and progress read.
#[derive(Debug, Clone, Copy)]
pub struct QuestContext<'a> {
    /// Account level, checked against per-slot minimums.
    pub level: u32,
    /// League index at the player's current rank.
    pub league: usize,
    pub offset: UtcOffset,
    pub stats: PlayerStats,
    pub collection: &'a CardCollection,
    pub deck: &'a Deck,
}

/// Progress bookkeeping of an assigned quest.
///
/// Stored counters are the live values at the last update; progress only
/// grows by the difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObjectiveState {
    #[serde(rename_all = "camelCase")]
    Battle {
        games_played: u32,
        games_won: u32,
        /// Card bound at assignment time.
        target: Option<CardId>,
        progress: u32,
    },
    #[serde(rename_all = "camelCase")]
    Counter { last_seen: u32, progress: u32 },
}

impl ObjectiveState {
    /// Initial state for a fresh assignment. `None` when the objective
    /// wants a random owned card and the player owns none.
    fn seed(
        objective: &QuestObjective,
        ctx: &QuestContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> Option<Self> {
        match objective {
            QuestObjective::Battle { target, .. } => {
                let target = match target {
                    CardTarget::Any => None,
                    CardTarget::Card(card_id) => Some(card_id.clone()),
                    CardTarget::RandomOwned => {
                        if ctx.collection.is_empty() {
                            return None;
                        }
                        let index = rng.gen_index(ctx.collection.len());
                        Some(ctx.collection.iter().nth(index)?.card_id.clone())
                    }
                };
                Some(ObjectiveState::Battle {
                    games_played: ctx.stats.games_played,
                    games_won: ctx.stats.games_won,
                    target,
                    progress: 0,
                })
            }
            other => Some(ObjectiveState::Counter {
                last_seen: ctx.stats.counter(other.kind()),
                progress: 0,
            }),
        }
    }

    pub fn progress(&self) -> u32 {
        match self {
            ObjectiveState::Battle { progress, .. } | ObjectiveState::Counter { progress, .. } => {
                *progress
            }
        }
    }

    pub fn target(&self) -> Option<&CardId> {
        match self {
            ObjectiveState::Battle { target, .. } => target.as_ref(),
            ObjectiveState::Counter { .. } => None,
        }
    }

    /// Apply counter growth since the last update. Returns the amount
    /// added to progress.
    fn advance(&mut self, objective: &QuestObjective, stats: PlayerStats, deck: &Deck) -> u32 {
        match (self, objective) {
            (
                ObjectiveState::Battle {
                    games_played,
                    games_won,
                    target,
                    progress,
                },
                QuestObjective::Battle {
                    requires_victory,
                    as_leader,
                    ..
                },
            ) => {
                let delta = if *requires_victory {
                    stats.games_won.saturating_sub(*games_won)
                } else {
                    stats.games_played.saturating_sub(*games_played)
                };
                *games_played = (*games_played).max(stats.games_played);
                *games_won = (*games_won).max(stats.games_won);

                let satisfied = match target {
                    None => true,
                    Some(card_id) if *as_leader => deck.is_leader(card_id),
                    Some(card_id) => deck.contains(card_id),
                };
                if !satisfied {
                    return 0;
                }
                *progress = progress.saturating_add(delta);
                delta
            }
            (ObjectiveState::Counter { last_seen, progress }, objective) => {
                let live = stats.counter(objective.kind());
                let delta = live.saturating_sub(*last_seen);
                *last_seen = (*last_seen).max(live);
                *progress = progress.saturating_add(delta);
                delta
            }
            // Objective type changed under an assigned quest
            _ => 0,
        }
    }
}

/// One quest slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestInstance {
    slot: usize,
    active: bool,
    quest_id: Option<QuestId>,
    league: usize,
    collected: u32,
    /// `None` only while a permanent quest is active.
    expires_at: Option<DateTime<Utc>>,
    objective: Option<ObjectiveState>,
}

impl QuestInstance {
    fn empty(slot: usize, now: DateTime<Utc>) -> Self {
        Self {
            slot,
            active: false,
            quest_id: None,
            league: 0,
            collected: 0,
            expires_at: Some(now),
            objective: None,
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn quest_id(&self) -> Option<&QuestId> {
        self.quest_id.as_ref()
    }

    /// League snapshot taken at assignment.
    pub fn league(&self) -> usize {
        self.league
    }

    /// Phases collected so far.
    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn objective(&self) -> Option<&ObjectiveState> {
        self.objective.as_ref()
    }

    pub fn progress(&self) -> u32 {
        self.objective.as_ref().map_or(0, ObjectiveState::progress)
    }

    fn is_past_expiry(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }

    /// Inactive and past expiration: ready for a new assignment.
    pub fn is_eligible(&self, now: DateTime<Utc>) -> bool {
        !self.active && self.expires_at.map_or(true, |at| now >= at)
    }
}

/// Emitted by quest book mutations for the caller to log or forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestEvent {
    Assigned {
        slot: usize,
        quest_id: QuestId,
    },
    Expired {
        slot: usize,
        quest_id: QuestId,
    },
    Progressed {
        slot: usize,
        quest_id: QuestId,
        added: u32,
        progress: u32,
    },
    /// The slot references a quest no longer in the catalog.
    DefinitionMissing {
        slot: usize,
        quest_id: QuestId,
    },
}

/// Outcome of a successful collect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseCollected {
    pub slot: usize,
    pub quest_id: QuestId,
    /// Index of the phase just collected.
    pub phase: u32,
    /// True when this was the final phase.
    pub completed: bool,
}

/// The player's fixed array of quest slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestBook {
    slots: [QuestInstance; QUEST_SLOT_COUNT],
}

impl QuestBook {
    /// Three inactive slots, all immediately eligible.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            slots: std::array::from_fn(|slot| QuestInstance::empty(slot, now)),
        }
    }

    pub fn slots(&self) -> &[QuestInstance] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Result<&QuestInstance, DomainError> {
        DomainError::check_slot(index, QUEST_SLOT_COUNT)?;
        Ok(&self.slots[index])
    }

    /// Try to fill every slot. Slots without an eligible definition stay
    /// inactive.
    pub fn setup_defaults(
        &mut self,
        data: &GameData,
        ctx: &QuestContext<'_>,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Vec<QuestEvent> {
        let mut events = Vec::new();
        for slot in 0..QUEST_SLOT_COUNT {
            if let Some(quest_id) = self.assign_into(slot, data, ctx, now, rng) {
                events.push(QuestEvent::Assigned { slot, quest_id });
            }
        }
        events
    }

    /// Assign a random eligible definition to an inactive slot.
    ///
    /// Returns `Ok(None)` when nothing in the catalog qualifies.
    pub fn assign_random_quest(
        &mut self,
        slot: usize,
        data: &GameData,
        ctx: &QuestContext<'_>,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Result<Option<QuestId>, DomainError> {
        DomainError::check_slot(slot, QUEST_SLOT_COUNT)?;
        if self.slots[slot].active {
            return Err(DomainError::invalid_state_transition(format!(
                "quest slot {slot} already holds an active quest"
            )));
        }
        Ok(self.assign_into(slot, data, ctx, now, rng))
    }

    fn assign_into(
        &mut self,
        slot: usize,
        data: &GameData,
        ctx: &QuestContext<'_>,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Option<QuestId> {
        let taken = self.active_signatures(data, slot);
        let owns_cards = !ctx.collection.is_empty();

        let definition = data.random_quest_definition(
            |q| {
                q.assignment_chance > 0.0
                    && q.period.allowed_in_slot(slot)
                    && ctx.level >= q.min_level_for_slot(slot)
                    && !taken.contains(&q.objective.signature())
                    && q.ends_at.map_or(true, |end| end > now)
                    && (owns_cards || !wants_owned_card(&q.objective))
            },
            rng,
        )?;

        let objective = ObjectiveState::seed(&definition.objective, ctx, rng)?;
        self.slots[slot] = QuestInstance {
            slot,
            active: true,
            quest_id: Some(definition.id.clone()),
            league: ctx.league,
            collected: 0,
            expires_at: period_end(definition, now, ctx.offset),
            objective: Some(objective),
        };
        Some(definition.id.clone())
    }

    fn active_signatures(&self, data: &GameData, except: usize) -> Vec<ObjectiveSignature> {
        self.slots
            .iter()
            .filter(|s| s.active && s.slot != except)
            .filter_map(|s| s.quest_id.as_ref())
            .filter_map(|id| data.quest_definition(id).ok())
            .map(|q| q.objective.signature())
            .collect()
    }

    /// Expire, replenish, then apply progress for objectives of `kinds`.
    ///
    /// Expiration and replenishment run for every slot regardless of
    /// `kinds`. A freshly assigned slot takes no progress from this call.
    pub fn update(
        &mut self,
        kinds: &[ObjectiveKind],
        data: &GameData,
        ctx: &QuestContext<'_>,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Vec<QuestEvent> {
        let mut events = Vec::new();

        // Expire everything first so stale slots don't block reassignment.
        for (slot, instance) in self.slots.iter_mut().enumerate() {
            if instance.active && instance.is_past_expiry(now) {
                instance.active = false;
                if let Some(quest_id) = instance.quest_id.clone() {
                    events.push(QuestEvent::Expired { slot, quest_id });
                }
            }
        }

        for slot in 0..QUEST_SLOT_COUNT {
            if self.slots[slot].is_eligible(now) {
                if let Some(quest_id) = self.assign_into(slot, data, ctx, now, rng) {
                    events.push(QuestEvent::Assigned { slot, quest_id });
                }
                continue;
            }

            let instance = &mut self.slots[slot];
            if !instance.active {
                continue;
            }
            let Some(quest_id) = instance.quest_id.clone() else {
                continue;
            };
            let Ok(definition) = data.quest_definition(&quest_id) else {
                events.push(QuestEvent::DefinitionMissing { slot, quest_id });
                continue;
            };
            if !kinds.contains(&definition.objective.kind()) {
                continue;
            }
            if let Some(state) = instance.objective.as_mut() {
                let added = state.advance(&definition.objective, ctx.stats, ctx.deck);
                if added > 0 {
                    events.push(QuestEvent::Progressed {
                        slot,
                        quest_id,
                        added,
                        progress: state.progress(),
                    });
                }
            }
        }

        events
    }

    /// Reward definition the current phase pays out, if it can be collected
    /// right now.
    pub fn claimable_reward(
        &self,
        slot: usize,
        data: &GameData,
        now: DateTime<Utc>,
    ) -> Result<RewardId, DomainError> {
        DomainError::check_slot(slot, QUEST_SLOT_COUNT)?;
        let instance = &self.slots[slot];
        if !instance.active {
            return Err(DomainError::NotCollectable { slot });
        }
        if instance.is_past_expiry(now) {
            return Err(DomainError::QuestExpired { slot });
        }
        let quest_id = instance.quest_id.as_ref().ok_or_else(|| {
            DomainError::invariant(format!("active quest slot {slot} has no definition"))
        })?;
        let definition = data.quest_definition(quest_id)?;
        let phase = definition
            .phase(instance.collected)
            .ok_or(DomainError::NotCollectable { slot })?;
        if instance.progress() < phase.threshold {
            return Err(DomainError::NotCollectable { slot });
        }
        phase
            .rewards
            .for_league(instance.league)
            .cloned()
            .ok_or_else(|| DomainError::not_found("RewardDefinition", quest_id.as_str()))
    }

    pub fn is_collectable(&self, slot: usize, data: &GameData, now: DateTime<Utc>) -> bool {
        self.claimable_reward(slot, data, now).is_ok()
    }

    /// Mark the current phase collected. The reward itself is rolled by the
    /// caller from [`QuestBook::claimable_reward`].
    ///
    /// After the final phase the slot goes inactive. A periodic quest keeps
    /// its expiration; a permanent one expires at the next period boundary.
    pub fn collect(
        &mut self,
        slot: usize,
        data: &GameData,
        offset: UtcOffset,
        now: DateTime<Utc>,
    ) -> Result<PhaseCollected, DomainError> {
        self.claimable_reward(slot, data, now)?;

        let instance = &mut self.slots[slot];
        let quest_id = instance
            .quest_id
            .clone()
            .ok_or_else(|| DomainError::invariant(format!("quest slot {slot} lost its quest")))?;
        let definition = data.quest_definition(&quest_id)?;

        let phase = instance.collected;
        instance.collected += 1;
        let completed = instance.collected >= definition.phase_count();
        if completed {
            instance.active = false;
            if definition.permanent || instance.expires_at.is_none() {
                instance.expires_at = Some(completion_boundary(definition.period, now, offset));
            }
        }

        Ok(PhaseCollected {
            slot,
            quest_id,
            phase,
            completed,
        })
    }
}

fn wants_owned_card(objective: &QuestObjective) -> bool {
    matches!(
        objective,
        QuestObjective::Battle {
            target: CardTarget::RandomOwned,
            ..
        }
    )
}

/// Expiration of a fresh assignment. Permanent quests have none.
fn period_end(
    definition: &QuestDefinition,
    now: DateTime<Utc>,
    offset: UtcOffset,
) -> Option<DateTime<Utc>> {
    if definition.permanent {
        return None;
    }
    Some(match definition.period {
        QuestPeriod::Daily => timezone_midnight(now, offset, 1),
        QuestPeriod::Weekly => next_weekday(now, offset, Weekday::Mon),
        QuestPeriod::Event => definition
            .ends_at
            .unwrap_or_else(|| timezone_midnight(now, offset, 1)),
    })
}

/// When a completed permanent quest frees its slot.
fn completion_boundary(period: QuestPeriod, now: DateTime<Utc>, offset: UtcOffset) -> DateTime<Utc> {
    match period {
        QuestPeriod::Weekly => next_weekday(now, offset, Weekday::Mon),
        QuestPeriod::Daily | QuestPeriod::Event => timezone_midnight(now, offset, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_data::fixtures::{battle_quest, game_data};
    use crate::game_data::{LeagueRewards, QuestPhase};
    use crate::random::testing::ScriptedRandom;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        // Wednesday
        Utc.with_ymd_and_hms(2024, 3, 13, 10, 0, 0).unwrap()
    }

    struct Player {
        collection: CardCollection,
        deck: Deck,
        stats: PlayerStats,
        level: u32,
    }

    impl Player {
        fn new() -> Self {
            let mut collection = CardCollection::new();
            collection.add(&CardId::new("c_squire"), 4);
            Self {
                collection,
                deck: Deck::new(None, vec![CardId::new("c_squire")]),
                stats: PlayerStats::default(),
                level: 1,
            }
        }

        fn ctx(&self) -> QuestContext<'_> {
            QuestContext {
                level: self.level,
                league: 0,
                offset: UtcOffset::UTC,
                stats: self.stats,
                collection: &self.collection,
                deck: &self.deck,
            }
        }

        fn win(&mut self, n: u32) {
            for _ in 0..n {
                self.stats.record_battle(true);
            }
        }
    }

    /// Book with `quest` forced into `slot` (the only candidate).
    fn book_with(data: &GameData, player: &Player, slot: usize) -> QuestBook {
        let mut book = QuestBook::new(now());
        let assigned = book
            .assign_random_quest(slot, data, &player.ctx(), now(), &mut ScriptedRandom::new())
            .unwrap();
        assert!(assigned.is_some());
        book
    }

    mod assignment {
        use super::*;

        #[test]
        fn setup_fills_every_slot() {
            let data = game_data();
            let player = Player::new();
            let mut book = QuestBook::new(now());

            let events = book.setup_defaults(&data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert_eq!(events.len(), 3);
            assert!(book.slots().iter().all(QuestInstance::is_active));
            assert_eq!(
                book.slot(2).unwrap().quest_id().map(QuestId::as_str),
                Some("weekly_tomes")
            );
        }

        #[test]
        fn slot_below_min_level_stays_inactive() {
            let mut data = game_data();
            for quest in &mut data.quests {
                quest.min_level = [1, 1, 10];
            }
            let player = Player::new();
            let mut book = QuestBook::new(now());

            book.setup_defaults(&data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert!(book.slot(0).unwrap().is_active());
            assert!(!book.slot(2).unwrap().is_active());
            assert!(book.slot(2).unwrap().expires_at().is_some());
        }

        #[test]
        fn active_signatures_are_never_duplicated() {
            let data = game_data();
            let player = Player::new();
            let mut book = QuestBook::new(now());

            // index 0 picks daily_play for slot 0
            book.assign_random_quest(0, &data, &player.ctx(), now(), &mut ScriptedRandom::new())
                .unwrap();
            // daily_play is excluded, so slot 1 can only get daily_win
            let second = book
                .assign_random_quest(1, &data, &player.ctx(), now(), &mut ScriptedRandom::new())
                .unwrap();
            assert_eq!(second.as_ref().map(QuestId::as_str), Some("daily_win"));
        }

        #[test]
        fn zero_chance_definitions_are_skipped() {
            let mut data = game_data();
            data.quests[0].assignment_chance = 0.0;
            let player = Player::new();
            let mut book = QuestBook::new(now());

            let id = book
                .assign_random_quest(0, &data, &player.ctx(), now(), &mut ScriptedRandom::new())
                .unwrap();
            assert_eq!(id.as_ref().map(QuestId::as_str), Some("daily_win"));
        }

        #[test]
        fn assigning_an_active_slot_fails() {
            let data = game_data();
            let player = Player::new();
            let mut book = book_with(&data, &player, 0);
            let before = book.clone();

            let result =
                book.assign_random_quest(0, &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert!(matches!(result, Err(DomainError::InvalidStateTransition(_))));
            assert_eq!(book, before);
        }

        #[test]
        fn daily_expires_at_next_midnight_and_weekly_on_monday() {
            let data = game_data();
            let player = Player::new();
            let mut book = QuestBook::new(now());
            book.setup_defaults(&data, &player.ctx(), now(), &mut ScriptedRandom::new());

            assert_eq!(
                book.slot(0).unwrap().expires_at(),
                Some(Utc.with_ymd_and_hms(2024, 3, 14, 0, 0, 0).unwrap())
            );
            assert_eq!(
                book.slot(2).unwrap().expires_at(),
                Some(Utc.with_ymd_and_hms(2024, 3, 18, 0, 0, 0).unwrap())
            );
        }

        #[test]
        fn random_owned_card_is_bound_once() {
            let mut data = game_data();
            data.quests = vec![QuestDefinition {
                objective: QuestObjective::Battle {
                    requires_victory: false,
                    as_leader: false,
                    target: CardTarget::RandomOwned,
                },
                ..battle_quest("play_with", QuestPeriod::Daily, false)
            }];
            let player = Player::new();
            let book = book_with(&data, &player, 0);

            let target = book.slot(0).unwrap().objective().and_then(ObjectiveState::target);
            assert_eq!(target.map(CardId::as_str), Some("c_squire"));
        }

        #[test]
        fn random_owned_card_needs_a_collection() {
            let mut data = game_data();
            data.quests = vec![QuestDefinition {
                objective: QuestObjective::Battle {
                    requires_victory: false,
                    as_leader: false,
                    target: CardTarget::RandomOwned,
                },
                ..battle_quest("play_with", QuestPeriod::Daily, false)
            }];
            let mut player = Player::new();
            player.collection = CardCollection::new();
            let mut book = QuestBook::new(now());

            let id = book
                .assign_random_quest(0, &data, &player.ctx(), now(), &mut ScriptedRandom::new())
                .unwrap();
            assert!(id.is_none());
        }

        #[test]
        fn event_quest_expires_at_its_end() {
            let mut data = game_data();
            let ends_at = now() + Duration::days(3);
            data.quests = vec![QuestDefinition {
                ends_at: Some(ends_at),
                ..battle_quest("festival", QuestPeriod::Event, false)
            }];
            let player = Player::new();
            let book = book_with(&data, &player, 1);
            assert_eq!(book.slot(1).unwrap().expires_at(), Some(ends_at));
        }

        #[test]
        fn finished_event_is_not_assigned() {
            let mut data = game_data();
            data.quests = vec![QuestDefinition {
                ends_at: Some(now() - Duration::hours(1)),
                ..battle_quest("festival", QuestPeriod::Event, false)
            }];
            let player = Player::new();
            let mut book = QuestBook::new(now());
            let id = book
                .assign_random_quest(1, &data, &player.ctx(), now(), &mut ScriptedRandom::new())
                .unwrap();
            assert!(id.is_none());
        }
    }

    mod progress {
        use super::*;

        #[test]
        fn win_delta_accumulates_and_becomes_collectable() {
            let data = game_data();
            let mut player = Player::new();
            let mut book = QuestBook::new(now());
            // index 1 among the two dailies picks daily_win (threshold 3)
            book.assign_random_quest(
                0,
                &data,
                &player.ctx(),
                now(),
                &mut ScriptedRandom::new().with_ints(&[1]),
            )
            .unwrap();
            assert!(!book.is_collectable(0, &data, now()));

            player.win(5);
            let events = book.update(
                &[ObjectiveKind::Battle],
                &data,
                &player.ctx(),
                now(),
                &mut ScriptedRandom::new(),
            );

            assert_eq!(book.slot(0).unwrap().progress(), 5);
            assert!(book.is_collectable(0, &data, now()));
            assert!(events.contains(&QuestEvent::Progressed {
                slot: 0,
                quest_id: QuestId::new("daily_win"),
                added: 5,
                progress: 5,
            }));
        }

        #[test]
        fn progress_is_measured_from_assignment() {
            let data = game_data();
            let mut player = Player::new();
            player.win(10);
            let mut book = book_with(&data, &player, 0);

            book.update(&[ObjectiveKind::Battle], &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert_eq!(book.slot(0).unwrap().progress(), 0);

            player.win(1);
            book.update(&[ObjectiveKind::Battle], &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert_eq!(book.slot(0).unwrap().progress(), 1);
        }

        #[test]
        fn unrelated_kinds_do_not_progress() {
            let data = game_data();
            let mut player = Player::new();
            let mut book = book_with(&data, &player, 0);

            player.win(2);
            book.update(&[ObjectiveKind::OpenTomes], &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert_eq!(book.slot(0).unwrap().progress(), 0);

            // counters were not ratcheted, so the wins still count later
            book.update(&[ObjectiveKind::Battle], &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert_eq!(book.slot(0).unwrap().progress(), 2);
        }

        #[test]
        fn unmet_card_constraint_stalls_but_ratchets_counters() {
            let mut data = game_data();
            data.quests = vec![QuestDefinition {
                objective: QuestObjective::Battle {
                    requires_victory: false,
                    as_leader: true,
                    target: CardTarget::Card(CardId::new("c_archer")),
                },
                ..battle_quest("lead_archer", QuestPeriod::Daily, false)
            }];
            let mut player = Player::new();
            let mut book = book_with(&data, &player, 0);

            player.win(3);
            book.update(&[ObjectiveKind::Battle], &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert_eq!(book.slot(0).unwrap().progress(), 0);

            player.deck = Deck::new(Some(CardId::new("c_archer")), vec![]);
            player.win(1);
            book.update(&[ObjectiveKind::Battle], &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert_eq!(book.slot(0).unwrap().progress(), 1);
        }

        #[test]
        fn counter_objective_tracks_its_own_stat() {
            let mut data = game_data();
            data.quests = vec![QuestDefinition {
                objective: QuestObjective::OpenTomes,
                ..battle_quest("open_tomes", QuestPeriod::Daily, false)
            }];
            let mut player = Player::new();
            let mut book = book_with(&data, &player, 0);

            player.win(4);
            player.stats.tomes_opened = 2;
            book.update(&[ObjectiveKind::OpenTomes], &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert_eq!(book.slot(0).unwrap().progress(), 2);
        }
    }

    mod expiry {
        use super::*;

        #[test]
        fn expired_slot_is_replaced_on_any_update() {
            let data = game_data();
            let player = Player::new();
            let mut book = book_with(&data, &player, 0);
            let later = now() + Duration::days(1);

            let events = book.update(&[], &data, &player.ctx(), later, &mut ScriptedRandom::new());
            // other slots were empty and get filled by the same call
            assert_eq!(
                &events[..2],
                &[
                    QuestEvent::Expired {
                        slot: 0,
                        quest_id: QuestId::new("daily_play"),
                    },
                    QuestEvent::Assigned {
                        slot: 0,
                        quest_id: QuestId::new("daily_play"),
                    },
                ]
            );
            assert_eq!(
                book.slot(0).unwrap().expires_at(),
                Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
            );
        }

        #[test]
        fn dailies_expiring_together_can_swap_definitions() {
            let data = game_data();
            let player = Player::new();
            let mut book = QuestBook::new(now());
            book.setup_defaults(&data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert_eq!(book.slot(0).unwrap().quest_id().map(QuestId::as_str), Some("daily_play"));
            assert_eq!(book.slot(1).unwrap().quest_id().map(QuestId::as_str), Some("daily_win"));

            // highest index picks the last candidate for slot 0
            let mut rng = ScriptedRandom::new().with_ints(&[9, 9, 9]);
            let events = book.update(&[], &data, &player.ctx(), now() + Duration::days(1), &mut rng);

            assert_eq!(book.slot(0).unwrap().quest_id().map(QuestId::as_str), Some("daily_win"));
            assert_eq!(book.slot(1).unwrap().quest_id().map(QuestId::as_str), Some("daily_play"));
            assert!(matches!(events[0], QuestEvent::Expired { slot: 0, .. }));
            assert!(matches!(events[1], QuestEvent::Expired { slot: 1, .. }));
        }

        #[test]
        fn collecting_after_expiry_fails_without_mutation() {
            let data = game_data();
            let mut player = Player::new();
            let mut book = book_with(&data, &player, 0);
            player.win(3);
            book.update(&[ObjectiveKind::Battle], &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            let before = book.clone();

            let later = now() + Duration::days(1);
            let result = book.collect(0, &data, UtcOffset::UTC, later);
            assert_eq!(result, Err(DomainError::QuestExpired { slot: 0 }));
            assert_eq!(book, before);
        }
    }

    mod collect {
        use super::*;

        #[test]
        fn below_threshold_is_not_collectable() {
            let data = game_data();
            let mut player = Player::new();
            let mut book = book_with(&data, &player, 0);
            player.win(2);
            book.update(&[ObjectiveKind::Battle], &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            let before = book.clone();

            let result = book.collect(0, &data, UtcOffset::UTC, now());
            assert_eq!(result, Err(DomainError::NotCollectable { slot: 0 }));
            assert_eq!(book, before);
        }

        #[test]
        fn inactive_slot_is_not_collectable() {
            let data = game_data();
            let mut book = QuestBook::new(now());
            assert_eq!(
                book.collect(1, &data, UtcOffset::UTC, now()),
                Err(DomainError::NotCollectable { slot: 1 })
            );
            assert_eq!(
                book.collect(3, &data, UtcOffset::UTC, now()),
                Err(DomainError::SlotOutOfRange { index: 3, len: 3 })
            );
        }

        #[test]
        fn final_phase_deactivates_and_keeps_period_expiry() {
            let data = game_data();
            let mut player = Player::new();
            let mut book = book_with(&data, &player, 0);
            let expires_at = book.slot(0).unwrap().expires_at();
            player.win(3);
            book.update(&[ObjectiveKind::Battle], &data, &player.ctx(), now(), &mut ScriptedRandom::new());

            assert_eq!(
                book.claimable_reward(0, &data, now()).unwrap().as_str(),
                "quest_small"
            );
            let collected = book.collect(0, &data, UtcOffset::UTC, now()).unwrap();
            assert!(collected.completed);
            let slot = book.slot(0).unwrap();
            assert!(!slot.is_active());
            assert_eq!(slot.collected(), 1);
            assert_eq!(slot.expires_at(), expires_at);

            // not replaced before the period ends
            book.update(&[], &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert!(!book.slot(0).unwrap().is_active());
        }

        #[test]
        fn phases_collect_in_order() {
            let mut data = game_data();
            data.quests = vec![QuestDefinition {
                phases: vec![
                    QuestPhase {
                        threshold: 1,
                        rewards: LeagueRewards::single(RewardId::new("quest_small")),
                    },
                    QuestPhase {
                        threshold: 4,
                        rewards: LeagueRewards::single(RewardId::new("tome_basic")),
                    },
                ],
                ..battle_quest("ladder", QuestPeriod::Daily, false)
            }];
            let mut player = Player::new();
            let mut book = book_with(&data, &player, 0);
            player.win(2);
            book.update(&[ObjectiveKind::Battle], &data, &player.ctx(), now(), &mut ScriptedRandom::new());

            let first = book.collect(0, &data, UtcOffset::UTC, now()).unwrap();
            assert_eq!(first.phase, 0);
            assert!(!first.completed);
            assert_eq!(
                book.collect(0, &data, UtcOffset::UTC, now()),
                Err(DomainError::NotCollectable { slot: 0 })
            );

            player.win(2);
            book.update(&[ObjectiveKind::Battle], &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            assert_eq!(
                book.claimable_reward(0, &data, now()).unwrap().as_str(),
                "tome_basic"
            );
            let second = book.collect(0, &data, UtcOffset::UTC, now()).unwrap();
            assert!(second.completed);
            assert_eq!(book.slot(0).unwrap().collected(), 2);
        }

        #[test]
        fn permanent_quest_expires_at_next_boundary_on_completion() {
            let mut data = game_data();
            data.quests = vec![QuestDefinition {
                permanent: true,
                ..battle_quest("forever", QuestPeriod::Weekly, false)
            }];
            let mut player = Player::new();
            let mut book = book_with(&data, &player, 2);
            assert_eq!(book.slot(2).unwrap().expires_at(), None);

            player.win(3);
            book.update(&[ObjectiveKind::Battle], &data, &player.ctx(), now(), &mut ScriptedRandom::new());
            book.collect(2, &data, UtcOffset::UTC, now()).unwrap();

            assert_eq!(
                book.slot(2).unwrap().expires_at(),
                Some(Utc.with_ymd_and_hms(2024, 3, 18, 0, 0, 0).unwrap())
            );
        }
    }
}
