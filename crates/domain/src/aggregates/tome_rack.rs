//! Tome slots and the unlock state machine
//!
//! `Empty -> Locked -> Unlocking -> Unlocked -> (open) -> Empty`
//!
//! `Unlocking -> Unlocked` is never stored ahead of time: every check reads
//! [`Tome::state_at`], and successful mutations write the flipped state back.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::game_data::{AccrualSettings, GameData, TomeDefinition};
use crate::ids::TomeDataId;
use crate::value_objects::{Currency, Wallet};

/// Tome slots per player.
pub const TOME_SLOT_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum TomeState {
    Locked,
    #[serde(rename_all = "camelCase")]
    Unlocking {
        started_at: DateTime<Utc>,
        completes_at: DateTime<Utc>,
    },
    Unlocked,
}

/// A tome sitting in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tome {
    tome_id: TomeDataId,
    /// League at acquisition; picks the reward table and unlock multiplier.
    league: usize,
    state: TomeState,
    acquired_at: DateTime<Utc>,
}

impl Tome {
    pub fn new(tome_id: TomeDataId, league: usize, now: DateTime<Utc>) -> Self {
        Self {
            tome_id,
            league,
            state: TomeState::Locked,
            acquired_at: now,
        }
    }

    pub fn tome_id(&self) -> &TomeDataId {
        &self.tome_id
    }

    pub fn league(&self) -> usize {
        self.league
    }

    pub fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }

    /// Stored state, without the lazy unlock applied.
    pub fn stored_state(&self) -> TomeState {
        self.state
    }

    /// State as of `now`.
    pub fn state_at(&self, now: DateTime<Utc>) -> TomeState {
        match self.state {
            TomeState::Unlocking { completes_at, .. } if now >= completes_at => TomeState::Unlocked,
            state => state,
        }
    }

    fn refresh(&mut self, now: DateTime<Utc>) -> bool {
        let state = self.state_at(now);
        let changed = state != self.state;
        self.state = state;
        changed
    }
}

/// Unlock time for a tome of `definition` acquired in `league`.
pub fn unlock_duration(definition: &TomeDefinition, data: &GameData, league: usize) -> Duration {
    let multiplier = data
        .league(league)
        .map_or(1.0, |l| l.unlock_time_multiplier)
        .max(0.0);
    let seconds = (definition.unlock_seconds as f64 * multiplier).round();
    // Duration::seconds panics past i64::MAX milliseconds
    Duration::seconds(seconds.clamp(0.0, 1e15) as i64)
}

/// Fixed array of tome slots; `None` is an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TomeRack {
    slots: [Option<Tome>; TOME_SLOT_COUNT],
}

impl TomeRack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[Option<Tome>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Result<Option<&Tome>, DomainError> {
        DomainError::check_slot(index, TOME_SLOT_COUNT)?;
        Ok(self.slots[index].as_ref())
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Write back finished unlocks. Returns the slots that flipped.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> Vec<usize> {
        let mut flipped = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some(tome) = slot.as_mut() {
                if tome.refresh(now) {
                    flipped.push(index);
                }
            }
        }
        flipped
    }

    /// The slot currently unlocking, if any. More than one is a broken
    /// invariant.
    pub fn unlocking_slot(&self, now: DateTime<Utc>) -> Result<Option<usize>, DomainError> {
        let unlocking: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| {
                matches!(
                    slot.as_ref().map(|tome| tome.state_at(now)),
                    Some(TomeState::Unlocking { .. })
                )
            })
            .map(|(index, _)| index)
            .collect();

        match unlocking.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(*only)),
            many => Err(DomainError::invariant(format!(
                "tome slots {many:?} are unlocking at the same time"
            ))),
        }
    }

    /// Place a locked tome in the first empty slot.
    pub fn grant(
        &mut self,
        tome_id: TomeDataId,
        league: usize,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let index = self.first_empty().ok_or(DomainError::NoEmptySlot)?;
        self.slots[index] = Some(Tome::new(tome_id, league, now));
        Ok(index)
    }

    fn occupied(&self, slot: usize) -> Result<&Tome, DomainError> {
        self.slot(slot)?.ok_or_else(|| {
            DomainError::invalid_state_transition(format!("tome slot {slot} is empty"))
        })
    }

    /// Start the unlock timer on a locked tome. Returns when it completes.
    pub fn start_unlocking(
        &mut self,
        slot: usize,
        data: &GameData,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, DomainError> {
        let tome = self.occupied(slot)?;
        match tome.state_at(now) {
            TomeState::Locked => {}
            TomeState::Unlocking { .. } => return Err(DomainError::AlreadyUnlocking { slot }),
            TomeState::Unlocked => {
                return Err(DomainError::invalid_state_transition(format!(
                    "tome in slot {slot} is already unlocked"
                )))
            }
        }
        if let Some(other) = self.unlocking_slot(now)? {
            return Err(DomainError::AlreadyUnlocking { slot: other });
        }

        let definition = data.tome_definition(&tome.tome_id)?;
        let completes_at = now
            .checked_add_signed(unlock_duration(definition, data, tome.league))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unlock time of tome {} is out of range",
                    tome.tome_id
                ))
            })?;

        self.refresh(now);
        if let Some(tome) = self.slots[slot].as_mut() {
            tome.state = TomeState::Unlocking {
                started_at: now,
                completes_at,
            };
        }
        Ok(completes_at)
    }

    /// Premium cost to finish a tome now.
    ///
    /// Locked tomes cost the flat rush price. Unlocking tomes cost that
    /// price scaled by the fraction of time left, rounded up, at least 1.
    pub fn rush_cost(
        &self,
        slot: usize,
        data: &GameData,
        now: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let tome = self.occupied(slot)?;
        let definition = data.tome_definition(&tome.tome_id)?;

        match tome.state_at(now) {
            TomeState::Locked => Ok(definition.rush_cost),
            TomeState::Unlocking {
                started_at,
                completes_at,
            } => {
                let full = (completes_at - started_at).num_seconds().max(1) as u128;
                let remaining = (completes_at - now).num_seconds().max(0) as u128;
                let price = u128::from(definition.rush_cost);
                let scaled = (price * remaining).div_ceil(full);
                Ok(u64::try_from(scaled)
                    .unwrap_or(u64::MAX)
                    .clamp(1.min(definition.rush_cost), definition.rush_cost))
            }
            TomeState::Unlocked => Err(DomainError::invalid_state_transition(format!(
                "tome in slot {slot} is already unlocked"
            ))),
        }
    }

    /// Pay premium currency to unlock immediately. Returns the price paid.
    pub fn rush(
        &mut self,
        slot: usize,
        data: &GameData,
        wallet: &mut Wallet,
        now: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let cost = self.rush_cost(slot, data, now)?;
        wallet.debit(Currency::Premium, cost)?;

        self.refresh(now);
        if let Some(tome) = self.slots[slot].as_mut() {
            tome.state = TomeState::Unlocked;
        }
        Ok(cost)
    }

    /// The tome in `slot`, provided it is ready to open.
    pub fn openable(&self, slot: usize, now: DateTime<Utc>) -> Result<&Tome, DomainError> {
        let tome = self.occupied(slot)?;
        if tome.state_at(now) != TomeState::Unlocked {
            return Err(DomainError::invalid_state_transition(format!(
                "tome in slot {slot} is not unlocked"
            )));
        }
        Ok(tome)
    }

    /// Remove an unlocked tome, emptying its slot.
    pub fn take(&mut self, slot: usize, now: DateTime<Utc>) -> Result<Tome, DomainError> {
        self.openable(slot, now)?;
        self.refresh(now);
        self.slots[slot]
            .take()
            .ok_or_else(|| DomainError::invariant(format!("tome slot {slot} emptied mid-open")))
    }
}

/// Timer-driven tome counter for free and arena tomes.
///
/// One tome accrues per interval up to the cap; the timer pauses while
/// capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TomeAccrual {
    available: u32,
    last_accrued_at: DateTime<Utc>,
}

impl TomeAccrual {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            available: 0,
            last_accrued_at: now,
        }
    }

    /// Start with `available` tomes already accrued.
    pub fn with_available(mut self, available: u32) -> Self {
        self.available = available;
        self
    }

    pub fn last_accrued_at(&self) -> DateTime<Utc> {
        self.last_accrued_at
    }

    pub fn available(&self, settings: &AccrualSettings, now: DateTime<Utc>) -> u32 {
        self.accrued(settings, now).available
    }

    fn accrued(&self, settings: &AccrualSettings, now: DateTime<Utc>) -> TomeAccrual {
        if self.available >= settings.cap {
            return TomeAccrual {
                available: self.available,
                last_accrued_at: now,
            };
        }
        let Ok(interval) = i64::try_from(settings.interval_seconds) else {
            return *self;
        };
        if interval == 0 {
            return *self;
        }

        let elapsed = (now - self.last_accrued_at).num_seconds().max(0);
        let room = i64::from(settings.cap - self.available);
        let gained = (elapsed / interval).min(room);
        let available = self.available + gained as u32;

        TomeAccrual {
            available,
            last_accrued_at: if available >= settings.cap {
                now
            } else {
                self.last_accrued_at + Duration::seconds(gained * interval)
            },
        }
    }

    /// Bring the counter up to date.
    pub fn refresh(&mut self, settings: &AccrualSettings, now: DateTime<Utc>) {
        *self = self.accrued(settings, now);
    }

    /// Consume one accrued tome. `kind` names the counter in the error.
    pub fn claim(
        &mut self,
        settings: &AccrualSettings,
        now: DateTime<Utc>,
        kind: &'static str,
    ) -> Result<(), DomainError> {
        let mut next = self.accrued(settings, now);
        if next.available == 0 {
            return Err(DomainError::NoTomeAvailable(kind));
        }
        next.available -= 1;
        *self = next;
        Ok(())
    }
}
