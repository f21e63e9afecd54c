//! Reward rolling.
//!
//! Order of operations, each step consuming randomness from the injected
//! source:
//!
//! 1. Currency, uniform within the definition's bounds.
//! 2. Guaranteed legendary, epic and rare cards, distinct cards drawn from
//!    the catalog slice the player's tier allows.
//! 3. One weighted roll that may upgrade a single unit of the random pool.
//! 4. The rest of the random pool filled with commons.
//! 5. Legendary copies above the holding cap converted to currency.

use super::bundle::{Reward, RewardedCard};
use crate::game_data::{CardData, GameData, Rarity, RewardDefinition};
use crate::random::{shuffle, RandomSource};
use crate::value_objects::{Bounds, CardCollection};

/// Player state the roll depends on.
#[derive(Debug, Clone, Copy)]
pub struct RollContext<'a> {
    /// Account level; cards with a higher tier never drop.
    pub tier: u32,
    /// Current collection, used for overflow.
    pub collection: &'a CardCollection,
}

/// Rolls rewards against the static tables.
#[derive(Debug, Clone, Copy)]
pub struct RewardRoller<'a> {
    data: &'a GameData,
}

impl<'a> RewardRoller<'a> {
    pub fn new(data: &'a GameData) -> Self {
        Self { data }
    }

    /// Roll a reward.
    ///
    /// A rarity with no eligible cards at this tier is skipped, so the
    /// result may hold fewer cards than `definition.total_cards()`. It never
    /// holds more.
    pub fn roll(
        &self,
        definition: &RewardDefinition,
        ctx: RollContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> Reward {
        let mut reward = Reward::empty(definition.id.clone());

        reward.premium = u64::from(definition.premium_currency.sample(rng));
        reward.standard = u64::from(definition.standard_currency.sample(rng));

        for rarity in [Rarity::Legendary, Rarity::Epic, Rarity::Rare] {
            let guaranteed = definition.guaranteed(rarity);
            self.allocate(
                rarity,
                guaranteed,
                definition.card_bounds.for_rarity(rarity),
                ctx.tier,
                &mut reward.cards,
                rng,
            );
        }

        let mut remaining = definition.random_cards;
        if remaining > 0 {
            if let Some(rarity) = upgrade_rarity(definition, rng.gen_percent()) {
                remaining -= self.allocate(
                    rarity,
                    1,
                    Bounds::fixed(1),
                    ctx.tier,
                    &mut reward.cards,
                    rng,
                );
            }
        }

        self.allocate(
            Rarity::Common,
            remaining,
            definition.card_bounds.common,
            ctx.tier,
            &mut reward.cards,
            rng,
        );

        self.apply_overflow(&mut reward, ctx.collection);
        reward
    }

    /// Spread `count` copies over distinct, not yet picked cards of
    /// `rarity`. Returns the number allocated: `count`, or 0 when no card
    /// is eligible.
    fn allocate(
        &self,
        rarity: Rarity,
        count: u32,
        bounds: Bounds,
        tier: u32,
        picked: &mut Vec<RewardedCard>,
        rng: &mut dyn RandomSource,
    ) -> u32 {
        if count == 0 {
            return 0;
        }

        let mut pool: Vec<&CardData> = self.data.cards_by_filter(|c| {
            c.rarity == rarity && c.tier <= tier && !picked.iter().any(|p| p.card_id == c.id)
        });
        if pool.is_empty() {
            return 0;
        }
        shuffle(&mut pool, rng);

        let start = picked.len();
        let min_line = bounds.min.max(1);
        let mut remaining = count;
        let mut pool = pool.into_iter();

        while remaining > 0 {
            let has_lines = picked.len() > start;
            if has_lines && remaining < min_line {
                top_up(&mut picked[start..], remaining, bounds.max);
                break;
            }
            match pool.next() {
                Some(card) => {
                    let copies = bounds.sample(rng).clamp(1, remaining);
                    picked.push(RewardedCard::new(card.id.clone(), rarity, copies));
                    remaining -= copies;
                }
                None => {
                    top_up(&mut picked[start..], remaining, bounds.max);
                    break;
                }
            }
        }

        count
    }

    fn apply_overflow(&self, reward: &mut Reward, collection: &CardCollection) {
        // A missing rarity row means no cap is configured.
        let Ok(legendary) = self.data.rarity_data(Rarity::Legendary) else {
            return;
        };

        for line in reward
            .cards
            .iter_mut()
            .filter(|c| c.rarity == Rarity::Legendary)
        {
            let room = legendary
                .max_count
                .saturating_sub(collection.count_of(&line.card_id));
            line.overflow = line.count.saturating_sub(room);
        }

        reward.overflow_currency = u64::from(reward.total_overflow())
            * self.data.economy.legendary_card_currency_value;
    }
}

/// Which rarity, if any, the weighted roll upgrades one random unit to.
/// `roll` is uniform in `[0, 100)`.
fn upgrade_rarity(definition: &RewardDefinition, roll: f64) -> Option<Rarity> {
    let legendary = definition.legendary_chance;
    let epic = legendary + definition.epic_chance;
    let rare = epic + definition.rare_chance;

    if roll >= rare {
        None
    } else if roll >= epic {
        Some(Rarity::Rare)
    } else if roll >= legendary {
        Some(Rarity::Epic)
    } else {
        Some(Rarity::Legendary)
    }
}

/// Add `amount` to existing lines, most recent first, respecting `cap`
/// where possible. Whatever does not fit goes onto the most recent line.
fn top_up(lines: &mut [RewardedCard], amount: u32, cap: u32) {
    let mut remaining = amount;
    for line in lines.iter_mut().rev() {
        if remaining == 0 {
            return;
        }
        let take = cap.saturating_sub(line.count).min(remaining);
        line.count += take;
        remaining -= take;
    }
    if remaining > 0 {
        if let Some(last) = lines.last_mut() {
            last.count += remaining;
        }
    }
}
