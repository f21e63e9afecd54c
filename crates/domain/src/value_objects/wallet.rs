//! Currency balances

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// The two in-game currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// Earned currency (gold); spent on card upgrades.
    Standard,
    /// Purchased currency (gems); spent on rushing tomes.
    Premium,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Standard => write!(f, "standard"),
            Currency::Premium => write!(f, "premium"),
        }
    }
}

/// A player's currency balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    standard: u64,
    premium: u64,
}

impl Wallet {
    pub fn new(standard: u64, premium: u64) -> Self {
        Self { standard, premium }
    }

    pub fn balance(&self, currency: Currency) -> u64 {
        match currency {
            Currency::Standard => self.standard,
            Currency::Premium => self.premium,
        }
    }

    /// Fails with `InsufficientCurrency` if the balance cannot cover `amount`.
    pub fn ensure_affordable(&self, currency: Currency, amount: u64) -> Result<(), DomainError> {
        let available = self.balance(currency);
        if available < amount {
            return Err(DomainError::InsufficientCurrency {
                currency,
                required: amount,
                available,
            });
        }
        Ok(())
    }

    pub fn credit(&mut self, currency: Currency, amount: u64) {
        let slot = self.slot_mut(currency);
        *slot = slot.saturating_add(amount);
    }

    /// Deduct `amount`, leaving the wallet unchanged on failure.
    pub fn debit(&mut self, currency: Currency, amount: u64) -> Result<(), DomainError> {
        self.ensure_affordable(currency, amount)?;
        *self.slot_mut(currency) -= amount;
        Ok(())
    }

    fn slot_mut(&mut self, currency: Currency) -> &mut u64 {
        match currency {
            Currency::Standard => &mut self.standard,
            Currency::Premium => &mut self.premium,
        }
    }
}
