//! Tome slot use cases.
//!
//! Granting, unlocking, rushing and opening tomes, plus claiming the
//! timer-driven free and arena tomes.

mod claim_tome;
mod error;
mod grant_tome;
mod open_tome;
mod rush_tome;
mod start_unlock;

use std::sync::Arc;

pub use claim_tome::{AccruedTome, ClaimTome};
pub use error::TomeError;
pub use grant_tome::GrantTome;
pub use open_tome::OpenTome;
pub use rush_tome::RushTome;
pub use start_unlock::StartTomeUnlock;

/// Container for tome use cases.
pub struct TomeUseCases {
    pub grant: Arc<GrantTome>,
    pub start_unlock: Arc<StartTomeUnlock>,
    pub rush: Arc<RushTome>,
    pub open: Arc<OpenTome>,
    pub claim: Arc<ClaimTome>,
}

impl TomeUseCases {
    pub fn new(
        grant: Arc<GrantTome>,
        start_unlock: Arc<StartTomeUnlock>,
        rush: Arc<RushTome>,
        open: Arc<OpenTome>,
        claim: Arc<ClaimTome>,
    ) -> Self {
        Self {
            grant,
            start_unlock,
            rush,
            open,
            claim,
        }
    }
}
