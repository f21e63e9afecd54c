//! Reward composition: the rolled bundle and the roller that produces it.

mod bundle;
mod roller;

pub use bundle::{Reward, RewardedCard};
pub use roller::{RewardRoller, RollContext};
