//! Value objects - Immutable objects defined by their attributes

mod bounds;
mod collection;
mod deck;
mod player_name;
mod stats;
mod wallet;

pub use bounds::Bounds;
pub use collection::{CardCollection, OwnedCard, QuantityChangeResult};
pub use deck::Deck;
pub use player_name::PlayerName;
pub use stats::PlayerStats;
pub use wallet::{Currency, Wallet};
