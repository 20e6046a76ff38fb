mod card;
mod common;
mod player;
mod territory;

pub use card::Card;
pub use common::{CardId, ContinentId, EventIndex, PlayerId, TerritoryId};
pub use player::PlayerState;
pub use territory::TerritoryState;
