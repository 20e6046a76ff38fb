use super::{CardId, TerritoryId};

/// Immutable card definition.
///
/// Cards without a territory are wildcards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: CardId,
    pub territory_id: Option<TerritoryId>,
}

impl Card {
    pub fn new(id: CardId, territory_id: Option<TerritoryId>) -> Self {
        Self { id, territory_id }
    }

    pub fn wildcard(id: CardId) -> Self {
        Self {
            id,
            territory_id: None,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.territory_id.is_none()
    }
}
