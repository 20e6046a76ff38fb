use super::{PlayerId, TerritoryId};

/// Mutable state of a single territory.
///
/// An occupied territory holds at least one troop between moves; an unoccupied
/// one (only possible before the setup phase ends) holds none. The reducer may
/// pass through zero-troop occupied states inside a combat sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerritoryState {
    pub id: TerritoryId,
    pub occupier: Option<PlayerId>,
    pub troops: u32,
}

impl TerritoryState {
    /// Creates an unoccupied, empty territory.
    pub fn new(id: TerritoryId) -> Self {
        Self {
            id,
            occupier: None,
            troops: 0,
        }
    }

    pub fn with_occupier(mut self, occupier: PlayerId, troops: u32) -> Self {
        self.occupier = Some(occupier);
        self.troops = troops;
        self
    }

    pub fn is_occupied_by(&self, player: PlayerId) -> bool {
        self.occupier == Some(player)
    }
}
