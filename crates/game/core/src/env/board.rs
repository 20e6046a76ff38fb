//! Static board definition: territories, continents, adjacency and cards.
//!
//! The board never changes during a game. It seeds [`GameState::setup`] and
//! answers the questions the reducer leaves to its callers, such as the
//! start-of-turn bonuses carried by [`RecordStartTurn`].

use std::collections::{BTreeMap, BTreeSet};

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::event::RecordStartTurn;
use crate::state::{Card, CardId, ContinentId, GameState, PlayerId, TerritoryId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerritoryDef {
    pub id: TerritoryId,
    pub name: String,
    pub continent: ContinentId,
    pub neighbours: Vec<TerritoryId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinentDef {
    pub id: ContinentId,
    pub name: String,
    /// Troops granted at turn start to a player holding every territory of it.
    pub bonus: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    pub territories: Vec<TerritoryDef>,
    pub continents: Vec<ContinentDef>,
    pub cards: Vec<Card>,
}

/// Structural problems in a board definition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("territory {0} is defined twice")]
    DuplicateTerritory(TerritoryId),

    #[error("continent {0} is defined twice")]
    DuplicateContinent(ContinentId),

    #[error("card {0} is defined twice")]
    DuplicateCard(CardId),

    #[error("territory {territory} belongs to unknown continent {continent}")]
    UnknownContinent {
        territory: TerritoryId,
        continent: ContinentId,
    },

    #[error("territory {territory} lists unknown neighbour {neighbour}")]
    UnknownNeighbour {
        territory: TerritoryId,
        neighbour: TerritoryId,
    },

    #[error("territory {territory} lists {neighbour} but not the other way round")]
    AsymmetricAdjacency {
        territory: TerritoryId,
        neighbour: TerritoryId,
    },

    #[error("card {card} names unknown territory {territory}")]
    UnknownCardTerritory { card: CardId, territory: TerritoryId },
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateTerritory(_) => "BOARD_DUPLICATE_TERRITORY",
            Self::DuplicateContinent(_) => "BOARD_DUPLICATE_CONTINENT",
            Self::DuplicateCard(_) => "BOARD_DUPLICATE_CARD",
            Self::UnknownContinent { .. } => "BOARD_UNKNOWN_CONTINENT",
            Self::UnknownNeighbour { .. } => "BOARD_UNKNOWN_NEIGHBOUR",
            Self::AsymmetricAdjacency { .. } => "BOARD_ASYMMETRIC_ADJACENCY",
            Self::UnknownCardTerritory { .. } => "BOARD_UNKNOWN_CARD_TERRITORY",
        }
    }
}

impl Board {
    /// Checks ids are unique and every reference resolves.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut continents = BTreeSet::new();
        for continent in &self.continents {
            if !continents.insert(continent.id) {
                return Err(BoardError::DuplicateContinent(continent.id));
            }
        }

        let mut adjacency: BTreeMap<TerritoryId, &[TerritoryId]> = BTreeMap::new();
        for territory in &self.territories {
            if adjacency
                .insert(territory.id, territory.neighbours.as_slice())
                .is_some()
            {
                return Err(BoardError::DuplicateTerritory(territory.id));
            }
            if !continents.contains(&territory.continent) {
                return Err(BoardError::UnknownContinent {
                    territory: territory.id,
                    continent: territory.continent,
                });
            }
        }

        for (&territory, neighbours) in &adjacency {
            for &neighbour in *neighbours {
                let back = adjacency
                    .get(&neighbour)
                    .ok_or(BoardError::UnknownNeighbour {
                        territory,
                        neighbour,
                    })?;
                if !back.contains(&territory) {
                    return Err(BoardError::AsymmetricAdjacency {
                        territory,
                        neighbour,
                    });
                }
            }
        }

        let mut cards = BTreeSet::new();
        for card in &self.cards {
            if !cards.insert(card.id) {
                return Err(BoardError::DuplicateCard(card.id));
            }
            match card.territory_id {
                Some(territory) if !adjacency.contains_key(&territory) => {
                    return Err(BoardError::UnknownCardTerritory {
                        card: card.id,
                        territory,
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }

    pub fn territory(&self, id: TerritoryId) -> Option<&TerritoryDef> {
        self.territories.iter().find(|t| t.id == id)
    }

    pub fn are_adjacent(&self, a: TerritoryId, b: TerritoryId) -> bool {
        self.territory(a)
            .is_some_and(|territory| territory.neighbours.contains(&b))
    }

    /// Territories that make up `continent`.
    pub fn continent_members(
        &self,
        continent: ContinentId,
    ) -> impl Iterator<Item = TerritoryId> + '_ {
        self.territories
            .iter()
            .filter(move |t| t.continent == continent)
            .map(|t| t.id)
    }

    /// Sum of the bonuses of every continent `player` holds in full.
    pub fn continent_bonus(&self, state: &GameState, player: PlayerId) -> u32 {
        self.continents
            .iter()
            .filter(|continent| {
                let mut members = self.continent_members(continent.id).peekable();
                members.peek().is_some()
                    && members.all(|id| {
                        state
                            .territory(id)
                            .is_some_and(|territory| territory.is_occupied_by(player))
                    })
            })
            .map(|continent| continent.bonus)
            .sum()
    }

    /// Builds the start-of-turn record for `player` with both bonuses computed.
    pub fn start_turn_record(
        &self,
        state: &GameState,
        player: PlayerId,
        config: &GameConfig,
    ) -> RecordStartTurn {
        let held = state.territories_of(player).count() as u32;
        RecordStartTurn {
            player,
            territory_bonus: territory_bonus(held, config),
            continent_bonus: self.continent_bonus(state, player),
        }
    }
}

/// Troops granted for the number of territories held: one per
/// `territories_per_bonus_troop`, never below `min_territory_bonus`.
pub fn territory_bonus(territories_held: u32, config: &GameConfig) -> u32 {
    let per_troop = config.territories_per_bonus_troop.max(1);
    (territories_held / per_troop).max(config.min_territory_bonus)
}
