//! Player-issued moves.
//!
//! Legality is decided before a move reaches the reducer; these types only
//! carry what the handlers need to apply it.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::state::{CardId, EventIndex, PlayerId, TerritoryId};

/// A concrete attack from one territory into an adjacent enemy territory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOrder {
    pub attacking_territory: TerritoryId,
    pub defending_territory: TerritoryId,
    pub attacking_troops: u32,
}

/// What the attacking player chose to do with their attack step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackChoice {
    Attack(AttackOrder),
    Pass,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAttack {
    pub move_by_player: PlayerId,
    pub choice: AttackChoice,
}

impl MoveAttack {
    pub fn attack(
        move_by_player: PlayerId,
        attacking_territory: TerritoryId,
        defending_territory: TerritoryId,
        attacking_troops: u32,
    ) -> Self {
        Self {
            move_by_player,
            choice: AttackChoice::Attack(AttackOrder {
                attacking_territory,
                defending_territory,
                attacking_troops,
            }),
        }
    }

    pub fn pass(move_by_player: PlayerId) -> Self {
        Self {
            move_by_player,
            choice: AttackChoice::Pass,
        }
    }

    /// Returns the attack order, or `None` for a pass.
    pub fn order(&self) -> Option<AttackOrder> {
        match self.choice {
            AttackChoice::Attack(order) => Some(order),
            AttackChoice::Pass => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveClaimTerritory {
    pub move_by_player: PlayerId,
    pub territory: TerritoryId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveDefend {
    pub move_by_player: PlayerId,
    pub move_attack_id: EventIndex,
    pub defending_troops: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveDistributeTroops {
    pub move_by_player: PlayerId,
    pub distributions: BTreeMap<TerritoryId, u32>,
}

impl MoveDistributeTroops {
    pub fn total(&self) -> u64 {
        self.distributions.values().map(|&troops| u64::from(troops)).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveFortify {
    pub move_by_player: PlayerId,
    pub source_territory: TerritoryId,
    pub target_territory: TerritoryId,
    pub troop_count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovePlaceInitialTroop {
    pub move_by_player: PlayerId,
    pub territory: TerritoryId,
}

/// Three cards traded in together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardSet(pub [CardId; GameConfig::CARDS_PER_SET]);

impl CardSet {
    pub fn new(a: CardId, b: CardId, c: CardId) -> Self {
        Self([a, b, c])
    }

    pub fn cards(&self) -> &[CardId] {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRedeemCards {
    pub move_by_player: PlayerId,
    /// Sets in submission order; each one advances the redemption counter.
    pub sets: Vec<CardSet>,
}

impl MoveRedeemCards {
    /// All redeemed cards, flattened in submission order.
    pub fn all_cards(&self) -> Vec<CardId> {
        self.sets.iter().flat_map(|set| set.0).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveTroopsAfterAttack {
    pub move_by_player: PlayerId,
    /// Index of the combat record that conquered the defending territory.
    pub record_attack_id: EventIndex,
    pub troop_count: u32,
}

/// Every move a player can issue.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    Attack(MoveAttack),
    ClaimTerritory(MoveClaimTerritory),
    Defend(MoveDefend),
    DistributeTroops(MoveDistributeTroops),
    Fortify(MoveFortify),
    PlaceInitialTroop(MovePlaceInitialTroop),
    RedeemCards(MoveRedeemCards),
    TroopsAfterAttack(MoveTroopsAfterAttack),
}
