//! Engine-derived records: consequences of moves and lifecycle markers.

use crate::state::{CardId, EventIndex, PlayerId};

/// Outcome of one round of dice, as troop losses on each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordAttack {
    /// Index of the attack move this record resolves.
    pub move_attack_id: EventIndex,
    pub attacking_troops_lost: u32,
    pub defending_troops_lost: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordBanned {
    pub player: PlayerId,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordCancelled {
    pub reason: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordDrewCard {
    pub player: PlayerId,
    pub card: CardId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordPlayerEliminated {
    pub player: PlayerId,
    /// Index of the combat record that took the player's last territory.
    pub record_attack_id: EventIndex,
    pub cards_surrendered: Vec<CardId>,
}

/// Audit trail of a redemption, synthesized right after the redeem move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordRedeemedCards {
    /// Index of the redeem move this record documents.
    pub redeem_cards_move: EventIndex,
    pub total_set_bonus: u32,
    pub matching_territory_bonus: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordShuffledCards;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordStartGame {
    pub turn_order: Vec<PlayerId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordStartTurn {
    pub player: PlayerId,
    pub territory_bonus: u32,
    pub continent_bonus: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordTerritoryConquered {
    /// Index of the combat record that emptied the defending territory.
    pub record_attack_id: EventIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordWinner {
    pub player: PlayerId,
}

/// Every record the engine can derive.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Record {
    Attack(RecordAttack),
    Banned(RecordBanned),
    Cancelled(RecordCancelled),
    DrewCard(RecordDrewCard),
    PlayerEliminated(RecordPlayerEliminated),
    RedeemedCards(RecordRedeemedCards),
    ShuffledCards(RecordShuffledCards),
    StartGame(RecordStartGame),
    StartTurn(RecordStartTurn),
    TerritoryConquered(RecordTerritoryConquered),
    Winner(RecordWinner),
}
