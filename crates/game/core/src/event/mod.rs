//! Event taxonomy and the append-only event log.
//!
//! An [`Event`] is either a [`Move`] issued by a player or a [`Record`]
//! derived by the engine. Both live in the same [`EventLog`], where an entry's
//! position is its permanent identity: later entries refer back to earlier ones
//! by [`EventIndex`](crate::state::EventIndex) instead of copying their data.
//!
//! - `moves` / `records` define the payload types
//! - `log` owns the log and the typed history resolver
//! - `root` computes a digest over the log (requires `serde`)

pub mod log;
pub mod moves;
pub mod records;
#[cfg(feature = "serde")]
pub mod root;

pub use log::{CausalityViolation, EventLog, EventShape, ResolvedAttack};
pub use moves::{
    AttackChoice, AttackOrder, CardSet, Move, MoveAttack, MoveClaimTerritory, MoveDefend,
    MoveDistributeTroops, MoveFortify, MovePlaceInitialTroop, MoveRedeemCards,
    MoveTroopsAfterAttack,
};
pub use records::{
    Record, RecordAttack, RecordBanned, RecordCancelled, RecordDrewCard, RecordPlayerEliminated,
    RecordRedeemedCards, RecordShuffledCards, RecordStartGame, RecordStartTurn,
    RecordTerritoryConquered, RecordWinner,
};
#[cfg(feature = "serde")]
pub use root::compute_log_root;

use crate::state::EventIndex;

/// One entry of the event log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Player-issued move.
    Move(Move),

    /// Engine-derived record.
    Record(Record),
}

/// Flat discriminant of every event variant, used for logging and errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    MoveAttack,
    MoveClaimTerritory,
    MoveDefend,
    MoveDistributeTroops,
    MoveFortify,
    MovePlaceInitialTroop,
    MoveRedeemCards,
    MoveTroopsAfterAttack,
    RecordAttack,
    RecordBanned,
    RecordCancelled,
    RecordDrewCard,
    RecordPlayerEliminated,
    RecordRedeemedCards,
    RecordShuffledCards,
    RecordStartGame,
    RecordStartTurn,
    RecordTerritoryConquered,
    RecordWinner,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Move(m) => match m {
                Move::Attack(_) => EventKind::MoveAttack,
                Move::ClaimTerritory(_) => EventKind::MoveClaimTerritory,
                Move::Defend(_) => EventKind::MoveDefend,
                Move::DistributeTroops(_) => EventKind::MoveDistributeTroops,
                Move::Fortify(_) => EventKind::MoveFortify,
                Move::PlaceInitialTroop(_) => EventKind::MovePlaceInitialTroop,
                Move::RedeemCards(_) => EventKind::MoveRedeemCards,
                Move::TroopsAfterAttack(_) => EventKind::MoveTroopsAfterAttack,
            },
            Event::Record(r) => match r {
                Record::Attack(_) => EventKind::RecordAttack,
                Record::Banned(_) => EventKind::RecordBanned,
                Record::Cancelled(_) => EventKind::RecordCancelled,
                Record::DrewCard(_) => EventKind::RecordDrewCard,
                Record::PlayerEliminated(_) => EventKind::RecordPlayerEliminated,
                Record::RedeemedCards(_) => EventKind::RecordRedeemedCards,
                Record::ShuffledCards(_) => EventKind::RecordShuffledCards,
                Record::StartGame(_) => EventKind::RecordStartGame,
                Record::StartTurn(_) => EventKind::RecordStartTurn,
                Record::TerritoryConquered(_) => EventKind::RecordTerritoryConquered,
                Record::Winner(_) => EventKind::RecordWinner,
            },
        }
    }

    /// Structural name used when a lookup finds the wrong kind of entry.
    ///
    /// Same as [`Event::kind`] except that a passed attack is told apart from
    /// a concrete one.
    pub fn shape(&self) -> &'static str {
        match self {
            Event::Move(Move::Attack(MoveAttack {
                choice: AttackChoice::Pass,
                ..
            })) => "move_attack(pass)",
            other => other.kind().into(),
        }
    }

    /// Index of the earlier entry this event was caused by, if it embeds one.
    pub fn caused_by(&self) -> Option<EventIndex> {
        match self {
            Event::Move(Move::Defend(m)) => Some(m.move_attack_id),
            Event::Move(Move::TroopsAfterAttack(m)) => Some(m.record_attack_id),
            Event::Record(Record::Attack(r)) => Some(r.move_attack_id),
            Event::Record(Record::PlayerEliminated(r)) => Some(r.record_attack_id),
            Event::Record(Record::RedeemedCards(r)) => Some(r.redeem_cards_move),
            Event::Record(Record::TerritoryConquered(r)) => Some(r.record_attack_id),
            _ => None,
        }
    }

    /// Returns true for entries the reducer synthesizes on its own while
    /// handling another entry. Replaying a log skips them.
    pub fn is_synthesized(&self) -> bool {
        matches!(self, Event::Record(Record::RedeemedCards(_)))
    }
}

impl From<Move> for Event {
    fn from(value: Move) -> Self {
        Event::Move(value)
    }
}

impl From<Record> for Event {
    fn from(value: Record) -> Self {
        Event::Record(value)
    }
}

macro_rules! impl_into_event {
    ($($payload:ty => $outer:ident :: $variant:ident),+ $(,)?) => {
        $(
            impl From<$payload> for Event {
                fn from(value: $payload) -> Self {
                    Event::from($outer::$variant(value))
                }
            }
        )+
    };
}

impl_into_event! {
    MoveAttack => Move::Attack,
    MoveClaimTerritory => Move::ClaimTerritory,
    MoveDefend => Move::Defend,
    MoveDistributeTroops => Move::DistributeTroops,
    MoveFortify => Move::Fortify,
    MovePlaceInitialTroop => Move::PlaceInitialTroop,
    MoveRedeemCards => Move::RedeemCards,
    MoveTroopsAfterAttack => Move::TroopsAfterAttack,
    RecordAttack => Record::Attack,
    RecordBanned => Record::Banned,
    RecordCancelled => Record::Cancelled,
    RecordDrewCard => Record::DrewCard,
    RecordPlayerEliminated => Record::PlayerEliminated,
    RecordRedeemedCards => Record::RedeemedCards,
    RecordShuffledCards => Record::ShuffledCards,
    RecordStartGame => Record::StartGame,
    RecordStartTurn => Record::StartTurn,
    RecordTerritoryConquered => Record::TerritoryConquered,
    RecordWinner => Record::Winner,
}
