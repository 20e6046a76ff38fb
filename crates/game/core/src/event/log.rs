//! Append-only event log and typed history resolver.
//!
//! Handlers never index the log directly. They ask for an entry of a specific
//! shape through [`EventLog::resolve_before`], which fails with a
//! [`CausalityViolation`] when the index is out of range, does not point
//! strictly backwards, or holds a different kind of event.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EventIndex, PlayerId, TerritoryId};

use super::{AttackChoice, Event, Move, MoveAttack, MoveRedeemCards, Record, RecordAttack};

/// A causal lookup that could not be satisfied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CausalityViolation {
    #[error("event {index} is out of range (log holds {len} entries)")]
    OutOfRange { index: EventIndex, len: usize },

    #[error("event {at} refers to {index}, which does not precede it")]
    NotBefore { index: EventIndex, at: EventIndex },

    #[error("event {index} is {found}, expected {expected}")]
    ShapeMismatch {
        index: EventIndex,
        expected: &'static str,
        found: &'static str,
    },
}

impl GameError for CausalityViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "CAUSALITY_OUT_OF_RANGE",
            Self::NotBefore { .. } => "CAUSALITY_NOT_BEFORE",
            Self::ShapeMismatch { .. } => "CAUSALITY_SHAPE_MISMATCH",
        }
    }
}

/// A typed expectation about what a log entry holds.
pub trait EventShape<'a>: Sized {
    /// Name reported when the entry does not match.
    const SHAPE: &'static str;

    fn project(event: &'a Event) -> Option<Self>;
}

impl<'a> EventShape<'a> for &'a MoveAttack {
    const SHAPE: &'static str = "move_attack";

    fn project(event: &'a Event) -> Option<Self> {
        match event {
            Event::Move(Move::Attack(m)) => Some(m),
            _ => None,
        }
    }
}

impl<'a> EventShape<'a> for &'a MoveRedeemCards {
    const SHAPE: &'static str = "move_redeem_cards";

    fn project(event: &'a Event) -> Option<Self> {
        match event {
            Event::Move(Move::RedeemCards(m)) => Some(m),
            _ => None,
        }
    }
}

impl<'a> EventShape<'a> for &'a RecordAttack {
    const SHAPE: &'static str = "record_attack";

    fn project(event: &'a Event) -> Option<Self> {
        match event {
            Event::Record(Record::Attack(r)) => Some(r),
            _ => None,
        }
    }
}

/// A concrete (non-pass) attack move together with the player who made it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedAttack {
    pub attacker: PlayerId,
    pub attacking_territory: TerritoryId,
    pub defending_territory: TerritoryId,
    pub attacking_troops: u32,
}

impl<'a> EventShape<'a> for ResolvedAttack {
    const SHAPE: &'static str = "move_attack(attack)";

    fn project(event: &'a Event) -> Option<Self> {
        match event {
            Event::Move(Move::Attack(MoveAttack {
                move_by_player,
                choice: AttackChoice::Attack(order),
            })) => Some(ResolvedAttack {
                attacker: *move_by_player,
                attacking_territory: order.attacking_territory,
                defending_territory: order.defending_territory,
                attacking_troops: order.attacking_troops,
            }),
            _ => None,
        }
    }
}

/// Ordered, append-only sequence of every move and record of a game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLog {
    entries: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns the index it now permanently occupies.
    pub(crate) fn append(&mut self, event: Event) -> EventIndex {
        let index = EventIndex(self.entries.len());
        self.entries.push(event);
        index
    }

    /// Drops every entry from `index` onwards.
    ///
    /// Only used to undo the entries of a commit that was rejected.
    pub(crate) fn rollback_to(&mut self, index: EventIndex) {
        self.entries.truncate(index.0);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index the next appended entry will receive.
    pub fn next_index(&self) -> EventIndex {
        EventIndex(self.entries.len())
    }

    pub fn get(&self, index: EventIndex) -> Option<&Event> {
        self.entries.get(index.0)
    }

    pub fn last(&self) -> Option<&Event> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[Event] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (EventIndex, &Event)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, event)| (EventIndex(i), event))
    }

    /// Returns the entry at `index` if it has the shape `S`.
    pub fn resolve<'a, S>(&'a self, index: EventIndex) -> Result<S, CausalityViolation>
    where
        S: EventShape<'a>,
    {
        let event = self.get(index).ok_or(CausalityViolation::OutOfRange {
            index,
            len: self.len(),
        })?;

        S::project(event).ok_or(CausalityViolation::ShapeMismatch {
            index,
            expected: S::SHAPE,
            found: event.shape(),
        })
    }

    /// Like [`EventLog::resolve`], but also requires `index` to precede `at`,
    /// the index of the entry holding the reference.
    pub fn resolve_before<'a, S>(
        &'a self,
        index: EventIndex,
        at: EventIndex,
    ) -> Result<S, CausalityViolation>
    where
        S: EventShape<'a>,
    {
        if index >= at {
            return Err(CausalityViolation::NotBefore { index, at });
        }
        self.resolve(index)
    }

    /// Follows a combat record back to the attack move it resolved.
    ///
    /// Two levels of indirection: `record_attack_id` must hold a
    /// [`RecordAttack`], whose `move_attack_id` must hold a concrete attack.
    pub fn resolve_attack_origin(
        &self,
        record_attack_id: EventIndex,
        at: EventIndex,
    ) -> Result<ResolvedAttack, CausalityViolation> {
        let record = self.resolve_before::<&RecordAttack>(record_attack_id, at)?;
        self.resolve_before::<ResolvedAttack>(record.move_attack_id, record_attack_id)
    }
}
