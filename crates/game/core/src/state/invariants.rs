//! Game invariants - sanity checks that detect bugs.
//!
//! These hold between commits of complete moves. Inside a combat sequence an
//! occupied territory may briefly hold zero troops (after the combat record,
//! before troops are moved in), so callers check at move boundaries.

use std::collections::BTreeMap;

use super::{CardId, GameState};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    check_card_conservation(state, &mut violations);

    for territory in state.territories.values() {
        match territory.occupier {
            None if territory.troops != 0 => violations.push(InvariantViolation::new(format!(
                "unoccupied territory {} holds {} troops",
                territory.id, territory.troops
            ))),
            Some(occupier) => {
                if territory.troops == 0 {
                    violations.push(InvariantViolation::new(format!(
                        "territory {} occupied by {occupier} holds no troops",
                        territory.id
                    )));
                }
                if !state.players.contains_key(&occupier) {
                    violations.push(InvariantViolation::new(format!(
                        "territory {} occupied by unknown player {occupier}",
                        territory.id
                    )));
                }
            }
            None => {}
        }
    }

    for player in state.players.values() {
        if !player.alive && !player.cards.is_empty() {
            violations.push(InvariantViolation::new(format!(
                "eliminated player {} still holds {} cards",
                player.id,
                player.cards.len()
            )));
        }
    }

    for &player in &state.turn_order {
        if !state.players.contains_key(&player) {
            violations.push(InvariantViolation::new(format!(
                "turn order names unknown player {player}"
            )));
        }
    }

    for (index, event) in state.log.iter() {
        if let Some(cause) = event.caused_by() {
            if cause >= index {
                violations.push(InvariantViolation::new(format!(
                    "{} at {index} refers forward to {cause}",
                    event.kind()
                )));
            }
        }
    }

    violations
}

/// Every card of the registry sits in exactly one of: deck, discard pile, a hand.
fn check_card_conservation(state: &GameState, violations: &mut Vec<InvariantViolation>) {
    let mut seen: BTreeMap<CardId, usize> = BTreeMap::new();

    let hands = state.players.values().flat_map(|player| player.cards.iter());
    for &card in state.deck.iter().chain(state.discard.iter()).chain(hands) {
        *seen.entry(card).or_default() += 1;
    }

    for (&card, &count) in &seen {
        if !state.cards.contains_key(&card) {
            violations.push(InvariantViolation::new(format!(
                "card {card} is not part of the card set"
            )));
        } else if count > 1 {
            violations.push(InvariantViolation::new(format!(
                "card {card} appears {count} times"
            )));
        }
    }

    for &card in state.cards.keys() {
        if !seen.contains_key(&card) {
            violations.push(InvariantViolation::new(format!("card {card} is missing")));
        }
    }
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
