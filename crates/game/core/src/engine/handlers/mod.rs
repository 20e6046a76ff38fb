//! Per-variant event handlers.
//!
//! Each payload type implements [`EventTransition`](super::EventTransition).
//! Lookups and troop arithmetic go through the checked helpers below so an
//! unknown id or an underflow surfaces as a [`ReduceError`] instead of a panic.

mod cards;
mod combat;
mod lifecycle;
mod territory;

use crate::state::{GameState, PlayerId, PlayerState, TerritoryId, TerritoryState};

use super::ReduceError;

fn player(state: &GameState, id: PlayerId) -> Result<&PlayerState, ReduceError> {
    state.players.get(&id).ok_or(ReduceError::UnknownPlayer(id))
}

fn player_mut(state: &mut GameState, id: PlayerId) -> Result<&mut PlayerState, ReduceError> {
    state.players.get_mut(&id).ok_or(ReduceError::UnknownPlayer(id))
}

fn territory(state: &GameState, id: TerritoryId) -> Result<&TerritoryState, ReduceError> {
    state.territories.get(&id).ok_or(ReduceError::UnknownTerritory(id))
}

fn territory_mut(
    state: &mut GameState,
    id: TerritoryId,
) -> Result<&mut TerritoryState, ReduceError> {
    state
        .territories
        .get_mut(&id)
        .ok_or(ReduceError::UnknownTerritory(id))
}

fn ensure_reserve(player: &PlayerState, requested: u64) -> Result<(), ReduceError> {
    if u64::from(player.troops_remaining) < requested {
        return Err(ReduceError::InsufficientReserve {
            player: player.id,
            available: player.troops_remaining,
            requested,
        });
    }
    Ok(())
}

fn spend_reserve(player: &mut PlayerState, requested: u32) -> Result<(), ReduceError> {
    ensure_reserve(player, u64::from(requested))?;
    player.troops_remaining -= requested;
    Ok(())
}

fn ensure_troops(territory: &TerritoryState, requested: u32) -> Result<(), ReduceError> {
    if territory.troops < requested {
        return Err(ReduceError::InsufficientTroops {
            territory: territory.id,
            available: territory.troops,
            requested,
        });
    }
    Ok(())
}

fn remove_troops(territory: &mut TerritoryState, requested: u32) -> Result<(), ReduceError> {
    ensure_troops(territory, requested)?;
    territory.troops -= requested;
    Ok(())
}

fn ensure_room(territory: &TerritoryState, count: u32) -> Result<(), ReduceError> {
    match territory.troops.checked_add(count) {
        Some(_) => Ok(()),
        None => Err(ReduceError::TroopOverflow(territory.id)),
    }
}

fn add_troops(territory: &mut TerritoryState, count: u32) -> Result<(), ReduceError> {
    territory.troops = territory
        .troops
        .checked_add(count)
        .ok_or(ReduceError::TroopOverflow(territory.id))?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Minimal states for handler unit tests.

    use crate::config::GameConfig;
    use crate::engine::Reducer;
    use crate::state::{Card, CardId, GameState, PlayerId, PlayerState, TerritoryId, TerritoryState};

    pub const ALICE: PlayerId = PlayerId(1);
    pub const BOB: PlayerId = PlayerId(2);

    /// Four territories in a row, two players with a reserve of 10, and six
    /// cards: K0..K3 match T0..T3, K4 and K5 are wildcards. All cards start in
    /// the deck.
    pub fn state() -> GameState {
        let mut state = GameState::empty(7);
        for id in [ALICE, BOB] {
            state.players.insert(id, PlayerState::new(id, 10));
        }
        for id in 0..4 {
            let id = TerritoryId(id);
            state.territories.insert(id, TerritoryState::new(id));
        }
        for id in 0..6 {
            let territory = (id < 4).then_some(TerritoryId(id));
            state.cards.insert(CardId(id), Card::new(CardId(id), territory));
        }
        state.deck = state.cards.keys().copied().collect();
        state.turn_order = vec![ALICE, BOB];
        state
    }

    pub fn occupy(state: &mut GameState, territory: u32, player: PlayerId, troops: u32) {
        let id = TerritoryId(territory);
        state
            .territories
            .insert(id, TerritoryState::new(id).with_occupier(player, troops));
    }

    /// Moves `cards` from the deck into the hand of `player`.
    pub fn deal(state: &mut GameState, player: PlayerId, cards: &[u32]) {
        for &card in cards {
            state.deck.retain(|c| c.0 != card);
            state
                .players
                .get_mut(&player)
                .unwrap()
                .cards
                .push(CardId(card));
        }
    }

    pub fn config() -> GameConfig {
        GameConfig::default()
    }

    pub fn reducer<'a>(state: &'a mut GameState, config: &'a GameConfig) -> Reducer<'a> {
        Reducer::new(state, config)
    }
}
