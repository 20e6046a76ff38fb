//! Game and turn lifecycle records.

use crate::engine::{EventTransition, ReduceError, TransitionContext};
use crate::event::{
    Event, RecordBanned, RecordCancelled, RecordPlayerEliminated, RecordStartGame,
    RecordStartTurn, RecordWinner,
};
use crate::state::GameState;

use super::{player, player_mut};

/// Records that exist for the history only.
macro_rules! audit_only {
    ($($record:ty),* $(,)?) => {
        $(
            impl EventTransition for $record {
                fn apply(
                    &self,
                    _state: &mut GameState,
                    _ctx: &TransitionContext<'_>,
                ) -> Result<Option<Event>, ReduceError> {
                    Ok(None)
                }
            }
        )*
    };
}

audit_only!(RecordBanned, RecordCancelled, RecordWinner);

impl EventTransition for RecordStartGame {
    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        for &id in &self.turn_order {
            player(state, id)?;
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<Option<Event>, ReduceError> {
        state.turn_order = self.turn_order.clone();
        Ok(None)
    }
}

impl EventTransition for RecordStartTurn {
    fn apply(
        &self,
        state: &mut GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<Option<Event>, ReduceError> {
        let player = player_mut(state, self.player)?;
        player.troops_remaining = player
            .troops_remaining
            .saturating_add(self.territory_bonus)
            .saturating_add(self.continent_bonus);
        Ok(None)
    }
}

/// Knocks a player out and hands their cards to whoever made the attack
/// that finished them.
impl EventTransition for RecordPlayerEliminated {
    fn pre_validate(
        &self,
        state: &GameState,
        ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        let attack = state
            .log
            .resolve_attack_origin(self.record_attack_id, ctx.index)?;
        player(state, attack.attacker)?;

        let loser = player(state, self.player)?;
        for &card in &self.cards_surrendered {
            if !loser.holds(card) {
                return Err(ReduceError::CardNotHeld {
                    player: loser.id,
                    card,
                });
            }
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &TransitionContext<'_>,
    ) -> Result<Option<Event>, ReduceError> {
        let attack = state
            .log
            .resolve_attack_origin(self.record_attack_id, ctx.index)?;

        let loser = player_mut(state, self.player)?;
        loser.alive = false;
        loser.discard_cards(&self.cards_surrendered);

        player_mut(state, attack.attacker)?
            .cards
            .extend(self.cards_surrendered.iter().copied());
        Ok(None)
    }
}
