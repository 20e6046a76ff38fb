//! Card redemption, draws and reshuffles.

use std::collections::BTreeSet;

use crate::engine::{EventTransition, ReduceError, TransitionContext};
use crate::env::rng::{self, compute_seed};
use crate::event::{
    Event, MoveRedeemCards, RecordDrewCard, RecordRedeemedCards, RecordShuffledCards,
};
use crate::state::{GameState, TerritoryId};

use super::{player, player_mut};

/// Trades card sets for reserve troops.
///
/// Each set is worth the next step of the escalating schedule. Cards naming
/// territories the player occupies add a flat bonus once per move and become
/// the player's new reinforcement obligation. The outcome is recorded in a
/// [`RecordRedeemedCards`] that refers back to this move's own index.
impl EventTransition for MoveRedeemCards {
    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        let redeemer = player(state, self.move_by_player)?;

        let mut seen = BTreeSet::new();
        for card in self.all_cards() {
            if state.card(card).is_none() {
                return Err(ReduceError::UnknownCard(card));
            }
            if !seen.insert(card) {
                return Err(ReduceError::DuplicateCard { card });
            }
            if !redeemer.holds(card) {
                return Err(ReduceError::CardNotHeld {
                    player: redeemer.id,
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
        let mut total_set_bonus = 0u32;
        for _ in &self.sets {
            total_set_bonus =
                total_set_bonus.saturating_add(ctx.config.set_bonus(state.card_sets_redeemed));
            state.card_sets_redeemed += 1;
        }

        let cards = self.all_cards();
        let matching: BTreeSet<TerritoryId> = cards
            .iter()
            .filter_map(|&card| state.card(card).and_then(|card| card.territory_id))
            .filter(|&id| {
                state
                    .territory(id)
                    .is_some_and(|territory| territory.is_occupied_by(self.move_by_player))
            })
            .collect();
        let matching_territory_bonus = if matching.is_empty() {
            0
        } else {
            ctx.config.matching_territory_bonus
        };

        let redeemer = player_mut(state, self.move_by_player)?;
        redeemer.troops_remaining = redeemer
            .troops_remaining
            .saturating_add(total_set_bonus)
            .saturating_add(matching_territory_bonus);
        redeemer.must_place_territory_bonus = matching;
        redeemer.discard_cards(&cards);
        state.discard.extend(cards);

        Ok(Some(
            RecordRedeemedCards {
                redeem_cards_move: ctx.index,
                total_set_bonus,
                matching_territory_bonus,
            }
            .into(),
        ))
    }
}

/// Audit record of a redemption; the move already applied the effect.
impl EventTransition for RecordRedeemedCards {
    fn pre_validate(
        &self,
        state: &GameState,
        ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        state
            .log
            .resolve_before::<&MoveRedeemCards>(self.redeem_cards_move, ctx.index)?;
        Ok(())
    }

    fn apply(
        &self,
        _state: &mut GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<Option<Event>, ReduceError> {
        Ok(None)
    }
}

/// Puts a card into a hand. Taking it off the deck is the draw trigger's job.
impl EventTransition for RecordDrewCard {
    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        if state.card(self.card).is_none() {
            return Err(ReduceError::UnknownCard(self.card));
        }
        if player(state, self.player)?.holds(self.card) {
            return Err(ReduceError::DuplicateCard { card: self.card });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<Option<Event>, ReduceError> {
        player_mut(state, self.player)?.cards.push(self.card);
        Ok(None)
    }
}

/// Turns the discard pile into a fresh deck once the deck has run out.
///
/// The order is drawn from the game seed and this record's log index, so
/// replaying the log reproduces it.
impl EventTransition for RecordShuffledCards {
    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        if !state.deck.is_empty() {
            return Err(ReduceError::DeckNotEmpty {
                remaining: state.deck.len(),
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &TransitionContext<'_>,
    ) -> Result<Option<Event>, ReduceError> {
        state.deck = std::mem::take(&mut state.discard);
        let seed = compute_seed(
            state.game_seed,
            ctx.index.0 as u64,
            rng::context::RESHUFFLE,
        );
        rng::shuffle(&mut state.deck, ctx.rng, seed);
        Ok(None)
    }
}
