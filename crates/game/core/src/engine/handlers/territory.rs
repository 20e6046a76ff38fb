//! Setup placement, fortification and reinforcement.

use crate::engine::{EventTransition, ReduceError, TransitionContext};
use crate::event::{
    Event, MoveClaimTerritory, MoveDistributeTroops, MoveFortify, MovePlaceInitialTroop,
};
use crate::state::GameState;

use super::{
    add_troops, ensure_reserve, ensure_room, ensure_troops, player, player_mut, remove_troops,
    spend_reserve, territory, territory_mut,
};

/// Occupies an unoccupied territory with a single troop from the reserve.
impl EventTransition for MoveClaimTerritory {
    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        territory(state, self.territory)?;
        ensure_reserve(player(state, self.move_by_player)?, 1)
    }

    fn apply(
        &self,
        state: &mut GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<Option<Event>, ReduceError> {
        spend_reserve(player_mut(state, self.move_by_player)?, 1)?;

        let territory = territory_mut(state, self.territory)?;
        territory.occupier = Some(self.move_by_player);
        territory.troops = 1;
        Ok(None)
    }
}

impl EventTransition for MovePlaceInitialTroop {
    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        territory(state, self.territory)?;
        ensure_reserve(player(state, self.move_by_player)?, 1)
    }

    fn apply(
        &self,
        state: &mut GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<Option<Event>, ReduceError> {
        add_troops(territory_mut(state, self.territory)?, 1)?;
        spend_reserve(player_mut(state, self.move_by_player)?, 1)?;
        Ok(None)
    }
}

/// Moves troops between two territories. Ownership, adjacency and the
/// garrison left behind are the move validator's business.
impl EventTransition for MoveFortify {
    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        let target = territory(state, self.target_territory)?;
        let source = territory(state, self.source_territory)?;
        ensure_troops(source, self.troop_count)?;
        if source.id != target.id {
            ensure_room(target, self.troop_count)?;
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<Option<Event>, ReduceError> {
        remove_troops(territory_mut(state, self.source_territory)?, self.troop_count)?;
        add_troops(territory_mut(state, self.target_territory)?, self.troop_count)?;
        Ok(None)
    }
}

/// Places the whole reserve and discharges any reinforcement obligation.
impl EventTransition for MoveDistributeTroops {
    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        player(state, self.move_by_player)?;
        for (&id, &troops) in &self.distributions {
            let target = territory(state, id)?;
            if target.troops.checked_add(troops).is_none() {
                return Err(ReduceError::TroopOverflow(id));
            }
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &TransitionContext<'_>,
    ) -> Result<Option<Event>, ReduceError> {
        let player = player_mut(state, self.move_by_player)?;

        let total = self.total();
        if total != u64::from(player.troops_remaining) {
            tracing::warn!(
                index = %ctx.index,
                player = %player.id,
                reserve = player.troops_remaining,
                distributed = total,
                "distribution does not match the reserve"
            );
        }
        let skipped: Vec<_> = player
            .must_place_territory_bonus
            .iter()
            .filter(|id| self.distributions.get(id).is_none_or(|&troops| troops == 0))
            .copied()
            .collect();
        if !skipped.is_empty() {
            tracing::warn!(
                index = %ctx.index,
                player = %player.id,
                ?skipped,
                "distribution skips obligated territories"
            );
        }

        player.troops_remaining = 0;
        player.must_place_territory_bonus.clear();

        for (&id, &troops) in &self.distributions {
            add_troops(territory_mut(state, id)?, troops)?;
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::engine::handlers::test_support::*;
    use crate::engine::{ReduceError, TransitionPhase};
    use crate::event::{
        MoveClaimTerritory, MoveDistributeTroops, MoveFortify, MovePlaceInitialTroop,
    };
    use crate::state::TerritoryId;

    #[test]
    fn claim_sets_single_troop_and_spends_reserve() {
        let mut state = state();
        let config = config();
        reducer(&mut state, &config)
            .commit(MoveClaimTerritory {
                move_by_player: ALICE,
                territory: TerritoryId(2),
            })
            .unwrap();

        let claimed = state.territory(TerritoryId(2)).unwrap();
        assert_eq!(claimed.occupier, Some(ALICE));
        assert_eq!(claimed.troops, 1);
        assert_eq!(state.player(ALICE).unwrap().troops_remaining, 9);
    }

    #[test]
    fn claim_with_empty_reserve_is_rejected() {
        let mut state = state();
        state.players.get_mut(&ALICE).unwrap().troops_remaining = 0;
        let config = config();

        let err = reducer(&mut state, &config)
            .commit(MoveClaimTerritory {
                move_by_player: ALICE,
                territory: TerritoryId(0),
            })
            .unwrap_err();

        assert!(matches!(
            err.reduce_error(),
            Some(ReduceError::InsufficientReserve { available: 0, requested: 1, .. })
        ));
        assert!(state.territory(TerritoryId(0)).unwrap().occupier.is_none());
        assert!(state.log().is_empty());
    }

    #[test]
    fn place_initial_troop_adds_one() {
        let mut state = state();
        occupy(&mut state, 0, ALICE, 1);
        let config = config();
        let mut reducer = reducer(&mut state, &config);
        for _ in 0..2 {
            reducer
                .commit(MovePlaceInitialTroop {
                    move_by_player: ALICE,
                    territory: TerritoryId(0),
                })
                .unwrap();
        }

        assert_eq!(state.territory(TerritoryId(0)).unwrap().troops, 3);
        assert_eq!(state.player(ALICE).unwrap().troops_remaining, 8);
    }

    #[test]
    fn fortify_moves_troops() {
        let mut state = state();
        occupy(&mut state, 0, ALICE, 5);
        occupy(&mut state, 1, ALICE, 1);
        let config = config();
        reducer(&mut state, &config)
            .commit(MoveFortify {
                move_by_player: ALICE,
                source_territory: TerritoryId(0),
                target_territory: TerritoryId(1),
                troop_count: 4,
            })
            .unwrap();

        assert_eq!(state.territory(TerritoryId(0)).unwrap().troops, 1);
        assert_eq!(state.territory(TerritoryId(1)).unwrap().troops, 5);
    }

    #[test]
    fn fortify_more_than_available_fails_before_mutation() {
        let mut state = state();
        occupy(&mut state, 0, ALICE, 2);
        occupy(&mut state, 1, ALICE, 1);
        let before = state.clone();
        let config = config();

        let err = reducer(&mut state, &config)
            .commit(MoveFortify {
                move_by_player: ALICE,
                source_territory: TerritoryId(0),
                target_territory: TerritoryId(1),
                troop_count: 3,
            })
            .unwrap_err();

        let crate::engine::CommitError::Rejected { source, .. } = err else {
            panic!("expected rejection");
        };
        assert_eq!(source.phase, TransitionPhase::PreValidate);
        assert_eq!(state, before);
    }

    #[test]
    fn fortify_into_a_full_territory_leaves_the_source_intact() {
        let mut state = state();
        occupy(&mut state, 0, ALICE, 5);
        occupy(&mut state, 1, ALICE, u32::MAX);
        let before = state.clone();
        let config = config();

        let err = reducer(&mut state, &config)
            .commit(MoveFortify {
                move_by_player: ALICE,
                source_territory: TerritoryId(0),
                target_territory: TerritoryId(1),
                troop_count: 4,
            })
            .unwrap_err();

        assert_eq!(err.reduce_error(), Some(&ReduceError::TroopOverflow(TerritoryId(1))));
        assert_eq!(state, before);
    }

    #[test]
    fn distribute_empties_reserve_and_clears_obligation() {
        let mut state = state();
        occupy(&mut state, 0, ALICE, 1);
        occupy(&mut state, 1, ALICE, 1);
        state
            .players
            .get_mut(&ALICE)
            .unwrap()
            .must_place_territory_bonus
            .insert(TerritoryId(1));
        let config = config();

        reducer(&mut state, &config)
            .commit(MoveDistributeTroops {
                move_by_player: ALICE,
                distributions: BTreeMap::from([(TerritoryId(0), 6), (TerritoryId(1), 4)]),
            })
            .unwrap();

        let alice = state.player(ALICE).unwrap();
        assert_eq!(alice.troops_remaining, 0);
        assert!(alice.must_place_territory_bonus.is_empty());
        assert_eq!(state.territory(TerritoryId(0)).unwrap().troops, 7);
        assert_eq!(state.territory(TerritoryId(1)).unwrap().troops, 5);
    }

    #[test]
    fn distribute_tolerates_mismatched_totals() {
        let mut state = state();
        occupy(&mut state, 0, ALICE, 1);
        let config = config();

        reducer(&mut state, &config)
            .commit(MoveDistributeTroops {
                move_by_player: ALICE,
                distributions: BTreeMap::from([(TerritoryId(0), 3)]),
            })
            .unwrap();

        assert_eq!(state.player(ALICE).unwrap().troops_remaining, 0);
        assert_eq!(state.territory(TerritoryId(0)).unwrap().troops, 4);
    }
}
