//! Attack moves, combat records and conquest.
//!
//! Combat outcomes arrive precomputed as troop losses. The handlers recover
//! which territories were involved by walking back through the log: a combat
//! record names its attack move, and conquest or troop movement names the
//! combat record.

use crate::engine::{EventTransition, ReduceError, TransitionContext};
use crate::event::{
    Event, MoveAttack, MoveDefend, MoveTroopsAfterAttack, RecordAttack, RecordTerritoryConquered,
    ResolvedAttack,
};
use crate::state::GameState;

use super::{
    add_troops, ensure_room, ensure_troops, player, remove_troops, territory, territory_mut,
};

/// Kept for the history only; the combat record carries the effect.
impl EventTransition for MoveAttack {
    fn apply(
        &self,
        _state: &mut GameState,
        _ctx: &TransitionContext<'_>,
    ) -> Result<Option<Event>, ReduceError> {
        Ok(None)
    }
}

impl EventTransition for MoveDefend {
    fn pre_validate(
        &self,
        state: &GameState,
        ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        state
            .log
            .resolve_before::<ResolvedAttack>(self.move_attack_id, ctx.index)?;
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

impl EventTransition for RecordAttack {
    fn pre_validate(
        &self,
        state: &GameState,
        ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        let attack = state
            .log
            .resolve_before::<ResolvedAttack>(self.move_attack_id, ctx.index)?;
        let attacking = territory(state, attack.attacking_territory)?;
        ensure_troops(attacking, self.attacking_troops_lost)?;

        let defending = territory(state, attack.defending_territory)?;
        // Both losses come out of the same garrison when a territory attacks itself.
        let available = if attacking.id == defending.id {
            defending.troops - self.attacking_troops_lost
        } else {
            defending.troops
        };
        if available < self.defending_troops_lost {
            return Err(ReduceError::InsufficientTroops {
                territory: defending.id,
                available,
                requested: self.defending_troops_lost,
            });
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
            .resolve_before::<ResolvedAttack>(self.move_attack_id, ctx.index)?;

        remove_troops(
            territory_mut(state, attack.attacking_territory)?,
            self.attacking_troops_lost,
        )?;
        remove_troops(
            territory_mut(state, attack.defending_territory)?,
            self.defending_troops_lost,
        )?;
        Ok(None)
    }
}

/// Hands the defending territory to the attacker with no troops on it.
///
/// Must precede the [`MoveTroopsAfterAttack`] that garrisons the territory.
impl EventTransition for RecordTerritoryConquered {
    fn pre_validate(
        &self,
        state: &GameState,
        ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        let attack = state
            .log
            .resolve_attack_origin(self.record_attack_id, ctx.index)?;
        player(state, attack.attacker)?;
        territory(state, attack.defending_territory)?;
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

        let conquered = territory_mut(state, attack.defending_territory)?;
        conquered.troops = 0;
        conquered.occupier = Some(attack.attacker);
        Ok(None)
    }
}

impl EventTransition for MoveTroopsAfterAttack {
    fn pre_validate(
        &self,
        state: &GameState,
        ctx: &TransitionContext<'_>,
    ) -> Result<(), ReduceError> {
        let attack = state
            .log
            .resolve_attack_origin(self.record_attack_id, ctx.index)?;
        let defending = territory(state, attack.defending_territory)?;
        let attacking = territory(state, attack.attacking_territory)?;
        ensure_troops(attacking, self.troop_count)?;
        if attacking.id != defending.id {
            ensure_room(defending, self.troop_count)?;
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

        remove_troops(territory_mut(state, attack.attacking_territory)?, self.troop_count)?;
        add_troops(territory_mut(state, attack.defending_territory)?, self.troop_count)?;
        Ok(None)
    }
}
