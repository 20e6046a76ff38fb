//! End-to-end reducer scenarios on the ring board.

mod common;

use common::*;
use conquest_core::event::{
    CardSet, MoveAttack, MoveClaimTerritory, MoveFortify, MovePlaceInitialTroop, MoveRedeemCards,
    MoveTroopsAfterAttack, Record, RecordAttack, RecordRedeemedCards, RecordTerritoryConquered,
};
use conquest_core::{
    CardId, Event, EventIndex, GameConfig, GameState, PlayerId, Reducer, TerritoryId,
    check_invariants,
};

fn claim(player: PlayerId, territory: u32) -> MoveClaimTerritory {
    MoveClaimTerritory {
        move_by_player: player,
        territory: TerritoryId(territory),
    }
}

fn place(player: PlayerId, territory: u32) -> MovePlaceInitialTroop {
    MovePlaceInitialTroop {
        move_by_player: player,
        territory: TerritoryId(territory),
    }
}

/// Setup, a redemption, a fortify and one combat round, stopping right after
/// the combat record. Returns the index of that record.
fn play_until_combat(state: &mut GameState, config: &GameConfig) -> EventIndex {
    deal(state, RED, &[2, 3, 8]);
    let mut reducer = Reducer::new(state, config);

    // ================================================================
    // Setup: RED takes T0/T1, BLUE takes T2/T3
    // ================================================================
    reducer.commit(claim(RED, 0)).expect("claim T0");
    reducer.commit(claim(BLUE, 2)).expect("claim T2");
    reducer.commit(claim(RED, 1)).expect("claim T1");
    reducer.commit(claim(BLUE, 3)).expect("claim T3");
    for _ in 0..2 {
        reducer.commit(place(RED, 0)).expect("place on T0");
    }
    reducer.commit(place(BLUE, 2)).expect("place on T2");
    for _ in 0..3 {
        reducer.commit(place(RED, 1)).expect("place on T1");
    }

    // ================================================================
    // Redemption without territory match (RED holds none of T2, T3)
    // ================================================================
    let redeem = reducer
        .commit(MoveRedeemCards {
            move_by_player: RED,
            sets: vec![CardSet::new(CardId(2), CardId(3), CardId(8))],
        })
        .expect("redeem");
    assert_eq!(redeem, EventIndex(10));

    // ================================================================
    // Fortify and attack
    // ================================================================
    reducer
        .commit(MoveFortify {
            move_by_player: RED,
            source_territory: TerritoryId(0),
            target_territory: TerritoryId(1),
            troop_count: 2,
        })
        .expect("fortify");
    let attack = reducer
        .commit(MoveAttack::attack(RED, TerritoryId(1), TerritoryId(2), 3))
        .expect("attack");
    reducer
        .commit(RecordAttack {
            move_attack_id: attack,
            attacking_troops_lost: 1,
            defending_troops_lost: 2,
        })
        .expect("combat record")
}

#[test]
fn full_round_matches_troop_arithmetic() {
    init_tracing();
    let config = GameConfig::default();
    let mut state = two_player_game();
    let combat = play_until_combat(&mut state, &config);

    // Before conquest: T0 = 1 + 2 - 2, T1 = 1 + 3 + 2 - 1, T2 = 1 + 1 - 2
    assert_eq!(troops(&state, 0), 1);
    assert_eq!(troops(&state, 1), 5);
    assert_eq!(troops(&state, 2), 0);

    let mut reducer = Reducer::new(&mut state, &config);
    reducer
        .commit(RecordTerritoryConquered {
            record_attack_id: combat,
        })
        .expect("conquest");
    reducer
        .commit(MoveTroopsAfterAttack {
            move_by_player: RED,
            record_attack_id: combat,
            troop_count: 3,
        })
        .expect("troops after attack");

    let conquered = state.territory(TerritoryId(2)).expect("T2");
    assert_eq!(conquered.occupier, Some(RED));
    assert_eq!(conquered.troops, 3);
    assert_eq!(troops(&state, 0), 1);
    assert_eq!(troops(&state, 1), 2);
    assert_eq!(troops(&state, 3), 1);

    // 40 - 2 claims - 5 placements + 4 set bonus
    assert_eq!(reserve(&state, RED), 37);
    // 40 - 2 claims - 1 placement
    assert_eq!(reserve(&state, BLUE), 37);
    assert_eq!(state.card_sets_redeemed, 1);
    assert_eq!(state.log().len(), 17);
    assert!(check_invariants(&state).is_empty());
}

#[test]
fn redemption_record_refers_to_its_own_move() {
    let config = GameConfig::default();
    let mut state = two_player_game();
    play_until_combat(&mut state, &config);

    let record = state.log().get(EventIndex(11)).expect("record after redeem");
    assert_eq!(
        record,
        &Event::Record(Record::RedeemedCards(RecordRedeemedCards {
            redeem_cards_move: EventIndex(10),
            total_set_bonus: 4,
            matching_territory_bonus: 0,
        }))
    );
    assert!(record.is_synthesized());
}

#[test]
fn troops_after_attack_before_conquest_diverges() {
    let config = GameConfig::default();

    let mut ordered = two_player_game();
    let combat = play_until_combat(&mut ordered, &config);
    {
        let mut reducer = Reducer::new(&mut ordered, &config);
        reducer
            .commit(RecordTerritoryConquered {
                record_attack_id: combat,
            })
            .expect("conquest");
        reducer
            .commit(MoveTroopsAfterAttack {
                move_by_player: RED,
                record_attack_id: combat,
                troop_count: 3,
            })
            .expect("troops after attack");
    }

    let mut swapped = two_player_game();
    let combat = play_until_combat(&mut swapped, &config);
    let mut reducer = Reducer::new(&mut swapped, &config);
    reducer
        .commit(MoveTroopsAfterAttack {
            move_by_player: RED,
            record_attack_id: combat,
            troop_count: 3,
        })
        .expect("troops after attack is not refused");

    // Troops landed on a territory BLUE still occupies
    let landed = reducer.state().territory(TerritoryId(2)).expect("T2");
    assert_eq!(landed.occupier, Some(BLUE));
    assert_eq!(landed.troops, 3);

    reducer
        .commit(RecordTerritoryConquered {
            record_attack_id: combat,
        })
        .expect("conquest");

    // Conquest wipes the reinforcement out
    assert_eq!(troops(&swapped, 2), 0);
    assert_ne!(swapped.territories, ordered.territories);
    assert_eq!(troops(&ordered, 2), 3);
    assert!(!check_invariants(&swapped).is_empty());
    assert!(check_invariants(&ordered).is_empty());
}

#[test]
fn start_turn_record_uses_board_bonuses() {
    let config = GameConfig::default();
    let board = ring_board();
    let mut state = two_player_game();
    let combat = play_until_combat(&mut state, &config);
    let mut reducer = Reducer::new(&mut state, &config);
    reducer
        .commit(RecordTerritoryConquered {
            record_attack_id: combat,
        })
        .expect("conquest");
    reducer
        .commit(MoveTroopsAfterAttack {
            move_by_player: RED,
            record_attack_id: combat,
            troop_count: 3,
        })
        .expect("troops after attack");

    // RED holds T0, T1 (all of north) and T2
    let start = board.start_turn_record(reducer.state(), RED, &config);
    assert_eq!(start.territory_bonus, 3);
    assert_eq!(start.continent_bonus, 2);

    reducer.commit(start).expect("start turn");
    assert_eq!(reserve(&state, RED), 37 + 5);
}
