//! Card flow: draws, redemptions, reshuffles and elimination.

mod common;

use common::*;
use conquest_core::event::{
    CardSet, MoveAttack, MoveClaimTerritory, MoveRedeemCards, Record, RecordAttack,
    RecordPlayerEliminated, RecordShuffledCards,
};
use conquest_core::{
    CommitError, Event, EventKind, GameConfig, GameError, ReduceError, Reducer, TerritoryId,
    TransitionPhase, check_invariants,
};

#[test]
fn sequential_redemptions_follow_the_schedule() {
    init_tracing();
    let config = GameConfig::default();
    let mut state = two_player_game();
    let mut reducer = Reducer::new(&mut state, &config);

    let mut bonuses = Vec::new();
    for _ in 0..8 {
        let hand: Vec<_> = (0..3)
            .map(|_| {
                reducer
                    .draw_card(RED)
                    .expect("draw")
                    .expect("a card is always available")
            })
            .collect();

        reducer
            .commit(MoveRedeemCards {
                move_by_player: RED,
                sets: vec![CardSet::new(hand[0], hand[1], hand[2])],
            })
            .expect("redeem");

        let Some(Event::Record(Record::RedeemedCards(outcome))) = reducer.state().log().last()
        else {
            panic!("redeem must be followed by its outcome record");
        };
        bonuses.push(outcome.total_set_bonus);
        assert!(check_invariants(reducer.state()).is_empty());
    }

    assert_eq!(bonuses, vec![4, 6, 8, 10, 12, 15, 20, 25]);
    assert_eq!(state.card_sets_redeemed, 8);

    let shuffles = state
        .log()
        .iter()
        .filter(|(_, event)| event.kind() == EventKind::RecordShuffledCards)
        .count();
    assert!(shuffles >= 1, "24 draws from 10 cards must reshuffle");
}

#[test]
fn shuffle_while_deck_holds_cards_is_fatal_and_changes_nothing() {
    let config = GameConfig::default();
    let mut state = two_player_game();
    let before = state.clone();

    let err = Reducer::new(&mut state, &config)
        .commit(RecordShuffledCards)
        .unwrap_err();

    match &err {
        CommitError::Rejected {
            kind,
            source,
            index,
        } => {
            assert_eq!(*kind, EventKind::RecordShuffledCards);
            assert_eq!(source.phase, TransitionPhase::PreValidate);
            assert_eq!(source.error, ReduceError::DeckNotEmpty { remaining: 10 });
            assert_eq!(index.0, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.error_code(), "REDUCE_DECK_NOT_EMPTY");
    assert!(err.severity().is_internal());
    assert_eq!(state, before);
}

#[test]
fn cards_are_conserved_through_elimination() {
    let config = GameConfig::default();
    let mut state = two_player_game();
    let mut reducer = Reducer::new(&mut state, &config);

    reducer
        .commit(MoveClaimTerritory {
            move_by_player: RED,
            territory: TerritoryId(0),
        })
        .expect("claim");
    reducer
        .commit(MoveClaimTerritory {
            move_by_player: BLUE,
            territory: TerritoryId(1),
        })
        .expect("claim");

    let mut blue_cards = Vec::new();
    for _ in 0..4 {
        blue_cards.push(reducer.draw_card(BLUE).expect("draw").expect("card"));
    }
    let red_card = reducer.draw_card(RED).expect("draw").expect("card");

    let attack = reducer
        .commit(MoveAttack::attack(RED, TerritoryId(0), TerritoryId(1), 1))
        .expect("attack");
    let combat = reducer
        .commit(RecordAttack {
            move_attack_id: attack,
            attacking_troops_lost: 0,
            defending_troops_lost: 0,
        })
        .expect("combat");
    reducer
        .commit(RecordPlayerEliminated {
            player: BLUE,
            record_attack_id: combat,
            cards_surrendered: blue_cards.clone(),
        })
        .expect("elimination");

    let red = state.player(RED).expect("red");
    let mut expected = vec![red_card];
    expected.extend(blue_cards);
    assert_eq!(red.cards, expected);
    assert!(!state.player(BLUE).expect("blue").alive);
    assert_eq!(state.deck.len(), 5);
    assert!(check_invariants(&state).is_empty());
}
