//! Shared fixtures for the reducer integration tests.
#![allow(dead_code)]

use conquest_core::{
    Board, Card, CardId, ContinentDef, ContinentId, GameConfig, GameState, PcgRng, PlayerId,
    TerritoryDef, TerritoryId,
};

pub const RED: PlayerId = PlayerId(1);
pub const BLUE: PlayerId = PlayerId(2);

pub const SEED: u64 = 0x5eed;

/// Installs a test-writer subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn territory(id: u32, continent: u32, neighbours: &[u32]) -> TerritoryDef {
    TerritoryDef {
        id: TerritoryId(id),
        name: format!("t{id}"),
        continent: ContinentId(continent),
        neighbours: neighbours.iter().map(|&n| TerritoryId(n)).collect(),
    }
}

/// Four territories in a ring (T0-T1-T2-T3-T0) split over two continents.
///
/// Cards K0..K7 name territory `i % 4`; K8 and K9 are wildcards.
pub fn ring_board() -> Board {
    Board {
        territories: vec![
            territory(0, 0, &[1, 3]),
            territory(1, 0, &[0, 2]),
            territory(2, 1, &[1, 3]),
            territory(3, 1, &[2, 0]),
        ],
        continents: vec![
            ContinentDef {
                id: ContinentId(0),
                name: "north".into(),
                bonus: 2,
            },
            ContinentDef {
                id: ContinentId(1),
                name: "south".into(),
                bonus: 3,
            },
        ],
        cards: (0..10)
            .map(|id| Card::new(CardId(id), (id < 8).then_some(TerritoryId(id % 4))))
            .collect(),
    }
}

/// Two-player game on [`ring_board`], 40 troops each, seeded deck.
pub fn two_player_game() -> GameState {
    GameState::setup(
        &ring_board(),
        &[RED, BLUE],
        &GameConfig::default(),
        SEED,
        &PcgRng,
    )
    .expect("ring board game should set up")
}

/// Moves specific cards from the deck into a hand, bypassing the log.
pub fn deal(state: &mut GameState, player: PlayerId, cards: &[u32]) {
    for &card in cards {
        let position = state
            .deck
            .iter()
            .position(|c| c.0 == card)
            .expect("card should be in the deck");
        state.deck.remove(position);
        state
            .players
            .get_mut(&player)
            .expect("player should exist")
            .cards
            .push(CardId(card));
    }
}

pub fn troops(state: &GameState, territory: u32) -> u32 {
    state
        .territory(TerritoryId(territory))
        .expect("territory should exist")
        .troops
}

pub fn reserve(state: &GameState, player: PlayerId) -> u32 {
    state
        .player(player)
        .expect("player should exist")
        .troops_remaining
}
