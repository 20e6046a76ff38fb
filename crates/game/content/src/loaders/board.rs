//! Board layout loader.
//!
//! Board files list each connection once; the loader expands them into the
//! symmetric neighbour lists of [`TerritoryDef`] and validates the result.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use conquest_core::{Board, Card, CardId, ContinentDef, ContinentId, TerritoryDef, TerritoryId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const CLASSIC_BOARD: &str = include_str!("../../data/classic.ron");

/// Board data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BoardRon {
    continents: Vec<ContinentRon>,
    territories: Vec<TerritoryRon>,
    connections: Vec<(u32, u32)>,
    cards: Vec<CardRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContinentRon {
    id: u32,
    name: String,
    bonus: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TerritoryRon {
    id: u32,
    name: String,
    continent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CardRon {
    id: u32,
    territory: Option<u32>,
}

/// Loader for board layouts from RON files.
pub struct BoardLoader;

impl BoardLoader {
    /// Load and validate a board from a RON file.
    pub fn load(path: &Path) -> LoadResult<Board> {
        let content = read_file(path)?;
        Self::from_ron_str(&content).with_context(|| format!("in board file {}", path.display()))
    }

    pub fn from_ron_str(content: &str) -> LoadResult<Board> {
        let data: BoardRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse board RON: {}", e))?;

        let mut neighbours: BTreeMap<u32, Vec<TerritoryId>> = BTreeMap::new();
        for &(a, b) in &data.connections {
            if a == b {
                anyhow::bail!("territory {a} is connected to itself");
            }
            neighbours.entry(a).or_default().push(TerritoryId(b));
            neighbours.entry(b).or_default().push(TerritoryId(a));
        }

        let territories = data
            .territories
            .into_iter()
            .map(|t| {
                let mut adjacent = neighbours.remove(&t.id).unwrap_or_default();
                adjacent.sort();
                adjacent.dedup();
                TerritoryDef {
                    id: TerritoryId(t.id),
                    name: t.name,
                    continent: ContinentId(t.continent),
                    neighbours: adjacent,
                }
            })
            .collect();

        if let Some(unknown) = neighbours.keys().next() {
            anyhow::bail!("connection refers to unknown territory {unknown}");
        }

        let board = Board {
            territories,
            continents: data
                .continents
                .into_iter()
                .map(|c| ContinentDef {
                    id: ContinentId(c.id),
                    name: c.name,
                    bonus: c.bonus,
                })
                .collect(),
            cards: data
                .cards
                .into_iter()
                .map(|c| Card::new(CardId(c.id), c.territory.map(TerritoryId)))
                .collect(),
        };

        board
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid board: {}", e))?;
        Ok(board)
    }
}

/// The standard 42-territory world board.
pub fn classic_board() -> LoadResult<Board> {
    BoardLoader::from_ron_str(CLASSIC_BOARD).context("in embedded classic board")
}
