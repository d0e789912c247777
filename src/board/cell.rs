//! Per-position state holder

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{Coord, State};

/// A single cell on the board
///
/// The neighbor histogram is scratch space: the board resets and refills it
/// once per update pass, and it carries no meaning between generations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub coord: Coord,
    pub current_state: State,
    pub is_edge: bool,
    pub(crate) neighbors: AHashMap<State, u8>,
}

impl Cell {
    pub fn new(state: State, coord: Coord) -> Self {
        Self {
            coord,
            current_state: state,
            is_edge: false,
            neighbors: AHashMap::new(),
        }
    }

    /// Clear the neighbor histogram ahead of a fresh count
    pub fn reset_neighbors(&mut self) {
        self.neighbors.clear();
    }

    /// Count of neighbors seen in `state` during the last refill
    pub fn neighbor_count(&self, state: State) -> u8 {
        self.neighbors.get(&state).copied().unwrap_or(0)
    }
}
