//! Board: rectangular grid of cells and the generation-update algorithm
//!
//! The board owns its cells, its rule configuration, and a seeded random
//! generator, so two boards built with the same seed and fed the same
//! operations evolve identically.

pub mod cell;

use std::fmt;

use ahash::AHashMap;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::board::cell::Cell;
use crate::config::CellConfig;
use crate::core::error::{LatticaError, Result};
use crate::core::types::{Coord, Generation, State};

/// Rectangular grid of cells evolving under a [`CellConfig`]
#[derive(Debug, Clone)]
pub struct Board {
    width: u32,
    height: u32,
    /// Stored but inert: neighbor lookup never wraps. Construction logs a
    /// warning when set, so the gap is visible instead of silent.
    wrap_around: bool,
    config: CellConfig,
    cells: AHashMap<Coord, Cell>,
    rng: ChaCha8Rng,
    generation: Generation,
}

impl Board {
    /// Build a `width` x `height` board
    ///
    /// Every cell starts in the domain's first (lowest-labeled) state, and
    /// border cells are flagged as edges. Errors on zero dimensions or an
    /// empty state domain.
    pub fn new(config: CellConfig, dims: (u32, u32), wrap_around: bool, seed: u64) -> Result<Self> {
        let (width, height) = dims;
        if width == 0 || height == 0 {
            return Err(LatticaError::InvalidDimensions(width, height));
        }
        let initial = config.default_state().ok_or(LatticaError::EmptyDomain)?;

        let mut cells = AHashMap::with_capacity((width as usize) * (height as usize));
        for x in 0..width as i32 {
            for y in 0..height as i32 {
                let coord = Coord::new(x, y);
                let mut cell = Cell::new(initial, coord);
                cell.is_edge =
                    x == 0 || y == 0 || x == width as i32 - 1 || y == height as i32 - 1;
                cells.insert(coord, cell);
            }
        }

        if wrap_around {
            tracing::warn!(
                "wrap_around requested but toroidal neighbor lookup is not implemented; \
                 the flag is stored and edges stay fixed"
            );
        }

        Ok(Self {
            width,
            height,
            wrap_around,
            config,
            cells,
            rng: ChaCha8Rng::seed_from_u64(seed),
            generation: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn wrap_around(&self) -> bool {
        self.wrap_around
    }

    pub fn config(&self) -> &CellConfig {
        &self.config
    }

    /// Generations computed since construction
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    pub fn state_at(&self, coord: Coord) -> Option<State> {
        self.cells.get(&coord).map(|cell| cell.current_state)
    }

    /// Number of cells currently in `state`
    pub fn population(&self, state: State) -> usize {
        self.cells.values().filter(|cell| cell.current_state == state).count()
    }

    /// Coordinates in construction order: outer loop over x, inner over y
    fn coords(&self) -> impl Iterator<Item = Coord> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..w).flat_map(move |x| (0..h).map(move |y| Coord::new(x, y)))
    }

    /// Restartable iteration over all cells in construction order
    ///
    /// Shared by the update pass and by renderers reading between steps.
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.coords().filter_map(move |coord| self.cells.get(&coord))
    }

    /// Read-only snapshot of coordinates and states, in iteration order
    pub fn snapshot(&self) -> impl Iterator<Item = (Coord, State)> + '_ {
        self.iter_cells().map(|cell| (cell.coord, cell.current_state))
    }

    fn ensure_known(&self, state: State) -> Result<()> {
        if self.config.contains(state) {
            Ok(())
        } else {
            Err(LatticaError::UnknownState(state.0))
        }
    }

    /// Set every cell to `state`
    pub fn fill(&mut self, state: State) -> Result<()> {
        self.ensure_known(state)?;
        for cell in self.cells.values_mut() {
            cell.current_state = state;
        }
        Ok(())
    }

    /// Set only the edge cells to `state`
    pub fn fill_edges(&mut self, state: State) -> Result<()> {
        self.ensure_known(state)?;
        for cell in self.cells.values_mut() {
            if cell.is_edge {
                cell.current_state = state;
            }
        }
        Ok(())
    }

    /// Fill with `back`, then flip each cell to `front` with probability `p`
    ///
    /// Draws are independent and taken in iteration order, so a fixed seed
    /// reproduces the same fill.
    pub fn random_fill(&mut self, back: State, front: State, p: f64) -> Result<()> {
        self.ensure_known(back)?;
        self.ensure_known(front)?;
        self.fill(back)?;
        let coords: Vec<Coord> = self.coords().collect();
        for coord in coords {
            if self.rng.gen::<f64>() < p {
                if let Some(cell) = self.cells.get_mut(&coord) {
                    cell.current_state = front;
                }
            }
        }
        Ok(())
    }

    /// Flip each cell to `state` with probability `p`, leaving the rest alone
    pub fn random_add(&mut self, state: State, p: f64) -> Result<()> {
        self.ensure_known(state)?;
        let coords: Vec<Coord> = self.coords().collect();
        for coord in coords {
            if self.rng.gen::<f64>() < p {
                if let Some(cell) = self.cells.get_mut(&coord) {
                    cell.current_state = state;
                }
            }
        }
        Ok(())
    }

    /// Stamp a pattern with its top-left corner at `origin`
    ///
    /// The pattern is parsed and domain-checked up front; stamping then
    /// proceeds row-major, top-left first. A stamp outside the board stops
    /// with a bounds error and leaves the cells already stamped in place.
    pub fn add_pattern(&mut self, origin: Coord, pattern: &str) -> Result<()> {
        let rows = crate::config::parser::parse_pattern(pattern, self.config.states_map())?;
        for (j, row) in rows.iter().enumerate() {
            for (i, &state) in row.iter().enumerate() {
                let coord = Coord::new(origin.x + i as i32, origin.y + j as i32);
                match self.cells.get_mut(&coord) {
                    Some(cell) => cell.current_state = state,
                    None => {
                        return Err(LatticaError::OutOfBounds {
                            x: coord.x,
                            y: coord.y,
                            width: self.width,
                            height: self.height,
                        })
                    }
                }
            }
        }
        Ok(())
    }

    /// Copy all cell states from `other` into this board in place
    pub fn replace_with(&mut self, other: &Board) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(LatticaError::DimensionMismatch(
                self.width,
                self.height,
                other.width,
                other.height,
            ));
        }
        for (coord, cell) in self.cells.iter_mut() {
            if let Some(src) = other.cells.get(coord) {
                cell.current_state = src.current_state;
            }
        }
        Ok(())
    }

    /// Refill the cell's neighbor histogram from the eight Moore offsets
    ///
    /// Only invoked for non-edge cells, where every offset resolves to a
    /// live cell, so the returned counts always sum to 8.
    pub fn acquire_neighbor_info(&mut self, coord: Coord) -> AHashMap<State, u8> {
        let neighbor_states: Vec<State> = coord
            .moore_neighbors()
            .iter()
            .filter_map(|c| self.cells.get(c).map(|cell| cell.current_state))
            .collect();

        match self.cells.get_mut(&coord) {
            Some(cell) => {
                cell.reset_neighbors();
                for state in neighbor_states {
                    *cell.neighbors.entry(state).or_insert(0) += 1;
                }
                cell.neighbors.clone()
            }
            None => AHashMap::new(),
        }
    }

    /// Compute one generation
    ///
    /// Double buffered: every rule evaluation reads the pre-update snapshot
    /// and writes into a scratch board, which is committed in one step at
    /// the end, so no partial generation is ever observable. Edge cells are
    /// skipped entirely. Cells are visited in iteration order so per-cell
    /// switching draws replay identically under a fixed seed.
    pub fn update(&mut self) {
        let mut next = self.clone();
        let coords: Vec<Coord> = self.coords().collect();

        for coord in coords {
            let (current, is_edge) = match self.cells.get(&coord) {
                Some(cell) => (cell.current_state, cell.is_edge),
                None => continue,
            };
            if is_edge {
                continue;
            }

            let histogram = self.acquire_neighbor_info(coord);

            // Deterministic pass: walk the clauses for this state in order;
            // the last matching clause wins.
            if let Some(rules) = self.config.rules().rules_for(current) {
                for rule in rules {
                    let count = histogram.get(&rule.neighbor).copied().unwrap_or(0);
                    if rule.counts.contains(&count) {
                        if let Some(cell) = next.cells.get_mut(&coord) {
                            cell.current_state = rule.result;
                        }
                    }
                }
            }

            // Stochastic pass: keyed by the pre-update state and applied
            // after the deterministic write, so it takes precedence.
            if let Some(switch) = self.config.switching_rules().get(current).copied() {
                if self.rng.gen::<f64>() < switch.probability {
                    if let Some(cell) = next.cells.get_mut(&coord) {
                        cell.current_state = switch.result;
                    }
                }
            }
        }

        if let Err(err) = self.replace_with(&next) {
            // Scratch is a clone of self, so this cannot actually happen
            tracing::error!("generation commit failed: {}", err);
        }
        self.generation += 1;
    }
}

impl fmt::Display for Board {
    /// Textual dump, one digit per cell, one line per outer-loop index
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in 0..self.width as i32 {
            for y in 0..self.height as i32 {
                if let Some(cell) = self.cells.get(&Coord::new(x, y)) {
                    write!(f, "{}", cell.current_state)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
