//! Lattica - configurable 2-D cellular-automaton engine
//!
//! A board of cells, each holding one label from a finite set of states,
//! evolves generation by generation under rule sets given as compact
//! strings: deterministic neighbor-count transitions ("a dead cell with
//! exactly three live neighbors becomes alive") and stochastic per-cell
//! switching ("an empty cell grows a tree with probability 0.01"). The
//! same engine reproduces Conway's Life, forest-fire models and friends
//! purely through configuration.

pub mod board;
pub mod config;
pub mod core;
pub mod scenario;

pub use board::cell::Cell;
pub use board::Board;
pub use config::CellConfig;
pub use core::error::{LatticaError, Result};
pub use core::types::{Coord, Generation, State};
