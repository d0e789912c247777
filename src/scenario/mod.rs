//! Declarative scenarios: built-in presets and TOML files
//!
//! A scenario bundles a rule configuration, board dimensions, a seed, and
//! an ordered list of setup operations, and can build a ready-to-run board
//! from them. TOML scenarios use string keys for state labels because TOML
//! tables cannot carry integer keys.
//!
//! ```toml
//! name = "forest-fire"
//!
//! [board]
//! width = 60
//! height = 60
//! seed = 12345
//!
//! [rules]
//! transitions = "1:2(12345678)2"
//! switching = "0:1(0.01),1:2(0.0001),2:0(0.5)"
//!
//! [rules.states]
//! "0" = "Empty"
//! "1" = "Tree"
//! "2" = "Burning"
//!
//! [[init]]
//! op = "fill_edges"
//! state = 0
//! ```

pub mod patterns;

use std::path::Path;

use serde::Deserialize;

use crate::board::Board;
use crate::config::{format_probability, CellConfig};
use crate::core::error::{LatticaError, Result};
use crate::core::types::{Coord, State};

/// Default seed for presets and scenario files that leave it out
pub const DEFAULT_SEED: u64 = 12345;

/// One board-setup operation, applied in order after construction
#[derive(Debug, Clone)]
enum SetupOp {
    Fill(State),
    FillEdges(State),
    RandomFill { back: State, front: State, p: f64 },
    RandomAdd { state: State, p: f64 },
    Pattern { origin: Coord, cells: String },
}

/// A complete, buildable simulation setup
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub config: CellConfig,
    pub width: u32,
    pub height: u32,
    pub wrap_around: bool,
    pub seed: u64,
    setup: Vec<SetupOp>,
}

impl Scenario {
    /// Conway's Game of Life seeded with an R-pentomino
    pub fn life() -> Result<Self> {
        let mut config = CellConfig::new();
        config.set_states(&[(0, "Dead"), (1, "Alive")])?;
        config.set_transition_rules("0:1(3)1,1:1(45678)0,1:0(78)0")?;

        Ok(Self {
            name: "life".to_string(),
            config,
            width: 60,
            height: 60,
            wrap_around: false,
            seed: DEFAULT_SEED,
            setup: vec![
                SetupOp::FillEdges(State(0)),
                SetupOp::Pattern {
                    origin: Coord::new(30, 30),
                    cells: patterns::R_PENTOMINO.to_string(),
                },
            ],
        })
    }

    /// Forest-fire model: trees grow with probability `growth`, catch fire
    /// from lightning with probability `ignition`, and burn down next to a
    /// burning neighbor
    pub fn forest_fire(growth: f64, ignition: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&growth) {
            return Err(LatticaError::InvalidProbability(growth));
        }
        if !(0.0..=1.0).contains(&ignition) {
            return Err(LatticaError::InvalidProbability(ignition));
        }

        let mut config = CellConfig::new();
        config.set_states(&[(0, "Empty"), (1, "Tree"), (2, "Burning")])?;
        config.set_transition_rules("1:2(12345678)2")?;
        config.set_switching_rules(&format!(
            "0:1({}),1:2({}),2:0(0.5)",
            format_probability(growth),
            format_probability(ignition)
        ))?;

        Ok(Self {
            name: "forest-fire".to_string(),
            config,
            width: 60,
            height: 60,
            wrap_around: false,
            seed: DEFAULT_SEED,
            setup: vec![
                SetupOp::RandomFill { back: State(0), front: State(1), p: 0.4 },
                SetupOp::FillEdges(State(0)),
            ],
        })
    }

    /// Parse a scenario from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: RawScenario = toml::from_str(text)?;
        raw.try_into()
    }

    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let scenario = Self::from_toml_str(&text)?;
        tracing::info!("loaded scenario {:?} from {}", scenario.name, path.display());
        Ok(scenario)
    }

    /// Build the configured board and run the setup operations in order
    pub fn build(&self) -> Result<Board> {
        let mut board = Board::new(
            self.config.clone(),
            (self.width, self.height),
            self.wrap_around,
            self.seed,
        )?;
        for op in &self.setup {
            match op {
                SetupOp::Fill(state) => board.fill(*state)?,
                SetupOp::FillEdges(state) => board.fill_edges(*state)?,
                SetupOp::RandomFill { back, front, p } => board.random_fill(*back, *front, *p)?,
                SetupOp::RandomAdd { state, p } => board.random_add(*state, *p)?,
                SetupOp::Pattern { origin, cells } => board.add_pattern(*origin, cells)?,
            }
        }
        Ok(board)
    }
}

#[derive(Debug, Deserialize)]
struct RawScenario {
    name: Option<String>,
    board: RawBoard,
    rules: RawRules,
    #[serde(default)]
    init: Vec<RawInit>,
}

#[derive(Debug, Deserialize)]
struct RawBoard {
    width: u32,
    height: u32,
    #[serde(default)]
    wrap_around: bool,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawRules {
    states: std::collections::BTreeMap<String, String>,
    transitions: Option<String>,
    switching: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum RawInit {
    Fill { state: u8 },
    FillEdges { state: u8 },
    RandomFill { back: u8, front: u8, p: f64 },
    RandomAdd { state: u8, p: f64 },
    Pattern { x: i32, y: i32, cells: String },
}

impl TryFrom<RawScenario> for Scenario {
    type Error = LatticaError;

    fn try_from(raw: RawScenario) -> Result<Self> {
        let mut labeled: Vec<(u8, String)> = Vec::with_capacity(raw.rules.states.len());
        for (key, name) in &raw.rules.states {
            let label: u8 = key.parse().map_err(|_| {
                LatticaError::Scenario(format!("state key {:?} is not an integer label", key))
            })?;
            labeled.push((label, name.clone()));
        }
        let borrowed: Vec<(u8, &str)> =
            labeled.iter().map(|(label, name)| (*label, name.as_str())).collect();

        let mut config = CellConfig::new();
        config.set_states(&borrowed)?;
        if let Some(transitions) = &raw.rules.transitions {
            config.set_transition_rules(transitions)?;
        }
        if let Some(switching) = &raw.rules.switching {
            config.set_switching_rules(switching)?;
        }

        let setup = raw
            .init
            .into_iter()
            .map(|op| match op {
                RawInit::Fill { state } => SetupOp::Fill(State(state)),
                RawInit::FillEdges { state } => SetupOp::FillEdges(State(state)),
                RawInit::RandomFill { back, front, p } => {
                    SetupOp::RandomFill { back: State(back), front: State(front), p }
                }
                RawInit::RandomAdd { state, p } => SetupOp::RandomAdd { state: State(state), p },
                RawInit::Pattern { x, y, cells } => {
                    SetupOp::Pattern { origin: Coord::new(x, y), cells }
                }
            })
            .collect();

        Ok(Scenario {
            name: raw.name.unwrap_or_else(|| "unnamed".to_string()),
            config,
            width: raw.board.width,
            height: raw.board.height,
            wrap_around: raw.board.wrap_around,
            seed: raw.board.seed.unwrap_or(DEFAULT_SEED),
            setup,
        })
    }
}
