//! Core type definitions used throughout the engine

use serde::{Deserialize, Serialize};

/// Numeric label for a cell state
///
/// Rule strings and patterns address states as single digits, so every
/// label in a configured domain is constrained to 0..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct State(pub u8);

impl State {
    /// Largest label the rule grammars can express
    pub const MAX_LABEL: u8 = 9;
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grid coordinate (x column, y row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The 8 surrounding cells of the Moore neighborhood
    ///
    /// Plain coordinate arithmetic, no wrapping. Callers are responsible
    /// for only asking about coordinates whose full neighborhood exists.
    pub fn moore_neighbors(&self) -> [Coord; 8] {
        [
            Coord::new(self.x - 1, self.y - 1),
            Coord::new(self.x, self.y - 1),
            Coord::new(self.x + 1, self.y - 1),
            Coord::new(self.x - 1, self.y),
            Coord::new(self.x + 1, self.y),
            Coord::new(self.x - 1, self.y + 1),
            Coord::new(self.x, self.y + 1),
            Coord::new(self.x + 1, self.y + 1),
        ]
    }
}

/// Generation counter (simulation time unit)
pub type Generation = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_equality_and_ordering() {
        assert_eq!(State(1), State(1));
        assert_ne!(State(1), State(2));
        assert!(State(0) < State(1));
    }

    #[test]
    fn test_state_display_is_single_digit() {
        assert_eq!(State(7).to_string(), "7");
    }

    #[test]
    fn test_moore_neighbors_are_the_eight_surrounding_cells() {
        let center = Coord::new(5, 5);
        let neighbors = center.moore_neighbors();
        assert_eq!(neighbors.len(), 8);
        for n in neighbors {
            assert_ne!(n, center);
            assert!((n.x - center.x).abs() <= 1);
            assert!((n.y - center.y).abs() <= 1);
        }
        // All distinct
        let mut seen = std::collections::HashSet::new();
        for n in neighbors {
            assert!(seen.insert(n));
        }
    }

    #[test]
    fn test_moore_neighbors_no_wrapping_at_origin() {
        let neighbors = Coord::new(0, 0).moore_neighbors();
        assert!(neighbors.contains(&Coord::new(-1, -1)));
        assert!(neighbors.contains(&Coord::new(1, 1)));
    }
}
