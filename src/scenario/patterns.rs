//! Classic seed patterns in the pattern grammar
//!
//! Rows are y-offsets from the stamp origin, columns are x-offsets, so the
//! strings read like the usual textbook pictures.

/// R-pentomino, the famously long-lived 5-cell methuselah
pub const R_PENTOMINO: &str = "011,110,010";

/// Glider traveling one cell down-right every four generations
pub const GLIDER: &str = "010,001,111";

/// Period-2 oscillator
pub const BLINKER: &str = "111";

/// 2x2 still life
pub const BLOCK: &str = "11,11";
