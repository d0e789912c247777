//! Integration tests driving the engine with Conway's Game of Life
//!
//! The full Life rule set in the transition grammar is
//! `0:1(3)1,1:1(45678)0,1:0(78)0`: birth on exactly 3 live neighbors,
//! death by overcrowding on 4-8 live neighbors, and death by isolation
//! expressed through the dead-neighbor count (7 or 8 dead neighbors means
//! 0 or 1 live ones). Edge cells are exempt from all of it, so every
//! pattern here stays clear of the border.

use lattica::scenario::patterns;
use lattica::{Board, CellConfig, Coord, State};

const LIFE_RULES: &str = "0:1(3)1,1:1(45678)0,1:0(78)0";

fn life_board(dims: (u32, u32)) -> Board {
    let mut config = CellConfig::new();
    config.set_states(&[(0, "Dead"), (1, "Alive")]).unwrap();
    config.set_transition_rules(LIFE_RULES).unwrap();
    Board::new(config, dims, false, 0).unwrap()
}

fn live_cells(board: &Board) -> Vec<Coord> {
    board
        .iter_cells()
        .filter(|cell| cell.current_state == State(1))
        .map(|cell| cell.coord)
        .collect()
}

#[test]
fn test_blinker_oscillates_with_period_two() {
    let mut board = life_board((5, 5));
    // Vertical blinker through the center
    board.add_pattern(Coord::new(2, 1), "1,1,1").unwrap();
    let initial = live_cells(&board);

    board.update();
    let mut horizontal = live_cells(&board);
    horizontal.sort_by_key(|c| (c.x, c.y));
    assert_eq!(
        horizontal,
        vec![Coord::new(1, 2), Coord::new(2, 2), Coord::new(3, 2)]
    );

    board.update();
    assert_eq!(live_cells(&board), initial);
}

#[test]
fn test_block_is_a_still_life() {
    let mut board = life_board((6, 6));
    board.add_pattern(Coord::new(2, 2), patterns::BLOCK).unwrap();
    let initial = live_cells(&board);

    for _ in 0..10 {
        board.update();
    }

    assert_eq!(live_cells(&board), initial);
}

#[test]
fn test_glider_travels_one_cell_diagonally_every_four_generations() {
    let mut board = life_board((12, 12));
    board.add_pattern(Coord::new(4, 4), patterns::GLIDER).unwrap();
    let initial = live_cells(&board);

    for _ in 0..4 {
        board.update();
        assert_eq!(board.population(State(1)), 5);
    }

    let mut moved = live_cells(&board);
    moved.sort_by_key(|c| (c.x, c.y));
    let mut expected: Vec<Coord> =
        initial.iter().map(|c| Coord::new(c.x + 1, c.y + 1)).collect();
    expected.sort_by_key(|c| (c.x, c.y));
    assert_eq!(moved, expected);
}

#[test]
fn test_r_pentomino_first_generation() {
    let mut board = life_board((12, 12));
    board.add_pattern(Coord::new(5, 5), patterns::R_PENTOMINO).unwrap();
    assert_eq!(board.population(State(1)), 5);

    board.update();

    let mut live = live_cells(&board);
    live.sort_by_key(|c| (c.x, c.y));
    let mut expected = vec![
        Coord::new(5, 5),
        Coord::new(6, 5),
        Coord::new(7, 5),
        Coord::new(5, 6),
        Coord::new(5, 7),
        Coord::new(6, 7),
    ];
    expected.sort_by_key(|c| (c.x, c.y));
    assert_eq!(live, expected);
}

#[test]
fn test_birth_on_exactly_three_neighbors() {
    // The reduced rule set without the isolation clause
    let mut config = CellConfig::new();
    config.set_states(&[(0, "Dead"), (1, "Alive")]).unwrap();
    config.set_transition_rules("0:1(3)1,1:1(45678)0").unwrap();
    let mut board = Board::new(config, (5, 5), false, 0).unwrap();
    board.add_pattern(Coord::new(1, 1), "111").unwrap();

    board.update();

    assert_eq!(board.state_at(Coord::new(2, 2)), Some(State(1)));
}

#[test]
fn test_death_on_four_neighbors() {
    let mut config = CellConfig::new();
    config.set_states(&[(0, "Dead"), (1, "Alive")]).unwrap();
    config.set_transition_rules("0:1(3)1,1:1(45678)0").unwrap();
    let mut board = Board::new(config, (5, 5), false, 0).unwrap();
    // Live center surrounded by four live diagonal neighbors
    board.add_pattern(Coord::new(1, 1), "101,010,101").unwrap();
    assert_eq!(board.state_at(Coord::new(2, 2)), Some(State(1)));

    board.update();

    assert_eq!(board.state_at(Coord::new(2, 2)), Some(State(0)));
}

#[test]
fn test_edges_never_change_across_a_long_run() {
    let mut board = life_board((20, 20));
    board.add_pattern(Coord::new(8, 8), patterns::R_PENTOMINO).unwrap();

    for _ in 0..200 {
        board.update();
    }

    for cell in board.iter_cells() {
        if cell.is_edge {
            assert_eq!(cell.current_state, State(0), "edge {:?} changed", cell.coord);
        }
        assert!(board.config().contains(cell.current_state));
    }
    assert_eq!(board.generation(), 200);
}
