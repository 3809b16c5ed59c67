//! Board tests - generation, movement probing, and rearrange

use tui_crush::core::{find_matches, Board, SimpleRng};
use tui_crush::types::{Cell, Coord, Difficulty, GameMode, BOARD_SIZE};

fn striped_colors() -> [[u8; BOARD_SIZE]; BOARD_SIZE] {
    let mut colors = [[0u8; BOARD_SIZE]; BOARD_SIZE];
    for (row, row_colors) in colors.iter_mut().enumerate() {
        for (col, c) in row_colors.iter_mut().enumerate() {
            *c = ((col + 2 * row) % 7) as u8;
        }
    }
    colors
}

#[test]
fn test_generated_boards_are_stable_and_movable() {
    for seed in [1, 42, 12345] {
        for mode in [GameMode::Classic, GameMode::Time, GameMode::Endless] {
            let mut rng = SimpleRng::new(seed);
            let board = Board::generate(&mut rng, 1, Difficulty::Normal, mode);

            assert!(
                find_matches(&board).cells.is_empty(),
                "seed {} mode {:?} generated a pre-matched board",
                seed,
                mode
            );
            assert!(
                board.has_valid_move(),
                "seed {} mode {:?} generated a dead board",
                seed,
                mode
            );
        }
    }
}

#[test]
fn test_generated_board_is_fully_populated() {
    let mut rng = SimpleRng::new(7);
    let board = Board::generate(&mut rng, 1, Difficulty::Normal, GameMode::Classic);

    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let cell = board.get(row, col).unwrap();
            assert!(!cell.is_empty(), "empty cell at ({}, {})", row, col);
        }
    }
}

#[test]
fn test_special_challenge_boards_seed_special_tiles() {
    let mut rng = SimpleRng::new(99);
    let board = Board::generate(&mut rng, 1, Difficulty::Normal, GameMode::SpecialChallenge);

    let specials = (0..BOARD_SIZE)
        .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
        .filter(|&(row, col)| board.get(row, col).unwrap().special.is_some())
        .count();
    assert!(specials > 0, "special challenge board seeded no specials");
}

#[test]
fn test_striped_board_has_no_valid_move() {
    let board = Board::from_colors(&striped_colors());
    assert!(find_matches(&board).cells.is_empty());
    assert!(!board.has_valid_move());
    assert_eq!(board.find_first_move(), None);
}

#[test]
fn test_find_first_move_locates_the_only_swap() {
    let mut colors = striped_colors();
    // Only swapping (0,2) and (0,3) completes a run of three.
    colors[0][1] = 0;
    colors[0][3] = 0;
    let board = Board::from_colors(&colors);

    assert_eq!(
        board.find_first_move(),
        Some((Coord::new(0, 2), Coord::new(0, 3)))
    );
}

#[test]
fn test_swap_exchanges_cells() {
    let mut board = Board::from_colors(&striped_colors());
    let a = Coord::new(0, 0);
    let b = Coord::new(0, 1);
    let before_a = board.get(0, 0).unwrap();
    let before_b = board.get(0, 1).unwrap();

    board.swap(a, b);
    assert_eq!(board.get(0, 0).unwrap(), before_b);
    assert_eq!(board.get(0, 1).unwrap(), before_a);
}

#[test]
fn test_rearrange_preserves_the_tile_multiset() {
    let mut rng = SimpleRng::new(5);
    let mut board = Board::generate(&mut rng, 1, Difficulty::Normal, GameMode::Classic);

    let mut before: Vec<Cell> = board.cells().to_vec();
    board.rearrange(&mut rng);
    let mut after: Vec<Cell> = board.cells().to_vec();

    let key = |c: &Cell| (c.color, c.special.map(|s| s as u8), c.state as u8, c.frozen_layers);
    before.sort_by_key(key);
    after.sort_by_key(key);
    assert_eq!(before, after);

    assert!(find_matches(&board).cells.is_empty());
    assert!(board.has_valid_move());
}
