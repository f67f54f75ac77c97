use thiserror::Error;

/// Board construction and move validation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must have at least one row and one column and two cells, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("board has {cells} cells, at most {max} are supported")]
    TooManyCells { cells: usize, max: usize },
    #[error("expected {expected} tiles, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("tiles are not a permutation of 0..{cells}")]
    NotAPermutation { cells: usize },
    #[error("invalid tile token: {0:?}")]
    InvalidTile(String),
    #[error("illegal step {from} -> {to}")]
    IllegalStep { from: usize, to: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("current board is {current_rows}x{current_columns} but goal is {idle_rows}x{idle_columns}")]
    GeometryMismatch {
        current_rows: usize,
        current_columns: usize,
        idle_rows: usize,
        idle_columns: usize,
    },
    #[error(transparent)]
    Board(#[from] BoardError),
}
