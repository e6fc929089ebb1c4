use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, at most {max} fit while keeping the first click clear")]
    TooManyMines { max: CellCount },
    #[error("Board must have at least one row and one column")]
    InvalidBoardSize,
    #[error("Unknown difficulty {0:?}, expected one of: easy, medium, hard")]
    UnknownDifficulty(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
