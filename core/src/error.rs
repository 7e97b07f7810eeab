use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Board must have at least one cell")]
    EmptyBoard,
    #[error("Board must be square and at most 255 cells wide")]
    InvalidBoardShape,
    #[error("Board cells are inconsistent with the mine layout")]
    InconsistentCells,
    #[error("Prepared board does not match the requested size or mine count")]
    ConfigMismatch,
    #[error("Unknown difficulty, expected one of easy, medium or hard")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
