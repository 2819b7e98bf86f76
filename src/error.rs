use std::path::PathBuf;

use crate::game::Player;

/// Errors from board queries and move application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfRange { row: usize, col: usize },

    #[error("column {0} is not a valid column index")]
    IllegalColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Errors from the move evaluator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("it is {current}'s turn, not {player}'s")]
    WrongTurn { player: Player, current: Player },

    #[error("no legal move: the board is full")]
    NoLegalMove,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
