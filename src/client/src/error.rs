use formation::FormationError;
use neural::NeuralError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid value {value:?} for {name}")]
    Config { name: &'static str, value: String },

    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot resolve server address {0}")]
    Resolve(String),

    #[error("player {index}: no init reply within {timeout_ms} ms")]
    InitTimeout { index: u8, timeout_ms: u64 },

    #[error("server refused player {index}: {reason}")]
    Rejected { index: u8, reason: String },

    #[error(transparent)]
    Formation(#[from] FormationError),

    #[error(transparent)]
    Policy(#[from] NeuralError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty message")]
    Empty,

    #[error("unbalanced parentheses")]
    Unbalanced,

    #[error("trailing data after message")]
    Trailing,

    #[error("{message}: missing {field}")]
    Missing {
        message: &'static str,
        field: &'static str,
    },

    #[error("{message}: invalid {field} {value:?}")]
    Invalid {
        message: &'static str,
        field: &'static str,
        value: String,
    },
}
