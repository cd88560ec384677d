use std::path::PathBuf;

use crate::game::Mark;

/// Reasons a move is refused. A refused move never changes the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell {0} is out of range (expected 0-8)")]
    OutOfRange(usize),

    #[error("cell {0} is already occupied")]
    Occupied(usize),

    #[error("it is not {0}'s turn")]
    NotYourTurn(Mark),

    #[error("the round is over")]
    RoundOver,
}

/// Errors that can occur while reading or writing the score record.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("failed to read score from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed score record in {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        assert_eq!(
            MoveError::Occupied(4).to_string(),
            "cell 4 is already occupied"
        );
        assert_eq!(
            MoveError::NotYourTurn(Mark::O).to_string(),
            "it is not O's turn"
        );
    }

    #[test]
    fn test_score_error_display() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ScoreError::Malformed {
            path: PathBuf::from("tictactoe-score.json"),
            source,
        };
        assert!(err
            .to_string()
            .starts_with("malformed score record in tictactoe-score.json"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.cpu_delay_ms must be <= 5000".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.cpu_delay_ms must be <= 5000"
        );
    }
}
