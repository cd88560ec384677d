use serde::{Deserialize, Serialize};

use super::board::Cell;

/// One of the two symbols a player places. X always opens a fresh board
/// unless the round is started with an explicit override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the other mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert mark to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }

    /// Get mark symbol for display
    pub fn symbol(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }

    #[test]
    fn test_to_cell() {
        assert_eq!(Mark::X.to_cell(), Cell::X);
        assert_eq!(Mark::O.to_cell(), Cell::O);
    }

    #[test]
    fn test_serde_uses_symbol() {
        assert_eq!(serde_json::to_string(&Mark::O).unwrap(), "\"O\"");
        let mark: Mark = serde_json::from_str("\"X\"").unwrap();
        assert_eq!(mark, Mark::X);
    }
}
