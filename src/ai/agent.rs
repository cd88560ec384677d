use crate::game::{Board, Mark};

/// Universal interface for move-choosing engines.
pub trait Agent {
    /// Select a cell for `mark` to play on `board`.
    ///
    /// Only defined while the board has at least one empty cell and no
    /// winner; implementations assert on that.
    fn select_move(&mut self, board: &Board, mark: Mark) -> usize;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
