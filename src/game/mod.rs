//! Core Tic-Tac-Toe game logic: board and rules, marks, and the round
//! state machine.

mod board;
mod player;
mod session;

pub use board::{Board, Cell, Outcome, WinLine, CELLS, SIZE, WIN_LINES};
pub use player::Mark;
pub use session::{CpuTurn, MoveApplied, RoundEnded, Session};

#[cfg(test)]
pub(crate) use board::board_from_str;
