use tracing::debug;

use crate::game::{Board, Mark, Outcome};

use super::agent::Agent;

/// Terminal score of a won board, from the searching side's perspective.
pub const WIN_SCORE: i32 = 10;

/// Result of a search: the chosen cell (none on a terminal board) and its
/// depth-adjusted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub index: Option<usize>,
    pub score: i32,
}

/// Full-depth minimax scored from `cpu`'s point of view.
///
/// Each ply pulls a non-zero child score one step toward zero, so faster
/// wins and slower losses score higher for the side they favour. Ties keep
/// the first move in ascending index order.
pub fn evaluate(board: &Board, to_move: Mark, cpu: Mark) -> Evaluation {
    match board.outcome() {
        Outcome::Win { mark, .. } => {
            let score = if mark == cpu { WIN_SCORE } else { -WIN_SCORE };
            return Evaluation { index: None, score };
        }
        Outcome::Draw => return Evaluation { index: None, score: 0 },
        Outcome::Ongoing => {}
    }

    let moves = board.legal_moves();
    let maximizing = to_move == cpu;
    let mut best = Evaluation {
        index: Some(moves[0]),
        score: if maximizing { i32::MIN } else { i32::MAX },
    };

    for idx in moves {
        let Ok(next) = board.with_move(idx, to_move) else {
            continue;
        };
        let result = evaluate(&next, to_move.opponent(), cpu);
        let adjusted = result.score - result.score.signum();

        let better = if maximizing {
            adjusted > best.score
        } else {
            adjusted < best.score
        };
        if better {
            best = Evaluation {
                index: Some(idx),
                score: adjusted,
            };
        }
    }

    best
}

/// The optimal move for `mark`. Panics on a full or decided board.
pub fn best_move(board: &Board, mark: Mark) -> usize {
    assert!(
        board.outcome() == Outcome::Ongoing,
        "No legal moves available: board {board} is already decided"
    );

    let eval = evaluate(board, mark, mark);
    debug!(%board, %mark, score = eval.score, index = ?eval.index, "minimax");
    match eval.index {
        Some(idx) => idx,
        None => unreachable!("an ongoing board always has a move"),
    }
}

/// Perfect-play agent: the hard tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxAgent;

impl MinimaxAgent {
    pub fn new() -> Self {
        MinimaxAgent
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, board: &Board, mark: Mark) -> usize {
        best_move(board, mark)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
