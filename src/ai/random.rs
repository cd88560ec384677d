use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::{Board, Mark};

use super::agent::Agent;

/// An agent that selects uniformly at random from legal moves.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform pick over `moves`. Panics if `moves` is empty.
pub(crate) fn pick_uniform<R: Rng>(rng: &mut R, moves: &[usize]) -> usize {
    assert!(!moves.is_empty(), "No legal moves available");
    moves[rng.random_range(0..moves.len())]
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: &Board, _mark: Mark) -> usize {
        pick_uniform(&mut self.rng, &board.legal_moves())
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Outcome;

    #[test]
    fn test_random_agent_selects_legal_move() {
        let mut agent = RandomAgent::with_seed(7);
        let mut board = Board::new();
        board.place(4, Mark::X).unwrap();
        board.place(0, Mark::O).unwrap();
        let legal = board.legal_moves();

        for _ in 0..100 {
            let idx = agent.select_move(&board, Mark::X);
            assert!(legal.contains(&idx), "Move {} is not legal", idx);
        }
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let mut agent = RandomAgent::new();
        let mut board = Board::new();
        let mut mark = Mark::X;

        while board.outcome() == Outcome::Ongoing {
            let idx = agent.select_move(&board, mark);
            board.place(idx, mark).unwrap();
            mark = mark.opponent();
        }

        assert!(board.outcome().is_terminal());
    }

    #[test]
    #[should_panic(expected = "No legal moves available")]
    fn test_random_agent_panics_on_full_board() {
        let board = crate::game::board_from_str("XOX/XOO/OXX");
        RandomAgent::with_seed(1).select_move(&board, Mark::X);
    }

    #[test]
    fn test_random_agent_name() {
        assert_eq!(RandomAgent::new().name(), "Random");
    }
}
