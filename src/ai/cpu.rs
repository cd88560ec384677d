use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::game::{Board, Mark};

use super::agent::Agent;
use super::minimax;
use super::random::pick_uniform;

/// Chance per CPU turn that the easy tier plays a random legal move.
pub const DEFAULT_EASY_RANDOM_CHANCE: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Hard,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}' (expected 'easy' or 'hard')")),
        }
    }
}

/// A CPU decision, with whether it came from the easy-tier coin flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuChoice {
    pub index: usize,
    pub random: bool,
}

/// The CPU opponent: perfect play on hard, perfect play with occasional
/// uniform blunders on easy.
pub struct CpuPlayer {
    difficulty: Difficulty,
    easy_random_chance: f64,
    rng: StdRng,
}

impl CpuPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        CpuPlayer {
            difficulty,
            easy_random_chance: DEFAULT_EASY_RANDOM_CHANCE,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        CpuPlayer {
            difficulty,
            easy_random_chance: DEFAULT_EASY_RANDOM_CHANCE,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Override the easy-tier blunder chance, clamped to [0, 1].
    pub fn with_random_chance(mut self, chance: f64) -> Self {
        self.easy_random_chance = chance.clamp(0.0, 1.0);
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn easy_random_chance(&self) -> f64 {
        self.easy_random_chance
    }

    /// Pick a move for `mark`. The blunder roll happens independently on
    /// every call. Panics on a full or decided board.
    pub fn choose(&mut self, board: &Board, mark: Mark) -> CpuChoice {
        let choice = choose_move(
            board,
            mark,
            self.difficulty,
            self.easy_random_chance,
            &mut self.rng,
        );
        debug!(
            difficulty = self.difficulty.name(),
            index = choice.index,
            random = choice.random,
            "cpu move"
        );
        choice
    }
}

/// Difficulty-aware move selection over an explicit random source.
pub fn choose_move<R: Rng>(
    board: &Board,
    mark: Mark,
    difficulty: Difficulty,
    easy_random_chance: f64,
    rng: &mut R,
) -> CpuChoice {
    if difficulty == Difficulty::Easy && rng.random::<f64>() < easy_random_chance {
        let moves = board.legal_moves();
        return CpuChoice {
            index: pick_uniform(rng, &moves),
            random: true,
        };
    }

    CpuChoice {
        index: minimax::best_move(board, mark),
        random: false,
    }
}

impl Agent for CpuPlayer {
    fn select_move(&mut self, board: &Board, mark: Mark) -> usize {
        self.choose(board, mark).index
    }

    fn name(&self) -> &str {
        match self.difficulty {
            Difficulty::Easy => "CPU (easy)",
            Difficulty::Hard => "CPU (hard)",
        }
    }
}
