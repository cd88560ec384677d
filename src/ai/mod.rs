mod agent;
mod cpu;
pub mod minimax;
mod random;

pub use agent::Agent;
pub use cpu::{choose_move, CpuChoice, CpuPlayer, Difficulty, DEFAULT_EASY_RANDOM_CHANCE};
pub use minimax::{Evaluation, MinimaxAgent};
pub use random::RandomAgent;
