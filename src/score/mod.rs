//! Score tally and its on-disk record.

mod store;
mod tally;

pub use store::{ScoreStore, ScoreStoreConfig, SCORE_KEY};
pub use tally::Score;
