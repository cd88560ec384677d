//! Terminal UI: the board, turn and score lines, and keyboard controls.

mod app;
pub mod game_view;

pub use app::{key_to_index, App};
