//! # CPU Tic-Tac-Toe
//!
//! Tic-Tac-Toe against a minimax CPU with an easy and a hard tier, played
//! in a terminal UI built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board and rules, marks, round state machine
//! - [`ai`] — Agent trait, minimax search, random and difficulty-aware CPU
//! - [`score`] — Score tally and its persisted record
//! - [`ui`] — Terminal UI: board, score line, keyboard controls
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod score;
pub mod ui;
