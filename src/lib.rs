//! # Connect Four
//!
//! A two-player Connect Four game with a local human-vs-human mode and a
//! human-vs-computer mode driven by a one-ply priority heuristic. Ships a
//! terminal UI built with Ratatui and a line-oriented headless mode.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, turn state machine, scores
//! - [`ai`]: Agent trait and the win/block/center/random heuristic
//! - [`session`]: Turn ownership, score keeping and event emission
//! - [`events`]: Game events and observers for renderers
//! - [`ui`]: Terminal UI and headless text front end
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod session;
pub mod ui;
