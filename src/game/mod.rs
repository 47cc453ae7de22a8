//! Core Connect Four game logic: board representation, player types, the
//! turn state machine and the session score tally.

mod board;
mod player;
mod score;
mod state;

pub use board::{Board, Cell, Simulation, CENTER_COL, COLS, ROWS};
pub use player::Player;
pub use score::ScoreTally;
pub use state::{GameOutcome, GameState, Placement, TurnPhase};
