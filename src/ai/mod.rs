//! Computer opponent: the `Agent` trait and the one-ply priority heuristic.

mod agent;
mod heuristic;

pub use agent::Agent;
pub use heuristic::{find_winning_move, select_move, HeuristicAgent};
