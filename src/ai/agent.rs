use crate::game::GameState;

/// Interface for automated players.
pub trait Agent {
    /// Select a column for the player to move in `state`.
    ///
    /// Returns `None` only when `state` offers no legal column.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
