use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::game::{Board, GameState, Player, CENTER_COL};

use super::agent::Agent;

/// First column in `columns` (in the given order) where a piece of `player`
/// would complete four in a row. The board is left unchanged.
pub fn find_winning_move(board: &mut Board, player: Player, columns: &[usize]) -> Option<usize> {
    columns
        .iter()
        .copied()
        .find(|&col| board.simulate(col, player).is_some_and(|sim| sim.is_win()))
}

/// Pick a column for `ai` by strict priority: win now, block `opponent`,
/// take the center, otherwise any valid column at random.
///
/// Looks exactly one ply ahead. Every hypothetical piece is reverted before
/// this returns. `None` only when `valid_columns` is empty.
pub fn select_move<R: Rng + ?Sized>(
    board: &mut Board,
    ai: Player,
    opponent: Player,
    valid_columns: &[usize],
    rng: &mut R,
) -> Option<usize> {
    if let Some(col) = find_winning_move(board, ai, valid_columns) {
        debug!(col, "heuristic: winning move");
        return Some(col);
    }

    if let Some(col) = find_winning_move(board, opponent, valid_columns) {
        debug!(col, "heuristic: blocking opponent");
        return Some(col);
    }

    if valid_columns.contains(&CENTER_COL) {
        debug!(col = CENTER_COL, "heuristic: center");
        return Some(CENTER_COL);
    }

    if valid_columns.is_empty() {
        return None;
    }
    let col = valid_columns[rng.random_range(0..valid_columns.len())];
    debug!(col, "heuristic: random fallback");
    Some(col)
}

/// Computer opponent driven by [`select_move`].
pub struct HeuristicAgent {
    rng: StdRng,
}

impl HeuristicAgent {
    pub fn new() -> Self {
        HeuristicAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Agent whose random fallback replays identically for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        HeuristicAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for HeuristicAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for HeuristicAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        let ai = state.current_player();
        // Simulate on a copy; the caller only lends a read-only view
        let mut board = *state.board();
        select_move(
            &mut board,
            ai,
            ai.other(),
            &state.valid_columns(),
            &mut self.rng,
        )
    }

    fn name(&self) -> &str {
        "Heuristic"
    }
}
