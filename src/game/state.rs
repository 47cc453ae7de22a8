use crate::error::MoveError;

use super::{Board, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// Where the turn protocol currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingMove(Player),
    Win(Player),
    Draw,
}

/// An accepted move: where the piece landed and what it did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub player: Player,
    pub outcome: Option<GameOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Fresh game: empty grid, Player 1 to move, no outcome
    pub fn new_game() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::One,
            outcome: None,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn phase(&self) -> TurnPhase {
        match self.outcome {
            None => TurnPhase::AwaitingMove(self.current_player),
            Some(GameOutcome::Win(player)) => TurnPhase::Win(player),
            Some(GameOutcome::Draw) => TurnPhase::Draw,
        }
    }

    /// Columns the current player may drop into; empty once the game is over
    pub fn valid_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.valid_columns()
    }

    /// Check legality, place the piece, evaluate win then draw, and advance
    /// the turn. A rejected move leaves the state untouched.
    ///
    /// The turn only passes to the other player when the game continues; on a
    /// terminal move `current_player` stays with the player who made it.
    pub fn attempt_move(&mut self, col: usize) -> Result<Placement, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameAlreadyEnded);
        }

        let player = self.current_player;
        let row = self.board.drop_piece(col, player)?;

        // Win is checked first so a board-filling winner is never a draw
        self.outcome = if self.board.check_winner(row, col, player) {
            Some(GameOutcome::Win(player))
        } else if self.board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        };

        if self.outcome.is_none() {
            self.current_player = player.other();
        }

        Ok(Placement {
            row,
            col,
            player,
            outcome: self.outcome,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, COLS, ROWS};

    /// Column order that fills the whole board without four in a row.
    const DRAW_SEQUENCE: [usize; 42] = [
        0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, //
        2, 3, 2, 3, 2, 3, 3, 2, 3, 2, 3, 2, //
        4, 5, 4, 5, 4, 5, 5, 4, 5, 4, 5, 4, //
        6, 6, 6, 6, 6, 6,
    ];

    #[test]
    fn test_initial_state() {
        let state = GameState::new_game();
        assert_eq!(state.current_player(), Player::One);
        assert!(!state.is_terminal());
        assert_eq!(state.phase(), TurnPhase::AwaitingMove(Player::One));
        assert_eq!(state.valid_columns().len(), COLS);
    }

    #[test]
    fn test_attempt_move() {
        let mut state = GameState::new_game();
        let placement = state.attempt_move(3).unwrap();

        assert_eq!(
            placement,
            Placement {
                row: ROWS - 1,
                col: 3,
                player: Player::One,
                outcome: None,
            }
        );
        assert_eq!(state.current_player(), Player::Two);
        assert_eq!(state.board().get(5, 3), Cell::PlayerOne);
    }

    #[test]
    fn test_vertical_win() {
        let mut state = GameState::new_game();
        for turn in 0..3 {
            state.attempt_move(0).unwrap();
            state.attempt_move(1 + turn).unwrap();
        }
        let placement = state.attempt_move(0).unwrap();

        assert_eq!(placement.outcome, Some(GameOutcome::Win(Player::One)));
        assert_eq!(state.phase(), TurnPhase::Win(Player::One));
        // Turn does not advance past a terminal move
        assert_eq!(state.current_player(), Player::One);
        assert!(state.valid_columns().is_empty());
    }

    #[test]
    fn test_move_after_win_is_rejected() {
        let mut state = GameState::new_game();
        for col in 0..3 {
            state.attempt_move(col).unwrap();
            state.attempt_move(col).unwrap();
        }
        state.attempt_move(3).unwrap();
        assert!(state.is_terminal());

        let before = state;
        assert_eq!(state.attempt_move(4), Err(MoveError::GameAlreadyEnded));
        assert_eq!(state, before);
    }

    #[test]
    fn test_full_column_is_rejected_without_change() {
        let mut state = GameState::new_game();
        for _ in 0..ROWS {
            state.attempt_move(2).unwrap();
        }
        let before = state;

        assert_eq!(state.attempt_move(2), Err(MoveError::ColumnFull(2)));
        assert_eq!(state, before);
        assert_eq!(state.current_player(), Player::One);
    }

    #[test]
    fn test_invalid_column_is_rejected() {
        let mut state = GameState::new_game();
        assert_eq!(state.attempt_move(COLS), Err(MoveError::InvalidColumn(COLS)));
        assert_eq!(state, GameState::new_game());
    }

    #[test]
    fn test_draw() {
        let mut state = GameState::new_game();

        let (last, rest) = DRAW_SEQUENCE.split_last().unwrap();
        for &col in rest {
            let placement = state.attempt_move(col).unwrap();
            assert_eq!(placement.outcome, None, "unexpected end at column {col}");
        }

        let placement = state.attempt_move(*last).unwrap();
        assert_eq!(placement.outcome, Some(GameOutcome::Draw));
        assert_eq!(state.phase(), TurnPhase::Draw);
        assert!(state.board().is_full());
    }
}
