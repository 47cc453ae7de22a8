use crate::error::MoveError;

use super::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Column the computer prefers when nothing is urgent.
pub const CENTER_COL: usize = COLS / 2;

/// Axis directions checked for four in a row: horizontal, vertical,
/// diagonal down-right and diagonal down-left. Each axis is walked both ways.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

const WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full (out-of-range columns count as full)
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Row a piece dropped into `col` would land on, scanning up from the bottom.
    pub fn find_available_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Write `player`'s piece at `(row, col)` without any legality checks.
    ///
    /// `row` must come from [`Board::find_available_row`] for the same column.
    pub fn place_piece(&mut self, row: usize, col: usize, player: Player) {
        self.cells[row][col] = player.to_cell();
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self
            .find_available_row(col)
            .ok_or(MoveError::ColumnFull(col))?;
        self.place_piece(row, col, player);
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Cell::Empty))
    }

    /// Columns that can still take a piece, in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Whether a piece of `player` at `(row, col)` completes four in a row.
    ///
    /// Only the four lines through `(row, col)` are inspected, so this has to
    /// run right after every placement. The cell itself always counts for
    /// `player`, which lets callers test a hypothetical drop.
    pub fn check_winner(&self, row: usize, col: usize, player: Player) -> bool {
        let cell = player.to_cell();
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.run_length(row, col, cell, dr, dc) >= WIN_LENGTH)
    }

    /// Place `player`'s piece in `col` for as long as the returned guard lives.
    ///
    /// Returns `None` when the column cannot take a piece.
    pub fn simulate(&mut self, col: usize, player: Player) -> Option<Simulation<'_>> {
        let row = self.find_available_row(col)?;
        self.place_piece(row, col, player);
        Some(Simulation {
            board: self,
            row,
            col,
            player,
        })
    }

    fn run_length(&self, row: usize, col: usize, cell: Cell, dr: isize, dc: isize) -> usize {
        1 + self.count_side(row, col, cell, dr, dc) + self.count_side(row, col, cell, -dr, -dc)
    }

    fn count_side(&self, row: usize, col: usize, cell: Cell, dr: isize, dc: isize) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while self.cell_at(r, c) == Some(cell) {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .copied()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A piece placed on a board for evaluation only.
///
/// The cell is reset to [`Cell::Empty`] when the guard is dropped, on every
/// exit path including unwinding.
#[derive(Debug)]
pub struct Simulation<'a> {
    board: &'a mut Board,
    row: usize,
    col: usize,
    player: Player,
}

impl Simulation<'_> {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn board(&self) -> &Board {
        &*self.board
    }

    /// Whether the simulated piece completes four in a row.
    pub fn is_win(&self) -> bool {
        self.board.check_winner(self.row, self.col, self.player)
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board.cells[self.row][self.col] = Cell::Empty;
    }
}
