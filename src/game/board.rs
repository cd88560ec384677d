use std::fmt;

use super::player::Mark;
use crate::error::MoveError;

pub const SIZE: usize = 3;
pub const CELLS: usize = SIZE * SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// The mark occupying this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
        }
    }
}

/// Three board indices that make a three-in-a-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinLine(pub [usize; 3]);

impl WinLine {
    pub fn indices(&self) -> [usize; 3] {
        self.0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

/// Rows, then columns, then the two diagonals. Scan order decides which
/// line is reported when a hypothetical board holds more than one.
pub const WIN_LINES: [WinLine; 8] = [
    WinLine([0, 1, 2]),
    WinLine([3, 4, 5]),
    WinLine([6, 7, 8]),
    WinLine([0, 3, 6]),
    WinLine([1, 4, 7]),
    WinLine([2, 5, 8]),
    WinLine([0, 4, 8]),
    WinLine([2, 4, 6]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Win { mark: Mark, line: WinLine },
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    pub fn winning_line(&self) -> Option<WinLine> {
        match self {
            Outcome::Win { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// 3x3 board, row-major: index = row * 3 + col.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Build a board from raw cells. No legality check is made, so any
    /// hypothetical position can be represented.
    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        Board { cells }
    }

    /// Get the cell at an index. Panics if the index is out of range.
    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        index < CELLS && self.cells[index] == Cell::Empty
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count()
    }

    /// All empty indices in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..CELLS).filter(|&i| self.cells[i] == Cell::Empty).collect()
    }

    /// Place a mark in an empty cell.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), MoveError> {
        if index >= CELLS {
            return Err(MoveError::OutOfRange(index));
        }
        if self.cells[index] != Cell::Empty {
            return Err(MoveError::Occupied(index));
        }
        self.cells[index] = mark.to_cell();
        Ok(())
    }

    /// Like [`Board::place`], but leaves `self` untouched and returns the
    /// resulting board.
    pub fn with_move(&self, index: usize, mark: Mark) -> Result<Board, MoveError> {
        let mut next = *self;
        next.place(index, mark)?;
        Ok(next)
    }

    /// First completed win-line in scan order, else draw on a full board,
    /// else ongoing.
    pub fn outcome(&self) -> Outcome {
        for line in WIN_LINES {
            let [a, b, c] = line.0;
            if let Some(mark) = self.cells[a].mark() {
                if self.cells[b] == self.cells[a] && self.cells[c] == self.cells[a] {
                    return Outcome::Win { mark, line };
                }
            }
        }

        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    pub fn row_of(index: usize) -> usize {
        index / SIZE
    }

    pub fn col_of(index: usize) -> usize {
        index % SIZE
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            let line: String = (0..SIZE)
                .map(|col| match self.cells[row * SIZE + col] {
                    Cell::Empty => '.',
                    Cell::X => 'X',
                    Cell::O => 'O',
                })
                .collect();
            f.write_str(&line)?;
            if row + 1 < SIZE {
                f.write_str("/")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn board_from_str(s: &str) -> Board {
    let cells: Vec<Cell> = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '/')
        .map(|c| match c {
            'X' => Cell::X,
            'O' => Cell::O,
            _ => Cell::Empty,
        })
        .collect();
    Board::from_cells(cells.try_into().expect("nine cells"))
}
