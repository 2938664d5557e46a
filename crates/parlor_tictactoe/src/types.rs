//! Core domain types for tic-tac-toe.

use crate::Position;
use serde::{Deserialize, Serialize};

/// Mark placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Player one's mark (moves first).
    X,
    /// Player two's mark.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Chat glyph for this mark.
    pub fn glyph(self) -> &'static str {
        match self {
            Mark::X => "\u{274c}",
            Mark::O => "\u{2b55}",
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order.
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Empty positions in board order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Renders the board as a 3x3 chat grid.
    ///
    /// Empty squares show their keycap number (1-9) so players know what to
    /// type; occupied squares show the mark glyph.
    pub fn render(&self) -> String {
        let rows: Vec<String> = self
            .squares
            .chunks(3)
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, square)| match square {
                        Square::Empty => keycap(row * 3 + col + 1),
                        Square::Occupied(mark) => mark.glyph().to_string(),
                    })
                    .collect()
            })
            .collect();
        rows.join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Keycap emoji for a single digit: the digit, a variation selector and the
/// combining enclosing keycap.
fn keycap(digit: usize) -> String {
    format!("{}\u{fe0f}\u{20e3}", digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_board_numbers_cells() {
        let board = Board::new();
        let expected = "1\u{fe0f}\u{20e3}2\u{fe0f}\u{20e3}3\u{fe0f}\u{20e3}\n\
                        4\u{fe0f}\u{20e3}5\u{fe0f}\u{20e3}6\u{fe0f}\u{20e3}\n\
                        7\u{fe0f}\u{20e3}8\u{fe0f}\u{20e3}9\u{fe0f}\u{20e3}";
        assert_eq!(board.render(), expected);
    }

    #[test]
    fn test_render_shows_marks() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Mark::X));
        board.set(Position::TopLeft, Square::Occupied(Mark::O));
        let rendered = board.render();
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("\u{2b55}"));
        assert!(rows[1].contains("\u{274c}"));
        assert!(!rows[1].contains('5'));
    }

    #[test]
    fn test_empty_positions_in_board_order() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Mark::X));
        let empty = board.empty_positions();
        assert_eq!(empty.len(), 8);
        assert_eq!(empty[0], Position::TopCenter);
    }
}
