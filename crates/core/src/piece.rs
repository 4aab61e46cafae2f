//! The falling piece: its current matrix, anchor and landing row.

use crate::board::Board;
use crate::shapes::{shape_of, ShapeMatrix};
use crate::types::{ColorId, PieceKind};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Layout in the current rotation
    pub matrix: ShapeMatrix,
    /// Column of the matrix's top-left corner
    pub x: i8,
    /// Row of the matrix's top-left corner
    pub y: i8,
    /// Row the piece would rest on if dropped straight down
    pub ghost_y: i8,
}

impl ActivePiece {
    /// Place `kind` at the top row, horizontally centered on a board of `board_width`.
    ///
    /// The ghost row is left at `y`; callers refresh it against a board.
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let matrix = shape_of(kind).matrix;
        let x = (board_width / 2) as i8 - (matrix.cols() / 2) as i8;
        Self {
            kind,
            matrix,
            x,
            y: 0,
            ghost_y: 0,
        }
    }

    pub fn color(&self) -> ColorId {
        shape_of(self.kind).color
    }

    pub fn is_blocked(&self, board: &Board) -> bool {
        board.is_blocked(&self.matrix, self.x, self.y)
    }

    /// Lowest row at or below `y` where the piece still fits
    pub fn drop_row(&self, board: &Board) -> i8 {
        let mut y = self.y;
        while let Some(next) = y.checked_add(1) {
            if board.is_blocked(&self.matrix, self.x, next) {
                break;
            }
            y = next;
        }
        y
    }

    pub fn refresh_ghost(&mut self, board: &Board) {
        self.ghost_y = self.drop_row(board);
    }

    /// Copy translated by (dx, dy); `None` if the anchor leaves `i8` range
    pub fn shifted(&self, dx: i8, dy: i8) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            ..*self
        })
    }

    /// Copy rotated clockwise about the same anchor
    pub fn rotated(&self) -> Self {
        Self {
            matrix: self.matrix.rotate_clockwise(),
            ..*self
        }
    }

    /// Board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .minos()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
