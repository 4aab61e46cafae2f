//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a color tag.
//! Storage is a flat row-major array so clearing rows is a handful of
//! `copy_within` calls and never allocates.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::shapes::ShapeMatrix;
use crate::types::{Cell, ColorId, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by a single clear, bottom to top
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Outcome of writing a piece into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockResult {
    /// Every cell was written
    Locked,
    /// Part of the piece sits above row 0; nothing was written
    Overflow,
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y); None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y); false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        self.cells[start..start + BOARD_WIDTH as usize]
            .iter()
            .all(|cell| cell.is_some())
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        self.cells[start..start + BOARD_WIDTH as usize]
            .iter()
            .all(|cell| cell.is_none())
    }

    /// Board coordinates of `matrix` anchored at (x, y), widened so any
    /// anchor in `i8` range is representable
    fn placed(matrix: &ShapeMatrix, x: i8, y: i8) -> impl Iterator<Item = (i16, i16)> + '_ {
        matrix
            .minos()
            .map(move |(dx, dy)| (x as i16 + dx as i16, y as i16 + dy as i16))
    }

    /// Would `matrix` anchored at (x, y) collide?
    ///
    /// Cells left/right of the board or at/below the bottom edge collide.
    /// Cells above row 0 only collide with the side walls, so a piece may
    /// hang over the top until it locks.
    pub fn is_blocked(&self, matrix: &ShapeMatrix, x: i8, y: i8) -> bool {
        Self::placed(matrix, x, y).any(|(bx, by)| {
            if bx < 0 || bx >= BOARD_WIDTH as i16 || by >= BOARD_HEIGHT as i16 {
                return true;
            }
            by >= 0 && self.is_occupied(bx as i8, by as i8)
        })
    }

    /// Write `matrix` anchored at (x, y) into the board with `color`.
    ///
    /// The caller guarantees the position is not blocked. If any cell lies
    /// above row 0 the lock is an overflow and the board is left untouched.
    pub fn lock(&mut self, matrix: &ShapeMatrix, x: i8, y: i8, color: ColorId) -> LockResult {
        if Self::placed(matrix, x, y).any(|(_, by)| by < 0) {
            return LockResult::Overflow;
        }

        for (bx, by) in Self::placed(matrix, x, y) {
            if let (Ok(bx), Ok(by)) = (i8::try_from(bx), i8::try_from(by)) {
                self.set(bx, by, Some(color));
            }
        }

        LockResult::Locked
    }

    /// Remove every full row at once and pad the top with empty rows.
    ///
    /// Returns the removed row indices (pre-clear coordinates), bottom to top.
    /// Surviving rows keep their relative order.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Compact from the bottom up: every surviving row slides to write_y.
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);

        cleared
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Encode into a `u8` grid (0 = empty, otherwise the color id)
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * width + x].map_or(0, ColorId::as_u8);
            }
        }
    }

    /// Build a board from rows of text, `#` or a color digit marks a filled cell.
    ///
    /// Rows are aligned to the bottom of the board; missing rows on top are
    /// empty. Intended for tests and benches.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = (BOARD_HEIGHT as usize).saturating_sub(rows.len());
        for (i, row) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                let cell = match ch {
                    '#' => Some(ColorId::White),
                    d => d
                        .to_digit(10)
                        .and_then(|v| ColorId::from_u8(v as u8))
                        .filter(|c| *c != ColorId::Ghost),
                };
                board.set(x as i8, y, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::spawn_matrix;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_is_blocked_allows_rows_above_top() {
        let board = Board::new();
        let i = spawn_matrix(PieceKind::I).rotate_clockwise();
        // Vertical I hanging three rows above the board.
        assert!(!board.is_blocked(&i, 0, -3));
        // But not past the side walls.
        assert!(board.is_blocked(&i, -1, -3));
    }

    #[test]
    fn test_is_blocked_near_i8_limits() {
        let board = Board::new();
        let s = spawn_matrix(PieceKind::S);
        assert!(board.is_blocked(&s, i8::MAX, 0));
        assert!(board.is_blocked(&s, 0, i8::MAX));
        assert!(board.is_blocked(&s, i8::MIN, 0));
        // Far above the board only the walls matter.
        assert!(!board.is_blocked(&s, 0, i8::MIN));
    }

    #[test]
    fn test_lock_out_of_range_anchor_writes_nothing() {
        let mut board = Board::new();
        let o = spawn_matrix(PieceKind::O);
        assert_eq!(board.lock(&o, i8::MAX, i8::MAX, ColorId::Yellow), LockResult::Locked);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_lock_overflow_writes_nothing() {
        let mut board = Board::new();
        let o = spawn_matrix(PieceKind::O);
        assert_eq!(board.lock(&o, 4, -1, ColorId::Yellow), LockResult::Overflow);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_clear_full_rows_keeps_order() {
        let mut board = Board::from_rows(&[
            "1.........",
            "##########",
            "..2.......",
            "##########",
        ]);
        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert_eq!(board.get(0, 18), Some(Some(ColorId::Cyan)));
        assert_eq!(board.get(2, 19), Some(Some(ColorId::Yellow)));
        assert!(board.is_row_empty(17));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = Board::new();
        board.set(3, 19, Some(ColorId::Red));
        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[19][3], 5);
        assert_eq!(grid[19][4], 0);
    }
}
