//! Shapes module - tetromino catalog and matrix rotation
//!
//! Every piece is a boolean matrix stored in a fixed 4x4 buffer. Only the
//! top-left `rows x cols` region is meaningful; rotation swaps the two
//! dimensions without any heap allocation.

use crate::types::{ColorId, PieceKind, MAX_PIECE_SIZE};

/// A piece layout inside a fixed 4x4 buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
}

impl ShapeMatrix {
    /// Build a matrix from a row pattern, `#` marks an occupied cell.
    ///
    /// Panics if the pattern is empty, ragged, or larger than 4x4. Catalog
    /// patterns are constants, so this only fires on a programming error.
    pub const fn from_pattern<const R: usize>(pattern: [&str; R]) -> Self {
        assert!(R > 0 && R <= MAX_PIECE_SIZE, "pattern height out of range");
        let cols = pattern[0].len();
        assert!(cols > 0 && cols <= MAX_PIECE_SIZE, "pattern width out of range");

        let mut cells = [[false; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        let mut r = 0;
        while r < R {
            let bytes = pattern[r].as_bytes();
            assert!(bytes.len() == cols, "ragged pattern");
            let mut c = 0;
            while c < cols {
                cells[r][c] = bytes[c] == b'#';
                c += 1;
            }
            r += 1;
        }

        Self {
            rows: R as u8,
            cols: cols as u8,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Is the cell at (col, row) occupied? Out-of-region cells are empty.
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Offsets (dx, dy) of every occupied cell, row-major from the top-left
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |row| {
            (0..self.cols as usize)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// Number of occupied cells
    pub fn mino_count(&self) -> usize {
        self.minos().count()
    }

    /// Rotate 90 degrees clockwise (reverse rows, then transpose).
    ///
    /// An `R x C` matrix becomes `C x R`.
    pub fn rotate_clockwise(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[false; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (r, src_row) in self.cells.iter().enumerate().take(rows) {
            for (c, &filled) in src_row.iter().enumerate().take(cols) {
                cells[c][rows - 1 - r] = filled;
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

/// Immutable catalog entry: spawn layout plus display color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDefinition {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub color: ColorId,
}

static CATALOG: [ShapeDefinition; 7] = [
    ShapeDefinition {
        kind: PieceKind::I,
        matrix: ShapeMatrix::from_pattern(["####"]),
        color: ColorId::Cyan,
    },
    ShapeDefinition {
        kind: PieceKind::O,
        matrix: ShapeMatrix::from_pattern(["##", "##"]),
        color: ColorId::Yellow,
    },
    ShapeDefinition {
        kind: PieceKind::T,
        matrix: ShapeMatrix::from_pattern(["###", ".#."]),
        color: ColorId::Purple,
    },
    ShapeDefinition {
        kind: PieceKind::S,
        matrix: ShapeMatrix::from_pattern([".##", "##."]),
        color: ColorId::Green,
    },
    ShapeDefinition {
        kind: PieceKind::Z,
        matrix: ShapeMatrix::from_pattern(["##.", ".##"]),
        color: ColorId::Red,
    },
    ShapeDefinition {
        kind: PieceKind::J,
        matrix: ShapeMatrix::from_pattern(["#..", "###"]),
        color: ColorId::Blue,
    },
    ShapeDefinition {
        kind: PieceKind::L,
        matrix: ShapeMatrix::from_pattern(["..#", "###"]),
        color: ColorId::White,
    },
];

/// Look up the catalog entry for a piece kind
pub fn shape_of(kind: PieceKind) -> &'static ShapeDefinition {
    let idx = match kind {
        PieceKind::I => 0,
        PieceKind::O => 1,
        PieceKind::T => 2,
        PieceKind::S => 3,
        PieceKind::Z => 4,
        PieceKind::J => 5,
        PieceKind::L => 6,
    };
    &CATALOG[idx]
}

/// Spawn-orientation matrix for a piece kind
pub fn spawn_matrix(kind: PieceKind) -> ShapeMatrix {
    shape_of(kind).matrix
}
