//! Shared types module - rule constants and plain data enums
//!
//! Everything here is pure data with no external dependencies, so the engine,
//! the terminal front end and the persistence layer can all agree on the same
//! vocabulary without depending on each other.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Rules
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SCORE_PER_LINE` | 100 | Points per cleared row, multiplied by level |
//! | `LEVEL_UP_LINES` | 10 | Cleared rows needed per level |
//! | `DEFAULT_TICK_RATE_MS` | 500 | Base gravity interval at level 1 |
//! | `FRAME_MS` | 16 | Front-end frame budget (~60 FPS) |
//!
//! The gravity interval at a given level is `tick_rate / level`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{ColorId, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color(), ColorId::Purple);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Points awarded per cleared row at level 1
pub const SCORE_PER_LINE: u32 = 100;

/// Cleared rows required to advance one level
pub const LEVEL_UP_LINES: u32 = 10;

/// Base gravity interval in milliseconds (divided by the current level)
pub const DEFAULT_TICK_RATE_MS: u32 = 500;

/// Frame budget for the driving loop in milliseconds
pub const FRAME_MS: u32 = 16;

/// Largest bounding box of any piece, in cells per side
pub const MAX_PIECE_SIZE: usize = 4;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from its letter (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Display letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Color tag assigned to this kind
    pub fn color(&self) -> ColorId {
        match self {
            PieceKind::I => ColorId::Cyan,
            PieceKind::O => ColorId::Yellow,
            PieceKind::T => ColorId::Purple,
            PieceKind::S => ColorId::Green,
            PieceKind::Z => ColorId::Red,
            PieceKind::J => ColorId::Blue,
            PieceKind::L => ColorId::White,
        }
    }
}

/// Color tag stored in occupied cells.
///
/// Discriminants match the `u8` encoding used by snapshots, where 0 is empty.
/// `Ghost` is only used by renderers for the landing preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorId {
    Cyan = 1,
    Yellow = 2,
    Purple = 3,
    Green = 4,
    Red = 5,
    Blue = 6,
    White = 7,
    Ghost = 8,
}

impl ColorId {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a snapshot byte. 0 and unknown values are empty.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(ColorId::Cyan),
            2 => Some(ColorId::Yellow),
            3 => Some(ColorId::Purple),
            4 => Some(ColorId::Green),
            5 => Some(ColorId::Red),
            6 => Some(ColorId::Blue),
            7 => Some(ColorId::White),
            8 => Some(ColorId::Ghost),
            _ => None,
        }
    }
}

/// Cell on the board (None = empty, Some = occupied with a color)
pub type Cell = Option<ColorId>;

/// Player actions accepted by the front end.
///
/// `Quit` is consumed by the driving loop; the engine ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Quit,
}

impl GameAction {
    /// Parse action from its camelCase token
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Quit => "quit",
        }
    }
}
