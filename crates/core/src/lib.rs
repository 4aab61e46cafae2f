//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the falling-block game and nothing else: no
//! terminal, no files, no clocks. Front ends drive it with discrete actions
//! and elapsed milliseconds and read back a [`GameSnapshot`].
//!
//! - **Deterministic**: the same seed produces the same game
//! - **Portable**: terminal, GUI, or headless harness
//! - **Allocation-free hot paths**: fixed 4x4 shape buffers and a flat board
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven tetromino layouts, their colors, and clockwise rotation
//! - [`board`]: 10x20 grid with collision testing, locking and line clearing
//! - [`piece`]: the falling piece and its ghost row
//! - [`rng`]: uniform random piece kinds behind the [`PieceSource`] trait
//! - [`game_state`]: the engine that sequences spawn, move, lock, clear and score
//! - [`snapshot`]: read-only state for renderers
//!
//! # Rules
//!
//! - Pieces spawn centered on the top row; a blocked spawn ends the game
//! - Rotation is clockwise only and is rejected outright on collision (no kicks)
//! - Each cleared row scores `SCORE_PER_LINE * level`
//! - `level = lines / LEVEL_UP_LINES + 1`
//! - Gravity fires once the elapsed time exceeds `tick_rate / level`
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.board().filled_count(), 4);
//! assert!(!game.game_over());
//! ```

pub mod board;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, ClearedRows, LockResult};
pub use game_state::{GameState, LockEvent, Phase};
pub use piece::ActivePiece;
pub use rng::{PieceSequence, PieceSource, SimpleRng, UniformRng};
pub use shapes::{shape_of, spawn_matrix, ShapeDefinition, ShapeMatrix};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
