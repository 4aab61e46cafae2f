//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the closed [`GameAction`] set and polls the
//! terminal without ever blocking past a caller-supplied deadline. The game
//! core never sees a key event.
//!
//! [`GameAction`]: crate::types::GameAction

pub mod map;
pub mod poll;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_key_press};
pub use poll::{poll_action, wait_for_key};
