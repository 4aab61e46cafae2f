//! Non-blocking action polling on top of crossterm's event queue.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::trace;

use crate::map::{handle_key_event, is_key_press};
use crate::types::GameAction;

/// Wait at most `timeout` for one mapped key press.
///
/// Non-key events and unmapped keys are drained without extending the
/// deadline. Returns `Ok(None)` once the deadline passes.
pub fn poll_action(timeout: Duration) -> Result<Option<GameAction>> {
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            return Ok(None);
        }

        if let Event::Key(key) = event::read()? {
            if is_key_press(&key) {
                if let Some(action) = handle_key_event(key) {
                    trace!(action = action.as_str(), "key");
                    return Ok(Some(action));
                }
            }
        }

        if remaining.is_zero() {
            return Ok(None);
        }
    }
}

/// Block until any key is pressed.
pub fn wait_for_key() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if is_key_press(&key) {
                return Ok(());
            }
        }
    }
}
