//! Terminal runner (default binary).
//!
//! Owns the frame loop: render, poll input for whatever is left of the frame,
//! apply it, then advance gravity by the wall-clock time that passed.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};

use blockfall::core::{GameSnapshot, GameState};
use blockfall::highscore::HighScoreStore;
use blockfall::input::{poll_action, wait_for_key};
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, FRAME_MS};
use blockfall::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let store = HighScoreStore::new(&args.high_score_file);
    let prior = store.load_or_default();
    let seed = args.resolved_seed();
    info!(seed, tick_rate_ms = args.tick_rate_ms, prior, "starting");

    let mut game = GameState::new(seed).with_high_score(prior);
    game.start();

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut game, args.tick_rate_ms);
    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        warn!(error = %e, "failed to restore terminal");
    }

    match store.save(game.score(), prior) {
        Ok(best) => info!(score = game.score(), best, "session ended"),
        Err(e) => warn!(path = %store.path().display(), error = %e, "failed to save high score"),
    }
    result
}

fn run(term: &mut TerminalRenderer, game: &mut GameState, tick_rate_ms: u32) -> Result<()> {
    let view = GameView::default();
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut clock = Instant::now();

    loop {
        let frame_start = Instant::now();

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if game.game_over() {
            wait_for_key()?;
            return Ok(());
        }

        let budget = frame.saturating_sub(frame_start.elapsed());
        match poll_action(budget)? {
            Some(GameAction::Quit) => {
                info!(score = game.score(), "quit");
                return Ok(());
            }
            Some(action) => {
                game.apply_action(action);
            }
            None => {}
        }

        // Advance by whole milliseconds and keep the remainder for next frame.
        let elapsed_ms = clock.elapsed().as_millis().min(u32::MAX as u128) as u32;
        clock += Duration::from_millis(elapsed_ms as u64);
        game.tick(elapsed_ms, tick_rate_ms);

        if let Some(event) = game.take_last_event() {
            debug!(
                lines = event.lines_cleared,
                gained = event.score_gained,
                level = event.level,
                overflow = event.overflow,
                "piece locked"
            );
        }
    }
}
