//! Game state module - the engine that owns the board and the falling piece
//!
//! Ties together the board, shape catalog, active piece and piece source.
//! Every player action and the gravity tick go through [`GameState`]; front
//! ends only ever read a [`GameSnapshot`].
//!
//! Lifecycle: `Spawning -> Falling -> Locking -> Clearing -> Spawning`, with
//! `GameOver` as the terminal phase. All transitions finish inside a single
//! call, so between calls the phase is either `Falling` or `GameOver`.

use tracing::{debug, info};

use crate::board::{Board, LockResult};
use crate::piece::ActivePiece;
use crate::rng::{PieceSource, UniformRng};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, LEVEL_UP_LINES, SCORE_PER_LINE};

/// Engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    Clearing,
    GameOver,
}

/// What happened when a piece was locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_gained: u32,
    /// Level after the lock
    pub level: u32,
    /// The piece locked above the visible board and ended the game
    pub overflow: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = UniformRng> {
    board: Board,
    active: Option<ActivePiece>,
    source: S,
    phase: Phase,
    started: bool,
    score: u32,
    level: u32,
    lines: u32,
    /// Best score loaded from the previous session
    high_score: u32,
    gravity_timer_ms: u32,
    last_event: Option<LockEvent>,
}

impl GameState<UniformRng> {
    /// Create a new game drawing uniform random pieces from `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_source(UniformRng::new(seed))
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create a new game drawing pieces from `source`
    pub fn with_source(source: S) -> Self {
        Self {
            board: Board::new(),
            active: None,
            source,
            phase: Phase::Spawning,
            started: false,
            score: 0,
            level: 1,
            lines: 0,
            high_score: 0,
            gravity_timer_ms: 0,
            last_event: None,
        }
    }

    /// Carry the previous session's best score
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    /// Start from a prepared board instead of an empty one
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Best of the stored high score and the current score
    pub fn high_score(&self) -> u32 {
        self.high_score.max(self.score)
    }

    /// High score as loaded, before this session
    pub fn prior_high_score(&self) -> u32 {
        self.high_score
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Gravity interval at the current level
    pub fn fall_interval_ms(&self, tick_rate_ms: u32) -> u32 {
        tick_rate_ms / self.level.max(1)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.active.map(|p| p.ghost_y);
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.high_score = self.high_score();
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn the next piece centered on the top row.
    ///
    /// If it would overlap the stack the game ends and the board is left
    /// as it was.
    pub fn spawn(&mut self) -> bool {
        if self.game_over() {
            return false;
        }
        self.phase = Phase::Spawning;

        let kind = self.source.next_kind();
        let mut piece = ActivePiece::spawn(kind, self.board.width());

        if piece.is_blocked(&self.board) {
            self.active = None;
            self.end_game();
            return false;
        }

        piece.refresh_ghost(&self.board);
        debug!(kind = kind.as_str(), x = piece.x, ghost_y = piece.ghost_y, "spawned piece");
        self.active = Some(piece);
        self.phase = Phase::Falling;
        true
    }

    /// Try to move the active piece; a blocked move changes nothing
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let Some(mut moved) = active.shifted(dx, dy) else {
            return false;
        };
        if moved.is_blocked(&self.board) {
            return false;
        }

        moved.refresh_ghost(&self.board);
        self.active = Some(moved);
        true
    }

    /// Rotate clockwise in place; no wall kicks
    pub fn try_rotate(&mut self) -> bool {
        if self.game_over() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let mut rotated = active.rotated();
        if rotated.is_blocked(&self.board) {
            return false;
        }

        rotated.refresh_ghost(&self.board);
        self.active = Some(rotated);
        true
    }

    /// Drop the active piece as far as it goes and lock it
    pub fn hard_drop(&mut self) -> Option<LockEvent> {
        if self.game_over() || self.active.is_none() {
            return None;
        }
        while self.try_move(0, 1) {}
        self.lock_and_advance()
    }

    /// Lock the active piece, clear rows, update score and level, spawn the next piece
    pub fn lock_and_advance(&mut self) -> Option<LockEvent> {
        if self.game_over() {
            return None;
        }
        let active = self.active.take()?;
        self.phase = Phase::Locking;

        if self.board.lock(&active.matrix, active.x, active.y, active.color()) == LockResult::Overflow {
            let event = LockEvent {
                lines_cleared: 0,
                score_gained: 0,
                level: self.level,
                overflow: true,
            };
            self.last_event = Some(event);
            self.end_game();
            return Some(event);
        }

        self.phase = Phase::Clearing;
        let cleared = self.board.clear_full_rows();
        let lines_cleared = cleared.len() as u32;

        let score_gained = lines_cleared * SCORE_PER_LINE * self.level;
        self.score += score_gained;
        self.lines += lines_cleared;
        self.level = self.lines / LEVEL_UP_LINES + 1;

        if lines_cleared > 0 {
            debug!(rows = ?cleared.as_slice(), score = self.score, level = self.level, "cleared rows");
        }

        let event = LockEvent {
            lines_cleared,
            score_gained,
            level: self.level,
            overflow: false,
        };
        self.last_event = Some(event);

        self.spawn();
        Some(event)
    }

    /// Advance gravity by `elapsed_ms`.
    ///
    /// Once the accumulated time exceeds `tick_rate_ms / level` the piece
    /// falls one row, or locks if it cannot. Returns whether gravity fired.
    pub fn tick(&mut self, elapsed_ms: u32, tick_rate_ms: u32) -> bool {
        if self.game_over() || self.active.is_none() {
            return false;
        }

        self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(elapsed_ms);
        if self.gravity_timer_ms <= self.fall_interval_ms(tick_rate_ms) {
            return false;
        }
        self.gravity_timer_ms = 0;

        if !self.try_move(0, 1) {
            self.lock_and_advance();
        }
        true
    }

    /// Apply a player action; `Quit` belongs to the driving loop and is ignored
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Quit => false,
        }
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        info!(score = self.score, lines = self.lines, level = self.level, "game over");
    }
}

impl Default for GameState<UniformRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PieceSequence;
    use crate::types::{ColorId, PieceKind};

    fn scripted(kinds: &[PieceKind]) -> GameState<PieceSequence> {
        let mut state = GameState::with_source(PieceSequence::new(kinds.to_vec()));
        state.start();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.started());
        assert!(!state.game_over());
        assert_eq!(state.phase(), Phase::Spawning);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert!(state.active().is_none());
    }

    #[test]
    fn test_game_start() {
        let mut state = GameState::new(12345);
        state.start();
        assert!(state.started());
        assert!(state.active().is_some());
        assert_eq!(state.phase(), Phase::Falling);

        // Starting twice does not respawn.
        let first = state.active();
        state.start();
        assert_eq!(state.active(), first);
    }

    #[test]
    fn test_try_move_collision() {
        let mut state = scripted(&[PieceKind::O]);
        // O spawns at x=4; four steps left reach the wall at x=0.
        for _ in 0..4 {
            assert!(state.try_move(-1, 0));
        }
        assert_eq!(state.active().unwrap().x, 0);
        assert!(!state.try_move(-1, 0));
        assert_eq!(state.active().unwrap().x, 0);
    }

    #[test]
    fn test_try_move_huge_offset_rejected() {
        let mut state = scripted(&[PieceKind::O]);
        for _ in 0..10 {
            assert!(state.try_move(0, 1));
        }
        let before = state.active();
        assert!(!state.try_move(0, 120));
        assert!(!state.try_move(i8::MAX, 0));
        assert_eq!(state.active(), before);
    }

    #[test]
    fn test_move_recomputes_ghost() {
        let board = Board::from_rows(&["##........", "##........"]);
        let mut state = GameState::with_source(PieceSequence::repeat(PieceKind::O)).with_board(board);
        state.start();
        assert_eq!(state.active().unwrap().ghost_y, 18);

        for _ in 0..4 {
            state.try_move(-1, 0);
        }
        assert_eq!(state.active().unwrap().ghost_y, 16);
    }

    #[test]
    fn test_try_rotate_swaps_orientation() {
        let mut state = scripted(&[PieceKind::I]);
        assert!(state.try_rotate());
        assert_eq!(state.active().unwrap().matrix.rows(), 4);

        while state.try_move(-1, 0) {}
        assert_eq!(state.active().unwrap().x, 0);
        while state.try_move(0, 1) {}
        assert_eq!(state.active().unwrap().y, 16);

        // Back to horizontal on row 16, columns 0..3.
        assert!(state.try_rotate());
        assert_eq!(state.active().unwrap().matrix.rows(), 1);
        assert_eq!(state.active().unwrap().ghost_y, 19);
    }

    #[test]
    fn test_rotate_blocked_keeps_shape() {
        let board = Board::from_rows(&[
            "..........",
            "....#.....",
            "..........",
            "..........",
        ]);
        let mut state = GameState::with_source(PieceSequence::repeat(PieceKind::I)).with_board(board);
        state.start();

        // Horizontal I on row 15, columns 4..7.
        assert!(state.try_move(0, 15));
        assert!(state.try_move(1, 0));
        let before = state.active().unwrap();

        // Vertical would cover column 4, rows 15..18, hitting (4, 17).
        assert!(!state.try_rotate());
        assert_eq!(state.active().unwrap(), before);
    }

    #[test]
    fn test_hard_drop_locks_and_spawns() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]);
        let event = state.hard_drop().unwrap();
        assert_eq!(event.lines_cleared, 0);
        assert!(!event.overflow);
        assert_eq!(state.board().get(4, 19), Some(Some(ColorId::Yellow)));
        assert_eq!(state.board().get(5, 18), Some(Some(ColorId::Yellow)));
        assert_eq!(state.active().unwrap().kind, PieceKind::T);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_lock_piece_clears_lines() {
        // Bottom row missing columns 4 and 5; an O fills them and clears one row.
        let board = Board::from_rows(&["####..####"]);
        let mut state = GameState::with_source(PieceSequence::repeat(PieceKind::O)).with_board(board);
        state.start();
        let event = state.hard_drop().unwrap();

        assert_eq!(event.lines_cleared, 1);
        assert_eq!(event.score_gained, SCORE_PER_LINE);
        assert_eq!(state.score(), 100);
        assert_eq!(state.lines(), 1);
        assert_eq!(state.level(), 1);
        // The O's top half slid down into the bottom row.
        assert!(state.board().is_occupied(4, 19));
        assert!(state.board().is_occupied(5, 19));
        assert!(!state.board().is_occupied(0, 19));
    }

    #[test]
    fn test_score_scales_with_level() {
        let board = Board::from_rows(&["####..####", "####..####"]);
        let mut state = GameState::with_source(PieceSequence::repeat(PieceKind::O)).with_board(board);
        state.level = 3;
        state.lines = 20;
        state.start();
        let event = state.hard_drop().unwrap();
        assert_eq!(event.lines_cleared, 2);
        assert_eq!(event.score_gained, 2 * SCORE_PER_LINE * 3);
        assert_eq!(state.lines(), 22);
        assert_eq!(state.level(), 3);
    }

    #[test]
    fn test_level_progression() {
        let board = Board::from_rows(&["####..####"]);
        let mut state = GameState::with_source(PieceSequence::repeat(PieceKind::O)).with_board(board);
        state.lines = 9;
        state.start();
        let event = state.hard_drop().unwrap();
        assert_eq!(event.score_gained, 100);
        assert_eq!(state.lines(), 10);
        assert_eq!(state.level(), 2);
        assert_eq!(event.level, 2);
    }

    #[test]
    fn test_spawn_blocked_is_game_over() {
        let mut board = Board::new();
        board.set(4, 0, Some(ColorId::Red));
        let before = board.clone();
        let mut state = GameState::with_source(PieceSequence::repeat(PieceKind::O)).with_board(board);
        state.start();

        assert!(state.game_over());
        assert!(state.active().is_none());
        assert_eq!(state.board(), &before);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut board = Board::new();
        board.set(4, 0, Some(ColorId::Red));
        let mut state = GameState::with_source(PieceSequence::repeat(PieceKind::O)).with_board(board);
        state.start();
        assert!(state.game_over());

        assert!(!state.spawn());
        assert!(!state.try_move(0, 1));
        assert!(!state.try_rotate());
        assert!(state.hard_drop().is_none());
        assert!(state.lock_and_advance().is_none());
        assert!(!state.tick(10_000, 500));
        assert_eq!(state.phase(), Phase::GameOver);
    }

    #[test]
    fn test_overflow_lock_ends_game() {
        let mut state = scripted(&[PieceKind::I]);
        // Nudge the piece above the board; only reachable by direct placement.
        let mut piece = state.active().unwrap();
        piece.y = -1;
        state.active = Some(piece);

        let event = state.lock_and_advance().unwrap();
        assert!(event.overflow);
        assert!(state.game_over());
        assert_eq!(state.board().filled_count(), 0);
    }

    #[test]
    fn test_tick_gravity() {
        let mut state = scripted(&[PieceKind::T]);
        let y0 = state.active().unwrap().y;

        // 500ms at level 1: exactly 500 does not exceed the interval.
        assert!(!state.tick(500, 500));
        assert_eq!(state.active().unwrap().y, y0);
        assert!(state.tick(1, 500));
        assert_eq!(state.active().unwrap().y, y0 + 1);
    }

    #[test]
    fn test_tick_faster_at_higher_level() {
        let mut state = scripted(&[PieceKind::T]);
        state.level = 5;
        assert_eq!(state.fall_interval_ms(500), 100);
        assert!(!state.tick(100, 500));
        assert!(state.tick(1, 500));
    }

    #[test]
    fn test_tick_locks_when_grounded() {
        let mut state = scripted(&[PieceKind::O, PieceKind::I]);
        while state.try_move(0, 1) {}
        assert!(state.tick(501, 500));
        assert_eq!(state.active().unwrap().kind, PieceKind::I);
        assert_eq!(state.board().filled_count(), 4);
        assert_eq!(state.take_last_event().map(|e| e.lines_cleared), Some(0));
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_tick_no_active_piece() {
        let mut state = GameState::new(1);
        assert!(!state.tick(10_000, 500));
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut state = scripted(&[PieceKind::T]);
        let x = state.active().unwrap().x;
        assert!(state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active().unwrap().x, x - 1);
        assert!(state.apply_action(GameAction::MoveRight));
        assert_eq!(state.active().unwrap().x, x);
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.active().unwrap().y, 1);
        assert!(state.apply_action(GameAction::Rotate));
        assert_eq!(state.active().unwrap().matrix.rows(), 3);
        assert!(!state.apply_action(GameAction::Quit));
        assert!(state.apply_action(GameAction::HardDrop));
        assert_eq!(state.board().filled_count(), 4);
    }

    #[test]
    fn test_high_score_tracks_current_score() {
        let board = Board::from_rows(&["####..####"]);
        let mut state = GameState::with_source(PieceSequence::repeat(PieceKind::O))
            .with_board(board)
            .with_high_score(50);
        state.start();
        assert_eq!(state.high_score(), 50);
        state.hard_drop();
        assert_eq!(state.high_score(), 100);
        assert_eq!(state.prior_high_score(), 50);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let state = scripted(&[PieceKind::L]);
        let snap = state.snapshot();
        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::L);
        assert_eq!(active.color, ColorId::White);
        assert_eq!(snap.ghost_y, Some(18));
        assert_eq!(snap.level, 1);
        assert!(!snap.game_over);
    }
}
