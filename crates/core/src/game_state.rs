//! Game state module - the single owned game session
//!
//! Ties together the board, the active piece, the RNG, the score, the drop
//! timer and the run state. All mutation of a session goes through this type.
//!
//! The `player_*` operations are the raw piece mechanics. [`GameState::apply_action`]
//! is the gate that only lets piece controls through while the session is running.

use arrayvec::ArrayVec;
use log::{debug, info, trace};

use crate::board::{Board, SweepOutcome};
use crate::pieces::{create_piece, Player};
use crate::rng::SimpleRng;
use crate::types::*;

/// Number of undrained events kept; a single action or frame produces at most three.
const EVENT_CAPACITY: usize = 8;

/// State changes observers care about, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece was merged into the grid and rows were swept; `score` is the new total.
    Merged { rows_cleared: u32, score: u32 },
    Paused,
    Resumed,
    /// A freshly spawned piece collided with the stack.
    GameOver,
    /// Grid and score were reset from game over.
    Restarted,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    player: Player,
    rng: SimpleRng,
    score: u32,
    run_state: RunState,
    drop_counter_ms: u32,
    pieces_spawned: u32,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
}

impl GameState {
    /// New session on a default 12x20 board; the first piece is spawned immediately.
    pub fn new(seed: u32) -> Self {
        Self::with_board(Board::default(), seed)
    }

    /// New session on the given board.
    pub fn with_board(board: Board, seed: u32) -> Self {
        let mut state = Self {
            board,
            player: Player::new(create_piece(PieceKind::T), 0, 0),
            rng: SimpleRng::new(seed),
            score: 0,
            run_state: RunState::Running,
            drop_counter_ms: 0,
            pieces_spawned: 0,
            events: ArrayVec::new(),
        };
        state.player_reset();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable grid access for scripted set-ups.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.run_state == RunState::GameOver
    }

    /// Milliseconds accumulated since the last descent.
    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    /// Number of pieces spawned this session (including the one in play).
    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Whether the active piece overlaps the stack or leaves the grid.
    pub fn collides(&self) -> bool {
        self.board.collides(&self.player)
    }

    /// Take the events produced since the last call.
    ///
    /// [`Controller`](crate::Controller) drains this after every command and
    /// frame. Sessions driven directly may never call it; the queue then keeps
    /// only the most recent events.
    pub fn take_events(&mut self) -> ArrayVec<GameEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.is_full() {
            let dropped = self.events.remove(0);
            trace!("event queue full, dropping oldest {dropped:?}");
        }
        self.events.push(event);
    }

    /// Spawn a random piece at the top centre.
    pub fn player_reset(&mut self) {
        let kind = self.rng.next_kind();
        self.spawn(kind);
    }

    /// Spawn a piece of the given kind at `y = 0`, horizontally centred.
    ///
    /// If it already collides the session is over; the piece stays where it
    /// spawned so the final frame shows it.
    pub fn spawn(&mut self, kind: PieceKind) {
        let shape = create_piece(kind);
        let x = (self.board.width() / 2) as i32 - (shape.size() / 2) as i32;
        self.player = Player::new(shape, x, 0);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        if self.collides() {
            info!(
                "spawn of {} blocked, game over with score {}",
                kind.as_str(),
                self.score
            );
            self.run_state = RunState::GameOver;
            self.emit(GameEvent::GameOver);
        }
    }

    /// Shift the piece horizontally; reverted if it would collide.
    pub fn player_move(&mut self, dir: i32) -> bool {
        self.player.x += dir;
        if self.collides() {
            self.player.x -= dir;
            return false;
        }
        true
    }

    /// Move down one row; on collision step back and settle the piece.
    ///
    /// The drop counter is reset either way.
    pub fn player_drop(&mut self) {
        self.player.y += 1;
        if self.collides() {
            self.player.y -= 1;
            self.settle();
        }
        self.drop_counter_ms = 0;
    }

    /// Drop straight down until collision, then settle.
    pub fn player_hard_drop(&mut self) {
        while !self.collides() {
            self.player.y += 1;
        }
        self.player.y -= 1;
        self.settle();
        self.drop_counter_ms = 0;
    }

    /// Rotate the piece, nudging it sideways to resolve collisions.
    ///
    /// Tries x offsets +1, -2, +3, -4, ... (cumulative) from the starting
    /// column. Once the next offset is larger than the shape side the rotation
    /// and position are rolled back and `false` is returned.
    pub fn player_rotate(&mut self, direction: i32) -> bool {
        let pos = self.player.x;
        let mut offset: i32 = 1;
        self.player.shape.rotate(direction);

        while self.collides() {
            self.player.x += offset;
            offset = -(offset + offset.signum());
            if offset > self.player.shape.size() as i32 {
                self.player.shape.rotate(-direction);
                self.player.x = pos;
                trace!("rotation {direction} rejected at x={pos}");
                return false;
            }
        }

        if self.player.x != pos {
            trace!("rotation {direction} kicked from x={pos} to x={}", self.player.x);
        }
        true
    }

    /// Clear full rows and add their points to the score.
    pub fn sweep(&mut self) -> SweepOutcome {
        let outcome = self.board.sweep();
        self.score = self.score.saturating_add(outcome.points);
        outcome
    }

    /// Merge, spawn the next piece, then sweep.
    ///
    /// The spawn check runs before the sweep, so a spawn can be blocked by a
    /// row that the same settle is about to clear.
    fn settle(&mut self) {
        self.board.merge(&self.player);
        self.player_reset();
        let outcome = self.sweep();
        debug!(
            "piece settled, {} row(s) cleared, score {}",
            outcome.rows_cleared, self.score
        );
        self.emit(GameEvent::Merged {
            rows_cleared: outcome.rows_cleared,
            score: self.score,
        });
    }

    /// Advance the drop timer by `elapsed_ms`; forces a descent once the
    /// counter exceeds [`DROP_INTERVAL_MS`]. Returns whether a descent happened.
    ///
    /// Does nothing unless running.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_running() {
            return false;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > DROP_INTERVAL_MS {
            self.player_drop();
            return true;
        }
        false
    }

    /// Running <-> Paused. Ignored once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.run_state {
            RunState::Running => {
                self.run_state = RunState::Paused;
                info!("paused");
                self.emit(GameEvent::Paused);
                true
            }
            RunState::Paused => {
                self.run_state = RunState::Running;
                info!("resumed");
                self.emit(GameEvent::Resumed);
                true
            }
            RunState::GameOver => false,
        }
    }

    /// Start over from game over: empty grid, zero score, fresh piece.
    ///
    /// Ignored in any other state.
    pub fn restart(&mut self) -> bool {
        if self.run_state != RunState::GameOver {
            return false;
        }

        self.board.clear();
        self.score = 0;
        self.drop_counter_ms = 0;
        self.pieces_spawned = 0;
        self.run_state = RunState::Running;
        info!("restarted");
        self.emit(GameEvent::Restarted);
        self.player_reset();
        true
    }

    /// Apply a player command. Returns whether it was accepted.
    ///
    /// Piece controls are no-ops unless running; pause toggling is refused in
    /// game over and restart is only accepted there.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if action.is_piece_control() && !self.is_running() {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.player_move(-1),
            GameAction::MoveRight => self.player_move(1),
            GameAction::SoftDrop => {
                self.player_drop();
                true
            }
            GameAction::HardDrop => {
                self.player_hard_drop();
                true
            }
            GameAction::RotateCw => self.player_rotate(1),
            GameAction::RotateCcw => self.player_rotate(-1),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Restart => self.restart(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
