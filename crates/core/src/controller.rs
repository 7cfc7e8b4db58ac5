//! Game loop controller
//!
//! Drives a [`GameState`] from two kinds of input: discrete player commands
//! and frame ticks. Everything the controller needs from the outside world is
//! injected:
//!
//! - [`Scheduler`]: asked for the next frame tick. The controller stops asking
//!   while paused or after game over, and asks again on resume/restart.
//! - [`GameObserver`]: score display and pause / game-over / restart banners.
//! - [`Surface`]: the raster the grid and active piece are drawn onto.
//!
//! All calls run to completion on the caller's thread.

use log::debug;

use crate::game_state::{GameEvent, GameState};
use crate::types::{GameAction, PieceKind};

/// Source of frame ticks.
pub trait Scheduler {
    /// Ask for `on_frame` to be called once more.
    fn request_tick(&mut self);
}

/// Display collaborator notified on state changes.
pub trait GameObserver {
    fn score_changed(&mut self, score: u32);
    fn pause_changed(&mut self, paused: bool);
    fn game_over(&mut self);
    fn restarted(&mut self);
}

/// Raster drawing collaborator, in board cell units.
pub trait Surface {
    fn fill_background(&mut self);
    fn fill_cell(&mut self, x: i32, y: i32, kind: PieceKind);
}

/// Scheduler for polling loops: remembers that a tick was requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingTick {
    pending: bool,
}

impl PendingTick {
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending request.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl Scheduler for PendingTick {
    fn request_tick(&mut self) {
        self.pending = true;
    }
}

/// Draw the settled grid, then the active piece on top.
pub fn draw<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.fill_background();

    let board = state.board();
    for (y, row) in board.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if let Some(kind) = cell {
                surface.fill_cell(x as i32, y as i32, *kind);
            }
        }
    }

    for (x, y, kind) in state.player().cells() {
        surface.fill_cell(x, y, kind);
    }
}

/// Owns the session and wires it to its collaborators.
#[derive(Debug)]
pub struct Controller<S, O> {
    state: GameState,
    scheduler: S,
    observer: O,
    /// Timestamp of the previous frame; `None` right after (re)entering the loop.
    last_frame_ms: Option<u64>,
}

impl<S: Scheduler, O: GameObserver> Controller<S, O> {
    pub fn new(state: GameState, scheduler: S, observer: O) -> Self {
        Self {
            state,
            scheduler,
            observer,
            last_frame_ms: None,
        }
    }

    /// Publish the initial score and enter the frame loop.
    pub fn start(&mut self) {
        self.observer.score_changed(self.state.score());
        self.dispatch_events();
        if self.state.is_running() {
            self.scheduler.request_tick();
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Apply a player command and notify collaborators. Returns whether it was accepted.
    pub fn handle(&mut self, action: GameAction) -> bool {
        let accepted = self.state.apply_action(action);
        if accepted {
            debug!("action {} accepted", action.as_str());
        }
        self.dispatch_events();
        accepted
    }

    /// One frame at wall-clock time `now_ms`.
    ///
    /// Accumulates the time since the previous frame into the drop counter,
    /// draws, and requests the next tick. Does nothing unless running; returns
    /// whether the frame ran.
    pub fn on_frame<F: Surface + ?Sized>(&mut self, now_ms: u64, surface: &mut F) -> bool {
        if !self.state.is_running() {
            return false;
        }

        let elapsed = self
            .last_frame_ms
            .map_or(0, |last| now_ms.saturating_sub(last));
        self.last_frame_ms = Some(now_ms);

        self.state
            .advance(u32::try_from(elapsed).unwrap_or(u32::MAX));
        self.dispatch_events();
        draw(&self.state, surface);

        if self.state.is_running() {
            self.scheduler.request_tick();
        }
        true
    }

    /// Draw the current state without advancing time.
    pub fn render<F: Surface + ?Sized>(&self, surface: &mut F) {
        draw(&self.state, surface);
    }

    fn dispatch_events(&mut self) {
        for event in self.state.take_events() {
            match event {
                GameEvent::Merged { score, .. } => self.observer.score_changed(score),
                GameEvent::Paused => self.observer.pause_changed(true),
                GameEvent::Resumed => {
                    self.observer.pause_changed(false);
                    self.resume_loop();
                }
                GameEvent::GameOver => self.observer.game_over(),
                GameEvent::Restarted => {
                    self.observer.score_changed(0);
                    self.observer.restarted();
                    self.resume_loop();
                }
            }
        }
    }

    /// Re-enter the frame loop; the first frame after this sees zero elapsed time.
    fn resume_loop(&mut self) {
        self.last_frame_ms = None;
        self.scheduler.request_tick();
    }
}
