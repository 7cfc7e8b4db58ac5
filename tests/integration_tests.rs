//! Integration tests for the game session and the frame loop

use blockfall::core::{Board, Controller, GameState, PendingTick, SimpleRng};
use blockfall::input::{map_key, should_quit};
use blockfall::term::{HudState, PlayfieldCanvas};
use blockfall::types::{GameAction, PieceKind, RunState, BOARD_HEIGHT, BOARD_WIDTH};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Fill rows `top..` except column 0, so nothing is ever swept.
fn fill_below(board: &mut Board, top: i32) {
    for y in top..board.height() as i32 {
        for x in 1..board.width() as i32 {
            board.set(x, y, Some(PieceKind::Z));
        }
    }
}

/// Settle an O at the top so every following spawn is blocked.
fn force_game_over(state: &mut GameState) {
    state.spawn(PieceKind::O);
    fill_below(state.board_mut(), 2);
    assert!(state.apply_action(GameAction::HardDrop));
    assert_eq!(state.run_state(), RunState::GameOver);
}

fn spawn_x(size: usize) -> i32 {
    (BOARD_WIDTH / 2) as i32 - (size / 2) as i32
}

fn canvas_filled(canvas: &PlayfieldCanvas) -> usize {
    (0..canvas.height())
        .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| canvas.get(x, y).is_some())
        .count()
}

#[test]
fn test_spawn_position_on_empty_grid() {
    let mut state = GameState::new(1);
    for kind in PieceKind::SPAWN_ORDER {
        state.spawn(kind);
        let player = state.player();
        assert_eq!(player.x, spawn_x(player.shape.size()), "{kind:?}");
        assert_eq!(player.y, 0);
        assert!(state.is_running());
    }
}

#[test]
fn test_forced_descent_lands_on_bottom_row() {
    for kind in PieceKind::SPAWN_ORDER {
        let mut state = GameState::new(9);
        state.spawn(kind);
        let spawned = state.pieces_spawned();

        let mut frames = 0;
        while state.pieces_spawned() == spawned {
            assert!(state.advance(1001));
            frames += 1;
            assert!(frames <= BOARD_HEIGHT, "{kind:?} never settled");
        }

        let bottom = state
            .board()
            .to_values()
            .iter()
            .rposition(|row| row.iter().any(|&v| v != 0));
        assert_eq!(bottom, Some(BOARD_HEIGHT - 1), "{kind:?}");
        assert_eq!(state.board().filled_count(), 4);
    }
}

#[test]
fn test_drop_needs_more_than_interval() {
    let mut state = GameState::new(4);
    assert!(!state.advance(600));
    assert!(!state.advance(400));
    assert_eq!(state.player().y, 0);
    assert!(state.advance(1));
    assert_eq!(state.player().y, 1);
    assert_eq!(state.drop_counter_ms(), 0);
}

#[test]
fn test_game_over_makes_commands_no_ops() {
    let mut state = GameState::new(21);
    force_game_over(&mut state);

    let grid = state.board().clone();
    let score = state.score();
    let player = *state.player();

    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::TogglePause,
    ] {
        assert!(!state.apply_action(action), "{action:?} accepted");
    }
    assert!(!state.advance(5_000));

    assert_eq!(state.board(), &grid);
    assert_eq!(state.score(), score);
    assert_eq!(state.player(), &player);
    assert_eq!(state.run_state(), RunState::GameOver);
}

#[test]
fn test_restart_from_game_over() {
    let mut state = GameState::new(21);
    force_game_over(&mut state);

    assert!(state.apply_action(GameAction::Restart));
    assert_eq!(state.run_state(), RunState::Running);
    assert_eq!(state.score(), 0);
    assert_eq!(state.board().filled_count(), 0);

    let player = state.player();
    assert_eq!(player.x, spawn_x(player.shape.size()));
    assert_eq!(player.y, 0);
    assert!(!state.collides());
}

#[test]
fn test_restart_is_ignored_while_running() {
    let mut state = GameState::new(5);
    state.apply_action(GameAction::HardDrop);
    let filled = state.board().filled_count();
    assert!(!state.apply_action(GameAction::Restart));
    assert_eq!(state.board().filled_count(), filled);
}

#[test]
fn test_active_piece_never_collides_while_running() {
    let actions = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
    ];

    for seed in 1..=5 {
        let mut state = GameState::new(seed);
        let mut picker = SimpleRng::new(seed.wrapping_mul(7919));

        for _ in 0..400 {
            if state.game_over() {
                assert!(state.apply_action(GameAction::Restart));
            }
            let action = actions[picker.next_range(actions.len() as u32) as usize];
            state.apply_action(action);
            if state.is_running() {
                assert!(!state.collides(), "seed {seed}: {action:?} left a collision");
            }
        }
    }
}

#[test]
fn test_four_row_clear_through_hard_drop() {
    let mut state = GameState::new(2);
    state.spawn(PieceKind::I);
    // Vertical I occupies column 5; leave that column open.
    for y in 16..20 {
        for x in (0..BOARD_WIDTH as i32).filter(|&x| x != 5) {
            state.board_mut().set(x, y, Some(PieceKind::J));
        }
    }

    assert!(state.apply_action(GameAction::HardDrop));
    assert_eq!(state.score(), 150);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_controller_drives_canvas_and_hud() {
    let mut controller = Controller::new(
        GameState::new(3),
        PendingTick::default(),
        HudState::default(),
    );
    let mut canvas = PlayfieldCanvas::new(BOARD_WIDTH, BOARD_HEIGHT);

    controller.start();
    assert!(controller.scheduler_mut().take());
    assert!(controller.on_frame(0, &mut canvas));
    assert_eq!(canvas_filled(&canvas), 4);
    assert!(controller.scheduler().is_pending());

    assert!(controller.handle(GameAction::TogglePause));
    assert!(controller.observer().pause_banner);
    assert!(controller.scheduler_mut().take());
    assert!(!controller.on_frame(100, &mut canvas));
    assert!(!controller.scheduler().is_pending());
    assert_eq!(canvas.frames(), 1);

    assert!(controller.handle(GameAction::TogglePause));
    assert!(!controller.observer().pause_banner);
    assert!(controller.scheduler().is_pending());
}

#[test]
fn test_controller_reports_score_and_game_over() {
    let mut controller = Controller::new(
        GameState::new(8),
        PendingTick::default(),
        HudState::default(),
    );
    controller.start();

    let state = controller.state_mut();
    state.spawn(PieceKind::I);
    for y in 16..20 {
        for x in (0..BOARD_WIDTH as i32).filter(|&x| x != 5) {
            state.board_mut().set(x, y, Some(PieceKind::T));
        }
    }
    assert!(controller.handle(GameAction::HardDrop));
    assert_eq!(controller.observer().score, 150);

    force_game_over(controller.state_mut());
    // Events raised directly on the state are delivered with the next command.
    assert!(!controller.handle(GameAction::MoveLeft));
    let hud = *controller.observer();
    assert!(hud.game_over_banner && hud.restart_banner);

    assert!(controller.handle(GameAction::Restart));
    let hud = *controller.observer();
    assert_eq!(hud.score, 0);
    assert!(!hud.game_over_banner && !hud.restart_banner);
}

#[test]
fn test_keys_reach_the_game() {
    let mut state = GameState::new(11);
    let before = state.player().x;

    let left = map_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
    assert_eq!(left, Some(GameAction::MoveLeft));
    assert!(state.apply_action(GameAction::MoveLeft));
    assert_eq!(state.player().x, before - 1);

    let space = map_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
    assert_eq!(space, Some(GameAction::HardDrop));

    assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert_eq!(map_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)), None);
}
