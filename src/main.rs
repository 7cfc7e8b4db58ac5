//! Terminal runner (default binary).
//!
//! Polls crossterm for keys with a timeout up to the next frame deadline, and
//! runs a frame whenever the controller has asked for one. The playfield is
//! drawn by the controller into a canvas that persists between frames; the
//! terminal view is recomposed from it and the HUD whenever either changed.

use std::fs::File;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use log::{error, info};

use blockfall::config::Config;
use blockfall::core::{Controller, GameState, PendingTick};
use blockfall::input::{map_key, should_quit};
use blockfall::term::{FrameBuffer, GameView, HudState, PlayfieldCanvas, TerminalRenderer, Viewport};
use blockfall::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Poll timeout while no frame is requested (paused or game over).
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(config.log_file.as_deref())?;

    let seed = config.resolved_seed();
    info!("starting with seed {seed}");

    let mut term = TerminalRenderer::default();
    term.enter()?;

    let result = run(&mut term, &config, seed);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        error!("failed to restore terminal: {err:#}");
    }
    result
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &Config, seed: u32) -> Result<()> {
    let mut controller = Controller::new(
        GameState::new(seed),
        PendingTick::default(),
        HudState::default(),
    );
    let mut canvas = PlayfieldCanvas::new(BOARD_WIDTH, BOARD_HEIGHT);
    controller.start();
    controller.render(&mut canvas);

    let view = GameView::new(config.cell_width, 1);
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(u64::from(config.frame_ms));
    let epoch = Instant::now();
    let mut next_frame = epoch;
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&canvas, controller.observer(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        let timeout = if controller.scheduler().is_pending() {
            next_frame.saturating_duration_since(Instant::now())
        } else {
            IDLE_POLL
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(
                            "quit requested in state {} with score {}",
                            controller.state().run_state().as_str(),
                            controller.state().score()
                        );
                        return Ok(());
                    }
                    if let Some(action) = map_key(key) {
                        let was_over = controller.state().game_over();
                        if controller.handle(action) {
                            dirty = true;
                        }
                        // No further frame will run; show the final board now.
                        if !was_over && controller.state().game_over() {
                            controller.render(&mut canvas);
                        }
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        if now >= next_frame && controller.scheduler_mut().take() {
            let now_ms = u64::try_from(now.duration_since(epoch).as_millis()).unwrap_or(u64::MAX);
            controller.on_frame(now_ms, &mut canvas);
            next_frame = now + frame;
            dirty = true;
        }
    }
}
