//! Terminal match-3 runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout).

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_crush::core::GameSession;
use tui_crush::input::{handle_key_event, should_quit};
use tui_crush::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use tui_crush::types::{
    Coord, Difficulty, GameAction, GameMode, GamePhase, BOARD_SIZE, TICK_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunConfig {
    mode: GameMode,
    difficulty: Difficulty,
    seed: Option<u32>,
}

fn parse_run_args(args: &[String]) -> Result<Option<RunConfig>> {
    let mut config = RunConfig {
        mode: GameMode::Classic,
        difficulty: Difficulty::Normal,
        seed: None,
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --mode"))?;
                config.mode = GameMode::from_str(v)
                    .ok_or_else(|| anyhow!("unknown mode: {}", v))?;
            }
            "--difficulty" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --difficulty"))?;
                config.difficulty = Difficulty::from_str(v)
                    .ok_or_else(|| anyhow!("unknown difficulty: {}", v))?;
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--help" | "-h" => {
                return Ok(None);
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Some(config))
}

fn print_usage() {
    println!("tui-crush [--mode MODE] [--difficulty DIFF] [--seed N]");
    println!();
    println!("  MODE: classic, time, endless, puzzle, chain-storm,");
    println!("        special-challenge, gravity-flip");
    println!("  DIFF: easy, normal, hard");
}

fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_run_args(&args)? {
        Some(c) => c,
        None => {
            print_usage();
            return Ok(());
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: RunConfig) -> Result<()> {
    let seed = config.seed.unwrap_or_else(wall_clock_seed);
    let mut session = GameSession::new(config.mode, config.difficulty, seed);
    session.start();

    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut cursor = Coord::new(BOARD_SIZE / 2, BOARD_SIZE / 2);
    let mut hint: Option<(Coord, Coord)> = None;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&session.snapshot(), cursor, hint, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply_action(&mut session, &mut cursor, &mut hint, action);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
            // Events drive no audio/telemetry here; drain so they don't pile up.
            session.take_events();
        }
    }
}

fn apply_action(
    session: &mut GameSession,
    cursor: &mut Coord,
    hint: &mut Option<(Coord, Coord)>,
    action: GameAction,
) {
    match action {
        GameAction::CursorUp => cursor.row = cursor.row.saturating_sub(1),
        GameAction::CursorDown => cursor.row = (cursor.row + 1).min(BOARD_SIZE - 1),
        GameAction::CursorLeft => cursor.col = cursor.col.saturating_sub(1),
        GameAction::CursorRight => cursor.col = (cursor.col + 1).min(BOARD_SIZE - 1),
        GameAction::Select => {
            if session.phase() == GamePhase::LevelUp {
                session.continue_after_level_up();
            } else {
                *hint = None;
                session.select_cell(cursor.row, cursor.col);
            }
        }
        GameAction::Cancel => {
            *hint = None;
            session.cancel_selection();
        }
        GameAction::PowerUp(kind) => {
            use tui_crush::core::PowerUpEffect;
            if let Some(PowerUpEffect::Hint(pair)) = session.use_power_up(kind) {
                *hint = pair;
            }
        }
        GameAction::Pause => {
            if session.phase() == GamePhase::LevelUp {
                session.continue_after_level_up();
            } else {
                session.toggle_pause();
            }
        }
        GameAction::Restart => {
            *hint = None;
            session.restart();
        }
    }
}
