//! Terminal Diamonds runner (default binary).
//!
//! Usage: `tui-diamonds [config.json]`
//!
//! Uses crossterm for input and the framebuffer renderer from the `term`
//! crate. Lifecycle messages go to stderr once the terminal is restored.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_diamonds::core::{
    GameConfig, GameSession, GridSnapshot, InputReactor, SimpleRng, SystemTimer, Timer,
};
use tui_diamonds::input::{should_quit, KeyboardReactor};
use tui_diamonds::term::{FrameBuffer, GridView, TerminalRenderer};
use tui_diamonds::types::TICK_MS;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        None => GameConfig::default(),
    };
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos())
        .unwrap_or(1);

    eprintln!(
        "[Diamonds] Starting {}x{} grid (seed {})",
        config.rows, config.columns, seed
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, config, seed);
    // Always try to restore terminal state.
    let _ = term.exit();

    match &result {
        Ok(summary) => eprintln!(
            "[Diamonds] Game finished: score {} best chain {} (seed {})",
            summary.score, summary.best_chain, seed
        ),
        Err(e) => eprintln!("[Diamonds] Error: {:#}", e),
    }
    result.map(|_| ())
}

fn run(term: &mut TerminalRenderer, config: GameConfig, seed: u32) -> Result<GridSnapshot> {
    let timer = SystemTimer::new();
    let mut session = GameSession::new(config, Box::new(SimpleRng::new(seed)), timer.now_ms());
    let mut reactor = KeyboardReactor::new();
    let view = GridView;

    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshot = GridSnapshot::default();
    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        session.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        fb.resize(w, h);
        view.render(&mut fb, &snapshot);
        term.draw_swap(&mut fb)?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(snapshot);
                    }
                    // terminal auto-repeat is ignored; DAS/ARR produces repeats
                    if key.kind != KeyEventKind::Repeat {
                        reactor.handle_key(key, timer.now_ms());
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let now = timer.now_ms();

            if session.is_game_over() {
                if reactor.restart_requested() {
                    session.restart(now);
                    reactor.reset();
                } else {
                    // drop keys pressed on the game over screen
                    reactor.react_to_input(now);
                }
                continue;
            }
            session.react_to_input(&mut reactor, now);
            session.tick(now);
        }
    }
}
