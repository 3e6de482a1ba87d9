//! Terminal Raindrop runner (default binary).
//!
//! Expressions fall down the lane; type the answer and press Enter before they
//! reach the bottom. Two misses end the run. Results are kept in a JSON file
//! store (`RAINDROP_STORE_PATH`, default `raindrop-store.json`).

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use raindrop::core::{GameConfig, GameSnapshot, SessionResult};
use raindrop::engine::RaindropGame;
use raindrop::input::{handle_key_event, should_quit};
use raindrop::store::JsonFileStore;
use raindrop::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Input poll / redraw cadence.
const FRAME_MS: u64 = 33;

fn main() -> Result<()> {
    raindrop::logging::init_from_env()?;

    let config = GameConfig::from_env();
    let seed = raindrop::core::config::env_or("RAINDROP_SEED", clock_seed());
    let store_path =
        std::env::var("RAINDROP_STORE_PATH").unwrap_or_else(|_| "raindrop-store.json".to_string());
    let store = JsonFileStore::open(&store_path)
        .with_context(|| format!("opening store {store_path}"))?;

    let navigator = |result: &SessionResult| {
        info!(score = result.score, survival = %result.survival, "returned to assessment");
    };
    let mut game = RaindropGame::new(config, seed, store, navigator);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    game.teardown();
    result
}

fn run<N>(term: &mut TerminalRenderer, game: &mut RaindropGame<JsonFileStore, N>) -> Result<()>
where
    N: raindrop::engine::Navigator,
{
    game.start();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let frame = Duration::from_millis(FRAME_MS);
    // The game clock is time since start; `next_frame` only paces redraws.
    let origin = Instant::now();
    let base_ms = game.now_ms();
    let mut next_frame = origin + frame;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        game.return_to_assessment();
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if game.is_torn_down() {
            return Ok(());
        }

        let now = Instant::now();
        if now >= next_frame {
            next_frame = now + frame;
            game.advance_to(base_ms + origin.elapsed().as_millis() as u64);
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
