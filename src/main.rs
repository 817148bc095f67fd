//! Terminal match-3 runner (default binary).
//!
//! Wires the engine, view, and input mapper into a fixed-cadence frame loop:
//! render, poll the terminal for input with a timeout, feed intents into the
//! engine, tick with the measured elapsed time.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tui_match3::core::GameState;
use tui_match3::input::{handle_key_event, should_quit, InputHandler};
use tui_match3::term::{GameView, TerminalRenderer, Viewport};
use tui_match3::types::{
    GameConfig, GameIntent, DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_TOKEN_KINDS,
    MAX_GENERATION_ATTEMPTS, PHASE_MS, TICK_MS,
};

#[derive(Parser, Debug)]
#[command(name = "tui-match3", about = "A match-3 puzzle for the terminal")]
struct Args {
    /// Board width in tiles
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    columns: u8,

    /// Board height in tiles
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: u8,

    /// Number of token colors
    #[arg(long, default_value_t = DEFAULT_TOKEN_KINDS)]
    colors: u8,

    /// Animation phase duration in milliseconds
    #[arg(long, default_value_t = PHASE_MS)]
    phase_ms: u32,

    /// RNG seed (defaults to wall-clock derived)
    #[arg(long)]
    seed: Option<u32>,

    /// Start with the assist bot enabled
    #[arg(long)]
    assist: bool,

    /// Start with legal-move hints shown
    #[arg(long)]
    show_moves: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = GameConfig {
        columns: args.columns,
        rows: args.rows,
        token_kinds: args.colors,
        phase_ms: args.phase_ms,
        generation_attempts: MAX_GENERATION_ATTEMPTS,
    };
    let seed = args.seed.unwrap_or_else(clock_seed);

    let mut game = GameState::new(config, seed)?;
    game.set_assist(args.assist);
    game.set_show_moves(args.show_moves);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, game: &mut GameState) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let fb = view.render(game, input.selected(), viewport);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_default();

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(intent) = handle_key_event(key) {
                        apply_intent(game, &mut input, intent)?;
                    }
                }
                Event::Mouse(mouse) => {
                    let layout = view.layout(game, viewport);
                    if let Some(intent) = input.handle_mouse(mouse, &layout) {
                        apply_intent(game, &mut input, intent)?;
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            let elapsed_ms = last_tick.elapsed().as_millis() as u32;
            last_tick = Instant::now();
            game.tick(elapsed_ms);
        }
    }
}

fn apply_intent(game: &mut GameState, input: &mut InputHandler, intent: GameIntent) -> Result<()> {
    match intent {
        GameIntent::Swap(a, b) => {
            // Rejected swaps (wrong phase, game over) are simply dropped.
            game.request_swap(a, b);
        }
        GameIntent::NewGame => {
            input.clear_selection();
            game.new_game()?;
        }
        GameIntent::ToggleAssist => game.set_assist(!game.assist_enabled()),
        GameIntent::ToggleMovesHint => game.set_show_moves(!game.show_moves()),
    }
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
