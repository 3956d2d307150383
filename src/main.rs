mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use grid_invaders::compute::{fire, new_game, restart, tick, toggle_pause};
use grid_invaders::config::GameConfig;
use grid_invaders::input::{Command, InputListener};

use display::Viewport;

/// Shoot down the descending grids before their eggs and bombs get you.
#[derive(Parser, Debug)]
#[command(name = "grid_invaders", version, about)]
struct Cli {
    /// Gameplay config (TOML).  Defaults to ./invaders.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Write tracing output to this file.  Filter with RUST_LOG (default: info).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The terminal is in raw alternate-screen mode while playing, so logs only
/// go to a file, and only when one is requested.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Each frame: drain pending key events (between ticks, never mid-tick),
/// draw the current state, then advance the simulation by one tick using a
/// single snapshot of the held keys.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    rng: &mut StdRng,
    release_events: bool,
) -> anyhow::Result<()> {
    let frame_len = Duration::from_millis(config.tick_millis);
    let mut state = new_game(config, rng);
    let mut listener = InputListener::new(release_events);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(key) = event else {
                continue;
            };
            match listener.handle(&key, frame) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Fire) => state = fire(&state, config),
                Some(Command::TogglePause) => state = toggle_pause(&state),
                Some(Command::Restart) => state = restart(&state, config, rng),
                None => {}
            }
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, &state, &config.sprites, &Viewport::new(cols, rows, &state))?;

        let keys = listener.snapshot(frame);
        state = tick(&state, &keys, config, rng);

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = GameConfig::load_or_default(cli.config.as_deref())?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?cli.seed, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to hold windows.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    tracing::info!(keyboard_enhanced, "terminal ready");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &config, &mut rng, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}
