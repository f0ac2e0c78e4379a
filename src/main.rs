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
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use asteroids::canvas::TerminalCanvas;
use asteroids::compute::{init_state, tick};
use asteroids::display::render;
use asteroids::entities::GameStatus;
use asteroids::input::{Button, KeyLatch};

#[derive(Parser)]
#[command(name = "asteroids")]
#[command(about = "Asteroids-style arcade shooter for the terminal")]
struct Args {
    /// Seed for enemy placement and splitting; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// File that receives log output (the terminal itself is in raw mode)
    #[arg(long, default_value = "asteroids.log")]
    log_file: PathBuf,
}

/// How long a key stays "held" after its last press/repeat event.
/// Terminals that never report releases repeat presses at ≥ 15 Hz, so
/// ≈130 ms is always refreshed before it lapses.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits. The world keeps simulating after the ship is
/// destroyed so the overlay and the surviving enemies stay on screen.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    seed: u64,
    fps: u32,
) -> std::io::Result<()> {
    let frame_budget = Duration::from_secs(1) / fps.max(1);
    let hold_frames = (HOLD_WINDOW.as_secs_f64() * fps.max(1) as f64).ceil() as u64;

    let mut rng = StdRng::seed_from_u64(seed);
    let started = Instant::now();
    let mut world = init_state(0.0, &mut rng);
    info!(seed, fps, enemies = world.enemies.len(), "game started");

    let (width, height) = terminal::size()?;
    let mut canvas = TerminalCanvas::for_terminal(width, height);
    let mut latch = KeyLatch::new(hold_frames);
    let mut frame: u64 = 0;
    let mut reported_game_over = false;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if kind != KeyEventKind::Release && is_quit(&code, modifiers) {
                        info!(frame, "quit requested");
                        return Ok(());
                    }
                    if let Some(button) = Button::from_key(&code) {
                        match kind {
                            KeyEventKind::Press | KeyEventKind::Repeat => {
                                latch.press(button, frame)
                            }
                            KeyEventKind::Release => latch.release(button),
                        }
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                    canvas.resize(width, height.saturating_sub(1));
                }
                _ => {}
            }
        }

        // ── Update, then render ───────────────────────────────────────────────
        let now = started.elapsed().as_secs_f64() * 1000.0;
        let input = latch.state(frame);
        world = tick(&world, &input, now, &mut rng);

        if world.status() == GameStatus::GameOver && !reported_game_over {
            info!(frame, remaining_enemies = world.enemies.len(), "game over");
            reported_game_over = true;
        }

        render(&mut canvas, &world, now);
        canvas.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let seed = args.seed.unwrap_or_else(rand::random);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    debug!(keyboard_enhanced, "terminal ready");

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

    let result = game_loop(&mut out, &rx, seed, args.fps);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("game loop failed")
}
