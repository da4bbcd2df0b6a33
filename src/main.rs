use std::fs::{self, File};
use std::io::{self, stdout, BufWriter, Write};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use firefighter::compute::{create_world, handle_key, tick};
use firefighter::config::GameConfig;
use firefighter::display::{self, Viewport};
use firefighter::entities::{GameStatus, InputKey, World};

// ── Logging ───────────────────────────────────────────────────────────────────

/// The game owns the terminal, so log lines go to a file instead of stderr.
/// `RUST_LOG` picks the filter.  Logging stays off if no log file can be
/// created.
fn init_logging() {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("firefighter")) else {
        return;
    };
    let file = match fs::create_dir_all(&dir)
        .and_then(|_| File::create(dir.join("firefighter.log")))
    {
        Ok(f) => f,
        Err(_) => return,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

// ── Input mapping ─────────────────────────────────────────────────────────────

fn map_key(code: KeyCode) -> InputKey {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => InputKey::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => InputKey::Right,
        KeyCode::Char(' ') => InputKey::Space,
        _ => InputKey::Other,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

/// Dispatch every pending key press.  A disconnected channel means the
/// reader thread is gone and no key could ever quit, so it is an error.
fn drain_input(
    rx: &mpsc::Receiver<Event>,
    world: &mut World,
    config: &GameConfig,
) -> io::Result<Flow> {
    loop {
        let ev = match rx.try_recv() {
            Ok(ev) => ev,
            Err(TryRecvError::Empty) => return Ok(Flow::Continue),
            Err(TryRecvError::Disconnected) => {
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "input reader disconnected",
                ));
            }
        };
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(Flow::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Flow::Quit);
            }
            KeyCode::Char('r') | KeyCode::Char('R') if world.status == GameStatus::GameOver => {
                info!("restarting after final score {}", world.score);
                *world = create_world(config.screen_width, config.screen_height);
            }
            other => handle_key(world, map_key(other)),
        }
    }
}

/// Run until the player quits.  Every key press is dispatched once, between
/// frames; the world is only ticked while the game is running.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> io::Result<()> {
    let frame_time = Duration::from_millis(config.frame_millis);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut world = create_world(config.screen_width, config.screen_height);

    loop {
        let frame_start = Instant::now();

        if drain_input(rx, &mut world, config)? == Flow::Quit {
            return Ok(());
        }

        tick(&mut world, &mut rng);

        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows, world.width, world.height);
        display::render(out, &world, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

/// Switch to the game screen and play.  Runs entirely after raw mode is on,
/// so any failure here still reaches the restore path in `main`.
fn session<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> io::Result<()> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    game_loop(out, config, rx)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    init_logging();
    let config = GameConfig::load();
    info!("starting with {:?}", config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;

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
            Err(e) => {
                warn!("input reader stopped: {}", e);
                break;
            }
        }
    });

    let result = session(&mut out, &config, &rx);
    if let Err(e) = &result {
        error!("game session failed: {}", e);
    }

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    info!("shutting down");

    result
}
