mod display;

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use astro_dodge::compute::{apply_input, force_end, init_state, set_button_hover, update};
use astro_dodge::config::GameConfig;
use astro_dodge::entities::{GameWorld, InputIntent, Phase};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Cap on how much of one frame delta the simulation is fed; a stalled
/// terminal must not turn into a position teleport.
const MAX_DELTA: f64 = 0.05;

/// Hard cap on one seated session; past it the state machine is told to
/// end the run.  The core only exposes the hook, the clock lives here.
const SESSION_TIME_LIMIT: Duration = Duration::from_secs(8 * 60 * 60);

// ── Simultaneous-input model ──────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn rect_hit(rect: (u16, u16, u16, u16), col: u16, row: u16) -> bool {
    let (left, top, right, bottom) = rect;
    col >= left && col <= right && row >= top && row <= bottom
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key; each frame, whichever direction key is
/// still "fresh" steers the ship.  Mouse movement drives the menu-button
/// hover hint and a left click on the button confirms, mirroring the
/// keyboard's Enter.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> io::Result<()> {
    let mut rng = thread_rng();
    let mut world: GameWorld = init_state(GameConfig::default())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let (mut cols, mut rows) = terminal::size()?;
    let session_start = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    // Press: record key + handle one-shot actions
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Enter | KeyCode::Char(' ') => {
                                world = apply_input(&world, InputIntent::Confirm, &mut rng);
                            }
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => match kind {
                    MouseEventKind::Moved => {
                        let hover = display::button_rect(&world, cols, rows)
                            .map_or(false, |r| rect_hit(r, column, row));
                        if hover != world.button_hover {
                            world = set_button_hover(&world, hover);
                        }
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        let on_button = display::button_rect(&world, cols, rows)
                            .map_or(false, |r| rect_hit(r, column, row));
                        if on_button {
                            world = apply_input(&world, InputIntent::Confirm, &mut rng);
                        }
                    }
                    _ => {}
                },
                Event::Resize(c, r) => {
                    cols = c;
                    rows = r;
                }
                _ => {}
            }
        }

        // ── Held-key steering, applied once per frame ─────────────────────────
        let left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame)
            || is_held(&key_frame, &KeyCode::Char('A'), frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame)
            || is_held(&key_frame, &KeyCode::Char('D'), frame);
        if left && !right {
            world = apply_input(&world, InputIntent::MoveLeft, &mut rng);
        } else if right && !left {
            world = apply_input(&world, InputIntent::MoveRight, &mut rng);
        }

        // External session cap, routed through the core's hook.
        if world.phase == Phase::Playing && session_start.elapsed() > SESSION_TIME_LIMIT {
            world = force_end(&world);
        }

        let delta = last_tick.elapsed().as_secs_f64().min(MAX_DELTA);
        last_tick = Instant::now();
        world = update(&world, delta, &mut rng);

        display::render(out, &world, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

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

    let result = game_loop(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
