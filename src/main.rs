mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use gesture_shooter::compute::{init_state, tick};
use gesture_shooter::config::load_config;
use gesture_shooter::entities::GameStatus;
use gesture_shooter::gesture::{self, HandLandmarks, NormPoint, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};
use gesture_shooter::tracking::{CaptureError, Frame, FrameSource, HandTracker};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Demo backends for the two external services ──────────────────────────────
//
// A webcam + hand-landmark backend plugs in behind `FrameSource` and
// `HandTracker`; in the terminal build the camera is a synthetic test
// pattern and the "hand" is the mouse: cursor = index fingertip, held left
// button = pinch.  The real gesture interpreter (threshold, cooldown) runs
// unchanged on top.

struct SyntheticCamera {
    width: usize,
    height: usize,
    ticks: u64,
}

impl SyntheticCamera {
    fn new(width: usize, height: usize) -> SyntheticCamera {
        SyntheticCamera {
            width,
            height,
            ticks: 0,
        }
    }
}

impl FrameSource for SyntheticCamera {
    fn read(&mut self) -> Result<Frame, CaptureError> {
        self.ticks += 1;
        let mut frame = Frame::filled(self.width, self.height, 20);
        // Slow diagonal sweep so the thumbnail panel visibly updates
        for y in 0..self.height {
            for x in 0..self.width {
                let phase = (x + y + self.ticks as usize * 2) % self.width;
                frame.pixels[y * self.width + x] = 20 + (phase * 140 / self.width) as u8;
            }
        }
        Ok(frame)
    }
}

/// When the button is up the synthetic thumb rests this far from the index
/// tip, well clear of the pinch threshold.
const THUMB_REST_OFFSET: f64 = 0.2;

#[derive(Default)]
struct PointerTracker {
    pointer: Option<NormPoint>,
    pinched: bool,
}

impl HandTracker for PointerTracker {
    fn detect(&mut self, _frame: &Frame) -> Option<HandLandmarks> {
        let index = self.pointer?;
        let thumb = if self.pinched {
            index
        } else {
            NormPoint {
                x: (index.x + THUMB_REST_OFFSET).min(1.0),
                y: index.y,
            }
        };
        let mut points = [NormPoint::default(); LANDMARK_COUNT];
        points[INDEX_TIP] = index;
        points[THUMB_TIP] = thumb;
        Some(HandLandmarks { points })
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let config = load_config();

    let mut camera = SyntheticCamera::new(160, 90);
    let mut tracker = PointerTracker::default();
    let mut state = init_state(config);

    let started = Instant::now();
    let mut term_size = terminal::size()?;
    let mut reported_game_over = false;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                }) => match code {
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => {}
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => tracker.pinched = true,
                        MouseEventKind::Up(MouseButton::Left) => tracker.pinched = false,
                        _ => {}
                    }
                    let (cols, rows) = term_size;
                    if cols > 0 && rows > 0 {
                        tracker.pointer = Some(NormPoint {
                            x: (column as f64 + 0.5) / cols as f64,
                            y: (row as f64 + 0.5) / rows as f64,
                        });
                    }
                }
                Event::Resize(cols, rows) => term_size = (cols, rows),
                _ => {}
            }
        }

        // ── Acquire frame → infer hand → update → render ──────────────────────
        let camera_frame = match camera.read() {
            Ok(frame) => frame,
            Err(err) => {
                // The one fatal condition: a failed read stops the program.
                log::error!("{err}");
                return Ok(());
            }
        };
        let hand = tracker.detect(&camera_frame);

        let now = started.elapsed().as_secs_f64();
        let control = gesture::interpret(hand.as_ref(), state.last_fire, now, &state.config);
        state = tick(&state, &control, now, &mut rng);

        if state.status == GameStatus::GameOver && !reported_game_over {
            log::info!("game over — final score {}", state.score);
            reported_game_over = true;
        }

        display::render(out, &state, control.aim, &camera_frame)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
