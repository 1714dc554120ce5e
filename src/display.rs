/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  World coordinates (1280×720 by default)
/// are scaled into the current terminal grid every frame.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use gesture_shooter::entities::{AimPoint, GameState, GameStatus, Particle, Shape, Target};
use gesture_shooter::tracking::Frame;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_COMBO: Color = Color::Magenta;
const C_PARTICLE: Color = Color::White;
const C_RETICLE: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_PANEL_BORDER: Color = Color::DarkBlue;

/// Camera thumbnail size in cells (each cell shows two vertical samples).
const PANEL_COLS: u16 = 24;
const PANEL_ROWS: u16 = 7;

/// Targets at least this large get the wide 3-cell sprite.
const WIDE_SPRITE_SIZE: f32 = 38.0;

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Maps world pixels onto the terminal grid, leaving row 0 for the HUD and
/// the last row for the controls hint.
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(cols: u16, rows: u16) -> Viewport {
        Viewport { cols, rows }
    }

    /// World position → cell, or `None` when it falls outside the play area
    /// (targets legitimately live below the bottom edge right after spawn).
    fn cell(&self, state: &GameState, x: f32, y: f32) -> Option<(u16, u16)> {
        let play_rows = self.rows.saturating_sub(2);
        if play_rows == 0 || self.cols == 0 {
            return None;
        }
        let cx = x / state.config.world_width * self.cols as f32;
        let cy = y / state.config.world_height * play_rows as f32;
        if cx < 0.0 || cy < 0.0 || cx >= self.cols as f32 || cy >= play_rows as f32 {
            return None;
        }
        Some((cx as u16, cy as u16 + 1))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    aim: Option<AimPoint>,
    camera: &Frame,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(cols, rows);

    for target in &state.targets {
        draw_target(out, &view, state, target)?;
    }
    for particle in &state.particles {
        draw_particle(out, &view, state, particle)?;
    }
    if let Some(aim) = aim {
        draw_reticle(out, &view, state, aim)?;
    }

    draw_camera_panel(out, &view, camera)?;
    draw_hud(out, &view, state)?;
    draw_controls_hint(out, &view)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, &view, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score)))?;

    let combo_str = format!("Combo x{}", state.combo);
    let cx = (view.cols / 2).saturating_sub(combo_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_COMBO))?;
    out.queue(Print(&combo_str))?;

    // Lives never render negative, even if the tally dipped below zero.
    let hearts: String = "♥".repeat(state.lives.max(0) as usize);
    let lives_str = format!("Lives:{}", hearts);
    let rx = view
        .cols
        .saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_target<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
    target: &Target,
) -> std::io::Result<()> {
    let Some((cx, cy)) = view.cell(state, target.x, target.y) else {
        return Ok(());
    };
    let color = Color::Rgb {
        r: target.color.0,
        g: target.color.1,
        b: target.color.2,
    };
    let wide = target.size >= WIDE_SPRITE_SIZE;
    let sprite = match (target.shape, wide) {
        (Shape::Circle, false) => "●",
        (Shape::Circle, true) => "(●)",
        (Shape::Square, false) => "■",
        (Shape::Square, true) => "[■]",
        (Shape::Triangle, false) => "▲",
        (Shape::Triangle, true) => "/▲\\",
    };
    let left = if wide { cx.saturating_sub(1) } else { cx };
    out.queue(cursor::MoveTo(left, cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_particle<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
    particle: &Particle,
) -> std::io::Result<()> {
    let Some((cx, cy)) = view.cell(state, particle.x, particle.y) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(style::SetForegroundColor(C_PARTICLE))?;
    out.queue(Print("·"))?;
    Ok(())
}

fn draw_reticle<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
    aim: AimPoint,
) -> std::io::Result<()> {
    let Some((cx, cy)) = view.cell(state, aim.x, aim.y) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(cx.saturating_sub(1), cy))?;
    out.queue(style::SetForegroundColor(C_RETICLE))?;
    out.queue(Print("─┼─"))?;
    Ok(())
}

// ── Camera panel (bottom-right) ───────────────────────────────────────────────

/// Downsampled camera thumbnail, two vertical samples per cell via the
/// upper-half-block glyph.
fn draw_camera_panel<W: Write>(out: &mut W, view: &Viewport, camera: &Frame) -> std::io::Result<()> {
    if view.cols < PANEL_COLS + 4 || view.rows < PANEL_ROWS + 6 {
        return Ok(()); // terminal too small for the thumbnail
    }
    let left = view.cols - PANEL_COLS - 2;
    let top = view.rows - PANEL_ROWS - 2;

    out.queue(cursor::MoveTo(left - 1, top - 1))?;
    out.queue(style::SetForegroundColor(C_PANEL_BORDER))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(PANEL_COLS as usize))))?;
    out.queue(cursor::MoveTo(left - 1, top + PANEL_ROWS))?;
    out.queue(Print(format!("└{}┘", "─".repeat(PANEL_COLS as usize))))?;

    for row in 0..PANEL_ROWS {
        out.queue(cursor::MoveTo(left - 1, top + row))?;
        out.queue(style::SetForegroundColor(C_PANEL_BORDER))?;
        out.queue(Print("│"))?;
        for col in 0..PANEL_COLS {
            let sx = col as usize * camera.width / PANEL_COLS as usize;
            let sy_top = (row as usize * 2) * camera.height / (PANEL_ROWS as usize * 2);
            let sy_bottom = (row as usize * 2 + 1) * camera.height / (PANEL_ROWS as usize * 2);
            let upper = camera.luma_at(sx, sy_top);
            let lower = camera.luma_at(sx, sy_bottom);
            out.queue(style::SetForegroundColor(Color::Rgb {
                r: upper,
                g: upper,
                b: upper,
            }))?;
            out.queue(style::SetBackgroundColor(Color::Rgb {
                r: lower,
                g: lower,
                b: lower,
            }))?;
            out.queue(Print("▀"))?;
        }
        out.queue(style::ResetColor)?;
        out.queue(style::SetForegroundColor(C_PANEL_BORDER))?;
        out.queue(Print("│"))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Mouse : Aim   Hold LMB : Pinch to fire   ESC : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║     GAME  OVER     ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let score_line = format!("Final Score: {:>6}", state.score);

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    Ok(())
}
