/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer, an immutable view of the world
/// and the `Viewport` that maps world units onto terminal cells.  No game
/// logic is performed; this module only translates state into terminal
/// commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{Bounds, GameStatus, Sprite, World};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_COPTER: Color = Color::White;
const C_ROTOR: Color = Color::Grey;
const C_DROP: Color = Color::Cyan;
const C_FIRE_TIP: Color = Color::Yellow;
const C_FIRE_BODY: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Maps world coordinates onto the terminal cells inside the border.
///
/// Layout: row 0 is the HUD, rows 1 and `rows - 2` are the border, the last
/// row is the controls hint.  The play area is everything in between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub world_width: f64,
    pub world_height: f64,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_width: f64, world_height: f64) -> Self {
        Self {
            cols,
            rows,
            world_width,
            world_height,
        }
    }

    /// First and last usable column of the play area.
    fn col_range(&self) -> (u16, u16) {
        let last = self.cols.saturating_sub(2).max(1);
        (1, last)
    }

    /// First and last usable row of the play area.
    fn row_range(&self) -> (u16, u16) {
        let last = self.rows.saturating_sub(3).max(2);
        (2, last)
    }

    pub fn column(&self, x: f64) -> u16 {
        let (first, last) = self.col_range();
        scale_into(x / self.world_width, first, last)
    }

    pub fn row(&self, y: f64) -> u16 {
        let (first, last) = self.row_range();
        scale_into(y / self.world_height, first, last)
    }

    /// Inclusive `(left, top, right, bottom)` cells covered by `bounds`.
    /// Always at least one cell, even for tiny sprites.
    pub fn cells(&self, bounds: &Bounds) -> (u16, u16, u16, u16) {
        let left = self.column(bounds.left);
        let right = self.column(bounds.right).max(left);
        let top = self.row(bounds.top);
        let bottom = self.row(bounds.bottom).max(top);
        (left, top, right, bottom)
    }
}

/// Map `t` in `0.0..=1.0` onto `first..=last`, clamping out-of-range values
/// to the edges.
fn scale_into(t: f64, first: u16, last: u16) -> u16 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let span = last.saturating_sub(first) as f64;
    first + (t * span).round() as u16
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;

    for fire in &world.fires {
        draw_fire(out, fire, view)?;
    }
    for drop in &world.drops {
        draw_drop(out, drop, view)?;
    }
    draw_copter(out, &world.copter, view)?;

    draw_hud(out, world, view)?;
    draw_controls_hint(out, view)?;

    if world.status == GameStatus::GameOver {
        draw_game_over(out, world, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar (the ground the fires stand on)
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    let text = &world.counter.text;
    let max_col = view
        .cols
        .saturating_sub(text.chars().count() as u16 + 1);
    let col = view.column(world.counter.x).min(max_col);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_copter<W: Write>(out: &mut W, copter: &Sprite, view: &Viewport) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols), nose pointing the way it flies:
    //  ─┬─      ← rotor
    //  =█>      ← fuselage (facing right; mirrored when facing left)
    let col = view.column(copter.x).saturating_sub(1).max(1);
    let row = view.row(copter.y);

    out.queue(style::SetForegroundColor(C_ROTOR))?;
    out.queue(cursor::MoveTo(col, row.saturating_sub(1).max(2)))?;
    out.queue(Print("─┬─"))?;

    let body = if copter.flip_x { "=█>" } else { "<█=" };
    out.queue(style::SetForegroundColor(C_COPTER))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(body))?;
    Ok(())
}

fn draw_drop<W: Write>(out: &mut W, drop: &Sprite, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(view.column(drop.x), view.row(drop.y)))?;
    out.queue(style::SetForegroundColor(C_DROP))?;
    out.queue(Print("o"))?;
    Ok(())
}

/// Fires are drawn as a block covering their current bounds: a flickering
/// tip on the top row, embers below.
fn draw_fire<W: Write>(out: &mut W, fire: &Sprite, view: &Viewport) -> std::io::Result<()> {
    let (left, top, right, bottom) = view.cells(&fire.bounds());
    let width = (right - left + 1) as usize;

    out.queue(cursor::MoveTo(left, top))?;
    out.queue(style::SetForegroundColor(C_FIRE_TIP))?;
    out.queue(Print("^".repeat(width)))?;

    out.queue(style::SetForegroundColor(C_FIRE_BODY))?;
    for row in (top + 1)..=bottom {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print("▒".repeat(width)))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Steer   SPACE : Drop water   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let hint = "R - Play Again  Q - Quit";

    let cx = view.cols / 2;
    let total_rows = lines.len() + 2; // box + final score + hint
    let start_row = (view.rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let message_row = start_row + lines.len() as u16;
    let message = &world.counter.text;
    let col = cx.saturating_sub(message.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, message_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(message))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, message_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::create_world;

    fn view() -> Viewport {
        // 80x24 terminal: play columns 1..=78, play rows 2..=21
        Viewport::new(80, 24, 800.0, 600.0)
    }

    #[test]
    fn test_world_corners_map_to_play_area_corners() {
        let v = view();
        assert_eq!(v.column(0.0), 1);
        assert_eq!(v.column(800.0), 78);
        assert_eq!(v.row(0.0), 2);
        assert_eq!(v.row(600.0), 21);
    }

    #[test]
    fn test_out_of_range_positions_are_clamped() {
        let v = view();
        assert_eq!(v.column(-50.0), 1);
        assert_eq!(v.column(900.0), 78);
        assert_eq!(v.row(1000.0), 21);
    }

    #[test]
    fn test_tiny_sprite_covers_one_cell() {
        let v = view();
        let b = Bounds {
            left: 400.0,
            top: 595.0,
            right: 401.0,
            bottom: 600.0,
        };
        let (left, top, right, bottom) = v.cells(&b);
        assert_eq!(left, right);
        assert_eq!(top, bottom);
        assert_eq!(bottom, 21);
    }

    #[test]
    fn test_degenerate_terminal_does_not_panic() {
        let v = Viewport::new(0, 0, 800.0, 600.0);
        let _ = v.column(400.0);
        let _ = v.row(300.0);
    }

    #[test]
    fn test_render_writes_score_label() {
        let world = create_world(800.0, 600.0);
        let mut buf: Vec<u8> = Vec::new();
        render(&mut buf, &world, &view()).expect("render into a buffer");
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("=█>"));
    }

    #[test]
    fn test_render_game_over_overlay() {
        let mut world = create_world(800.0, 600.0);
        world.status = GameStatus::GameOver;
        world.counter.text = "GAME OVER! Your score was 3".to_string();
        let mut buf: Vec<u8> = Vec::new();
        render(&mut buf, &world, &view()).expect("render into a buffer");
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("GAME  OVER"));
        assert!(text.contains("R - Play Again"));
    }
}
