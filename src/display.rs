/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game world.  No game logic is performed; this module only translates
/// world state into terminal commands, mapping world pixels onto the
/// terminal cell grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use astro_dodge::compute::{ship_anchor_x, ship_anchor_y, SHIP_WIDTH};
use astro_dodge::entities::{GameWorld, Phase, Star};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_STAR_NEAR: Color = Color::White;
const C_STAR_MID: Color = Color::Grey;
const C_STAR_FAR: Color = Color::DarkGrey;
const C_ASTEROID: Color = Color::DarkYellow;
const C_GOODIE: Color = Color::Yellow;
const C_SHIP: Color = Color::White;
const C_SHIP_HURT: Color = Color::Red;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_GOODIES: Color = Color::Yellow;
const C_HUD_METERS: Color = Color::Cyan;
const C_TITLE: Color = Color::Cyan;
const C_GAME_OVER: Color = Color::Red;
const C_SCORE: Color = Color::Yellow;
const C_BUTTON: Color = Color::White;
const C_BUTTON_HOVER: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── Sprites ───────────────────────────────────────────────────────────────────

/// One glyph per asteroid variant index.
const ASTEROID_GLYPHS: [char; 7] = ['@', 'O', '0', 'Q', '&', '8', '%'];

/// Minimum world radius for the bright star glyph; dimmer grades below.
const STAR_GLYPH_THRESHOLD: f64 = 1.12;

const START_LABEL: &str = "[ START GAME ]";
const RESTART_LABEL: &str = "[ RESTART ]";

// ── World-to-cell mapping ─────────────────────────────────────────────────────

/// Maps world pixels onto the playfield cells: row 0 is the HUD, rows 1 and
/// `rows - 2` are the border, the last row is the controls hint.
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: f64,
    world_h: f64,
}

impl Viewport {
    fn new(cols: u16, rows: u16, world: &GameWorld) -> Self {
        Self {
            cols,
            rows,
            world_w: world.config.width,
            world_h: world.config.height,
        }
    }

    /// Cell for a world position, or `None` while it is off the playfield
    /// (e.g. an entity still inside the top spawn band).
    fn cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let inner_w = f64::from(self.cols.saturating_sub(2));
        let inner_h = f64::from(self.rows.saturating_sub(4));
        if inner_w < 1.0 || inner_h < 1.0 {
            return None;
        }
        if !(0.0..self.world_w).contains(&x) || !(0.0..self.world_h).contains(&y) {
            return None;
        }
        let col = 1 + (x / self.world_w * inner_w) as u16;
        let row = 2 + (y / self.world_h * inner_h) as u16;
        Some((col.min(self.cols - 2), row.min(self.rows - 3)))
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    world: &GameWorld,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let vp = Viewport::new(cols, rows, world);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, cols, rows)?;
    draw_stars(out, &vp, world)?;

    match world.phase {
        Phase::NotStarted => {}
        Phase::StartMenu => draw_start_menu(out, world, cols, rows)?,
        Phase::GameOver => draw_game_over(out, world, cols, rows)?,
        Phase::Playing => {
            for asteroid in &world.asteroids {
                if let Some((col, row)) = vp.cell(asteroid.x, asteroid.y) {
                    out.queue(cursor::MoveTo(col, row))?;
                    out.queue(style::SetForegroundColor(C_ASTEROID))?;
                    out.queue(Print(ASTEROID_GLYPHS[asteroid.variant % ASTEROID_GLYPHS.len()]))?;
                }
            }
            for goodie in &world.goodies {
                if let Some((col, row)) = vp.cell(goodie.x, goodie.y) {
                    out.queue(cursor::MoveTo(col, row))?;
                    out.queue(style::SetForegroundColor(C_GOODIE))?;
                    out.queue(Print("★"))?;
                }
            }
            draw_ship(out, &vp, world)?;
            draw_hud(out, world, cols)?;
        }
    }

    draw_controls_hint(out, rows)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Screen-cell rectangle (left, top, right, bottom — inclusive) of the
/// start/restart button currently on screen, if any.  The input adapter
/// uses this for mouse hover and click hit-testing.
pub fn button_rect(world: &GameWorld, cols: u16, rows: u16) -> Option<(u16, u16, u16, u16)> {
    let (label, row) = match world.phase {
        Phase::StartMenu => (START_LABEL, rows / 7 * 2),
        Phase::GameOver => (RESTART_LABEL, rows / 7 * 5),
        _ => return None,
    };
    let width = label.chars().count() as u16;
    let left = (cols / 2).saturating_sub(width / 2);
    Some((left, row, left + width.saturating_sub(1), row))
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let w = cols as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Starfield ─────────────────────────────────────────────────────────────────

fn star_grade(star: &Star) -> (char, Color) {
    // Radius carries the layer depth, so glyph and colour grade by it:
    // near stars bright and big, far stars a dim speck.
    if star.radius >= STAR_GLYPH_THRESHOLD {
        ('✦', C_STAR_NEAR)
    } else if star.radius >= 0.45 {
        ('•', C_STAR_MID)
    } else {
        ('·', C_STAR_FAR)
    }
}

fn draw_stars<W: Write>(out: &mut W, vp: &Viewport, world: &GameWorld) -> std::io::Result<()> {
    for layer in &world.star_layers {
        for star in layer {
            if let Some((col, row)) = vp.cell(star.x, star.y) {
                let (glyph, color) = star_grade(star);
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(style::SetForegroundColor(color))?;
                out.queue(Print(glyph))?;
            }
        }
    }
    Ok(())
}

// ── Ship ──────────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, vp: &Viewport, world: &GameWorld) -> std::io::Result<()> {
    // Anchor is the sprite's top-left corner; centre the 2-row terminal
    // sprite on the sprite's midline.
    let center_x = ship_anchor_x(&world.config, world.ship_offset) + SHIP_WIDTH / 2.0;
    let top_y = ship_anchor_y(&world.config);
    let Some((col, row)) = vp.cell(
        center_x.clamp(0.0, world.config.width - 1.0),
        top_y.clamp(0.0, world.config.height - 1.0),
    ) else {
        return Ok(());
    };

    // Crash window swaps in the hurt rendition.
    let (tip, body, color) = if world.crash {
        ('✶', "/✶\\", C_SHIP_HURT)
    } else {
        ('▲', "/█\\", C_SHIP)
    };

    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(tip))?;
    if row + 1 < vp.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
        out.queue(Print(body))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &GameWorld, cols: u16) -> std::io::Result<()> {
    // Lives — left
    let hearts: String = "♥".repeat(world.lives as usize);
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives:{}", hearts)))?;

    // Goodies — centre
    let goodies_str = format!("★ {}", world.goodies_collected);
    let gx = (cols / 2).saturating_sub(goodies_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(gx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_GOODIES))?;
    out.queue(Print(&goodies_str))?;

    // Distance — right
    let meters_str = format!("{}m", world.meters as u64);
    let mx = cols.saturating_sub(meters_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(mx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_METERS))?;
    out.queue(Print(&meters_str))?;

    Ok(())
}

// ── Menu screens ──────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    cols: u16,
    row: u16,
    color: Color,
    text: &str,
) -> std::io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_button<W: Write>(
    out: &mut W,
    world: &GameWorld,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    if let Some((left, top, _, _)) = button_rect(world, cols, rows) {
        let label = match world.phase {
            Phase::StartMenu => START_LABEL,
            _ => RESTART_LABEL,
        };
        let color = if world.button_hover {
            C_BUTTON_HOVER
        } else {
            C_BUTTON
        };
        out.queue(cursor::MoveTo(left, top))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(label))?;
    }
    Ok(())
}

fn draw_start_menu<W: Write>(
    out: &mut W,
    world: &GameWorld,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let cy = rows / 2;

    draw_centered(out, cols, cy.saturating_sub(4), C_TITLE, "★  ASTRO  DODGE  ★")?;

    if world.high_score.meters > 0.0 {
        let best = format!(
            "Best: {}m and {} stars",
            world.high_score.meters as u64, world.high_score.goodies
        );
        draw_centered(out, cols, cy.saturating_sub(3), C_SCORE, &best)?;
    }

    draw_centered(
        out,
        cols,
        cy.saturating_sub(1),
        C_HINT,
        "Dodge the asteroids ( @ O 0 ), catch the stars ( ★ )",
    )?;

    draw_button(out, world, cols, rows)?;
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    world: &GameWorld,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let cy = rows / 2;

    draw_centered(out, cols, cy.saturating_sub(4), C_GAME_OVER, "╔════════════════════╗")?;
    draw_centered(out, cols, cy.saturating_sub(3), C_GAME_OVER, "║     GAME  OVER     ║")?;
    draw_centered(out, cols, cy.saturating_sub(2), C_GAME_OVER, "╚════════════════════╝")?;

    let score = format!(
        "Your Score: {}m and {} stars",
        world.meters as u64, world.goodies_collected
    );
    draw_centered(out, cols, cy, C_SCORE, &score)?;

    let best = format!(
        "Highscore : {}m and {} stars",
        world.high_score.meters as u64, world.high_score.goodies
    );
    draw_centered(out, cols, cy + 1, C_HINT, &best)?;

    draw_button(out, world, cols, rows)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   ENTER / CLICK : Start   Q : Quit"))?;
    Ok(())
}
