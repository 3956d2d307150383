/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the game
/// state.  No game logic is performed; this module only translates world
/// coordinates into terminal cells and queues crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use grid_invaders::config::Sprites;
use grid_invaders::entities::{
    Enemy, GameState, GameStatus, Hazard, HazardKind, Particle, Player, Projectile,
};
use grid_invaders::geometry::Vec2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_PROJECTILE: Color = Color::Cyan;
const C_EGG: Color = Color::Magenta;
const C_BOMB: Color = Color::Red;
const C_PARTICLE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Drawn in place of an entity whose sprite glyph is empty.
const PLACEHOLDER: char = '█';

// ── World → terminal mapping ─────────────────────────────────────────────────

/// The play field occupies the terminal minus the HUD row, the border and the
/// hint row.  World units are scaled to fit it.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    const LEFT: u16 = 1;
    const TOP: u16 = 2;

    pub fn new(cols: u16, rows: u16, state: &GameState) -> Self {
        Viewport {
            cols,
            rows,
            world_w: state.width,
            world_h: state.height,
        }
    }

    fn inner_w(&self) -> u16 {
        self.cols.saturating_sub(2).max(1)
    }

    fn inner_h(&self) -> u16 {
        self.rows.saturating_sub(4).max(1)
    }

    /// Terminal cell for a world point, or `None` if it falls outside the field.
    fn cell(&self, p: Vec2) -> Option<(u16, u16)> {
        let col = (p.x / self.world_w * self.inner_w() as f32).floor();
        let row = (p.y / self.world_h * self.inner_h() as f32).floor();
        if col < 0.0 || row < 0.0 || col >= self.inner_w() as f32 || row >= self.inner_h() as f32 {
            return None;
        }
        Some((Self::LEFT + col as u16, Self::TOP + row as u16))
    }

    /// Size of a world extent in cells, at least one cell each way.
    fn span(&self, size: Vec2) -> (u16, u16) {
        let w = (size.x / self.world_w * self.inner_w() as f32).round().max(1.0);
        let h = (size.y / self.world_h * self.inner_h() as f32).round().max(1.0);
        (w as u16, h as u16)
    }

    /// Columns still inside the field from `col` onward.
    fn room_right(&self, col: u16) -> usize {
        (Self::LEFT + self.inner_w()).saturating_sub(col) as usize
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &Sprites,
    vp: &Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, vp)?;
    draw_hud(out, state, vp)?;

    for formation in &state.formations {
        for enemy in &formation.enemies {
            draw_enemy(out, enemy, sprites, vp)?;
        }
    }
    for projectile in &state.projectiles {
        draw_projectile(out, projectile, sprites, vp)?;
    }
    for hazard in &state.hazards {
        draw_hazard(out, hazard, sprites, vp)?;
    }
    for particle in &state.particles {
        draw_particle(out, particle, vp)?;
    }
    draw_player(out, &state.player, sprites, vp)?;
    draw_controls_hint(out, vp)?;

    match state.status {
        GameStatus::Paused => draw_pause(out, vp)?,
        GameStatus::Over => draw_game_over(out, state, vp)?,
        GameStatus::Playing | GameStatus::Dying { .. } => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;
    let h = vp.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", state.score)))?;

    let enemies: usize = state.formations.iter().map(|f| f.enemies.len()).sum();
    let right = format!("Enemies: {:>3}", enemies);
    let rx = vp.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Paint `glyph` centred in the cells covered by a world rectangle, or fill
/// the rectangle with the placeholder block when there is no glyph.
fn draw_sprite<W: Write>(
    out: &mut W,
    vp: &Viewport,
    top_left: Vec2,
    size: Vec2,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let centre = Vec2::new(top_left.x + size.x / 2.0, top_left.y + size.y / 2.0);
    let (span_w, span_h) = vp.span(size);
    out.queue(style::SetForegroundColor(color))?;

    if glyph.is_empty() {
        let Some((col, row)) = vp.cell(top_left).or_else(|| vp.cell(centre)) else {
            return Ok(());
        };
        let width = (span_w as usize).min(vp.room_right(col));
        let fill: String = std::iter::repeat(PLACEHOLDER).take(width).collect();
        for dy in 0..span_h {
            let r = row + dy;
            if r >= vp.rows.saturating_sub(2) {
                break;
            }
            out.queue(cursor::MoveTo(col, r))?;
            out.queue(Print(&fill))?;
        }
        return Ok(());
    }

    let Some((col, row)) = vp.cell(centre) else {
        return Ok(());
    };
    let len = glyph.chars().count() as u16;
    let col = col.saturating_sub(len / 2).max(Viewport::LEFT);
    let visible: String = glyph.chars().take(vp.room_right(col)).collect();
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(visible))?;
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    player: &Player,
    sprites: &Sprites,
    vp: &Viewport,
) -> std::io::Result<()> {
    // Opacity 0 means the ship has been destroyed.
    if player.opacity <= 0.0 {
        return Ok(());
    }
    draw_sprite(out, vp, player.position, player.size(), &sprites.player, C_PLAYER)
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &Enemy,
    sprites: &Sprites,
    vp: &Viewport,
) -> std::io::Result<()> {
    draw_sprite(out, vp, enemy.position, enemy.size(), &sprites.enemy, C_ENEMY)
}

fn draw_projectile<W: Write>(
    out: &mut W,
    projectile: &Projectile,
    sprites: &Sprites,
    vp: &Viewport,
) -> std::io::Result<()> {
    let r = projectile.radius;
    let top_left = Vec2::new(projectile.position.x - r, projectile.position.y - r);
    draw_sprite(out, vp, top_left, Vec2::new(2.0 * r, 2.0 * r), &sprites.projectile, C_PROJECTILE)
}

fn draw_hazard<W: Write>(
    out: &mut W,
    hazard: &Hazard,
    sprites: &Sprites,
    vp: &Viewport,
) -> std::io::Result<()> {
    let r = hazard.radius;
    let top_left = Vec2::new(hazard.position.x - r, hazard.position.y - r);
    let (glyph, color) = match hazard.kind {
        HazardKind::Egg => (&sprites.egg, C_EGG),
        HazardKind::Bomb => (&sprites.bomb, C_BOMB),
    };
    draw_sprite(out, vp, top_left, Vec2::new(2.0 * r, 2.0 * r), glyph, color)
}

fn draw_particle<W: Write>(out: &mut W, particle: &Particle, vp: &Viewport) -> std::io::Result<()> {
    let Some((col, row)) = vp.cell(particle.position) else {
        return Ok(());
    };
    // Fainter particles get lighter glyphs.
    let glyph = match particle.opacity.clamp(0.0, 1.0) {
        o if o > 0.66 => "*",
        o if o > 0.33 => "+",
        _ => "·",
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_PARTICLE))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE : Shoot   P : Pause   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centred_lines<W: Write>(
    out: &mut W,
    vp: &Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = vp.cols / 2;
    let start_row = (vp.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_pause<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    draw_centred_lines(
        out,
        vp,
        &[
            ("╔══════════════════╗", Color::Cyan),
            ("║      PAUSED      ║", Color::Cyan),
            ("╚══════════════════╝", Color::Cyan),
            ("P - Resume  Q - Quit", Color::White),
        ],
    )
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, vp: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score);
    draw_centred_lines(
        out,
        vp,
        &[
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
            (&score_line, Color::Yellow),
            ("R - Play Again  Q - Quit", Color::White),
        ],
    )
}
