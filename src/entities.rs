/// All game entity types, plus the one capability they share: moving by
/// their velocity once per tick.

use crate::geometry::Vec2;

/// Fixed-step motion: one call is one tick, no delta-time scaling.
pub trait Motion {
    fn advance(&mut self);
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Vec2,
    /// Re-derived from the key table every tick, never accumulated.
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// 1.0 while alive, 0.0 once hit.
    pub opacity: f32,
}

impl Player {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    /// Keep the ship on screen and inside the lower half of the play area.
    pub fn clamp_to(&mut self, play_width: f32, play_height: f32) {
        let max_x = (play_width - self.width).max(0.0);
        let max_y = (play_height - self.height).max(0.0);
        let min_y = (play_height / 2.0).min(max_y);
        self.position.x = self.position.x.clamp(0.0, max_x);
        self.position.y = self.position.y.clamp(min_y, max_y);
    }
}

impl Motion for Player {
    fn advance(&mut self) {
        self.position += self.velocity;
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A player bullet.  Circular for hit detection.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Motion for Projectile {
    fn advance(&mut self) {
        self.position += self.velocity;
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub position: Vec2,
    /// Always zero; the owning formation's velocity moves the enemy.
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Enemy {
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Enemy {
            position,
            velocity: Vec2::ZERO,
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    /// Move by an imposed velocity (the formation's).
    pub fn advance_with(&mut self, velocity: Vec2) {
        self.position += velocity;
    }
}

/// A grid of enemies sharing one trajectory.
#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    pub position: Vec2,
    pub velocity: Vec2,
    /// `columns × column spacing` at construction.
    pub width: f32,
    /// Order carries no meaning; membership is all that matters.
    pub enemies: Vec<Enemy>,
}

impl Formation {
    /// Build a `rows × columns` grid with its top-left enemy at `origin`.
    pub fn grid(
        origin: Vec2,
        rows: usize,
        columns: usize,
        spacing: Vec2,
        enemy_size: Vec2,
        velocity: Vec2,
    ) -> Self {
        let mut enemies = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for col in 0..columns {
                let position = Vec2::new(
                    origin.x + col as f32 * spacing.x,
                    origin.y + row as f32 * spacing.y,
                );
                enemies.push(Enemy::new(position, enemy_size.x, enemy_size.y));
            }
        }
        Formation {
            position: origin,
            velocity,
            width: columns as f32 * spacing.x,
            enemies,
        }
    }

    /// Translate the formation and bounce it off the side edges.
    ///
    /// Returns `true` on the tick the horizontal direction flips.  When
    /// `edge_drop` is positive the formation is also pushed down by that
    /// amount for this tick only; `velocity.y` is left at zero afterwards.
    pub fn advance(&mut self, play_width: f32, edge_drop: f32) -> bool {
        self.position += self.velocity;
        self.velocity.y = 0.0;

        // Only the edge being approached can flip it.
        let past_left = self.position.x < 0.0 && self.velocity.x < 0.0;
        let past_right = self.position.x + self.width >= play_width && self.velocity.x > 0.0;
        let flipped = past_left || past_right;
        if flipped {
            self.velocity.x = -self.velocity.x;
            self.velocity.y = edge_drop;
        }
        flipped
    }

    /// The velocity enemies should move by this tick.
    pub fn enemy_velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Recompute `width` from the surviving enemies' horizontal span.
    pub fn shrink_to_enemies(&mut self, column_spacing: f32) {
        let min_x = self
            .enemies
            .iter()
            .map(|e| e.position.x)
            .fold(f32::INFINITY, f32::min);
        let max_x = self
            .enemies
            .iter()
            .map(|e| e.position.x)
            .fold(f32::NEG_INFINITY, f32::max);
        if min_x.is_finite() && max_x.is_finite() {
            self.position.x = min_x;
            self.width = max_x - min_x + column_spacing;
        }
    }
}

// ── Hazards ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HazardKind {
    /// Small, falls straight down.
    Egg,
    /// Large, drifts sideways and bounces off the side edges.
    Bomb,
}

/// Enemy fire.  Ends the game on contact with the player.
#[derive(Clone, Debug, PartialEq)]
pub struct Hazard {
    pub kind: HazardKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Hazard {
    /// Bombs reverse their horizontal drift when they touch a side edge.
    /// Eggs are unaffected.
    pub fn bounce(&mut self, play_width: f32) {
        if self.kind != HazardKind::Bomb {
            return;
        }
        let past_left = self.position.x - self.radius <= 0.0 && self.velocity.x < 0.0;
        let past_right = self.position.x + self.radius >= play_width && self.velocity.x > 0.0;
        if past_left || past_right {
            self.velocity.x = -self.velocity.x;
        }
    }
}

impl Motion for Hazard {
    fn advance(&mut self) {
        self.position += self.velocity;
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// May dip below zero on the last tick; clamp before drawing.
    pub opacity: f32,
    /// Subtracted from `opacity` every tick.
    pub fade: f32,
}

impl Motion for Particle {
    fn advance(&mut self) {
        self.position += self.velocity;
        self.opacity -= self.fade;
    }
}

// ── Game status ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Drawn but frozen.
    Paused,
    /// The player was hit; the death animation runs for `grace_left` more ticks.
    Dying { grace_left: u32 },
    /// Loop stopped, waiting for a restart.
    Over,
}

impl GameStatus {
    /// The loop keeps scheduling ticks.
    pub fn is_active(&self) -> bool {
        !matches!(self, GameStatus::Over)
    }

    /// A terminal hit has been registered.
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Dying { .. } | GameStatus::Over)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, GameStatus::Paused)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the frame loop mutates.  Cloneable so pure update functions
/// can return a new copy without touching the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub formations: Vec<Formation>,
    pub projectiles: Vec<Projectile>,
    pub hazards: Vec<Hazard>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Simulated ticks; frozen while paused or once the player is hit.
    pub frames: u64,
    pub status: GameStatus,
    pub width: f32,
    pub height: f32,
    /// Tick at which the next formation is due under periodic spawning.
    pub next_formation_at: u64,
}
