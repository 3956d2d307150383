/// Compiled gameplay defaults.
///
/// `GameConfig::default()` is built from these, and `invaders.toml` can
/// override any subset of them.  All distances are world units, all speeds
/// are world units per tick, all intervals are ticks.

// ── Play area ────────────────────────────────────────────────────────────────

pub const PLAY_WIDTH: f32 = 1280.0;
pub const PLAY_HEIGHT: f32 = 720.0;

/// ≈60 ticks per second; every speed below is tied to this rate.
pub const TICK_MILLIS: u64 = 16;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 80.0;
pub const PLAYER_HEIGHT: f32 = 60.0;
pub const PLAYER_SPEED: f32 = 10.0;
/// Gap kept between the ship and the bottom edge at spawn.
pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

// ── Player projectiles ───────────────────────────────────────────────────────

pub const PROJECTILE_RADIUS: f32 = 4.0;
pub const PROJECTILE_SPEED: f32 = 15.0;

// ── Enemy formation ──────────────────────────────────────────────────────────

pub const FORMATION_ORIGIN_X: f32 = 10.0;
pub const FORMATION_ORIGIN_Y: f32 = 40.0;
pub const COLUMN_SPACING: f32 = 105.0;
pub const ROW_SPACING: f32 = 70.0;
pub const ENEMY_WIDTH: f32 = 70.0;
pub const ENEMY_HEIGHT: f32 = 50.0;
/// Inclusive bounds for the random grid size.
pub const FORMATION_MIN_COLUMNS: usize = 3;
pub const FORMATION_MAX_COLUMNS: usize = 8;
pub const FORMATION_MIN_ROWS: usize = 1;
pub const FORMATION_MAX_ROWS: usize = 3;
pub const FORMATION_SPEED: f32 = 8.0;
/// Downward nudge applied on the tick the formation bounces.  Zero disables it.
pub const FORMATION_EDGE_DROP: f32 = 0.0;
/// Bounds for the delay between formations when spawning periodically.
pub const PERIODIC_SPAWN_MIN: u64 = 100;
pub const PERIODIC_SPAWN_MAX: u64 = 600;

// ── Hazards ──────────────────────────────────────────────────────────────────

pub const EGG_RADIUS: f32 = 6.0;
pub const EGG_SPEED: f32 = 5.0;
pub const EGG_INTERVAL: u64 = 100;

pub const BOMB_RADIUS: f32 = 24.0;
pub const BOMB_FALL_SPEED: f32 = 3.0;
/// Horizontal speed is drawn from `1.0..=BOMB_MAX_DRIFT`, random sign.
pub const BOMB_MAX_DRIFT: f32 = 4.0;
pub const BOMB_INTERVAL: u64 = 500;

// ── Particles ────────────────────────────────────────────────────────────────

pub const HIT_PARTICLES: usize = 15;
pub const DEATH_PARTICLES: usize = 40;
pub const PARTICLE_FADE: f32 = 0.02;
pub const PARTICLE_MAX_SPEED: f32 = 2.0;
pub const PARTICLE_MAX_RADIUS: f32 = 3.0;
/// Opacity at or below this counts as fully faded.
pub const OPACITY_FLOOR: f32 = 1e-4;

// ── Scoring & game over ──────────────────────────────────────────────────────

pub const SCORE_PER_ENEMY: u32 = 100;
/// ≈2 s of death animation before the game-over screen.
pub const GRACE_TICKS: u32 = 120;
