//! Runtime gameplay configuration loaded from a TOML file.
//!
//! [`GameConfig`] mirrors every value in [`crate::constants`].  Missing keys
//! fall back to the compiled defaults, so a minimal TOML can override just the
//! values you care about:
//!
//! ```toml
//! formation_speed = 12.0
//! formation_width = "shrink"
//! egg_interval = 60
//! ```

use std::path::Path;

use anyhow::{ensure, Context};
use serde::Deserialize;

use crate::constants::*;
use crate::geometry::Vec2;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "invaders.toml";

/// Whether a formation's cached width follows its surviving enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormationWidth {
    /// Width stays `columns × column_spacing` for the formation's lifetime.
    Fixed,
    /// Width is recomputed from the outermost survivors after every kill.
    Shrink,
}

/// When new formations appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormationSpawn {
    /// A new formation appears as soon as none are left.
    WhenEmpty,
    /// A new formation appears every `periodic_spawn_min..periodic_spawn_max`
    /// ticks regardless of how many are on screen.
    Periodic,
}

/// Glyphs used by the terminal renderer.  An empty string draws a filled
/// placeholder box of the entity's size instead.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Sprites {
    pub player: String,
    pub enemy: String,
    pub projectile: String,
    pub egg: String,
    pub bomb: String,
}

impl Default for Sprites {
    fn default() -> Self {
        Sprites {
            player: "/▲\\".to_string(),
            enemy: "«▼»".to_string(),
            projectile: "║".to_string(),
            egg: "o".to_string(),
            bomb: "●".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Play area ────────────────────────────────────────────────────────────
    pub play_width: f32,
    pub play_height: f32,
    pub tick_millis: u64,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_bottom_margin: f32,

    // ── Projectiles ──────────────────────────────────────────────────────────
    pub projectile_radius: f32,
    pub projectile_speed: f32,

    // ── Formation ────────────────────────────────────────────────────────────
    pub formation_origin: Vec2,
    pub column_spacing: f32,
    pub row_spacing: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub formation_min_columns: usize,
    pub formation_max_columns: usize,
    pub formation_min_rows: usize,
    pub formation_max_rows: usize,
    pub formation_speed: f32,
    pub formation_width: FormationWidth,
    pub formation_edge_drop: f32,
    pub formation_spawn: FormationSpawn,
    pub periodic_spawn_min: u64,
    pub periodic_spawn_max: u64,

    // ── Hazards ──────────────────────────────────────────────────────────────
    pub egg_radius: f32,
    pub egg_speed: f32,
    pub egg_interval: u64,
    pub bomb_radius: f32,
    pub bomb_fall_speed: f32,
    pub bomb_max_drift: f32,
    pub bomb_interval: u64,

    // ── Particles ────────────────────────────────────────────────────────────
    pub hit_particles: usize,
    pub death_particles: usize,
    pub particle_fade: f32,
    pub particle_max_speed: f32,
    pub particle_max_radius: f32,

    // ── Scoring & game over ──────────────────────────────────────────────────
    pub score_per_enemy: u32,
    pub grace_ticks: u32,

    // ── Rendering ────────────────────────────────────────────────────────────
    pub sprites: Sprites,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,
            tick_millis: TICK_MILLIS,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_speed: PROJECTILE_SPEED,
            formation_origin: Vec2::new(FORMATION_ORIGIN_X, FORMATION_ORIGIN_Y),
            column_spacing: COLUMN_SPACING,
            row_spacing: ROW_SPACING,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            formation_min_columns: FORMATION_MIN_COLUMNS,
            formation_max_columns: FORMATION_MAX_COLUMNS,
            formation_min_rows: FORMATION_MIN_ROWS,
            formation_max_rows: FORMATION_MAX_ROWS,
            formation_speed: FORMATION_SPEED,
            formation_width: FormationWidth::Fixed,
            formation_edge_drop: FORMATION_EDGE_DROP,
            formation_spawn: FormationSpawn::WhenEmpty,
            periodic_spawn_min: PERIODIC_SPAWN_MIN,
            periodic_spawn_max: PERIODIC_SPAWN_MAX,
            egg_radius: EGG_RADIUS,
            egg_speed: EGG_SPEED,
            egg_interval: EGG_INTERVAL,
            bomb_radius: BOMB_RADIUS,
            bomb_fall_speed: BOMB_FALL_SPEED,
            bomb_max_drift: BOMB_MAX_DRIFT,
            bomb_interval: BOMB_INTERVAL,
            hit_particles: HIT_PARTICLES,
            death_particles: DEATH_PARTICLES,
            particle_fade: PARTICLE_FADE,
            particle_max_speed: PARTICLE_MAX_SPEED,
            particle_max_radius: PARTICLE_MAX_RADIUS,
            score_per_enemy: SCORE_PER_ENEMY,
            grace_ticks: GRACE_TICKS,
            sprites: Sprites::default(),
        }
    }
}

impl GameConfig {
    /// Parse a TOML document; keys not present keep their defaults.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: GameConfig = toml::from_str(contents).context("invalid config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    /// Load `explicit` if given (failure is an error), otherwise
    /// [`DEFAULT_CONFIG_PATH`] if it exists, otherwise compiled defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            Self::load(default_path)
        } else {
            tracing::info!("no {DEFAULT_CONFIG_PATH} found; using compiled defaults");
            Ok(Self::default())
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.play_width > 0.0 && self.play_height > 0.0,
            "play area must be positive, got {}x{}",
            self.play_width,
            self.play_height
        );
        ensure!(self.tick_millis > 0, "tick_millis must be at least 1");
        ensure!(
            self.egg_interval > 0 && self.bomb_interval > 0,
            "hazard intervals must be at least 1 tick"
        );
        ensure!(
            self.formation_min_columns >= 1
                && self.formation_min_columns <= self.formation_max_columns,
            "formation column range {}..={} is empty",
            self.formation_min_columns,
            self.formation_max_columns
        );
        ensure!(
            self.formation_min_rows >= 1 && self.formation_min_rows <= self.formation_max_rows,
            "formation row range {}..={} is empty",
            self.formation_min_rows,
            self.formation_max_rows
        );
        ensure!(
            self.periodic_spawn_min >= 1 && self.periodic_spawn_min < self.periodic_spawn_max,
            "periodic spawn range {}..{} is empty",
            self.periodic_spawn_min,
            self.periodic_spawn_max
        );
        ensure!(self.particle_fade > 0.0, "particle_fade must be positive");
        ensure!(
            self.particle_max_speed > 0.0 && self.particle_max_radius > 0.0,
            "particle speed and radius must be positive"
        );
        ensure!(self.bomb_max_drift >= 1.0, "bomb_max_drift must be at least 1.0");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml("formation_speed = 12.0\negg_interval = 60\n").unwrap();
        assert_eq!(config.formation_speed, 12.0);
        assert_eq!(config.egg_interval, 60);
        assert_eq!(config.bomb_interval, BOMB_INTERVAL);
        assert_eq!(config.formation_width, FormationWidth::Fixed);
    }

    #[test]
    fn enums_and_nested_tables_parse() {
        let toml = r#"
            formation_width = "shrink"
            formation_spawn = "periodic"
            formation_origin = { x = 50.0, y = 20.0 }

            [sprites]
            enemy = "W"
        "#;
        let config = GameConfig::from_toml(toml).unwrap();
        assert_eq!(config.formation_width, FormationWidth::Shrink);
        assert_eq!(config.formation_spawn, FormationSpawn::Periodic);
        assert_eq!(config.formation_origin, Vec2::new(50.0, 20.0));
        assert_eq!(config.sprites.enemy, "W");
        assert_eq!(config.sprites.egg, Sprites::default().egg);
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(GameConfig::from_toml("egg_interval = 0").is_err());
    }

    #[test]
    fn empty_column_range_is_rejected() {
        let toml = "formation_min_columns = 6\nformation_max_columns = 2\n";
        assert!(GameConfig::from_toml(toml).is_err());
    }

    #[test]
    fn unknown_width_policy_is_rejected() {
        assert!(GameConfig::from_toml("formation_width = \"stretch\"").is_err());
    }
}
