/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (plus the config and, where needed, an RNG handle) and returns
/// a brand-new `GameState`.  Side effects are limited to the injected RNG and
/// log events.

use rand::Rng;
use tracing::{debug, info};

use crate::config::{FormationSpawn, FormationWidth, GameConfig};
use crate::constants::OPACITY_FLOOR;
use crate::entities::{
    Enemy, Formation, GameState, GameStatus, Hazard, HazardKind, Motion, Particle, Player,
    Projectile,
};
use crate::geometry::{circle_overlaps_rect, Vec2};
use crate::input::KeySnapshot;

// ── Collision predicates ─────────────────────────────────────────────────────

pub fn bullet_hits_enemy(projectile: &Projectile, enemy: &Enemy) -> bool {
    circle_overlaps_rect(
        projectile.position,
        projectile.radius,
        enemy.position,
        enemy.size(),
    )
}

pub fn hazard_hits_player(hazard: &Hazard, player: &Player) -> bool {
    circle_overlaps_rect(hazard.position, hazard.radius, player.position, player.size())
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh ship centred horizontally just above the bottom edge.
pub fn spawn_player(config: &GameConfig) -> Player {
    Player {
        position: Vec2::new(
            config.play_width / 2.0 - config.player_width / 2.0,
            config.play_height - config.player_height - config.player_bottom_margin,
        ),
        velocity: Vec2::ZERO,
        width: config.player_width,
        height: config.player_height,
        speed: config.player_speed,
        opacity: 1.0,
    }
}

/// A random-sized grid at the configured origin, heading right.
pub fn spawn_formation(config: &GameConfig, rng: &mut impl Rng) -> Formation {
    let rows = rng.gen_range(config.formation_min_rows..=config.formation_max_rows);
    let columns = rng.gen_range(config.formation_min_columns..=config.formation_max_columns);
    debug!(rows, columns, "spawning formation");
    Formation::grid(
        config.formation_origin,
        rows,
        columns,
        Vec2::new(config.column_spacing, config.row_spacing),
        Vec2::new(config.enemy_width, config.enemy_height),
        Vec2::new(config.formation_speed, 0.0),
    )
}

/// A burst of `count` particles around `origin`, each fully opaque.
pub fn spawn_particles(
    origin: Vec2,
    count: usize,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            position: origin,
            velocity: Vec2::new(
                rng.gen_range(-1.0..=1.0) * config.particle_max_speed,
                rng.gen_range(-1.0..=1.0) * config.particle_max_speed,
            ),
            radius: rng.gen::<f32>() * config.particle_max_radius,
            opacity: 1.0,
            fade: config.particle_fade,
        })
        .collect()
}

/// A hazard dropped from the bottom-centre of `enemy`.
pub fn spawn_hazard(
    kind: HazardKind,
    enemy: &Enemy,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Hazard {
    let origin = Vec2::new(
        enemy.position.x + enemy.width / 2.0,
        enemy.position.y + enemy.height,
    );
    let (velocity, radius) = match kind {
        HazardKind::Egg => (Vec2::new(0.0, config.egg_speed), config.egg_radius),
        HazardKind::Bomb => {
            let drift = rng.gen_range(1.0..=config.bomb_max_drift);
            let drift = if rng.gen_bool(0.5) { drift } else { -drift };
            (Vec2::new(drift, config.bomb_fall_speed), config.bomb_radius)
        }
    };
    debug!(?kind, x = origin.x, y = origin.y, "enemy fired");
    Hazard {
        kind,
        position: origin,
        velocity,
        radius,
    }
}

/// Build the initial game state: player in place, nothing else on screen.
pub fn init_state(config: &GameConfig) -> GameState {
    GameState {
        player: spawn_player(config),
        formations: Vec::new(),
        projectiles: Vec::new(),
        hazards: Vec::new(),
        particles: Vec::new(),
        score: 0,
        frames: 0,
        status: GameStatus::Playing,
        width: config.play_width,
        height: config.play_height,
        next_formation_at: 0,
    }
}

/// Initial state plus one formation, ready for the first tick.
pub fn new_game(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let mut state = init_state(config);
    state.formations.push(spawn_formation(config, rng));
    state.next_formation_at = next_periodic_spawn(0, config, rng);
    state
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire a projectile from the top-centre of the ship.  Ignored unless playing.
pub fn fire(state: &GameState, config: &GameConfig) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let p = &state.player;
    let mut projectiles = state.projectiles.clone();
    projectiles.push(Projectile {
        position: Vec2::new(p.position.x + p.width / 2.0, p.position.y),
        velocity: Vec2::new(0.0, -config.projectile_speed),
        radius: config.projectile_radius,
    });
    GameState {
        projectiles,
        ..state.clone()
    }
}

/// Playing ↔ Paused.  Any other status is left alone.
pub fn toggle_pause(state: &GameState) -> GameState {
    let status = match state.status {
        GameStatus::Playing => GameStatus::Paused,
        GameStatus::Paused => GameStatus::Playing,
        other => other,
    };
    if status != state.status {
        debug!(?status, "pause toggled");
    }
    GameState {
        status,
        ..state.clone()
    }
}

/// Start over once the game-over screen is up.  Ignored at any other time.
pub fn restart(state: &GameState, config: &GameConfig, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Over {
        return state.clone();
    }
    info!(final_score = state.score, "restarting");
    new_game(config, rng)
}

/// Derive the ship's velocity from the held keys.  A direction only applies
/// while the ship can still move that way.
pub fn apply_input(player: &Player, keys: &KeySnapshot, play_width: f32, play_height: f32) -> Vec2 {
    let pos = player.position;
    let x = if keys.left && pos.x > 0.0 {
        -player.speed
    } else if keys.right && pos.x + player.width < play_width {
        player.speed
    } else {
        0.0
    };
    let y = if keys.up && pos.y > play_height / 2.0 {
        -player.speed
    } else if keys.down && pos.y + player.height < play_height {
        player.speed
    } else {
        0.0
    };
    Vec2::new(x, y)
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// `keys` is read once, as a whole, at the input step.
pub fn tick(
    state: &GameState,
    keys: &KeySnapshot,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> GameState {
    match state.status {
        GameStatus::Paused | GameStatus::Over => state.clone(),
        GameStatus::Dying { grace_left } => tick_dying(state, grace_left),
        GameStatus::Playing => tick_playing(state, keys, config, rng),
    }
}

/// Only the death animation runs; everything else is frozen.
fn tick_dying(state: &GameState, grace_left: u32) -> GameState {
    let grace_left = grace_left.saturating_sub(1);
    let status = if grace_left == 0 {
        info!(score = state.score, frames = state.frames, "game over");
        GameStatus::Over
    } else {
        GameStatus::Dying { grace_left }
    };
    GameState {
        particles: advance_particles(&state.particles),
        status,
        ..state.clone()
    }
}

fn tick_playing(
    state: &GameState,
    keys: &KeySnapshot,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> GameState {
    let frames = state.frames;
    let mut status = state.status;
    let mut score = state.score;
    let mut next_formation_at = state.next_formation_at;

    // ── 1. Input → player velocity, then move ────────────────────────────────
    let mut player = state.player.clone();
    player.velocity = apply_input(&player, keys, state.width, state.height);
    player.advance();
    player.clamp_to(state.width, state.height);

    // ── 2. Particles ─────────────────────────────────────────────────────────
    let mut particles = advance_particles(&state.particles);

    // ── 3. Keep enemies coming ───────────────────────────────────────────────
    let mut formations = state.formations.clone();
    match config.formation_spawn {
        FormationSpawn::WhenEmpty => {
            if formations.is_empty() {
                formations.push(spawn_formation(config, rng));
            }
        }
        FormationSpawn::Periodic => {
            if frames >= next_formation_at {
                formations.push(spawn_formation(config, rng));
                next_formation_at = next_periodic_spawn(frames, config, rng);
            }
        }
    }

    // ── 4. Formations: move, fire, resolve hits ──────────────────────────────
    let mut hazards = state.hazards.clone();
    let projectiles = state.projectiles.clone();
    let mut used_projectiles = vec![false; projectiles.len()];

    let formations: Vec<Formation> = formations
        .into_iter()
        .filter_map(|mut formation| {
            formation.advance(state.width, config.formation_edge_drop);

            if !formation.enemies.is_empty() {
                if frames % config.egg_interval == 0 {
                    let shooter = pick_enemy(&formation, rng);
                    hazards.push(spawn_hazard(HazardKind::Egg, shooter, config, rng));
                }
                if frames % config.bomb_interval == 0 {
                    let shooter = pick_enemy(&formation, rng);
                    hazards.push(spawn_hazard(HazardKind::Bomb, shooter, config, rng));
                }
            }

            let velocity = formation.enemy_velocity();
            let mut killed = vec![false; formation.enemies.len()];
            for (ei, enemy) in formation.enemies.iter_mut().enumerate().rev() {
                enemy.advance_with(velocity);

                let hit = (0..projectiles.len()).rev().find(|&pi| {
                    !used_projectiles[pi] && bullet_hits_enemy(&projectiles[pi], enemy)
                });
                if let Some(pi) = hit {
                    used_projectiles[pi] = true;
                    killed[ei] = true;
                    score += config.score_per_enemy;
                    particles.extend(spawn_particles(
                        enemy.center(),
                        config.hit_particles,
                        config,
                        rng,
                    ));
                }
            }

            let any_killed = killed.iter().any(|&k| k);
            formation.enemies = formation
                .enemies
                .into_iter()
                .zip(killed)
                .filter(|(_, dead)| !dead)
                .map(|(enemy, _)| enemy)
                .collect();

            if formation.enemies.is_empty() {
                debug!("formation cleared");
                return None;
            }
            if any_killed && config.formation_width == FormationWidth::Shrink {
                formation.shrink_to_enemies(config.column_spacing);
            }
            Some(formation)
        })
        .collect();

    // ── 5. Projectiles: move, drop those past the top edge ───────────────────
    let projectiles: Vec<Projectile> = projectiles
        .into_iter()
        .zip(used_projectiles)
        .filter(|(_, used)| !used)
        .filter_map(|(mut projectile, _)| {
            projectile.advance();
            (projectile.position.y > 0.0).then_some(projectile)
        })
        .collect();

    // ── 6. Hazards: move, hit the player, then drop those past the bottom ───
    let mut remaining_hazards = Vec::with_capacity(hazards.len());
    for mut hazard in hazards {
        hazard.advance();
        hazard.bounce(state.width);

        if status == GameStatus::Playing && hazard_hits_player(&hazard, &player) {
            info!(score, frames, kind = ?hazard.kind, "player hit");
            player.opacity = 0.0;
            particles.extend(spawn_particles(
                player.center(),
                config.death_particles,
                config,
                rng,
            ));
            status = GameStatus::Dying {
                grace_left: config.grace_ticks,
            };
            continue;
        }
        if hazard.position.y - hazard.radius <= state.height {
            remaining_hazards.push(hazard);
        }
    }

    GameState {
        player,
        formations,
        projectiles,
        hazards: remaining_hazards,
        particles,
        score,
        frames: frames + 1,
        status,
        next_formation_at,
        ..state.clone()
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Move and fade every particle; drop the ones that have faded out.
pub fn advance_particles(particles: &[Particle]) -> Vec<Particle> {
    particles
        .iter()
        .cloned()
        .filter_map(|mut particle| {
            particle.advance();
            (particle.opacity > OPACITY_FLOOR).then_some(particle)
        })
        .collect()
}

/// Uniformly random live enemy.  Callers guarantee the formation is not empty.
fn pick_enemy<'a>(formation: &'a Formation, rng: &mut impl Rng) -> &'a Enemy {
    &formation.enemies[rng.gen_range(0..formation.enemies.len())]
}

fn next_periodic_spawn(frames: u64, config: &GameConfig, rng: &mut impl Rng) -> u64 {
    frames + rng.gen_range(config.periodic_spawn_min..config.periodic_spawn_max)
}
