use grid_invaders::compute::{bullet_hits_enemy, hazard_hits_player, spawn_player};
use grid_invaders::config::GameConfig;
use grid_invaders::entities::*;
use grid_invaders::geometry::{circle_overlaps_rect, Vec2};

fn enemy(x: f32, y: f32, w: f32, h: f32) -> Enemy {
    Enemy::new(Vec2::new(x, y), w, h)
}

fn bullet(x: f32, y: f32, r: f32) -> Projectile {
    Projectile {
        position: Vec2::new(x, y),
        velocity: Vec2::new(0.0, -15.0),
        radius: r,
    }
}

// ── Motion ────────────────────────────────────────────────────────────────────

#[test]
fn advance_adds_velocity_and_keeps_it() {
    let mut p = bullet(10.0, 100.0, 4.0);
    p.velocity = Vec2::new(1.5, -15.0);
    p.advance();
    assert_eq!(p.position, Vec2::new(11.5, 85.0));
    assert_eq!(p.velocity, Vec2::new(1.5, -15.0));

    let mut h = Hazard {
        kind: HazardKind::Bomb,
        position: Vec2::new(50.0, 50.0),
        velocity: Vec2::new(-3.0, 3.0),
        radius: 24.0,
    };
    h.advance();
    assert_eq!(h.position, Vec2::new(47.0, 53.0));
    assert_eq!(h.velocity, Vec2::new(-3.0, 3.0));

    let mut player = spawn_player(&GameConfig::default());
    let start = player.position;
    player.velocity = Vec2::new(10.0, -10.0);
    player.advance();
    assert_eq!(player.position, start + Vec2::new(10.0, -10.0));
    assert_eq!(player.velocity, Vec2::new(10.0, -10.0));
}

#[test]
fn particle_advance_moves_and_fades() {
    let mut p = Particle {
        position: Vec2::new(5.0, 5.0),
        velocity: Vec2::new(1.0, -1.0),
        radius: 2.0,
        opacity: 1.0,
        fade: 0.25,
    };
    p.advance();
    assert_eq!(p.position, Vec2::new(6.0, 4.0));
    assert_eq!(p.velocity, Vec2::new(1.0, -1.0));
    assert_eq!(p.opacity, 0.75);
}

#[test]
fn enemy_moves_by_imposed_velocity_only() {
    let mut e = enemy(10.0, 10.0, 70.0, 50.0);
    e.advance_with(Vec2::new(8.0, 0.0));
    assert_eq!(e.position, Vec2::new(18.0, 10.0));
    assert_eq!(e.velocity, Vec2::ZERO);
}

#[test]
fn player_clamp_keeps_lower_half() {
    let mut player = spawn_player(&GameConfig::default());
    player.position = Vec2::new(-50.0, 10.0);
    player.clamp_to(1280.0, 720.0);
    assert_eq!(player.position, Vec2::new(0.0, 360.0));

    player.position = Vec2::new(5000.0, 5000.0);
    player.clamp_to(1280.0, 720.0);
    assert_eq!(player.position, Vec2::new(1200.0, 660.0));
}

// ── Formation ────────────────────────────────────────────────────────────────

#[test]
fn grid_lays_out_rows_and_columns() {
    let f = Formation::grid(
        Vec2::new(10.0, 40.0),
        2,
        3,
        Vec2::new(105.0, 70.0),
        Vec2::new(70.0, 50.0),
        Vec2::new(8.0, 0.0),
    );
    assert_eq!(f.enemies.len(), 6);
    assert_eq!(f.width, 315.0);
    assert_eq!(f.enemies[0].position, Vec2::new(10.0, 40.0));
    assert_eq!(f.enemies[2].position, Vec2::new(220.0, 40.0));
    assert_eq!(f.enemies[5].position, Vec2::new(220.0, 110.0));
}

#[test]
fn formation_flips_once_per_edge() {
    let mut f = Formation::grid(
        Vec2::new(10.0, 40.0),
        1,
        3,
        Vec2::new(105.0, 70.0),
        Vec2::new(70.0, 50.0),
        Vec2::new(8.0, 0.0),
    );
    let mut flips = Vec::new();
    for k in 1..=300u32 {
        if f.advance(1280.0, 0.0) {
            flips.push(k);
        }
    }
    // Right edge at tick 120 (970 + 315 >= 1280), then back to x < 0.
    assert_eq!(flips[0], 120);
    assert_eq!(flips[1], 120 + 122); // 970 - 8·122 = -6
    assert_eq!(flips.len(), 2);
}

#[test]
fn formation_past_edge_after_flip_does_not_flip_back() {
    let mut f = Formation {
        position: Vec2::new(1200.0, 0.0),
        velocity: Vec2::new(8.0, 0.0),
        width: 315.0,
        enemies: vec![enemy(1200.0, 0.0, 70.0, 50.0)],
    };
    assert!(f.advance(1280.0, 0.0));
    assert!(!f.advance(1280.0, 0.0)); // still past the edge, but heading away
    assert_eq!(f.velocity.x, -8.0);
}

#[test]
fn bomb_bounces_off_side_edges_but_egg_does_not() {
    let mut bomb = Hazard {
        kind: HazardKind::Bomb,
        position: Vec2::new(1260.0, 100.0),
        velocity: Vec2::new(4.0, 3.0),
        radius: 24.0,
    };
    bomb.bounce(1280.0);
    assert_eq!(bomb.velocity.x, -4.0);
    bomb.bounce(1280.0);
    assert_eq!(bomb.velocity.x, -4.0);

    let mut egg = Hazard {
        kind: HazardKind::Egg,
        position: Vec2::new(1279.0, 100.0),
        velocity: Vec2::new(1.0, 5.0),
        radius: 6.0,
    };
    egg.bounce(1280.0);
    assert_eq!(egg.velocity.x, 1.0);
}

// ── Collision predicates ─────────────────────────────────────────────────────

#[test]
fn circle_centred_in_rect_always_hits() {
    for (w, h) in [(0.5, 0.5), (1.0, 200.0), (70.0, 50.0), (1000.0, 3.0)] {
        let e = enemy(20.0, 30.0, w, h);
        let b = bullet(20.0 + w / 2.0, 30.0 + h / 2.0, 4.0);
        assert!(bullet_hits_enemy(&b, &e));
    }
}

#[test]
fn separated_shapes_never_hit() {
    let e = enemy(100.0, 100.0, 70.0, 50.0);
    // Beyond the sum of extents on x only, then on y only.
    assert!(!bullet_hits_enemy(&bullet(100.0 + 70.0 + 4.1, 125.0, 4.0), &e));
    assert!(!bullet_hits_enemy(&bullet(100.0 - 4.1, 125.0, 4.0), &e));
    assert!(!bullet_hits_enemy(&bullet(135.0, 100.0 + 50.0 + 4.1, 4.0), &e));
    assert!(!bullet_hits_enemy(&bullet(135.0, 100.0 - 4.1, 4.0), &e));
}

#[test]
fn touching_edges_count_as_hit() {
    let e = enemy(100.0, 100.0, 70.0, 50.0);
    assert!(bullet_hits_enemy(&bullet(174.0, 125.0, 4.0), &e));
    assert!(bullet_hits_enemy(&bullet(135.0, 96.0, 4.0), &e));
}

#[test]
fn predicates_agree_under_role_swap() {
    let shapes = [
        (Vec2::new(135.0, 125.0), 4.0, Vec2::new(100.0, 100.0), Vec2::new(70.0, 50.0)),
        (Vec2::new(90.0, 125.0), 12.0, Vec2::new(100.0, 100.0), Vec2::new(70.0, 50.0)),
        (Vec2::new(89.0, 125.0), 10.0, Vec2::new(100.0, 100.0), Vec2::new(70.0, 50.0)),
        (Vec2::new(500.0, 0.0), 30.0, Vec2::new(0.0, 0.0), Vec2::new(80.0, 60.0)),
    ];
    for (centre, radius, rect_pos, rect_size) in shapes {
        let b = Projectile {
            position: centre,
            velocity: Vec2::ZERO,
            radius,
        };
        let e = Enemy::new(rect_pos, rect_size.x, rect_size.y);
        let h = Hazard {
            kind: HazardKind::Egg,
            position: centre,
            velocity: Vec2::ZERO,
            radius,
        };
        let mut p = spawn_player(&GameConfig::default());
        p.position = rect_pos;
        p.width = rect_size.x;
        p.height = rect_size.y;

        let expected = circle_overlaps_rect(centre, radius, rect_pos, rect_size);
        assert_eq!(bullet_hits_enemy(&b, &e), expected);
        assert_eq!(hazard_hits_player(&h, &p), expected);
    }
}

// ── Status flags ─────────────────────────────────────────────────────────────

#[test]
fn status_flags() {
    assert!(GameStatus::Playing.is_active());
    assert!(!GameStatus::Playing.is_over());
    assert!(GameStatus::Paused.is_paused());
    assert!(GameStatus::Paused.is_active());
    assert!(GameStatus::Dying { grace_left: 1 }.is_over());
    assert!(GameStatus::Dying { grace_left: 1 }.is_active());
    assert!(GameStatus::Over.is_over());
    assert!(!GameStatus::Over.is_active());
}

#[test]
fn game_state_clone_is_independent() {
    let config = GameConfig::default();
    let original = grid_invaders::compute::init_state(&config);
    let mut cloned = original.clone();

    cloned.player.position.x = 99.0;
    cloned.score = 999;
    cloned
        .formations
        .push(Formation::grid(Vec2::ZERO, 1, 1, Vec2::new(105.0, 70.0), Vec2::new(70.0, 50.0), Vec2::ZERO));

    assert_eq!(original.player.position.x, 600.0);
    assert_eq!(original.score, 0);
    assert!(original.formations.is_empty());
}
