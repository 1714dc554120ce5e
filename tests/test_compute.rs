use gesture_shooter::compute::*;
use gesture_shooter::config::GameConfig;
use gesture_shooter::entities::*;
use gesture_shooter::gesture::FireControl;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    init_state(GameConfig::default())
}

/// A stationary target so distances and positions stay exact in assertions.
fn make_target(x: f32, y: f32, size: f32) -> Target {
    Target {
        x,
        y,
        size,
        speed: 0.0,
        drift: 0.0,
        color: Rgb(255, 255, 255),
        shape: Shape::Circle,
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> FireControl {
    FireControl::default()
}

fn fire_at(x: f32, y: f32) -> FireControl {
    FireControl {
        aim: Some(AimPoint { x, y }),
        fired: true,
    }
}

/// Targets placed by tests, excluding anything the Bernoulli trial may have
/// spawned below the bottom edge (fresh spawns always sit above y = 700).
fn placed_targets(state: &GameState) -> Vec<&Target> {
    state.targets.iter().filter(|t| t.y < 700.0).collect()
}

// ── Difficulty curve ──────────────────────────────────────────────────────────

#[test]
fn difficulty_formula() {
    assert_eq!(difficulty_for(0), 1.0);
    assert!((difficulty_for(190) - 1.95).abs() < 1e-6);
    assert!((difficulty_for(400) - 3.0).abs() < 1e-6);
}

#[test]
fn spawn_probability_formula_and_cap() {
    assert_eq!(spawn_probability_for(0), 0.03);
    assert!((spawn_probability_for(50) - 0.08).abs() < 1e-12);
    assert_eq!(spawn_probability_for(190), 0.12); // capped
    assert_eq!(spawn_probability_for(10_000), 0.12);
}

#[test]
fn difficulty_and_probability_non_decreasing() {
    let mut prev_d = 0.0f32;
    let mut prev_p = 0.0f64;
    for score in (0..3000).step_by(7) {
        let d = difficulty_for(score);
        let p = spawn_probability_for(score);
        assert!(d >= prev_d);
        assert!(p >= prev_p);
        prev_d = d;
        prev_p = p;
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_defaults() {
    let s = make_state();
    assert!(s.targets.is_empty());
    assert!(s.particles.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.lives, 5);
    assert_eq!(s.combo, 1);
    assert_eq!(s.spawn_probability, 0.03);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.frame, 0);
}

// ── spawn_target ──────────────────────────────────────────────────────────────

#[test]
fn spawn_target_randomizes_within_ranges() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let t = spawn_target(&config, 1.0, &mut rng);
        assert!(t.x >= 100.0 && t.x < config.world_width - 100.0);
        assert!(t.y >= config.world_height + 50.0 && t.y < config.world_height + 200.0);
        assert!(t.size >= 25.0 && t.size < 50.0);
        assert!(t.speed >= 3.0 && t.speed < 5.0);
        assert!(t.drift >= -1.0 && t.drift < 1.0);
    }
}

#[test]
fn spawn_target_speed_scales_with_difficulty() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let t = spawn_target(&config, 2.0, &mut rng);
        assert!(t.speed >= 6.0 && t.speed < 10.0);
    }
}

#[test]
fn tick_eventually_spawns_at_capped_probability() {
    let mut s = make_state();
    s.score = 190; // probability pinned at 0.12
    let mut rng = seeded_rng();
    let mut spawned = false;
    for i in 0..300 {
        s = tick(&s, &idle(), i as f64 * 0.033, &mut rng);
        if !s.targets.is_empty() {
            spawned = true;
            break;
        }
    }
    assert!(spawned);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn tick_moves_target_up_and_drifts() {
    let mut s = make_state();
    s.targets.push(Target {
        speed: 4.0,
        drift: 0.5,
        ..make_target(600.0, 400.0, 30.0)
    });
    let s2 = tick(&s, &idle(), 0.1, &mut seeded_rng());
    let placed = placed_targets(&s2);
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].y, 396.0); // y -= speed
    assert_eq!(placed[0].x, 601.0); // x += drift × 2
}

#[test]
fn tick_increments_frame() {
    let mut s = make_state();
    s.frame = 7;
    let s2 = tick(&s, &idle(), 0.1, &mut seeded_rng());
    assert_eq!(s2.frame, 8);
}

#[test]
fn target_speed_is_frozen_after_spawn() {
    // Raising the score mid-flight must not re-scale an existing target.
    let mut s = make_state();
    s.targets.push(Target {
        speed: 4.0,
        ..make_target(600.0, 400.0, 30.0)
    });
    s.score = 1000;
    let s2 = tick(&s, &idle(), 0.1, &mut seeded_rng());
    assert_eq!(placed_targets(&s2)[0].speed, 4.0);
}

// ── Escapes (miss penalty) ────────────────────────────────────────────────────

#[test]
fn escaped_target_costs_a_life_and_resets_combo() {
    let mut s = make_state();
    s.combo = 4;
    s.last_hit = 9.0; // within the combo window at now = 10.0
    s.targets.push(Target {
        speed: 2.0,
        ..make_target(600.0, -59.0, 30.0) // moves to -61, past the line
    });
    let s2 = tick(&s, &idle(), 10.0, &mut seeded_rng());
    assert!(placed_targets(&s2).is_empty());
    assert_eq!(s2.lives, 4);
    assert_eq!(s2.combo, 1);
}

#[test]
fn target_at_escape_boundary_is_kept() {
    let mut s = make_state();
    s.targets.push(make_target(600.0, -60.0, 30.0)); // not < -60
    let s2 = tick(&s, &idle(), 0.1, &mut seeded_rng());
    assert_eq!(s2.lives, 5);
    // Still tracked even though it sits above the visible area
    assert_eq!(s2.targets.iter().filter(|t| t.y <= -60.0).count(), 1);
}

#[test]
fn two_escapes_in_one_frame_cost_two_lives() {
    let mut s = make_state();
    s.targets.push(make_target(300.0, -61.0, 30.0));
    s.targets.push(make_target(900.0, -75.0, 30.0));
    let s2 = tick(&s, &idle(), 0.1, &mut seeded_rng());
    assert_eq!(s2.lives, 3);
}

// ── Hits & scoring ────────────────────────────────────────────────────────────

#[test]
fn hit_scores_ten_times_combo_and_increments() {
    // Size 30 at distance 20: well inside size + padding (55).
    let mut s = make_state();
    s.targets.push(make_target(620.0, 400.0, 30.0));
    let s2 = tick(&s, &fire_at(600.0, 400.0), 10.0, &mut seeded_rng());
    assert!(placed_targets(&s2).is_empty());
    assert_eq!(s2.score, 10);
    assert_eq!(s2.combo, 2);
    assert_eq!(s2.last_hit, 10.0);
    assert_eq!(s2.last_fire, 10.0);
}

#[test]
fn hit_requires_distance_under_size_plus_padding() {
    // size 30 + padding 25 = 55: distance 56 misses, 54 hits.
    let mut s = make_state();
    s.targets.push(make_target(656.0, 400.0, 30.0));
    let s2 = tick(&s, &fire_at(600.0, 400.0), 10.0, &mut seeded_rng());
    assert_eq!(placed_targets(&s2).len(), 1);
    assert_eq!(s2.score, 0);

    let mut s = make_state();
    s.targets.push(make_target(654.0, 400.0, 30.0));
    let s2 = tick(&s, &fire_at(600.0, 400.0), 10.0, &mut seeded_rng());
    assert!(placed_targets(&s2).is_empty());
    assert_eq!(s2.score, 10);
}

#[test]
fn hit_bursts_particles_at_target() {
    let mut s = make_state();
    s.targets.push(make_target(600.0, 400.0, 30.0));
    let s2 = tick(&s, &fire_at(600.0, 400.0), 10.0, &mut seeded_rng());
    assert_eq!(s2.particles.len(), 25);
    for p in &s2.particles {
        // One step of drift from the burst origin
        assert!((p.x - 600.0).abs() <= 5.0);
        assert!((p.y - 400.0).abs() <= 5.0);
        assert!(p.life >= 14 && p.life <= 24); // already aged one tick
        assert!(p.vx >= -5.0 && p.vx < 5.0);
        assert!(p.vy >= -5.0 && p.vy < 5.0);
    }
}

#[test]
fn multi_hit_frame_scores_sequentially() {
    // Both targets overlap the aim point; they are removed in order and the
    // combo grows between them: 10×1 then 10×2.
    let mut s = make_state();
    s.targets.push(make_target(600.0, 400.0, 30.0));
    s.targets.push(make_target(620.0, 400.0, 30.0));
    let s2 = tick(&s, &fire_at(610.0, 400.0), 10.0, &mut seeded_rng());
    assert!(placed_targets(&s2).is_empty());
    assert_eq!(s2.score, 30);
    assert_eq!(s2.combo, 3);
    assert_eq!(s2.particles.len(), 50);
}

#[test]
fn fired_shot_that_hits_nothing_has_no_penalty() {
    let mut s = make_state();
    s.targets.push(make_target(600.0, 400.0, 30.0));
    let s2 = tick(&s, &fire_at(100.0, 100.0), 10.0, &mut seeded_rng());
    assert_eq!(placed_targets(&s2).len(), 1);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.lives, 5);
    assert_eq!(s2.last_fire, 10.0); // the shot itself is still recorded
    assert_eq!(s2.last_hit, 0.0);
}

#[test]
fn escape_applies_before_hit_scoring() {
    // One target escapes and one is hit in the same frame: the escape resets
    // the combo first, so the hit scores from combo 1.
    let mut s = make_state();
    s.combo = 5;
    s.last_hit = 9.9;
    s.targets.push(make_target(300.0, -61.0, 30.0));
    s.targets.push(make_target(600.0, 400.0, 30.0));
    let s2 = tick(&s, &fire_at(600.0, 400.0), 10.0, &mut seeded_rng());
    assert_eq!(s2.lives, 4);
    assert_eq!(s2.score, 10); // 10 × 1, not 10 × 5
    assert_eq!(s2.combo, 2);
}

// ── Combo decay ───────────────────────────────────────────────────────────────

#[test]
fn combo_decays_after_window() {
    let mut s = make_state();
    s.combo = 5;
    s.last_hit = 8.0;
    let s2 = tick(&s, &idle(), 10.0, &mut seeded_rng()); // 2.0 s > 1.5 s
    assert_eq!(s2.combo, 1);
}

#[test]
fn combo_survives_within_window() {
    let mut s = make_state();
    s.combo = 5;
    s.last_hit = 9.0;
    let s2 = tick(&s, &idle(), 10.0, &mut seeded_rng()); // 1.0 s < 1.5 s
    assert_eq!(s2.combo, 5);
}

#[test]
fn combo_window_boundary_is_exclusive() {
    let mut s = make_state();
    s.combo = 5;
    s.last_hit = 8.5;
    let s2 = tick(&s, &idle(), 10.0, &mut seeded_rng()); // exactly 1.5 s
    assert_eq!(s2.combo, 5);
}

#[test]
fn hit_refreshes_window_in_same_tick() {
    let mut s = make_state();
    s.last_hit = 0.0; // stale
    s.targets.push(make_target(600.0, 400.0, 30.0));
    let s2 = tick(&s, &fire_at(600.0, 400.0), 100.0, &mut seeded_rng());
    assert_eq!(s2.combo, 2); // not decayed back to 1
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn zero_lives_goes_terminal_on_next_tick() {
    let mut s = make_state();
    s.lives = 1;
    s.targets.push(make_target(600.0, -61.0, 30.0));
    let s2 = tick(&s, &idle(), 0.1, &mut seeded_rng());
    assert_eq!(s2.lives, 0);
    assert_eq!(s2.status, GameStatus::Playing); // checked at top of next tick
    let s3 = tick(&s2, &idle(), 0.2, &mut seeded_rng());
    assert_eq!(s3.status, GameStatus::GameOver);
}

#[test]
fn terminal_state_freezes_targets_and_stops_spawning() {
    let mut s = make_state();
    s.lives = 0;
    s.score = 190; // would otherwise spawn at the capped probability
    s.targets.push(Target {
        speed: 5.0,
        ..make_target(600.0, 400.0, 30.0)
    });
    let mut rng = seeded_rng();
    for i in 0..100 {
        s = tick(&s, &idle(), i as f64 * 0.033, &mut rng);
    }
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.targets.len(), 1);
    assert_eq!(s.targets[0].y, 400.0); // frozen in place
}

#[test]
fn terminal_state_ignores_fire_events() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.targets.push(make_target(600.0, 400.0, 30.0));
    let s2 = tick(&s, &fire_at(600.0, 400.0), 10.0, &mut seeded_rng());
    assert_eq!(s2.targets.len(), 1);
    assert_eq!(s2.score, 0);
}

#[test]
fn particles_keep_playing_out_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.particles.push(Particle {
        x: 100.0,
        y: 100.0,
        vx: 1.0,
        vy: -2.0,
        life: 5,
    });
    let s2 = tick(&s, &idle(), 10.0, &mut seeded_rng());
    assert_eq!(s2.particles.len(), 1);
    assert_eq!(s2.particles[0].x, 101.0);
    assert_eq!(s2.particles[0].y, 98.0);
    assert_eq!(s2.particles[0].life, 4);
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[test]
fn particle_expires_at_zero_life() {
    let mut s = make_state();
    s.particles.push(Particle {
        x: 0.0,
        y: 0.0,
        vx: 0.0,
        vy: 0.0,
        life: 1,
    });
    let s2 = tick(&s, &idle(), 0.1, &mut seeded_rng());
    assert!(s2.particles.is_empty());
}

#[test]
fn tick_does_not_mutate_original() {
    let mut s = make_state();
    s.targets.push(make_target(600.0, 400.0, 30.0));
    let _ = tick(&s, &fire_at(600.0, 400.0), 10.0, &mut seeded_rng());
    assert_eq!(s.score, 0);
    assert_eq!(s.targets.len(), 1);
    assert!(s.particles.is_empty());
}
