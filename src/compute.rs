/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle and the sampled wall-clock
/// time in seconds) and returns a brand-new `GameState`.  Side effects are
/// limited to the injected RNG, so a seeded `StdRng` makes every run
/// reproducible in tests.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus, Particle, Rgb, Shape, Target};
use crate::gesture::FireControl;

// ── Spawn tables ─────────────────────────────────────────────────────────────

/// Horizontal slack kept between a spawn point and the side edges.
const SPAWN_MARGIN: f32 = 100.0;
/// New targets start this far below the bottom edge.
const SPAWN_DEPTH_MIN: f32 = 50.0;
const SPAWN_DEPTH_MAX: f32 = 200.0;
const SIZE_MIN: f32 = 25.0;
const SIZE_MAX: f32 = 50.0;
/// Base vertical speed range, scaled by difficulty at spawn.
const BASE_SPEED_MIN: f32 = 3.0;
const BASE_SPEED_MAX: f32 = 5.0;
/// Horizontal drift applied per tick is `drift × DRIFT_STEP`.
const DRIFT_STEP: f32 = 2.0;

const PARTICLE_SPREAD: f32 = 5.0;
const PARTICLE_LIFE_MIN: u32 = 15;
const PARTICLE_LIFE_MAX: u32 = 25;

/// Points per hit, multiplied by the current combo.
const HIT_SCORE: u32 = 10;

const TARGET_PALETTE: [Rgb; 3] = [
    Rgb(255, 70, 70),
    Rgb(255, 255, 255),
    Rgb(255, 140, 140),
];

// ── Difficulty curve ─────────────────────────────────────────────────────────

/// Speed multiplier applied to a target at spawn time.  Unbounded growth.
pub fn difficulty_for(score: u32) -> f32 {
    1.0 + score as f32 / 200.0
}

/// Per-tick Bernoulli spawn probability, capped at 0.12.
///
/// This is a trial per tick, not a rate over time, so the effective spawn
/// frequency scales with the frame rate.  The coupling is inherited behavior
/// and kept deliberately.
pub fn spawn_probability_for(score: u32) -> f64 {
    (0.03 + score as f64 / 1000.0).min(0.12)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state from a config.
pub fn init_state(config: GameConfig) -> GameState {
    GameState {
        targets: Vec::new(),
        particles: Vec::new(),
        score: 0,
        lives: config.start_lives,
        combo: 1,
        difficulty: difficulty_for(0),
        spawn_probability: spawn_probability_for(0),
        last_fire: 0.0,
        last_hit: 0.0,
        status: GameStatus::Playing,
        frame: 0,
        config,
    }
}

/// Randomize a new target below the visible area.  Speed is scaled by the
/// current difficulty here and never re-scaled afterwards.
pub fn spawn_target(config: &GameConfig, difficulty: f32, rng: &mut impl Rng) -> Target {
    Target {
        x: rng.gen_range(SPAWN_MARGIN..config.world_width - SPAWN_MARGIN),
        y: config.world_height + rng.gen_range(SPAWN_DEPTH_MIN..SPAWN_DEPTH_MAX),
        size: rng.gen_range(SIZE_MIN..SIZE_MAX),
        speed: rng.gen_range(BASE_SPEED_MIN..BASE_SPEED_MAX) * difficulty,
        drift: rng.gen_range(-1.0..1.0),
        color: TARGET_PALETTE[rng.gen_range(0..TARGET_PALETTE.len())],
        shape: match rng.gen_range(0..3) {
            0 => Shape::Circle,
            1 => Shape::Square,
            _ => Shape::Triangle,
        },
    }
}

fn spawn_burst(x: f32, y: f32, count: usize, rng: &mut impl Rng) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            x,
            y,
            vx: rng.gen_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
            vy: rng.gen_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
            life: rng.gen_range(PARTICLE_LIFE_MIN..=PARTICLE_LIFE_MAX),
        })
        .collect()
}

fn step_particles(particles: &[Particle]) -> Vec<Particle> {
    particles
        .iter()
        .filter_map(|p| {
            let life = p.life.saturating_sub(1);
            if life == 0 {
                None
            } else {
                Some(Particle {
                    x: p.x + p.vx,
                    y: p.y + p.vy,
                    vx: p.vx,
                    vy: p.vy,
                    life,
                })
            }
        })
        .collect()
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Runs in phases over snapshots — move everything first, then resolve
/// escapes, then resolve hits against the survivors — so removal never
/// happens mid-iteration and multi-hit frames have one well-defined meaning:
///
/// 1. terminal check (`lives ≤ 0` flips to `GameOver` before any gameplay);
/// 2. derive difficulty and spawn probability from score, run one Bernoulli
///    spawn trial;
/// 3. move every target up by its speed and sideways by its drift;
/// 4. targets past the escape line are removed, each costing a life and
///    resetting the combo — an escaped target can never also be hit;
/// 5. if a fire event landed, every surviving target within
///    `size + hit_padding` of the aim point is removed in order, awarding
///    `10 × combo` and incrementing the combo per hit, and bursting
///    particles at its position;
/// 6. the combo decays back to 1 once the window since the last hit lapses;
/// 7. particles advance and expire.
///
/// Once terminal, targets freeze in place and only particles already in
/// flight keep playing out.
pub fn tick(state: &GameState, control: &FireControl, now: f64, rng: &mut impl Rng) -> GameState {
    let frame = state.frame + 1;

    // ── 1. Terminal check — before any gameplay update ───────────────────────
    if state.status == GameStatus::GameOver || state.lives <= 0 {
        return GameState {
            particles: step_particles(&state.particles),
            status: GameStatus::GameOver,
            frame,
            ..state.clone()
        };
    }

    // ── 2. Difficulty curve + spawn trial ────────────────────────────────────
    let difficulty = difficulty_for(state.score);
    let spawn_probability = spawn_probability_for(state.score);

    let mut targets = state.targets.clone();
    if rng.gen_bool(spawn_probability) {
        targets.push(spawn_target(&state.config, difficulty, rng));
    }

    // ── 3. Move targets, splitting off the ones that escaped ─────────────────
    let escape_line = -state.config.escape_margin;
    let mut escaped: u32 = 0;
    let mut survivors: Vec<Target> = Vec::with_capacity(targets.len());
    for mut target in targets {
        target.y -= target.speed;
        target.x += target.drift * DRIFT_STEP;
        if target.y < escape_line {
            escaped += 1;
        } else {
            survivors.push(target);
        }
    }

    // ── 4. Miss penalty ──────────────────────────────────────────────────────
    let lives = state.lives - escaped as i32;
    let mut combo = if escaped > 0 { 1 } else { state.combo };

    // ── 5. Hit test against the post-move snapshot ───────────────────────────
    let mut score = state.score;
    let mut last_fire = state.last_fire;
    let mut last_hit = state.last_hit;
    let mut particles = state.particles.clone();

    if control.fired {
        last_fire = now;
        if let Some(aim) = control.aim {
            let mut kept = Vec::with_capacity(survivors.len());
            for target in survivors {
                let distance = (target.x - aim.x).hypot(target.y - aim.y);
                if distance < target.size + state.config.hit_padding {
                    score += HIT_SCORE * combo;
                    combo += 1;
                    last_hit = now;
                    particles.extend(spawn_burst(
                        target.x,
                        target.y,
                        state.config.burst_size,
                        rng,
                    ));
                } else {
                    kept.push(target);
                }
            }
            survivors = kept;
        }
    }

    // ── 6. Passive combo decay ───────────────────────────────────────────────
    // Checked after hits, so a hit this very tick refreshes the window.
    if now - last_hit > state.config.combo_window {
        combo = 1;
    }

    // ── 7. Particles ─────────────────────────────────────────────────────────
    let particles = step_particles(&particles);

    GameState {
        targets: survivors,
        particles,
        score,
        lives,
        combo,
        difficulty,
        spawn_probability,
        last_fire,
        last_hit,
        status: GameStatus::Playing,
        frame,
        config: state.config.clone(),
    }
}
