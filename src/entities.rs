/// All game entity types — pure data, no logic.

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
}

/// 8-bit RGB color, kept presentation-agnostic so the core never depends on
/// the terminal backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Where the fingertip points, in world pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimPoint {
    pub x: f32,
    pub y: f32,
}

// ── Falling targets ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Target {
    pub x: f32,
    pub y: f32,
    /// Radius-like scalar; also pads the hit test.
    pub size: f32,
    /// Vertical speed per tick.  Scaled by difficulty once at spawn and
    /// frozen afterwards.
    pub speed: f32,
    /// Horizontal drift in [-1, 1], applied ×2 per tick.
    pub drift: f32,
    pub color: Rgb,
    pub shape: Shape,
}

// ── Burst particles ───────────────────────────────────────────────────────────

/// Short-lived decorative fragment spawned when a target is destroyed.
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining ticks; the particle is dropped when this reaches 0.
    pub life: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub targets: Vec<Target>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// May dip below zero transiently when several targets escape in one
    /// frame; the HUD clamps at 0 and the next tick goes terminal.
    pub lives: i32,
    /// Score multiplier, always ≥ 1.
    pub combo: u32,
    /// Derived from score each tick; stored for the HUD.
    pub difficulty: f32,
    /// Derived from score each tick; stored for the HUD.
    pub spawn_probability: f64,
    /// Wall-clock seconds of the last fire event.
    pub last_fire: f64,
    /// Wall-clock seconds of the last successful hit.
    pub last_hit: f64,
    pub status: GameStatus,
    pub frame: u64,
    pub config: GameConfig,
}
