//! Runtime-tunable game configuration, optionally loaded from
//! `gesture_shooter.toml` in the working directory.
//!
//! [`GameConfig::default`] is the authoritative source of every constant; a
//! config file may override any subset of fields and missing keys fall back
//! to the defaults, so a minimal TOML can tune just the values you care
//! about.  A malformed file is ignored with a warning rather than aborting.

use serde::Deserialize;

/// File probed by [`load_config`] at startup.
pub const CONFIG_PATH: &str = "gesture_shooter.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical playfield width in pixels (camera frames are requested at
    /// this resolution; aim points are mapped into this space).
    pub world_width: f32,
    /// Logical playfield height in pixels.
    pub world_height: f32,
    /// Lives at the start of a run.
    pub start_lives: i32,
    /// Normalized index-tip↔thumb-tip distance below which the hand counts
    /// as pinched.
    pub pinch_threshold: f64,
    /// Minimum seconds between two fire events.
    pub fire_cooldown: f64,
    /// Seconds without a hit after which the combo decays back to 1.
    pub combo_window: f64,
    /// Slack added to a target's size when hit-testing the aim point.
    pub hit_padding: f32,
    /// How far above the top edge a target may travel before it counts as
    /// escaped (lives penalty).
    pub escape_margin: f32,
    /// Particles spawned per destroyed target.
    pub burst_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            world_width: 1280.0,
            world_height: 720.0,
            start_lives: 5,
            pinch_threshold: 0.04,
            fire_cooldown: 0.25,
            combo_window: 1.5,
            hit_padding: 25.0,
            escape_margin: 60.0,
            burst_size: 25,
        }
    }
}

/// Read [`CONFIG_PATH`] if present; otherwise (or on a parse error) return
/// the compile-time defaults.
pub fn load_config() -> GameConfig {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(text) => match toml::from_str(&text) {
            Ok(config) => {
                log::info!("loaded overrides from {CONFIG_PATH}");
                config
            }
            Err(err) => {
                log::warn!("ignoring malformed {CONFIG_PATH}: {err}");
                GameConfig::default()
            }
        },
        Err(_) => GameConfig::default(),
    }
}
