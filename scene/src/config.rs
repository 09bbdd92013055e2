//! Scene tuning parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{
    DEFAULT_FADE_MS, DEFAULT_JITTER, DEFAULT_MOVE_SPEED, DEFAULT_MULTIPART_TTL_MS, DEFAULT_SCENE_HEIGHT,
    DEFAULT_SCENE_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Shared move speed for every animated entity.
    pub move_speed: f64,
    pub fade_ms: u64,
    pub width: f64,
    pub height: f64,
    /// Share (0..=1) of a container's size used for arrival jitter.
    pub jitter: f64,
    pub multipart_ttl_ms: u64,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            fade_ms: DEFAULT_FADE_MS,
            width: DEFAULT_SCENE_WIDTH,
            height: DEFAULT_SCENE_HEIGHT,
            jitter: DEFAULT_JITTER,
            multipart_ttl_ms: DEFAULT_MULTIPART_TTL_MS,
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `FLEETVIEW_MOVE_SPEED`: default 3
    /// - `FLEETVIEW_FADE_MS`: default 400
    /// - `FLEETVIEW_WIDTH` / `FLEETVIEW_HEIGHT`: default 1600 x 900
    /// - `FLEETVIEW_JITTER`: default 0.35
    /// - `FLEETVIEW_MULTIPART_TTL_MS`: default 30000
    /// - `FLEETVIEW_SEED`: unset means OS-seeded
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let move_speed = env_parse("FLEETVIEW_MOVE_SPEED", defaults.move_speed);
        Self {
            move_speed: if move_speed > 0.0 { move_speed } else { defaults.move_speed },
            fade_ms: env_parse("FLEETVIEW_FADE_MS", defaults.fade_ms),
            width: env_parse("FLEETVIEW_WIDTH", defaults.width),
            height: env_parse("FLEETVIEW_HEIGHT", defaults.height),
            jitter: env_parse("FLEETVIEW_JITTER", defaults.jitter).clamp(0.0, 1.0),
            multipart_ttl_ms: env_parse("FLEETVIEW_MULTIPART_TTL_MS", defaults.multipart_ttl_ms),
            seed: match std::env::var("FLEETVIEW_SEED").map(|raw| raw.parse::<u64>()) {
                Ok(Ok(seed)) => Some(seed),
                _ => None,
            },
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
