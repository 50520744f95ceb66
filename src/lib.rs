//! Alien Invasion - grid raycasting core for a browser first-person shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile map, movement, chase, combat, waves)
//! - `render`: Raycasting and projection into draw commands for the host
//! - `config`: Data-driven engine and wave tuning
//! - `platform`: Browser/native logging setup and the wasm session binding
//! - `error`: Load-time validation errors

pub mod config;
pub mod error;
pub mod platform;
pub mod render;
pub mod sim;

pub use config::{EngineConfig, WaveConfig};
pub use error::{ConfigError, EngineError, MapError, SpawnError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, melee damage is applied per step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Tile edge length in world units
    pub const TILE_SIZE: f32 = 64.0;

    /// Default viewport (matches the portrait game canvas)
    pub const VIEW_WIDTH: f32 = 400.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Field of view (radians, 60 degrees)
    pub const FOV: f32 = std::f32::consts::FRAC_PI_3;
    /// Rays per frame, one per screen column strip
    pub const NUM_RAYS: usize = 120;
    /// Ray march step in world units
    pub const RAY_STEP: f32 = 2.0;
    /// Maximum view distance in tiles
    pub const MAX_DEPTH_TILES: f32 = 16.0;
    /// Darkest wall shade (never fully black)
    pub const WALL_SHADE_FLOOR: f32 = 0.2;

    /// Extra angular margin beyond half the FOV before a sprite is culled
    pub const SPRITE_FOV_MARGIN: f32 = 0.2;
    /// Sprite height scale relative to a wall slice at the same depth
    pub const SPRITE_SCALE: f32 = 1.5;
    /// Largest sprite as a fraction of viewport height
    pub const SPRITE_MAX_FRACTION: f32 = 0.8;
    /// Sprite width as a fraction of its height
    pub const SPRITE_ASPECT: f32 = 0.6;
    /// Darkest sprite shade
    pub const SPRITE_SHADE_FLOOR: f32 = 0.3;

    /// Player defaults (speeds are per second)
    pub const PLAYER_SPEED: f32 = 180.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    /// Analog input below this magnitude is ignored
    pub const INPUT_DEAD_ZONE: f32 = 0.1;

    /// Regular alien defaults
    pub const ALIEN_HEALTH: f32 = 50.0;
    pub const ALIEN_DAMAGE: f32 = 0.5; // per simulation step
    pub const ALIEN_SPEED: f32 = 60.0;
    /// Boss alien defaults
    pub const BOSS_HEALTH: f32 = 300.0;
    pub const BOSS_DAMAGE: f32 = 1.0; // per simulation step
    pub const BOSS_SPEED_FACTOR: f32 = 0.7;
    /// Melee reach in tiles
    pub const MELEE_RANGE_TILES: f32 = 0.8;
    /// Boss health bar shows within this many tiles
    pub const BOSS_BAR_RANGE_TILES: f32 = 8.0;
    /// Half-width of the crosshair hit band in pixels
    pub const ALIEN_HIT_BAND: f32 = 50.0;
    pub const BOSS_HIT_BAND: f32 = 80.0;

    /// Waves
    pub const ALIENS_PER_WAVE: u32 = 3;
    pub const WAVES_BEFORE_BOSS: u32 = 5;
    pub const MIN_SPAWN_DISTANCE_TILES: f32 = 3.0;
    pub const MAX_SPAWN_ATTEMPTS: u32 = 50;
    pub const WAVE_DELAY_MS: f64 = 1000.0;

    /// Weapon drops
    pub const WEAPON_DROP_CHANCE: f64 = 0.3;
    pub const MAX_WEAPONS: usize = 3;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Unit direction for a heading in radians
#[inline]
pub fn heading_to_dir(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

/// Bearing of `target` as seen from `origin` (radians, world frame)
#[inline]
pub fn bearing(origin: Vec2, target: Vec2) -> f32 {
    let d = target - origin;
    d.y.atan2(d.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(1.5 * PI) + PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(PI / 2.0 + 4.0 * PI) - PI / 2.0).abs() < 1e-4);
        assert_eq!(normalize_angle(f32::NAN), 0.0);
    }

    #[test]
    fn test_bearing() {
        let b = bearing(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!((b - PI / 2.0).abs() < 1e-6);
    }
}
