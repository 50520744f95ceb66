//! Engine and wave tuning
//!
//! Loaded once at session start (JSON on native, defaults on web) and
//! validated before the first tick. Every field has a default so partial
//! JSON documents are accepted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::render::Rgb;

/// Render and player tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Viewport ===
    /// Viewport width in pixels
    pub view_width: f32,
    /// Viewport height in pixels
    pub view_height: f32,

    // === Ray casting ===
    /// Horizontal field of view (radians)
    pub fov: f32,
    /// Number of rays (screen column strips)
    pub num_rays: usize,
    /// March step in world units
    pub ray_step: f32,
    /// View distance in tiles
    pub max_depth_tiles: f32,

    // === Shading ===
    pub wall_shade_floor: f32,
    /// Wall colour for vertical hits
    pub wall_dark: Rgb,
    /// Wall colour for horizontal hits
    pub wall_light: Rgb,
    pub sky: Rgb,
    pub floor: Rgb,
    pub alien: Rgb,
    pub boss: Rgb,

    // === Sprites ===
    pub sprite_fov_margin: f32,
    pub sprite_scale: f32,
    pub sprite_max_fraction: f32,
    pub sprite_aspect: f32,
    pub sprite_shade_floor: f32,

    // === Player ===
    /// World units per second at full stick deflection
    pub player_speed: f32,
    pub player_max_health: f32,
    pub input_dead_zone: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,

            fov: FOV,
            num_rays: NUM_RAYS,
            ray_step: RAY_STEP,
            max_depth_tiles: MAX_DEPTH_TILES,

            wall_shade_floor: WALL_SHADE_FLOOR,
            wall_dark: Rgb::from_hex(0x4a4a6a),
            wall_light: Rgb::from_hex(0x7a7aa0),
            sky: Rgb::from_hex(0x0a0a1a),
            floor: Rgb::from_hex(0x2a2a2a),
            alien: Rgb::from_hex(0x22cc44),
            boss: Rgb::from_hex(0xcc2222),

            sprite_fov_margin: SPRITE_FOV_MARGIN,
            sprite_scale: SPRITE_SCALE,
            sprite_max_fraction: SPRITE_MAX_FRACTION,
            sprite_aspect: SPRITE_ASPECT,
            sprite_shade_floor: SPRITE_SHADE_FLOOR,

            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            input_dead_zone: INPUT_DEAD_ZONE,
        }
    }
}

impl EngineConfig {
    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fov.is_finite() || self.fov <= 0.0 || self.fov >= std::f32::consts::TAU {
            return Err(ConfigError::FieldOfView(self.fov));
        }
        if self.num_rays == 0 {
            return Err(ConfigError::ZeroRays);
        }
        positive("view_width", self.view_width)?;
        positive("view_height", self.view_height)?;
        positive("ray_step", self.ray_step)?;
        positive("max_depth_tiles", self.max_depth_tiles)?;
        positive("sprite_scale", self.sprite_scale)?;
        positive("sprite_aspect", self.sprite_aspect)?;
        positive("player_speed", self.player_speed)?;
        positive("player_max_health", self.player_max_health)?;
        positive("wall_shade_floor", self.wall_shade_floor)?;
        unit("wall_shade_floor", self.wall_shade_floor)?;
        unit("sprite_shade_floor", self.sprite_shade_floor)?;
        unit("sprite_max_fraction", self.sprite_max_fraction)?;
        unit("input_dead_zone", self.input_dead_zone)?;
        if !self.sprite_fov_margin.is_finite() || self.sprite_fov_margin < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "sprite_fov_margin",
                value: self.sprite_fov_margin,
            });
        }
        Ok(())
    }

    /// Max ray depth in world units
    #[inline]
    pub fn max_depth(&self, tile_size: f32) -> f32 {
        self.max_depth_tiles * tile_size
    }

    /// Screen width covered by one ray
    #[inline]
    pub fn column_width(&self) -> f32 {
        self.view_width / self.num_rays as f32
    }

    /// Horizontal screen center (crosshair)
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.view_width / 2.0
    }
}

/// Per-kind alien tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindStats {
    pub health: f32,
    /// Damage dealt to the player per simulation step in melee range
    pub melee_damage: f32,
    /// World units per second
    pub speed: f32,
    /// Half-width of the crosshair band that counts as a hit (pixels)
    pub hit_band: f32,
    /// Health bar is drawn within this many tiles (None = never)
    pub health_bar_range_tiles: Option<f32>,
}

/// Wave sizing, spawning and drop tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Regular aliens per wave before growth (one more every `growth_every` waves)
    pub base_count: u32,
    pub growth_every: u32,
    /// Every n-th wave is a single-boss wave
    pub elite_every: u32,
    pub min_spawn_distance_tiles: f32,
    pub max_spawn_attempts: u32,
    /// Pause between clearing a wave and spawning the next
    pub wave_delay_ms: f64,
    pub melee_range_tiles: f32,
    pub weapon_drop_chance: f64,
    pub max_weapons: usize,
    pub regular: KindStats,
    pub elite: KindStats,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_count: ALIENS_PER_WAVE,
            growth_every: 2,
            elite_every: WAVES_BEFORE_BOSS,
            min_spawn_distance_tiles: MIN_SPAWN_DISTANCE_TILES,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            wave_delay_ms: WAVE_DELAY_MS,
            melee_range_tiles: MELEE_RANGE_TILES,
            weapon_drop_chance: WEAPON_DROP_CHANCE,
            max_weapons: MAX_WEAPONS,
            regular: KindStats {
                health: ALIEN_HEALTH,
                melee_damage: ALIEN_DAMAGE,
                speed: ALIEN_SPEED,
                hit_band: ALIEN_HIT_BAND,
                health_bar_range_tiles: None,
            },
            elite: KindStats {
                health: BOSS_HEALTH,
                melee_damage: BOSS_DAMAGE,
                speed: ALIEN_SPEED * BOSS_SPEED_FACTOR,
                hit_band: BOSS_HIT_BAND,
                health_bar_range_tiles: Some(BOSS_BAR_RANGE_TILES),
            },
        }
    }
}

impl WaveConfig {
    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elite_every == 0 {
            return Err(ConfigError::ZeroEliteCadence);
        }
        if self.growth_every == 0 {
            return Err(ConfigError::NonPositive {
                field: "growth_every",
                value: 0.0,
            });
        }
        positive("melee_range_tiles", self.melee_range_tiles)?;
        non_negative("min_spawn_distance_tiles", self.min_spawn_distance_tiles)?;
        if !self.wave_delay_ms.is_finite() || self.wave_delay_ms < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "wave_delay_ms",
                value: self.wave_delay_ms as f32,
            });
        }
        unit("weapon_drop_chance", self.weapon_drop_chance as f32)?;
        for (name, stats) in [("regular", &self.regular), ("elite", &self.elite)] {
            positive(name, stats.health)?;
            non_negative("speed", stats.speed)?;
            non_negative("melee_damage", stats.melee_damage)?;
            non_negative("hit_band", stats.hit_band)?;
            if let Some(range) = stats.health_bar_range_tiles {
                non_negative("health_bar_range_tiles", range)?;
            }
        }
        Ok(())
    }

    /// Whether the given 1-based wave number is a boss wave
    #[inline]
    pub fn is_elite_wave(&self, wave: u32) -> bool {
        wave % self.elite_every == 0
    }

    /// Aliens spawned for the given 1-based wave number
    pub fn wave_size(&self, wave: u32) -> u32 {
        if self.is_elite_wave(wave) {
            1
        } else {
            self.base_count + wave / self.growth_every
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}
