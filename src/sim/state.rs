//! Game state and core simulation types
//!
//! Everything the tick mutates lives here. Per-frame render data (ray
//! samples, sprite projections) deliberately does not: it belongs to the
//! frame pipeline and is rebuilt every step.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::map::TileMap;
use crate::config::{EngineConfig, KindStats, WaveConfig};
use crate::error::{EngineError, MapError, SpawnError};
use crate::{heading_to_dir, normalize_angle};

/// Stable identity for mobile entities
pub type EntityId = u32;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Normal play
    Active,
    /// Player health reached zero; ticks are ignored until reset
    Defeated,
}

/// Position and facing in world units / radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub pos: Vec2,
    /// Radians, normalized to (-π, π]
    pub heading: f32,
}

impl Pose {
    pub fn new(pos: Vec2, heading: f32) -> Self {
        Self {
            pos,
            heading: normalize_angle(heading),
        }
    }

    /// Unit view direction
    #[inline]
    pub fn dir(&self) -> Vec2 {
        heading_to_dir(self.heading)
    }
}

/// Alien variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntityKind {
    #[default]
    Regular,
    /// Boss alien: slower, tougher, hits harder, shows a health bar
    Elite,
}

impl EntityKind {
    /// Tuning for this kind
    #[inline]
    pub fn stats(self, waves: &WaveConfig) -> &KindStats {
        match self {
            EntityKind::Regular => &waves.regular,
            EntityKind::Elite => &waves.elite,
        }
    }

    #[inline]
    pub fn is_elite(self) -> bool {
        self == EntityKind::Elite
    }
}

/// A chasing alien
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobileEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pose: Pose,
    pub health: f32,
    pub max_health: f32,
}

impl MobileEntity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, waves: &WaveConfig) -> Self {
        let health = kind.stats(waves).health;
        Self {
            id,
            kind,
            pose: Pose::new(pos, 0.0),
            health,
            max_health: health,
        }
    }

    /// Remaining health in [0, 1]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// Weapon ammunition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ammo {
    Unlimited,
    Limited(u32),
}

/// A weapon in the player's roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage: f32,
    pub cooldown_ms: f64,
    pub ammo: Ammo,
    /// Sim time of the last accepted shot with this weapon
    #[serde(default)]
    pub last_fire_ms: Option<f64>,
}

impl Weapon {
    pub fn new(name: impl Into<String>, damage: f32, cooldown_ms: f64, ammo: Ammo) -> Self {
        Self {
            name: name.into(),
            damage,
            cooldown_ms,
            ammo,
            last_fire_ms: None,
        }
    }

    /// Starting sidearm
    pub fn pistol() -> Self {
        Self::new("Pistol", 20.0, 400.0, Ammo::Unlimited)
    }

    pub fn shotgun() -> Self {
        Self::new("Shotgun", 45.0, 700.0, Ammo::Limited(15))
    }

    pub fn plasma() -> Self {
        Self::new("Plasma", 30.0, 200.0, Ammo::Limited(50))
    }

    /// Rounds left (None = unlimited)
    #[inline]
    pub fn remaining_ammo(&self) -> Option<u32> {
        match self.ammo {
            Ammo::Unlimited => None,
            Ammo::Limited(n) => Some(n),
        }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pose: Pose,
    pub health: f32,
    pub max_health: f32,
    /// Acquired weapons in pickup order
    pub weapons: Vec<Weapon>,
    /// Index into `weapons`
    pub current_weapon: Option<usize>,
}

impl Player {
    /// New player holding the pistol
    pub fn new(pose: Pose, max_health: f32) -> Self {
        Self {
            pose,
            health: max_health,
            max_health,
            weapons: vec![Weapon::pistol()],
            current_weapon: Some(0),
        }
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.current_weapon.and_then(|i| self.weapons.get(i))
    }

    pub fn weapon_mut(&mut self) -> Option<&mut Weapon> {
        self.current_weapon.and_then(|i| self.weapons.get_mut(i))
    }

    /// Add a weapon to the roster and make it current
    pub fn acquire(&mut self, weapon: Weapon) {
        self.weapons.push(weapon);
        self.current_weapon = Some(self.weapons.len() - 1);
    }

    /// Select the next weapon in the roster (wraps around)
    pub fn cycle_weapon(&mut self) -> Option<usize> {
        if self.weapons.is_empty() {
            self.current_weapon = None;
            return None;
        }
        let next = self.current_weapon.map_or(0, |i| (i + 1) % self.weapons.len());
        self.current_weapon = Some(next);
        Some(next)
    }
}

/// Events emitted for the host (HUD, wave announcer, game-over screen)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EntityHit {
        id: EntityId,
        damage: f32,
        health_fraction: f32,
    },
    EntityDefeated {
        id: EntityId,
        was_elite: bool,
    },
    PlayerDamaged {
        amount: f32,
    },
    PlayerDefeated,
    WeaponFireAccepted {
        /// None for unlimited ammo
        remaining_ammo: Option<u32>,
    },
    WeaponAcquired {
        name: String,
    },
    WeaponSwitched {
        index: usize,
        name: String,
    },
    WaveStarted {
        wave: u32,
        elite: bool,
        count: u32,
    },
    WaveCleared {
        wave: u32,
    },
}

/// RNG state wrapper for serialization
///
/// Every draw site takes a fresh generator on its own stream so replays
/// with the same seed and inputs stay in lockstep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Wave progress
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveState {
    /// 1-based wave number; 0 means the spawner has not started
    pub number: u32,
    pub elite: bool,
    /// Sim time at which the next wave spawns (set once a wave is cleared)
    pub next_spawn_at_ms: Option<f64>,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub config: EngineConfig,
    pub waves: WaveConfig,
    pub(super) map: TileMap,
    pub player: Player,
    /// Live aliens (sorted by id for determinism)
    pub entities: Vec<MobileEntity>,
    pub phase: SessionPhase,
    pub wave: WaveState,
    /// Aliens defeated this session
    pub kills: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulation clock in milliseconds
    pub time_ms: f64,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Validate inputs and place the player; no wave is spawned yet
    pub fn new(
        map: TileMap,
        config: EngineConfig,
        waves: WaveConfig,
        seed: u64,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        waves.validate()?;
        let spawn = player_spawn(&map)?;
        let player = Player::new(Pose::new(spawn, 0.0), config.player_max_health);

        Ok(Self {
            seed,
            rng_state: RngState::new(seed),
            config,
            waves,
            map,
            player,
            entities: Vec::new(),
            phase: SessionPhase::Active,
            wave: WaveState::default(),
            kills: 0,
            time_ticks: 0,
            time_ms: 0.0,
            next_id: 1,
        })
    }

    /// The level (read-only after load)
    #[inline]
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place an alien; positions inside walls are rejected
    pub fn spawn_entity(&mut self, kind: EntityKind, pos: Vec2) -> Result<EntityId, SpawnError> {
        if self.map.is_wall(pos) {
            return Err(SpawnError::InsideWall { x: pos.x, y: pos.y });
        }
        let id = self.next_entity_id();
        self.entities.push(MobileEntity::new(id, kind, pos, &self.waves));
        Ok(id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&MobileEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Restart the run on the same map: fresh player, no aliens, Active
    pub fn reset(&mut self) {
        let spawn = player_spawn(&self.map).unwrap_or(self.player.pose.pos);
        self.player = Player::new(Pose::new(spawn, 0.0), self.config.player_max_health);
        self.entities.clear();
        self.phase = SessionPhase::Active;
        self.wave = WaveState::default();
        self.kills = 0;
        self.time_ticks = 0;
        self.time_ms = 0.0;
        self.rng_state = RngState::new(self.seed);
        self.next_id = 1;
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.entities.sort_by_key(|e| e.id);
    }
}

/// Central empty tile, or the first empty tile in row-major order
fn player_spawn(map: &TileMap) -> Result<Vec2, MapError> {
    let (col, row) = ((map.cols() - 1) / 2, (map.rows() - 1) / 2);
    let center = map.tile_center(col, row);
    if !map.is_wall(center) {
        return Ok(center);
    }
    map.empty_tiles()
        .next()
        .map(|(c, r)| map.tile_center(c, r))
        .ok_or(MapError::NoOpenTile)
}
