//! Sprite projection and back-to-front ordering for aliens
//!
//! Each tick produces a fresh projection per live entity (bearing, screen x,
//! distance, visibility). Occlusion uses the ray sample at the sprite's
//! column only; there is no per-pixel depth buffer.

use serde::{Deserialize, Serialize};

use super::color::{Rgb, distance_shade};
use super::raycast::RaySample;
use crate::config::{EngineConfig, WaveConfig};
use crate::sim::state::{EntityId, MobileEntity, Pose};
use crate::{bearing, normalize_angle};

/// Smallest distance used for size computations
const MIN_DISTANCE: f32 = 1e-3;
/// Health bar geometry (pixels)
const HEALTH_BAR_HEIGHT: f32 = 6.0;
const HEALTH_BAR_GAP: f32 = 15.0;

/// Per-tick screen placement of one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteProjection {
    pub id: EntityId,
    /// Distance from the player in world units
    pub distance: f32,
    /// Bearing relative to the view heading, in (-π, π]
    pub relative_bearing: f32,
    /// Horizontal screen position of the sprite center
    pub screen_x: f32,
    /// Ray column used for the occlusion test (None when outside the view)
    pub column: Option<usize>,
    pub visible: bool,
}

/// Health bar overlay for elite sprites
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthBar {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Remaining health in [0, 1]
    pub fraction: f32,
}

/// Draw command for one visible alien
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteCommand {
    pub id: EntityId,
    pub elite: bool,
    /// Sprite center x
    pub screen_x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub distance: f32,
    pub color: Rgb,
    pub health_bar: Option<HealthBar>,
}

/// Place one entity on screen and test it against the ray fan
pub fn project_entity(
    entity: &MobileEntity,
    view: &Pose,
    rays: &[RaySample],
    config: &EngineConfig,
) -> SpriteProjection {
    let distance = view.pos.distance(entity.pose.pos);
    let relative_bearing = normalize_angle(bearing(view.pos, entity.pose.pos) - view.heading);
    let screen_x = config.center_x() + (relative_bearing / config.fov) * config.view_width;

    let mut projection = SpriteProjection {
        id: entity.id,
        distance,
        relative_bearing,
        screen_x,
        column: None,
        visible: false,
    };

    if relative_bearing.abs() > config.fov / 2.0 + config.sprite_fov_margin {
        return projection;
    }

    // Sprites in the tolerance margin fall off-screen; use the nearest edge ray
    if !rays.is_empty() {
        let raw = (screen_x / config.view_width * rays.len() as f32).floor();
        let column = raw.clamp(0.0, (rays.len() - 1) as f32) as usize;
        projection.column = Some(column);
        if distance > rays[column].distance {
            return projection;
        }
    }

    projection.visible = true;
    projection
}

/// Rebuild the projection array for all live entities
pub fn project_entities(
    entities: &[MobileEntity],
    view: &Pose,
    rays: &[RaySample],
    config: &EngineConfig,
    out: &mut Vec<SpriteProjection>,
) {
    out.clear();
    out.extend(
        entities
            .iter()
            .map(|entity| project_entity(entity, view, rays, config)),
    );
}

/// Apparent sprite height for a distance, clamped to a viewport fraction
#[inline]
pub fn sprite_height(distance: f32, tile_size: f32, config: &EngineConfig) -> f32 {
    let h = config.view_height;
    (tile_size * h * config.sprite_scale / distance.max(MIN_DISTANCE))
        .min(h * config.sprite_max_fraction)
}

/// Draw commands for visible entities, farthest first
pub fn sprite_commands(
    entities: &[MobileEntity],
    projections: &[SpriteProjection],
    config: &EngineConfig,
    waves: &WaveConfig,
    tile_size: f32,
) -> Vec<SpriteCommand> {
    let mut visible: Vec<(&SpriteProjection, &MobileEntity)> = projections
        .iter()
        .filter(|p| p.visible)
        .filter_map(|p| entities.iter().find(|e| e.id == p.id).map(|e| (p, e)))
        .collect();
    visible.sort_by(|(a, _), (b, _)| b.distance.total_cmp(&a.distance));

    let max_depth = config.max_depth(tile_size);
    let view_h = config.view_height;

    visible
        .into_iter()
        .map(|(projection, entity)| {
            let height = sprite_height(projection.distance, tile_size, config);
            let width = height * config.sprite_aspect;
            let top = view_h / 2.0 - height / 2.0 + height * 0.1;
            let shade = distance_shade(
                projection.distance,
                max_depth * 0.7,
                config.sprite_shade_floor,
            );
            let base = if entity.kind.is_elite() {
                config.boss
            } else {
                config.alien
            };

            let bar_range = entity
                .kind
                .stats(waves)
                .health_bar_range_tiles
                .map(|tiles| tiles * tile_size);
            let health_bar = bar_range
                .filter(|&range| projection.distance < range)
                .map(|_| {
                    let bar_width = width * 1.2;
                    HealthBar {
                        x: projection.screen_x - bar_width / 2.0,
                        y: top - HEALTH_BAR_GAP,
                        width: bar_width,
                        height: HEALTH_BAR_HEIGHT,
                        fraction: entity.health_fraction(),
                    }
                });

            SpriteCommand {
                id: entity.id,
                elite: entity.kind.is_elite(),
                screen_x: projection.screen_x,
                top,
                width,
                height,
                distance: projection.distance,
                color: base.shade(shade),
                health_bar,
            }
        })
        .collect()
}
