//! Fixed-step ray marching against the tile map
//!
//! One ray per screen strip, equally spaced across the field of view and
//! ordered left to right. Distances handed downstream are fisheye-corrected.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::heading_to_dir;
use crate::sim::map::TileMap;
use crate::sim::state::Pose;

/// Which face of the tile the ray struck (shading only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOrientation {
    Vertical,
    Horizontal,
}

/// Raw result of marching one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance travelled along the ray
    pub distance: f32,
    pub orientation: HitOrientation,
    /// False when the ray ran out of depth
    pub hit_wall: bool,
}

/// Per-column sample consumed by the wall and sprite stages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaySample {
    /// World angle of the ray
    pub angle: f32,
    /// Fisheye-corrected distance
    pub distance: f32,
    pub orientation: HitOrientation,
}

/// Angle of ray `index` out of `count` across the view
#[inline]
pub fn ray_angle(heading: f32, fov: f32, index: usize, count: usize) -> f32 {
    heading - fov / 2.0 + (index as f32 / count as f32) * fov
}

/// Classify a hit by comparing the hit point's offsets from the tile's
/// center lines: `Vertical` when the x offset is the smaller one.
pub fn classify_hit(point: Vec2, tile_size: f32) -> HitOrientation {
    let half = tile_size / 2.0;
    let off_x = (point.x.rem_euclid(tile_size) - half).abs();
    let off_y = (point.y.rem_euclid(tile_size) - half).abs();
    if off_x < off_y {
        HitOrientation::Vertical
    } else {
        HitOrientation::Horizontal
    }
}

/// March a single ray from `origin` until it enters a wall or `max_depth`
pub fn cast_ray(map: &TileMap, origin: Vec2, angle: f32, step: f32, max_depth: f32) -> RayHit {
    let dir = heading_to_dir(angle);
    let steps = (max_depth / step).ceil() as u32;

    for i in 0..steps {
        let depth = i as f32 * step;
        let point = origin + dir * depth;
        if map.is_wall(point) {
            return RayHit {
                distance: depth,
                orientation: classify_hit(point, map.tile_size()),
                hit_wall: true,
            };
        }
    }

    RayHit {
        distance: max_depth,
        orientation: HitOrientation::Horizontal,
        hit_wall: false,
    }
}

/// Cast the full fan for `pose` into `out` (cleared first)
pub fn cast_fan(map: &TileMap, pose: &Pose, config: &EngineConfig, out: &mut Vec<RaySample>) {
    out.clear();
    let max_depth = config.max_depth(map.tile_size());

    out.extend((0..config.num_rays).map(|i| {
        let angle = ray_angle(pose.heading, config.fov, i, config.num_rays);
        let hit = cast_ray(map, pose.pos, angle, config.ray_step, max_depth);
        RaySample {
            angle,
            distance: hit.distance * (angle - pose.heading).cos(),
            orientation: hit.orientation,
        }
    }));
}
