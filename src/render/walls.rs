//! Perspective projection of ray samples into wall slices

use serde::{Deserialize, Serialize};

use super::color::{Rgb, distance_shade};
use super::raycast::{HitOrientation, RaySample};
use crate::config::EngineConfig;

/// Distances below this are treated as touching the wall
const MIN_DISTANCE: f32 = 1e-3;

/// One vertical wall strip for the host renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallColumn {
    pub column: usize,
    /// Left edge in pixels
    pub x: f32,
    /// Strip width in pixels (one pixel of overlap to hide seams)
    pub width: f32,
    pub top: f32,
    pub height: f32,
    pub color: Rgb,
}

/// Solid rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
}

/// Sky and floor halves, painted before the wall strips
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Backdrop {
    pub sky: FillRect,
    pub floor: FillRect,
}

/// Split the viewport at the horizon into sky and floor
pub fn backdrop(config: &EngineConfig) -> Backdrop {
    let horizon = config.view_height / 2.0;
    Backdrop {
        sky: FillRect {
            x: 0.0,
            y: 0.0,
            width: config.view_width,
            height: horizon,
            color: config.sky,
        },
        floor: FillRect {
            x: 0.0,
            y: horizon,
            width: config.view_width,
            height: config.view_height - horizon,
            color: config.floor,
        },
    }
}

/// Slice height for a corrected distance, clamped to the viewport
#[inline]
pub fn wall_height(distance: f32, tile_size: f32, view_height: f32) -> f32 {
    if distance <= MIN_DISTANCE {
        return view_height;
    }
    (tile_size * view_height / distance).min(view_height)
}

/// Project every ray sample into a draw command, left to right
pub fn project_walls(rays: &[RaySample], config: &EngineConfig, tile_size: f32) -> Vec<WallColumn> {
    let column_width = config.column_width();
    let max_depth = config.max_depth(tile_size);
    let view_h = config.view_height;

    rays.iter()
        .enumerate()
        .map(|(column, ray)| {
            let height = wall_height(ray.distance, tile_size, view_h);
            let shade = distance_shade(ray.distance, max_depth, config.wall_shade_floor);
            let base = match ray.orientation {
                HitOrientation::Vertical => config.wall_dark,
                HitOrientation::Horizontal => config.wall_light,
            };
            WallColumn {
                column,
                x: column as f32 * column_width,
                width: column_width + 1.0,
                top: (view_h - height) / 2.0,
                height,
                color: base.shade(shade),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(distance: f32, orientation: HitOrientation) -> RaySample {
        RaySample {
            angle: 0.0,
            distance,
            orientation,
        }
    }

    #[test]
    fn test_height_inverse_to_distance() {
        assert_eq!(wall_height(128.0, 64.0, 600.0), 300.0);
        assert_eq!(wall_height(256.0, 64.0, 600.0), 150.0);
        // Near walls clamp instead of blowing up
        assert_eq!(wall_height(1.0, 64.0, 600.0), 600.0);
        assert_eq!(wall_height(0.0, 64.0, 600.0), 600.0);
    }

    #[test]
    fn test_columns_centered_and_ordered() {
        let config = EngineConfig {
            num_rays: 4,
            ..Default::default()
        };
        let rays = [
            sample(128.0, HitOrientation::Vertical),
            sample(256.0, HitOrientation::Horizontal),
            sample(64.0, HitOrientation::Vertical),
            sample(1.0, HitOrientation::Horizontal),
        ];
        let walls = project_walls(&rays, &config, 64.0);
        assert_eq!(walls.len(), 4);
        for (i, wall) in walls.iter().enumerate() {
            assert_eq!(wall.column, i);
            assert!((wall.x - i as f32 * config.column_width()).abs() < 1e-4);
            // Vertically centered
            assert!((wall.top * 2.0 + wall.height - config.view_height).abs() < 1e-3);
        }
        assert_eq!(walls[3].top, 0.0);
    }

    #[test]
    fn test_far_walls_hit_shade_floor() {
        let config = EngineConfig::default();
        let max_depth = config.max_depth(64.0);
        let near = project_walls(&[sample(1.0, HitOrientation::Horizontal)], &config, 64.0);
        let far = project_walls(&[sample(max_depth, HitOrientation::Horizontal)], &config, 64.0);
        assert_eq!(far[0].color, config.wall_light.shade(config.wall_shade_floor));
        assert_ne!(far[0].color, Rgb::BLACK);
        assert!(near[0].color.r > far[0].color.r);
    }

    #[test]
    fn test_backdrop_splits_at_horizon() {
        let config = EngineConfig::default();
        let bg = backdrop(&config);
        assert_eq!(bg.sky.y, 0.0);
        assert_eq!(bg.sky.height, config.view_height / 2.0);
        assert_eq!(bg.floor.y, bg.sky.height);
        assert_eq!(bg.floor.y + bg.floor.height, config.view_height);
        assert_eq!(bg.sky.width, config.view_width);
        assert_eq!(bg.sky.color, config.sky);
        assert_eq!(bg.floor.color, config.floor);
    }

    #[test]
    fn test_orientation_picks_base_color() {
        let config = EngineConfig::default();
        let v = project_walls(&[sample(1.0, HitOrientation::Vertical)], &config, 64.0);
        let h = project_walls(&[sample(1.0, HitOrientation::Horizontal)], &config, 64.0);
        assert_ne!(v[0].color, h[0].color);
    }
}
