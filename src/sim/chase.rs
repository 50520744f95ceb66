//! Alien chase movement and melee
//!
//! Aliens walk straight at the player, sliding on walls, and stop once
//! inside melee reach. Every simulation step spent in reach deals the
//! kind's melee damage; with the fixed step this is a constant rate per
//! second regardless of display frame rate.

use glam::Vec2;

use super::map::TileMap;
use super::movement::step_toward;
use super::state::MobileEntity;
use crate::config::WaveConfig;

/// Move every entity one step and total the melee damage dealt this step
pub fn advance_entities(
    entities: &mut [MobileEntity],
    player_pos: Vec2,
    map: &TileMap,
    waves: &WaveConfig,
    dt: f32,
) -> f32 {
    let melee_range = waves.melee_range_tiles * map.tile_size();
    let mut damage = 0.0;

    for entity in entities.iter_mut() {
        let stats = entity.kind.stats(waves);
        let dist = entity.pose.pos.distance(player_pos);

        if dist > melee_range {
            step_toward(&mut entity.pose, map, player_pos, stats.speed * dt);
        } else {
            damage += stats.melee_damage;
        }
    }

    damage
}
