//! Wave spawner and weapon drops
//!
//! Wave `n` is a single-elite wave every `elite_every` waves, otherwise a
//! group of regulars that grows slowly. Spawn cells are drawn from the
//! interior ring of the map and re-rolled until they are open and far
//! enough from the player.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::map::TileMap;
use super::state::{EntityKind, GameEvent, GameState, Player, Weapon};
use crate::config::WaveConfig;

/// Start wave `number`: spawn its aliens and announce it
pub fn begin_wave(state: &mut GameState, number: u32, events: &mut Vec<GameEvent>) {
    let elite = state.waves.is_elite_wave(number);
    let count = state.waves.wave_size(number);
    let kind = if elite {
        EntityKind::Elite
    } else {
        EntityKind::Regular
    };

    state.wave.number = number;
    state.wave.elite = elite;
    state.wave.next_spawn_at_ms = None;

    let mut rng = state.rng_state.next_rng();
    let min_distance = state.waves.min_spawn_distance_tiles * state.map().tile_size();
    let mut spawned = 0;
    for _ in 0..count {
        let Some(pos) = spawn_position(
            state.map(),
            state.player.pose.pos,
            min_distance,
            state.waves.max_spawn_attempts,
            &mut rng,
        ) else {
            log::warn!("Wave {number}: no open tile for alien");
            continue;
        };
        if state.spawn_entity(kind, pos).is_ok() {
            spawned += 1;
        }
    }
    state.normalize_order();

    log::info!(
        "Wave {number} started: {spawned} {}",
        if elite { "elite" } else { "regular" }
    );
    events.push(GameEvent::WaveStarted {
        wave: number,
        elite,
        count: spawned,
    });
}

/// Pick a spawn point: random interior tile, open and away from the player
///
/// After `max_attempts` failed rolls the farthest open tile is used instead.
pub fn spawn_position(
    map: &TileMap,
    player: Vec2,
    min_distance: f32,
    max_attempts: u32,
    rng: &mut Pcg32,
) -> Option<Vec2> {
    // Keep one ring of air between spawns and the border when the map allows it
    let (col_lo, col_hi) = interior_range(map.cols());
    let (row_lo, row_hi) = interior_range(map.rows());

    for _ in 0..max_attempts {
        let col = rng.random_range(col_lo..=col_hi);
        let row = rng.random_range(row_lo..=row_hi);
        let pos = map.tile_center(col, row);
        if !map.is_wall(pos) && pos.distance(player) >= min_distance {
            return Some(pos);
        }
    }

    log::warn!("Spawn re-rolls exhausted, using farthest open tile");
    map.empty_tiles()
        .map(|(c, r)| map.tile_center(c, r))
        .max_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
}

fn interior_range(len: usize) -> (usize, usize) {
    if len >= 5 { (2, len - 3) } else { (1, len - 2) }
}

/// Roll for a weapon drop after a kill
pub fn roll_weapon_drop(rng: &mut Pcg32, player: &Player, waves: &WaveConfig) -> Option<Weapon> {
    if player.weapons.len() >= waves.max_weapons {
        return None;
    }
    if !rng.random_bool(waves.weapon_drop_chance.clamp(0.0, 1.0)) {
        return None;
    }
    Some(if rng.random_range(0..2) == 0 {
        Weapon::shotgun()
    } else {
        Weapon::plasma()
    })
}

/// Wave bookkeeping for one tick
///
/// When the live set empties the wave is cleared and the next one is
/// scheduled; once the delay has passed it spawns. Idle until wave 1 has
/// been started.
pub fn update_waves(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.wave.number == 0 || !state.entities.is_empty() {
        return;
    }

    match state.wave.next_spawn_at_ms {
        None => {
            let wave = state.wave.number;
            log::info!("Wave {wave} cleared");
            events.push(GameEvent::WaveCleared { wave });
            state.wave.next_spawn_at_ms = Some(state.time_ms + state.waves.wave_delay_ms);
        }
        Some(at) if state.time_ms >= at => {
            let next = state.wave.number + 1;
            begin_wave(state, next, events);
        }
        Some(_) => {}
    }
}
