//! Hitscan combat
//!
//! A shot hits the nearest visible alien whose sprite center lies inside
//! its kind's crosshair band. Targeting reads the projection array built
//! this tick, so occluded or off-screen aliens can never be hit.

use super::state::{Ammo, EntityId, GameEvent, MobileEntity, Player};
use crate::config::{EngineConfig, WaveConfig};
use crate::render::SpriteProjection;

/// Why a fire request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRejection {
    NoWeapon,
    CoolingDown,
    OutOfAmmo,
}

/// Try to fire the current weapon at sim time `now_ms`
///
/// On success the ammo is spent, the cooldown restarts and the weapon's
/// damage is returned.
pub fn try_fire(player: &mut Player, now_ms: f64) -> Result<(f32, Option<u32>), FireRejection> {
    let weapon = player.weapon_mut().ok_or(FireRejection::NoWeapon)?;

    let cooldown = weapon.cooldown_ms;
    if weapon.last_fire_ms.is_some_and(|last| now_ms - last < cooldown) {
        return Err(FireRejection::CoolingDown);
    }

    match &mut weapon.ammo {
        Ammo::Unlimited => {}
        Ammo::Limited(0) => return Err(FireRejection::OutOfAmmo),
        Ammo::Limited(n) => *n -= 1,
    }

    weapon.last_fire_ms = Some(now_ms);
    Ok((weapon.damage, weapon.remaining_ammo()))
}

/// Nearest visible entity inside its crosshair band
pub fn select_target(
    projections: &[SpriteProjection],
    entities: &[MobileEntity],
    config: &EngineConfig,
    waves: &WaveConfig,
) -> Option<EntityId> {
    let center = config.center_x();
    projections
        .iter()
        .filter(|p| p.visible)
        .filter_map(|p| {
            let entity = entities.iter().find(|e| e.id == p.id)?;
            let band = entity.kind.stats(waves).hit_band;
            ((p.screen_x - center).abs() < band).then_some(p)
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
        .map(|p| p.id)
}

/// Outcome of one resolved shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotOutcome {
    pub target: EntityId,
    pub defeated: bool,
    pub was_elite: bool,
}

/// Apply `damage` to `target`, removing it if defeated
pub fn apply_hit(
    entities: &mut Vec<MobileEntity>,
    target: EntityId,
    damage: f32,
    events: &mut Vec<GameEvent>,
) -> Option<ShotOutcome> {
    let index = entities.iter().position(|e| e.id == target)?;
    let entity = &mut entities[index];
    entity.health -= damage;
    events.push(GameEvent::EntityHit {
        id: target,
        damage,
        health_fraction: entity.health_fraction(),
    });

    let was_elite = entity.kind.is_elite();
    let defeated = entity.is_dead();
    if defeated {
        events.push(GameEvent::EntityDefeated {
            id: target,
            was_elite,
        });
        entities.remove(index);
    }

    Some(ShotOutcome {
        target,
        defeated,
        was_elite,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EntityKind, Pose, Weapon};
    use glam::Vec2;

    fn player_with(weapon: Weapon) -> Player {
        let mut player = Player::new(Pose::new(Vec2::ZERO, 0.0), 100.0);
        player.weapons = vec![weapon];
        player.current_weapon = Some(0);
        player
    }

    fn projection(id: EntityId, screen_x: f32, distance: f32, visible: bool) -> SpriteProjection {
        SpriteProjection {
            id,
            distance,
            relative_bearing: 0.0,
            screen_x,
            column: Some(0),
            visible,
        }
    }

    #[test]
    fn test_cooldown_gates_fire() {
        let mut player = player_with(Weapon::pistol());

        assert_eq!(try_fire(&mut player, 0.0), Ok((20.0, None)));
        assert_eq!(try_fire(&mut player, 399.0), Err(FireRejection::CoolingDown));
        assert!(try_fire(&mut player, 400.0).is_ok());
        assert_eq!(try_fire(&mut player, 500.0), Err(FireRejection::CoolingDown));
    }

    #[test]
    fn test_limited_ammo_runs_out() {
        let mut player = player_with(Weapon::new("Test", 10.0, 0.0, Ammo::Limited(2)));
        assert_eq!(try_fire(&mut player, 0.0), Ok((10.0, Some(1))));
        assert_eq!(try_fire(&mut player, 1.0), Ok((10.0, Some(0))));
        assert_eq!(try_fire(&mut player, 2.0), Err(FireRejection::OutOfAmmo));
        // Refused shots do not restart the cooldown
        assert_eq!(player.weapons[0].last_fire_ms, Some(1.0));
    }

    #[test]
    fn test_no_weapon() {
        let mut player = player_with(Weapon::pistol());
        player.weapons.clear();
        player.current_weapon = None;
        assert_eq!(try_fire(&mut player, 0.0), Err(FireRejection::NoWeapon));
    }

    #[test]
    fn test_nearest_in_band_wins() {
        let config = EngineConfig::default();
        let waves = WaveConfig::default();
        let c = config.center_x();
        let entities: Vec<MobileEntity> = (1..=4)
            .map(|id| MobileEntity::new(id, EntityKind::Regular, Vec2::ZERO, &waves))
            .collect();
        let projections = [
            projection(1, c + 10.0, 300.0, true),
            projection(2, c - 20.0, 150.0, true),
            // Closer but hidden behind a wall
            projection(3, c, 50.0, false),
            // Closer but outside the band
            projection(4, c + 60.0, 40.0, true),
        ];
        assert_eq!(select_target(&projections, &entities, &config, &waves), Some(2));
    }

    #[test]
    fn test_elite_has_wider_band() {
        let config = EngineConfig::default();
        let waves = WaveConfig::default();
        let c = config.center_x();
        let entities = vec![
            MobileEntity::new(1, EntityKind::Regular, Vec2::ZERO, &waves),
            MobileEntity::new(2, EntityKind::Elite, Vec2::ZERO, &waves),
        ];
        let projections = [
            projection(1, c + 65.0, 100.0, true),
            projection(2, c + 65.0, 200.0, true),
        ];
        assert_eq!(select_target(&projections, &entities, &config, &waves), Some(2));
        assert_eq!(select_target(&projections[..1], &entities, &config, &waves), None);
    }

    #[test]
    fn test_apply_hit_defeats_and_removes() {
        let waves = WaveConfig::default();
        let mut entities = vec![
            MobileEntity::new(1, EntityKind::Regular, Vec2::ZERO, &waves),
            MobileEntity::new(2, EntityKind::Regular, Vec2::ZERO, &waves),
        ];
        let mut events = Vec::new();

        let outcome = apply_hit(&mut entities, 2, 20.0, &mut events).expect("target exists");
        assert!(!outcome.defeated);
        assert_eq!(
            events,
            vec![GameEvent::EntityHit {
                id: 2,
                damage: 20.0,
                health_fraction: 0.6,
            }]
        );

        events.clear();
        let outcome = apply_hit(&mut entities, 2, 40.0, &mut events).expect("target exists");
        assert!(outcome.defeated);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, 1);
        assert!(matches!(
            events.as_slice(),
            [
                GameEvent::EntityHit { health_fraction, .. },
                GameEvent::EntityDefeated { id: 2, was_elite: false },
            ] if *health_fraction == 0.0
        ));

        assert!(apply_hit(&mut entities, 99, 10.0, &mut events).is_none());
    }
}
