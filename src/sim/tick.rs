//! Fixed timestep simulation tick
//!
//! One tick runs the whole frame pipeline in order: player movement, ray
//! cast, wall projection, alien chase and melee, sprite projection, combat,
//! sprite draw list, wave bookkeeping. Draw commands and events for the
//! host come back in a `TickOutput`.

use serde::{Deserialize, Serialize};

use super::chase::advance_entities;
use super::combat::{apply_hit, select_target, try_fire};
use super::movement::integrate_pose;
use super::state::{GameEvent, GameState, SessionPhase};
use super::wave::{roll_weapon_drop, update_waves};
use crate::render::{Backdrop, FramePipeline, SpriteCommand, WallColumn};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    /// Forward/back axis in [-1, 1]
    pub forward: f32,
    /// Right/left axis in [-1, 1]
    pub strafe: f32,
    /// Heading change in radians
    pub turn: f32,
    pub fire: bool,
    /// Cycle to the next weapon in the roster
    pub switch_weapon: bool,
}

/// Everything the host needs to draw and react to one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    /// Sky and floor, painted first (None once the session is over)
    pub backdrop: Option<Backdrop>,
    /// Left to right
    pub walls: Vec<WallColumn>,
    /// Back to front
    pub sprites: Vec<SpriteCommand>,
    pub events: Vec<GameEvent>,
}

/// Advance the game state by one fixed timestep
pub fn tick(
    state: &mut GameState,
    pipeline: &mut FramePipeline,
    input: &TickInput,
    dt: f32,
) -> TickOutput {
    if state.phase == SessionPhase::Defeated {
        return TickOutput::default();
    }

    state.time_ticks += 1;
    state.time_ms += dt as f64 * 1000.0;
    let mut events = Vec::new();

    if input.switch_weapon && state.player.weapons.len() > 1 {
        if let Some(index) = state.player.cycle_weapon() {
            let name = state.player.weapons[index].name.clone();
            log::debug!("Switched to {name}");
            events.push(GameEvent::WeaponSwitched { index, name });
        }
    }

    // Player
    let speed = state.config.player_speed;
    let dead_zone = state.config.input_dead_zone;
    integrate_pose(
        &mut state.player.pose,
        &state.map,
        input.forward,
        input.strafe,
        input.turn,
        speed,
        dead_zone,
        dt,
    );
    let view = state.player.pose;

    // Walls
    pipeline.cast(&state.map, &view, &state.config);
    let backdrop = pipeline.backdrop(&state.config);
    let walls = pipeline.walls(&state.config);

    // Aliens close in; melee damage is summed into one event
    let damage = advance_entities(
        &mut state.entities,
        view.pos,
        &state.map,
        &state.waves,
        dt,
    );
    if damage > 0.0 {
        state.player.health = (state.player.health - damage).max(0.0);
        events.push(GameEvent::PlayerDamaged { amount: damage });
        if state.player.health <= 0.0 {
            state.phase = SessionPhase::Defeated;
            log::info!(
                "Player defeated on wave {} with {} kills",
                state.wave.number,
                state.kills
            );
            events.push(GameEvent::PlayerDefeated);
        }
    }

    pipeline.project(&state.entities, &view, &state.config);

    if input.fire && state.phase == SessionPhase::Active {
        resolve_fire(state, pipeline, &mut events);
    }

    // Built after combat so this tick's kills are not drawn
    let sprites = pipeline.sprites(&state.entities, &state.config, &state.waves);

    if state.phase == SessionPhase::Active {
        update_waves(state, &mut events);
    }

    TickOutput {
        backdrop: Some(backdrop),
        walls,
        sprites,
        events,
    }
}

fn resolve_fire(state: &mut GameState, pipeline: &FramePipeline, events: &mut Vec<GameEvent>) {
    // No weapon, cooldown and empty magazine are all silent
    let Ok((damage, remaining_ammo)) = try_fire(&mut state.player, state.time_ms) else {
        return;
    };
    events.push(GameEvent::WeaponFireAccepted { remaining_ammo });

    let Some(target) = select_target(
        pipeline.projections(),
        &state.entities,
        &state.config,
        &state.waves,
    ) else {
        return;
    };
    let Some(outcome) = apply_hit(&mut state.entities, target, damage, events) else {
        return;
    };
    if !outcome.defeated {
        return;
    }

    state.kills += 1;
    log::debug!(
        "Alien {} defeated (elite: {}), kills: {}",
        outcome.target,
        outcome.was_elite,
        state.kills
    );

    let mut rng = state.rng_state.next_rng();
    if let Some(weapon) = roll_weapon_drop(&mut rng, &state.player, &state.waves) {
        log::debug!("Picked up {}", weapon.name);
        events.push(GameEvent::WeaponAcquired {
            name: weapon.name.clone(),
        });
        state.player.acquire(weapon);
    }
}
