//! Fixed-timestep session driver
//!
//! Feeds variable host frame deltas through an accumulator into 60 Hz
//! ticks. Discrete inputs (fire, weapon switch, mouse turn) apply on the
//! first substep of a frame only; analog movement applies to every substep.

use super::map::TileMap;
use super::state::{GameState, SessionPhase};
use super::tick::{TickInput, TickOutput, tick};
use super::wave::begin_wave;
use crate::config::{EngineConfig, WaveConfig};
use crate::consts::*;
use crate::error::EngineError;
use crate::render::FramePipeline;

/// A running game: state, frame scratch buffers and the step accumulator
#[derive(Debug)]
pub struct Session {
    pub state: GameState,
    pipeline: FramePipeline,
    accumulator: f32,
}

impl Session {
    /// Validate everything and start wave 1
    pub fn new(
        map: TileMap,
        config: EngineConfig,
        waves: WaveConfig,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let pipeline = FramePipeline::new(&config);
        let mut state = GameState::new(map, config, waves, seed)?;
        begin_wave(&mut state, 1, &mut Vec::new());
        log::info!("Session started with seed {seed}");
        Ok(Self {
            state,
            pipeline,
            accumulator: 0.0,
        })
    }

    /// Default arena with default tuning
    pub fn with_default_level(seed: u64) -> Result<Self, EngineError> {
        Self::new(
            TileMap::default_level(),
            EngineConfig::default(),
            WaveConfig::default(),
            seed,
        )
    }

    /// Advance by a host frame delta (seconds)
    ///
    /// Returns None when the frame was too short for a whole step. Events of
    /// all substeps are merged; draw commands come from the last one. The
    /// frame ends early on the step where the player is defeated.
    pub fn advance(&mut self, frame_dt: f32, input: &TickInput) -> Option<TickOutput> {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut input = input.clone();
        let mut output: Option<TickOutput> = None;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let mut out = tick(&mut self.state, &mut self.pipeline, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.fire = false;
            input.switch_weapon = false;
            input.turn = 0.0;

            if let Some(prev) = output.take() {
                let mut events = prev.events;
                events.append(&mut out.events);
                out.events = events;
            }
            output = Some(out);

            if self.state.phase == SessionPhase::Defeated {
                self.accumulator = 0.0;
                break;
            }
        }
        output
    }

    /// Run exactly one fixed step, bypassing the accumulator
    pub fn step(&mut self, input: &TickInput) -> TickOutput {
        tick(&mut self.state, &mut self.pipeline, input, SIM_DT)
    }

    #[inline]
    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// Start over on the same map and seed
    pub fn reset(&mut self) {
        self.state.reset();
        self.accumulator = 0.0;
        begin_wave(&mut self.state, 1, &mut Vec::new());
        log::info!("Session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameEvent;

    #[test]
    fn test_new_session_starts_wave_one() {
        let session = Session::with_default_level(1).expect("default session");
        assert_eq!(session.state.wave.number, 1);
        assert_eq!(session.state.entities.len(), 3);
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut session = Session::with_default_level(1).expect("default session");
        let input = TickInput::default();
        assert!(session.advance(SIM_DT * 0.5, &input).is_none());
        let out = session.advance(SIM_DT * 0.6, &input).expect("one step");
        assert_eq!(out.walls.len(), session.state.config.num_rays);
        assert_eq!(session.state.time_ticks, 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut session = Session::with_default_level(1).expect("default session");
        session.advance(5.0, &TickInput::default());
        // 0.1 s is six steps give or take rounding
        assert!((5..=6).contains(&session.state.time_ticks));
    }

    #[test]
    fn test_one_shot_inputs_apply_once_per_frame() {
        let mut session = Session::with_default_level(1).expect("default session");
        let input = TickInput {
            turn: 0.25,
            fire: true,
            ..Default::default()
        };
        let out = session.advance(SIM_DT * 4.5, &input).expect("several steps");
        assert_eq!(session.state.time_ticks, 4);
        assert!((session.state.player.pose.heading - 0.25).abs() < 1e-6);
        let shots = out
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::WeaponFireAccepted { .. }))
            .count();
        assert_eq!(shots, 1);
    }

    #[test]
    fn test_same_seed_same_run() {
        let script = [
            TickInput {
                forward: 1.0,
                ..Default::default()
            },
            TickInput {
                turn: 0.3,
                fire: true,
                ..Default::default()
            },
            TickInput {
                strafe: -1.0,
                ..Default::default()
            },
        ];
        let run = |seed| {
            let mut session = Session::with_default_level(seed).expect("default session");
            for i in 0..300 {
                session.step(&script[i % script.len()]);
            }
            serde_json::to_string(&session.state).expect("serializable")
        };
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn test_death_frame_keeps_draw_commands() {
        let mut session = Session::with_default_level(1).expect("default session");
        let pos = session.state.player.pose.pos + glam::Vec2::new(20.0, 0.0);
        session.state.entities.clear();
        session
            .state
            .spawn_entity(crate::sim::state::EntityKind::Regular, pos)
            .expect("open tile");
        session.state.player.health = 0.4;

        // Several steps due, the first one is fatal
        let out = session
            .advance(SIM_DT * 3.5, &TickInput::default())
            .expect("steps ran");
        assert_eq!(session.phase(), SessionPhase::Defeated);
        assert_eq!(session.state.time_ticks, 1);
        assert_eq!(out.walls.len(), session.state.config.num_rays);
        assert!(out.backdrop.is_some());
        assert_eq!(out.sprites.len(), 1);
        assert_eq!(
            out.events,
            vec![
                GameEvent::PlayerDamaged { amount: 0.5 },
                GameEvent::PlayerDefeated
            ]
        );
    }

    #[test]
    fn test_reset_restarts_wave_one() {
        let mut session = Session::with_default_level(1).expect("default session");
        session.state.player.health = 0.0;
        session.state.phase = SessionPhase::Defeated;
        assert_eq!(session.step(&TickInput::default()), TickOutput::default());

        session.reset();
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.state.wave.number, 1);
        assert!(!session.state.entities.is_empty());
        assert_eq!(session.state.time_ticks, 0);
    }
}
