//! Per-tick frame pipeline
//!
//! Owns the scratch buffers shared between stages: the ray fan written by
//! the caster and read by the wall and sprite stages, and the sprite
//! projection array read by combat. Both are rebuilt in full every tick.

use super::raycast::{RaySample, cast_fan};
use super::sprites::{SpriteCommand, SpriteProjection, project_entities, sprite_commands};
use super::walls::{Backdrop, WallColumn, backdrop, project_walls};
use crate::config::{EngineConfig, WaveConfig};
use crate::sim::map::TileMap;
use crate::sim::state::{EntityId, MobileEntity, Pose};

/// Scratch state for one simulation step
#[derive(Debug, Default)]
pub struct FramePipeline {
    rays: Vec<RaySample>,
    projections: Vec<SpriteProjection>,
    tile_size: f32,
}

impl FramePipeline {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            rays: Vec::with_capacity(config.num_rays),
            projections: Vec::new(),
            tile_size: 0.0,
        }
    }

    /// Stage 1: cast the ray fan from `view`
    pub fn cast(&mut self, map: &TileMap, view: &Pose, config: &EngineConfig) -> &[RaySample] {
        self.tile_size = map.tile_size();
        // Projections from the previous tick refer to stale rays
        self.projections.clear();
        cast_fan(map, view, config, &mut self.rays);
        &self.rays
    }

    /// Ray samples from the most recent cast
    #[inline]
    pub fn rays(&self) -> &[RaySample] {
        &self.rays
    }

    /// Stage 2a: sky and floor fill behind the walls
    pub fn backdrop(&self, config: &EngineConfig) -> Backdrop {
        backdrop(config)
    }

    /// Stage 2b: wall slices from the current rays
    pub fn walls(&self, config: &EngineConfig) -> Vec<WallColumn> {
        project_walls(&self.rays, config, self.tile_size)
    }

    /// Stage 3: place every live entity against the current rays
    pub fn project(
        &mut self,
        entities: &[MobileEntity],
        view: &Pose,
        config: &EngineConfig,
    ) -> &[SpriteProjection] {
        project_entities(entities, view, &self.rays, config, &mut self.projections);
        &self.projections
    }

    /// Projections from the most recent `project` call
    #[inline]
    pub fn projections(&self) -> &[SpriteProjection] {
        &self.projections
    }

    pub fn projection(&self, id: EntityId) -> Option<&SpriteProjection> {
        self.projections.iter().find(|p| p.id == id)
    }

    /// Stage 4: back-to-front sprite commands for entities still alive
    pub fn sprites(
        &self,
        entities: &[MobileEntity],
        config: &EngineConfig,
        waves: &WaveConfig,
    ) -> Vec<SpriteCommand> {
        sprite_commands(entities, &self.projections, config, waves, self.tile_size)
    }
}
