//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No platform dependencies

pub mod chase;
pub mod combat;
pub mod map;
pub mod movement;
pub mod session;
pub mod state;
pub mod tick;
pub mod wave;

pub use combat::FireRejection;
pub use map::{Cell, TileMap};
pub use movement::{SlideResult, slide};
pub use session::Session;
pub use state::{
    Ammo, EntityId, EntityKind, GameEvent, GameState, MobileEntity, Player, Pose, RngState,
    SessionPhase, WaveState, Weapon,
};
pub use tick::{TickInput, TickOutput, tick};
