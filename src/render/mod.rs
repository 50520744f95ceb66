//! Raycast rendering into host draw commands
//!
//! Nothing here touches a GPU or canvas: every stage turns simulation state
//! into plain draw commands that the host page paints.

pub mod color;
pub mod pipeline;
pub mod raycast;
pub mod sprites;
pub mod walls;

pub use color::Rgb;
pub use pipeline::FramePipeline;
pub use raycast::{HitOrientation, RaySample, cast_ray};
pub use sprites::{HealthBar, SpriteCommand, SpriteProjection};
pub use walls::{Backdrop, FillRect, WallColumn};
