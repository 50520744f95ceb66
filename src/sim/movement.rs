//! Movement and wall collision
//!
//! Axis-separated sliding against the tile grid: the X move is tried first,
//! then the Y move from wherever X ended up. Each axis is accepted only if
//! it lands in an empty cell, so corners cannot be cut diagonally.

use glam::Vec2;

use super::map::TileMap;
use super::state::Pose;
use crate::normalize_angle;

/// Result of sliding a position against the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideResult {
    pub pos: Vec2,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

/// Apply `delta` to `pos`, one axis at a time
pub fn slide(map: &TileMap, pos: Vec2, delta: Vec2) -> SlideResult {
    let mut out = pos;

    let try_x = Vec2::new(pos.x + delta.x, out.y);
    let blocked_x = delta.x != 0.0 && map.is_wall(try_x);
    if delta.x != 0.0 && !blocked_x {
        out.x = try_x.x;
    }

    let try_y = Vec2::new(out.x, pos.y + delta.y);
    let blocked_y = delta.y != 0.0 && map.is_wall(try_y);
    if delta.y != 0.0 && !blocked_y {
        out.y = try_y.y;
    }

    SlideResult {
        pos: out,
        blocked_x,
        blocked_y,
    }
}

/// Zero out analog input inside the dead zone, clamp the rest to [-1, 1]
#[inline]
pub fn apply_dead_zone(axis: f32, dead_zone: f32) -> f32 {
    if !axis.is_finite() || axis.abs() <= dead_zone {
        0.0
    } else {
        axis.clamp(-1.0, 1.0)
    }
}

/// World-space displacement for forward/strafe input at `heading`
///
/// Positive strafe moves to the right of the view (heading + π/2).
pub fn intent_delta(heading: f32, forward: f32, strafe: f32, distance: f32) -> Vec2 {
    let fwd = Vec2::new(heading.cos(), heading.sin());
    let right = Vec2::new(-heading.sin(), heading.cos());
    (fwd * forward + right * strafe) * distance
}

/// Move a pose by analog input; turning is never blocked
#[allow(clippy::too_many_arguments)]
pub fn integrate_pose(
    pose: &mut Pose,
    map: &TileMap,
    forward: f32,
    strafe: f32,
    turn: f32,
    speed: f32,
    dead_zone: f32,
    dt: f32,
) -> SlideResult {
    let forward = apply_dead_zone(forward, dead_zone);
    let strafe = apply_dead_zone(strafe, dead_zone);
    let delta = intent_delta(pose.heading, forward, strafe, speed * dt);

    let result = slide(map, pose.pos, delta);
    pose.pos = result.pos;
    if turn.is_finite() {
        pose.heading = normalize_angle(pose.heading + turn);
    }
    result
}

/// Step `pose` toward `target` by `step` units, sliding on walls
///
/// The heading is turned to face the target even when the move is blocked.
pub fn step_toward(pose: &mut Pose, map: &TileMap, target: Vec2, step: f32) -> SlideResult {
    let to_target = target - pose.pos;
    let dist = to_target.length();
    if dist > f32::EPSILON {
        pose.heading = normalize_angle(to_target.y.atan2(to_target.x));
    }
    let delta = to_target.normalize_or_zero() * step.min(dist);
    let result = slide(map, pose.pos, delta);
    pose.pos = result.pos;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    /// L-shaped block: walls at (3,2), (2,3), (3,3)
    fn l_room() -> TileMap {
        TileMap::from_ascii(
            "
            ######
            #....#
            #..#.#
            #.##.#
            #....#
            ######
            ",
            10.0,
        )
        .expect("valid map")
    }

    #[test]
    fn test_diagonal_into_corner_blocks_one_axis() {
        let map = l_room();
        let start = Vec2::new(25.0, 25.0);

        // East is wall (3,2); north (2,1) is open
        let result = slide(&map, start, Vec2::new(8.0, -8.0));
        assert!(result.blocked_x);
        assert!(!result.blocked_y);
        assert_eq!(result.pos, Vec2::new(25.0, 17.0));
        assert!(!map.is_wall(result.pos));

        // West is open (1,2); south (1,3) open after the X move
        let result = slide(&map, start, Vec2::new(-8.0, 8.0));
        assert!(!result.blocked_x && !result.blocked_y);
        assert_eq!(result.pos, Vec2::new(17.0, 33.0));
    }

    #[test]
    fn test_no_corner_cutting() {
        let map = l_room();
        // From (2,1) the diagonal neighbour (3,2) is wall, both orthogonal
        // neighbours are open: X goes through, Y is refused
        let result = slide(&map, Vec2::new(29.0, 19.0), Vec2::new(2.0, 2.0));
        assert!(!result.blocked_x);
        assert!(result.blocked_y);
        assert_eq!(result.pos, Vec2::new(31.0, 19.0));
    }

    #[test]
    fn test_repeated_diagonal_never_enters_wall() {
        let map = l_room();
        for delta in [
            Vec2::new(1.7, 1.3),
            Vec2::new(-2.1, 1.9),
            Vec2::new(2.9, -0.4),
            Vec2::new(-1.1, -3.3),
        ] {
            let mut pos = Vec2::new(15.0, 15.0);
            for _ in 0..200 {
                pos = slide(&map, pos, delta).pos;
                assert!(!map.is_wall(pos), "entered wall at {pos:?}");
            }
        }
    }

    #[test]
    fn test_dead_zone() {
        assert_eq!(apply_dead_zone(0.05, 0.1), 0.0);
        assert_eq!(apply_dead_zone(-0.1, 0.1), 0.0);
        assert_eq!(apply_dead_zone(0.5, 0.1), 0.5);
        assert_eq!(apply_dead_zone(3.0, 0.1), 1.0);
        assert_eq!(apply_dead_zone(f32::NAN, 0.1), 0.0);
    }

    #[test]
    fn test_strafe_is_perpendicular() {
        let d = intent_delta(0.0, 0.0, 1.0, 10.0);
        assert!(d.x.abs() < 1e-5);
        assert!((d.y - 10.0).abs() < 1e-5);

        let d = intent_delta(FRAC_PI_2, 1.0, 0.0, 10.0);
        assert!(d.x.abs() < 1e-5);
        assert!((d.y - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_turn_never_blocked() {
        let map = l_room();
        let mut pose = Pose::new(Vec2::new(25.0, 25.0), 0.0);
        // Facing the wall with forward input: position holds, heading turns
        let result = integrate_pose(&mut pose, &map, 1.0, 0.0, 0.5, 480.0, 0.1, 1.0 / 60.0);
        assert!(result.blocked_x);
        assert_eq!(pose.pos, Vec2::new(25.0, 25.0));
        assert!((pose.heading - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_step_toward_stops_at_target() {
        let map = l_room();
        let mut pose = Pose::new(Vec2::new(15.0, 15.0), 0.0);
        step_toward(&mut pose, &map, Vec2::new(18.0, 15.0), 10.0);
        assert_eq!(pose.pos, Vec2::new(18.0, 15.0));
        assert!(pose.heading.abs() < 1e-6);
    }
}
