/// Angle and vector helpers.
///
/// Angles are in degrees, 0 points up (towards −y) and positive angles turn
/// clockwise on screen.

use crate::constants::{WORLD_HEIGHT, WORLD_WIDTH};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Offset of travelling `distance` along heading `angle`.
pub fn direction_to_offset(angle: f64, distance: f64) -> (f64, f64) {
    let rad = deg_to_rad(angle);
    (distance * rad.sin(), -distance * rad.cos())
}

pub fn move_point(position: Vec2, angle: f64, distance: f64) -> Vec2 {
    let (dx, dy) = direction_to_offset(angle, distance);
    Vec2::new(position.x + dx, position.y + dy)
}

/// Adds one frame of acceleration of magnitude `amount` along `angle`.
pub fn apply_thrust(velocity: Vec2, angle: f64, amount: f64) -> Vec2 {
    let (dx, dy) = direction_to_offset(angle, amount);
    Vec2::new(velocity.x + dx, velocity.y + dy)
}

/// Re-enter from the opposite edge once a coordinate leaves the world.
///
/// This snaps to the far boundary instead of carrying the overshoot over, so
/// x = −5 becomes 400 rather than 395.
pub fn wrap_around(position: Vec2) -> Vec2 {
    let mut p = position;
    if p.x < 0.0 {
        p.x = WORLD_WIDTH;
    } else if p.x > WORLD_WIDTH {
        p.x = 0.0;
    }
    if p.y < 0.0 {
        p.y = WORLD_HEIGHT;
    } else if p.y > WORLD_HEIGHT {
        p.y = 0.0;
    }
    p
}

/// True while `position` lies inside the closed world rectangle.
pub fn in_bounds(position: Vec2) -> bool {
    (0.0..=WORLD_WIDTH).contains(&position.x) && (0.0..=WORLD_HEIGHT).contains(&position.y)
}
