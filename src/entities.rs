/// All game entity types and their per-frame physics.
///
/// Nothing in here touches the registry; spawning and removal are driven by
/// `compute`, which owns the interactions between categories.

use rand::Rng;

use crate::collision::BoundingBox;
use crate::constants::{
    ENEMY_MAX_SIZE, ENEMY_MAX_SPEED, ENEMY_MIN_SIZE, ENEMY_MIN_SPEED, FRAGMENT_SIZE,
    FRAGMENT_SPEED, FRAGMENT_SPREAD, GAME_OVER_TEXT, PROJECTILE_SIZE, PROJECTILE_SPEED,
    SHIP_BOX_SIZE, SHIP_DRAG, SHIP_SPAWN, SHIP_START_ROTATION, SHIP_THRUST, SHIP_TURN_RATE,
    WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::geometry::{apply_thrust, in_bounds, move_point, wrap_around, Vec2};
use crate::input::InputState;

/// World-unique handle used for identity-based removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Anything that can live in a registry category.
pub trait Entity {
    fn id(&self) -> EntityId;

    /// Collision box derived from the current position, if the entity has one.
    fn bounding_box(&self) -> Option<BoundingBox>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Life cycle of the player ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipPhase {
    /// Enemy contact is ignored; the ship blinks.
    Invulnerable,
    Active,
    /// Removed from the registry. Terminal for the run.
    Destroyed,
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Heading in degrees, 0 = up.
    pub rotation: f64,
    /// Frames lived so far; drives the blink while invulnerable.
    pub frame_counter: u64,
}

impl Ship {
    pub fn new(id: EntityId) -> Self {
        Ship {
            id,
            position: Vec2::new(SHIP_SPAWN.0, SHIP_SPAWN.1),
            velocity: Vec2::ZERO,
            rotation: SHIP_START_ROTATION,
            frame_counter: 0,
        }
    }

    /// Turn and thrust according to the held buttons.
    pub fn steer(&mut self, input: &InputState) {
        if input.left {
            self.rotation -= SHIP_TURN_RATE;
        }
        if input.right {
            self.rotation += SHIP_TURN_RATE;
        }
        if input.thrust {
            self.velocity = apply_thrust(self.velocity, self.rotation, SHIP_THRUST);
        }
    }

    /// Move by velocity, apply drag, then wrap.
    pub fn integrate(&mut self) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;

        self.velocity.x /= SHIP_DRAG;
        self.velocity.y /= SHIP_DRAG;

        self.position = wrap_around(self.position);
    }
}

impl Entity for Ship {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        let half = SHIP_BOX_SIZE / 2.0;
        Some(BoundingBox::new(
            self.position.x - half,
            self.position.y - half,
            SHIP_BOX_SIZE,
            SHIP_BOX_SIZE,
        ))
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EntityId,
    /// Top-left corner of the square.
    pub position: Vec2,
    pub size: f64,
    /// Heading in degrees.
    pub direction: f64,
    /// Units per frame.
    pub speed: f64,
}

impl Enemy {
    /// A full-sized enemy somewhere in the world, drifting in a random direction.
    pub fn random(id: EntityId, rng: &mut impl Rng) -> Self {
        Enemy {
            id,
            position: Vec2::new(
                rng.gen_range(0.0..WORLD_WIDTH),
                rng.gen_range(0.0..WORLD_HEIGHT),
            ),
            size: rng.gen_range(ENEMY_MIN_SIZE..ENEMY_MAX_SIZE),
            direction: rng.gen_range(0.0..360.0),
            speed: rng.gen_range(ENEMY_MIN_SPEED..ENEMY_MAX_SPEED),
        }
    }

    /// Fragment `index` of a split: launched into its own quadrant with jitter.
    pub fn fragment(id: EntityId, position: Vec2, index: usize, rng: &mut impl Rng) -> Self {
        Enemy {
            id,
            position,
            size: FRAGMENT_SIZE,
            direction: FRAGMENT_SPREAD * index as f64 + rng.gen_range(0.0..FRAGMENT_SPREAD),
            speed: FRAGMENT_SPEED,
        }
    }

    /// Straight-line drift with wrap-around.
    pub fn advance(&mut self) {
        self.position = wrap_around(move_point(self.position, self.direction, self.speed));
    }
}

impl Entity for Enemy {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        Some(BoundingBox::new(
            self.position.x,
            self.position.y,
            self.size,
            self.size,
        ))
    }
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec2,
    pub direction: f64,
}

impl Projectile {
    pub fn new(id: EntityId, position: Vec2, direction: f64) -> Self {
        Projectile {
            id,
            position,
            direction,
        }
    }

    /// Projectiles do not wrap; they are discarded once outside the world.
    pub fn on_screen(&self) -> bool {
        in_bounds(self.position)
    }

    pub fn advance(&mut self) {
        self.position = move_point(self.position, self.direction, PROJECTILE_SPEED);
    }
}

impl Entity for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        Some(BoundingBox::new(
            self.position.x,
            self.position.y,
            PROJECTILE_SIZE,
            PROJECTILE_SIZE,
        ))
    }
}

// ── Overlay text ──────────────────────────────────────────────────────────────

/// Static text drawn over the play field. Has no physics and never collides.
#[derive(Clone, Debug)]
pub struct OverlayText {
    pub id: EntityId,
    pub position: Vec2,
    pub text: &'static str,
}

impl OverlayText {
    pub fn game_over(id: EntityId) -> Self {
        OverlayText {
            id,
            position: Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0),
            text: GAME_OVER_TEXT,
        }
    }
}

impl Entity for OverlayText {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        None
    }
}
