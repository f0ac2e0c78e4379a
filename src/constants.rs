//! Gameplay constants and tuning parameters.

// --- World bounds ---

/// Logical world width. Positions wrap at this edge.
pub const WORLD_WIDTH: f64 = 400.0;

/// Logical world height.
pub const WORLD_HEIGHT: f64 = 300.0;

// --- Ship ---

/// Spawn point of the ship (centre of the world).
pub const SHIP_SPAWN: (f64, f64) = (WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);

/// Heading the ship starts with, in degrees.
pub const SHIP_START_ROTATION: f64 = 10.0;

/// Degrees turned per frame while a turn button is held.
pub const SHIP_TURN_RATE: f64 = 8.0;

/// Velocity gained per frame while thrust is held.
pub const SHIP_THRUST: f64 = 0.08;

/// Velocity is divided by this every frame.
pub const SHIP_DRAG: f64 = 1.01;

/// Side of the ship's square hit box, centred on its position.
pub const SHIP_BOX_SIZE: f64 = 10.0;

/// Milliseconds after spawn during which enemies cannot destroy the ship.
pub const INVULNERABILITY_MS: f64 = 3000.0;

/// Blink period in frames while invulnerable; the ship is hidden for the first half.
pub const BLINK_PERIOD: u64 = 10;

// --- Projectiles ---

/// Minimum milliseconds between two shots.
pub const FIRE_COOLDOWN_MS: f64 = 200.0;

/// Units travelled per frame.
pub const PROJECTILE_SPEED: f64 = 5.0;

/// Side of the square projectile hit box.
pub const PROJECTILE_SIZE: f64 = 2.0;

// --- Enemies ---

/// Enemies present when the game starts.
pub const INITIAL_ENEMIES: usize = 4;

/// Size range of freshly spawned enemies.
pub const ENEMY_MIN_SIZE: f64 = 25.0;
pub const ENEMY_MAX_SIZE: f64 = 45.0;

/// Speed range of freshly spawned enemies, units per frame.
pub const ENEMY_MIN_SPEED: f64 = 0.5;
pub const ENEMY_MAX_SPEED: f64 = 1.5;

/// Enemies larger than this break into fragments when shot.
pub const SPLIT_THRESHOLD: f64 = 20.0;

/// Fragments produced by one split.
pub const FRAGMENT_COUNT: usize = 4;

/// Size and speed of every fragment.
pub const FRAGMENT_SIZE: f64 = 15.0;
pub const FRAGMENT_SPEED: f64 = 0.7;

/// Angular sector (degrees) each fragment is launched into.
pub const FRAGMENT_SPREAD: f64 = 90.0;

// --- Overlay ---

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const GAME_OVER_FONT: &str = "16px monospace";
