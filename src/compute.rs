/// Game-logic functions.
///
/// `tick` takes an immutable reference to the current `World` (plus the
/// held buttons, the clock and an RNG handle) and returns the next `World`.
/// Side effects are limited to the injected RNG and log events.

use rand::Rng;
use tracing::{debug, info};

use crate::collision::boxes_overlap;
use crate::constants::{
    FIRE_COOLDOWN_MS, FRAGMENT_COUNT, INITIAL_ENEMIES, INVULNERABILITY_MS, SPLIT_THRESHOLD,
};
use crate::entities::{Enemy, Entity, EntityId};
use crate::geometry::Vec2;
use crate::input::InputState;
use crate::world::World;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the starting world: one ship at the centre and a handful of enemies.
pub fn init_state(spawn_time: f64, rng: &mut impl Rng) -> World {
    let mut world = World::new(spawn_time);
    world.spawn_ship();
    for _ in 0..INITIAL_ENEMIES {
        world.spawn_enemy(|id| Enemy::random(id, &mut *rng));
    }
    world
}

// ── Per-frame update pass ────────────────────────────────────────────────────

/// Advance the simulation by one frame at wall-clock time `now` (ms).
///
/// Categories update in registry order: players, enemies, lasers, ui. All
/// randomness comes through `rng` so tests can seed it.
pub fn tick(world: &World, input: &InputState, now: f64, rng: &mut impl Rng) -> World {
    let mut next = world.clone();

    update_players(&mut next, input, now);
    update_enemies(&mut next);
    update_lasers(&mut next, rng);
    // The overlay has nothing to update.

    next.frame += 1;
    next
}

fn update_players(world: &mut World, input: &InputState, now: f64) {
    let elapsed = world.elapsed(now);

    for id in world.players.ids() {
        // ── 1. Enemy contact ─────────────────────────────────────────────────
        let ship_box = match world.players.get(id) {
            Some(ship) => ship.bounding_box(),
            None => continue,
        };
        let hit = world
            .enemies
            .iter()
            .any(|e| boxes_overlap(ship_box.as_ref(), e.bounding_box().as_ref()));
        if hit && elapsed > INVULNERABILITY_MS {
            world.players.remove(id);
            world.spawn_game_over();
            info!(frame = world.frame, elapsed_ms = elapsed, "ship destroyed");
            continue;
        }

        // ── 2. Controls ──────────────────────────────────────────────────────
        let (position, rotation) = match world.players.get_mut(id) {
            Some(ship) => {
                ship.frame_counter += 1;
                ship.steer(input);
                (ship.position, ship.rotation)
            }
            None => continue,
        };

        // ── 3. Fire ──────────────────────────────────────────────────────────
        let cooled_down = world
            .last_shot
            .map_or(true, |last| now - last >= FIRE_COOLDOWN_MS);
        if input.fire && cooled_down {
            let laser = world.spawn_projectile(position, rotation);
            world.last_shot = Some(now);
            debug!(?laser, x = position.x, y = position.y, rotation, "projectile fired");
        }

        // ── 4. Move ──────────────────────────────────────────────────────────
        if let Some(ship) = world.players.get_mut(id) {
            ship.integrate();
        }
    }
}

fn update_enemies(world: &mut World) {
    for enemy in world.enemies.iter_mut() {
        enemy.advance();
    }
}

/// Projectiles either leave the world, destroy one enemy, or fly on.
///
/// Kills are collected during the pass and applied afterwards: an enemy hit
/// by one projectile cannot be hit again in the same frame, and fragments
/// join the registry only once the pass is over.
fn update_lasers(world: &mut World, rng: &mut impl Rng) {
    let mut spent: Vec<EntityId> = Vec::new();
    let mut struck: Vec<EntityId> = Vec::new();
    let mut splits: Vec<Vec2> = Vec::new();

    for laser in world.lasers.iter_mut() {
        if !laser.on_screen() {
            spent.push(laser.id);
            continue;
        }

        let laser_box = laser.bounding_box();
        let target = world.enemies.iter().find(|e| {
            !struck.contains(&e.id)
                && boxes_overlap(laser_box.as_ref(), e.bounding_box().as_ref())
        });

        if let Some(enemy) = target {
            debug!(laser = ?laser.id, enemy = ?enemy.id, size = enemy.size, "enemy hit");
            if enemy.size > SPLIT_THRESHOLD {
                splits.push(enemy.position);
            }
            struck.push(enemy.id);
            spent.push(laser.id);
            continue;
        }

        laser.advance();
    }

    for id in spent {
        world.lasers.remove(id);
    }
    for id in struck {
        world.enemies.remove(id);
    }
    for position in splits {
        for index in 0..FRAGMENT_COUNT {
            world.spawn_enemy(|id| Enemy::fragment(id, position, index, &mut *rng));
        }
        debug!(x = position.x, y = position.y, "enemy split");
    }
}
