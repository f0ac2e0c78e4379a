/// Entity registry: one ordered category per kind of entity, plus the
/// timestamps shared by the whole run.

use crate::entities::{
    Enemy, Entity, EntityId, GameStatus, OverlayText, Projectile, Ship, ShipPhase,
};
use crate::constants::INVULNERABILITY_MS;
use crate::geometry::Vec2;

/// Ordered, growable collection of live entities of one kind.
///
/// Order only matters as iteration order for the update and render passes.
#[derive(Clone, Debug)]
pub struct Category<T> {
    items: Vec<T>,
}

impl<T> Default for Category<T> {
    fn default() -> Self {
        Category { items: Vec::new() }
    }
}

impl<T: Entity> Category<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append and hand back the stored entity.
    pub fn add(&mut self, entity: T) -> &T {
        self.items.push(entity);
        let last = self.items.len() - 1;
        &self.items[last]
    }

    /// Remove the first entity with `id`. Absent ids are ignored.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let index = self.items.iter().position(|e| e.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Snapshot of the ids currently live, in iteration order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.items.iter().map(|e| e.id()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Category<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// The entire game state. Cloneable so `compute::tick` can return a new copy.
#[derive(Clone, Debug)]
pub struct World {
    pub players: Category<Ship>,
    pub enemies: Category<Enemy>,
    pub lasers: Category<Projectile>,
    pub ui: Category<OverlayText>,
    /// Milliseconds timestamp the run started at; invulnerability counts from here.
    pub spawn_time: f64,
    /// Timestamp of the most recent shot, if any.
    pub last_shot: Option<f64>,
    /// Update passes completed.
    pub frame: u64,
    next_id: u64,
}

impl World {
    /// An empty world whose clock starts at `spawn_time`.
    pub fn new(spawn_time: f64) -> Self {
        World {
            players: Category::new(),
            enemies: Category::new(),
            lasers: Category::new(),
            ui: Category::new(),
            spawn_time,
            last_shot: None,
            frame: 0,
            next_id: 0,
        }
    }

    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_ship(&mut self) -> EntityId {
        let id = self.allocate_id();
        self.players.add(Ship::new(id)).id
    }

    pub fn spawn_enemy(&mut self, build: impl FnOnce(EntityId) -> Enemy) -> EntityId {
        let id = self.allocate_id();
        self.enemies.add(build(id)).id
    }

    pub fn spawn_projectile(&mut self, position: Vec2, direction: f64) -> EntityId {
        let id = self.allocate_id();
        self.lasers.add(Projectile::new(id, position, direction)).id
    }

    /// Adds the "GAME OVER" overlay unless one is already showing.
    pub fn spawn_game_over(&mut self) -> Option<EntityId> {
        if !self.ui.is_empty() {
            return None;
        }
        let id = self.allocate_id();
        Some(self.ui.add(OverlayText::game_over(id)).id)
    }

    /// Milliseconds since the run started.
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.spawn_time
    }

    pub fn ship_phase(&self, now: f64) -> ShipPhase {
        if self.players.is_empty() {
            ShipPhase::Destroyed
        } else if self.elapsed(now) > INVULNERABILITY_MS {
            ShipPhase::Active
        } else {
            ShipPhase::Invulnerable
        }
    }

    pub fn status(&self) -> GameStatus {
        if self.ui.is_empty() {
            GameStatus::Playing
        } else {
            GameStatus::GameOver
        }
    }
}
