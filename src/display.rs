/// Rendering layer.
///
/// Draw routines receive a `Surface` and an immutable view of the world. No
/// game logic happens here; this module only translates state into drawing
/// calls. Every routine leaves the surface transform as it found it.

use crate::constants::{
    BLINK_PERIOD, GAME_OVER_FONT, INVULNERABILITY_MS, PROJECTILE_SIZE, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::entities::{Enemy, OverlayText, Projectile, Ship};
use crate::geometry::deg_to_rad;
use crate::world::World;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Immediate-mode 2D drawing in world units, modelled on a canvas context.
///
/// Paths accumulate between `begin_path` and `stroke`/`fill`; path points
/// are mapped through the transform current at the time they are added.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn translate(&mut self, x: f64, y: f64);
    /// Clockwise rotation in radians.
    fn rotate(&mut self, radians: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    /// Adds a closed rectangle sub-path.
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame at wall-clock time `now` (ms).
pub fn render<S: Surface>(surface: &mut S, world: &World, now: f64) {
    surface.clear_rect(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT);

    let elapsed = world.elapsed(now);
    for ship in &world.players {
        draw_ship(surface, ship, elapsed);
    }
    for enemy in &world.enemies {
        draw_enemy(surface, enemy);
    }
    for laser in &world.lasers {
        draw_projectile(surface, laser);
    }
    for text in &world.ui {
        draw_overlay(surface, text);
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// True on frames where an invulnerable ship is hidden.
pub fn ship_blinked_out(ship: &Ship, elapsed: f64) -> bool {
    elapsed < INVULNERABILITY_MS && ship.frame_counter % BLINK_PERIOD < BLINK_PERIOD / 2
}

pub fn draw_ship<S: Surface>(surface: &mut S, ship: &Ship, elapsed: f64) {
    if ship_blinked_out(ship, elapsed) {
        return;
    }

    // Nose up in ship space:
    //     (0,-10)
    //    /      \
    // (-5,10)──(5,10)
    let (x, y) = (ship.position.x, ship.position.y);
    let r = deg_to_rad(ship.rotation);
    surface.translate(x, y);
    surface.rotate(r);
    surface.begin_path();
    surface.move_to(0.0, -10.0);
    surface.line_to(-5.0, 10.0);
    surface.line_to(5.0, 10.0);
    surface.close_path();
    surface.stroke();
    surface.rotate(-r);
    surface.translate(-x, -y);
}

pub fn draw_enemy<S: Surface>(surface: &mut S, enemy: &Enemy) {
    let (x, y) = (enemy.position.x, enemy.position.y);
    surface.translate(x, y);
    surface.begin_path();
    surface.rect(0.0, 0.0, enemy.size, enemy.size);
    surface.stroke();
    surface.translate(-x, -y);
}

pub fn draw_projectile<S: Surface>(surface: &mut S, laser: &Projectile) {
    let (x, y) = (laser.position.x, laser.position.y);
    surface.translate(x, y);
    surface.begin_path();
    surface.rect(0.0, 0.0, PROJECTILE_SIZE, PROJECTILE_SIZE);
    surface.fill();
    surface.translate(-x, -y);
}

pub fn draw_overlay<S: Surface>(surface: &mut S, text: &OverlayText) {
    surface.set_font(GAME_OVER_FONT);
    surface.set_text_align(TextAlign::Center);
    surface.fill_text(text.text, text.position.x, text.position.y);
}
