use asteroids::canvas::{TerminalCanvas, Transform, CONTROLS_HINT};
use asteroids::display::*;
use asteroids::entities::*;
use asteroids::geometry::Vec2;
use asteroids::world::World;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    ClearRect,
    Translate(f64, f64),
    Rotate(f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ClosePath,
    Rect(f64, f64, f64, f64),
    Stroke,
    Fill,
    Font(String),
    Align(TextAlign),
    Text(String, f64, f64),
}

/// Records every call and tracks the transform it would produce.
#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
    transform: Transform,
}

impl Surface for Recorder {
    fn clear_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {
        self.calls.push(Call::ClearRect);
    }
    fn translate(&mut self, x: f64, y: f64) {
        self.transform.translate(x, y);
        self.calls.push(Call::Translate(x, y));
    }
    fn rotate(&mut self, radians: f64) {
        self.transform.rotate(radians);
        self.calls.push(Call::Rotate(radians));
    }
    fn begin_path(&mut self) {
        self.calls.push(Call::BeginPath);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(Call::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(Call::LineTo(x, y));
    }
    fn close_path(&mut self) {
        self.calls.push(Call::ClosePath);
    }
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.calls.push(Call::Rect(x, y, w, h));
    }
    fn stroke(&mut self) {
        self.calls.push(Call::Stroke);
    }
    fn fill(&mut self) {
        self.calls.push(Call::Fill);
    }
    fn set_font(&mut self, font: &str) {
        self.calls.push(Call::Font(font.to_string()));
    }
    fn set_text_align(&mut self, align: TextAlign) {
        self.calls.push(Call::Align(align));
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(Call::Text(text.to_string(), x, y));
    }
}

fn ship_with_frames(frames: u64) -> Ship {
    let mut ship = Ship::new(EntityId(0));
    ship.rotation = 37.0;
    ship.position = Vec2::new(120.0, 80.0);
    ship.frame_counter = frames;
    ship
}

fn still_enemy(id: u64, x: f64, y: f64, size: f64) -> Enemy {
    Enemy {
        id: EntityId(id),
        position: Vec2::new(x, y),
        size,
        direction: 0.0,
        speed: 0.0,
    }
}

// ── Transform contract ────────────────────────────────────────────────────────

#[test]
fn ship_draw_restores_transform() {
    let mut surface = Recorder::default();
    draw_ship(&mut surface, &ship_with_frames(7), 5000.0);
    assert!(surface.calls.contains(&Call::Stroke));
    assert!(surface.transform.approx_eq(&Transform::IDENTITY, 1e-9));
}

#[test]
fn enemy_and_projectile_draws_restore_transform() {
    let mut surface = Recorder::default();
    draw_enemy(&mut surface, &still_enemy(1, 33.0, 44.0, 30.0));
    draw_projectile(
        &mut surface,
        &Projectile::new(EntityId(2), Vec2::new(5.0, 6.0), 0.0),
    );
    assert_eq!(surface.transform, Transform::IDENTITY);
}

#[test]
fn ship_is_a_closed_triangle() {
    let mut surface = Recorder::default();
    draw_ship(&mut surface, &ship_with_frames(7), 5000.0);
    let path: Vec<_> = surface
        .calls
        .iter()
        .filter(|c| matches!(c, Call::MoveTo(..) | Call::LineTo(..) | Call::ClosePath))
        .cloned()
        .collect();
    assert_eq!(
        path,
        vec![
            Call::MoveTo(0.0, -10.0),
            Call::LineTo(-5.0, 10.0),
            Call::LineTo(5.0, 10.0),
            Call::ClosePath,
        ]
    );
}

// ── Blink ─────────────────────────────────────────────────────────────────────

#[test]
fn invulnerable_ship_blinks_in_groups_of_five() {
    for frames in 0..5 {
        let mut surface = Recorder::default();
        draw_ship(&mut surface, &ship_with_frames(frames), 100.0);
        assert!(surface.calls.is_empty(), "frame {frames} should be hidden");
    }
    for frames in 5..10 {
        let mut surface = Recorder::default();
        draw_ship(&mut surface, &ship_with_frames(frames), 100.0);
        assert!(!surface.calls.is_empty(), "frame {frames} should be drawn");
    }
}

#[test]
fn active_ship_never_blinks() {
    let mut surface = Recorder::default();
    draw_ship(&mut surface, &ship_with_frames(1), 3000.0);
    assert!(!surface.calls.is_empty());
}

// ── render ────────────────────────────────────────────────────────────────────

#[test]
fn render_clears_then_draws_every_category() {
    let mut world = World::new(0.0);
    world.spawn_ship();
    world.spawn_enemy(|id| still_enemy(id.0, 10.0, 10.0, 30.0));
    world.spawn_projectile(Vec2::new(50.0, 50.0), 0.0);
    world.spawn_game_over();

    let mut surface = Recorder::default();
    render(&mut surface, &world, 10_000.0);

    assert_eq!(surface.calls[0], Call::ClearRect);
    assert_eq!(surface.calls.iter().filter(|c| **c == Call::Stroke).count(), 2);
    assert_eq!(surface.calls.iter().filter(|c| **c == Call::Fill).count(), 1);
    assert_eq!(
        surface.calls.last(),
        Some(&Call::Text("GAME OVER".to_string(), 200.0, 150.0))
    );
    assert!(surface.calls.contains(&Call::Font("16px monospace".to_string())));
    assert!(surface.calls.contains(&Call::Align(TextAlign::Center)));
}

#[test]
fn enemy_is_square_of_its_size() {
    let mut surface = Recorder::default();
    draw_enemy(&mut surface, &still_enemy(1, 33.0, 44.0, 27.0));
    assert!(surface.calls.contains(&Call::Rect(0.0, 0.0, 27.0, 27.0)));
    assert_eq!(surface.calls[0], Call::Translate(33.0, 44.0));
}

// ── TerminalCanvas ────────────────────────────────────────────────────────────

#[test]
fn canvas_centres_game_over_text() {
    let mut world = World::new(0.0);
    world.spawn_game_over();
    let mut canvas = TerminalCanvas::new(80, 30);
    render(&mut canvas, &world, 0.0);

    let lines = canvas.to_text();
    assert_eq!(lines.len(), 30);
    assert_eq!(&lines[15][35..44], "GAME OVER");
    assert_eq!(canvas.font(), "16px monospace");
}

#[test]
fn canvas_strokes_enemy_outline() {
    let mut world = World::new(0.0);
    world.spawn_enemy(|id| still_enemy(id.0, 100.0, 100.0, 30.0));
    let mut canvas = TerminalCanvas::new(80, 30);
    render(&mut canvas, &world, 0.0);

    // 5 world units per column, 10 per row.
    assert_eq!(canvas.glyph_at(20, 10), Some('*'));
    assert_eq!(canvas.glyph_at(23, 10), Some('*'));
    assert_eq!(canvas.glyph_at(26, 13), Some('*'));
    assert_eq!(canvas.glyph_at(23, 11), Some(' '));
}

#[test]
fn canvas_fills_tiny_projectile() {
    let mut world = World::new(0.0);
    world.spawn_projectile(Vec2::new(100.0, 100.0), 0.0);
    let mut canvas = TerminalCanvas::new(80, 30);
    render(&mut canvas, &world, 0.0);
    assert_eq!(canvas.glyph_at(20, 10), Some('█'));
}

#[test]
fn canvas_render_clears_previous_frame() {
    let mut busy = World::new(0.0);
    busy.spawn_enemy(|id| still_enemy(id.0, 100.0, 100.0, 30.0));
    let mut canvas = TerminalCanvas::new(80, 30);
    render(&mut canvas, &busy, 0.0);

    render(&mut canvas, &World::new(0.0), 0.0);
    assert!(canvas.to_text().iter().all(|line| line.trim().is_empty()));
}

#[test]
fn canvas_transform_is_identity_after_full_render() {
    let mut world = World::new(0.0);
    world.spawn_ship();
    world.spawn_enemy(|id| still_enemy(id.0, 10.0, 10.0, 30.0));
    let mut canvas = TerminalCanvas::new(80, 30);
    render(&mut canvas, &world, 10_000.0);
    assert!(canvas.transform().approx_eq(&Transform::IDENTITY, 1e-9));
}

#[test]
fn canvas_ignores_drawing_off_grid() {
    let mut canvas = TerminalCanvas::new(10, 5);
    canvas.begin_path();
    canvas.rect(-50.0, -50.0, 10.0, 10.0);
    canvas.fill();
    assert!(canvas.to_text().iter().all(|line| line.trim().is_empty()));
    assert_eq!(canvas.glyph_at(10, 0), None);
}

#[test]
fn canvas_resize_reallocates_grid() {
    let mut canvas = TerminalCanvas::for_terminal(80, 31);
    assert_eq!((canvas.cols(), canvas.rows()), (80, 30));
    canvas.resize(40, 10);
    assert_eq!((canvas.cols(), canvas.rows()), (40, 10));
    assert_eq!(canvas.to_text().len(), 10);
}

#[test]
fn present_writes_frame_and_hint() {
    let mut world = World::new(0.0);
    world.spawn_game_over();
    let mut canvas = TerminalCanvas::new(80, 30);
    render(&mut canvas, &world, 0.0);

    let mut out: Vec<u8> = Vec::new();
    canvas.present(&mut out).unwrap();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains(CONTROLS_HINT));
}
