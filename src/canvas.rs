/// Terminal back end for `Surface`.
///
/// The 400×300 world is scaled onto a grid of character cells. Drawing calls
/// rasterise into an off-screen buffer; `present` queues the buffer to the
/// terminal one row at a time and flushes once per frame.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::display::{Surface, TextAlign};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STROKE: Color = Color::White;
const C_FILL: Color = Color::Cyan;
const C_TEXT: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

const STROKE_GLYPH: char = '*';
const FILL_GLYPH: char = '█';
const BLANK: char = ' ';

pub const CONTROLS_HINT: &str = "← → : Turn   ↑ : Thrust   SPACE : Fire   Q : Quit";

// ── Transform ─────────────────────────────────────────────────────────────────

/// 2D affine transform in canvas order: `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.e += self.a * tx + self.c * ty;
        self.f += self.b * tx + self.d * ty;
    }

    pub fn rotate(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        let Transform { a, b, c, d, .. } = *self;
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }

    pub fn approx_eq(&self, other: &Transform, epsilon: f64) -> bool {
        [
            self.a - other.a,
            self.b - other.b,
            self.c - other.c,
            self.d - other.d,
            self.e - other.e,
            self.f - other.f,
        ]
        .iter()
        .all(|delta| delta.abs() <= epsilon)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    glyph: BLANK,
    color: C_STROKE,
};

/// Off-screen character buffer covering `cols × rows` terminal cells.
///
/// One extra terminal row below the buffer is used for the controls hint.
pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    transform: Transform,
    /// Sub-paths in world units, already transformed.
    path: Vec<Vec<(f64, f64)>>,
    font: String,
    align: TextAlign,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        TerminalCanvas {
            cols,
            rows,
            cells: vec![EMPTY; cols as usize * rows as usize],
            transform: Transform::IDENTITY,
            path: Vec::new(),
            font: String::new(),
            align: TextAlign::default(),
        }
    }

    /// Canvas for a terminal of `width × height`, keeping the last row for the hint.
    pub fn for_terminal(width: u16, height: u16) -> Self {
        Self::new(width, height.saturating_sub(1))
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = TerminalCanvas {
            font: std::mem::take(&mut self.font),
            align: self.align,
            ..TerminalCanvas::new(cols, rows)
        };
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    /// Glyph at a cell, `None` outside the buffer.
    pub fn glyph_at(&self, col: u16, row: u16) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row as usize * self.cols as usize + col as usize].glyph)
    }

    /// The buffer as plain text, one line per row.
    pub fn to_text(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols.max(1) as usize)
            .map(|row| row.iter().map(|cell| cell.glyph).collect())
            .collect()
    }

    /// Queue the buffer plus the controls hint and flush.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for (row, cells) in self.cells.chunks(self.cols.max(1) as usize).enumerate() {
            out.queue(cursor::MoveTo(0, row as u16))?;
            let mut color = None;
            let mut run = String::new();
            for cell in cells {
                if color != Some(cell.color) {
                    if !run.is_empty() {
                        out.queue(Print(std::mem::take(&mut run)))?;
                    }
                    out.queue(style::SetForegroundColor(cell.color))?;
                    color = Some(cell.color);
                }
                run.push(cell.glyph);
            }
            if !run.is_empty() {
                out.queue(Print(run))?;
            }
        }

        out.queue(cursor::MoveTo(0, self.rows))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(CONTROLS_HINT))?;

        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }

    // ── Rasterisation ─────────────────────────────────────────────────────────

    /// World units to fractional cell coordinates.
    fn to_cell(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.cols as f64 / WORLD_WIDTH,
            y * self.rows as f64 / WORLD_HEIGHT,
        )
    }

    fn plot(&mut self, col: f64, row: f64, glyph: char, color: Color) {
        let (col, row) = (col.floor(), row.floor());
        if col < 0.0 || row < 0.0 || col >= self.cols as f64 || row >= self.rows as f64 {
            return;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.cells[index] = Cell { glyph, color };
    }

    fn plot_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        let (c0, r0) = self.to_cell(from.0, from.1);
        let (c1, r1) = self.to_cell(to.0, to.1);
        let (dc, dr) = (c1 - c0, r1 - r0);
        let steps = dc.abs().max(dr.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.plot(c0 + t * dc, r0 + t * dr, STROKE_GLYPH, C_STROKE);
        }
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)]) {
        let cells: Vec<(f64, f64)> = points.iter().map(|&(x, y)| self.to_cell(x, y)).collect();
        let Some(&first) = cells.first() else {
            return;
        };

        let (mut min_c, mut min_r, mut max_c, mut max_r) = (first.0, first.1, first.0, first.1);
        for &(c, r) in &cells {
            min_c = min_c.min(c);
            min_r = min_r.min(r);
            max_c = max_c.max(c);
            max_r = max_r.max(r);
        }

        let mut painted = false;
        let mut row = min_r.floor();
        while row <= max_r {
            let mut col = min_c.floor();
            while col <= max_c {
                if contains_point(&cells, (col + 0.5, row + 0.5)) {
                    self.plot(col, row, FILL_GLYPH, C_FILL);
                    painted = true;
                }
                col += 1.0;
            }
            row += 1.0;
        }

        // Shapes smaller than a cell still show up.
        if !painted {
            self.plot(first.0, first.1, FILL_GLYPH, C_FILL);
        }
    }
}

/// Even-odd point-in-polygon test.
fn contains_point(polygon: &[(f64, f64)], point: (f64, f64)) -> bool {
    let (px, py) = point;
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl Surface for TerminalCanvas {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let (x0, y0) = self.transform.apply(x, y);
        let (x1, y1) = self.transform.apply(x + w, y + h);
        let (c0, r0) = self.to_cell(x0.min(x1), y0.min(y1));
        let (c1, r1) = self.to_cell(x0.max(x1), y0.max(y1));
        let (c0, r0) = (c0.floor().max(0.0) as usize, r0.floor().max(0.0) as usize);
        let c1 = (c1.ceil().max(0.0) as usize).min(self.cols as usize);
        let r1 = (r1.ceil().max(0.0) as usize).min(self.rows as usize);
        for row in r0..r1 {
            for col in c0..c1 {
                self.cells[row * self.cols as usize + col] = EMPTY;
            }
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.transform.translate(x, y);
    }

    fn rotate(&mut self, radians: f64) {
        self.transform.rotate(radians);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let point = self.transform.apply(x, y);
        self.path.push(vec![point]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let point = self.transform.apply(x, y);
        match self.path.last_mut() {
            Some(sub_path) => sub_path.push(point),
            None => self.path.push(vec![point]),
        }
    }

    fn close_path(&mut self) {
        if let Some(sub_path) = self.path.last_mut() {
            if let Some(&start) = sub_path.first() {
                sub_path.push(start);
            }
        }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.close_path();
    }

    fn stroke(&mut self) {
        let path = std::mem::take(&mut self.path);
        for sub_path in &path {
            match sub_path.as_slice() {
                [] => {}
                [only] => {
                    let (c, r) = self.to_cell(only.0, only.1);
                    self.plot(c, r, STROKE_GLYPH, C_STROKE);
                }
                points => {
                    for pair in points.windows(2) {
                        self.plot_line(pair[0], pair[1]);
                    }
                }
            }
        }
        self.path = path;
    }

    fn fill(&mut self) {
        let path = std::mem::take(&mut self.path);
        for sub_path in &path {
            self.fill_polygon(sub_path);
        }
        self.path = path;
    }

    fn set_font(&mut self, font: &str) {
        font.clone_into(&mut self.font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let (wx, wy) = self.transform.apply(x, y);
        let (col, row) = self.to_cell(wx, wy);
        let width = text.chars().count() as f64;
        let start = match self.align {
            TextAlign::Start => col.floor(),
            TextAlign::Center => (col - width / 2.0).floor(),
            TextAlign::End => (col - width).floor(),
        };
        for (i, glyph) in text.chars().enumerate() {
            self.plot(start + i as f64, row, glyph, C_TEXT);
        }
    }
}
