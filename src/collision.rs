/// Axis-aligned bounding boxes.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Top-left corner.
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BoundingBox {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        BoundingBox { x, y, w, h }
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Overlap test that treats a missing operand as "no collision".
pub fn boxes_overlap(a: Option<&BoundingBox>, b: Option<&BoundingBox>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.overlaps(b),
        _ => false,
    }
}
