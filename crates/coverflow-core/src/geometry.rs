// crates/coverflow-core/src/geometry.rs
use glam::Vec2;

/// Axis-aligned rectangle in screen pixels, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            position: center - size * 0.5,
            size,
        }
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    pub fn area(&self) -> f32 {
        self.size.x.max(0.0) * self.size.y.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Shrink by the given padding; negative extents collapse to zero.
    pub fn inset(&self, padding: Padding) -> Rect {
        let position = self.position + Vec2::new(padding.left, padding.top);
        let size = Vec2::new(
            (self.size.x - padding.horizontal()).max(0.0),
            (self.size.y - padding.vertical()).max(0.0),
        );
        Rect { position, size }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Padding {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}
