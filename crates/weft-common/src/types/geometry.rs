use serde::{Deserialize, Serialize};

use super::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Grow each dimension to at least `other`'s. Never shrinks.
    pub fn grow_to_fit(&mut self, other: Size) {
        self.width = self.width.max(other.width);
        self.height = self.height.max(other.height);
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The unit rectangle, i.e. the relative geometry of a root tile.
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment: the right and bottom edges belong to the
    /// neighbouring rectangle.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Classify `p` by the quadrant of this rectangle it falls in.
    ///
    /// `VERTICAL` is set when the point is further from the centre
    /// vertically than horizontally, relative to the rectangle's size.
    pub fn direction_from_point(&self, p: Point) -> Direction {
        let c = self.center();
        let dx = p.x - c.x;
        let dy = p.y - c.y;

        let mut dir = Direction::empty();
        if dy < 0.0 {
            dir |= Direction::UP;
        }
        if dx > 0.0 {
            dir |= Direction::RIGHT;
        }
        let nx = if self.width > 0.0 { dx.abs() / self.width } else { 0.0 };
        let ny = if self.height > 0.0 { dy.abs() / self.height } else { 0.0 };
        if ny > nx {
            dir |= Direction::VERTICAL;
        }
        dir
    }
}
