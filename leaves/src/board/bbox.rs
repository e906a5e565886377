use super::Coordinate;

/// A 2D area represented by a min + max coordinate pair.
///
/// The two coordinates form an _inclusive_ 2D range, i.e. unlike in a
/// half-open range, it's possible for a point with `x == x_max`
/// to be contained in the area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    pub fn contains(&self, (x, y): Coordinate) -> bool {
        x >= self.x_min && y >= self.y_min && x <= self.x_max && y <= self.y_max
    }

    pub fn singleton((x, y): Coordinate) -> Self {
        Self {
            x_min: x,
            y_min: y,
            x_max: x,
            y_max: y,
        }
    }

    /// The smallest box covering all coordinates, or `None` for an empty iterator.
    pub fn from_coordinates_iter(mut iter: impl Iterator<Item = Coordinate>) -> Option<Self> {
        let first = iter.next()?;
        let mut bbox = Self::singleton(first);
        for coordinate in iter {
            bbox.update(coordinate);
        }
        Some(bbox)
    }

    /// Expands the bounding box to cover point `(x, y)`.
    pub fn update(&mut self, (x, y): Coordinate) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }
}
