//! Grid primitives shared by every rule: positions, directions, and discrete
//! line rasterization.
mod direction;
mod line;

pub use direction::Direction;
pub use line::BresenhamLine;

use std::fmt;
use std::ops::{Add, Sub};

/// Discrete grid position expressed in tile coordinates.
///
/// `x` grows to the east and `y` grows to the south, matching row-major map
/// storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// King-move distance: the number of steps between two cells on an
    /// eight-way grid.
    pub fn chebyshev(self, other: Self) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    pub fn manhattan(self, other: Self) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    pub fn distance_squared(self, other: Self) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        dx * dx + dy * dy
    }

    pub fn is_adjacent(self, other: Self) -> bool {
        self != other && self.chebyshev(other) == 1
    }

    /// The eight surrounding cells in [`Direction::ALL`] order.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        Direction::ALL.into_iter().map(move |d| self.step(d))
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Position::new(1, 1);
        let b = Position::new(4, 3);
        assert_eq!(a.chebyshev(b), 3);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(a.distance_squared(b), 13);
        assert!(a.is_adjacent(Position::new(2, 2)));
        assert!(!a.is_adjacent(a));
    }

    #[test]
    fn neighbors_cover_the_ring() {
        let origin = Position::new(5, 5);
        let ring: Vec<_> = origin.neighbors().collect();
        assert_eq!(ring.len(), 8);
        assert!(ring.iter().all(|p| origin.is_adjacent(*p)));
    }
}
