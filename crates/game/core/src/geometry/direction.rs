use strum::{Display, EnumIter};

use super::Position;

/// Eight-way compass direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::NorthEast => 1,
            Direction::East => 2,
            Direction::SouthEast => 3,
            Direction::South => 4,
            Direction::SouthWest => 5,
            Direction::West => 6,
            Direction::NorthWest => 7,
        }
    }

    /// Rotates clockwise by `steps` eighth-turns.
    pub const fn rotate(self, steps: usize) -> Direction {
        Self::ALL[(self.index() + steps) % 8]
    }

    pub const fn opposite(self) -> Direction {
        self.rotate(4)
    }

    /// Direction of the first step from `from` toward `to`, or `None` when the
    /// points coincide.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        let dx = (to.x - from.x).signum();
        let dy = (to.y - from.y).signum();
        Self::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn between_uses_signs() {
        let origin = Position::new(0, 0);
        assert_eq!(
            Direction::between(origin, Position::new(7, -2)),
            Some(Direction::NorthEast)
        );
        assert_eq!(
            Direction::between(origin, Position::new(0, 3)),
            Some(Direction::South)
        );
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn opposite_undoes_step() {
        let p = Position::new(3, 3);
        for dir in Direction::iter() {
            assert_eq!(p.step(dir).step(dir.opposite()), p);
        }
    }
}
