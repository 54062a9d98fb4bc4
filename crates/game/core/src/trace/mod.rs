//! Discrete line tracing for ranged shots, blasts and wall bounces.
//!
//! A cell is traversable when it is on-map floor without a solid object.
//! Actors never stop a trace; whoever stands on a traced cell is simply hit.

use std::collections::HashSet;

use crate::geometry::{BresenhamLine, Direction, Position};
use crate::state::Map;

/// Result of rasterizing one segment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Segment {
    cells: Vec<Position>,
    /// First non-traversable cell, if the segment was cut short.
    wall: Option<Position>,
}

pub struct LineTracer<'a> {
    map: &'a Map,
    solid: HashSet<Position>,
}

impl<'a> LineTracer<'a> {
    pub fn new(map: &'a Map) -> Self {
        Self {
            map,
            solid: map.solid_positions(),
        }
    }

    pub fn is_traversable(&self, position: Position) -> bool {
        self.map.is_floor(position) && !self.solid.contains(&position)
    }

    /// Cells after `start` toward `end`, stopping before the first blocked
    /// cell.
    fn segment(&self, start: Position, end: Position) -> Segment {
        let mut segment = Segment::default();
        for cell in BresenhamLine::new(start, end) {
            if !self.is_traversable(cell) {
                segment.wall = Some(cell);
                break;
            }
            segment.cells.push(cell);
        }
        segment
    }

    /// Straight path for a projectile. `None` unless the trace reaches
    /// `target` exactly; `start == target` has no path.
    pub fn ranged_path(&self, start: Position, target: Position) -> Option<Vec<Position>> {
        if start == target {
            return None;
        }
        let segment = self.segment(start, target);
        (segment.cells.last() == Some(&target)).then_some(segment.cells)
    }

    /// Path of a blast that keeps flying past `target` until it hits
    /// something, optionally bouncing back off the wall.
    pub fn blast_path(
        &self,
        start: Position,
        target: Position,
        bounce: bool,
        bounce_length: u32,
    ) -> Option<Vec<Position>> {
        let (path, _) = self.blast(start, target, bounce, bounce_length)?;
        Some(path)
    }

    /// The cell a blast toward `target` stops against.
    pub fn wall_hit_by_blast(&self, start: Position, target: Position) -> Option<Position> {
        self.blast(start, target, false, 0)
            .and_then(|(_, wall)| wall)
    }

    fn blast(
        &self,
        start: Position,
        target: Position,
        bounce: bool,
        bounce_length: u32,
    ) -> Option<(Vec<Position>, Option<Position>)> {
        let mut path = self.ranged_path(start, target)?;
        let delta = target - start;

        let mut wall = None;
        let mut from = target;
        let mut to = target + delta;
        loop {
            let segment = self.segment(from, to);
            wall = segment.wall.or(wall);
            if segment.cells.is_empty() {
                break;
            }
            let reached = segment.cells.last() == Some(&to);
            path.extend(segment.cells);
            if !reached {
                break;
            }
            from = to;
            to = to + delta;
        }

        if bounce {
            let bounce_cells = self.bounce(start, &path, bounce_length);
            path.extend(bounce_cells);
        }
        Some((path, wall))
    }

    /// Bounce leg: aims from the blast's last cell back past the caster,
    /// re-traces, and keeps the junction cell twice.
    fn bounce(&self, caster: Position, path: &[Position], bounce_length: u32) -> Vec<Position> {
        let Some(&last) = path.last() else {
            return Vec::new();
        };
        let Some(direction) = Direction::between(last, caster) else {
            return Vec::new();
        };

        let mut aim = caster;
        for _ in 0..bounce_length {
            let next = aim.step(direction);
            if !self.is_traversable(next) {
                break;
            }
            aim = next;
        }

        let mut cells = vec![last];
        cells.extend(self.segment(last, aim).cells);
        cells.truncate(bounce_length as usize);
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, MapObject, ObjectKind, Terrain};

    fn corridor(width: i32) -> Map {
        Map::filled(width, 3, Terrain::Floor)
    }

    fn row(xs: impl IntoIterator<Item = i32>, y: i32) -> Vec<Position> {
        xs.into_iter().map(|x| Position::new(x, y)).collect()
    }

    #[test]
    fn trace_on_open_map() {
        let map = corridor(10);
        let tracer = LineTracer::new(&map);
        assert_eq!(
            tracer.ranged_path(Position::new(0, 0), Position::new(5, 0)),
            Some(row(1..=5, 0))
        );
    }

    #[test]
    fn self_target_has_no_path() {
        let map = corridor(10);
        let tracer = LineTracer::new(&map);
        assert_eq!(
            tracer.ranged_path(Position::new(2, 1), Position::new(2, 1)),
            None
        );
    }

    #[test]
    fn wall_or_solid_object_cuts_the_path() {
        let mut map = corridor(10);
        map.set_terrain(Position::new(3, 0), Terrain::Wall);
        map.add_object(MapObject::new(
            EntityId(1),
            Position::new(3, 1),
            ObjectKind::Fountain,
        ));
        let tracer = LineTracer::new(&map);
        assert_eq!(
            tracer.ranged_path(Position::new(0, 0), Position::new(5, 0)),
            None
        );
        assert_eq!(
            tracer.ranged_path(Position::new(0, 1), Position::new(5, 1)),
            None
        );
        assert_eq!(
            tracer.ranged_path(Position::new(0, 0), Position::new(2, 0)),
            Some(row(1..=2, 0))
        );
    }

    #[test]
    fn blast_runs_to_the_map_edge() {
        let map = corridor(12);
        let tracer = LineTracer::new(&map);
        let path = tracer
            .blast_path(Position::new(0, 0), Position::new(5, 0), false, 3)
            .expect("target reachable");
        assert_eq!(path, row(1..=11, 0));
        assert!(path.windows(2).all(|w| w[1].x == w[0].x + 1));
    }

    #[test]
    fn bounce_duplicates_junction() {
        let mut map = corridor(12);
        map.set_terrain(Position::new(8, 0), Terrain::Wall);
        let tracer = LineTracer::new(&map);
        let start = Position::new(0, 0);
        let target = Position::new(4, 0);

        assert_eq!(
            tracer.wall_hit_by_blast(start, target),
            Some(Position::new(8, 0))
        );

        let path = tracer
            .blast_path(start, target, true, 3)
            .expect("target reachable");
        let mut expected = row(1..=7, 0);
        expected.extend(row([7, 6, 5], 0));
        assert_eq!(path, expected);
    }

    #[test]
    fn bounce_off_an_adjacent_wall() {
        let mut map = corridor(12);
        map.set_terrain(Position::new(3, 0), Terrain::Wall);
        let tracer = LineTracer::new(&map);
        let path = tracer
            .blast_path(Position::new(1, 0), Position::new(2, 0), true, 3)
            .expect("target reachable");
        assert_eq!(path, row([2, 2, 1, 0], 0));
    }
}
