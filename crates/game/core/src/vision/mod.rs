//! Field of view.
//!
//! [`VisibilityEngine`] keeps a transparency mask built from terrain and map
//! objects plus the most recent [`FieldOfView`]. Nothing invalidates either
//! automatically: call [`VisibilityEngine::rebuild_mask`] after occlusion
//! changes (a door opens) and [`VisibilityEngine::compute`] whenever the
//! origin or radius moves, before trusting [`VisibilityEngine::is_visible`].

use crate::geometry::{BresenhamLine, Position};
use crate::state::Map;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileVisibility {
    Visible,
    Visited,
    Unvisited,
}

/// Cells visible from one origin at one radius.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldOfView {
    origin: Position,
    radius: u32,
    generation: u64,
    width: i32,
    height: i32,
    visible: Vec<bool>,
}

impl FieldOfView {
    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn is_visible(&self, position: Position) -> bool {
        index(self.width, self.height, position).is_some_and(|i| self.visible[i])
    }

    pub fn visible_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        self.visible
            .iter()
            .enumerate()
            .filter(|(_, visible)| **visible)
            .map(move |(i, _)| Position::new(i as i32 % width, i as i32 / width))
    }
}

#[derive(Clone, Debug)]
pub struct VisibilityEngine {
    width: i32,
    height: i32,
    transparent: Vec<bool>,
    generation: u64,
    cached: Option<FieldOfView>,
    casts: u64,
}

impl VisibilityEngine {
    pub fn new(map: &Map) -> Self {
        let mut engine = Self {
            width: 0,
            height: 0,
            transparent: Vec::new(),
            generation: 0,
            cached: None,
            casts: 0,
        };
        engine.rebuild_mask(map);
        engine
    }

    /// Rebuilds the transparency mask from terrain and objects. Actors never
    /// block sight; walls and opaque objects do.
    pub fn rebuild_mask(&mut self, map: &Map) {
        self.width = map.width();
        self.height = map.height();
        self.transparent = map
            .positions()
            .map(|p| {
                map.is_floor(p)
                    && map
                        .objects()
                        .iter()
                        .filter(|o| o.position == p)
                        .all(|o| o.is_transparent())
            })
            .collect();
        self.generation += 1;
    }

    pub fn is_transparent(&self, position: Position) -> bool {
        index(self.width, self.height, position).is_some_and(|i| self.transparent[i])
    }

    /// Computes (or reuses) the field of view for `(origin, radius)`.
    pub fn compute(&mut self, origin: Position, radius: u32) -> &FieldOfView {
        let fresh = self.cached.as_ref().is_some_and(|fov| {
            fov.origin == origin && fov.radius == radius && fov.generation == self.generation
        });
        if !fresh {
            self.cached = None;
        }
        let (width, height, generation) = (self.width, self.height, self.generation);
        let transparent = &self.transparent;
        let casts = &mut self.casts;
        self.cached.get_or_insert_with(|| {
            *casts += 1;
            cast(transparent, width, height, generation, origin, radius)
        })
    }

    /// Answers against the last computed field of view.
    pub fn is_visible(&self, position: Position) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|fov| fov.is_visible(position))
    }

    pub fn field(&self) -> Option<&FieldOfView> {
        self.cached.as_ref()
    }

    /// One-off check that leaves no cache behind.
    pub fn visible_single_shot(map: &Map, origin: Position, radius: u32, target: Position) -> bool {
        let mut engine = Self::new(map);
        engine.compute(origin, radius).is_visible(target)
    }

    /// Marks every visible cell within twice the current radius as visited.
    pub fn mark_visited(&self, map: &mut Map) {
        let Some(fov) = &self.cached else {
            return;
        };
        let window = reach(fov.radius.saturating_mul(2), fov.width, fov.height);
        for dy in -window..=window {
            for dx in -window..=window {
                let p = Position::new(fov.origin.x + dx, fov.origin.y + dy);
                if fov.is_visible(p) {
                    map.mark_visited(p);
                }
            }
        }
    }

    /// Row-major visibility grid for presentation.
    pub fn tile_visibility(&self, map: &Map) -> Vec<TileVisibility> {
        map.positions()
            .map(|p| {
                if self.is_visible(p) {
                    TileVisibility::Visible
                } else if map.is_visited(p) {
                    TileVisibility::Visited
                } else {
                    TileVisibility::Unvisited
                }
            })
            .collect()
    }
}

/// Cells further than this from the origin along either axis are off-map
/// for every origin on the map.
fn reach(radius: u32, width: i32, height: i32) -> i32 {
    i32::try_from(radius)
        .unwrap_or(i32::MAX)
        .min(width.max(height))
}

fn index(width: i32, height: i32, p: Position) -> Option<usize> {
    (p.x >= 0 && p.y >= 0 && p.x < width && p.y < height).then(|| (p.y * width + p.x) as usize)
}

/// A cell is visible when it lies inside the radius and every cell strictly
/// between it and the origin is transparent. Opaque cells are lit.
fn cast(
    transparent: &[bool],
    width: i32,
    height: i32,
    generation: u64,
    origin: Position,
    radius: u32,
) -> FieldOfView {
    let mut visible = vec![false; transparent.len()];
    if let Some(i) = index(width, height, origin) {
        visible[i] = true;
    }

    let r = reach(radius, width, height);
    let r2 = i64::from(radius).saturating_mul(i64::from(radius));
    for dy in -r..=r {
        for dx in -r..=r {
            let target = Position::new(origin.x + dx, origin.y + dy);
            let Some(target_index) = index(width, height, target) else {
                continue;
            };
            if origin.distance_squared(target) > r2 || visible[target_index] {
                continue;
            }
            let clear = BresenhamLine::new(origin, target)
                .take_while(|p| *p != target)
                .all(|p| index(width, height, p).is_some_and(|i| transparent[i]));
            if clear {
                visible[target_index] = true;
            }
        }
    }

    FieldOfView {
        origin,
        radius,
        generation,
        width,
        height,
        visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, MapObject, ObjectKind};

    fn room() -> Map {
        Map::from_rows(&[
            "#########",
            "#.......#",
            "#...#...#",
            "#.......#",
            "#########",
        ])
        .expect("valid rows")
    }

    #[test]
    fn walls_are_lit_but_block() {
        let map = room();
        let mut engine = VisibilityEngine::new(&map);
        let fov = engine.compute(Position::new(2, 2), 8);
        assert!(fov.is_visible(Position::new(2, 2)));
        assert!(fov.is_visible(Position::new(4, 2)));
        assert!(fov.is_visible(Position::new(0, 2)));
        assert!(!fov.is_visible(Position::new(6, 2)));
        assert!(fov.is_visible(Position::new(6, 1)));
    }

    #[test]
    fn radius_limits_sight() {
        let map = room();
        let mut engine = VisibilityEngine::new(&map);
        engine.compute(Position::new(1, 1), 2);
        assert!(engine.is_visible(Position::new(3, 1)));
        assert!(!engine.is_visible(Position::new(4, 1)));
    }

    #[test]
    fn absurd_radius_sees_the_whole_room() {
        let mut map = room();
        let mut engine = VisibilityEngine::new(&map);
        engine.compute(Position::new(1, 1), u32::MAX);
        assert!(engine.is_visible(Position::new(7, 1)));
        assert!(engine.is_visible(Position::new(8, 1)));
        engine.mark_visited(&mut map);
        assert!(map.is_visited(Position::new(7, 1)));
    }

    #[test]
    fn results_are_cached_until_key_changes() {
        let map = room();
        let mut engine = VisibilityEngine::new(&map);
        engine.compute(Position::new(1, 1), 4);
        engine.compute(Position::new(1, 1), 4);
        assert_eq!(engine.casts, 1);
        engine.compute(Position::new(1, 1), 5);
        assert_eq!(engine.casts, 2);
    }

    #[test]
    fn closed_door_blocks_until_mask_rebuilt() {
        let mut map = room();
        let door = EntityId(50);
        map.add_object(MapObject::new(
            door,
            Position::new(4, 1),
            ObjectKind::Door { open: false },
        ));
        let mut engine = VisibilityEngine::new(&map);
        engine.compute(Position::new(2, 1), 8);
        assert!(!engine.is_visible(Position::new(6, 1)));

        if let Some(object) = map.object_mut(door) {
            object.kind = ObjectKind::Door { open: true };
        }
        engine.compute(Position::new(2, 1), 8);
        assert!(!engine.is_visible(Position::new(6, 1)), "stale mask");

        engine.rebuild_mask(&map);
        engine.compute(Position::new(2, 1), 8);
        assert!(engine.is_visible(Position::new(6, 1)));
    }

    #[test]
    fn tile_visibility_distinguishes_visited() {
        let mut map = room();
        let mut engine = VisibilityEngine::new(&map);
        engine.compute(Position::new(1, 1), 1);
        engine.mark_visited(&mut map);
        engine.compute(Position::new(7, 3), 1);
        let grid = engine.tile_visibility(&map);
        let at = |x: i32, y: i32| grid[(y * map.width() + x) as usize];
        assert_eq!(at(7, 3), TileVisibility::Visible);
        assert_eq!(at(1, 1), TileVisibility::Visited);
        assert_eq!(at(4, 3), TileVisibility::Unvisited);
    }
}
