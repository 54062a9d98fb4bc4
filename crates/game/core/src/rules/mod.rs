//! Movement and targeting legality.
//!
//! Every consumer, player input and monster tactics alike, asks these
//! functions before acting, so the answers here are the single source of
//! truth for "can I step there" and "can I hit that".

use crate::geometry::Position;
use crate::state::{EffectivePoint, GameState, Map};
use crate::vision::VisibilityEngine;

/// True iff `position` is on-map floor with no solid object and no live
/// actor.
pub fn is_movable(state: &GameState, position: Position) -> bool {
    let map = state.map();
    map.is_floor(position) && !map.has_solid_object(position) && !state.is_occupied(position)
}

/// Batch walkability for pathfinding.
#[derive(Clone, Debug)]
pub struct MovableGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl MovableGrid {
    /// Builds the grid in one pass. With `actors_block`, cells holding a live
    /// actor are closed.
    pub fn build(state: &GameState, actors_block: bool) -> Self {
        let map = state.map();
        let solid = map.solid_positions();
        let mut cells: Vec<bool> = map
            .positions()
            .map(|p| map.is_floor(p) && !solid.contains(&p))
            .collect();

        if actors_block {
            for id in state.live_actor_ids() {
                let index = state.actor(id).and_then(|a| map.index(a.position));
                if let Some(i) = index {
                    cells[i] = false;
                }
            }
        }

        Self {
            width: map.width(),
            height: map.height(),
            cells,
        }
    }

    pub fn is_movable(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width
            && position.y < self.height
            && self.cells[(position.y * self.width + position.x) as usize]
    }
}

/// Anything carrying a grid position that can be filtered as a target.
pub trait Located {
    fn position(&self) -> Position;
}

impl Located for Position {
    fn position(&self) -> Position {
        *self
    }
}

impl Located for EffectivePoint {
    fn position(&self) -> Position {
        self.position
    }
}

/// Drops points that are off-map, on a wall, share a cell with a solid
/// object, or (with `require_visible`) cannot be seen from `origin` within
/// `vision_radius`.
///
/// Solid objects are gathered once for the whole batch.
pub fn filter_targetable_points<T: Located>(
    map: &Map,
    vision: &mut VisibilityEngine,
    points: Vec<T>,
    origin: Position,
    vision_radius: u32,
    require_visible: bool,
) -> Vec<T> {
    let solid = map.solid_positions();
    if require_visible {
        vision.compute(origin, vision_radius);
    }
    points
        .into_iter()
        .filter(|point| {
            let p = point.position();
            map.is_floor(p)
                && !solid.contains(&p)
                && (!require_visible || vision.is_visible(p))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorState, EntityId, Level, MapObject, ObjectKind, TacticKind};

    fn state() -> GameState {
        let mut map = Map::from_rows(&[
            "#######", //
            "#.....#", //
            "#..#..#", //
            "#.....#", //
            "#######",
        ])
        .expect("valid rows");
        map.add_object(MapObject::new(
            EntityId(90),
            Position::new(5, 1),
            ObjectKind::Fountain,
        ));
        let level = Level::new(map).with_monster(ActorState::monster(
            EntityId(1),
            "rat",
            Position::new(2, 3),
            3,
            TacticKind::Default,
        ));
        GameState::new(
            3,
            ActorState::player("hero", Position::new(1, 1), 10),
            vec![level],
        )
        .expect("one level")
    }

    #[test]
    fn walls_objects_and_actors_are_not_movable() {
        let state = state();
        assert!(is_movable(&state, Position::new(2, 1)));
        assert!(!is_movable(&state, Position::new(-1, 1)));
        assert!(!is_movable(&state, Position::new(40, 1)));
        assert!(!is_movable(&state, Position::new(3, 2)));
        assert!(!is_movable(&state, Position::new(5, 1)));
        assert!(!is_movable(&state, Position::new(2, 3)));
        assert!(!is_movable(&state, Position::new(1, 1)));
    }

    #[test]
    fn grid_matches_point_queries() {
        let state = state();
        let grid = MovableGrid::build(&state, true);
        for p in state.map().positions() {
            assert_eq!(grid.is_movable(p), is_movable(&state, p), "at {p:?}");
        }
        let open = MovableGrid::build(&state, false);
        assert!(open.is_movable(Position::new(2, 3)));
    }

    #[test]
    fn filter_removes_blocked_and_hidden_points() {
        let state = state();
        let mut vision = VisibilityEngine::new(state.map());
        let points = vec![
            Position::new(2, 1),
            Position::new(3, 2),
            Position::new(5, 1),
            Position::new(9, 9),
            Position::new(5, 3),
            Position::new(4, 3),
        ];
        let all = filter_targetable_points(
            state.map(),
            &mut vision,
            points,
            Position::new(1, 1),
            10,
            false,
        );
        assert_eq!(
            all,
            vec![Position::new(2, 1), Position::new(5, 3), Position::new(4, 3)]
        );

        let seen = filter_targetable_points(
            state.map(),
            &mut vision,
            vec![Position::new(2, 2), Position::new(5, 2)],
            Position::new(1, 2),
            10,
            true,
        );
        assert_eq!(seen, vec![Position::new(2, 2)]);
    }
}
