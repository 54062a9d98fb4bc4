use std::collections::VecDeque;

use crate::geometry::Position;
use crate::rules::MovableGrid;
use crate::state::GameState;

/// Breadth-first route over the eight-way movable grid.
///
/// The returned path excludes `from` and ends on `to`. With `actors_block`,
/// cells holding live actors are closed except for the goal itself, so a
/// monster can path onto the player it is chasing. Neighbours are expanded
/// in [`crate::geometry::Direction::ALL`] order, which keeps ties
/// deterministic.
pub fn find_path(
    state: &GameState,
    from: Position,
    to: Position,
    actors_block: bool,
) -> Option<Vec<Position>> {
    let map = state.map();
    if from == to {
        return Some(Vec::new());
    }
    if !map.is_floor(to) || map.has_solid_object(to) {
        return None;
    }
    let goal = map.index(to)?;
    let start = map.index(from)?;
    let grid = MovableGrid::build(state, actors_block);

    let mut came_from: Vec<Option<usize>> = vec![None; (map.width() * map.height()) as usize];
    let mut seen = vec![false; came_from.len()];
    let mut queue = VecDeque::from([from]);
    seen[start] = true;

    while let Some(current) = queue.pop_front() {
        for next in current.neighbors() {
            let Some(index) = map.index(next) else {
                continue;
            };
            if seen[index] || !(index == goal || grid.is_movable(next)) {
                continue;
            }
            seen[index] = true;
            came_from[index] = map.index(current);
            if index == goal {
                return Some(walk_back(map.width(), &came_from, start, goal));
            }
            queue.push_back(next);
        }
    }
    None
}

fn walk_back(width: i32, came_from: &[Option<usize>], start: usize, goal: usize) -> Vec<Position> {
    let at = |i: usize| Position::new(i as i32 % width, i as i32 / width);
    let mut path = vec![at(goal)];
    let mut cursor = goal;
    while let Some(previous) = came_from[cursor] {
        if previous == start {
            break;
        }
        path.push(at(previous));
        cursor = previous;
    }
    path.reverse();
    path
}
