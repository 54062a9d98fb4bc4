//! Level geometry: terrain grid, map objects, ground items and the per-cell
//! visited flag.
//!
//! Terrain is immutable once a level is handed to the engine except through
//! [`Map::set_terrain`]. Objects change state (doors open and close) but never
//! move.

use std::collections::{HashSet, VecDeque};

use bitflags::bitflags;

use crate::error::InvariantViolation;
use crate::geometry::Position;
use crate::state::{EntityId, Item};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Wall,
    Floor,
}

bitflags! {
    /// Physical properties of a map object.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u8 {
        /// Blocks movement and projectiles.
        const SOLID = 0b001;
        /// Lets light through.
        const TRANSPARENT = 0b010;
        /// Responds to the operate action.
        const OPERABLE = 0b100;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StairDirection {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectKind {
    Door { open: bool },
    Stairs(StairDirection),
    /// Decorative, blocks movement and sight.
    Fountain,
    /// Blocks movement but not sight.
    Pillar,
}

impl ObjectKind {
    pub fn flags(self) -> ObjectFlags {
        match self {
            ObjectKind::Door { open: false } => ObjectFlags::SOLID | ObjectFlags::OPERABLE,
            ObjectKind::Door { open: true } => ObjectFlags::TRANSPARENT | ObjectFlags::OPERABLE,
            ObjectKind::Stairs(_) => ObjectFlags::TRANSPARENT,
            ObjectKind::Fountain => ObjectFlags::SOLID,
            ObjectKind::Pillar => ObjectFlags::SOLID | ObjectFlags::TRANSPARENT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Door { open: false } => "closed door",
            ObjectKind::Door { open: true } => "open door",
            ObjectKind::Stairs(StairDirection::Up) => "stairway up",
            ObjectKind::Stairs(StairDirection::Down) => "stairway down",
            ObjectKind::Fountain => "fountain",
            ObjectKind::Pillar => "pillar",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapObject {
    pub id: EntityId,
    pub position: Position,
    pub kind: ObjectKind,
}

impl MapObject {
    pub fn new(id: EntityId, position: Position, kind: ObjectKind) -> Self {
        Self { id, position, kind }
    }

    pub fn flags(&self) -> ObjectFlags {
        self.kind.flags()
    }

    pub fn is_solid(&self) -> bool {
        self.flags().contains(ObjectFlags::SOLID)
    }

    pub fn is_transparent(&self) -> bool {
        self.flags().contains(ObjectFlags::TRANSPARENT)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundItem {
    pub position: Position,
    pub item: Item,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown terrain glyph {glyph:?} at {position:?}")]
    UnknownGlyph { glyph: char, position: Position },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Map {
    width: i32,
    height: i32,
    terrain: Vec<Terrain>,
    visited: Vec<bool>,
    objects: Vec<MapObject>,
    items: Vec<GroundItem>,
}

impl Map {
    pub fn filled(width: i32, height: i32, terrain: Terrain) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let cells = (width * height) as usize;
        Self {
            width,
            height,
            terrain: vec![terrain; cells],
            visited: vec![false; cells],
            objects: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Parses ASCII rows where `#` is wall and `.` is floor.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let first = rows.first().ok_or(MapError::Empty)?;
        let width = first.as_ref().chars().count();
        let mut map = Self::filled(width as i32, rows.len() as i32, Terrain::Wall);

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    row: y,
                    found,
                    expected: width,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                let terrain = match glyph {
                    '#' => Terrain::Wall,
                    '.' => Terrain::Floor,
                    other => {
                        return Err(MapError::UnknownGlyph {
                            glyph: other,
                            position,
                        });
                    }
                };
                map.set_terrain(position, terrain);
            }
        }
        Ok(map)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    pub(crate) fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| (position.y * self.width + position.x) as usize)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    pub fn terrain(&self, position: Position) -> Option<Terrain> {
        self.index(position).map(|i| self.terrain[i])
    }

    pub fn is_floor(&self, position: Position) -> bool {
        self.terrain(position) == Some(Terrain::Floor)
    }

    /// Explicit terrain mutation entry point. Off-map writes are ignored.
    pub fn set_terrain(&mut self, position: Position, terrain: Terrain) {
        if let Some(i) = self.index(position) {
            self.terrain[i] = terrain;
        }
    }

    pub fn is_visited(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| self.visited[i])
    }

    pub fn mark_visited(&mut self, position: Position) {
        if let Some(i) = self.index(position) {
            self.visited[i] = true;
        }
    }

    // ------------------------------------------------------------------
    // Objects
    // ------------------------------------------------------------------

    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    pub fn add_object(&mut self, object: MapObject) {
        self.objects.push(object);
    }

    pub fn object_at(&self, position: Position) -> Option<&MapObject> {
        self.objects.iter().find(|o| o.position == position)
    }

    pub fn object(&self, id: EntityId) -> Option<&MapObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: EntityId) -> Option<&mut MapObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn has_solid_object(&self, position: Position) -> bool {
        self.objects
            .iter()
            .any(|o| o.position == position && o.is_solid())
    }

    /// Positions of every solid object, gathered in one pass.
    pub fn solid_positions(&self) -> HashSet<Position> {
        self.objects
            .iter()
            .filter(|o| o.is_solid())
            .map(|o| o.position)
            .collect()
    }

    // ------------------------------------------------------------------
    // Ground items
    // ------------------------------------------------------------------

    pub fn items(&self) -> &[GroundItem] {
        &self.items
    }

    pub fn items_at(&self, position: Position) -> impl Iterator<Item = &Item> + '_ {
        self.items
            .iter()
            .filter(move |g| g.position == position)
            .map(|g| &g.item)
    }

    pub fn place_item(&mut self, position: Position, item: Item) {
        self.items.push(GroundItem { position, item });
    }

    /// Removes and returns the item `id` lying at `position`.
    pub fn take_item(&mut self, position: Position, id: EntityId) -> Option<Item> {
        let index = self
            .items
            .iter()
            .position(|g| g.position == position && g.item.id == id)?;
        Some(self.items.remove(index).item)
    }

    // ------------------------------------------------------------------
    // Connectivity
    // ------------------------------------------------------------------

    /// Eight-way flood fill over floor terrain starting at `start`.
    ///
    /// Returns a row-major mask of reached cells. Starting on a wall reaches
    /// nothing; starting off-map is an invariant violation.
    pub fn flood_fill(&self, start: Position) -> Result<Vec<bool>, InvariantViolation> {
        let start_index = self
            .index(start)
            .ok_or(InvariantViolation::FloodFillOffMap(start))?;
        let mut reached = vec![false; self.terrain.len()];
        if self.terrain[start_index] != Terrain::Floor {
            return Ok(reached);
        }

        reached[start_index] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for next in current.neighbors() {
                let Some(i) = self.index(next) else {
                    continue;
                };
                if !reached[i] && self.terrain[i] == Terrain::Floor {
                    reached[i] = true;
                    queue.push_back(next);
                }
            }
        }
        Ok(reached)
    }

    /// True if every floor cell can reach every other.
    pub fn check_connectivity(&self) -> Result<bool, InvariantViolation> {
        let start = self
            .positions()
            .find(|p| self.is_floor(*p))
            .ok_or(InvariantViolation::NoFloor)?;
        let reached = self.flood_fill(start)?;
        Ok(self
            .terrain
            .iter()
            .zip(&reached)
            .all(|(terrain, reached)| *terrain == Terrain::Wall || *reached))
    }

    /// Keeps the largest connected floor region and walls over the rest.
    /// Returns the number of cells filled.
    pub fn seal_unconnected_regions(&mut self) -> Result<usize, InvariantViolation> {
        let mut region_of = vec![usize::MAX; self.terrain.len()];
        let mut sizes: Vec<usize> = Vec::new();

        let floor: Vec<Position> = self.positions().filter(|p| self.is_floor(*p)).collect();
        if floor.is_empty() {
            return Err(InvariantViolation::NoFloor);
        }

        for position in floor {
            let Some(i) = self.index(position) else {
                continue;
            };
            if region_of[i] != usize::MAX {
                continue;
            }
            let region = sizes.len();
            let mask = self.flood_fill(position)?;
            let mut size = 0;
            for (cell, reached) in mask.into_iter().enumerate() {
                if reached {
                    region_of[cell] = region;
                    size += 1;
                }
            }
            sizes.push(size);
        }

        let largest = sizes
            .iter()
            .enumerate()
            .max_by_key(|(index, size)| (**size, std::cmp::Reverse(*index)))
            .map(|(index, _)| index)
            .unwrap_or(0);

        let mut filled = 0;
        for (cell, region) in region_of.iter().enumerate() {
            if *region != usize::MAX && *region != largest {
                self.terrain[cell] = Terrain::Wall;
                filled += 1;
            }
        }
        Ok(filled)
    }
}
