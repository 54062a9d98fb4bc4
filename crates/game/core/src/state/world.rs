use crate::geometry::Position;
use crate::state::{ActorState, EntityId, Map};

/// One dungeon floor and the monsters living on it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    pub map: Map,
    pub monsters: Vec<ActorState>,
}

impl Level {
    pub fn new(map: Map) -> Self {
        Self {
            map,
            monsters: Vec::new(),
        }
    }

    pub fn with_monster(mut self, monster: ActorState) -> Self {
        self.monsters.push(monster);
        self
    }

    pub fn monster(&self, id: EntityId) -> Option<&ActorState> {
        self.monsters.iter().find(|m| m.id == id)
    }

    pub fn monster_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.monsters.iter_mut().find(|m| m.id == id)
    }
}

/// Where a staircase leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StairLink {
    pub from_level: usize,
    /// Id of the stairs object on `from_level`.
    pub stairs: EntityId,
    pub to_level: usize,
    pub arrival: Position,
}

/// Stairway linkage produced by level generation, keyed by stairs object id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StairsMapping {
    links: Vec<StairLink>,
}

impl StairsMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&mut self, link: StairLink) {
        self.links.retain(|l| !(l.from_level == link.from_level && l.stairs == link.stairs));
        self.links.push(link);
    }

    pub fn destination(&self, level: usize, stairs: EntityId) -> Option<StairLink> {
        self.links
            .iter()
            .copied()
            .find(|l| l.from_level == level && l.stairs == stairs)
    }

    pub fn links(&self) -> &[StairLink] {
        &self.links
    }
}
