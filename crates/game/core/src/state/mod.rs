//! Canonical world state.
//!
//! The player is stored once on [`GameState`]; monsters live in the arena of
//! the level they stand on. Everything is addressed by [`EntityId`] and
//! positions are plain data, so the whole tree clones and serializes as a
//! value.
mod actor;
mod common;
mod item;
mod map;
mod status;
mod turn;
mod weapon;
mod world;

pub use actor::{ActorState, MonsterBrain, MonsterMemory, TacticKind};
pub use common::{EntityId, ResourceMeter, Tick};
pub use item::{Item, ItemKind};
pub use map::{
    GroundItem, Map, MapError, MapObject, ObjectFlags, ObjectKind, StairDirection, Terrain,
};
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};
pub use turn::{GameStatus, TurnState};
pub use weapon::{DiceRoll, EffectivePoint, Effectiveness, MeleeReach, Weapon, WeaponProfile};
pub use world::{Level, StairLink, StairsMapping};

use std::collections::HashSet;

use crate::error::InvariantViolation;
use crate::geometry::Position;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub game_seed: u64,
    pub turn: TurnState,
    pub player: ActorState,
    pub levels: Vec<Level>,
    pub current_level: usize,
    pub stairs: StairsMapping,
    pub status: GameStatus,
    next_id: u32,
}

impl GameState {
    /// Assembles a world from generated levels. The player starts on level 0.
    pub fn new(
        game_seed: u64,
        player: ActorState,
        levels: Vec<Level>,
    ) -> Result<Self, InvariantViolation> {
        if levels.is_empty() {
            return Err(InvariantViolation::MissingLevel(0));
        }
        let mut state = Self {
            game_seed,
            turn: TurnState::default(),
            player,
            levels,
            current_level: 0,
            stairs: StairsMapping::new(),
            status: GameStatus::InProgress,
            next_id: 1,
        };
        state.next_id = state.highest_id() + 1;
        state.turn.current_actor = EntityId::PLAYER;
        Ok(state)
    }

    pub fn with_stairs(mut self, stairs: StairsMapping) -> Self {
        self.stairs = stairs;
        self
    }

    fn highest_id(&self) -> u32 {
        let mut highest = self.player.id.0;
        for item in &self.player.inventory {
            highest = highest.max(item.id.0);
        }
        for level in &self.levels {
            for monster in &level.monsters {
                highest = highest.max(monster.id.0);
            }
            for object in level.map.objects() {
                highest = highest.max(object.id.0);
            }
            for ground in level.map.items() {
                highest = highest.max(ground.item.id.0);
            }
        }
        highest
    }

    /// Hands out a fresh id for a newly created entity.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Checks the structural guarantees every other rule relies on.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.current_level >= self.levels.len() {
            return Err(InvariantViolation::MissingLevel(self.current_level));
        }
        for (index, level) in self.levels.iter().enumerate() {
            let mut occupied = HashSet::new();
            let on_level = index == self.current_level && self.player.is_alive();
            let actors = level
                .monsters
                .iter()
                .filter(|m| m.is_alive())
                .chain(on_level.then_some(&self.player));
            for actor in actors {
                if !level.map.is_floor(actor.position) {
                    return Err(InvariantViolation::ActorOffFloor {
                        actor: actor.id,
                        position: actor.position,
                    });
                }
                if !occupied.insert(actor.position) {
                    return Err(InvariantViolation::SharedCell {
                        position: actor.position,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::PlayerDied
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.current_level]
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.current_level]
    }

    pub fn map(&self) -> &Map {
        &self.level().map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.level_mut().map
    }

    pub fn monsters(&self) -> &[ActorState] {
        &self.level().monsters
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        if id.is_player() {
            Some(&self.player)
        } else {
            self.level().monster(id)
        }
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        if id.is_player() {
            Some(&mut self.player)
        } else {
            self.level_mut().monster_mut(id)
        }
    }

    /// The live actor standing on `position`, if any.
    pub fn actor_at(&self, position: Position) -> Option<EntityId> {
        if self.player.is_alive() && self.player.position == position {
            return Some(EntityId::PLAYER);
        }
        self.monsters()
            .iter()
            .find(|m| m.is_alive() && m.position == position)
            .map(|m| m.id)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.actor_at(position).is_some()
    }

    /// Ids of every live actor on the current level, player first.
    pub fn live_actor_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.player
            .is_alive()
            .then_some(EntityId::PLAYER)
            .into_iter()
            .chain(
                self.monsters()
                    .iter()
                    .filter(|m| m.is_alive())
                    .map(|m| m.id),
            )
    }

    pub fn remove_monster(&mut self, id: EntityId) -> Option<ActorState> {
        let monsters = &mut self.level_mut().monsters;
        let index = monsters.iter().position(|m| m.id == id)?;
        Some(monsters.remove(index))
    }
}
