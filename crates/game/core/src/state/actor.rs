use crate::config::GameConfig;
use crate::geometry::Position;
use crate::state::{
    DiceRoll, EntityId, Item, ResourceMeter, StatusEffectKind, StatusEffects, Tick, Weapon,
};

/// Which decision tree drives a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TacticKind {
    /// Chase and melee.
    Default,
    /// Keep distance, load and fire.
    Ranged,
}

/// What a monster remembers between turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterMemory {
    pub last_known_player: Option<Position>,
    pub seen_player: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterBrain {
    pub tactic: TacticKind,
    pub memory: MonsterMemory,
}

impl MonsterBrain {
    pub fn new(tactic: TacticKind) -> Self {
        Self {
            tactic,
            memory: MonsterMemory::default(),
        }
    }
}

/// Player or monster.
///
/// `ready_at` is the actor's action-energy debt expressed as the world time at
/// which it may act again. Every action pushes it forward by the action's
/// speed-scaled cost.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    pub hp: ResourceMeter,
    pub mp: ResourceMeter,
    pub vision: u32,
    /// 100 is normal speed.
    pub speed: u32,
    pub weapon: Option<Weapon>,
    /// Secondary weapon, swapped in with a single action.
    pub stowed: Option<Weapon>,
    /// Unarmed damage.
    pub natural: DiceRoll,
    pub status: StatusEffects,
    pub ready_at: Tick,
    pub inventory: Vec<Item>,
    /// `None` for the player.
    pub brain: Option<MonsterBrain>,
}

impl ActorState {
    pub const DEFAULT_VISION: u32 = 6;

    pub fn new(id: EntityId, name: impl Into<String>, position: Position, max_hp: i32) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            hp: ResourceMeter::full(max_hp),
            mp: ResourceMeter::full(0),
            vision: Self::DEFAULT_VISION,
            speed: GameConfig::NORMAL_SPEED,
            weapon: None,
            stowed: None,
            natural: DiceRoll::new(1, 2, 0),
            status: StatusEffects::empty(),
            ready_at: Tick::ZERO,
            inventory: Vec::new(),
            brain: None,
        }
    }

    pub fn player(name: impl Into<String>, position: Position, max_hp: i32) -> Self {
        Self::new(EntityId::PLAYER, name, position, max_hp)
    }

    pub fn monster(
        id: EntityId,
        name: impl Into<String>,
        position: Position,
        max_hp: i32,
        tactic: TacticKind,
    ) -> Self {
        Self::new(id, name, position, max_hp).with_brain(MonsterBrain::new(tactic))
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_stowed(mut self, weapon: Weapon) -> Self {
        self.stowed = Some(weapon);
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_vision(mut self, vision: u32) -> Self {
        self.vision = vision.min(GameConfig::MAX_VISION_RADIUS);
        self
    }

    pub fn with_mana(mut self, max_mp: i32) -> Self {
        self.mp = ResourceMeter::full(max_mp);
        self
    }

    pub fn with_natural(mut self, natural: DiceRoll) -> Self {
        self.natural = natural;
        self
    }

    pub fn with_brain(mut self, brain: MonsterBrain) -> Self {
        self.brain = Some(brain);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.inventory.push(item);
        self
    }

    pub fn is_player(&self) -> bool {
        self.id.is_player()
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }

    pub fn natural_weapon(&self) -> Weapon {
        Weapon::natural(self.natural)
    }

    /// Base speed adjusted by haste and slow, before the config clamp.
    pub fn effective_speed(&self) -> u32 {
        let mut speed = self.speed;
        if self.status.has(StatusEffectKind::Hasted) {
            speed = speed * 3 / 2;
        }
        if self.status.has(StatusEffectKind::Slowed) {
            speed /= 2;
        }
        speed
    }

    pub fn item(&self, id: EntityId) -> Option<&Item> {
        self.inventory.iter().find(|item| item.id == id)
    }

    pub fn take_item(&mut self, id: EntityId) -> Option<Item> {
        let index = self.inventory.iter().position(|item| item.id == id)?;
        Some(self.inventory.remove(index))
    }
}
