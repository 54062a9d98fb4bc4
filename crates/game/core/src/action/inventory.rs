use tracing::debug;

use crate::action::magic::spell_path;
use crate::action::{ActionContext, ActionTransition, CastSpellError};
use crate::config::GameConfig;
use crate::engine::GameEvent;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Position;
use crate::magic::apply_spell;
use crate::state::{ActorState, EntityId, GameState, Item, ItemKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("item {0} is not here")]
    ItemNotFound(EntityId),

    #[error("item {0} cannot be used")]
    NotUsable(EntityId),

    #[error("inventory is full")]
    InventoryFull,

    #[error("item {0} is not a weapon")]
    NotAWeapon(EntityId),

    #[error("no secondary weapon to swap in")]
    NothingToSwap,

    #[error(transparent)]
    Spell(#[from] CastSpellError),
}

impl GameError for ItemError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) => ErrorSeverity::Internal,
            Self::Spell(inner) => inner.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "ITEM_ACTOR_NOT_FOUND",
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::NotUsable(_) => "ITEM_NOT_USABLE",
            Self::InventoryFull => "ITEM_INVENTORY_FULL",
            Self::NotAWeapon(_) => "ITEM_NOT_A_WEAPON",
            Self::NothingToSwap => "ITEM_NOTHING_TO_SWAP",
            Self::Spell(inner) => inner.error_code(),
        }
    }
}

fn holder(state: &GameState, actor: EntityId) -> Result<&ActorState, ItemError> {
    state.actor(actor).ok_or(ItemError::ActorNotFound(actor))
}

fn holder_mut(state: &mut GameState, actor: EntityId) -> Result<&mut ActorState, ItemError> {
    state.actor_mut(actor).ok_or(ItemError::ActorNotFound(actor))
}

/// Drink a potion, read a scroll or zap a wand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemAction {
    pub actor: EntityId,
    pub item: EntityId,
    /// Target cell for scrolls and wands that aim.
    pub target: Option<Position>,
}

impl UseItemAction {
    pub fn new(actor: EntityId, item: EntityId, target: Option<Position>) -> Self {
        Self {
            actor,
            item,
            target,
        }
    }

    fn item<'s>(&self, state: &'s GameState) -> Result<(&'s ActorState, &'s Item), ItemError> {
        let user = holder(state, self.actor)?;
        let item = user.item(self.item).ok_or(ItemError::ItemNotFound(self.item))?;
        Ok((user, item))
    }
}

impl ActionTransition for UseItemAction {
    type Error = ItemError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, _state: &GameState, env: &GameEnv<'_>) -> u32 {
        env.config().action_cost
    }

    fn pre_validate(
        &self,
        state: &GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        let (user, item) = self.item(state)?;
        if !item.is_usable() {
            return Err(ItemError::NotUsable(self.item));
        }
        if let ItemKind::Wand { charges: 0, .. } = item.kind {
            return Err(ItemError::NotUsable(self.item));
        }
        if let Some(spell) = item.spell() {
            spell_path(state, ctx, user, spell, self.target)?;
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let (user, item) = self.item(state)?;
        let item = item.clone();
        let user_name = user.name.clone();

        match item.kind {
            ItemKind::Potion { heal } => {
                let user = holder_mut(state, self.actor)?;
                user.take_item(self.item);
                let healed = user.hp.restore(heal);
                ctx.events.push(GameEvent::Message(format!(
                    "{user_name} drinks the {} and recovers {healed} hit points.",
                    item.name
                )));
            }
            ItemKind::Scroll { spell } => {
                let path = spell_path(state, ctx, user, spell, self.target)?;
                holder_mut(state, self.actor)?.take_item(self.item);
                ctx.events.push(GameEvent::Message(format!(
                    "{user_name} reads the {}. It crumbles to dust.",
                    item.name
                )));
                apply_spell(state, ctx.events, ctx.env.rng(), self.actor, spell, &path);
            }
            ItemKind::Wand { spell, charges } => {
                let path = spell_path(state, ctx, user, spell, self.target)?;
                apply_spell(state, ctx.events, ctx.env.rng(), self.actor, spell, &path);

                let remaining = charges.saturating_sub(1);
                let user = holder_mut(state, self.actor)?;
                if remaining == 0 {
                    user.take_item(self.item);
                    ctx.events.push(GameEvent::Message(format!(
                        "The {} disintegrates.",
                        item.name
                    )));
                } else if let Some(wand) = user.inventory.iter_mut().find(|i| i.id == self.item) {
                    wand.kind = ItemKind::Wand {
                        spell,
                        charges: remaining,
                    };
                }
            }
            ItemKind::Weapon(_) => return Err(ItemError::NotUsable(self.item)),
        }
        debug!(actor = %self.actor, item = %self.item, "item used");
        Ok(())
    }
}

/// Lift an item from the cell the actor stands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickUpAction {
    pub actor: EntityId,
    pub item: EntityId,
}

impl PickUpAction {
    pub fn new(actor: EntityId, item: EntityId) -> Self {
        Self { actor, item }
    }
}

impl ActionTransition for PickUpAction {
    type Error = ItemError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, _state: &GameState, env: &GameEnv<'_>) -> u32 {
        env.config().action_cost
    }

    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        let actor = holder(state, self.actor)?;
        if !state.map().items_at(actor.position).any(|i| i.id == self.item) {
            return Err(ItemError::ItemNotFound(self.item));
        }
        if actor.inventory.len() >= GameConfig::MAX_INVENTORY_SLOTS {
            return Err(ItemError::InventoryFull);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let position = holder(state, self.actor)?.position;
        let item = state
            .map_mut()
            .take_item(position, self.item)
            .ok_or(ItemError::ItemNotFound(self.item))?;
        let actor = holder_mut(state, self.actor)?;
        ctx.events.push(GameEvent::Message(format!(
            "{} picks up the {}.",
            actor.name, item.name
        )));
        actor.inventory.push(item);
        Ok(())
    }
}

/// Put an inventory item down on the actor's cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropAction {
    pub actor: EntityId,
    pub item: EntityId,
}

impl DropAction {
    pub fn new(actor: EntityId, item: EntityId) -> Self {
        Self { actor, item }
    }
}

impl ActionTransition for DropAction {
    type Error = ItemError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, _state: &GameState, env: &GameEnv<'_>) -> u32 {
        env.config().action_cost
    }

    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        holder(state, self.actor)?
            .item(self.item)
            .map(|_| ())
            .ok_or(ItemError::ItemNotFound(self.item))
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let actor = holder_mut(state, self.actor)?;
        let position = actor.position;
        let name = actor.name.clone();
        let item = actor
            .take_item(self.item)
            .ok_or(ItemError::ItemNotFound(self.item))?;
        ctx.events
            .push(GameEvent::Message(format!("{name} drops the {}.", item.name)));
        state.map_mut().place_item(position, item);
        Ok(())
    }
}

/// Wield a weapon from the inventory. The previous weapon goes back into the
/// pack as a fresh item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipAction {
    pub actor: EntityId,
    pub item: EntityId,
}

impl EquipAction {
    pub fn new(actor: EntityId, item: EntityId) -> Self {
        Self { actor, item }
    }
}

impl ActionTransition for EquipAction {
    type Error = ItemError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, _state: &GameState, env: &GameEnv<'_>) -> u32 {
        env.config().equip_cost
    }

    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        let item = holder(state, self.actor)?
            .item(self.item)
            .ok_or(ItemError::ItemNotFound(self.item))?;
        match item.kind {
            ItemKind::Weapon(_) => Ok(()),
            _ => Err(ItemError::NotAWeapon(self.item)),
        }
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let returned_id = state.allocate_id();
        let actor = holder_mut(state, self.actor)?;
        let item = actor
            .take_item(self.item)
            .ok_or(ItemError::ItemNotFound(self.item))?;
        let ItemKind::Weapon(weapon) = item.kind else {
            actor.inventory.push(item);
            return Err(ItemError::NotAWeapon(self.item));
        };

        ctx.events.push(GameEvent::Message(format!(
            "{} wields the {}.",
            actor.name, weapon.name
        )));
        if let Some(previous) = actor.weapon.replace(weapon) {
            let name = previous.name.clone();
            actor
                .inventory
                .push(Item::new(returned_id, name, ItemKind::Weapon(previous)));
        }
        Ok(())
    }
}

/// Exchange the wielded and stowed weapons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapWeaponsAction {
    pub actor: EntityId,
}

impl SwapWeaponsAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for SwapWeaponsAction {
    type Error = ItemError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, _state: &GameState, env: &GameEnv<'_>) -> u32 {
        env.config().action_cost
    }

    fn pre_validate(
        &self,
        state: &GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        let actor = holder(state, self.actor)?;
        if actor.stowed.is_none() {
            return Err(ItemError::NothingToSwap);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let actor = holder_mut(state, self.actor)?;
        std::mem::swap(&mut actor.weapon, &mut actor.stowed);
        Ok(())
    }
}
