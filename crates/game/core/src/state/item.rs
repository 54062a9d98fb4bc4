use crate::magic::Spell;
use crate::state::{EntityId, Weapon};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    pub kind: ItemKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Weapon(Weapon),
    /// Restores up to `heal` hit points.
    Potion { heal: i32 },
    /// Casts `spell` once without mana, then crumbles.
    Scroll { spell: Spell },
    /// Casts `spell` without mana until the charges run out.
    Wand { spell: Spell, charges: u32 },
}

impl Item {
    pub fn new(id: EntityId, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }

    pub fn is_usable(&self) -> bool {
        !matches!(self.kind, ItemKind::Weapon(_))
    }

    /// The spell this item releases, if any.
    pub fn spell(&self) -> Option<Spell> {
        match self.kind {
            ItemKind::Scroll { spell } | ItemKind::Wand { spell, .. } => Some(spell),
            _ => None,
        }
    }
}
