//! Named weapons and items that scenario files can refer to.

use crawl_core::{ItemKind, Spell, Weapon};

/// Stock weapons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponSpec {
    Axe,
    SimpleBow,
    Sling,
}

impl WeaponSpec {
    pub fn build(self) -> Weapon {
        match self {
            WeaponSpec::Axe => Weapon::axe(),
            WeaponSpec::SimpleBow => Weapon::simple_bow(),
            WeaponSpec::Sling => Weapon::sling(),
        }
    }
}

/// Item description as written in content files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSpec {
    Weapon(WeaponSpec),
    Potion { heal: i32 },
    Scroll { spell: Spell },
    Wand { spell: Spell, charges: u32 },
}

impl ItemSpec {
    pub fn kind(self) -> ItemKind {
        match self {
            ItemSpec::Weapon(weapon) => ItemKind::Weapon(weapon.build()),
            ItemSpec::Potion { heal } => ItemKind::Potion { heal },
            ItemSpec::Scroll { spell } => ItemKind::Scroll { spell },
            ItemSpec::Wand { spell, charges } => ItemKind::Wand { spell, charges },
        }
    }

    /// Display name used when the content file does not give one.
    pub fn default_name(self) -> String {
        match self {
            ItemSpec::Weapon(weapon) => weapon.build().name,
            ItemSpec::Potion { .. } => String::from("healing potion"),
            ItemSpec::Scroll { spell } => format!("scroll of {}", spell.name()),
            ItemSpec::Wand { spell, .. } => format!("wand of {}", spell.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_follow_the_item_kind() {
        assert_eq!(ItemSpec::Weapon(WeaponSpec::Sling).default_name(), "sling");
        assert_eq!(
            ItemSpec::Wand {
                spell: Spell::Zap,
                charges: 3
            }
            .default_name(),
            "wand of zap"
        );
    }

    #[test]
    fn stock_weapons_start_unloaded() {
        assert!(!WeaponSpec::SimpleBow.build().is_ready());
        assert!(WeaponSpec::Axe.build().is_ready());
    }
}
