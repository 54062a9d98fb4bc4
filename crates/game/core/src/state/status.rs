//! Status effect system for actors.
//!
//! Effects store the player turn count at which they lapse. Expiry runs once
//! per player turn from the engine hooks.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Active status effects on an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Turn count at which this effect ends.
    pub expires_at_turn: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// Speed x1.5.
    Hasted,
    /// Speed x0.5.
    Slowed,
    /// Loses hit points every turn.
    Poisoned,
    /// Doubles resting regeneration.
    Regenerating,
}

impl StatusEffectKind {
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::Slowed | Self::Poisoned)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Hasted => "hasted",
            Self::Slowed => "slowed",
            Self::Poisoned => "poisoned",
            Self::Regenerating => "regenerating",
        }
    }
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn any_negative(&self) -> bool {
        self.effects.iter().any(|e| e.kind.is_negative())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    /// Adds an effect or extends an existing one. Returns false when the
    /// effect list is full.
    pub fn apply(&mut self, kind: StatusEffectKind, expires_at_turn: u64) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.expires_at_turn = existing.expires_at_turn.max(expires_at_turn);
            return true;
        }
        self.effects
            .try_push(StatusEffect {
                kind,
                expires_at_turn,
            })
            .is_ok()
    }

    /// Drops every effect that has lapsed by `turn` and returns their kinds.
    pub fn expire(
        &mut self,
        turn: u64,
    ) -> ArrayVec<StatusEffectKind, { GameConfig::MAX_STATUS_EFFECTS }> {
        let mut expired = ArrayVec::new();
        self.effects.retain(|e| {
            if e.expires_at_turn <= turn {
                expired.push(e.kind);
                false
            } else {
                true
            }
        });
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reapplying_extends_duration() {
        let mut effects = StatusEffects::empty();
        assert!(effects.apply(StatusEffectKind::Hasted, 5));
        assert!(effects.apply(StatusEffectKind::Hasted, 9));
        assert_eq!(effects.iter().count(), 1);
        assert!(effects.expire(5).is_empty());
        assert_eq!(effects.expire(9).as_slice(), &[StatusEffectKind::Hasted]);
        assert!(!effects.has(StatusEffectKind::Hasted));
    }

    #[test]
    fn negative_effects_are_flagged() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffectKind::Regenerating, 3);
        assert!(!effects.any_negative());
        effects.apply(StatusEffectKind::Poisoned, 3);
        assert!(effects.any_negative());
    }
}
