use std::fmt;

/// Unique identifier for any entity tracked in the state: actors, items and
/// map objects share one allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    ///
    /// Being the smallest id, the player wins every scheduling tie.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete world time. Only the scheduler advances it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer resource meter (hit points, mana) tracked per actor.
///
/// `current` may drop below zero; a depleted meter is how death is detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: i32,
    pub maximum: i32,
}

impl ResourceMeter {
    pub const fn new(current: i32, maximum: i32) -> Self {
        Self { current, maximum }
    }

    pub const fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }

    pub const fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// Adds up to `amount`, capped at the maximum. Returns what was actually
    /// applied.
    pub fn restore(&mut self, amount: i32) -> i32 {
        let before = self.current;
        if amount > 0 && self.current < self.maximum {
            self.current = self.current.saturating_add(amount).min(self.maximum);
        }
        self.current - before
    }

    pub fn deplete(&mut self, amount: i32) {
        self.current = self.current.saturating_sub(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_reports_applied_amount() {
        let mut hp = ResourceMeter::new(8, 10);
        assert_eq!(hp.restore(5), 2);
        assert_eq!(hp.current, 10);
        assert_eq!(hp.restore(5), 0);
    }

    #[test]
    fn deplete_can_go_negative() {
        let mut hp = ResourceMeter::full(3);
        hp.deplete(5);
        assert_eq!(hp.current, -2);
        assert!(hp.is_depleted());
    }
}
