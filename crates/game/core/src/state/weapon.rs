//! Weapons and the targetable-point geometry they generate.
//!
//! A weapon never knows who holds it: actors own `Option<Weapon>` and pass
//! their own position when asking for targets.

use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::geometry::{Direction, Position};

/// `count`d`sides` + `bonus`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceRoll {
    pub count: u16,
    pub sides: u16,
    pub bonus: i16,
}

impl DiceRoll {
    pub const fn new(count: u16, sides: u16, bonus: i16) -> Self {
        Self {
            count,
            sides,
            bonus,
        }
    }

    pub fn roll<R: RngOracle + ?Sized>(&self, rng: &R, seed: u64) -> i32 {
        let mut total = i32::from(self.bonus);
        if self.sides > 0 {
            for die in 0..u64::from(self.count) {
                total += rng.roll_die(seed.wrapping_add(die), u32::from(self.sides)) as i32;
            }
        }
        total
    }

    pub fn max(&self) -> i32 {
        i32::from(self.count) * i32::from(self.sides) + i32::from(self.bonus)
    }
}

/// Damage multiplier in permille: 1000 is full strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effectiveness(pub u16);

impl Effectiveness {
    pub const FULL: Self = Self(1000);
    pub const NONE: Self = Self(0);

    pub fn is_effective(self) -> bool {
        self.0 > 0
    }

    /// `round(amount * effectiveness)`; negative rolls count as zero.
    pub fn scale(self, amount: i32) -> i32 {
        (amount.max(0) * i32::from(self.0) + 500) / 1000
    }
}

/// A cell a weapon can reach and how hard it hits there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectivePoint {
    pub position: Position,
    pub effectiveness: Effectiveness,
}

impl EffectivePoint {
    pub const fn new(position: Position, effectiveness: Effectiveness) -> Self {
        Self {
            position,
            effectiveness,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeleeReach {
    /// All eight neighbours.
    Surrounding,
    /// North, east, south and west only.
    Cardinal,
}

/// Closed set of targeting behaviours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponProfile {
    Melee {
        reach: MeleeReach,
    },
    /// Manhattan distance in `(min_range, max_range]`. Full strength up to
    /// `falloff_start`, then `falloff_permille` less for every extra cell.
    RangedFalloff {
        min_range: u32,
        max_range: u32,
        falloff_start: u32,
        falloff_permille: u16,
    },
    /// Manhattan distance in `(min_range, max_range]`. Peaks at `optimal` and
    /// loses `falloff_permille` for every cell away from it.
    RangedStats {
        min_range: u32,
        max_range: u32,
        optimal: u32,
        falloff_permille: u16,
    },
}

impl WeaponProfile {
    pub fn is_ranged(&self) -> bool {
        !matches!(self, WeaponProfile::Melee { .. })
    }

    /// Raw targetable set from `origin`, before map filtering.
    pub fn targetable_points(&self, origin: Position) -> Vec<EffectivePoint> {
        match *self {
            WeaponProfile::Melee { reach } => {
                let directions: &[Direction] = match reach {
                    MeleeReach::Surrounding => &Direction::ALL,
                    MeleeReach::Cardinal => &Direction::CARDINAL,
                };
                directions
                    .iter()
                    .map(|d| EffectivePoint::new(origin.step(*d), Effectiveness::FULL))
                    .collect()
            }
            WeaponProfile::RangedFalloff {
                min_range,
                max_range,
                falloff_start,
                falloff_permille,
            } => ranged_points(origin, min_range, max_range, |distance| {
                let penalty = distance.saturating_sub(falloff_start) * u32::from(falloff_permille);
                1000u32.saturating_sub(penalty)
            }),
            WeaponProfile::RangedStats {
                min_range,
                max_range,
                optimal,
                falloff_permille,
            } => ranged_points(origin, min_range, max_range, |distance| {
                let penalty = distance.abs_diff(optimal) * u32::from(falloff_permille);
                1000u32.saturating_sub(penalty)
            }),
        }
    }
}

fn ranged_points(
    origin: Position,
    min_range: u32,
    max_range: u32,
    strength: impl Fn(u32) -> u32,
) -> Vec<EffectivePoint> {
    // Targets are filtered against sight, which never reaches further.
    let reach = max_range.min(GameConfig::MAX_VISION_RADIUS) as i32;
    let mut points = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let position = Position::new(origin.x + dx, origin.y + dy);
            let distance = origin.manhattan(position);
            if distance <= min_range || distance > max_range {
                continue;
            }
            let permille = strength(distance).min(1000) as u16;
            if permille > 0 {
                points.push(EffectivePoint::new(position, Effectiveness(permille)));
            }
        }
    }
    points
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    /// Third-person verb phrase used in combat messages ("slashes at").
    pub verb: String,
    pub damage: DiceRoll,
    pub profile: WeaponProfile,
    /// Base cost of one attack.
    pub attack_cost: u32,
    /// Ranged weapons must be loaded before every shot.
    pub loaded: bool,
}

impl Weapon {
    pub fn new(
        name: impl Into<String>,
        verb: impl Into<String>,
        damage: DiceRoll,
        profile: WeaponProfile,
    ) -> Self {
        Self {
            name: name.into(),
            verb: verb.into(),
            damage,
            profile,
            attack_cost: 100,
            loaded: false,
        }
    }

    /// Claws, fists and teeth: hits all eight neighbours.
    pub fn natural(damage: DiceRoll) -> Self {
        Self::new(
            "natural weapon",
            "hits",
            damage,
            WeaponProfile::Melee {
                reach: MeleeReach::Surrounding,
            },
        )
    }

    pub fn axe() -> Self {
        Self::new(
            "axe",
            "slashes at",
            DiceRoll::new(1, 8, 0),
            WeaponProfile::Melee {
                reach: MeleeReach::Cardinal,
            },
        )
    }

    pub fn simple_bow() -> Self {
        Self::new(
            "simple bow",
            "shoots at",
            DiceRoll::new(1, 2, 1),
            WeaponProfile::RangedFalloff {
                min_range: 2,
                max_range: 6,
                falloff_start: 4,
                falloff_permille: 250,
            },
        )
    }

    pub fn sling() -> Self {
        Self::new(
            "sling",
            "slings a stone at",
            DiceRoll::new(1, 3, 0),
            WeaponProfile::RangedStats {
                min_range: 1,
                max_range: 5,
                optimal: 3,
                falloff_permille: 200,
            },
        )
    }

    pub fn with_attack_cost(mut self, attack_cost: u32) -> Self {
        self.attack_cost = attack_cost;
        self
    }

    pub fn loaded(mut self) -> Self {
        self.loaded = true;
        self
    }

    pub fn is_ranged(&self) -> bool {
        self.profile.is_ranged()
    }

    /// Melee weapons are always ready; ranged ones only when loaded.
    pub fn is_ready(&self) -> bool {
        !self.is_ranged() || self.loaded
    }

    pub fn load(&mut self) {
        self.loaded = true;
    }

    pub fn unload(&mut self) {
        self.loaded = false;
    }

    pub fn targetable_points(&self, origin: Position) -> Vec<EffectivePoint> {
        self.profile.targetable_points(origin)
    }

    pub fn effectiveness_at(&self, origin: Position, target: Position) -> Option<Effectiveness> {
        self.targetable_points(origin)
            .into_iter()
            .find(|p| p.position == target)
            .map(|p| p.effectiveness)
    }
}
