/// Game configuration constants and tunable parameters.
///
/// Costs are expressed in base units where `100` is one ordinary action taken
/// at normal speed. The scheduler converts them into ticks with
/// [`GameConfig::scale_cost`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Cost of a single step.
    pub move_cost: u32,
    /// Cost of a full action (wait, cast, use, operate, pick up).
    pub action_cost: u32,
    /// Cost of a minor action such as loading a ranged weapon.
    pub minor_action_cost: u32,
    /// Cost of equipping or swapping weapons.
    pub equip_cost: u32,
    /// Lower clamp applied to effective speed.
    pub min_speed: u32,
    /// Upper clamp applied to effective speed.
    pub max_speed: u32,
    /// Maximum number of cells appended by a blast bounce.
    pub bounce_length: u32,
    /// Number of player turns a sighting keeps the player "in danger".
    pub danger_turns: u64,
    /// Resting from empty to full takes roughly this many player turns.
    pub regen_rounds: i32,
    /// Hit points lost per turn while poisoned.
    pub poison_damage: i32,
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_INVENTORY_SLOTS: usize = 16;
    /// Speed that yields exactly the base cost.
    pub const NORMAL_SPEED: u32 = 100;
    /// Longest sight line, and so the furthest any weapon can be aimed.
    pub const MAX_VISION_RADIUS: u32 = 64;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_COST: u32 = 100;
    pub const DEFAULT_ACTION_COST: u32 = 100;
    pub const DEFAULT_MINOR_ACTION_COST: u32 = 50;
    pub const DEFAULT_EQUIP_COST: u32 = 200;
    pub const DEFAULT_MIN_SPEED: u32 = 25;
    pub const DEFAULT_MAX_SPEED: u32 = 400;
    pub const DEFAULT_BOUNCE_LENGTH: u32 = 3;
    pub const DEFAULT_DANGER_TURNS: u64 = 8;
    pub const DEFAULT_REGEN_ROUNDS: i32 = 20;
    pub const DEFAULT_POISON_DAMAGE: i32 = 1;

    pub fn new() -> Self {
        Self {
            move_cost: Self::DEFAULT_MOVE_COST,
            action_cost: Self::DEFAULT_ACTION_COST,
            minor_action_cost: Self::DEFAULT_MINOR_ACTION_COST,
            equip_cost: Self::DEFAULT_EQUIP_COST,
            min_speed: Self::DEFAULT_MIN_SPEED,
            max_speed: Self::DEFAULT_MAX_SPEED,
            bounce_length: Self::DEFAULT_BOUNCE_LENGTH,
            danger_turns: Self::DEFAULT_DANGER_TURNS,
            regen_rounds: Self::DEFAULT_REGEN_ROUNDS,
            poison_damage: Self::DEFAULT_POISON_DAMAGE,
        }
    }

    /// Converts a base cost into ticks for an actor moving at `speed`.
    ///
    /// Formula: `base * 100 / clamp(speed)`, never less than one tick.
    pub fn scale_cost(&self, base: u32, speed: u32) -> u64 {
        let speed = speed.clamp(self.min_speed.max(1), self.max_speed.max(1));
        let scaled = u64::from(base) * u64::from(Self::NORMAL_SPEED) / u64::from(speed);
        scaled.max(1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
