//! Spells, castable from mana or released by scrolls and wands.

use crate::combat::{DamageOutcome, damage_target};
use crate::engine::{EventLog, GameEvent};
use crate::env::{RngOracle, compute_seed, context};
use crate::geometry::Position;
use crate::state::{DiceRoll, EntityId, GameState, StatusEffectKind};
use crate::trace::LineTracer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Spell {
    Heal,
    Zap,
    Blast,
    Haste,
}

/// How a spell picks its cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellTargeting {
    /// Affects the caster; no target point.
    Caster,
    /// Projectile to a visible cell within `range`.
    Ranged { range: u32 },
    /// Blast through a visible cell within `range`, bouncing off the wall.
    Blast { range: u32 },
}

impl Spell {
    pub const HASTE_TURNS: u64 = 10;

    pub fn name(self) -> &'static str {
        match self {
            Spell::Heal => "heal",
            Spell::Zap => "zap",
            Spell::Blast => "blast",
            Spell::Haste => "haste",
        }
    }

    pub fn mana_cost(self) -> i32 {
        match self {
            Spell::Heal => 4,
            Spell::Zap => 2,
            Spell::Blast => 5,
            Spell::Haste => 3,
        }
    }

    pub fn targeting(self) -> SpellTargeting {
        match self {
            Spell::Heal | Spell::Haste => SpellTargeting::Caster,
            Spell::Zap => SpellTargeting::Ranged { range: 6 },
            Spell::Blast => SpellTargeting::Blast { range: 5 },
        }
    }

    pub fn power(self) -> DiceRoll {
        match self {
            Spell::Heal => DiceRoll::new(2, 4, 2),
            Spell::Zap => DiceRoll::new(1, 6, 1),
            Spell::Blast => DiceRoll::new(2, 4, 0),
            Spell::Haste => DiceRoll::new(0, 0, 0),
        }
    }

    /// Raw target cells around `origin`, before map and sight filtering.
    pub fn targetable_points(self, origin: Position) -> Vec<Position> {
        let range = match self.targeting() {
            SpellTargeting::Caster => return Vec::new(),
            SpellTargeting::Ranged { range } | SpellTargeting::Blast { range } => range,
        };
        let reach = range as i32;
        let r2 = i64::from(reach) * i64::from(reach);
        let mut points = Vec::new();
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let p = Position::new(origin.x + dx, origin.y + dy);
                if p != origin && origin.distance_squared(p) <= r2 {
                    points.push(p);
                }
            }
        }
        points
    }

    /// Cells the spell would travel through, or `None` if `target` cannot be
    /// reached. Caster-only spells have an empty path.
    pub fn path(
        self,
        tracer: &LineTracer<'_>,
        caster: Position,
        target: Option<Position>,
        bounce_length: u32,
    ) -> Option<Vec<Position>> {
        match self.targeting() {
            SpellTargeting::Caster => Some(Vec::new()),
            SpellTargeting::Ranged { .. } => tracer.ranged_path(caster, target?),
            SpellTargeting::Blast { .. } => {
                tracer.blast_path(caster, target?, true, bounce_length)
            }
        }
    }
}

/// Applies a spell whose legality and path were already established.
pub(crate) fn apply_spell<R: RngOracle + ?Sized>(
    state: &mut GameState,
    events: &mut EventLog,
    rng: &R,
    caster: EntityId,
    spell: Spell,
    path: &[Position],
) {
    let seed = compute_seed(state.game_seed, state.turn.nonce, caster.0, context::SPELL);
    let amount = spell.power().roll(rng, seed);
    let caster_name = state
        .actor(caster)
        .map(|a| a.name.clone())
        .unwrap_or_default();

    match spell {
        Spell::Heal => {
            let healed = state
                .actor_mut(caster)
                .map(|a| a.hp.restore(amount))
                .unwrap_or(0);
            events.push(GameEvent::Message(format!(
                "{caster_name} is healed for {healed} hit points."
            )));
        }
        Spell::Haste => {
            let until = state.turn.turn_count + Spell::HASTE_TURNS;
            if let Some(actor) = state.actor_mut(caster) {
                actor.status.apply(StatusEffectKind::Hasted, until);
            }
            events.push(GameEvent::Message(format!("{caster_name} speeds up.")));
        }
        Spell::Zap | Spell::Blast => {
            let target_at_end = path.last().is_some_and(|p| state.is_occupied(*p));
            events.push(GameEvent::RangedAttack {
                attacker: caster,
                path: path.to_vec(),
                target_at_end,
            });
            let cells: &[Position] = if spell == Spell::Zap {
                path.last().map(std::slice::from_ref).unwrap_or(&[])
            } else {
                path
            };
            // Bounce paths repeat the junction cell, which is hit twice.
            for cell in cells {
                let Some(victim) = state.actor_at(*cell) else {
                    continue;
                };
                let name = state.actor(victim).map(|a| a.name.clone()).unwrap_or_default();
                let outcome = damage_target(state, events, victim, amount);
                let text = match outcome {
                    DamageOutcome::Killed => format!("The {} destroys {name}.", spell.name()),
                    DamageOutcome::Wounded { .. } => {
                        format!("The {} hits {name} for {amount} damage.", spell.name())
                    }
                    DamageOutcome::Ignored => continue,
                };
                events.push(GameEvent::Message(text));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::{ActorState, Level, Map, TacticKind, Terrain};

    #[test]
    fn caster_spells_have_no_targets() {
        assert!(Spell::Heal.targetable_points(Position::ORIGIN).is_empty());
        let zap = Spell::Zap.targetable_points(Position::ORIGIN);
        assert!(zap.contains(&Position::new(6, 0)));
        assert!(!zap.contains(&Position::new(5, 5)));
        assert!(!zap.contains(&Position::ORIGIN));
    }

    #[test]
    fn blast_hits_every_actor_on_the_path() {
        let mut map = Map::filled(10, 1, Terrain::Floor);
        map.set_terrain(Position::new(6, 0), Terrain::Wall);
        let level = Level::new(map)
            .with_monster(ActorState::monster(
                EntityId(1),
                "bat",
                Position::new(2, 0),
                1,
                TacticKind::Default,
            ))
            .with_monster(ActorState::monster(
                EntityId(2),
                "newt",
                Position::new(4, 0),
                1,
                TacticKind::Default,
            ));
        let mut state = GameState::new(
            5,
            ActorState::player("mage", Position::new(0, 0), 10),
            vec![level],
        )
        .expect("one level");

        let path = {
            let tracer = LineTracer::new(state.map());
            Spell::Blast
                .path(&tracer, Position::new(0, 0), Some(Position::new(2, 0)), 3)
                .expect("clear line")
        };
        let mut events = EventLog::new();
        apply_spell(&mut state, &mut events, &PcgRng, EntityId::PLAYER, Spell::Blast, &path);
        assert!(state.monsters().is_empty());
        assert!(matches!(events[0], GameEvent::RangedAttack { .. }));
    }
}
