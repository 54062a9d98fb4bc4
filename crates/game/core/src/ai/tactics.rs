//! Priority trees per [`TacticKind`].
//!
//! Branches are tried top to bottom; the first that stores an action wins.
//! Every tree ends in wander and then idle, so a monster always has a plan.

use crate::action::WeaponChoice;
use crate::state::TacticKind;

use super::nodes::{
    AttackPlayer, ChasePlayer, HasSeenPlayer, Idle, LoadWeapon, MoveToLastKnown, PlayerAdjacent,
    PlayerVisible, Retreat, Wander,
};
use super::{BehaviorTree, leaf, selector, sequence};

pub fn tree_for(tactic: TacticKind) -> BehaviorTree {
    match tactic {
        TacticKind::Default => melee(),
        TacticKind::Ranged => ranged(),
    }
}

fn fallback() -> Vec<BehaviorTree> {
    vec![leaf(MoveToLastKnown), leaf(Wander), leaf(Idle)]
}

/// Chase and hit.
pub fn melee() -> BehaviorTree {
    let mut branches = vec![sequence(vec![
        leaf(PlayerVisible),
        selector(vec![
            leaf(AttackPlayer {
                weapon: WeaponChoice::Equipped,
            }),
            leaf(ChasePlayer),
        ]),
    ])];
    branches.extend(fallback());
    selector(branches)
}

/// Keep distance, load, fire. Adjacent threats are fled before they are
/// fought. A monster that has ever seen the player keeps its weapon loaded
/// while the player is out of sight.
pub fn ranged() -> BehaviorTree {
    let engaged = selector(vec![
        sequence(vec![
            leaf(PlayerAdjacent),
            selector(vec![
                leaf(Retreat),
                leaf(AttackPlayer {
                    weapon: WeaponChoice::Natural,
                }),
            ]),
        ]),
        leaf(LoadWeapon),
        leaf(AttackPlayer {
            weapon: WeaponChoice::Equipped,
        }),
        leaf(ChasePlayer),
    ]);
    let mut branches = vec![
        sequence(vec![leaf(PlayerVisible), engaged]),
        sequence(vec![leaf(HasSeenPlayer), leaf(LoadWeapon)]),
    ];
    branches.extend(fallback());
    selector(branches)
}
