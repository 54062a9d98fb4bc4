//! Scripted player for headless runs.
//!
//! Fights whatever it can see, drinks a potion when badly hurt, picks up
//! what it stands on and otherwise heads for the stairs down.

use crawl_core::{
    Direction, EngineFault, EntityId, GameEngine, ItemKind, ObjectKind, Position, StairDirection,
    WeaponChoice,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Attack(Position, WeaponChoice),
    Reload,
    Step(Direction),
    Quaff(EntityId),
    PickUp(EntityId),
    Descend,
    Rest,
}

pub fn choose(engine: &mut GameEngine<'_>) -> Command {
    let player = &engine.state().player;
    let wounded = player.hp.current * 3 < player.hp.maximum;
    let potion = player
        .inventory
        .iter()
        .find(|i| matches!(i.kind, ItemKind::Potion { .. }))
        .map(|i| i.id);
    if let (true, Some(potion)) = (wounded, potion) {
        return Command::Quaff(potion);
    }

    let visible = engine.monsters_in_fov();
    if let Some(command) = fight(engine, &visible) {
        return command;
    }

    let here = engine.state().player.position;
    if let Some(item) = engine.state().map().items_at(here).next() {
        return Command::PickUp(item.id);
    }

    let stairs = engine
        .state()
        .map()
        .objects()
        .iter()
        .find(|o| o.kind == ObjectKind::Stairs(StairDirection::Down))
        .map(|o| o.position);
    match stairs {
        Some(stairs) if stairs == here => Command::Descend,
        Some(stairs) => step_toward(engine, stairs).unwrap_or(Command::Rest),
        None => Command::Rest,
    }
}

fn fight(engine: &mut GameEngine<'_>, visible: &[EntityId]) -> Option<Command> {
    let targets: Vec<Position> = visible
        .iter()
        .filter_map(|id| engine.state().actor(*id).map(|m| m.position))
        .collect();
    let nearest = {
        let here = engine.state().player.position;
        targets.iter().copied().min_by_key(|p| here.chebyshev(*p))?
    };

    let weapon = engine.state().player.weapon.clone();
    if let Some(weapon) = weapon {
        if weapon.is_ranged() && !weapon.is_ready() {
            return Some(Command::Reload);
        }
        let reachable = engine.targetable_points(WeaponChoice::Equipped);
        if let Some(point) = reachable.iter().find(|p| targets.contains(&p.position)) {
            return Some(Command::Attack(point.position, WeaponChoice::Equipped));
        }
    }
    let reachable = engine.targetable_points(WeaponChoice::Natural);
    if let Some(point) = reachable.iter().find(|p| targets.contains(&p.position)) {
        return Some(Command::Attack(point.position, WeaponChoice::Natural));
    }
    step_toward(engine, nearest)
}

fn step_toward(engine: &GameEngine<'_>, target: Position) -> Option<Command> {
    let here = engine.state().player.position;
    let next = *engine.path_preview(target)?.first()?;
    Direction::between(here, next).map(Command::Step)
}

/// Runs `command`, falling back to resting when it is refused.
pub fn perform(engine: &mut GameEngine<'_>, command: Command) -> Result<bool, EngineFault> {
    let consumed = match command {
        Command::Attack(target, weapon) => engine.attack(target, weapon)?,
        Command::Reload => engine.reload_weapon()?,
        Command::Step(direction) => engine.move_player(direction)?,
        Command::Quaff(item) => engine.use_item(item, None)?,
        Command::PickUp(item) => engine.pick_up(item)?,
        Command::Descend => engine.take_stairs(StairDirection::Down)?,
        Command::Rest => false,
    };
    if consumed {
        Ok(true)
    } else {
        engine.wait()
    }
}
