//! Read-mostly queries for the presentation layer.
//!
//! These take `&mut self` only because they refresh the cached field of view.

use crate::action::{WeaponChoice, spell_path};
use crate::action::ActionContext;
use crate::ai::find_path;
use crate::combat::weapon_targets;
use crate::geometry::Position;
use crate::magic::Spell;
use crate::rules::filter_targetable_points;
use crate::state::{EffectivePoint, EntityId, Terrain};
use crate::trace::LineTracer;
use crate::vision::TileVisibility;

use super::GameEngine;
use super::hooks::assess_danger;

impl<'a> GameEngine<'a> {
    fn refresh_player_view(&mut self) {
        let player = &self.state.player;
        self.vision.compute(player.position, player.vision);
    }

    /// Row-major visibility of every cell on the current level.
    pub fn tile_visibility(&mut self) -> Vec<TileVisibility> {
        self.refresh_player_view();
        self.vision.tile_visibility(self.state.map())
    }

    pub fn cells_in_fov(&mut self) -> Vec<Position> {
        self.refresh_player_view();
        self.vision
            .field()
            .map(|fov| fov.visible_cells().collect())
            .unwrap_or_default()
    }

    /// Live monsters the player can currently see.
    pub fn monsters_in_fov(&mut self) -> Vec<EntityId> {
        self.refresh_player_view();
        self.state
            .monsters()
            .iter()
            .filter(|m| m.is_alive() && self.vision.is_visible(m.position))
            .map(|m| m.id)
            .collect()
    }

    /// Cells the player could attack right now with `weapon`.
    pub fn targetable_points(&mut self, weapon: WeaponChoice) -> Vec<EffectivePoint> {
        let player = &self.state.player;
        let weapon = weapon.resolve(player);
        weapon_targets(self.state.map(), &mut self.vision, player, &weapon)
    }

    /// Cells the player could aim `spell` at.
    pub fn spell_targets(&mut self, spell: Spell) -> Vec<Position> {
        let player = &self.state.player;
        filter_targetable_points(
            self.state.map(),
            &mut self.vision,
            spell.targetable_points(player.position),
            player.position,
            player.vision,
            true,
        )
    }

    /// Walking route from the player to `target`, excluding the start.
    pub fn path_preview(&self, target: Position) -> Option<Vec<Position>> {
        find_path(self.state, self.state.player.position, target, true)
    }

    /// Projectile route from the player to `target`.
    pub fn ranged_preview(&self, target: Position) -> Option<Vec<Position>> {
        LineTracer::new(self.state.map()).ranged_path(self.state.player.position, target)
    }

    /// Blast route through `target`. The bounce is only shown when the wall it
    /// comes off is in view.
    pub fn blast_preview(&mut self, target: Position) -> Option<Vec<Position>> {
        self.refresh_player_view();
        let origin = self.state.player.position;
        let tracer = LineTracer::new(self.state.map());
        let bounce = tracer
            .wall_hit_by_blast(origin, target)
            .is_some_and(|wall| self.vision.is_visible(wall));
        tracer.blast_path(origin, target, bounce, self.env.config().bounce_length)
    }

    /// Exact path a spell would take, with the same checks casting applies.
    pub fn spell_preview(&mut self, spell: Spell, target: Position) -> Option<Vec<Position>> {
        let mut ctx = ActionContext::new(self.env, &mut self.vision, &mut self.events);
        spell_path(self.state, &mut ctx, &self.state.player, spell, Some(target)).ok()
    }

    /// One-line description of what the player knows about `position`.
    pub fn describe_tile(&mut self, position: Position) -> String {
        self.refresh_player_view();
        let map = self.state.map();
        let visible = self.vision.is_visible(position);
        if !visible && !map.is_visited(position) {
            return String::from("You don't know what is there.");
        }

        if visible {
            if let Some(actor) = self.state.actor_at(position).and_then(|id| self.state.actor(id)) {
                if actor.is_player() {
                    return String::from("You are standing here.");
                }
                return format!(
                    "A {} ({}/{} hp).",
                    actor.name, actor.hp.current, actor.hp.maximum
                );
            }
        }
        if let Some(object) = map.object_at(position) {
            return format!("A {}.", object.kind.name());
        }
        if let Some(item) = map.items_at(position).next() {
            return format!("A {} lies here.", item.name);
        }
        match map.terrain(position) {
            Some(Terrain::Floor) => String::from("Floor."),
            Some(Terrain::Wall) => String::from("A wall."),
            None => String::from("Nothing."),
        }
    }

    /// Whether a monster is in view, was seen recently, or a harmful status
    /// is active.
    pub fn current_or_recent_danger(&mut self) -> bool {
        assess_danger(self.state, &mut self.vision, self.env.config())
    }
}
