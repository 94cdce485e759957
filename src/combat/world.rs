//! Spatial and lifecycle services consumed by behavior sequences and abilities.
//!
//! The traits are the only window hostile logic has onto the rest of the world.
//! `ArenaSnapshot` answers them from a read-only copy of every combatant, captured once
//! per tick, and queues damage for the engine's damage pipeline instead of mutating
//! components directly.

use std::collections::HashSet;

use bevy::prelude::*;

use super::components::Faction;

/// Radius queries over live actors.
pub trait SpatialQuery {
    /// Every live actor of `faction` within `radius` of `point`, in capture order.
    fn query_in_radius(&self, point: Vec3, radius: f32, faction: Faction) -> Vec<Entity>;

    /// Closest live actor of `faction` within `radius` of `point` that is not in `exclude`.
    /// Ties go to the first one found.
    fn nearest(
        &self,
        point: Vec3,
        radius: f32,
        faction: Faction,
        exclude: &HashSet<Entity>,
    ) -> Option<Entity>;

    /// Current position of an actor, dead or alive.
    fn position_of(&self, actor: Entity) -> Option<Vec3>;
}

/// Damage application and death queries.
pub trait Lifecycle {
    fn apply_damage(&mut self, actor: Entity, amount: f32);

    /// Unknown actors count as dead.
    fn is_dead(&self, actor: Entity) -> bool;
}

/// Both services together; what sequences and abilities are handed each tick.
pub trait CombatWorld: SpatialQuery + Lifecycle {}

impl<T: SpatialQuery + Lifecycle> CombatWorld for T {}

/// One combatant as seen at capture time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorRecord {
    pub entity: Entity,
    pub position: Vec3,
    pub faction: Faction,
    pub health: f32,
}

impl ActorRecord {
    fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Read-only world snapshot plus a queue of damage requests.
#[derive(Debug, Default, Clone)]
pub struct ArenaSnapshot {
    actors: Vec<ActorRecord>,
    damage: Vec<(Entity, f32)>,
}

impl ArenaSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(records: impl IntoIterator<Item = ActorRecord>) -> Self {
        Self {
            actors: records.into_iter().collect(),
            damage: Vec::new(),
        }
    }

    pub fn insert(&mut self, entity: Entity, position: Vec3, faction: Faction, health: f32) {
        self.actors.push(ActorRecord {
            entity,
            position,
            faction,
            health,
        });
    }

    /// Moves an actor inside the snapshot so later queries this tick see it.
    pub fn set_position(&mut self, entity: Entity, position: Vec3) {
        if let Some(record) = self.record_mut(entity) {
            record.position = position;
        }
    }

    pub fn record(&self, entity: Entity) -> Option<&ActorRecord> {
        self.actors.iter().find(|r| r.entity == entity)
    }

    fn record_mut(&mut self, entity: Entity) -> Option<&mut ActorRecord> {
        self.actors.iter_mut().find(|r| r.entity == entity)
    }

    pub fn actors(&self) -> &[ActorRecord] {
        &self.actors
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Damage requested since the last drain, in request order.
    pub fn drain_damage(&mut self) -> Vec<(Entity, f32)> {
        std::mem::take(&mut self.damage)
    }

    fn live(&self, faction: Faction) -> impl Iterator<Item = &ActorRecord> {
        self.actors
            .iter()
            .filter(move |r| r.faction == faction && r.is_alive())
    }
}

impl SpatialQuery for ArenaSnapshot {
    fn query_in_radius(&self, point: Vec3, radius: f32, faction: Faction) -> Vec<Entity> {
        let radius_sq = radius * radius;
        self.live(faction)
            .filter(|r| r.position.distance_squared(point) <= radius_sq)
            .map(|r| r.entity)
            .collect()
    }

    fn nearest(
        &self,
        point: Vec3,
        radius: f32,
        faction: Faction,
        exclude: &HashSet<Entity>,
    ) -> Option<Entity> {
        let radius_sq = radius * radius;
        let mut best: Option<(Entity, f32)> = None;

        for record in self.live(faction) {
            if exclude.contains(&record.entity) {
                continue;
            }
            let dist_sq = record.position.distance_squared(point);
            if dist_sq > radius_sq {
                continue;
            }
            // Strict comparison keeps the first-found minimum on ties
            if best.map_or(true, |(_, best_sq)| dist_sq < best_sq) {
                best = Some((record.entity, dist_sq));
            }
        }

        best.map(|(entity, _)| entity)
    }

    fn position_of(&self, actor: Entity) -> Option<Vec3> {
        self.record(actor).map(|r| r.position)
    }
}

impl Lifecycle for ArenaSnapshot {
    fn apply_damage(&mut self, actor: Entity, amount: f32) {
        let Some(record) = self.record_mut(actor) else {
            return;
        };
        if !record.is_alive() {
            return;
        }
        record.health = (record.health - amount.max(0.0)).max(0.0);
        self.damage.push((actor, amount));
    }

    fn is_dead(&self, actor: Entity) -> bool {
        self.record(actor).map_or(true, |r| !r.is_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: u32) -> Entity {
        Entity::from_raw(id)
    }

    fn arena() -> ArenaSnapshot {
        let mut snapshot = ArenaSnapshot::new();
        snapshot.insert(entity(1), Vec3::new(1.0, 0.0, 0.0), Faction::Hostile, 10.0);
        snapshot.insert(entity(2), Vec3::new(-1.0, 0.0, 0.0), Faction::Hostile, 10.0);
        snapshot.insert(entity(3), Vec3::new(0.5, 0.0, 0.0), Faction::Player, 10.0);
        snapshot.insert(entity(4), Vec3::new(0.2, 0.0, 0.0), Faction::Hostile, 0.0);
        snapshot
    }

    #[test]
    fn test_query_filters_faction_and_dead() {
        let snapshot = arena();
        let hits = snapshot.query_in_radius(Vec3::ZERO, 2.0, Faction::Hostile);
        assert_eq!(hits, vec![entity(1), entity(2)]);
    }

    #[test]
    fn test_nearest_prefers_first_found_on_tie() {
        let snapshot = arena();
        let none = HashSet::new();
        assert_eq!(
            snapshot.nearest(Vec3::ZERO, 5.0, Faction::Hostile, &none),
            Some(entity(1))
        );

        let exclude = HashSet::from([entity(1)]);
        assert_eq!(
            snapshot.nearest(Vec3::ZERO, 5.0, Faction::Hostile, &exclude),
            Some(entity(2))
        );

        assert_eq!(snapshot.nearest(Vec3::ZERO, 0.5, Faction::Hostile, &none), None);
    }

    #[test]
    fn test_damage_is_queued_and_kills() {
        let mut snapshot = arena();
        snapshot.apply_damage(entity(1), 4.0);
        snapshot.apply_damage(entity(1), 20.0);
        assert!(snapshot.is_dead(entity(1)));

        // Further damage to a dead actor is not queued
        snapshot.apply_damage(entity(1), 1.0);
        assert_eq!(snapshot.drain_damage(), vec![(entity(1), 4.0), (entity(1), 20.0)]);
        assert!(snapshot.drain_damage().is_empty());
    }

    #[test]
    fn test_unknown_actor_is_dead() {
        let snapshot = arena();
        assert!(snapshot.is_dead(entity(99)));
        assert_eq!(snapshot.position_of(entity(99)), None);
    }
}
