//! Chain targeting: a greedy nearest-unvisited-neighbor walk for multi-hop effects.

use std::collections::HashSet;

use bevy::prelude::*;
use serde::Deserialize;

use super::components::Faction;
use super::world::CombatWorld;

/// Parameters for one chain invocation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ChainParams {
    /// Hard cap on the number of actors struck.
    pub max_targets: usize,
    /// Maximum distance between consecutive hits (and from the origin to the first).
    pub jump_radius: f32,
    /// Damage applied to every actor in the chain.
    pub damage: f32,
    /// Faction the chain may strike.
    pub faction: Faction,
}

/// One link of a resolved chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainHit {
    pub actor: Entity,
    pub position: Vec3,
}

/// Ordered, duplicate-free actors struck by one chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainTargetSet {
    hits: Vec<ChainHit>,
}

impl ChainTargetSet {
    pub fn hits(&self) -> &[ChainHit] {
        &self.hits
    }

    pub fn actors(&self) -> impl Iterator<Item = Entity> + '_ {
        self.hits.iter().map(|hit| hit.actor)
    }

    pub fn contains(&self, actor: Entity) -> bool {
        self.hits.iter().any(|hit| hit.actor == actor)
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Walks from `origin`, striking the nearest live, unvisited actor of `params.faction`
/// within `params.jump_radius` of the previous hit, until `params.max_targets` actors are
/// hit or no candidate remains.
///
/// No backtracking: once an actor is visited it is never struck again by this walk, even
/// if it later turns out to be the closest point to a subsequent hop.
pub fn resolve_chain<W>(origin: Vec3, params: &ChainParams, world: &mut W) -> ChainTargetSet
where
    W: CombatWorld + ?Sized,
{
    let mut set = ChainTargetSet::default();
    let mut visited = HashSet::new();
    let mut cursor = origin;

    while set.len() < params.max_targets {
        let Some(actor) = world.nearest(cursor, params.jump_radius, params.faction, &visited)
        else {
            break;
        };
        let Some(position) = world.position_of(actor) else {
            break;
        };

        world.apply_damage(actor, params.damage);
        visited.insert(actor);
        set.hits.push(ChainHit { actor, position });
        cursor = position;
    }

    debug!(
        "Chain from {:?} struck {} of max {}",
        origin,
        set.len(),
        params.max_targets
    );

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::world::{ArenaSnapshot, Lifecycle};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn params(max_targets: usize, jump_radius: f32) -> ChainParams {
        ChainParams {
            max_targets,
            jump_radius,
            damage: 5.0,
            faction: Faction::Hostile,
        }
    }

    fn line_of_hostiles(xs: &[f32]) -> ArenaSnapshot {
        let mut snapshot = ArenaSnapshot::new();
        for (i, x) in xs.iter().enumerate() {
            snapshot.insert(
                Entity::from_raw(i as u32 + 1),
                Vec3::new(*x, 0.0, 0.0),
                Faction::Hostile,
                100.0,
            );
        }
        snapshot
    }

    #[test]
    fn test_hops_from_previous_hit_not_origin() {
        // Each hostile is 2 apart; only the first is within 2.5 of the origin,
        // so reaching the rest proves hops measure from the previous hit.
        let mut world = line_of_hostiles(&[2.0, 4.0, 6.0, 8.0]);
        let chain = resolve_chain(Vec3::ZERO, &params(10, 2.5), &mut world);

        let ids: Vec<u32> = chain.actors().map(|e| e.index()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_stops_at_max_targets() {
        let mut world = line_of_hostiles(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let chain = resolve_chain(Vec3::ZERO, &params(3, 1.5), &mut world);
        assert_eq!(chain.len(), 3);
        assert_eq!(world.drain_damage().len(), 3);
    }

    #[test]
    fn test_never_revisits_even_when_closest() {
        // From 1.0 the already-hit actor at 0.5 is closer than the one at 1.6.
        let mut world = line_of_hostiles(&[0.5, 1.0, 1.6]);
        let chain = resolve_chain(Vec3::ZERO, &params(10, 1.0), &mut world);
        let ids: Vec<u32> = chain.actors().map(|e| e.index()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_gap_ends_chain() {
        let mut world = line_of_hostiles(&[1.0, 10.0]);
        let chain = resolve_chain(Vec3::ZERO, &params(10, 2.0), &mut world);
        assert_eq!(chain.len(), 1);
        assert!(!world.is_dead(Entity::from_raw(2)));
    }

    #[test]
    fn test_zero_max_targets_hits_nothing() {
        let mut world = line_of_hostiles(&[1.0]);
        let chain = resolve_chain(Vec3::ZERO, &params(0, 5.0), &mut world);
        assert!(chain.is_empty());
        assert!(world.drain_damage().is_empty());
    }

    #[test]
    fn test_random_layouts_respect_chain_invariants() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let mut world = ArenaSnapshot::new();
            let count = rng.gen_range(0..25);
            for i in 0..count {
                let faction = if rng.gen_bool(0.8) {
                    Faction::Hostile
                } else {
                    Faction::Player
                };
                world.insert(
                    Entity::from_raw(i + 1),
                    Vec3::new(rng.gen_range(-10.0..10.0), 0.0, rng.gen_range(-10.0..10.0)),
                    faction,
                    rng.gen_range(0.0..20.0),
                );
            }
            let params = params(rng.gen_range(0..8), rng.gen_range(0.5..6.0));
            let chain = resolve_chain(Vec3::ZERO, &params, &mut world);

            assert!(chain.len() <= params.max_targets);

            let unique: HashSet<Entity> = chain.actors().collect();
            assert_eq!(unique.len(), chain.len(), "duplicate actor in chain");

            let mut previous = Vec3::ZERO;
            for hit in chain.hits() {
                assert!(hit.position.distance(previous) <= params.jump_radius + 1e-4);
                previous = hit.position;
            }
        }
    }
}
