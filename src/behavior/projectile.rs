//! Projectiles fired by shooter commits.

use std::collections::HashSet;
use std::time::Duration;

use bevy::prelude::*;

use super::archetype::ProjectileSpawn;
use super::components::BehaviorAssets;
use crate::combat::{CombatWorld, Faction};

/// Approximate horizontal radius of an actor's body.
pub const BODY_RADIUS: f32 = 0.4;

/// Shots travel at chest height.
const FLIGHT_HEIGHT: f32 = 1.0;

/// A projectile in flight. Its position is the ground-plane projection of its transform.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub owner: Entity,
    pub damage: f32,
    /// Faction the projectile may hit
    pub faction: Faction,
    pub velocity: Vec3,
    pub radius: f32,
    pub lifetime: Timer,
}

/// Outcome of one tick of flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    Flying,
    Hit(Entity),
    Expired,
}

impl Projectile {
    pub fn from_spawn(spawn: &ProjectileSpawn) -> Self {
        Self {
            owner: spawn.owner,
            damage: spawn.damage,
            faction: spawn.faction,
            velocity: spawn.velocity,
            radius: spawn.radius,
            lifetime: Timer::from_seconds(spawn.lifetime.max(0.0), TimerMode::Once),
        }
    }

    /// Moves by one tick and damages the first body it touches.
    pub fn advance(
        &mut self,
        position: &mut Vec3,
        dt: Duration,
        world: &mut dyn CombatWorld,
    ) -> Flight {
        *position += self.velocity * dt.as_secs_f32();

        let exclude = HashSet::from([self.owner]);
        if let Some(target) =
            world.nearest(*position, self.radius + BODY_RADIUS, self.faction, &exclude)
        {
            world.apply_damage(target, self.damage);
            return Flight::Hit(target);
        }

        if self.lifetime.tick(dt).finished() {
            Flight::Expired
        } else {
            Flight::Flying
        }
    }
}

/// Spawn a projectile entity for a shooter's commit.
pub fn spawn_projectile(commands: &mut Commands, assets: &BehaviorAssets, spawn: &ProjectileSpawn) {
    commands.spawn((
        Projectile::from_spawn(spawn),
        Mesh3d(assets.projectile_mesh.clone()),
        MeshMaterial3d(assets.projectile_material.clone()),
        Transform::from_translation(spawn.origin.with_y(FLIGHT_HEIGHT))
            .with_scale(Vec3::splat(spawn.radius)),
    ));
}
