//! Hostile spawning from enemy definitions.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{EnemyType, Hostile, WaveTag};
use super::data::EnemyDefinition;
use crate::behavior::{BehaviorSequencer, RestHeight, Sequencer, Steering};
use crate::combat::{Faction, Health};

/// Spawn one hostile standing at `position` on the ground plane.
///
/// Each hostile gets its own material so its telegraph flash does not leak onto others.
pub fn spawn_hostile(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    prototype: &str,
    definition: &EnemyDefinition,
    position: Vec3,
    wave: u32,
) -> Entity {
    let collider = &definition.collider;
    let rest_height = collider.rest_height() * definition.scale;
    let (r, g, b) = definition.color;

    let entity = commands
        .spawn((
            Hostile,
            EnemyType(prototype.to_string()),
            WaveTag(wave),
            Name::new(definition.name.clone()),
            Health::new(definition.max_health),
            Faction::Hostile,
            RestHeight(rest_height),
            Steering {
                speed: definition.move_speed,
                sight: definition.sight,
            },
            Mesh3d(meshes.add(Capsule3d::new(collider.radius, collider.half_height * 2.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(r, g, b),
                perceptual_roughness: 0.8,
                ..default()
            })),
            Transform::from_translation(position.with_y(rest_height))
                .with_scale(Vec3::splat(definition.scale)),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(collider.half_height, collider.radius),
        ))
        .id();

    commands.entity(entity).insert(Sequencer(BehaviorSequencer::new(
        entity,
        definition.behavior.clone(),
    )));

    debug!(
        "Spawned {} ({:?}) for wave {} at {:?}",
        definition.name, entity, wave, position
    );
    entity
}
