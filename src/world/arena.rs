//! Arena construction: floor, lights and the focal actor.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::encounter::EncounterDirector;

/// Half the side length of the square arena floor.
pub const ARENA_HALF_EXTENT: f32 = 30.0;

/// Marker for static arena entities.
#[derive(Component)]
pub struct ArenaGeometry;

/// The figure the ending's camera pans to.
#[derive(Component)]
pub struct FocalActor;

/// Spawn the floor and lighting.
pub fn build_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.55, 0.6, 0.7),
        brightness: 250.0,
    });

    // Directional light (low evening sun)
    commands.spawn((
        DirectionalLight {
            color: Color::srgb(1.0, 0.9, 0.8),
            illuminance: 6000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
        ArenaGeometry,
    ));

    // Floor slab, top face at y = 0
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(
            ARENA_HALF_EXTENT * 2.0,
            0.2,
            ARENA_HALF_EXTENT * 2.0,
        ))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.22, 0.24, 0.22),
            perceptual_roughness: 0.95,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.1, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(ARENA_HALF_EXTENT, 0.1, ARENA_HALF_EXTENT),
        Name::new("Arena Floor"),
        ArenaGeometry,
    ));
}

/// Place the focal actor once the encounter knows where it stands.
pub fn place_focal_actor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    director: Res<EncounterDirector>,
) {
    let (x, y, z) = director.config().ending.focus;
    commands.spawn((
        FocalActor,
        Name::new("Focal Actor"),
        Mesh3d(meshes.add(Capsule3d::new(0.35, 1.2))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.3, 0.4),
            emissive: LinearRgba::rgb(0.2, 0.25, 0.6),
            ..default()
        })),
        Transform::from_xyz(x, y + 0.95, z),
    ));
    debug!("Focal actor placed at ({}, {}, {})", x, y, z);
}
