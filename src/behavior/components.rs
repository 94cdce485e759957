//! Behavior components attached to hostile actors and their by-products.

use bevy::prelude::*;

use super::sequencer::BehaviorSequencer;

/// The actor's attack state machine.
#[derive(Component, Debug)]
pub struct Sequencer(pub BehaviorSequencer);

/// Height of the actor's centre above the ground plane.
///
/// Sequencers and spatial queries work in ground-plane coordinates; this is added back
/// when writing the `Transform`.
#[derive(Component, Debug, Clone, Copy)]
pub struct RestHeight(pub f32);

/// Walks an idle actor into its engage band.
#[derive(Component, Debug, Clone, Copy)]
pub struct Steering {
    /// Units per second
    pub speed: f32,
    /// Targets farther than this are ignored
    pub sight: f32,
}

/// Ground marker placed while an attack is telegraphed.
#[derive(Component)]
pub struct TelegraphMarker;

/// Meshes and materials shared by every marker and projectile.
#[derive(Resource)]
pub struct BehaviorAssets {
    pub marker_mesh: Handle<Mesh>,
    pub marker_material: Handle<StandardMaterial>,
    pub projectile_mesh: Handle<Mesh>,
    pub projectile_material: Handle<StandardMaterial>,
}

/// Create the shared marker and projectile assets.
pub fn setup_behavior_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(BehaviorAssets {
        // Unit disc, scaled to the telegraph radius on placement
        marker_mesh: meshes.add(Cylinder::new(1.0, 0.02)),
        marker_material: materials.add(StandardMaterial {
            base_color: Color::srgba(0.9, 0.1, 0.05, 0.45),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        }),
        projectile_mesh: meshes.add(Sphere::new(1.0)),
        projectile_material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.55, 0.1),
            emissive: LinearRgba::rgb(4.0, 1.5, 0.2),
            ..default()
        }),
    });
}
