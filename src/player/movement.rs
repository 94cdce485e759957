//! Top-down player movement.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{Arsenal, Faction, Health};
use crate::encounter::StageCue;

/// Spawn the player at the configured spawn point.
pub fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<PlayerConfig>,
) {
    commands.spawn((
        Player,
        Name::new("Player"),
        Facing::default(),
        MovementState::default(),
        // Combat components
        Health::new(config.max_health),
        Faction::Player,
        Arsenal::default(),
        // Visuals
        Mesh3d(meshes.add(Capsule3d::new(0.3, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.75, 0.8, 0.9),
            ..default()
        })),
        Transform::from_translation(config.spawn_point),
        // Rapier physics components
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(0.5, 0.3),
        KinematicCharacterController {
            offset: CharacterLength::Absolute(0.01),
            // Snap to ground when going down slopes
            snap_to_ground: Some(CharacterLength::Absolute(0.5)),
            ..default()
        },
    ));
}

/// Handle WASD movement (Shift to sprint) along the world axes.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    control: Res<PlayerControl>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (
            Entity,
            &mut Transform,
            &mut Facing,
            &mut MovementState,
            &mut KinematicCharacterController,
        ),
        With<Player>,
    >,
) {
    let Ok((player_entity, mut transform, mut facing, mut movement_state, mut controller)) =
        player_query.get_single_mut()
    else {
        return;
    };

    // Ground check using raycast
    // Player capsule is capsule_y(0.5, 0.3), so bottom is 0.8 units below center
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin = transform.translation - Vec3::Y * 0.75;
        context
            .cast_ray(
                ray_origin,
                Vec3::NEG_Y,
                0.15,
                true,
                QueryFilter::default().exclude_collider(player_entity),
            )
            .is_some()
    } else {
        // Fallback: assume grounded if no physics context
        true
    };
    movement_state.is_grounded = is_grounded;

    if is_grounded {
        movement_state.vertical_velocity = movement_state.vertical_velocity.max(0.0);
    } else {
        movement_state.vertical_velocity -= config.gravity * time.delta_secs();
    }

    let direction = if control.enabled {
        input_direction(&keyboard)
    } else {
        Vec3::ZERO
    };

    if direction != Vec3::ZERO {
        facing.0 = direction;
        let target = transform.translation + direction;
        transform.look_at(target, Vec3::Y);
    }

    let speed = if keyboard.pressed(KeyCode::ShiftLeft) {
        config.move_speed * config.sprint_multiplier
    } else {
        config.move_speed
    };

    let horizontal = direction * speed * time.delta_secs();
    let vertical = Vec3::new(0.0, movement_state.vertical_velocity * time.delta_secs(), 0.0);
    controller.translation = Some(horizontal + vertical);
}

/// Normalized WASD direction on the ground plane (W is -Z).
fn input_direction(keyboard: &ButtonInput<KeyCode>) -> Vec3 {
    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }
    // Normalize to prevent faster diagonal movement
    direction.normalize_or_zero()
}

/// Apply player-control cues from the encounter.
pub fn apply_control_cues(mut cues: EventReader<StageCue>, mut control: ResMut<PlayerControl>) {
    for cue in cues.read() {
        if let StageCue::PlayerControl(enabled) = cue {
            control.enabled = *enabled;
            info!("Player control {}", if *enabled { "restored" } else { "locked" });
        }
    }
}
