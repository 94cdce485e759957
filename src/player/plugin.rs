//! Player plugin - spawning, movement, control lock and camera rig.

use bevy::prelude::*;

use super::camera;
use super::components::*;
use super::movement;
use crate::core::{GameState, TickSet};

/// Player plugin - handles player spawning, movement, and camera.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .init_resource::<PlayerControl>()
            .add_systems(
                OnExit(GameState::Loading),
                (movement::spawn_player, camera::spawn_camera),
            )
            .add_systems(Update, movement::player_movement.in_set(TickSet::Input))
            // Cues arrive from the encounter and are applied whatever the state
            .add_systems(
                Update,
                (
                    movement::apply_control_cues,
                    camera::apply_pan_cues,
                    camera::follow_player,
                )
                    .chain(),
            );
    }
}
