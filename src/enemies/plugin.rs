//! Enemy plugin - definitions, death handling and despawn.

use bevy::prelude::*;

use super::data::{load_enemy_definitions, EnemyRegistry};
use super::lifecycle;
use crate::core::{GameState, TickSet};

/// Enemy plugin - handles enemy definitions and the hostile lifecycle.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            // Definitions must be in place before the encounter builds its spawner
            .add_systems(OnEnter(GameState::Loading), load_enemy_definitions)
            .add_systems(
                Update,
                (lifecycle::handle_hostile_death, lifecycle::despawn_dead_hostiles)
                    .chain()
                    .in_set(TickSet::Reactions),
            );
    }
}
