//! Behavior plugin - hostile sequencers, steering and projectiles.

use bevy::prelude::*;

use super::components::setup_behavior_assets;
use super::systems;
use crate::core::TickSet;

/// Behavior plugin - drives every hostile's attack sequence once per frame.
pub struct BehaviorPlugin;

impl Plugin for BehaviorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_behavior_assets)
            .add_systems(Update, systems::interrupt_on_death.in_set(TickSet::Reactions))
            .add_systems(
                Update,
                (
                    systems::steer_idle_actors,
                    systems::drive_sequencers,
                    systems::move_projectiles,
                    systems::flash_telegraphing,
                )
                    .chain()
                    .in_set(TickSet::Behavior),
            );
    }
}
