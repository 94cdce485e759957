//! World plugin - arena setup.

use bevy::prelude::*;

use super::arena::{build_arena, place_focal_actor};
use crate::core::GameState;
use crate::encounter::EncounterDirector;

/// World plugin - builds the arena the encounter plays in.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnExit(GameState::Loading), build_arena)
            .add_systems(
                Update,
                place_focal_actor.run_if(resource_added::<EncounterDirector>),
            );
    }
}
