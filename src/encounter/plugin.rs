//! Encounter plugin - director lifecycle and engine wiring.

use bevy::prelude::*;

use super::channel::EventChannel;
use super::cues::StageCue;
use super::director::EncounterDirector;
use super::rewards::setup_reward_assets;
use super::systems;
use crate::core::{GameState, TickSet};

/// Encounter plugin - runs the wave director while in game.
pub struct EncounterPlugin;

impl Plugin for EncounterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EventChannel>()
            .add_event::<StageCue>()
            .add_systems(Startup, setup_reward_assets)
            // Leaving Loading happens once; InGame is re-entered after every pause
            .add_systems(OnExit(GameState::Loading), systems::setup_encounter)
            .add_systems(
                Update,
                systems::forward_hostile_deaths
                    .in_set(TickSet::Reactions)
                    .run_if(resource_exists::<EncounterDirector>),
            )
            .add_systems(
                Update,
                (
                    systems::handle_encounter_input,
                    systems::claim_rewards,
                    systems::run_director,
                    systems::forward_encounter_events,
                    systems::clear_stragglers,
                )
                    .chain()
                    .in_set(TickSet::Encounter)
                    .run_if(resource_exists::<EncounterDirector>),
            );
    }
}
