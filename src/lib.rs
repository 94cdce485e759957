//! Wavebreak - a wave-survival arena in Bevy.
//!
//! Hostiles arrive in waves, each running a telegraph / commit / recovery behavior
//! sequence; an encounter director paces the waves, breaks and the scripted ending.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, countdowns and cooldown arbitration
//! - **Player**: Top-down movement, control lock, camera rig
//! - **Combat**: Health, damage, snapshot queries, chain targeting, player attacks
//! - **Behavior**: Hostile behavior sequencer, archetypes, projectiles, steering
//! - **Enemies**: Enemy definitions, spawning, death and despawn
//! - **Encounter**: Wave director, ending sequence, rewards
//! - **World**: Arena floor, lights, focal actor
//! - **Audio**: Music crossfades and cues
//! - **UI**: HUD, banners, dialogue, menus

pub mod audio;
pub mod behavior;
pub mod combat;
pub mod core;
pub mod encounter;
pub mod enemies;
pub mod player;
pub mod ui;
pub mod world;

#[cfg(test)]
mod testing;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct WavebreakPlugin;

impl Plugin for WavebreakPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Hostile behavior
            .add_plugins(behavior::BehaviorPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Encounter director
            .add_plugins(encounter::EncounterPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // Music and cues
            .add_plugins(audio::AudioDirectorPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
