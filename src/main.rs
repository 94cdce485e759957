//! Wavebreak - Entry Point
//!
//! Survive the waves, then watch the ending.
//!
//! Controls:
//! - WASD: Move
//! - Shift: Sprint
//! - Left click: Slash
//! - Right click / Q: Chain strike
//! - Enter: Skip the break between waves
//! - Space / Left click: Advance dialogue
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Wavebreak".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Audio
        .add_plugins(AudioPlugin)

        // Our game plugin
        .add_plugins(wavebreak::WavebreakPlugin)

        .run();
}
