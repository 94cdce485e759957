//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::events::*;
use super::states::*;
use super::tween::*;

/// Fixed per-frame ordering of gameplay systems.
///
/// Every live sequence advances exactly once per frame, in this order, and only while
/// the game is `InGame`. Damage requested by one frame's behavior is applied at the
/// start of the next.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Player input, movement and attacks
    Input,
    /// Damage events turned into health changes and deaths
    Damage,
    /// Reactions to deaths (interrupts, director notification, despawn timers)
    Reactions,
    /// Encounter director
    Encounter,
    /// Hostile steering, behavior sequencers and projectiles
    Behavior,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused, ...)
/// - Global events (DamageEvent, DeathEvent, wave events)
/// - Basic game flow systems
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<WaveStarted>()
            .add_event::<WaveCleared>()
            .add_event::<EncounterFinished>()

            // Gameplay ordering
            .configure_sets(
                Update,
                (
                    TickSet::Input,
                    TickSet::Damage,
                    TickSet::Reactions,
                    TickSet::Encounter,
                    TickSet::Behavior,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Data files are read synchronously on startup, so loading ends on the first frame
            .add_systems(Update, finish_loading.run_if(in_state(GameState::Loading)))

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused)))
            )

            // Smooth transform interpolation (runs for all game states)
            .add_systems(Update, update_smooth_transforms);
    }
}

fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}
