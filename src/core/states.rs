//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. The encounter director,
//! hostile behavior and player control only advance while `InGame`.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while data files are read
/// - `InGame` runs the encounter
/// - `Paused` freezes the encounter but keeps the arena visible
/// - `GameOver` when the player dies
/// - `Concluded` once the ending sequence has faded out
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active encounter
    InGame,
    /// Encounter is paused (overlay on gameplay)
    Paused,
    /// Player has died
    GameOver,
    /// Final wave cleared and ending played
    Concluded,
}
