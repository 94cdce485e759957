//! Hostile-related components.

use bevy::prelude::*;

/// Marker component for every hostile actor.
#[derive(Component)]
pub struct Hostile;

/// Prototype name (matches the RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Wave that spawned this hostile. Deaths only count toward their own wave.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveTag(pub u32);

/// Post-death delay before the body is despawned.
#[derive(Component)]
pub struct DeathTimer(pub Timer);

/// Seconds a dead hostile stays on the floor.
pub const CORPSE_DURATION: f32 = 1.5;

impl Default for DeathTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(CORPSE_DURATION, TimerMode::Once))
    }
}
