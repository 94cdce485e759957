//! Global events used for cross-system communication.
//!
//! The combat pipeline turns `DamageEvent`s into health changes and `DeathEvent`s;
//! the encounter layer republishes its channel as `WaveStarted` / `WaveCleared` /
//! `EncounterFinished` for UI, audio and analytics listeners.

use bevy::prelude::*;

/// Sent when an entity takes damage.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage, if it still exists
    pub source: Option<Entity>,
    /// Damage amount
    pub amount: f32,
}

/// Sent exactly once when an entity's health reaches zero.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// A wave has begun spawning. Waves are numbered from 1.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveStarted {
    pub wave: u32,
}

/// A wave's hostile count reached zero.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveCleared {
    pub wave: u32,
    /// True when the wave timeout forced the clear.
    pub forced: bool,
}

/// The ending sequence has completed.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct EncounterFinished;
