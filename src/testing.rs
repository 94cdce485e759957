//! In-memory collaborators for unit tests.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use crate::behavior::IndicatorService;
use crate::encounter::{HostileSpawner, RewardService, Telemetry};

pub fn entity(id: u32) -> Entity {
    Entity::from_raw(id)
}

/// Records every indicator placed and how often each was released.
#[derive(Debug, Default)]
pub struct IndicatorLedger {
    next_id: u32,
    pub placed: Vec<(Entity, Vec3, f32)>,
    pub releases: HashMap<Entity, u32>,
}

impl IndicatorLedger {
    pub fn live(&self) -> usize {
        self.placed
            .iter()
            .filter(|(id, _, _)| !self.releases.contains_key(id))
            .count()
    }

    pub fn release_count(&self, indicator: Entity) -> u32 {
        self.releases.get(&indicator).copied().unwrap_or(0)
    }
}

impl IndicatorService for IndicatorLedger {
    fn place(&mut self, at: Vec3, radius: f32) -> Entity {
        self.next_id += 1;
        let id = Entity::from_raw(10_000 + self.next_id);
        self.placed.push((id, at, radius));
        id
    }

    fn release(&mut self, indicator: Entity) {
        *self.releases.entry(indicator).or_default() += 1;
    }
}

/// Spawner that hands out fresh entity ids and refuses listed prototypes.
#[derive(Debug, Default)]
pub struct RecordingSpawner {
    next_id: u32,
    pub refuse: HashSet<String>,
    pub spawned: Vec<(String, Vec3, u32)>,
}

impl RecordingSpawner {
    pub fn refusing(prototype: &str) -> Self {
        Self {
            refuse: HashSet::from([prototype.to_string()]),
            ..default()
        }
    }
}

impl HostileSpawner for RecordingSpawner {
    fn spawn(&mut self, prototype: &str, position: Vec3, wave: u32) -> Option<Entity> {
        if self.refuse.contains(prototype) {
            return None;
        }
        self.next_id += 1;
        self.spawned.push((prototype.to_string(), position, wave));
        Some(Entity::from_raw(20_000 + self.next_id))
    }
}

/// Counts reward drops and clean-ups.
#[derive(Debug, Default)]
pub struct RewardLedger {
    pub dropped_after: Vec<u32>,
    pub clears: u32,
}

impl RewardService for RewardLedger {
    fn spawn_rewards(&mut self, wave: u32) {
        self.dropped_after.push(wave);
    }

    fn clear_unclaimed(&mut self) {
        self.clears += 1;
    }
}

/// Keeps every telemetry event.
#[derive(Debug, Default)]
pub struct TelemetryLog {
    pub events: Vec<(String, String)>,
}

impl Telemetry for TelemetryLog {
    fn report_event(&mut self, name: &str, payload: &str) {
        self.events.push((name.to_string(), payload.to_string()));
    }
}
