//! Engine-backed collaborators handed to the director each frame.

use bevy::prelude::*;

use super::collaborators::{HostileSpawner, Telemetry};
use crate::enemies::{spawn_hostile, EnemyRegistry};

/// Spawns hostiles from the enemy registry through deferred commands.
pub struct CommandSpawner<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
    pub registry: &'a EnemyRegistry,
}

impl HostileSpawner for CommandSpawner<'_, '_, '_> {
    fn spawn(&mut self, prototype: &str, position: Vec3, wave: u32) -> Option<Entity> {
        let Some(definition) = self.registry.get(prototype) else {
            warn!("Unknown enemy prototype '{}'", prototype);
            return None;
        };
        Some(spawn_hostile(
            self.commands,
            self.meshes,
            self.materials,
            prototype,
            definition,
            position,
            wave,
        ))
    }
}

/// Telemetry written to the log under the `telemetry` target.
pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn report_event(&mut self, name: &str, payload: &str) {
        info!(target: "telemetry", "{} {}", name, payload);
    }
}
