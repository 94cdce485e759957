//! Telegraph markers as scene entities.

use bevy::prelude::*;

use super::components::{BehaviorAssets, TelegraphMarker};
use super::sequencer::IndicatorService;

/// Markers float just above the floor to avoid z-fighting.
const MARKER_HEIGHT: f32 = 0.02;

/// `IndicatorService` backed by deferred entity commands.
pub struct MarkerCommands<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    assets: &'a BehaviorAssets,
}

impl<'a, 'w, 's> MarkerCommands<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, assets: &'a BehaviorAssets) -> Self {
        Self { commands, assets }
    }
}

impl IndicatorService for MarkerCommands<'_, '_, '_> {
    fn place(&mut self, at: Vec3, radius: f32) -> Entity {
        self.commands
            .spawn((
                TelegraphMarker,
                Mesh3d(self.assets.marker_mesh.clone()),
                MeshMaterial3d(self.assets.marker_material.clone()),
                Transform::from_translation(at.with_y(MARKER_HEIGHT))
                    .with_scale(Vec3::new(radius, 1.0, radius)),
            ))
            .id()
    }

    fn release(&mut self, indicator: Entity) {
        if let Some(marker) = self.commands.get_entity(indicator) {
            marker.despawn_recursive();
        }
    }
}
