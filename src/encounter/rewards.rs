//! Break-time reward pickups.

use std::f32::consts::TAU;

use bevy::prelude::*;

use super::collaborators::RewardService;
use super::config::RewardConfig;

/// Pickups hover at this height.
const PICKUP_HEIGHT: f32 = 0.5;

/// A reward waiting on the arena floor.
#[derive(Component, Debug, Clone, Copy)]
pub struct RewardPickup {
    /// Health restored on pickup
    pub heal: f32,
}

/// Mesh and material shared by every pickup.
#[derive(Resource)]
pub struct RewardAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub fn setup_reward_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(RewardAssets {
        mesh: meshes.add(Cuboid::new(0.4, 0.4, 0.4)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.9, 0.4),
            emissive: LinearRgba::rgb(0.3, 1.8, 0.6),
            ..default()
        }),
    });
}

/// `RewardService` that records orders and applies them after the director's tick.
#[derive(Debug, Default)]
pub struct RewardOrders {
    drops: Vec<u32>,
    clear: bool,
}

impl RewardService for RewardOrders {
    fn spawn_rewards(&mut self, wave: u32) {
        self.drops.push(wave);
    }

    fn clear_unclaimed(&mut self) {
        self.clear = true;
    }
}

impl RewardOrders {
    /// Despawns `existing` pickups if asked, then drops any new ones.
    pub fn apply(
        self,
        commands: &mut Commands,
        assets: &RewardAssets,
        config: &RewardConfig,
        existing: impl IntoIterator<Item = Entity>,
    ) {
        if self.clear {
            let mut removed = 0;
            for pickup in existing {
                commands.entity(pickup).despawn_recursive();
                removed += 1;
            }
            debug!("Removed {} unclaimed rewards", removed);
        }

        for wave in self.drops {
            for position in drop_positions(config, wave) {
                commands.spawn((
                    RewardPickup { heal: config.heal },
                    Mesh3d(assets.mesh.clone()),
                    MeshMaterial3d(assets.material.clone()),
                    Transform::from_translation(position.with_y(PICKUP_HEIGHT)),
                ));
            }
            info!("Dropped {} rewards after wave {}", config.count, wave);
        }
    }
}

/// Evenly spaced around the arena centre, rotated a little each wave.
pub fn drop_positions(config: &RewardConfig, wave: u32) -> Vec<Vec3> {
    let count = config.count.max(1) as f32;
    (0..config.count)
        .map(|i| {
            let angle = TAU * i as f32 / count + wave as f32 * 0.7;
            Vec3::new(angle.cos(), 0.0, angle.sin()) * config.scatter_radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_sit_on_the_scatter_ring() {
        let config = RewardConfig {
            count: 4,
            scatter_radius: 3.0,
            heal: 10.0,
        };
        let positions = drop_positions(&config, 2);
        assert_eq!(positions.len(), 4);
        for position in &positions {
            assert!((position.length() - 3.0).abs() < 1e-4);
            assert_eq!(position.y, 0.0);
        }
        assert!(positions[0].distance(positions[1]) > 1.0);
    }

    #[test]
    fn test_zero_count_drops_nothing() {
        let config = RewardConfig {
            count: 0,
            ..Default::default()
        };
        assert!(drop_positions(&config, 1).is_empty());
    }
}
