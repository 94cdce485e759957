//! Player-related components and resources.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Horizontal unit direction the player faces; attacks go this way.
#[derive(Component, Debug, Clone, Copy)]
pub struct Facing(pub Vec3);

impl Default for Facing {
    fn default() -> Self {
        Self(Vec3::NEG_Z)
    }
}

/// Tracks player movement state for physics.
#[derive(Component)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            is_grounded: true,
            vertical_velocity: 0.0,
        }
    }
}

/// Whether player input moves and attacks. The ending takes control away.
#[derive(Resource, Debug)]
pub struct PlayerControl {
    pub enabled: bool,
}

impl Default for PlayerControl {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Configuration for the top-down controller.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Base movement speed in units per second
    pub move_speed: f32,
    /// Sprint speed multiplier
    pub sprint_multiplier: f32,
    /// Gravity acceleration
    pub gravity: f32,
    pub max_health: f32,
    /// Where the player appears at the start
    pub spawn_point: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            sprint_multiplier: 1.4,
            gravity: 15.0,
            max_health: 100.0,
            spawn_point: Vec3::new(0.0, 0.8, 4.0),
        }
    }
}
