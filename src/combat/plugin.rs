//! Combat plugin - damage pipeline and player attacks.

use bevy::prelude::*;

use super::arsenal;
use super::systems;
use crate::core::TickSet;

/// Combat plugin - handles all combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Damage and death handling
        systems::setup_combat_systems(app);

        // Player attacks
        app.add_systems(Update, arsenal::player_attacks.in_set(TickSet::Input));
    }
}
