//! The player's two attacks: a short slash and a chain strike.
//!
//! Both share one `CooldownGate`, so the player can alternate them but never fire
//! both inside the shared cooldown window.

use bevy::prelude::*;

use super::chain::{resolve_chain, ChainParams};
use super::components::{DamageEvent, Faction};
use super::systems::{capture_snapshot, flush_damage, CombatantQuery};
use super::world::{Lifecycle, SpatialQuery};
use crate::core::CooldownGate;
use crate::player::{Facing, Player, PlayerControl};

/// Attack slots gated by the arsenal's cooldowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAttack {
    Slash,
    ChainStrike,
}

/// Player attack loadout and its cooldown state.
#[derive(Component)]
pub struct Arsenal {
    pub gate: CooldownGate<PlayerAttack>,
    pub slash_damage: f32,
    /// Slash range in units
    pub slash_reach: f32,
    pub chain: ChainParams,
}

impl Default for Arsenal {
    fn default() -> Self {
        Self {
            gate: CooldownGate::new(0.35)
                .with_action(PlayerAttack::Slash, 0.45)
                .with_action(PlayerAttack::ChainStrike, 2.5),
            slash_damage: 20.0,
            slash_reach: 2.2,
            chain: ChainParams {
                max_targets: 4,
                jump_radius: 5.0,
                damage: 15.0,
                faction: Faction::Hostile,
            },
        }
    }
}

/// Left click slashes, right click (or Q) casts the chain strike.
pub fn player_attacks(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    control: Res<PlayerControl>,
    mut player_query: Query<(Entity, &Transform, &Facing, &mut Arsenal), With<Player>>,
    combatants: CombatantQuery,
    mut damage_events: EventWriter<DamageEvent>,
) {
    if !control.enabled {
        return;
    }
    let Ok((player, transform, facing, mut arsenal)) = player_query.get_single_mut() else {
        return;
    };

    let wants_slash = mouse.just_pressed(MouseButton::Left);
    let wants_chain =
        mouse.just_pressed(MouseButton::Right) || keyboard.just_pressed(KeyCode::KeyQ);
    if !wants_slash && !wants_chain {
        return;
    }

    let now = time.elapsed_secs();
    let mut snapshot = capture_snapshot(&combatants);
    let origin = transform.translation.with_y(0.0);

    if wants_slash && arsenal.gate.try_trigger(PlayerAttack::Slash, now) {
        // Sphere slightly in front of the player
        let center = origin + facing.0 * (arsenal.slash_reach * 0.5);
        let radius = arsenal.slash_reach * 0.6;
        for target in snapshot.query_in_radius(center, radius, Faction::Hostile) {
            snapshot.apply_damage(target, arsenal.slash_damage);
        }
    } else if wants_chain && arsenal.gate.try_trigger(PlayerAttack::ChainStrike, now) {
        let chain = arsenal.chain;
        let struck = resolve_chain(origin, &chain, &mut snapshot);
        info!("Chain strike hit {} hostiles", struck.len());
    }

    flush_damage(&mut snapshot, Some(player), &mut damage_events);
}
