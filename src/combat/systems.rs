//! Combat systems - snapshot capture, damage and death handling.

use bevy::prelude::*;

use super::components::*;
use super::world::{ActorRecord, ArenaSnapshot};
use crate::core::{GameState, TickSet};
use crate::enemies::Hostile;
use crate::player::Player;

/// Every entity that can be targeted: position, side, health and death marker.
pub type CombatantQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Transform,
        &'static Faction,
        &'static Health,
        Has<Dead>,
    ),
>;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.add_systems(
        Update,
        (apply_damage, check_deaths).chain().in_set(TickSet::Damage),
    );
}

/// Copies every combatant into a read-only snapshot for this tick.
///
/// Positions are projected onto the ground plane; bodies of different heights still
/// meet at the same radius.
pub fn capture_snapshot(combatants: &CombatantQuery) -> ArenaSnapshot {
    ArenaSnapshot::capture(combatants.iter().map(
        |(entity, transform, faction, health, dead)| ActorRecord {
            entity,
            position: transform.translation.with_y(0.0),
            faction: *faction,
            health: if dead { 0.0 } else { health.current },
        },
    ))
}

/// Turns queued snapshot damage into engine damage events.
pub fn flush_damage(
    snapshot: &mut ArenaSnapshot,
    source: Option<Entity>,
    damage_events: &mut EventWriter<DamageEvent>,
) {
    for (target, amount) in snapshot.drain_damage() {
        damage_events.send(DamageEvent {
            target,
            source,
            amount,
        });
    }
}

/// Apply damage to entities.
fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(&mut Health, Has<Dead>)>,
    mut death_events: EventWriter<DeathEvent>,
) {
    // Track entities that died this frame to avoid duplicate death events
    let mut died_this_frame = std::collections::HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, dead)) = health_query.get_mut(event.target) else {
            continue;
        };
        if dead {
            continue;
        }

        health.take_damage(event.amount);

        if health.is_dead() {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: event.source,
            });
        }
    }
}

/// Check for entity deaths.
fn check_deaths(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    player_query: Query<Entity, With<Player>>,
    hostile_query: Query<Entity, With<Hostile>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        if player_query.get(event.entity).is_ok() {
            info!("Player died! Transitioning to Game Over...");
            next_state.set(GameState::GameOver);
        } else if hostile_query.get(event.entity).is_ok() {
            // Hostiles are interrupted, counted and despawned by the enemy systems
        } else {
            commands.entity(event.entity).despawn_recursive();
        }
    }
}
