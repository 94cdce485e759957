//! Per-tick behavior systems: steering, sequencers, projectiles and death interrupts.

use std::collections::HashSet;

use bevy::prelude::*;

use super::components::{BehaviorAssets, RestHeight, Sequencer, Steering};
use super::indicators::MarkerCommands;
use super::projectile::{spawn_projectile, Flight, Projectile};
use super::sequencer::SequencerContext;
use super::steering::steer_step;
use crate::combat::{
    capture_snapshot, flush_damage, CombatantQuery, DamageEvent, Dead, DeathEvent, SpatialQuery,
};

/// Emissive tint of a hostile about to strike.
const FLASH_EMISSIVE: LinearRgba = LinearRgba::rgb(2.5, 0.4, 0.1);

/// Idle actors walk into their engage band and face their target.
pub fn steer_idle_actors(
    time: Res<Time>,
    mut queries: ParamSet<(
        CombatantQuery,
        Query<(Entity, &mut Transform, &Sequencer, &Steering), Without<Dead>>,
    )>,
) {
    let world = capture_snapshot(&queries.p0());
    let dt = time.delta_secs();

    let mut actors = queries.p1();
    for (actor, mut transform, sequencer, steering) in actors.iter_mut() {
        if sequencer.0.is_busy() {
            continue;
        }

        let body = transform.translation.with_y(0.0);
        let profile = sequencer.0.profile();
        let exclude = HashSet::from([actor]);
        let Some(target) = world
            .nearest(body, steering.sight, profile.target_faction, &exclude)
            .and_then(|target| world.position_of(target))
        else {
            continue;
        };

        transform.translation += steer_step(body, target, profile, steering.speed, dt);
        face(&mut transform, target);
    }
}

/// Advance every live sequencer once, then let idle ones pick a target.
pub fn drive_sequencers(
    mut commands: Commands,
    time: Res<Time>,
    assets: Res<BehaviorAssets>,
    mut queries: ParamSet<(
        CombatantQuery,
        Query<(Entity, &mut Transform, &mut Sequencer, &RestHeight), Without<Dead>>,
    )>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let mut world = capture_snapshot(&queries.p0());
    let now = time.elapsed_secs();
    let dt = time.delta_secs();
    let mut projectiles = Vec::new();
    let mut markers = MarkerCommands::new(&mut commands, &assets);

    let mut actors = queries.p1();
    for (actor, mut transform, mut sequencer, rest) in actors.iter_mut() {
        let sequencer = &mut sequencer.0;
        let mut body = transform.translation - Vec3::Y * rest.0;

        let mut ctx = SequencerContext {
            now,
            world: &mut world,
            indicators: &mut markers,
            projectiles: &mut projectiles,
        };
        sequencer.tick(dt, &mut body, &mut ctx);

        if !sequencer.is_busy() {
            let profile = sequencer.profile();
            let exclude = HashSet::from([actor]);
            let target =
                ctx.world
                    .nearest(body, profile.engage_max, profile.target_faction, &exclude);
            if let Some(target) = target {
                sequencer.start(target, body, &mut ctx);
            }
        }

        transform.translation = body + Vec3::Y * rest.0;
        if let Some(snapshot) = sequencer.snapshot() {
            face(&mut transform, snapshot.target_position);
        }

        // Later actors this tick see where this one ended up
        world.set_position(actor, body.with_y(0.0));
        flush_damage(&mut world, Some(actor), &mut damage_events);
    }

    for spawn in &projectiles {
        spawn_projectile(&mut commands, &assets, spawn);
    }
}

/// Fly projectiles and resolve their hits.
pub fn move_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut queries: ParamSet<(
        CombatantQuery,
        Query<(Entity, &mut Transform, &mut Projectile)>,
    )>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let mut world = capture_snapshot(&queries.p0());
    let dt = time.delta();

    let mut projectiles = queries.p1();
    for (entity, mut transform, mut projectile) in projectiles.iter_mut() {
        let mut position = transform.translation.with_y(0.0);
        let flight = projectile.advance(&mut position, dt, &mut world);
        transform.translation = position.with_y(transform.translation.y);

        match flight {
            Flight::Flying => continue,
            Flight::Hit(target) => debug!("Projectile from {:?} hit {:?}", projectile.owner, target),
            Flight::Expired => {}
        }
        flush_damage(&mut world, Some(projectile.owner), &mut damage_events);
        commands.entity(entity).despawn_recursive();
    }
}

/// Dead actors drop whatever they were doing.
pub fn interrupt_on_death(
    mut commands: Commands,
    assets: Res<BehaviorAssets>,
    mut death_events: EventReader<DeathEvent>,
    mut sequencers: Query<&mut Sequencer>,
) {
    let mut markers = MarkerCommands::new(&mut commands, &assets);
    for event in death_events.read() {
        if let Ok(mut sequencer) = sequencers.get_mut(event.entity) {
            sequencer.0.interrupt(&mut markers);
        }
    }
}

/// Tint actors while their telegraph or commit is live.
pub fn flash_telegraphing(
    mut materials: ResMut<Assets<StandardMaterial>>,
    actors: Query<(&Sequencer, &MeshMaterial3d<StandardMaterial>)>,
) {
    for (sequencer, material) in actors.iter() {
        let wanted = if sequencer.0.is_flashing() {
            FLASH_EMISSIVE
        } else {
            LinearRgba::BLACK
        };
        let current = materials.get(&material.0).map(|m| m.emissive);
        if current.is_some_and(|emissive| emissive != wanted) {
            if let Some(material) = materials.get_mut(&material.0) {
                material.emissive = wanted;
            }
        }
    }
}

fn face(transform: &mut Transform, target: Vec3) {
    let look = target.with_y(transform.translation.y);
    if look.distance_squared(transform.translation) > 1e-4 {
        transform.look_at(look, Vec3::Y);
    }
}
