//! Archetype strategies plugged into the generic behavior sequencer.
//!
//! An archetype supplies two functions: how the body moves during `Commit`
//! (`step_motion`) and what the commit does to the world (`apply_effect`). Everything
//! else (timing, snapshotting, interruption) is shared.

use std::collections::HashSet;

use bevy::prelude::*;
use serde::Deserialize;

use super::profile::TelegraphContext;
use crate::combat::{CombatWorld, Faction};
use crate::core::Countdown;

/// Attack style of a hostile. Parameters come from the enemy's RON definition.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum Archetype {
    /// Dashes along the telegraphed direction, striking anything it touches.
    Charger {
        dash_speed: f32,
        dash_duration: f32,
        contact_radius: f32,
    },
    /// Leaps onto the telegraphed point and damages everything around the landing.
    Jumper {
        jump_duration: f32,
        jump_height: f32,
        damage_radius: f32,
    },
    /// Fires one projectile toward the telegraphed point.
    Shooter {
        projectile_speed: f32,
        projectile_lifetime: f32,
        projectile_radius: f32,
    },
}

impl Archetype {
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Charger { .. } => "charger",
            Archetype::Jumper { .. } => "jumper",
            Archetype::Shooter { .. } => "shooter",
        }
    }

    /// Size of the ground marker shown while telegraphing.
    pub fn indicator_radius(&self) -> f32 {
        match *self {
            Archetype::Charger { contact_radius, .. } => contact_radius,
            Archetype::Jumper { damage_radius, .. } => damage_radius,
            Archetype::Shooter {
                projectile_radius, ..
            } => projectile_radius * 2.0,
        }
    }

    pub(crate) fn begin_commit(&self, snapshot: &TelegraphContext, body: Vec3) -> CommitMotion {
        match *self {
            Archetype::Charger { dash_duration, .. } => CommitMotion::Dash {
                direction: snapshot.direction(),
                remaining: Countdown::new(dash_duration),
            },
            Archetype::Jumper { jump_duration, .. } => CommitMotion::Leap {
                from: body,
                to: snapshot.target_position,
                flight: Countdown::new(jump_duration),
            },
            Archetype::Shooter { .. } => CommitMotion::Volley { fired: false },
        }
    }

    /// Advances the body along the commit motion. Returns true once the motion is over.
    pub(crate) fn step_motion(&self, motion: &mut CommitMotion, dt: f32, body: &mut Vec3) -> bool {
        match (self, motion) {
            (
                Archetype::Charger { dash_speed, .. },
                CommitMotion::Dash {
                    direction,
                    remaining,
                },
            ) => {
                let step = dt.min(remaining.remaining());
                *body += *direction * *dash_speed * step;
                remaining.tick(dt)
            }
            (Archetype::Jumper { jump_height, .. }, CommitMotion::Leap { from, to, flight }) => {
                let landed = flight.tick(dt);
                if landed {
                    *body = *to;
                } else {
                    let t = flight.fraction();
                    let arc = 4.0 * t * (1.0 - t) * *jump_height;
                    *body = from.lerp(*to, t) + Vec3::Y * arc;
                }
                landed
            }
            (Archetype::Shooter { .. }, CommitMotion::Volley { .. }) => true,
            (archetype, motion) => {
                warn!(
                    "Commit motion {:?} does not match archetype {}",
                    motion,
                    archetype.name()
                );
                true
            }
        }
    }

    /// Applies the commit's effect after the motion step of this tick.
    pub(crate) fn apply_effect(&self, motion: &mut CommitMotion, landed: bool, strike: &mut Strike) {
        match (*self, motion) {
            (Archetype::Charger { contact_radius, .. }, CommitMotion::Dash { .. }) => {
                strike.hit_around(strike.body, contact_radius);
            }
            (Archetype::Jumper { damage_radius, .. }, CommitMotion::Leap { to, .. }) => {
                if landed {
                    strike.hit_around(*to, damage_radius);
                }
            }
            (
                Archetype::Shooter {
                    projectile_speed,
                    projectile_lifetime,
                    projectile_radius,
                },
                CommitMotion::Volley { fired },
            ) => {
                if !*fired {
                    *fired = true;
                    strike.projectiles.push(ProjectileSpawn {
                        owner: strike.attacker,
                        origin: strike.body,
                        velocity: strike.snapshot.direction() * projectile_speed,
                        damage: strike.damage,
                        faction: strike.faction,
                        lifetime: projectile_lifetime,
                        radius: projectile_radius,
                    });
                }
            }
            _ => {}
        }
    }
}

/// In-flight commit motion, created from the frozen snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommitMotion {
    Dash { direction: Vec3, remaining: Countdown },
    Leap { from: Vec3, to: Vec3, flight: Countdown },
    Volley { fired: bool },
}

/// A projectile the commit asked the engine to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub owner: Entity,
    pub origin: Vec3,
    pub velocity: Vec3,
    pub damage: f32,
    /// Faction the projectile may hit
    pub faction: Faction,
    pub lifetime: f32,
    pub radius: f32,
}

/// Everything a commit effect may touch during one tick.
pub(crate) struct Strike<'a> {
    pub attacker: Entity,
    pub body: Vec3,
    pub snapshot: &'a TelegraphContext,
    pub damage: f32,
    pub faction: Faction,
    pub world: &'a mut dyn CombatWorld,
    pub already_hit: &'a mut HashSet<Entity>,
    pub projectiles: &'a mut Vec<ProjectileSpawn>,
}

impl Strike<'_> {
    /// Damages every not-yet-hit target within `radius` of `point`.
    fn hit_around(&mut self, point: Vec3, radius: f32) {
        for target in self.world.query_in_radius(point, radius, self.faction) {
            if target == self.attacker || !self.already_hit.insert(target) {
                continue;
            }
            self.world.apply_damage(target, self.damage);
        }
    }
}
