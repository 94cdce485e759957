//! Per-archetype tuning and the telegraph snapshot.

use bevy::prelude::*;
use serde::Deserialize;

use super::archetype::Archetype;
use crate::combat::Faction;
use crate::core::CooldownGate;

/// Index of an independently cooled attack limb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LimbId(pub u8);

/// Behavior tuning for one enemy prototype.
#[derive(Debug, Clone, Deserialize)]
pub struct BehaviorProfile {
    pub archetype: Archetype,
    /// Closest distance at which an attack may begin
    #[serde(default)]
    pub engage_min: f32,
    /// Farthest distance at which an attack may begin
    pub engage_max: f32,
    /// Announce window before the commit, in seconds
    pub telegraph_duration: f32,
    /// Lockout after the commit, in seconds
    pub recovery_duration: f32,
    /// Cooldown of each limb, in seconds
    pub attack_cooldown: f32,
    /// Independently cooled limbs (two for twin-armed hostiles)
    #[serde(default = "default_limbs")]
    pub limbs: u8,
    /// Minimum spacing between attacks from any limb
    #[serde(default)]
    pub shared_cooldown: f32,
    pub damage: f32,
    #[serde(default = "default_target_faction")]
    pub target_faction: Faction,
}

fn default_limbs() -> u8 {
    1
}

fn default_target_faction() -> Faction {
    Faction::Player
}

impl BehaviorProfile {
    pub fn limb_ids(&self) -> impl Iterator<Item = LimbId> {
        (0..self.limbs.max(1)).map(LimbId)
    }

    pub(crate) fn build_gate(&self) -> CooldownGate<LimbId> {
        self.limb_ids().fold(
            CooldownGate::new(self.shared_cooldown),
            |gate, limb| gate.with_action(limb, self.attack_cooldown),
        )
    }

    /// Whether a target at `distance` (horizontal) is inside the engage band.
    pub fn in_band(&self, distance: f32) -> bool {
        distance >= self.engage_min && distance <= self.engage_max
    }
}

/// Frozen at `Telegraph` entry and never refreshed: the commit resolves against where
/// the target *was* when the attack was announced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelegraphContext {
    pub target: Entity,
    pub target_position: Vec3,
    /// Attacker position at telegraph entry
    pub origin: Vec3,
    pub started_at: f32,
    pub limb: LimbId,
}

impl TelegraphContext {
    /// Horizontal unit direction from origin to target, or zero when they coincide.
    pub fn direction(&self) -> Vec3 {
        horizontal(self.target_position - self.origin).normalize_or_zero()
    }
}

/// Drops the vertical component.
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}
