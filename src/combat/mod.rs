//! Combat module - health, factions, damage, chain targeting and player attacks.

mod arsenal;
mod chain;
mod components;
mod plugin;
mod systems;
mod world;

pub use arsenal::{Arsenal, PlayerAttack};
pub use chain::{resolve_chain, ChainHit, ChainParams, ChainTargetSet};
pub use components::*;
pub use plugin::CombatPlugin;
pub use systems::{capture_snapshot, flush_damage, CombatantQuery};
pub use world::{ActorRecord, ArenaSnapshot, CombatWorld, Lifecycle, SpatialQuery};
