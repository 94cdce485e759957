//! Behavior module - telegraph/commit/recovery sequencing for hostile actors.

mod archetype;
mod components;
mod indicators;
mod plugin;
mod profile;
mod projectile;
mod sequencer;
mod steering;
mod systems;

pub use archetype::{Archetype, CommitMotion, ProjectileSpawn};
pub use components::{BehaviorAssets, RestHeight, Sequencer, Steering, TelegraphMarker};
pub use indicators::MarkerCommands;
pub use plugin::BehaviorPlugin;
pub use profile::{horizontal, BehaviorProfile, LimbId, TelegraphContext};
pub use projectile::{Flight, Projectile, BODY_RADIUS};
pub use sequencer::{BehaviorSequencer, BehaviorState, IndicatorService, SequencerContext};
pub use steering::steer_step;
