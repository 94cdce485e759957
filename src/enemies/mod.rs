//! Enemies module - hostile definitions, spawning and lifecycle.

mod components;
pub mod data;
mod lifecycle;
mod plugin;
mod spawning;

pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry};
pub use plugin::EnemyPlugin;
pub use spawning::spawn_hostile;
