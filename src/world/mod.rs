//! World module - the arena and its fixtures.

mod arena;
mod plugin;

pub use arena::{ArenaGeometry, FocalActor, ARENA_HALF_EXTENT};
pub use plugin::WorldPlugin;
