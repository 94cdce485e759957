//! Player module - player entity, movement, and camera rig.

mod camera;
mod components;
mod movement;
mod plugin;

pub use camera::CameraRig;
pub use components::*;
pub use plugin::PlayerPlugin;
