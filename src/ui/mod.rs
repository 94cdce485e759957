//! UI module - HUD, encounter overlays and menus.

mod hud;
mod overlays;
mod plugin;

pub use plugin::UiPlugin;
