//! Core game module - states, events, timing helpers and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod cooldown;
mod countdown;
mod events;
mod fault;
mod plugin;
mod states;
mod tween;

pub use cooldown::CooldownGate;
pub use countdown::{Countdown, COUNTDOWN_EPSILON};
pub use events::*;
pub use fault::Fault;
pub use plugin::{CorePlugin, TickSet};
pub use states::*;
pub use tween::*;
