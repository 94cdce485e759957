//! Services the director drives but does not own.
//!
//! The engine layer assembles these from system parameters every tick and hands them
//! to the director in an `EncounterContext`; tests hand it in-memory fakes instead.

use std::collections::HashSet;

use bevy::prelude::*;

use super::channel::EventChannel;
use crate::combat::SpatialQuery;
use crate::core::Fault;

/// Instantiates hostiles. Returns `None` when the prototype cannot be spawned.
pub trait HostileSpawner {
    fn spawn(&mut self, prototype: &str, position: Vec3, wave: u32) -> Option<Entity>;
}

/// Drops and removes break-time rewards.
pub trait RewardService {
    fn spawn_rewards(&mut self, wave: u32);
    fn clear_unclaimed(&mut self);
}

/// Where the camera should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanTarget {
    /// The ending's focal actor
    Focus,
    /// Back to following the player
    Player,
}

/// Screen, sound and camera effects. Every call is best effort.
pub trait Presentation {
    fn show_warning(&mut self, wave: u32, duration: f32);
    fn show_cleared(&mut self, wave: u32);
    fn crossfade_music(&mut self, track: &str, duration: f32);
    fn set_player_control(&mut self, enabled: bool);
    fn pan_camera(&mut self, target: PanTarget, duration: f32);
    fn show_dialogue(&mut self, speaker: &str, text: &str);
    fn hide_dialogue(&mut self);
    fn play_terminal_cue(&mut self);
    fn fade_out(&mut self, duration: f32);
}

/// Analytics sink.
pub trait Telemetry {
    fn report_event(&mut self, name: &str, payload: &str);
}

/// Everything the director may touch during one tick. Only `events` is mandatory.
pub struct EncounterContext<'a> {
    pub spawner: Option<&'a mut dyn HostileSpawner>,
    pub rewards: Option<&'a mut dyn RewardService>,
    pub presentation: Option<&'a mut dyn Presentation>,
    pub telemetry: Option<&'a mut dyn Telemetry>,
    /// Live-actor census for timeout diagnostics
    pub census: Option<&'a dyn SpatialQuery>,
    pub events: &'a mut EventChannel,
}

impl<'a> EncounterContext<'a> {
    /// A context with no collaborators at all.
    pub fn bare(events: &'a mut EventChannel) -> Self {
        Self {
            spawner: None,
            rewards: None,
            presentation: None,
            telemetry: None,
            census: None,
            events,
        }
    }

    pub fn present(&mut self, missing: &mut MissingLog, f: impl FnOnce(&mut dyn Presentation)) {
        match self.presentation.as_deref_mut() {
            Some(presentation) => f(presentation),
            None => missing.note("presentation"),
        }
    }

    pub fn reward(&mut self, missing: &mut MissingLog, f: impl FnOnce(&mut dyn RewardService)) {
        match self.rewards.as_deref_mut() {
            Some(rewards) => f(rewards),
            None => missing.note("reward service"),
        }
    }

    pub fn report(&mut self, missing: &mut MissingLog, name: &str, payload: &str) {
        match self.telemetry.as_deref_mut() {
            Some(telemetry) => telemetry.report_event(name, payload),
            None => missing.note("telemetry"),
        }
    }
}

/// Collaborators already reported missing; each is warned about once.
#[derive(Debug, Default)]
pub struct MissingLog {
    reported: HashSet<&'static str>,
}

impl MissingLog {
    pub fn note(&mut self, collaborator: &'static str) {
        if self.reported.insert(collaborator) {
            warn!("{}", Fault::MissingCollaborator(collaborator));
        }
    }

    pub fn reported(&self) -> usize {
        self.reported.len()
    }

    pub fn contains(&self, collaborator: &str) -> bool {
        self.reported.contains(collaborator)
    }
}
