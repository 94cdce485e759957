//! Minimal publish channel for encounter milestones.
//!
//! The director publishes into the channel during its tick; the engine layer drains it
//! once per frame and republishes as Bevy events.

use bevy::prelude::*;

/// Why a break ended. The first of these to occur wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakExit {
    Expired,
    Skipped,
    RewardClaimed,
}

/// Milestones of an encounter, in the order they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterEvent {
    WaveStarted { wave: u32 },
    WaveCleared { wave: u32, forced: bool },
    BreakEnded { wave: u32, reason: BreakExit },
    EndingStarted,
    EncounterFinished,
}

/// Pending encounter events.
#[derive(Resource, Debug, Default)]
pub struct EventChannel {
    pending: Vec<EncounterEvent>,
}

impl EventChannel {
    pub fn publish(&mut self, event: EncounterEvent) {
        self.pending.push(event);
    }

    /// Everything published since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<EncounterEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[EncounterEvent] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
