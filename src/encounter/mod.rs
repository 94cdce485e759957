//! Encounter module - wave director, ending sequence and their collaborators.

mod adapters;
mod channel;
mod collaborators;
mod config;
mod cues;
mod dialogue;
mod director;
mod ending;
mod error;
mod plugin;
mod rewards;
mod systems;

pub use channel::{BreakExit, EncounterEvent, EventChannel};
pub use collaborators::{
    EncounterContext, HostileSpawner, MissingLog, PanTarget, Presentation, RewardService,
    Telemetry,
};
pub use config::{
    EncounterConfig, EndingConfig, MusicTracks, PhaseTimings, RewardConfig, SpawnGroup,
    WaveDefinition, ENCOUNTER_PATH,
};
pub use cues::{CueBuffer, StageCue};
pub use dialogue::{DialogueRunner, DialogueState};
pub use director::{EncounterDirector, EncounterPhase};
pub use ending::{EndingSequence, EndingStep};
pub use error::EncounterError;
pub use plugin::EncounterPlugin;
pub use rewards::RewardPickup;
