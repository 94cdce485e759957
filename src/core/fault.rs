//! Non-fatal anomalies that are logged and absorbed rather than propagated.

use thiserror::Error;

/// Recoverable conditions in the encounter and behavior layers.
///
/// None of these stop gameplay; they are logged and the affected sequence carries on
/// without the missing effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Fault {
    /// An optional collaborator (rewards, presentation, telemetry) is absent.
    #[error("Missing collaborator '{0}', continuing without it")]
    MissingCollaborator(&'static str),

    /// The hostile counter did not reach zero before the wave timeout.
    #[error("Wave {wave} stuck with {remaining} hostiles after {timeout}s, force-clearing")]
    StuckEncounter { wave: u32, remaining: u32, timeout: f32 },

    /// A start or interrupt arrived in a state that cannot service it.
    #[error("Ignored '{request}' while in {state}")]
    InvalidTransition {
        request: &'static str,
        state: &'static str,
    },

    /// Interrupt on a sequence that was already idle.
    #[error("Interrupt on an idle sequence ignored")]
    DoubleInterrupt,
}
