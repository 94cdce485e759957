//! Presentation requests as engine events.
//!
//! The director's presentation collaborator only records what should happen; UI, audio,
//! camera and player systems each pick the cues they care about.

use bevy::prelude::*;

use super::collaborators::{PanTarget, Presentation};

/// One presentation request.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum StageCue {
    Warning { wave: u32, duration: f32 },
    Cleared { wave: u32 },
    Music { track: String, fade: f32 },
    PlayerControl(bool),
    Pan { target: PanTarget, duration: f32 },
    Dialogue { speaker: String, text: String },
    HideDialogue,
    TerminalCue,
    FadeOut { duration: f32 },
}

/// `Presentation` that buffers cues for later dispatch.
#[derive(Debug, Default)]
pub struct CueBuffer {
    pub cues: Vec<StageCue>,
}

impl CueBuffer {
    pub fn count(&self, matches: impl Fn(&StageCue) -> bool) -> usize {
        self.cues.iter().filter(|cue| matches(cue)).count()
    }
}

impl Presentation for CueBuffer {
    fn show_warning(&mut self, wave: u32, duration: f32) {
        self.cues.push(StageCue::Warning { wave, duration });
    }

    fn show_cleared(&mut self, wave: u32) {
        self.cues.push(StageCue::Cleared { wave });
    }

    fn crossfade_music(&mut self, track: &str, duration: f32) {
        self.cues.push(StageCue::Music {
            track: track.to_string(),
            fade: duration,
        });
    }

    fn set_player_control(&mut self, enabled: bool) {
        self.cues.push(StageCue::PlayerControl(enabled));
    }

    fn pan_camera(&mut self, target: PanTarget, duration: f32) {
        self.cues.push(StageCue::Pan { target, duration });
    }

    fn show_dialogue(&mut self, speaker: &str, text: &str) {
        self.cues.push(StageCue::Dialogue {
            speaker: speaker.to_string(),
            text: text.to_string(),
        });
    }

    fn hide_dialogue(&mut self) {
        self.cues.push(StageCue::HideDialogue);
    }

    fn play_terminal_cue(&mut self) {
        self.cues.push(StageCue::TerminalCue);
    }

    fn fade_out(&mut self, duration: f32) {
        self.cues.push(StageCue::FadeOut { duration });
    }
}
