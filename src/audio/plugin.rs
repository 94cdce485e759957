//! Audio plugin - music channel driven by encounter cues.

use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use super::music::{self, CurrentTrack, MusicChannel};

/// Audio plugin - plays the encounter's music and cues.
pub struct AudioDirectorPlugin;

impl Plugin for AudioDirectorPlugin {
    fn build(&self, app: &mut App) {
        app.add_audio_channel::<MusicChannel>()
            .init_resource::<CurrentTrack>()
            .add_systems(
                Update,
                (
                    music::crossfade_music,
                    music::play_terminal_cue,
                    music::fade_music_out,
                ),
            );
    }
}
