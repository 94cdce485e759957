//! Music crossfades and the terminal cue.

use std::time::Duration;

use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::encounter::{EncounterDirector, StageCue};

/// Dedicated channel for background music.
#[derive(Resource)]
pub struct MusicChannel;

/// Path of the track currently playing on the music channel.
#[derive(Resource, Default, Debug)]
pub struct CurrentTrack(pub Option<String>);

fn tween(seconds: f32) -> AudioTween {
    AudioTween::new(
        Duration::from_secs_f32(seconds.max(0.0)),
        AudioEasing::Linear,
    )
}

/// Fade the current track out and the requested one in.
pub fn crossfade_music(
    mut cues: EventReader<StageCue>,
    asset_server: Res<AssetServer>,
    music: Res<AudioChannel<MusicChannel>>,
    mut current: ResMut<CurrentTrack>,
) {
    for cue in cues.read() {
        let StageCue::Music { track, fade } = cue else {
            continue;
        };
        if current.0.as_deref() == Some(track.as_str()) {
            continue;
        }

        music.stop().fade_out(tween(*fade));
        music
            .play(asset_server.load(track.clone()))
            .looped()
            .fade_in(tween(*fade));
        info!("Music -> {} ({:.1}s crossfade)", track, fade);
        current.0 = Some(track.clone());
    }
}

/// Play the ending's terminal cue once on the effects track.
pub fn play_terminal_cue(
    mut cues: EventReader<StageCue>,
    asset_server: Res<AssetServer>,
    audio: Res<Audio>,
    director: Option<Res<EncounterDirector>>,
) {
    for cue in cues.read() {
        if *cue != StageCue::TerminalCue {
            continue;
        }
        let path = director
            .as_ref()
            .and_then(|director| director.config().ending.terminal_cue.clone());
        match path {
            Some(path) => {
                audio.play(asset_server.load(path));
            }
            None => debug!("No terminal cue configured"),
        }
    }
}

/// Fade the music out along with the picture.
pub fn fade_music_out(mut cues: EventReader<StageCue>, music: Res<AudioChannel<MusicChannel>>) {
    for cue in cues.read() {
        if let StageCue::FadeOut { duration } = cue {
            music.stop().fade_out(tween(*duration));
        }
    }
}
