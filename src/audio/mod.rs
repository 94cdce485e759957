//! Audio module - music crossfades and one-shot cues.

mod music;
mod plugin;

pub use music::{CurrentTrack, MusicChannel};
pub use plugin::AudioDirectorPlugin;
