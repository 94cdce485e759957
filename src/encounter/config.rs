//! Encounter configuration loaded from RON.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::error::EncounterError;

/// Default location of the shipped encounter.
pub const ENCOUNTER_PATH: &str = "assets/data/encounter/encounter.ron";

/// `count` hostiles of one prototype.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SpawnGroup {
    /// Enemy type name (RON file stem under assets/data/enemies)
    pub prototype: String,
    pub count: u32,
}

/// Groups spawned in order when the wave begins.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct WaveDefinition {
    pub groups: Vec<SpawnGroup>,
}

impl WaveDefinition {
    /// Hostiles in the whole wave.
    pub fn total(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Prototype names in spawn order, one entry per hostile.
    pub fn spawn_order(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| std::iter::repeat(g.prototype.as_str()).take(g.count as usize))
    }
}

/// Durations of each director phase, in seconds.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhaseTimings {
    pub warning: f32,
    /// Delay between consecutive spawns (the first spawn is immediate)
    pub spawn_interval: f32,
    /// Longest a wave may stay active before it is force-cleared
    pub wave_timeout: f32,
    /// Pause on the cleared banner before the break
    pub cleared_hold: f32,
    pub break_duration: f32,
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self {
            warning: 3.0,
            spawn_interval: 1.0,
            wave_timeout: 90.0,
            cleared_hold: 2.0,
            break_duration: 20.0,
        }
    }
}

/// Music tracks (asset paths); any may be left out for silence.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MusicTracks {
    pub combat: Option<String>,
    pub calm: Option<String>,
    pub ending: Option<String>,
    /// Cross-fade duration
    pub crossfade: f32,
}

impl Default for MusicTracks {
    fn default() -> Self {
        Self {
            combat: None,
            calm: None,
            ending: None,
            crossfade: 1.5,
        }
    }
}

/// The scripted ending played after the final wave.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EndingConfig {
    pub speaker: String,
    pub lines: Vec<String>,
    /// Where the focal actor stands; the camera pans here
    pub focus: (f32, f32, f32),
    /// Characters revealed per second while a line types out
    pub typing_speed: f32,
    /// Camera pan to the focal actor and back
    pub pan_duration: f32,
    /// Hold after the terminal cue before panning back
    pub cue_duration: f32,
    pub fade_duration: f32,
    /// Sound effect played as the terminal cue
    pub terminal_cue: Option<String>,
}

impl Default for EndingConfig {
    fn default() -> Self {
        Self {
            speaker: String::new(),
            lines: Vec::new(),
            focus: (0.0, 0.0, -12.0),
            typing_speed: 40.0,
            pan_duration: 2.0,
            cue_duration: 1.5,
            fade_duration: 2.0,
            terminal_cue: None,
        }
    }
}

/// Reward pickups dropped after each non-final wave.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RewardConfig {
    pub count: u32,
    /// Distance from the arena centre
    pub scatter_radius: f32,
    /// Health restored to whoever picks one up
    pub heal: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            count: 3,
            scatter_radius: 3.0,
            heal: 15.0,
        }
    }
}

/// A complete encounter: waves, where hostiles appear, and how long everything takes.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EncounterConfig {
    pub waves: Vec<WaveDefinition>,
    /// Ground-plane spawn positions as (x, y, z)
    pub spawn_points: Vec<(f32, f32, f32)>,
    #[serde(default)]
    pub timings: PhaseTimings,
    #[serde(default)]
    pub music: MusicTracks,
    #[serde(default)]
    pub ending: EndingConfig,
    #[serde(default)]
    pub rewards: RewardConfig,
    /// Fixed seed for spawn-point selection; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl EncounterConfig {
    /// Read, parse and validate an encounter file.
    pub fn load(path: &Path) -> Result<Self, EncounterError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(EncounterError::FileNotFound(display));
        }
        let contents = fs::read_to_string(path).map_err(|e| EncounterError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::from_ron_str(&contents, &display)
    }

    /// Parse and validate encounter RON. `origin` names the source in errors.
    pub fn from_ron_str(source: &str, origin: &str) -> Result<Self, EncounterError> {
        let config: Self = ron::from_str(source).map_err(|e| EncounterError::ParseError {
            path: origin.to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks everything the director relies on.
    pub fn validate(&self) -> Result<(), EncounterError> {
        if self.waves.is_empty() {
            return Err(EncounterError::EmptyConfiguration(
                "no waves defined".to_string(),
            ));
        }
        if let Some(index) = self.waves.iter().position(|w| w.total() == 0) {
            return Err(EncounterError::EmptyConfiguration(format!(
                "wave {} spawns no hostiles",
                index + 1
            )));
        }
        if self.spawn_points.is_empty() {
            return Err(EncounterError::NoSpawnPoints);
        }

        let timings = &self.timings;
        let ending = &self.ending;
        let non_negative = [
            ("warning", timings.warning),
            ("spawn_interval", timings.spawn_interval),
            ("cleared_hold", timings.cleared_hold),
            ("break_duration", timings.break_duration),
            ("crossfade", self.music.crossfade),
            ("pan_duration", ending.pan_duration),
            ("cue_duration", ending.cue_duration),
            ("fade_duration", ending.fade_duration),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EncounterError::InvalidTiming { field, value });
            }
        }
        for (field, value) in [
            ("wave_timeout", timings.wave_timeout),
            ("typing_speed", ending.typing_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EncounterError::InvalidTiming { field, value });
            }
        }
        Ok(())
    }

    pub fn spawn_positions(&self) -> Vec<Vec3> {
        self.spawn_points
            .iter()
            .map(|&(x, y, z)| Vec3::new(x, y, z))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"(
        waves: [
            (groups: [(prototype: "charger", count: 3), (prototype: "shooter", count: 2)]),
        ],
        spawn_points: [(10.0, 0.0, 0.0)],
    )"#;

    #[test]
    fn test_minimal_encounter_uses_defaults() {
        let config = EncounterConfig::from_ron_str(MINIMAL, "inline").unwrap();
        assert_eq!(config.waves[0].total(), 5);
        assert_eq!(config.timings.wave_timeout, 90.0);
        assert_eq!(config.rewards.count, 3);
        assert!(config.music.combat.is_none());
        assert!(config.seed.is_none());

        let order: Vec<&str> = config.waves[0].spawn_order().collect();
        assert_eq!(order, ["charger", "charger", "charger", "shooter", "shooter"]);
    }

    #[test]
    fn test_empty_wave_list_is_rejected() {
        let source = "(waves: [], spawn_points: [(0.0, 0.0, 0.0)])";
        let err = EncounterConfig::from_ron_str(source, "inline").unwrap_err();
        assert!(matches!(err, EncounterError::EmptyConfiguration(_)));
    }

    #[test]
    fn test_wave_without_hostiles_is_rejected() {
        let source = r#"(
            waves: [(groups: [(prototype: "charger", count: 2)]), (groups: [])],
            spawn_points: [(0.0, 0.0, 0.0)],
        )"#;
        let err = EncounterConfig::from_ron_str(source, "inline").unwrap_err();
        assert_eq!(
            err,
            EncounterError::EmptyConfiguration("wave 2 spawns no hostiles".to_string())
        );
    }

    #[test]
    fn test_missing_spawn_points_are_rejected() {
        let source = r#"(waves: [(groups: [(prototype: "charger", count: 1)])], spawn_points: [])"#;
        let err = EncounterConfig::from_ron_str(source, "inline").unwrap_err();
        assert_eq!(err, EncounterError::NoSpawnPoints);
    }

    #[test]
    fn test_zero_wave_timeout_is_rejected() {
        let mut config = EncounterConfig::from_ron_str(MINIMAL, "inline").unwrap();
        config.timings.wave_timeout = 0.0;
        assert_eq!(
            config.validate(),
            Err(EncounterError::InvalidTiming {
                field: "wave_timeout",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_parse_and_missing_file_errors() {
        let err = EncounterConfig::from_ron_str("(waves: ", "broken.ron").unwrap_err();
        assert!(matches!(err, EncounterError::ParseError { ref path, .. } if path == "broken.ron"));

        let err = EncounterConfig::load(Path::new("does/not/exist.ron")).unwrap_err();
        assert!(matches!(err, EncounterError::FileNotFound(_)));
    }

    #[test]
    fn test_shipped_encounter_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(ENCOUNTER_PATH);
        let config = EncounterConfig::load(&path).unwrap();
        assert_eq!(config.timings.wave_timeout, 120.0);
        assert!(config.waves.len() >= 2);
    }
}
