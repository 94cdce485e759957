//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::behavior::BehaviorProfile;

/// Collider configuration for an enemy type.
#[derive(Deserialize, Clone, Debug)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_height: 0.5,
            radius: 0.4,
        }
    }
}

impl ColliderConfig {
    /// Height of the capsule centre when standing on the floor.
    pub fn rest_height(&self) -> f32 {
        self.half_height + self.radius
    }
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    pub move_speed: f32,
    /// How far away the hostile notices targets
    #[serde(default = "default_sight")]
    pub sight: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Body colour as linear RGB
    pub color: (f32, f32, f32),
    #[serde(default)]
    pub collider: ColliderConfig,
    pub behavior: BehaviorProfile,
}

fn default_sight() -> f32 {
    60.0
}

fn default_scale() -> f32 {
    1.0
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new("assets/data/enemies");

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let enemy_type = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match fs::read_to_string(&path) {
                Ok(contents) => match ron::from_str::<EnemyDefinition>(&contents) {
                    Ok(definition) => {
                        info!(
                            "Loaded enemy definition: {} ({}, {})",
                            definition.name,
                            enemy_type,
                            definition.behavior.archetype.name()
                        );
                        registry.definitions.insert(enemy_type, definition);
                    }
                    Err(e) => {
                        error!("Failed to parse enemy definition {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    error!("Failed to read enemy definition {:?}: {}", path, e);
                }
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Archetype;
    use crate::combat::Faction;

    #[test]
    fn test_definition_parses_with_defaults() {
        let source = r#"(
            name: "Leaper",
            max_health: 40.0,
            move_speed: 3.0,
            color: (0.4, 0.2, 0.6),
            behavior: (
                archetype: Jumper(jump_duration: 0.6, jump_height: 2.5, damage_radius: 2.0),
                engage_max: 9.0,
                telegraph_duration: 0.8,
                recovery_duration: 1.0,
                attack_cooldown: 3.0,
                damage: 18.0,
            ),
        )"#;

        let definition: EnemyDefinition = ron::from_str(source).unwrap();
        assert_eq!(definition.scale, 1.0);
        assert_eq!(definition.sight, 60.0);
        assert!((definition.collider.rest_height() - 0.9).abs() < 1e-6);
        assert_eq!(definition.behavior.limbs, 1);
        assert_eq!(definition.behavior.engage_min, 0.0);
        assert_eq!(definition.behavior.target_faction, Faction::Player);
        assert!(matches!(
            definition.behavior.archetype,
            Archetype::Jumper { jump_height, .. } if jump_height == 2.5
        ));
    }

    #[test]
    fn test_shipped_definitions_parse() {
        for name in ["charger", "jumper", "shooter"] {
            let path = format!("{}/assets/data/enemies/{}.ron", env!("CARGO_MANIFEST_DIR"), name);
            let contents = fs::read_to_string(&path).unwrap();
            let definition: EnemyDefinition = ron::from_str(&contents).unwrap();
            assert_eq!(definition.behavior.archetype.name(), name);
        }
    }
}
