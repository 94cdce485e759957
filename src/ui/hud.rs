//! In-game HUD - health, wave progress and break countdown.

use bevy::prelude::*;

use crate::combat::Health;
use crate::core::GameState;
use crate::encounter::{EncounterDirector, EncounterPhase};
use crate::player::Player;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for the wave / remaining counter.
#[derive(Component)]
pub struct WaveLabel;

/// Marker for the break countdown and skip prompt.
#[derive(Component)]
pub struct BreakLabel;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnExit(GameState::Loading), spawn_hud)
        .add_systems(OnEnter(GameState::Concluded), cleanup_hud)
        .add_systems(
            Update,
            (
                update_health_bar,
                (update_wave_label, update_break_label)
                    .run_if(resource_exists::<EncounterDirector>),
            )
                .run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Wave counter and break countdown (top-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.9)),
                WaveLabel,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.8, 0.65)),
                Node {
                    margin: UiRect::top(Val::Px(6.0)),
                    ..default()
                },
                BreakLabel,
            ));
        });

    // Health bar (bottom-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_bar(parent, "Health", Color::srgb(0.8, 0.2, 0.2), HealthBar);
        });
}

/// Helper to spawn a status bar.
fn spawn_bar<M: Component>(parent: &mut ChildBuilder, label: &str, color: Color, bar_marker: M) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            margin: UiRect::bottom(Val::Px(5.0)),
            ..default()
        })
        .with_children(|bar_parent| {
            // Label
            bar_parent.spawn((
                Text::new(label),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    width: Val::Px(60.0),
                    ..default()
                },
            ));

            // Bar background
            bar_parent
                .spawn((
                    Node {
                        width: Val::Px(180.0),
                        height: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    // Bar fill
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(color),
                        bar_marker,
                    ));
                });
        });
}

/// Update health bar based on player health.
fn update_health_bar(
    player_query: Query<&Health, With<Player>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(health.percentage() * 100.0);
}

/// Text for the wave counter in the given phase.
fn wave_text(director: &EncounterDirector) -> String {
    let wave = director.wave();
    let total = director.total_waves();
    match director.phase() {
        EncounterPhase::Standby => String::new(),
        EncounterPhase::Warning => format!("Wave {}/{} approaching", wave, total),
        EncounterPhase::Spawning | EncounterPhase::Active => {
            format!("Wave {}/{}  -  {} remaining", wave, total, director.remaining())
        }
        EncounterPhase::Cleared | EncounterPhase::Break => {
            format!("Wave {}/{} cleared", wave, total)
        }
        EncounterPhase::Ending | EncounterPhase::Finished => String::new(),
    }
}

fn update_wave_label(director: Res<EncounterDirector>, mut label: Query<&mut Text, With<WaveLabel>>) {
    let Ok(mut text) = label.get_single_mut() else {
        return;
    };
    let value = wave_text(&director);
    if text.0 != value {
        text.0 = value;
    }
}

fn update_break_label(director: Res<EncounterDirector>, mut label: Query<&mut Text, With<BreakLabel>>) {
    let Ok(mut text) = label.get_single_mut() else {
        return;
    };
    let value = match director.break_remaining() {
        Some(seconds) => format!("Next wave in {:.0}s  (Enter to skip)", seconds.ceil()),
        None => String::new(),
    };
    if text.0 != value {
        text.0 = value;
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
