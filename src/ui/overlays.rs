//! Stage overlays driven by encounter cues: banners, the dialogue box and the fade.

use bevy::prelude::*;

use crate::core::GameState;
use crate::encounter::StageCue;

/// How long the cleared banner stays up.
const CLEARED_BANNER_SECONDS: f32 = 2.0;

/// Centre-screen banner text with its remaining display time.
#[derive(Component, Default)]
pub struct Banner {
    pub timer: Timer,
}

/// Root of the dialogue box; hidden outside the ending.
#[derive(Component)]
pub struct DialogueBox;

#[derive(Component)]
pub struct DialogueSpeaker;

#[derive(Component)]
pub struct DialogueText;

/// Full-screen black overlay. Opacity rises while `timer` runs.
#[derive(Component, Default)]
pub struct FadeOverlay {
    pub timer: Option<Timer>,
}

pub fn setup_overlay_systems(app: &mut App) {
    app.add_systems(OnExit(GameState::Loading), spawn_overlays)
        .add_systems(
            Update,
            (apply_overlay_cues, tick_banner, tick_fade).chain(),
        );
}

fn spawn_overlays(mut commands: Commands) {
    // Banner (upper third, centred)
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(35.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::End,
            position_type: PositionType::Absolute,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.8, 0.6)),
                Visibility::Hidden,
                Banner::default(),
            ));
        });

    // Dialogue box (bottom, centred)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::End,
                padding: UiRect::bottom(Val::Px(40.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            DialogueBox,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(720.0),
                        min_height: Val::Px(120.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(16.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.02, 0.02, 0.05, 0.85)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.75, 0.5)),
                        Node {
                            margin: UiRect::bottom(Val::Px(8.0)),
                            ..default()
                        },
                        DialogueSpeaker,
                    ));
                    panel.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.9, 0.92)),
                        DialogueText,
                    ));
                });
        });

    // Fade overlay (on top of everything)
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        GlobalZIndex(10),
        FadeOverlay::default(),
    ));
}

#[allow(clippy::type_complexity)]
fn apply_overlay_cues(
    mut cues: EventReader<StageCue>,
    mut banner_query: Query<(&mut Text, &mut Visibility, &mut Banner)>,
    mut dialogue_box: Query<&mut Visibility, (With<DialogueBox>, Without<Banner>)>,
    mut speaker_query: Query<&mut Text, (With<DialogueSpeaker>, Without<Banner>)>,
    mut line_query: Query<
        &mut Text,
        (With<DialogueText>, Without<DialogueSpeaker>, Without<Banner>),
    >,
    mut fade_query: Query<&mut FadeOverlay>,
) {
    for cue in cues.read() {
        match cue {
            StageCue::Warning { wave, duration } => {
                if let Ok((mut text, mut visibility, mut banner)) = banner_query.get_single_mut() {
                    text.0 = format!("Wave {} incoming", wave);
                    *visibility = Visibility::Inherited;
                    banner.timer = Timer::from_seconds(duration.max(0.0), TimerMode::Once);
                }
            }
            StageCue::Cleared { wave } => {
                if let Ok((mut text, mut visibility, mut banner)) = banner_query.get_single_mut() {
                    text.0 = format!("Wave {} cleared", wave);
                    *visibility = Visibility::Inherited;
                    banner.timer = Timer::from_seconds(CLEARED_BANNER_SECONDS, TimerMode::Once);
                }
            }
            StageCue::Dialogue { speaker, text } => {
                if let Ok(mut visibility) = dialogue_box.get_single_mut() {
                    *visibility = Visibility::Inherited;
                }
                if let Ok(mut speaker_text) = speaker_query.get_single_mut() {
                    speaker_text.0.clone_from(speaker);
                }
                if let Ok(mut line) = line_query.get_single_mut() {
                    line.0.clone_from(text);
                }
            }
            StageCue::HideDialogue => {
                if let Ok(mut visibility) = dialogue_box.get_single_mut() {
                    *visibility = Visibility::Hidden;
                }
            }
            StageCue::FadeOut { duration } => {
                if let Ok(mut fade) = fade_query.get_single_mut() {
                    fade.timer = Some(Timer::from_seconds(duration.max(0.0), TimerMode::Once));
                }
            }
            _ => {}
        }
    }
}

fn tick_banner(time: Res<Time>, mut query: Query<(&mut Visibility, &mut Banner)>) {
    for (mut visibility, mut banner) in query.iter_mut() {
        if *visibility == Visibility::Hidden {
            continue;
        }
        if banner.timer.tick(time.delta()).finished() {
            *visibility = Visibility::Hidden;
        }
    }
}

fn tick_fade(time: Res<Time>, mut query: Query<(&mut BackgroundColor, &mut FadeOverlay)>) {
    for (mut background, mut fade) in query.iter_mut() {
        let Some(timer) = fade.timer.as_mut() else {
            continue;
        };
        timer.tick(time.delta());
        background.0 = Color::srgba(0.0, 0.0, 0.0, timer.fraction());
    }
}
