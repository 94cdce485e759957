//! UI plugin - HUD, stage overlays, pause and end screens.

use bevy::prelude::*;

use super::hud;
use super::overlays;
use crate::core::GameState;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        overlays::setup_overlay_systems(app);

        app
            // Pause menu
            .add_systems(OnEnter(GameState::Paused), setup_pause_menu)
            .add_systems(OnExit(GameState::Paused), cleanup_menu::<PauseMenuUi>)

            // End screens
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnEnter(GameState::Concluded), setup_concluded)

            .add_systems(
                Update,
                menu_input.run_if(
                    in_state(GameState::Paused)
                        .or(in_state(GameState::GameOver))
                        .or(in_state(GameState::Concluded)),
                ),
            );
    }
}

/// Marker for pause menu UI entities.
#[derive(Component)]
struct PauseMenuUi;

/// Marker for end screen UI entities.
#[derive(Component)]
struct EndScreenUi;

/// Marker for menu buttons.
#[derive(Component)]
enum MenuButton {
    Resume,
    Quit,
}

/// Helper to spawn a menu button.
fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.15, 0.15, 0.2)),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Full-screen column with a title, used by every menu screen.
fn spawn_screen<M: Component>(
    commands: &mut Commands,
    marker: M,
    background: Color,
    title: &str,
    title_color: Color,
    buttons: Vec<(&str, MenuButton)>,
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(background),
            GlobalZIndex(20),
            marker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(title_color),
                Node {
                    margin: UiRect::bottom(Val::Px(50.0)),
                    ..default()
                },
            ));

            for (label, button) in buttons {
                spawn_menu_button(parent, label, button);
            }
        });
}

/// Set up the pause menu.
fn setup_pause_menu(mut commands: Commands) {
    spawn_screen(
        &mut commands,
        PauseMenuUi,
        Color::srgba(0.0, 0.0, 0.0, 0.7),
        "PAUSED",
        Color::srgb(0.8, 0.8, 0.85),
        vec![("Resume", MenuButton::Resume), ("Quit", MenuButton::Quit)],
    );
}

/// Set up the game over screen.
fn setup_game_over(mut commands: Commands) {
    spawn_screen(
        &mut commands,
        EndScreenUi,
        Color::srgba(0.1, 0.0, 0.0, 0.9),
        "YOU DIED",
        Color::srgb(0.8, 0.2, 0.2),
        vec![("Quit", MenuButton::Quit)],
    );
}

/// Set up the screen shown once the ending has faded out.
fn setup_concluded(mut commands: Commands) {
    spawn_screen(
        &mut commands,
        EndScreenUi,
        Color::srgb(0.0, 0.0, 0.0),
        "THE TIDE HAS BROKEN",
        Color::srgb(0.8, 0.7, 0.6),
        vec![("Quit", MenuButton::Quit)],
    );
}

/// Handle menu button interactions.
fn menu_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = Color::srgb(0.3, 0.3, 0.35).into();
                match button {
                    MenuButton::Resume => next_state.set(GameState::InGame),
                    MenuButton::Quit => {
                        exit.send(AppExit::Success);
                    }
                }
            }
            Interaction::Hovered => {
                *bg_color = Color::srgb(0.25, 0.25, 0.3).into();
            }
            Interaction::None => {
                *bg_color = Color::srgb(0.15, 0.15, 0.2).into();
            }
        }
    }
}

/// Clean up menu entities.
fn cleanup_menu<M: Component>(mut commands: Commands, query: Query<Entity, With<M>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
