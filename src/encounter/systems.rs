//! Encounter systems: setup, director tick, input, rewards and event forwarding.

use std::path::Path;

use bevy::prelude::*;

use super::adapters::{CommandSpawner, LogTelemetry};
use super::channel::{EncounterEvent, EventChannel};
use super::collaborators::EncounterContext;
use super::config::{EncounterConfig, ENCOUNTER_PATH};
use super::cues::{CueBuffer, StageCue};
use super::director::{EncounterDirector, EncounterPhase};
use super::rewards::{RewardAssets, RewardOrders, RewardPickup};
use crate::behavior::{BehaviorAssets, MarkerCommands, Sequencer};
use crate::combat::{capture_snapshot, CombatantQuery, Dead, DeathEvent, Health};
use crate::core::{EncounterFinished, GameState, WaveCleared, WaveStarted};
use crate::enemies::{EnemyRegistry, Hostile, WaveTag};
use crate::player::Player;

/// How close the player must get to a reward to claim it.
const PICKUP_RADIUS: f32 = 1.2;

/// Load the encounter and create the director. A bad configuration ends the app.
pub fn setup_encounter(mut commands: Commands, mut exit: EventWriter<AppExit>) {
    let result = EncounterConfig::load(Path::new(ENCOUNTER_PATH)).and_then(EncounterDirector::new);

    match result {
        Ok(director) => {
            info!(
                "Encounter loaded: {} waves, {} spawn points",
                director.total_waves(),
                director.config().spawn_points.len()
            );
            commands.insert_resource(director);
        }
        Err(e) => {
            error!("Cannot start encounter: {}", e);
            exit.send(AppExit::error());
        }
    }
}

/// Enter skips the break; click or Space advances the ending dialogue.
pub fn handle_encounter_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut director: ResMut<EncounterDirector>,
) {
    match director.phase() {
        EncounterPhase::Break => {
            if keyboard.just_pressed(KeyCode::Enter) {
                director.request_skip();
            }
        }
        EncounterPhase::Ending => {
            if mouse.just_pressed(MouseButton::Left) || keyboard.just_pressed(KeyCode::Space) {
                director.advance_dialogue();
            }
        }
        _ => {}
    }
}

/// Walking into a reward during the break claims it.
pub fn claim_rewards(
    mut commands: Commands,
    mut director: ResMut<EncounterDirector>,
    mut player_query: Query<(&Transform, &mut Health), (With<Player>, Without<Dead>)>,
    pickups: Query<(Entity, &Transform, &RewardPickup)>,
) {
    if director.phase() != EncounterPhase::Break {
        return;
    }
    let Ok((player_transform, mut health)) = player_query.get_single_mut() else {
        return;
    };
    let player_position = player_transform.translation.with_y(0.0);

    for (entity, transform, pickup) in pickups.iter() {
        if transform.translation.with_y(0.0).distance(player_position) > PICKUP_RADIUS {
            continue;
        }
        health.current = (health.current + pickup.heal).min(health.maximum);
        commands.entity(entity).despawn_recursive();
        info!("Reward claimed (+{} health)", pickup.heal);
        director.on_reward_claimed();
    }
}

/// Advance the director with engine-backed collaborators.
#[allow(clippy::too_many_arguments)]
pub fn run_director(
    mut commands: Commands,
    time: Res<Time>,
    mut director: ResMut<EncounterDirector>,
    mut channel: ResMut<EventChannel>,
    registry: Res<EnemyRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    reward_assets: Res<RewardAssets>,
    pickups: Query<Entity, With<RewardPickup>>,
    combatants: CombatantQuery,
    mut stage_cues: EventWriter<StageCue>,
) {
    let census = capture_snapshot(&combatants);
    let mut rewards = RewardOrders::default();
    let mut cues = CueBuffer::default();
    let mut telemetry = LogTelemetry;
    let mut spawner = CommandSpawner {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
        registry: &registry,
    };

    let mut ctx = EncounterContext {
        spawner: Some(&mut spawner),
        rewards: Some(&mut rewards),
        presentation: Some(&mut cues),
        telemetry: Some(&mut telemetry),
        census: Some(&census),
        events: &mut channel,
    };
    director.tick(time.delta_secs(), &mut ctx);

    rewards.apply(
        &mut commands,
        &reward_assets,
        &director.config().rewards,
        pickups.iter(),
    );
    for cue in cues.cues {
        stage_cues.send(cue);
    }
}

/// Republish the director's channel as engine events.
pub fn forward_encounter_events(
    mut channel: ResMut<EventChannel>,
    mut started: EventWriter<WaveStarted>,
    mut cleared: EventWriter<WaveCleared>,
    mut finished: EventWriter<EncounterFinished>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in channel.drain() {
        match event {
            EncounterEvent::WaveStarted { wave } => {
                started.send(WaveStarted { wave });
            }
            EncounterEvent::WaveCleared { wave, forced } => {
                cleared.send(WaveCleared { wave, forced });
            }
            EncounterEvent::BreakEnded { wave, reason } => {
                debug!("Break after wave {} ended ({:?})", wave, reason);
            }
            EncounterEvent::EndingStarted => debug!("Ending started"),
            EncounterEvent::EncounterFinished => {
                finished.send(EncounterFinished);
                next_state.set(GameState::Concluded);
            }
        }
    }
}

/// A hostile of the current wave died: the only way the counter goes down in play.
pub fn forward_hostile_deaths(
    mut death_events: EventReader<DeathEvent>,
    hostiles: Query<&WaveTag, With<Hostile>>,
    mut director: ResMut<EncounterDirector>,
) {
    for event in death_events.read() {
        let Ok(tag) = hostiles.get(event.entity) else {
            continue;
        };
        if tag.0 == director.wave() {
            director.notify_hostile_defeated();
        } else {
            debug!("Ignoring death of a wave {} straggler", tag.0);
        }
    }
}

/// When a wave times out, its survivors are removed.
pub fn clear_stragglers(
    mut commands: Commands,
    assets: Res<BehaviorAssets>,
    mut cleared_events: EventReader<WaveCleared>,
    mut hostiles: Query<(Entity, &WaveTag, &mut Sequencer), (With<Hostile>, Without<Dead>)>,
) {
    for event in cleared_events.read() {
        if !event.forced {
            continue;
        }
        let mut markers = MarkerCommands::new(&mut commands, &assets);
        let mut removed = Vec::new();
        for (entity, tag, mut sequencer) in hostiles.iter_mut() {
            if tag.0 <= event.wave {
                sequencer.0.interrupt(&mut markers);
                removed.push(entity);
            }
        }
        for entity in &removed {
            commands.entity(*entity).despawn_recursive();
        }
        warn!("Removed {} stragglers from wave {}", removed.len(), event.wave);
    }
}
